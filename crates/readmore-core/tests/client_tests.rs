//! Backend response handling wired through the panels

mod common;

use common::fixtures::{hobbit, load_response_fixture};
use readmore_core::client::{
    parse_recommend_response, parse_search_response, parse_work_response, search_path,
    work_path, ApiError, RecommendOutcome, RecommendRequest, SEARCH_FAILED_MESSAGE,
};
use readmore_core::state::{rate_like, save_book, UserState};
use readmore_core::views::{
    DetailPanel, RecommendationContent, RecommendationPanel, SearchContent, SearchPanel,
    NO_PROFILE_MESSAGE,
};
use rstest::rstest;

#[test]
fn test_search_fixture_decodes() {
    let body = load_response_fixture("search_dune.json");
    let results = parse_search_response(200, "OK", &body).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].display_title(), "Dune");
    assert_eq!(results[0].author_names(), "Frank Herbert");
    assert_eq!(results[0].first_publish_year, Some(1965));
    // null subjects decode as empty
    assert!(results[1].subjects.is_empty());
    assert_eq!(results[1].cover_url, None);
}

#[test]
fn test_search_error_uses_detail() {
    let body = load_response_fixture("error_detail.json");
    let err = parse_search_response(502, "Bad Gateway", &body).unwrap_err();
    assert_eq!(err.user_message(SEARCH_FAILED_MESSAGE), "Open Library is unavailable");
}

#[rstest]
#[case("", "Bad Gateway", "Bad Gateway")]
#[case("<html>oops</html>", "Service Unavailable", "Service Unavailable")]
#[case("", "", SEARCH_FAILED_MESSAGE)]
fn test_search_error_falls_back(#[case] body: &str, #[case] status_text: &str, #[case] shown: &str) {
    let err = parse_search_response(503, status_text, body).unwrap_err();
    assert_eq!(err.user_message(SEARCH_FAILED_MESSAGE), shown);
}

#[test]
fn test_recommend_fixture_pages() {
    let book = hobbit();
    let state = save_book(&rate_like(&UserState::empty(), &book), &book);
    let mut panel = RecommendationPanel::default();
    let (ticket, request) = panel.begin(&state).unwrap();

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json["likedWorks"], serde_json::json!(["OL27482W"]));
    assert_eq!(json["profile"]["subjects"]["fantasy"], 3);

    let body = load_response_fixture("recommend_ok.json");
    assert!(panel.complete(ticket, parse_recommend_response(200, "OK", &body)));

    let pager = panel.pager_mut().unwrap();
    let page = pager.current();
    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].score, 7.5);
    assert_eq!(page.items[0].reasons.len(), 2);
    assert!(page.items[1].reasons.is_empty());
    assert!(!page.show_controls());
}

#[test]
fn test_recommend_backend_message() {
    let body = load_response_fixture("recommend_message.json");
    let outcome = parse_recommend_response(200, "OK", &body).unwrap();
    assert_eq!(
        outcome,
        RecommendOutcome::Message("Like or save a few books first.".to_string())
    );
}

#[test]
fn test_recommend_without_subjects_sends_nothing() {
    let mut panel = RecommendationPanel::default();
    assert!(panel.begin(&UserState::empty()).is_none());
    assert_eq!(
        panel.content,
        RecommendationContent::Message(NO_PROFILE_MESSAGE.to_string())
    );
}

#[test]
fn test_request_mirrors_state() {
    let state = rate_like(&UserState::empty(), &hobbit());
    let request = RecommendRequest::from_state(&state);
    assert_eq!(request.liked_works, state.liked_works);
    assert_eq!(request.profile, state.profile);
}

#[test]
fn test_detail_fixture_merges() {
    let body = load_response_fixture("search_dune.json");
    let dune = parse_search_response(200, "OK", &body).unwrap().remove(0);

    let mut panel = DetailPanel::new();
    let ticket = panel.open(&dune).unwrap();
    let detail = parse_work_response(200, "OK", &load_response_fixture("work_detail.json"));
    assert!(panel.complete(ticket, detail));

    let view = panel.view.as_ref().unwrap();
    assert!(view.description.starts_with("Set on the desert planet"));
    assert_eq!(view.book.subjects.len(), 3);
    // null year and null isbn keep what the search knew
    assert_eq!(view.book.first_publish_year, Some(1965));
    assert_eq!(view.book.isbn, vec!["9780441172719".to_string()]);
    assert!(view.book.cover_url.as_deref().unwrap().ends_with("-L.jpg"));
}

#[test]
fn test_search_panel_failure_message() {
    let mut panel = SearchPanel::new();
    let ticket = panel.begin("dune").unwrap();
    panel.complete(
        ticket,
        Err(ApiError::Status {
            status: 500,
            message: "Internal Server Error".to_string(),
        }),
    );
    assert_eq!(
        panel.content,
        SearchContent::Failed("Internal Server Error".to_string())
    );
}

#[rstest]
#[case("dune", 20, "/api/search?q=dune&limit=20")]
#[case("  the hobbit ", 20, "/api/search?q=the%20hobbit&limit=20")]
#[case("dune", 0, "/api/search?q=dune&limit=1")]
#[case("dune", 500, "/api/search?q=dune&limit=50")]
fn test_search_paths(#[case] query: &str, #[case] limit: u32, #[case] expected: &str) {
    assert_eq!(search_path(query, limit).unwrap(), expected);
}

#[test]
fn test_blank_inputs_rejected_before_request() {
    assert_eq!(search_path("   ", 20), Err(ApiError::EmptyQuery));
    assert!(matches!(work_path(" "), Err(ApiError::InvalidWorkId(_))));
    assert_eq!(work_path(" OL1W ").unwrap(), "/api/work/OL1W");
}
