//! Presentation state derived from the stored [`UserState`]
//!
//! Nothing in here is persisted. Views are rebuilt from a freshly loaded
//! state after every action; panels fed by the backends keep a request
//! ticket so a slow, superseded response cannot overwrite a newer one.

use crate::client::{
    ApiError, RecommendOutcome, RecommendRequest, RECOMMEND_FAILED_MESSAGE,
    SEARCH_FAILED_MESSAGE,
};
use crate::domain::{BookSummary, Recommendation, SavedBook};
use crate::merge::{merge_work_detail, WorkDetail};
use crate::state::{CardStatus, UserState};

/// Recommendations shown per page
pub const RECOMMEND_PAGE_SIZE: usize = 8;

pub const NO_PROFILE_MESSAGE: &str =
    "Add books to your collection to get personalized recommendations.";
pub const NO_RESULTS_MESSAGE: &str = "No results found.";
pub const NO_DESCRIPTION_MESSAGE: &str = "No description available.";
pub const LOADING_MESSAGE: &str = "Loading…";

/// Identifies one request issued by a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug, Default, Clone)]
struct Generation(u64);

impl Generation {
    fn advance(&mut self) -> Ticket {
        self.0 += 1;
        Ticket(self.0)
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        ticket.0 == self.0
    }
}

// MARK: - Shelf

/// Saved books in shelf order
#[derive(Debug, Clone, PartialEq)]
pub struct ShelfView {
    pub books: Vec<SavedBook>,
}

impl ShelfView {
    pub fn derive(state: &UserState) -> Self {
        Self {
            books: state.saved_books.clone(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }
}

// MARK: - Search

/// What the search panel currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum SearchContent {
    Idle,
    Searching,
    Results(Vec<BookSummary>),
    /// The search succeeded with nothing to show
    Empty(&'static str),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct SearchPanel {
    generation: Generation,
    pub content: SearchContent,
}

impl Default for SearchPanel {
    fn default() -> Self {
        Self {
            generation: Generation::default(),
            content: SearchContent::Idle,
        }
    }
}

impl SearchPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a search for `query`. Blank queries issue nothing.
    pub fn begin(&mut self, query: &str) -> Option<Ticket> {
        if query.trim().is_empty() {
            return None;
        }
        self.content = SearchContent::Searching;
        Some(self.generation.advance())
    }

    /// Record a search outcome. Returns false if the ticket was superseded.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<Vec<BookSummary>, ApiError>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!("Discarding stale search response {:?}", ticket);
            return false;
        }
        self.content = match outcome {
            Ok(results) if results.is_empty() => SearchContent::Empty(NO_RESULTS_MESSAGE),
            Ok(results) => SearchContent::Results(results),
            Err(e) => SearchContent::Failed(e.user_message(SEARCH_FAILED_MESSAGE)),
        };
        true
    }

    pub fn results(&self) -> &[BookSummary] {
        match &self.content {
            SearchContent::Results(results) => results,
            _ => &[],
        }
    }

    /// Button state for every result card, from `state`
    pub fn card_statuses(&self, state: &UserState) -> Vec<(String, CardStatus)> {
        self.results()
            .iter()
            .filter_map(|book| {
                let id = book.work_id()?;
                let status = CardStatus::derive(state, &id);
                Some((id.to_string(), status))
            })
            .collect()
    }
}

// MARK: - Recommendations

/// Whether the profile is worth sending to the recommendation backend
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationGate {
    /// No subject signal yet; show the message instead of asking
    NeedsProfile(&'static str),
    Ready(RecommendRequest),
}

impl RecommendationGate {
    pub fn derive(state: &UserState) -> Self {
        if state.profile.has_subject_signal() {
            Self::Ready(RecommendRequest::from_state(state))
        } else {
            Self::NeedsProfile(NO_PROFILE_MESSAGE)
        }
    }
}

/// One page of recommendations
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationPage<'a> {
    pub items: &'a [Recommendation],
    /// 1-based
    pub page: usize,
    pub total_pages: usize,
}

impl RecommendationPage<'_> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Pagination controls are only shown with more than one page
    pub fn show_controls(&self) -> bool {
        self.total_pages > 1
    }
}

/// Client-side pagination over a recommendation list
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationPager {
    items: Vec<Recommendation>,
    page_size: usize,
    page: usize,
}

impl RecommendationPager {
    pub fn new(items: Vec<Recommendation>, page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
            page: 1,
        }
    }

    /// At least one page, even when empty
    pub fn total_pages(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    /// Jump to `page`, clamped into range
    pub fn set_page(&mut self, page: usize) {
        self.page = page.clamp(1, self.total_pages());
    }

    pub fn next(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    pub fn current(&self) -> RecommendationPage<'_> {
        let start = ((self.page - 1) * self.page_size).min(self.items.len());
        let end = (start + self.page_size).min(self.items.len());
        RecommendationPage {
            items: &self.items[start..end],
            page: self.page,
            total_pages: self.total_pages(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// What the recommendation panel currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationContent {
    Idle,
    Loading,
    Message(String),
    Loaded(RecommendationPager),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RecommendationPanel {
    generation: Generation,
    page_size: usize,
    pub content: RecommendationContent,
}

impl RecommendationPanel {
    pub fn new(page_size: usize) -> Self {
        Self {
            generation: Generation::default(),
            page_size,
            content: RecommendationContent::Idle,
        }
    }

    /// Refresh from `state`. Returns the request to send, if any.
    ///
    /// Any request still in flight is superseded either way.
    pub fn begin(&mut self, state: &UserState) -> Option<(Ticket, RecommendRequest)> {
        let ticket = self.generation.advance();
        match RecommendationGate::derive(state) {
            RecommendationGate::NeedsProfile(message) => {
                self.content = RecommendationContent::Message(message.to_string());
                None
            }
            RecommendationGate::Ready(request) => {
                self.content = RecommendationContent::Loading;
                Some((ticket, request))
            }
        }
    }

    /// Record a backend outcome. Returns false if the ticket was superseded.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<RecommendOutcome, ApiError>,
    ) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!("Discarding stale recommendations {:?}", ticket);
            return false;
        }
        self.content = match outcome {
            Ok(RecommendOutcome::Message(message)) => RecommendationContent::Message(message),
            Ok(RecommendOutcome::Recommendations(items)) => {
                RecommendationContent::Loaded(RecommendationPager::new(items, self.page_size))
            }
            Err(e) => RecommendationContent::Failed(e.user_message(RECOMMEND_FAILED_MESSAGE)),
        };
        true
    }

    pub fn pager_mut(&mut self) -> Option<&mut RecommendationPager> {
        match &mut self.content {
            RecommendationContent::Loaded(pager) => Some(pager),
            _ => None,
        }
    }
}

impl Default for RecommendationPanel {
    fn default() -> Self {
        Self::new(RECOMMEND_PAGE_SIZE)
    }
}

// MARK: - Detail

/// A book as shown in the detail view
#[derive(Debug, Clone, PartialEq)]
pub struct DetailView {
    pub book: BookSummary,
    pub description: String,
    pub loading: bool,
}

/// The detail view for the most recently opened book
#[derive(Debug, Clone, Default)]
pub struct DetailPanel {
    generation: Generation,
    pub view: Option<DetailView>,
}

impl DetailPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show `book` immediately from what is known, and issue a detail fetch.
    ///
    /// Books without a usable work id are not opened.
    pub fn open(&mut self, book: &BookSummary) -> Option<Ticket> {
        book.work_id()?;
        self.view = Some(DetailView {
            book: book.clone(),
            description: book
                .description
                .clone()
                .unwrap_or_else(|| LOADING_MESSAGE.to_string()),
            loading: true,
        });
        Some(self.generation.advance())
    }

    /// Merge a detail response into the open view. Returns false if the
    /// ticket was superseded by a later `open`.
    pub fn complete(&mut self, ticket: Ticket, outcome: Result<WorkDetail, ApiError>) -> bool {
        if !self.generation.is_current(ticket) {
            tracing::debug!("Discarding stale work detail {:?}", ticket);
            return false;
        }
        let Some(view) = self.view.as_mut() else {
            return false;
        };

        match outcome {
            Ok(detail) => {
                view.book = merge_work_detail(&view.book, &detail).merged;
            }
            Err(e) => {
                tracing::warn!("Work detail for {} failed: {}", view.book.work_id, e);
            }
        }
        view.description = view
            .book
            .description
            .clone()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or_else(|| NO_DESCRIPTION_MESSAGE.to_string());
        view.loading = false;
        true
    }

    pub fn close(&mut self) {
        self.generation.advance();
        self.view = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{rate_like, save_book};

    fn recs(n: usize) -> Vec<Recommendation> {
        (0..n)
            .map(|i| Recommendation {
                book: BookSummary::new(format!("OL{}W", i)),
                score: i as f64,
                reasons: vec![],
            })
            .collect()
    }

    #[test]
    fn test_pager_pages() {
        let mut pager = RecommendationPager::new(recs(17), RECOMMEND_PAGE_SIZE);
        assert_eq!(pager.total_pages(), 3);
        assert_eq!(pager.current().items.len(), 8);

        pager.set_page(3);
        assert_eq!(pager.current().items.len(), 1);
        assert!(!pager.current().has_next());

        pager.set_page(99);
        assert_eq!(pager.current().page, 3);
        pager.set_page(0);
        assert_eq!(pager.current().page, 1);
    }

    #[test]
    fn test_pager_empty_has_one_page() {
        let pager = RecommendationPager::new(vec![], RECOMMEND_PAGE_SIZE);
        assert_eq!(pager.total_pages(), 1);
        assert!(pager.current().items.is_empty());
        assert!(!pager.current().show_controls());
    }

    #[test]
    fn test_gate_needs_subjects() {
        assert_eq!(
            RecommendationGate::derive(&UserState::empty()),
            RecommendationGate::NeedsProfile(NO_PROFILE_MESSAGE)
        );

        let book = BookSummary::new("OL1W").with_subjects(["fantasy"]);
        let state = save_book(&UserState::empty(), &book);
        assert!(matches!(
            RecommendationGate::derive(&state),
            RecommendationGate::Ready(_)
        ));
    }

    #[test]
    fn test_stale_recommendations_discarded() {
        let book = BookSummary::new("OL1W").with_subjects(["fantasy"]);
        let state = rate_like(&UserState::empty(), &book);
        let mut panel = RecommendationPanel::default();

        let (first, _) = panel.begin(&state).unwrap();
        let (second, _) = panel.begin(&state).unwrap();

        assert!(panel.complete(second, Ok(RecommendOutcome::Recommendations(recs(3)))));
        assert!(!panel.complete(first, Ok(RecommendOutcome::Message("old".to_string()))));
        assert!(matches!(panel.content, RecommendationContent::Loaded(_)));
    }

    #[test]
    fn test_recommendation_failure_message() {
        let book = BookSummary::new("OL1W").with_subjects(["fantasy"]);
        let state = rate_like(&UserState::empty(), &book);
        let mut panel = RecommendationPanel::default();
        let (ticket, _) = panel.begin(&state).unwrap();

        let err = ApiError::Status {
            status: 502,
            message: String::new(),
        };
        panel.complete(ticket, Err(err));
        assert_eq!(
            panel.content,
            RecommendationContent::Failed(RECOMMEND_FAILED_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_search_empty_results() {
        let mut panel = SearchPanel::new();
        assert!(panel.begin("   ").is_none());
        let ticket = panel.begin("dune").unwrap();
        panel.complete(ticket, Ok(vec![]));
        assert_eq!(panel.content, SearchContent::Empty(NO_RESULTS_MESSAGE));
    }

    #[test]
    fn test_detail_failure_falls_back() {
        let mut panel = DetailPanel::new();
        let book = BookSummary::new("OL1W").with_title("Kindred");
        let ticket = panel.open(&book).unwrap();
        assert_eq!(panel.view.as_ref().unwrap().description, LOADING_MESSAGE);

        let err = ApiError::RequestFailed {
            message: "connection refused".to_string(),
        };
        assert!(panel.complete(ticket, Err(err)));

        let view = panel.view.as_ref().unwrap();
        assert_eq!(view.book, book);
        assert_eq!(view.description, NO_DESCRIPTION_MESSAGE);
        assert!(!view.loading);
    }

    #[test]
    fn test_later_detail_takes_precedence() {
        let mut panel = DetailPanel::new();
        let first = panel.open(&BookSummary::new("OL1W")).unwrap();
        let second = panel.open(&BookSummary::new("OL2W")).unwrap();

        let detail = WorkDetail {
            description: Some("second book".to_string()),
            ..Default::default()
        };
        assert!(panel.complete(second, Ok(detail)));
        assert!(!panel.complete(first, Ok(WorkDetail::default())));

        let view = panel.view.as_ref().unwrap();
        assert_eq!(view.book.work_id, "OL2W");
        assert_eq!(view.description, "second book");
    }

    #[test]
    fn test_card_statuses_follow_state() {
        let mut panel = SearchPanel::new();
        let ticket = panel.begin("earthsea").unwrap();
        let book = BookSummary::new("OL1W");
        panel.complete(ticket, Ok(vec![book.clone(), BookSummary::new("  ")]));

        let state = rate_like(&UserState::empty(), &book);
        let statuses = panel.card_statuses(&state);
        assert_eq!(statuses.len(), 1);
        assert!(statuses[0].1.like_active());
    }
}
