//! Shared books and canned backend responses

#![allow(dead_code)]

use readmore_core::domain::{AuthorRef, BookSummary};
use std::path::PathBuf;

/// Get the path to a fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_fixtures")
        .join(name)
}

/// Load a canned backend response body
pub fn load_response_fixture(name: &str) -> String {
    let path = fixture_path(&format!("responses/{}", name));
    std::fs::read_to_string(&path)
        .unwrap_or_else(|_| panic!("Failed to load fixture: {}", path.display()))
}

/// Classic fantasy with one subject and one author
pub fn hobbit() -> BookSummary {
    BookSummary::new("OL27482W")
        .with_title("The Hobbit")
        .with_author(AuthorRef::new("OL26320A").with_name("J.R.R. Tolkien"))
        .with_subjects(["Fantasy"])
        .with_year(1937)
}

/// Modern science fiction with two subjects
pub fn three_body() -> BookSummary {
    BookSummary::new("OL17356815W")
        .with_title("The Three-Body Problem")
        .with_author(AuthorRef::new("OL5992383A").with_name("Liu Cixin"))
        .with_subjects(["Science Fiction", "Physics"])
        .with_year(2008)
}

/// A book with no subjects, authors or year
pub fn bare(work_id: &str) -> BookSummary {
    BookSummary::new(work_id).with_title(format!("Untitled {}", work_id))
}
