//! Enriching a known summary with a work-detail response
//!
//! The detail backend answers with a partial record. Each field has its own
//! rule; a field only replaces the summary's value when the detail actually
//! carries something, so a sparse response never blanks out what was known.

use crate::domain::book::null_as_default;
use crate::domain::{AuthorRef, BookSummary};
use serde::{Deserialize, Serialize};

/// Partial record returned by the work-detail backend
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct WorkDetail {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub isbn: Option<Vec<String>>,
    #[serde(default)]
    pub subjects: Option<Vec<String>>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub cover_url: Option<String>,
    /// Not merged; used when no summary is known at all
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<AuthorRef>,
}

impl WorkDetail {
    /// Build a summary from the detail alone
    pub fn into_summary(self, work_id: &str) -> BookSummary {
        BookSummary {
            work_id: work_id.to_string(),
            title: self.title,
            authors: self.authors,
            first_publish_year: self.first_publish_year,
            subjects: self.subjects.unwrap_or_default(),
            cover_url: self.cover_url.filter(|url| !url.is_empty()),
            isbn: self.isbn.unwrap_or_default(),
            source: Some("work".to_string()),
            description: self.description,
        }
    }
}

/// Outcome of a detail merge
#[derive(Clone, Debug, PartialEq)]
pub struct DetailMerge {
    pub merged: BookSummary,
    /// Names of the fields taken from the detail response
    pub fields_from_detail: Vec<String>,
}

/// Merge `detail` onto `summary`, favoring whichever side has a value.
pub fn merge_work_detail(summary: &BookSummary, detail: &WorkDetail) -> DetailMerge {
    let mut merged = summary.clone();
    let mut fields_from_detail = Vec::new();

    // Description: present wins
    if let Some(description) = &detail.description {
        merged.description = Some(description.clone());
        fields_from_detail.push("description".to_string());
    }

    // ISBN: non-empty list wins
    if let Some(isbn) = detail.isbn.as_ref().filter(|list| !list.is_empty()) {
        merged.isbn = isbn.clone();
        fields_from_detail.push("isbn".to_string());
    }

    // Subjects: non-empty list wins
    if let Some(subjects) = detail.subjects.as_ref().filter(|list| !list.is_empty()) {
        merged.subjects = subjects.clone();
        fields_from_detail.push("subjects".to_string());
    }

    // First publish year: present wins
    if let Some(year) = detail.first_publish_year {
        merged.first_publish_year = Some(year);
        fields_from_detail.push("first_publish_year".to_string());
    }

    // Cover: non-empty URL wins
    if let Some(url) = detail.cover_url.as_ref().filter(|url| !url.is_empty()) {
        merged.cover_url = Some(url.clone());
        fields_from_detail.push("cover_url".to_string());
    }

    DetailMerge {
        merged,
        fields_from_detail,
    }
}
