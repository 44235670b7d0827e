//! Book records exchanged with the backends and kept on the shelf

use super::WorkId;
use serde::{Deserialize, Deserializer, Serialize};

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Author reference as returned by the backends
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct AuthorRef {
    /// Author key (e.g. `OL23919A`); may be empty when the backend had none
    #[serde(default, deserialize_with = "null_as_default")]
    pub key: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl AuthorRef {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: None,
        }
    }

    /// Builder method to add a display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The key used in the profile's author weights, if any
    pub fn profile_key(&self) -> Option<&str> {
        let key = self.key.trim();
        if key.is_empty() {
            None
        } else {
            Some(key)
        }
    }
}

/// A book as produced by the search, recommend and work backends.
///
/// Read-only input to the engine. List fields default to empty and scalar
/// fields to `None`, so partially filled payloads decode cleanly.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct BookSummary {
    /// Raw work identifier; validated with [`BookSummary::work_id`]
    #[serde(default, deserialize_with = "null_as_default")]
    pub work_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<AuthorRef>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub isbn: Vec<String>,
    /// Which backend listing produced this record ("search", "subject", "work")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Long description, only known after a work-detail fetch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl BookSummary {
    pub fn new(work_id: impl Into<String>) -> Self {
        Self {
            work_id: work_id.into(),
            ..Default::default()
        }
    }

    /// Builder method to set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to append an author
    pub fn with_author(mut self, author: AuthorRef) -> Self {
        self.authors.push(author);
        self
    }

    /// Builder method to set the subjects
    pub fn with_subjects<I, S>(mut self, subjects: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subjects = subjects.into_iter().map(Into::into).collect();
        self
    }

    /// Builder method to set the first publication year
    pub fn with_year(mut self, year: i32) -> Self {
        self.first_publish_year = Some(year);
        self
    }

    /// The validated work id, or `None` when the raw id is blank
    pub fn work_id(&self) -> Option<WorkId> {
        WorkId::parse(&self.work_id)
    }

    /// Author names joined for display, "Unknown" for missing names
    pub fn author_names(&self) -> String {
        if self.authors.is_empty() {
            return "Unknown".to_string();
        }
        self.authors
            .iter()
            .map(|a| a.name.as_deref().unwrap_or("Unknown"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Title for display
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or("Unknown")
    }

    /// Project this summary into the record kept on the shelf
    pub fn to_saved_book(&self, work_id: &WorkId) -> SavedBook {
        SavedBook {
            work_id: work_id.clone(),
            title: self.title.clone(),
            authors: self.authors.clone(),
            first_publish_year: self.first_publish_year,
            subjects: self.subjects.clone(),
            cover_url: self.cover_url.clone(),
            isbn: self.isbn.clone(),
        }
    }
}

/// Shelf record: exactly the summary fields worth keeping, nothing ranked
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SavedBook {
    pub work_id: WorkId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub authors: Vec<AuthorRef>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subjects: Vec<String>,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub isbn: Vec<String>,
}

impl SavedBook {
    /// Widen back into a summary (for detail views and re-saving)
    pub fn to_summary(&self) -> BookSummary {
        BookSummary {
            work_id: self.work_id.to_string(),
            title: self.title.clone(),
            authors: self.authors.clone(),
            first_publish_year: self.first_publish_year,
            subjects: self.subjects.clone(),
            cover_url: self.cover_url.clone(),
            isbn: self.isbn.clone(),
            source: None,
            description: None,
        }
    }
}

/// A recommended book with the backend's score and explanation
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(flatten)]
    pub book: BookSummary,
    #[serde(default)]
    pub score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reasons: Vec<String>,
}
