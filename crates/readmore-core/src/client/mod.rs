//! Backend contracts: request payloads, response parsing, error extraction
//!
//! Parsing is transport-independent so it can be exercised without a
//! network. The reqwest-based client lives behind the `native` feature.

#[cfg(feature = "native")]
mod api;
#[cfg(feature = "native")]
mod http;

#[cfg(feature = "native")]
pub use api::ApiClient;
#[cfg(feature = "native")]
pub use http::{HttpClient, HttpResponse};

use crate::domain::book::null_as_default;
use crate::domain::{BookSummary, Recommendation, WorkId};
use crate::merge::WorkDetail;
use crate::profile::ProfileWeights;
use crate::state::{UserState, WorkSet};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Results requested per search unless configured otherwise
pub const DEFAULT_SEARCH_LIMIT: u32 = 20;
/// Largest `limit` the search backend accepts
pub const MAX_SEARCH_LIMIT: u32 = 50;

/// Fallback text when a search fails without a usable message
pub const SEARCH_FAILED_MESSAGE: &str = "Search failed.";
/// Fallback text when recommendations fail without a usable message
pub const RECOMMEND_FAILED_MESSAGE: &str = "Could not load recommendations.";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Request failed: {message}")]
    RequestFailed { message: String },
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("Invalid response: {message}")]
    Decode { message: String },
    #[error("Empty search query")]
    EmptyQuery,
    #[error("Invalid work id: {0:?}")]
    InvalidWorkId(String),
}

impl ApiError {
    /// Text shown in the affected panel, with `fallback` for empty messages
    pub fn user_message(&self, fallback: &str) -> String {
        let text = match self {
            ApiError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        };
        if text.trim().is_empty() {
            fallback.to_string()
        } else {
            text
        }
    }
}

/// Body of `POST recommend`
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RecommendRequest {
    pub liked_works: WorkSet,
    pub disliked_works: WorkSet,
    pub saved_works: WorkSet,
    pub profile: ProfileWeights,
}

impl RecommendRequest {
    pub fn from_state(state: &UserState) -> Self {
        Self {
            liked_works: state.liked_works.clone(),
            disliked_works: state.disliked_works.clone(),
            saved_works: state.saved_works.clone(),
            profile: state.profile.clone(),
        }
    }
}

/// What the recommendation backend had to say
#[derive(Clone, Debug, PartialEq)]
pub enum RecommendOutcome {
    Recommendations(Vec<Recommendation>),
    /// No actionable profile; show the backend's message instead
    Message(String),
}

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default, deserialize_with = "null_as_default")]
    results: Vec<BookSummary>,
}

#[derive(Debug, Deserialize)]
struct RecommendBody {
    #[serde(default, deserialize_with = "null_as_default")]
    recommendations: Vec<Recommendation>,
    #[serde(default)]
    message: Option<String>,
}

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Build the error for a non-2xx response: the body's `detail` string if
/// there is one, else the status text.
pub fn error_from_response(status: u16, status_text: &str, body: &str) -> ApiError {
    let detail = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
        .filter(|d| !d.trim().is_empty());
    ApiError::Status {
        status,
        message: detail.unwrap_or_else(|| status_text.to_string()),
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        message: e.to_string(),
    })
}

/// Parse a `GET search` response
pub fn parse_search_response(
    status: u16,
    status_text: &str,
    body: &str,
) -> Result<Vec<BookSummary>, ApiError> {
    if !is_success(status) {
        return Err(error_from_response(status, status_text, body));
    }
    Ok(decode::<SearchBody>(body)?.results)
}

/// Parse a `POST recommend` response
pub fn parse_recommend_response(
    status: u16,
    status_text: &str,
    body: &str,
) -> Result<RecommendOutcome, ApiError> {
    if !is_success(status) {
        return Err(error_from_response(status, status_text, body));
    }
    let body: RecommendBody = decode(body)?;
    match body.message {
        Some(message) => Ok(RecommendOutcome::Message(message)),
        None => Ok(RecommendOutcome::Recommendations(body.recommendations)),
    }
}

/// Parse a `GET work/<id>` response
pub fn parse_work_response(
    status: u16,
    status_text: &str,
    body: &str,
) -> Result<WorkDetail, ApiError> {
    if !is_success(status) {
        return Err(error_from_response(status, status_text, body));
    }
    decode(body)
}

/// Relative path of the search endpoint for `query`
pub fn search_path(query: &str, limit: u32) -> Result<String, ApiError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(ApiError::EmptyQuery);
    }
    let limit = limit.clamp(1, MAX_SEARCH_LIMIT);
    Ok(format!(
        "/api/search?q={}&limit={}",
        urlencoding::encode(query),
        limit
    ))
}

/// Relative path of the work-detail endpoint for `work_id`
pub fn work_path(work_id: &str) -> Result<String, ApiError> {
    let id = WorkId::parse(work_id).ok_or_else(|| ApiError::InvalidWorkId(work_id.to_string()))?;
    Ok(format!("/api/work/{}", urlencoding::encode(id.as_str())))
}

/// Relative path of the recommendation endpoint
pub const RECOMMEND_PATH: &str = "/api/recommend";
