//! Client for the ReadMore backends

use super::{
    parse_recommend_response, parse_search_response, parse_work_response, search_path, work_path,
    ApiError, HttpClient, RecommendOutcome, RecommendRequest, RECOMMEND_PATH,
};
use crate::config::ApiConfig;
use crate::domain::BookSummary;
use crate::merge::WorkDetail;
use crate::state::UserState;
use std::time::Duration;

/// Talks to `/api/search`, `/api/recommend` and `/api/work/{id}`.
///
/// Nothing here touches the persisted state; callers decide what to do with
/// each response.
pub struct ApiClient {
    http: HttpClient,
    base_url: String,
    search_limit: u32,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = HttpClient::new(
            &config.user_agent,
            Duration::from_secs(config.timeout_secs),
        )?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            search_limit: config.search_limit,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Search the catalogue; a blank query is rejected before any request
    pub async fn search(&self, query: &str) -> Result<Vec<BookSummary>, ApiError> {
        let url = self.url(&search_path(query, self.search_limit)?);
        tracing::debug!("GET {}", url);
        let response = self.http.get(&url).await?;
        parse_search_response(response.status, &response.status_text, &response.body)
    }

    /// Ask for recommendations based on the given state's profile
    pub async fn recommend(&self, state: &UserState) -> Result<RecommendOutcome, ApiError> {
        let url = self.url(RECOMMEND_PATH);
        tracing::debug!("POST {}", url);
        let response = self
            .http
            .post_json(&url, &RecommendRequest::from_state(state))
            .await?;
        parse_recommend_response(response.status, &response.status_text, &response.body)
    }

    /// Fetch the detail record of one work
    pub async fn work_detail(&self, work_id: &str) -> Result<WorkDetail, ApiError> {
        let url = self.url(&work_path(work_id)?);
        tracing::debug!("GET {}", url);
        let response = self.http.get(&url).await?;
        parse_work_response(response.status, &response.status_text, &response.body)
    }
}
