//! Native HTTP transport using reqwest

use super::ApiError;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

/// Status, status text and body of a completed request
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

pub struct HttpClient {
    client: Client,
    user_agent: String,
}

impl HttpClient {
    pub fn new(user_agent: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestFailed {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            user_agent: user_agent.to_string(),
        })
    }

    pub async fn get(&self, url: &str) -> Result<HttpResponse, ApiError> {
        let request = self
            .client
            .get(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent);
        Self::send(request).await
    }

    pub async fn post_json<T: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &T,
    ) -> Result<HttpResponse, ApiError> {
        let request = self
            .client
            .post(url)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .json(body);
        Self::send(request).await
    }

    async fn send(request: reqwest::RequestBuilder) -> Result<HttpResponse, ApiError> {
        let response = request.send().await.map_err(|e| ApiError::RequestFailed {
            message: e.to_string(),
        })?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();

        let body = response.text().await.map_err(|e| ApiError::Decode {
            message: e.to_string(),
        })?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text,
            body,
        })
    }
}
