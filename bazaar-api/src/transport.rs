//! The HTTP layer behind the API client.
//!
//! [`GraphQlTransport`] abstracts over the actual request execution so the
//! client can be driven by the live bearer-token transport in production
//! and by a recording mock in tests.

use crate::error::ApiError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    errors: Option<Vec<GraphQlResponseError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponseError {
    message: String,
}

/// A trait abstracting over GraphQL request execution.
#[async_trait]
pub trait GraphQlTransport: Send + Sync {
    /// Executes one GraphQL document and returns the `data` payload.
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, ApiError>;
}

/// The live transport: one HTTP POST per request, bearer-token auth.
pub struct HttpTransport {
    http: reqwest::Client,
    url: Url,
    bearer_token: String,
}

impl HttpTransport {
    pub fn new(url: &str, bearer_token: impl Into<String>) -> Result<Self, ApiError> {
        Ok(Self {
            http: reqwest::Client::new(),
            url: Url::parse(url)?,
            bearer_token: bearer_token.into(),
        })
    }
}

#[async_trait]
impl GraphQlTransport for HttpTransport {
    async fn execute(&self, query: &str, variables: Value) -> Result<Value, ApiError> {
        let response: GraphQlResponse = self
            .http
            .post(self.url.clone())
            .bearer_auth(&self.bearer_token)
            .json(&GraphQlRequest { query, variables })
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(errors) = response.errors {
            if !errors.is_empty() {
                return Err(ApiError::GraphQl(
                    errors.into_iter().map(|e| e.message).collect(),
                ));
            }
        }

        response
            .data
            .ok_or_else(|| ApiError::MissingField("data".to_string()))
    }
}
