use thiserror::Error;

/// Defines the error types for marketplace API calls.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid api url: {0}")]
    Url(#[from] url::ParseError),

    #[error("graphql error: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    #[error("response is missing field `{0}`")]
    MissingField(String),

    #[error("failed to decode response: {0}")]
    Json(#[from] serde_json::Error),
}
