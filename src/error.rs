use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Message shown whenever a movie fetch fails without a more specific reason
pub const FETCH_FALLBACK_MESSAGE: &str = "Failed to fetch movies. Please try again later.";

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Transport-level failure (connection, timeout, body decoding)
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The remote answered with a non-success status
    #[error("Network error: {0}")]
    Network(String),

    /// The payload itself flagged the request as failed
    #[error("API error: {0}")]
    Api(String),

    #[error("Analytics error: {0}")]
    Analytics(String),

    #[error("Store error: {0}")]
    Store(#[from] redis::RedisError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Message a user should see for a failed movie fetch.
    ///
    /// Payload-signalled failures carry their own message; every network-class
    /// failure collapses to the generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Api(msg) if !msg.trim().is_empty() => msg.clone(),
            _ => FETCH_FALLBACK_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::Network(_) | AppError::HttpClient(_) | AppError::Api(_) => {
                (StatusCode::BAD_GATEWAY, self.user_message())
            }
            AppError::Analytics(_) | AppError::Store(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
