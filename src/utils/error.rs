//! Error handling module
//!
//! Defines the error taxonomy shared by every pipeline stage and its
//! mapping to HTTP responses

use axum::{
    http::{header::HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::results::ErrorBody;

/// Header carrying the seconds remaining until the quota window rolls over
pub static RATE_LIMIT_RESET_HEADER: HeaderName = HeaderName::from_static("x-ratelimit-reset");

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Request payload failed a declared constraint; names the field
    #[error("{field}: {message}")]
    Validation {
        /// Offending request field
        field: &'static str,
        /// Violated constraint
        message: String,
    },

    /// The caller exhausted its quota window for this tool
    #[error("Request limit reached, try again in about {} minute(s)", minutes_ceil(.retry_after_secs))]
    RateLimit {
        /// Seconds until the window rolls over
        retry_after_secs: u64,
    },

    /// The generative-AI provider failed or refused the call
    #[error("Generation service error: {message}")]
    Upstream {
        /// Expected to succeed on a later retry (timeout, 5xx, connect)
        transient: bool,
        /// The provider's own rate limit, distinct from this service's quota
        provider_rate_limit: bool,
        message: String,
    },

    /// The model returned output that does not fit the tool's schema
    #[error("Could not interpret model output: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    /// HTTP client construction/transport error outside the retry policy
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal server error
    #[error("Internal server error: {0}")]
    Internal(String),
}

fn minutes_ceil(secs: &u64) -> u64 {
    (secs.div_ceil(60)).max(1)
}

impl AppError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::RateLimit { .. } => StatusCode::TOO_MANY_REQUESTS,
            // The provider's own limit maps to 429 so callers know to back
            // off, but keeps the UPSTREAM_ERROR discriminant.
            AppError::Upstream {
                provider_rate_limit: true,
                ..
            } => StatusCode::TOO_MANY_REQUESTS,
            AppError::Upstream { .. } => StatusCode::BAD_GATEWAY,
            AppError::Parse(_) => StatusCode::BAD_GATEWAY,
            AppError::Config(_)
            | AppError::HttpClient(_)
            | AppError::Serialization(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code for the response body
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::RateLimit { .. } => "RATE_LIMIT_EXCEEDED",
            AppError::Upstream { .. } => "UPSTREAM_ERROR",
            AppError::Parse(_) => "PARSE_ERROR",
            AppError::Config(_)
            | AppError::HttpClient(_)
            | AppError::Serialization(_)
            | AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Seconds the caller should wait; set only for this service's quota
    pub fn retry_after_secs(&self) -> Option<u64> {
        match self {
            AppError::RateLimit { retry_after_secs } => Some(*retry_after_secs),
            _ => None,
        }
    }

    /// Whether the failure is worth an error-level log line
    pub fn is_server_fault(&self) -> bool {
        !matches!(
            self,
            AppError::Validation { .. } | AppError::RateLimit { .. }
        )
    }

    /// Build the response body for this error
    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            error: self.error_code().to_string(),
            message: self.to_string(),
            retry_after: self.retry_after_secs(),
        }
    }
}

/// Implement IntoResponse so handlers can return `AppResult<T>` directly
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_server_fault() {
            tracing::error!("Request failed: {} - status {}", self, status);
        } else {
            tracing::warn!("Client error: {} - status {}", self.error_code(), status);
        }

        let retry_after = self.retry_after_secs();
        let mut response = (status, Json(self.to_body())).into_response();

        if let Some(secs) = retry_after {
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response
                    .headers_mut()
                    .insert(RATE_LIMIT_RESET_HEADER.clone(), value);
            }
        }

        response
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error construction helpers
#[allow(dead_code)]
pub mod helpers {
    use super::*;

    /// Create a field-level validation error
    pub fn validation_error(field: &'static str, message: impl Into<String>) -> AppError {
        AppError::Validation {
            field,
            message: message.into(),
        }
    }

    /// Create a transient upstream error (timeout, connect failure, 5xx)
    pub fn transient_upstream(message: impl Into<String>) -> AppError {
        AppError::Upstream {
            transient: true,
            provider_rate_limit: false,
            message: message.into(),
        }
    }

    /// Create a permanent upstream error
    pub fn permanent_upstream(message: impl Into<String>) -> AppError {
        AppError::Upstream {
            transient: false,
            provider_rate_limit: false,
            message: message.into(),
        }
    }

    /// Create a provider-rate-limit error
    pub fn provider_rate_limit(message: impl Into<String>) -> AppError {
        AppError::Upstream {
            transient: false,
            provider_rate_limit: true,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse_error(message: impl Into<String>) -> AppError {
        AppError::Parse(message.into())
    }
}
