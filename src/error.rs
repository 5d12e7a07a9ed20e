// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client error types with the backend's detail message preserved.

use serde_json::Value;

/// Error returned by every adapter call and resource handle.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// First 401 on a call: the session was cleared and listeners notified.
    #[error("Session expired")]
    SessionExpired,

    /// 401 on a call that was already retried.
    #[error("Authentication required")]
    Unauthorized,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Backend error (HTTP {status}): {detail}")]
    Server { status: u16, detail: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Session store error: {0}")]
    Session(String),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Map a non-success, non-401 status and its body to an error.
    pub fn from_status(status: u16, body: &str) -> Self {
        let detail = extract_detail(body);
        match status {
            400 => ApiError::BadRequest(detail),
            403 => ApiError::Forbidden(detail),
            404 => ApiError::NotFound(detail),
            409 => ApiError::Conflict(detail),
            422 => ApiError::Validation(detail),
            _ => ApiError::Server { status, detail },
        }
    }

    /// The backend-provided detail message, if this error carries one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Validation(d)
            | ApiError::BadRequest(d)
            | ApiError::Forbidden(d)
            | ApiError::NotFound(d)
            | ApiError::Conflict(d)
            | ApiError::Server { detail: d, .. } => Some(d),
            _ => None,
        }
    }

    /// Message suitable for a view: the detail verbatim, else the display text.
    pub fn message(&self) -> String {
        self.detail()
            .map(str::to_string)
            .unwrap_or_else(|| self.to_string())
    }

    /// Same error for another caller of one shared request. `Internal`
    /// keeps its message chain but not its source.
    pub fn duplicate(&self) -> ApiError {
        match self {
            ApiError::SessionExpired => ApiError::SessionExpired,
            ApiError::Unauthorized => ApiError::Unauthorized,
            ApiError::Validation(d) => ApiError::Validation(d.clone()),
            ApiError::BadRequest(d) => ApiError::BadRequest(d.clone()),
            ApiError::Forbidden(d) => ApiError::Forbidden(d.clone()),
            ApiError::NotFound(d) => ApiError::NotFound(d.clone()),
            ApiError::Conflict(d) => ApiError::Conflict(d.clone()),
            ApiError::Server { status, detail } => ApiError::Server {
                status: *status,
                detail: detail.clone(),
            },
            ApiError::Network(m) => ApiError::Network(m.clone()),
            ApiError::Decode(m) => ApiError::Decode(m.clone()),
            ApiError::Session(m) => ApiError::Session(m.clone()),
            ApiError::Internal(e) => ApiError::Internal(anyhow::anyhow!("{:#}", e)),
        }
    }

    pub fn is_auth_error(&self) -> bool {
        matches!(self, ApiError::SessionExpired | ApiError::Unauthorized)
    }

    pub fn is_validation_error(&self) -> bool {
        matches!(self, ApiError::Validation(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Decode(err.to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Pull the human-readable detail out of an error body.
///
/// `{"detail": "..."}` yields the string; a FastAPI-style list of
/// `{"msg": ...}` objects yields the messages joined with `"; "`. Anything
/// else is returned as the raw body text.
pub fn extract_detail(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return body.trim().to_string();
    };

    match json.get("detail") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => {
            let messages: Vec<String> = items
                .iter()
                .map(|item| match item.get("msg") {
                    Some(Value::String(msg)) => msg.clone(),
                    _ => item.to_string(),
                })
                .collect();
            messages.join("; ")
        }
        Some(other) => other.to_string(),
        None => body.trim().to_string(),
    }
}

/// Result type alias for client calls
pub type Result<T> = std::result::Result<T, ApiError>;
