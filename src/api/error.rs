use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

/// Failure of a single store call. Nothing is retried; the caller decides
/// whether to try again.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("not found: {message}")]
    NotFound { message: String },
    #[error("rejected by server: {message}")]
    Validation { status: u16, message: String },
    #[error("{}", remote_display(.status, .message))]
    Remote { status: Option<u16>, message: String },
}

fn remote_display(status: &Option<u16>, message: &str) -> String {
    match status {
        Some(code) => format!("HTTP {code}: {message}"),
        None => message.to_string(),
    }
}

impl ApiError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Validation { status, .. } => Some(*status),
            ApiError::Remote { status, .. } => *status,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound { message }
            | ApiError::Validation { message, .. }
            | ApiError::Remote { message, .. } => message,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// Maps a non-2xx response to an error, preferring the message the
    /// backend put in the body.
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let message = body_message(body).unwrap_or_else(|| {
            status
                .canonical_reason()
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
        });
        match status {
            StatusCode::NOT_FOUND => ApiError::NotFound { message },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ApiError::Validation {
                    status: status.as_u16(),
                    message,
                }
            }
            _ => ApiError::Remote {
                status: Some(status.as_u16()),
                message,
            },
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Remote {
            status: err.status().map(|s| s.as_u16()),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Remote {
            status: None,
            message: format!("malformed response body: {err}"),
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn body_message(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    parsed
        .error
        .or(parsed.message)
        .filter(|m| !m.trim().is_empty())
}
