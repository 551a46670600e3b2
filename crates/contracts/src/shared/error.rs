use serde_json::Value;
use thiserror::Error;

/// Failure of a single backend call.
///
/// Every variant is local to the component that issued the request; the UI
/// shows [`ApiError::user_message`] and keeps its previous state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server responded with status {status}")]
    Status {
        status: u16,
        /// `message` field of the JSON error body, if the server sent one
        message: Option<String>,
    },

    #[error("unexpected response shape from {endpoint}: {detail}")]
    Shape { endpoint: String, detail: String },

    #[error("failed to decode response: {0}")]
    Decode(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Build a status error from a non-2xx response body.
    pub fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<Value>(body)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .filter(|m| !m.trim().is_empty());
        ApiError::Status { status, message }
    }

    /// Short text for the user: the server's message when it sent one,
    /// otherwise the caller's generic fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Status {
                message: Some(m), ..
            } => m.clone(),
            _ => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_picks_message_from_body() {
        let err = ApiError::from_status(400, r#"{"message":"Plate number already exists"}"#);
        assert_eq!(
            err,
            ApiError::Status {
                status: 400,
                message: Some("Plate number already exists".to_string())
            }
        );
        assert_eq!(err.user_message("Failed"), "Plate number already exists");
    }

    #[test]
    fn status_error_without_json_body_uses_fallback() {
        let err = ApiError::from_status(502, "<html>Bad gateway</html>");
        assert_eq!(err.user_message("Failed to add check."), "Failed to add check.");

        let blank = ApiError::from_status(500, r#"{"message":"  "}"#);
        assert_eq!(blank.user_message("Failed"), "Failed");
    }

    #[test]
    fn non_status_errors_use_fallback() {
        let err = ApiError::Transport("connection refused".into());
        assert_eq!(err.user_message("Try again"), "Try again");
        assert_eq!(err.to_string(), "request failed: connection refused");
    }
}
