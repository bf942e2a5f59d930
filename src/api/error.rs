use serde::Deserialize;

/// Failures of a single REST round trip.
///
/// Screens catch these at the call site, log them and raise a toast.
/// `Unauthorized` has already expired the session by the time it is seen.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Transport(String),
    #[error("Authentication required")]
    Unauthorized,
    #[error("Server error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Server { status: u16, message: Option<String> },
    #[error("Invalid response body: {0}")]
    Decode(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Message the server attached to a failed response, if any.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Unauthorized => Some(401),
            _ => None,
        }
    }

    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_builder() {
            ApiError::InvalidUrl(e.to_string())
        } else if e.is_timeout() {
            ApiError::Transport(format!("request timed out: {e}"))
        } else {
            ApiError::Transport(e.to_string())
        }
    }
}

/// `{"message": "..."}` body returned with most backend errors.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}

/// Extract the backend message from an error body. Plain-text bodies are
/// used as-is; empty bodies give `None`.
pub(crate) fn parse_error_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<ErrorBody>(trimmed) {
        Ok(parsed) => parsed.message.filter(|m| !m.is_empty()),
        Err(_) if !trimmed.starts_with('{') && !trimmed.starts_with('<') => {
            Some(trimmed.to_string())
        }
        Err(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_from_json_body() {
        assert_eq!(
            parse_error_message(r#"{"message":"Email đã tồn tại"}"#).as_deref(),
            Some("Email đã tồn tại")
        );
        assert_eq!(parse_error_message(r#"{"error":"x"}"#), None);
        assert_eq!(parse_error_message(""), None);
        assert_eq!(parse_error_message("Bad Request").as_deref(), Some("Bad Request"));
        assert_eq!(parse_error_message("<html></html>"), None);
    }

    #[test]
    fn display_includes_status() {
        let err = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "Server error 500: no message");
        assert_eq!(err.status(), Some(500));
        assert_eq!(ApiError::Unauthorized.status(), Some(401));
    }
}
