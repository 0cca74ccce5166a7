// src/client/error.rs
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("supabaseUrl is required")]
    MissingUrl,

    #[error("supabaseKey is required")]
    MissingKey,

    #[error("Invalid supabaseUrl {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid supabaseKey: {0}")]
    InvalidKey(String),

    #[error("Failed to build HTTP client: {0}")]
    Build(String),

    #[error("{0}")]
    Api(ApiError),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
}

impl ClientError {
    /// True when the request never got an answer from the service.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_) | ClientError::Timeout(_))
    }
}

/// Error payload reported by the remote service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub code: Option<String>,
    pub message: String,
    pub details: Option<String>,
    pub hint: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    code: Option<String>,
    message: Option<String>,
    #[serde(alias = "msg", alias = "error")]
    error_text: Option<String>,
    details: Option<String>,
    hint: Option<String>,
}

impl ApiError {
    /// Build from a non-success response. PostgREST answers with
    /// `{code, message, details, hint}`; anything else is kept verbatim.
    pub fn from_body(status: u16, reason: Option<&str>, body: &str) -> Self {
        if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
            if let Some(message) = parsed.message.or(parsed.error_text) {
                return Self {
                    status,
                    code: parsed.code,
                    message,
                    details: parsed.details,
                    hint: parsed.hint,
                };
            }
        }

        let body = body.trim();
        let message = if body.is_empty() {
            reason.unwrap_or("request failed").to_string()
        } else {
            body.to_string()
        };

        Self {
            status,
            code: None,
            message,
            details: None,
            hint: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(code) = &self.code {
            write!(f, " (code {}, HTTP {})", code, self.status)?;
        } else {
            write!(f, " (HTTP {})", self.status)?;
        }
        if let Some(details) = &self.details {
            write!(f, "; details: {}", details)?;
        }
        if let Some(hint) = &self.hint {
            write!(f, "; hint: {}", hint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_postgrest_payload() {
        let body = r#"{"code":"42501","details":null,"hint":null,"message":"permission denied for table profiles"}"#;
        let err = ApiError::from_body(401, Some("Unauthorized"), body);
        assert_eq!(err.code.as_deref(), Some("42501"));
        assert_eq!(err.message, "permission denied for table profiles");
        assert_eq!(
            err.to_string(),
            "permission denied for table profiles (code 42501, HTTP 401)"
        );
    }

    #[test]
    fn parses_gateway_payload() {
        let body = r#"{"message":"Invalid API key","hint":"Double check your Supabase `anon` or `service_role` API key."}"#;
        let err = ApiError::from_body(401, Some("Unauthorized"), body);
        assert_eq!(err.message, "Invalid API key");
        assert!(err.to_string().contains("hint: Double check"));
    }

    #[test]
    fn falls_back_to_raw_body_or_reason() {
        let err = ApiError::from_body(502, Some("Bad Gateway"), "upstream down\n");
        assert_eq!(err.message, "upstream down");

        let err = ApiError::from_body(503, Some("Service Unavailable"), "");
        assert_eq!(err.message, "Service Unavailable");
        assert_eq!(err.to_string(), "Service Unavailable (HTTP 503)");
    }

    #[test]
    fn classifies_variants() {
        assert!(!ClientError::MissingKey.is_transport());
        assert!(ClientError::Timeout(Duration::from_secs(1)).is_transport());
        assert!(ClientError::Transport("refused".into()).is_transport());
    }
}
