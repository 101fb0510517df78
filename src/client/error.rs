//! Error types for Terraform API calls.

use std::fmt;

/// Errors that can occur while talking to the Terraform API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TfeError {
    /// The API answered 404 for the requested resource.
    NotFound(String),

    /// The API answered with a non-success status.
    Api { status: u16, message: String },

    /// The request never produced a response (connect, TLS, timeout).
    Transport(String),

    /// The response body could not be decoded.
    Decode(String),

    /// The client could not be built from its configuration.
    Config(String),
}

impl fmt::Display for TfeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(what) => write!(f, "resource not found: {}", what),
            Self::Api { status, message } => write!(f, "API error (status {}): {}", status, message),
            Self::Transport(msg) => write!(f, "transport error: {}", msg),
            Self::Decode(msg) => write!(f, "decode error: {}", msg),
            Self::Config(msg) => write!(f, "invalid client configuration: {}", msg),
        }
    }
}

impl std::error::Error for TfeError {}

impl From<reqwest::Error> for TfeError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for TfeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl TfeError {
    /// Build an error from a non-success status and its response body.
    ///
    /// Pulls the first JSON:API error detail out of the body when there is one.
    pub fn from_response(status: u16, what: &str, body: &str) -> Self {
        if status == 404 {
            return Self::NotFound(what.to_string());
        }

        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|doc| {
                let first = doc.get("errors")?.get(0)?.clone();
                first
                    .get("detail")
                    .or_else(|| first.get("title"))
                    .and_then(|v| v.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| body.trim().to_string());

        Self::Api { status, message }
    }

    /// Return `true` if the error is a 404.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// No API client could be obtained for the current request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientUnavailable(pub String);

impl fmt::Display for ClientUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Terraform client unavailable: {}", self.0)
    }
}

impl std::error::Error for ClientUnavailable {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_not_found() {
        let err = TfeError::from_response(404, "plan plan-123", "");
        assert_eq!(err, TfeError::NotFound("plan plan-123".to_string()));
        assert!(err.is_not_found());
    }

    #[test]
    fn test_from_response_jsonapi_errors() {
        let body = r#"{"errors":[{"status":"422","title":"invalid attribute","detail":"Name has already been taken"}]}"#;
        let err = TfeError::from_response(422, "workspace", body);
        assert_eq!(
            err,
            TfeError::Api {
                status: 422,
                message: "Name has already been taken".to_string(),
            }
        );
    }

    #[test]
    fn test_from_response_plain_body() {
        let err = TfeError::from_response(500, "runs", "  upstream exploded \n");
        assert_eq!(err.to_string(), "API error (status 500): upstream exploded");
    }
}
