//! Failure classes of backend requests

use serde_json::Value;

/// Why a backend request did not produce a usable response
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status
    #[error("Request failed with status code {status}")]
    Status {
        status: u16,
        /// Response body, when it was valid JSON
        body: Option<Value>,
    },

    /// The request never got an answer (connection refused, reset, timeout)
    #[error("Network error: {0}")]
    NoResponse(String),

    /// The request could not be built or the response could not be read
    #[error("{0}")]
    Local(String),
}

impl ApiError {
    pub fn status(status: u16, body: Option<Value>) -> Self {
        Self::Status { status, body }
    }

    pub fn no_response(message: impl Into<String>) -> Self {
        Self::NoResponse(message.into())
    }

    pub fn local(message: impl Into<String>) -> Self {
        Self::Local(message.into())
    }

    /// Map a transport error from the HTTP client onto a failure class
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_builder() || err.is_decode() {
            Self::Local(err.to_string())
        } else {
            Self::NoResponse(err.to_string())
        }
    }

    /// HTTP status, when the server responded
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Authentication rejected: the terminal is blocked
    pub fn is_forbidden(&self) -> bool {
        self.status_code() == Some(403)
    }

    /// Token missing or revoked
    pub fn is_unauthorized(&self) -> bool {
        self.status_code() == Some(401)
    }

    /// Message shown when startup fails, e.g.
    /// `Request failed with status code 500 (Status: 500)`
    pub fn startup_message(&self) -> String {
        match self.status_code() {
            Some(status) => format!("{self} (Status: {status})"),
            None => self.to_string(),
        }
    }

    /// Human readable cause of a failed game launch
    pub fn launch_detail(&self) -> String {
        match self {
            Self::Status {
                body: Some(body @ (Value::Object(_) | Value::Array(_))),
                ..
            } => body_field(body, "error")
                .or_else(|| body_field(body, "message"))
                .unwrap_or_else(|| body.to_string()),
            Self::Status { status, .. } => {
                format!("HTTP error {status}: check the server logs.")
            }
            Self::NoResponse(_) => "No response from server. Is the backend running?".to_string(),
            Self::Local(message) => message.clone(),
        }
    }
}

/// A field rendered as text when it holds a meaningful value
fn body_field(body: &Value, key: &str) -> Option<String> {
    match body.get(key)? {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_forbidden_and_unauthorized() {
        assert!(ApiError::status(403, None).is_forbidden());
        assert!(!ApiError::status(403, None).is_unauthorized());
        assert!(ApiError::status(401, None).is_unauthorized());
        assert!(!ApiError::no_response("refused").is_forbidden());
    }

    #[test]
    fn test_startup_message_appends_status() {
        let err = ApiError::status(500, None);
        assert_eq!(
            err.startup_message(),
            "Request failed with status code 500 (Status: 500)"
        );
        let err = ApiError::no_response("connection refused");
        assert_eq!(err.startup_message(), "Network error: connection refused");
    }

    #[test]
    fn test_launch_detail_prefers_error_field() {
        let err = ApiError::status(400, Some(json!({"error": "Game disabled", "message": "x"})));
        assert_eq!(err.launch_detail(), "Game disabled");
    }

    #[test]
    fn test_launch_detail_falls_back_to_message_field() {
        let err = ApiError::status(422, Some(json!({"error": "", "message": "Out of service"})));
        assert_eq!(err.launch_detail(), "Out of service");
    }

    #[test]
    fn test_launch_detail_falls_back_to_json_text() {
        let err = ApiError::status(400, Some(json!({"code": 7})));
        assert_eq!(err.launch_detail(), r#"{"code":7}"#);
    }

    #[test]
    fn test_launch_detail_non_object_body() {
        let err = ApiError::status(502, None);
        assert_eq!(err.launch_detail(), "HTTP error 502: check the server logs.");

        let err = ApiError::status(500, Some(json!("Internal Server Error")));
        assert_eq!(err.launch_detail(), "HTTP error 500: check the server logs.");
    }

    #[test]
    fn test_launch_detail_no_response_and_local() {
        assert_eq!(
            ApiError::no_response("timed out").launch_detail(),
            "No response from server. Is the backend running?"
        );
        assert_eq!(ApiError::local("bad url").launch_detail(), "bad url");
    }
}
