//! Unified client error model.
//! Every endpoint call, session operation and storage access reports failures through
//! [`ClientError`], so callers branch on one sum type regardless of where the failure
//! was detected (locally, in the response envelope, or at the transport).

use serde::Serialize;

/// Where an authentication/authorization failure was detected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureOrigin {
    /// The response body carried a failing `code`.
    Envelope { code: i64 },
    /// The transport returned a non-success HTTP status.
    HttpStatus { status: u16 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientError {
    /// Credentials were accepted by the server but rejected by local policy (e.g. wrong role).
    #[error("rejected: {message}")]
    Rejected { message: String },
    /// The envelope reported a non-success, non-auth code.
    #[error("application error {code}: {message}")]
    Application { code: i64, message: String },
    /// The session is no longer valid; the session has been cleared.
    #[error("authentication expired: {message}")]
    AuthExpired { message: String, origin: FailureOrigin },
    #[error("forbidden: {message}")]
    Forbidden { message: String, origin: FailureOrigin },
    /// Any other received HTTP error status.
    #[error("{category} (HTTP {status}): {message}")]
    Http { status: u16, category: String, message: String },
    #[error("request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
    #[error("network error: {message}")]
    Network { message: String },
    #[error("invalid response: {message}")]
    Decode { message: String },
    #[error("invalid request payload: {message}")]
    Encode { message: String },
    #[error("session storage error: {message}")]
    Storage { message: String },
    #[error("configuration error: {message}")]
    Config { message: String },
}

impl ClientError {
    pub fn code_str(&self) -> &'static str {
        match self {
            ClientError::Rejected { .. } => "rejected",
            ClientError::Application { .. } => "application_error",
            ClientError::AuthExpired { .. } => "auth_expired",
            ClientError::Forbidden { .. } => "forbidden",
            ClientError::Http { .. } => "http_error",
            ClientError::Timeout { .. } => "timeout",
            ClientError::Network { .. } => "network_error",
            ClientError::Decode { .. } => "decode_error",
            ClientError::Encode { .. } => "encode_error",
            ClientError::Storage { .. } => "storage_error",
            ClientError::Config { .. } => "config_error",
        }
    }

    /// Human-readable message, preferring the server's own wording when there is one.
    pub fn message(&self) -> String {
        match self {
            ClientError::Rejected { message }
            | ClientError::Application { message, .. }
            | ClientError::AuthExpired { message, .. }
            | ClientError::Forbidden { message, .. }
            | ClientError::Http { message, .. }
            | ClientError::Network { message }
            | ClientError::Decode { message }
            | ClientError::Encode { message }
            | ClientError::Storage { message }
            | ClientError::Config { message } => message.clone(),
            ClientError::Timeout { .. } => "request timed out".to_string(),
        }
    }

    /// HTTP status when the failure came from a received error response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::AuthExpired { origin: FailureOrigin::HttpStatus { status }, .. }
            | ClientError::Forbidden { origin: FailureOrigin::HttpStatus { status }, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(self, ClientError::AuthExpired { .. })
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Timeout { .. } | ClientError::Network { .. })
    }

    pub fn rejected<S: Into<String>>(msg: S) -> Self { ClientError::Rejected { message: msg.into() } }
    pub fn decode<S: Into<String>>(msg: S) -> Self { ClientError::Decode { message: msg.into() } }
    pub fn encode<S: Into<String>>(msg: S) -> Self { ClientError::Encode { message: msg.into() } }
    pub fn storage<S: Into<String>>(msg: S) -> Self { ClientError::Storage { message: msg.into() } }
    pub fn config<S: Into<String>>(msg: S) -> Self { ClientError::Config { message: msg.into() } }
}

pub type ClientResult<T> = Result<T, ClientError>;

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Decode { message: err.to_string() }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage { message: err.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_reported_for_received_responses_only() {
        let http = ClientError::Http { status: 404, category: "resource not found".into(), message: "no store".into() };
        assert_eq!(http.status(), Some(404));
        let expired = ClientError::AuthExpired { message: "expired".into(), origin: FailureOrigin::HttpStatus { status: 401 } };
        assert_eq!(expired.status(), Some(401));
        let env = ClientError::AuthExpired { message: "expired".into(), origin: FailureOrigin::Envelope { code: 401 } };
        assert_eq!(env.status(), None);
        assert_eq!(ClientError::Timeout { timeout_ms: 10 }.status(), None);
    }

    #[test]
    fn classification_helpers() {
        assert!(ClientError::AuthExpired { message: "x".into(), origin: FailureOrigin::Envelope { code: 401 } }.is_auth_failure());
        assert!(!ClientError::Forbidden { message: "x".into(), origin: FailureOrigin::Envelope { code: 403 } }.is_auth_failure());
        assert!(ClientError::Network { message: "down".into() }.is_transport());
        assert!(ClientError::Timeout { timeout_ms: 1 }.is_transport());
        assert!(!ClientError::rejected("role").is_transport());
    }

    #[test]
    fn message_and_display() {
        let e = ClientError::Application { code: 40001, message: "slot full".into() };
        assert_eq!(e.message(), "slot full");
        assert_eq!(e.code_str(), "application_error");
        assert_eq!(e.to_string(), "application error 40001: slot full");
        assert_eq!(ClientError::Timeout { timeout_ms: 10_000 }.message(), "request timed out");
    }
}
