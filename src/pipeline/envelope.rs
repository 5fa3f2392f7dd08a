use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::config::AuthPolicy;
use crate::error::{ClientError, ClientResult};

/// The `{code, message, data}` wrapper every JSON response uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub code: i64,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub data: Value,
}

impl Envelope {
    pub fn new<S: Into<String>>(code: i64, message: S, data: Value) -> Self {
        Self { code, message: message.into(), data }
    }

    /// Deserialize `data` into a typed payload.
    pub fn data_as<T: DeserializeOwned>(&self) -> ClientResult<T> {
        serde_json::from_value(self.data.clone())
            .map_err(|e| ClientError::decode(format!("unexpected data for code {}: {}", self.code, e)))
    }

    pub fn message_or<'a>(&'a self, fallback: &'a str) -> &'a str {
        if self.message.trim().is_empty() { fallback } else { &self.message }
    }
}

/// Closed classification of a response code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    AuthExpired,
    Forbidden,
    ApplicationError,
}

/// Map an envelope code (or HTTP status) to an [`Outcome`] under the given policy.
pub fn classify(code: i64, policy: &AuthPolicy) -> Outcome {
    if policy.success_codes.contains(&code) {
        Outcome::Success
    } else if policy.auth_expiry_codes.contains(&code) {
        Outcome::AuthExpired
    } else if policy.forbidden_codes.contains(&code) {
        if policy.expire_on_forbidden { Outcome::AuthExpired } else { Outcome::Forbidden }
    } else {
        Outcome::ApplicationError
    }
}

/// Log label for a received HTTP error status.
pub fn status_category(status: u16) -> &'static str {
    match status {
        400 => "bad request",
        401 => "authentication failed",
        403 => "permission denied",
        404 => "resource not found",
        500 => "internal server error",
        _ => "request failed",
    }
}

/// Server-provided message in an error body: `message`, then `data.message`.
pub fn error_message(body: &Value) -> Option<String> {
    let direct = body.get("message").and_then(|m| m.as_str());
    let nested = body.get("data").and_then(|d| d.get("message")).and_then(|m| m.as_str());
    direct
        .filter(|s| !s.trim().is_empty())
        .or(nested.filter(|s| !s.trim().is_empty()))
        .map(str::to_string)
}
