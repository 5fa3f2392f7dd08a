//! Per-deployment client configuration.
//!
//! Each of the four front-ends runs the same pipeline with slightly different rules
//! (which envelope codes mean success, which failures are shown to the user, how the
//! "logged in" state is derived). Those differences are captured here as explicit
//! settings instead of being re-derived at call sites.

use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ClientError, ClientResult};

/// Which front-end this client is acting as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frontend {
    Admin,
    Customer,
    Staff,
    Store,
}

impl Frontend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Frontend::Admin => "admin",
            Frontend::Customer => "customer",
            Frontend::Staff => "staff",
            Frontend::Store => "store",
        }
    }
}

impl fmt::Display for Frontend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for Frontend {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" | "admin-web" => Ok(Frontend::Admin),
            "customer" | "customer-h5" => Ok(Frontend::Customer),
            "staff" | "staff-h5" => Ok(Frontend::Staff),
            "store" | "store-h5" => Ok(Frontend::Store),
            other => Err(ClientError::config(format!("unknown frontend '{}'", other))),
        }
    }
}

/// How `is_logged_in` is derived from the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum LoginPredicate {
    /// Logged in iff a token is present.
    Token,
    /// Logged in iff a token is present or any of the named user-profile fields is non-empty.
    TokenOrIdentity { fields: Vec<String> },
}

/// Envelope code sets used by [`crate::pipeline::classify`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthPolicy {
    #[serde(default = "AuthPolicy::default_success_codes")]
    pub success_codes: Vec<i64>,
    #[serde(default = "AuthPolicy::default_expiry_codes")]
    pub auth_expiry_codes: Vec<i64>,
    #[serde(default = "AuthPolicy::default_forbidden_codes")]
    pub forbidden_codes: Vec<i64>,
    /// When set, forbidden responses are handled as session expiry as well.
    #[serde(default)]
    pub expire_on_forbidden: bool,
}

impl AuthPolicy {
    fn default_success_codes() -> Vec<i64> { vec![0, 200, 201] }
    fn default_expiry_codes() -> Vec<i64> { vec![401] }
    fn default_forbidden_codes() -> Vec<i64> { vec![403] }
}

impl Default for AuthPolicy {
    fn default() -> Self {
        Self {
            success_codes: Self::default_success_codes(),
            auth_expiry_codes: Self::default_expiry_codes(),
            forbidden_codes: Self::default_forbidden_codes(),
            expire_on_forbidden: false,
        }
    }
}

/// Which failure categories are pushed to the user-facing notifier.
/// Categories that are not surfaced are still logged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfacePolicy {
    #[serde(default)]
    pub forbidden: bool,
    #[serde(default)]
    pub application: bool,
    #[serde(default)]
    pub transport: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub frontend: Frontend,
    /// Scheme + host (+ port) of the backend, e.g. `http://127.0.0.1:8080`.
    pub origin: String,
    #[serde(default = "ClientConfig::default_base_path")]
    pub base_path: String,
    #[serde(default = "ClientConfig::default_timeout_ms")]
    pub timeout_ms: u64,
    /// Static `X-Client-Type` header value identifying the issuing front-end.
    #[serde(default)]
    pub client_type: Option<String>,
    #[serde(default)]
    pub policy: AuthPolicy,
    #[serde(default)]
    pub surface: SurfacePolicy,
    pub login_predicate: LoginPredicate,
    /// Role the logged-in user must carry; other roles are rejected locally.
    #[serde(default)]
    pub required_role: Option<String>,
    #[serde(default = "ClientConfig::default_login_path")]
    pub login_path: String,
    #[serde(default = "ClientConfig::default_home_path")]
    pub home_path: String,
    /// Whether logout notifies the server before clearing local state.
    #[serde(default = "ClientConfig::default_server_logout")]
    pub server_logout: bool,
    pub title_suffix: String,
}

impl ClientConfig {
    pub const DEFAULT_ORIGIN: &'static str = "http://127.0.0.1:8080";

    fn default_base_path() -> String { "/api/v1".to_string() }
    fn default_timeout_ms() -> u64 { 10_000 }
    fn default_login_path() -> String { "/login".to_string() }
    fn default_home_path() -> String { "/".to_string() }
    fn default_server_logout() -> bool { true }

    /// Settings matching what each front-end ships with.
    pub fn preset(frontend: Frontend) -> Self {
        let base = Self {
            frontend,
            origin: Self::DEFAULT_ORIGIN.to_string(),
            base_path: Self::default_base_path(),
            timeout_ms: Self::default_timeout_ms(),
            client_type: None,
            policy: AuthPolicy::default(),
            surface: SurfacePolicy::default(),
            login_predicate: LoginPredicate::Token,
            required_role: None,
            login_path: Self::default_login_path(),
            home_path: Self::default_home_path(),
            server_logout: true,
            title_suffix: String::new(),
        };
        match frontend {
            Frontend::Admin => Self {
                client_type: Some("admin-web".to_string()),
                required_role: Some("admin".to_string()),
                title_suffix: "Nail & Lash Admin".to_string(),
                ..base
            },
            Frontend::Customer => Self {
                policy: AuthPolicy { success_codes: vec![200], ..AuthPolicy::default() },
                surface: SurfacePolicy { forbidden: true, application: true, transport: true },
                login_predicate: LoginPredicate::TokenOrIdentity {
                    fields: vec!["openid".to_string(), "phone".to_string()],
                },
                server_logout: false,
                title_suffix: "Nail & Lash Booking".to_string(),
                ..base
            },
            Frontend::Staff => Self {
                title_suffix: "Technician".to_string(),
                ..base
            },
            Frontend::Store => Self {
                surface: SurfacePolicy { forbidden: true, ..SurfacePolicy::default() },
                title_suffix: "Store Manager".to_string(),
                ..base
            },
        }
    }

    /// Preset for the frontend named by `SALON_FRONTEND` (default admin), with
    /// `SALON_API_ORIGIN`, `SALON_API_BASE_PATH` and `SALON_TIMEOUT_MS` applied on top.
    pub fn from_env() -> ClientResult<Self> {
        let frontend = match env::var("SALON_FRONTEND") {
            Ok(v) => v.parse::<Frontend>()?,
            Err(_) => Frontend::Admin,
        };
        let mut cfg = Self::preset(frontend);
        cfg.apply_env()?;
        Ok(cfg)
    }

    pub fn apply_env(&mut self) -> ClientResult<()> {
        if let Ok(origin) = env::var("SALON_API_ORIGIN") {
            self.origin = origin;
        }
        if let Ok(base) = env::var("SALON_API_BASE_PATH") {
            self.base_path = base;
        }
        if let Ok(ms) = env::var("SALON_TIMEOUT_MS") {
            self.timeout_ms = ms
                .parse::<u64>()
                .map_err(|_| ClientError::config(format!("SALON_TIMEOUT_MS is not a number: '{}'", ms)))?;
        }
        Ok(())
    }

    pub fn with_origin<S: Into<String>>(mut self, origin: S) -> Self {
        self.origin = origin.into();
        self
    }

    pub fn timeout(&self) -> Duration { Duration::from_millis(self.timeout_ms) }

    /// Base URL all endpoint paths are appended to, without a trailing slash.
    pub fn base_url(&self) -> String {
        let origin = self.origin.trim_end_matches('/');
        let base = self.base_path.trim_matches('/');
        if base.is_empty() { origin.to_string() } else { format!("{}/{}", origin, base) }
    }
}
