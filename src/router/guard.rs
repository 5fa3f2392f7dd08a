//! Navigation guard: the two-state auth gate run before every hop.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardMode {
    /// Anonymous users are sent to the login page; signed-in users are kept off it.
    Enforce,
    /// Only the document title is maintained; every navigation proceeds.
    TitleOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    Authenticated,
    Anonymous,
}

impl AuthState {
    pub fn from_logged_in(logged_in: bool) -> Self {
        if logged_in { AuthState::Authenticated } else { AuthState::Anonymous }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Proceed,
    Redirect(String),
}

pub fn evaluate(mode: GuardMode, state: AuthState, target: &str, login_path: &str, home_path: &str) -> GuardDecision {
    if mode == GuardMode::TitleOnly {
        return GuardDecision::Proceed;
    }
    match (target == login_path, state) {
        (true, AuthState::Authenticated) => GuardDecision::Redirect(home_path.to_string()),
        (false, AuthState::Anonymous) => GuardDecision::Redirect(login_path.to_string()),
        _ => GuardDecision::Proceed,
    }
}
