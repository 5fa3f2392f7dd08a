use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::profile::{MemberProfile, UserProfile};
use crate::config::{ClientConfig, LoginPredicate};
use crate::error::{ClientError, ClientResult};
use crate::storage::{keys, KeyValueStore};

/// In-memory view of the current actor.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: UserProfile,
    pub member: Option<MemberProfile>,
    /// Generation counter, bumped whenever the token changes (installed or removed).
    pub epoch: u64,
}

impl Session {
    /// Reset to the anonymous state, bumping the epoch if a token was held.
    fn wipe(&mut self) {
        if self.token.take().is_some() {
            self.epoch += 1;
        }
        self.user = UserProfile::default();
        self.member = None;
    }
}

/// What an auth failure did to the session it was raised against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExpiryClear {
    /// The session still held the failing token (or was anonymous) and was cleared.
    Cleared,
    /// Another failure from the same token already cleared it; nothing was touched.
    AlreadyCleared,
    /// A newer login replaced the failing token; the session was left alone.
    Stale,
}

/// Single owner of session state for one client.
///
/// Shared via `Arc` between the pipeline (which reads the token and clears on
/// expiry), the router guard and the login/logout flows. Every mutation is written
/// through to the backing [`KeyValueStore`].
pub struct SessionStore {
    state: RwLock<Session>,
    storage: Arc<dyn KeyValueStore>,
    predicate: LoginPredicate,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, predicate: LoginPredicate) -> Self {
        Self { state: RwLock::new(Session::default()), storage, predicate }
    }

    pub fn for_config(storage: Arc<dyn KeyValueStore>, config: &ClientConfig) -> Self {
        Self::new(storage, config.login_predicate.clone())
    }

    /// Load token, user and member from storage. Malformed records are dropped.
    pub fn init(&self) {
        let token = self.storage.get(keys::TOKEN).filter(|t| !t.is_empty());
        let user: UserProfile = self.load_json(keys::USER_INFO).unwrap_or_default();
        let member: Option<MemberProfile> = self.load_json(keys::MEMBER_INFO);
        let mut st = self.state.write();
        if token.is_some() {
            st.epoch += 1;
        }
        st.token = token;
        st.user = user;
        st.member = member;
        debug!(target: "salon::session", logged_in = st.token.is_some(), epoch = st.epoch, "session loaded");
    }

    fn load_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.storage.get(key)?;
        match serde_json::from_str::<T>(&raw) {
            Ok(v) => Some(v),
            Err(e) => {
                warn!(target: "salon::session", key, "discarding malformed stored record: {}", e);
                if let Err(e) = self.storage.remove(key) {
                    warn!(target: "salon::session", key, "failed to remove malformed record: {}", e);
                }
                None
            }
        }
    }

    fn store_json<T: Serialize>(&self, key: &str, value: &T) -> ClientResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| ClientError::storage(e.to_string()))?;
        self.storage.set(key, &raw)
    }

    pub fn snapshot(&self) -> Session { self.state.read().clone() }

    pub fn token(&self) -> Option<String> { self.state.read().token.clone() }

    pub fn user(&self) -> UserProfile { self.state.read().user.clone() }

    pub fn member(&self) -> Option<MemberProfile> { self.state.read().member.clone() }

    pub fn epoch(&self) -> u64 { self.state.read().epoch }

    pub fn is_logged_in(&self) -> bool {
        let st = self.state.read();
        if st.token.is_some() {
            return true;
        }
        match &self.predicate {
            LoginPredicate::Token => false,
            LoginPredicate::TokenOrIdentity { fields } => fields.iter().any(|f| st.user.has(f)),
        }
    }

    pub fn is_member(&self) -> bool {
        self.state.read().member.as_ref().map(|m| m.is_member()).unwrap_or(false)
    }

    pub fn user_phone(&self) -> String {
        self.state.read().user.phone().unwrap_or_default().to_string()
    }

    /// Install or drop the token. An empty token removes it.
    pub fn set_token(&self, token: Option<&str>) -> ClientResult<()> {
        let token = token.filter(|t| !t.is_empty());
        {
            let mut st = self.state.write();
            if st.token.as_deref() != token {
                st.epoch += 1;
            }
            st.token = token.map(str::to_string);
        }
        match token {
            Some(t) => self.storage.set(keys::TOKEN, t),
            None => self.storage.remove(keys::TOKEN),
        }
    }

    /// Replace the cached user. An empty profile removes the stored copy.
    pub fn set_user_info(&self, user: UserProfile) -> ClientResult<()> {
        let empty = user.is_empty();
        let persisted = if empty { None } else { Some(user.clone()) };
        self.state.write().user = user;
        match persisted {
            Some(u) => self.store_json(keys::USER_INFO, &u),
            None => self.storage.remove(keys::USER_INFO),
        }
    }

    pub fn set_member_info(&self, member: Option<MemberProfile>) -> ClientResult<()> {
        let member = member.filter(|m| !m.is_empty());
        self.state.write().member = member.clone();
        match member {
            Some(m) => self.store_json(keys::MEMBER_INFO, &m),
            None => self.storage.remove(keys::MEMBER_INFO),
        }
    }

    /// Install a fresh login in one step.
    pub(crate) fn establish(&self, token: &str, user: UserProfile) -> ClientResult<()> {
        self.set_token(Some(token))?;
        self.set_user_info(user)
    }

    /// Drop everything in memory and in storage. Memory is always cleared; the
    /// first storage error (if any) is returned after every key was attempted.
    pub fn clear(&self) -> ClientResult<()> {
        self.state.write().wipe();
        self.clear_storage()
    }

    fn clear_storage(&self) -> ClientResult<()> {
        let mut first_err = None;
        for key in [keys::TOKEN, keys::USER_INFO, keys::MEMBER_INFO] {
            if let Err(e) = self.storage.remove(key) {
                warn!(target: "salon::session", key, "failed to remove stored session key: {}", e);
                first_err.get_or_insert(e);
            }
        }
        info!(target: "salon::session", "session cleared");
        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Token and epoch read together, as a request is issued.
    pub(crate) fn credentials(&self) -> (Option<String>, u64) {
        let st = self.state.read();
        (st.token.clone(), st.epoch)
    }

    /// Clear on an auth failure raised by a request issued at `issued_epoch`.
    ///
    /// The check and the in-memory wipe happen under one write lock, so of several
    /// requests failing on the same token exactly one observes `Cleared`.
    pub(crate) fn clear_for_expiry(&self, issued_epoch: u64) -> ExpiryClear {
        let outcome = {
            let mut st = self.state.write();
            if st.epoch == issued_epoch {
                st.wipe();
                ExpiryClear::Cleared
            } else if st.token.is_some() {
                ExpiryClear::Stale
            } else {
                ExpiryClear::AlreadyCleared
            }
        };
        if outcome == ExpiryClear::Cleared {
            if let Err(e) = self.clear_storage() {
                warn!(target: "salon::session", "session storage not fully cleared: {}", e);
            }
        }
        outcome
    }
}
