//! Session-expiry events and the dispatcher that turns them into navigation.
//!
//! The pipeline never navigates itself. It clears the session and emits an
//! [`ExpiryEvent`] tagged with the epoch of the token the request carried. The
//! dispatcher performs one redirect per token epoch, so concurrent calls failing on
//! the same stale token yield a single navigation. Requests sent without a token
//! have no epoch and each of their failures redirects.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::error::FailureOrigin;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryEvent {
    /// Epoch of the token the failing request carried; `None` for anonymous requests.
    pub epoch: Option<u64>,
    pub message: String,
    pub origin: FailureOrigin,
}

/// Performs the actual navigation (browser location change, CLI message, ...).
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNavigator;

impl Navigator for TracingNavigator {
    fn navigate(&self, path: &str) {
        info!(target: "salon::expiry", "session expired; navigate to {}", path);
    }
}

#[derive(Clone, Debug)]
pub struct ExpirySender {
    tx: mpsc::UnboundedSender<ExpiryEvent>,
}

impl ExpirySender {
    /// Send is fire-and-forget: with no dispatcher listening the event is dropped.
    pub fn send(&self, event: ExpiryEvent) {
        if self.tx.send(event).is_err() {
            debug!(target: "salon::expiry", "no dispatcher listening; expiry event dropped");
        }
    }
}

pub type ExpiryReceiver = mpsc::UnboundedReceiver<ExpiryEvent>;

pub fn expiry_channel() -> (ExpirySender, ExpiryReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ExpirySender { tx }, rx)
}

pub struct ExpiryDispatcher {
    navigator: Arc<dyn Navigator>,
    login_path: String,
    last_epoch: Option<u64>,
    redirects: u64,
}

impl ExpiryDispatcher {
    pub fn new<S: Into<String>>(navigator: Arc<dyn Navigator>, login_path: S) -> Self {
        Self { navigator, login_path: login_path.into(), last_epoch: None, redirects: 0 }
    }

    /// Handle one event; returns true when a navigation was performed.
    pub fn handle(&mut self, event: &ExpiryEvent) -> bool {
        if let Some(epoch) = event.epoch {
            if self.last_epoch.is_some_and(|last| epoch <= last) {
                debug!(target: "salon::expiry", epoch, "duplicate expiry for handled session; skipping redirect");
                return false;
            }
            self.last_epoch = Some(epoch);
        }
        self.redirects += 1;
        info!(target: "salon::expiry", epoch = ?event.epoch, origin = ?event.origin, "redirecting to login: {}", event.message);
        self.navigator.navigate(&self.login_path);
        true
    }

    pub fn redirects(&self) -> u64 { self.redirects }

    /// Drain events until every sender is dropped.
    pub async fn run(mut self, mut rx: ExpiryReceiver) -> Self {
        while let Some(ev) = rx.recv().await {
            self.handle(&ev);
        }
        self
    }

    pub fn spawn(self, rx: ExpiryReceiver) -> JoinHandle<Self> {
        tokio::spawn(self.run(rx))
    }
}
