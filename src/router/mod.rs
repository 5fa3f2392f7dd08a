//! Client-side routing: route tables per front-end, path resolution and the
//! navigation guard that keeps anonymous users on the login page.

mod guard;
mod table;
mod tables;

use std::sync::Arc;

use parking_lot::RwLock;
use tracing::{debug, info, warn};

pub use guard::{evaluate, AuthState, GuardDecision, GuardMode};
pub use table::{RouteEntry, RouteMatch, RouteMeta, RouteTable};

use crate::config::{ClientConfig, Frontend};
use crate::error::{ClientError, ClientResult};
use crate::identity::SessionStore;
use crate::pipeline::Navigator;

/// Upper bound on redirects followed for one navigation.
const MAX_HOPS: usize = 10;

/// Outcome of one navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub requested: String,
    pub resolved: String,
    pub route: RouteMatch,
    /// Every redirect taken on the way, in order.
    pub hops: Vec<String>,
    pub title: Option<String>,
}

pub struct Router {
    table: RouteTable,
    session: Arc<SessionStore>,
    mode: GuardMode,
    login_path: String,
    home_path: String,
    title_suffix: String,
    title: RwLock<Option<String>>,
    current: RwLock<Option<String>>,
}

impl Router {
    pub fn new(table: RouteTable, session: Arc<SessionStore>, config: &ClientConfig) -> Self {
        let mode = match config.frontend {
            Frontend::Customer => GuardMode::TitleOnly,
            _ => GuardMode::Enforce,
        };
        Self {
            table,
            session,
            mode,
            login_path: config.login_path.clone(),
            home_path: config.home_path.clone(),
            title_suffix: config.title_suffix.clone(),
            title: RwLock::new(None),
            current: RwLock::new(None),
        }
    }

    /// Router with the stock route table for `config.frontend`.
    pub fn for_config(config: &ClientConfig, session: Arc<SessionStore>) -> Self {
        Self::new(RouteTable::for_frontend(config.frontend), session, config)
    }

    pub fn with_mode(mut self, mode: GuardMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn mode(&self) -> GuardMode { self.mode }

    pub fn table(&self) -> &RouteTable { &self.table }

    /// Document title after the last navigation.
    pub fn title(&self) -> Option<String> { self.title.read().clone() }

    /// Path the last navigation landed on.
    pub fn current(&self) -> Option<String> { self.current.read().clone() }

    /// Resolve `path`, following record redirects and guard redirects until a route
    /// is allowed to render.
    pub fn navigate(&self, path: &str) -> ClientResult<Navigation> {
        let requested = table::normalize(path);
        let mut target = requested.clone();
        let mut hops = Vec::new();

        for _ in 0..MAX_HOPS {
            let route = self
                .table
                .resolve(&target)
                .ok_or_else(|| ClientError::config(format!("no route matches '{}'", target)))?;

            if let Some(to) = &route.redirect {
                debug!(target: "salon::router", from = %route.path, to = %to, "route redirect");
                hops.push(to.clone());
                target = table::normalize(to);
                continue;
            }

            if let Some(title) = &route.meta.title {
                *self.title.write() = Some(self.format_title(title));
            }

            let state = AuthState::from_logged_in(self.session.is_logged_in());
            match evaluate(self.mode, state, &route.path, &self.login_path, &self.home_path) {
                GuardDecision::Proceed => {
                    *self.current.write() = Some(route.path.clone());
                    return Ok(Navigation {
                        requested,
                        resolved: route.path.clone(),
                        route,
                        hops,
                        title: self.title(),
                    });
                }
                GuardDecision::Redirect(to) => {
                    info!(target: "salon::router", from = %route.path, to = %to, state = ?state, "guard redirect");
                    hops.push(to.clone());
                    target = table::normalize(&to);
                }
            }
        }
        Err(ClientError::config(format!("too many redirects navigating to '{}'", requested)))
    }

    fn format_title(&self, title: &str) -> String {
        if self.title_suffix.is_empty() {
            title.to_string()
        } else {
            format!("{} - {}", title, self.title_suffix)
        }
    }
}

/// Lets the expiry dispatcher drive the router directly.
impl Navigator for Router {
    fn navigate(&self, path: &str) {
        if let Err(e) = Router::navigate(self, path) {
            warn!(target: "salon::router", path, "navigation failed: {}", e);
        }
    }
}
