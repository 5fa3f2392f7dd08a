//! Client core for the nail & lash salon booking front-ends.
//!
//! One [`pipeline::ApiClient`] carries every REST call; an injected
//! [`identity::SessionStore`] supplies the bearer token and is cleared when the
//! backend reports an expired session; [`router::Router`] gates navigation on the
//! session state. The [`api`] modules bind each backend endpoint for the admin,
//! customer, staff and store apps.

pub mod api;
pub mod config;
pub mod error;
pub mod identity;
pub mod pipeline;
pub mod router;
pub mod storage;

pub use config::{ClientConfig, Frontend};
pub use error::{ClientError, ClientResult};
