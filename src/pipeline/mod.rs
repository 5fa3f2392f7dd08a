//!
//! salon request pipeline
//! -----------------------
//! Every outgoing call passes through one configured [`ApiClient`]:
//! - outgoing: bearer token and client-identity headers are attached;
//! - incoming: the `{code, message, data}` envelope is classified into an
//!   [`Outcome`], auth failures clear the session and emit an [`ExpiryEvent`],
//!   blob downloads are returned untouched;
//! - transport failures are split into timeout, unreachable network and received
//!   error statuses, and always returned to the caller.

mod client;
mod endpoint;
mod envelope;
mod expiry;
mod notify;

pub use client::{ApiClient, ApiClientBuilder, Reply, CLIENT_TYPE_HEADER};
pub use endpoint::{segment, Body, Endpoint, FormPart, ResponseKind};
pub use envelope::{classify, error_message, status_category, Envelope, Outcome};
pub use expiry::{expiry_channel, ExpiryDispatcher, ExpiryEvent, ExpiryReceiver, ExpirySender, Navigator, TracingNavigator};
pub use notify::{NoticeLevel, Notifier, TracingNotifier};
