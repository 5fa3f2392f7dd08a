//! REST endpoint bindings, one async function per backend endpoint.
//!
//! Each function builds a single [`Endpoint`](crate::pipeline::Endpoint), hands it to
//! the shared [`ApiClient`](crate::pipeline::ApiClient) and returns the pipeline's
//! result unchanged. Nothing here catches or reinterprets errors.

pub mod admin;
pub mod auth;
pub mod customer;
pub mod staff;
pub mod store;
