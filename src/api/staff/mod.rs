//! Technician app endpoints.

pub mod bookings;
pub mod members;
pub mod staff;

pub use super::auth::{login, logout, refresh_token};
