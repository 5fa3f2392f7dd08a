//! Customer booking app endpoints.

pub mod auth;
pub mod bookings;
pub mod members;
pub mod payments;
pub mod stores;
