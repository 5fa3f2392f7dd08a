//! Store manager app endpoints.

pub mod appointments;
pub mod dashboard;
pub mod members;
pub mod payments;
pub mod staff;
pub mod stores;

pub use super::auth::{get_current_user, login, logout};
