//! Admin console endpoints.

pub mod appointments;
pub mod members;
pub mod payments;
pub mod reports;
pub mod slots;
pub mod staff;
pub mod stores;
pub mod templates;
pub mod users;

pub use super::auth::{get_current_user, login, logout};
