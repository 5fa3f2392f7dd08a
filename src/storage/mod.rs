//!
//! salon session storage
//! ----------------------
//! Durable, string-keyed storage for client-side session state. Values are plain
//! strings; structured records (user and member profiles) are stored JSON-encoded by
//! the session layer. Two backends are provided:
//! - `MemoryStore`: process-local map, used by tests and short-lived tools.
//! - `FileStore`: a single JSON document on disk so a session survives restarts.
//!
//! Keys written by the session layer are listed in [`keys`].

mod memory;
mod file;

pub use memory::MemoryStore;
pub use file::FileStore;

use crate::error::ClientResult;

/// Persisted key names. These match what the browser front-ends keep in local storage.
pub mod keys {
    pub const TOKEN: &str = "token";
    pub const USER_INFO: &str = "userInfo";
    pub const MEMBER_INFO: &str = "memberInfo";
}

/// Minimal key-value surface the session store needs.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> ClientResult<()>;
    fn remove(&self, key: &str) -> ClientResult<()>;
}
