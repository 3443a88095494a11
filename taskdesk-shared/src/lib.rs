//! # TaskDesk Shared Library
//!
//! Domain types, persistence and authentication primitives used by the
//! TaskDesk web server.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migrations
//! - `models`: Users, categories, tasks and login sessions
//! - `auth`: Password hashing and session tokens
//! - `validation`: Form rules and their user-facing messages

pub mod auth;
pub mod db;
pub mod models;
pub mod validation;

/// Current version of the TaskDesk shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
