//! # TaskDesk Web Server Library
//!
//! Server-rendered pages for TaskDesk, a personal task manager.
//!
//! ## Modules
//!
//! - `app`: Application state, router and login guard
//! - `config`: Configuration management
//! - `error`: Page error type and HTTP response mapping
//! - `middleware`: Security headers
//! - `routes`: Page handlers
//! - `session`: Login cookie handling
//! - `views`: HTML rendering

pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod session;
pub mod views;
