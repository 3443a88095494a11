/// Middleware for the page server
///
/// Login enforcement lives next to the router in `app` because it needs the
/// application state; this module holds the state-free layers.

pub mod security;
