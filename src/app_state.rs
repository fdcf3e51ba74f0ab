//! Application state for the Actix-web server
//!
//! The `AppState` struct is wrapped in `web::Data` and shared across all
//! HTTP handlers. The SQLite connection is protected by a `Mutex`, which
//! also serializes scrape runs: one browser, one run at a time.

use crate::config::Config;
use rusqlite::Connection;
use std::sync::Mutex;

/// Shared application state for Actix-web handlers
pub struct AppState {
    /// Store connection, one writer at a time
    pub db: Mutex<Connection>,
    /// Application configuration
    pub config: Config,
}
