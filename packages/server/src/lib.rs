//! Room relay for a collaborative code editor.
//!
//! Clients connect over WebSocket to a named room and share a source buffer,
//! a language tag, the member list and a bounded chat transcript. State lives
//! in memory only and is lost when the process exits.

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::run as run_server;
