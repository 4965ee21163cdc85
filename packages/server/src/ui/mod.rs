//! WebSocket relay server: routing, handlers and lifecycle.

mod handler;
mod runner;
mod signal;
pub mod state;

pub use handler::GatewayError;
pub use runner::{build_router, run, serve};
