//! Shared utilities for the Kyoyu binaries.

pub mod logger;
pub mod time;
