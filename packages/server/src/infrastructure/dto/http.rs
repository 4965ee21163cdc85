//! HTTP API response DTOs.

use serde::{Deserialize, Serialize};

/// Liveness response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthDto {
    pub status: String,
}
