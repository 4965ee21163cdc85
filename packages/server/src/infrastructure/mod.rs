//! Infrastructure layer: wire DTOs and storage implementations.

pub mod dto;
pub mod repository;
