//! Infrastructure layer: repository implementations, external clients and DTOs.

pub mod dto;
pub mod repository;
pub mod weather;
