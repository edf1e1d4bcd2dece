//! Infrastructure layer: transport adapters and DTOs.

pub mod dto;
pub mod transport;
