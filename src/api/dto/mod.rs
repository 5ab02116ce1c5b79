//! Data Transfer Objects for REST request/response serialization.

pub mod match_dto;
pub mod tournament_dto;

pub use match_dto::*;
pub use tournament_dto::*;
