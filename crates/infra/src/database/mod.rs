//! Database implementations

pub mod manager;
pub mod state_repository;

pub use manager::*;
pub use state_repository::*;
