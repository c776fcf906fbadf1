//! Short view tracking domain

pub mod service;
pub mod session;

pub use service::{MutationOutcome, ViewTracker};
pub use session::SessionState;
