//! Interruption overlay presentation

pub mod presenter;

pub use presenter::{InterruptPresenter, PresentOutcome};
