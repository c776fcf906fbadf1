//! Utilities for the application layer

pub mod logging;
