//! Daily tally persistence rules

pub mod service;

pub use service::TallyService;
