//! User-adjustable limit settings

pub mod service;

pub use service::SettingsService;
