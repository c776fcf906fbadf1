//! Platform adapters for the observed page surface
//!
//! This module provides the process-local stand-ins for the page the engine
//! watches: a mirror fed by page events, and filesystem asset resolution.

pub mod assets;
pub mod mirror;

pub use assets::DirAssetResolver;
pub use mirror::{OverlayDirective, PageEvent, PageMirror};
