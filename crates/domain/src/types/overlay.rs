//! Interruption overlay model
//!
//! An interruption renders as a full-page modal keyed by a fixed element id,
//! so at most one instance can ever be mounted on a page.

use serde::{Deserialize, Serialize};

use crate::constants::OVERLAY_ELEMENT_ID;

/// Resolved address of a packaged asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetUrl(String);

impl AssetUrl {
    pub fn new(url: impl Into<String>) -> Self {
        AssetUrl(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// What triggered an interruption.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InterruptKind {
    /// The consecutive-shorts limit was reached.
    ShortsLimit,
    /// The current video exceeds the configured maximum length (minutes).
    LongVideo { max_minutes: f64 },
}

/// Renderable overlay content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overlay {
    /// Fixed element id enforcing the one-overlay-per-page invariant.
    pub element_id: String,
    pub title: String,
    pub image: AssetUrl,
    /// Short nudge rendered under the image (doubles as its alt text).
    pub caption: String,
    pub body: String,
}

impl Overlay {
    /// Compose the overlay for an interruption around the resolved image.
    pub fn for_interrupt(kind: InterruptKind, image: AssetUrl) -> Self {
        match kind {
            InterruptKind::ShortsLimit => Self {
                element_id: OVERLAY_ELEMENT_ID.to_string(),
                title: "🛑 Shorts Limit Reached".to_string(),
                image,
                caption: "Are you sure you need another Short?".to_string(),
                body: "You have watched too many Shorts in a row.".to_string(),
            },
            InterruptKind::LongVideo { max_minutes } => Self {
                element_id: OVERLAY_ELEMENT_ID.to_string(),
                title: "⏱️ Long Video Detected".to_string(),
                image,
                caption: "Are you sure you need a long video right now?".to_string(),
                body: format!("This video exceeds your {} min limit.", max_minutes.round()),
            },
        }
    }
}
