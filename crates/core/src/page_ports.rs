//! Port interfaces for the observed page surface
//!
//! These traits define the boundaries between the interruption logic and
//! whatever hosts the page (a mirrored view in this process, a real
//! rendering surface on the other side of a bridge).

use reelbreak_domain::{AssetUrl, Overlay, PageLocation};

/// Synchronous queries over the current page state.
///
/// Implementations mirror the observed page, so reads are cheap and never
/// block on the surface itself.
pub trait PageView: Send + Sync {
    /// The current page address, or `None` before the first document load.
    fn location(&self) -> Option<PageLocation>;

    /// Whether a video player element is present.
    fn player_present(&self) -> bool;

    /// The player's displayed total duration text, if any.
    fn duration_text(&self) -> Option<String>;

    /// Whether an overlay with the given element id is mounted.
    fn overlay_present(&self, element_id: &str) -> bool;

    /// Mount an overlay on the page.
    ///
    /// Best-effort: if the surface is gone there is nobody left to interrupt
    /// and the call is a no-op.
    fn mount_overlay(&self, overlay: Overlay);
}

/// Trait for resolving packaged assets to loadable addresses.
pub trait AssetResolver: Send + Sync {
    /// Resolve a resource name, or `None` when the asset cannot be served.
    fn resolve(&self, resource: &str) -> Option<AssetUrl>;
}
