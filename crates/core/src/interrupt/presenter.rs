//! Interrupt presenter - idempotent overlay mounting

use std::sync::Arc;

use reelbreak_domain::constants::{INTERRUPT_IMAGE_RESOURCE, OVERLAY_ELEMENT_ID};
use reelbreak_domain::{InterruptKind, Overlay};
use tracing::{debug, info};

use crate::page_ports::{AssetResolver, PageView};

/// What happened when an interruption was presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentOutcome {
    /// The overlay was mounted.
    Shown,
    /// An overlay is already on the page; nothing was mounted.
    AlreadyShown,
    /// The interrupt image could not be resolved; nothing was mounted.
    SkippedNoAsset,
}

/// Mounts the interruption overlay, at most once per page.
pub struct InterruptPresenter {
    page: Arc<dyn PageView>,
    assets: Arc<dyn AssetResolver>,
}

impl InterruptPresenter {
    /// Create a new presenter
    pub fn new(page: Arc<dyn PageView>, assets: Arc<dyn AssetResolver>) -> Self {
        Self { page, assets }
    }

    /// Present the overlay for an interruption.
    ///
    /// Idempotent per page: if an overlay with the fixed element id is
    /// already mounted, nothing happens. A missing interrupt image skips
    /// the overlay entirely rather than mounting a broken one.
    pub fn present(&self, kind: InterruptKind) -> PresentOutcome {
        if self.page.overlay_present(OVERLAY_ELEMENT_ID) {
            return PresentOutcome::AlreadyShown;
        }

        let Some(image) = self.assets.resolve(INTERRUPT_IMAGE_RESOURCE) else {
            debug!(resource = INTERRUPT_IMAGE_RESOURCE, "interrupt image unavailable, skipping");
            return PresentOutcome::SkippedNoAsset;
        };

        let overlay = Overlay::for_interrupt(kind, image);
        info!(title = %overlay.title, "mounting interruption overlay");
        self.page.mount_overlay(overlay);
        PresentOutcome::Shown
    }
}
