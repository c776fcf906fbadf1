//! Mirrored page state
//!
//! The engine never touches a real page. A thin script on the observed
//! surface forwards `PageEvent`s in; the mirror keeps the last known page
//! state for synchronous queries and pushes `OverlayDirective`s back out
//! for the surface to render.

use parking_lot::Mutex;
use reelbreak_core::PageView;
use reelbreak_domain::{Overlay, PageLocation};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::debug;

/// One observation from the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PageEvent {
    /// A document finished loading. Prior overlays and player state are
    /// gone with the old document.
    Loaded { url: String },
    /// The address changed without a document load (soft navigation);
    /// mounted overlays survive.
    Navigated { url: String },
    /// A subtree mutation burst settled.
    Mutated,
    /// Player presence or its displayed duration changed.
    Player {
        present: bool,
        #[serde(default)]
        duration_text: Option<String>,
    },
}

/// One instruction for the surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OverlayDirective {
    /// Render the overlay under its element id.
    Mount { overlay: Overlay },
}

#[derive(Default)]
struct MirrorState {
    location: Option<PageLocation>,
    player_present: bool,
    duration_text: Option<String>,
    overlay_ids: Vec<String>,
}

/// Process-local mirror of the observed page.
///
/// Reads are answered from the last applied events, so `PageView` queries
/// never block on the surface itself.
pub struct PageMirror {
    state: Mutex<MirrorState>,
    directives: mpsc::UnboundedSender<OverlayDirective>,
}

impl PageMirror {
    /// Create a mirror and the directive stream for the hosting surface.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<OverlayDirective>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { state: Mutex::new(MirrorState::default()), directives: tx }, rx)
    }

    /// Apply one event from the surface.
    pub fn apply(&self, event: &PageEvent) {
        let mut state = self.state.lock();
        match event {
            PageEvent::Loaded { url } => {
                state.location = Some(PageLocation::new(url.clone()));
                state.player_present = false;
                state.duration_text = None;
                state.overlay_ids.clear();
            }
            PageEvent::Navigated { url } => {
                state.location = Some(PageLocation::new(url.clone()));
            }
            PageEvent::Mutated => {
                // Mutation bursts carry no state of their own; the host
                // reacts to them by running the tracker.
            }
            PageEvent::Player { present, duration_text } => {
                state.player_present = *present;
                state.duration_text = duration_text.clone();
            }
        }
    }
}

impl PageView for PageMirror {
    fn location(&self) -> Option<PageLocation> {
        self.state.lock().location.clone()
    }

    fn player_present(&self) -> bool {
        self.state.lock().player_present
    }

    fn duration_text(&self) -> Option<String> {
        self.state.lock().duration_text.clone()
    }

    fn overlay_present(&self, element_id: &str) -> bool {
        self.state.lock().overlay_ids.iter().any(|id| id == element_id)
    }

    fn mount_overlay(&self, overlay: Overlay) {
        let mut state = self.state.lock();
        let element_id = overlay.element_id.clone();
        match self.directives.send(OverlayDirective::Mount { overlay }) {
            Ok(()) => state.overlay_ids.push(element_id),
            // Receiver gone means no surface is attached; there is nobody
            // left to interrupt.
            Err(_) => debug!(element_id, "overlay directive dropped, no surface attached"),
        }
    }
}
