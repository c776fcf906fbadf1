//! Mock page surface and asset resolver for testing

use std::sync::{Arc, Mutex};

use reelbreak_core::{AssetResolver, PageView};
use reelbreak_domain::{AssetUrl, Overlay, PageLocation};

#[derive(Default)]
struct PageState {
    location: Option<PageLocation>,
    player_present: bool,
    duration_text: Option<String>,
    overlays: Vec<Overlay>,
}

/// In-memory mock for `PageView`.
///
/// Test code drives the page through `navigate` / `set_player` and inspects
/// what got mounted through `mounted_overlays`.
#[derive(Default, Clone)]
pub struct MockPageView {
    state: Arc<Mutex<PageState>>,
}

impl MockPageView {
    /// Create a mock page with nothing loaded yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Point the page at a new address.
    pub fn navigate(&self, url: &str) {
        self.state.lock().expect("page mock lock").location = Some(PageLocation::new(url));
    }

    /// Set player presence and its displayed duration text.
    pub fn set_player(&self, present: bool, duration_text: Option<&str>) {
        let mut state = self.state.lock().expect("page mock lock");
        state.player_present = present;
        state.duration_text = duration_text.map(str::to_string);
    }

    /// Overlays mounted so far.
    pub fn mounted_overlays(&self) -> Vec<Overlay> {
        self.state.lock().expect("page mock lock").overlays.clone()
    }

    /// Drop all mounted overlays, as a fresh document load would.
    pub fn clear_overlays(&self) {
        self.state.lock().expect("page mock lock").overlays.clear();
    }
}

impl PageView for MockPageView {
    fn location(&self) -> Option<PageLocation> {
        self.state.lock().expect("page mock lock").location.clone()
    }

    fn player_present(&self) -> bool {
        self.state.lock().expect("page mock lock").player_present
    }

    fn duration_text(&self) -> Option<String> {
        self.state.lock().expect("page mock lock").duration_text.clone()
    }

    fn overlay_present(&self, element_id: &str) -> bool {
        self.state
            .lock()
            .expect("page mock lock")
            .overlays
            .iter()
            .any(|overlay| overlay.element_id == element_id)
    }

    fn mount_overlay(&self, overlay: Overlay) {
        self.state.lock().expect("page mock lock").overlays.push(overlay);
    }
}

/// Mock `AssetResolver` with a fixed answer.
#[derive(Clone)]
pub struct MockAssetResolver {
    url: Option<AssetUrl>,
}

impl MockAssetResolver {
    /// Resolver that serves every resource from a fake packaged address.
    pub fn new() -> Self {
        Self { url: Some(AssetUrl::new("ext://assets/meme.png")) }
    }

    /// Resolver with no assets available.
    pub fn unavailable() -> Self {
        Self { url: None }
    }
}

impl Default for MockAssetResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl AssetResolver for MockAssetResolver {
    fn resolve(&self, _resource: &str) -> Option<AssetUrl> {
        self.url.clone()
    }
}
