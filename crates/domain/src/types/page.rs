//! Page address classification and view identity
//!
//! Classification is deliberately shape-based: the observed platform keeps
//! its viewing modes apart by address substrings, so the engine does the
//! same instead of parsing full URLs.

use serde::{Deserialize, Serialize};

use crate::constants::{SHORTS_PATH_MARKER, WATCH_QUERY_MARKER};

/// A page address as reported by the observed surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageLocation(String);

impl PageLocation {
    pub fn new(url: impl Into<String>) -> Self {
        PageLocation(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True when the address points at the short-form viewing mode.
    pub fn is_shorts_page(&self) -> bool {
        self.0.contains(SHORTS_PATH_MARKER)
    }

    /// True when the address points at a single-video watch page.
    pub fn is_watch_page(&self) -> bool {
        self.0.contains(WATCH_QUERY_MARKER)
    }
}

/// Proxy for "the short currently on screen".
///
/// Derived from the page address: a changed address reads as a new short, a
/// stable address reads as the same one. Re-visiting an address within a
/// session therefore does not count twice, which is accepted imprecision in
/// exchange for never needing player internals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewIdentity(String);

impl ViewIdentity {
    /// Identity of the short at `location`.
    pub fn from_location(location: &PageLocation) -> Self {
        ViewIdentity(location.as_str().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorts_page_detection() {
        let page = PageLocation::new("https://www.youtube.com/shorts/abc123XYZ");
        assert!(page.is_shorts_page());
        assert!(!page.is_watch_page());
    }

    #[test]
    fn test_watch_page_detection() {
        let page = PageLocation::new("https://www.youtube.com/watch?v=dQw4w9WgXcQ");
        assert!(page.is_watch_page());
        assert!(!page.is_shorts_page());
    }

    #[test]
    fn test_unrelated_pages_match_neither_mode() {
        for url in ["https://www.youtube.com/", "https://example.com/shorts-review"] {
            let page = PageLocation::new(url);
            assert!(!page.is_shorts_page(), "misclassified {url}");
            assert!(!page.is_watch_page(), "misclassified {url}");
        }
    }

    #[test]
    fn test_view_identity_tracks_address() {
        let first = PageLocation::new("https://www.youtube.com/shorts/aaa");
        let second = PageLocation::new("https://www.youtube.com/shorts/bbb");
        assert_eq!(ViewIdentity::from_location(&first), ViewIdentity::from_location(&first));
        assert_ne!(ViewIdentity::from_location(&first), ViewIdentity::from_location(&second));
    }
}
