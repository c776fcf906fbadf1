//! Packaged asset resolution
//!
//! Interrupt overlays reference images shipped with the install. The
//! resolver turns a packaged name into an absolute `file://` address the
//! surface can render, and reports assets that did not ship.

use std::path::{Path, PathBuf};

use reelbreak_core::AssetResolver;
use reelbreak_domain::AssetUrl;
use tracing::warn;

/// Resolves packaged asset names against the install's asset directory.
pub struct DirAssetResolver {
    dir: PathBuf,
}

impl DirAssetResolver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl AssetResolver for DirAssetResolver {
    fn resolve(&self, name: &str) -> Option<AssetUrl> {
        let path = self.dir.join(name);
        if !path.is_file() {
            warn!(asset = name, dir = %self.dir.display(), "packaged asset missing");
            return None;
        }
        Some(file_url(&path))
    }
}

fn file_url(path: &Path) -> AssetUrl {
    let absolute = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
    AssetUrl::new(format!("file://{}", absolute.display()))
}

#[cfg(test)]
mod tests {
    use reelbreak_domain::constants::INTERRUPT_IMAGE_RESOURCE;

    use super::*;

    #[test]
    fn test_resolves_shipped_assets_to_file_urls() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::write(dir.path().join(INTERRUPT_IMAGE_RESOURCE), b"png").expect("write asset");

        let resolver = DirAssetResolver::new(dir.path());
        let url = resolver.resolve(INTERRUPT_IMAGE_RESOURCE).expect("asset resolves");

        assert!(url.as_str().starts_with("file://"), "got {}", url.as_str());
        assert!(url.as_str().ends_with(INTERRUPT_IMAGE_RESOURCE), "got {}", url.as_str());
    }

    #[test]
    fn test_missing_assets_resolve_to_none() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let resolver = DirAssetResolver::new(dir.path());
        assert_eq!(resolver.resolve("nope.png"), None);
    }

    #[test]
    fn test_directories_are_not_assets() {
        let dir = tempfile::tempdir().expect("create temp dir");
        std::fs::create_dir(dir.path().join("meme.png")).expect("create dir");

        let resolver = DirAssetResolver::new(dir.path());
        assert_eq!(resolver.resolve("meme.png"), None);
    }
}
