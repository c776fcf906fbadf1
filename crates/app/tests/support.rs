//! Shared helpers for app-level integration tests.
//!
//! Builds a real `AppContext` against a temporary database and asset
//! directory, the way the binary wires it.

use std::sync::Arc;

use reelbreak_app::AppContext;
use reelbreak_domain::constants::INTERRUPT_IMAGE_RESOURCE;
use reelbreak_domain::{AssetConfig, CadenceConfig, Config, DatabaseConfig};
use reelbreak_infra::platform::OverlayDirective;
use tempfile::TempDir;
use tokio::sync::mpsc;

pub struct TestApp {
    pub ctx: Arc<AppContext>,
    pub directives: mpsc::UnboundedReceiver<OverlayDirective>,
    _temp_dir: TempDir,
}

impl TestApp {
    /// Context over a fresh temporary database with the interrupt image in
    /// place.
    pub async fn new() -> Self {
        let temp_dir = TempDir::new().expect("temporary directory should be created");
        let assets_dir = temp_dir.path().join("assets");
        std::fs::create_dir(&assets_dir).expect("asset directory should be created");
        std::fs::write(assets_dir.join(INTERRUPT_IMAGE_RESOURCE), b"png")
            .expect("interrupt image should be written");

        let config = Config {
            database: DatabaseConfig {
                path: temp_dir.path().join("reelbreak.db").to_string_lossy().to_string(),
                pool_size: 4,
            },
            assets: AssetConfig { dir: assets_dir.to_string_lossy().to_string() },
            cadence: CadenceConfig::default(),
        };

        let (ctx, directives) = AppContext::new(config).await.expect("context should build");
        Self { ctx: Arc::new(ctx), directives, _temp_dir: temp_dir }
    }
}
