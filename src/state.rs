use std::sync::Arc;

use barflow_config::{CorsConfig, JwtConfig, PresetStoreConfig};
use tracing::info;

use crate::modules::permissions::{PresetManager, store_from_config};

#[derive(Clone, Debug)]
pub struct AppState {
    pub presets: Arc<PresetManager>,
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
}

impl AppState {
    pub fn new(presets: PresetManager, jwt_config: JwtConfig, cors_config: CorsConfig) -> Self {
        Self {
            presets: Arc::new(presets),
            jwt_config,
            cors_config,
        }
    }
}

/// Builds the state from the environment, loading stored custom presets.
pub fn init_app_state() -> anyhow::Result<AppState> {
    let store_config = PresetStoreConfig::from_env();
    match &store_config.store_path {
        Some(path) => info!(path = %path.display(), "Using file-backed preset store"),
        None => info!("Using in-memory preset store"),
    }

    let presets = PresetManager::with_store(store_from_config(&store_config))?;

    Ok(AppState::new(
        presets,
        JwtConfig::from_env(),
        CorsConfig::from_env(),
    ))
}
