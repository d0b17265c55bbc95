use std::sync::Arc;

use skillscan_core::Storage;

use crate::config::ServerConfig;

/// Application state shared across all requests.
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<Storage>,
    pub config: ServerConfig,
}

impl AppState {
    pub async fn new(config: ServerConfig) -> anyhow::Result<Self> {
        let storage = Storage::open(&config.db_path).await?;
        Ok(Self {
            storage: Arc::new(storage),
            config,
        })
    }
}
