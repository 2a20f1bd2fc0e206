use crate::{
    backend::{BackendConnector, RelayError},
    config::AppConfig,
};

/// Shared by every handler. Nothing in here changes after startup.
#[derive(Clone, Debug)]
pub struct AppState {
    config: AppConfig,
    backend: BackendConnector,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, RelayError> {
        let backend = BackendConnector::new(&config)?;

        Ok(Self { config, backend })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn backend(&self) -> &BackendConnector {
        &self.backend
    }
}
