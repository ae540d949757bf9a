use crate::config::Config;
use crate::storage::BookStore;
use quire_core::Exporter;
use quire_traits::ResourceProvider;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Semaphore;

/// Shared application state accessible to all handlers
#[derive(Clone)]
pub struct AppState {
    /// Book records
    pub store: Arc<dyn BookStore>,

    /// Renders books; holds the cover image provider
    pub exporter: Arc<Exporter>,

    /// Limits exports rendering at the same time
    pub export_semaphore: Arc<Semaphore>,

    /// Bearer token to user id
    pub tokens: Arc<HashMap<String, String>>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(
        config: Config,
        store: Arc<dyn BookStore>,
        resources: Arc<dyn ResourceProvider>,
    ) -> Self {
        let export_semaphore = Arc::new(Semaphore::new(config.export.concurrency()));
        let tokens = Arc::new(config.auth.token_map());

        Self {
            store,
            exporter: Arc::new(Exporter::new(resources)),
            export_semaphore,
            tokens,
            config: Arc::new(config),
        }
    }
}
