use config::{Config, StorageBackend};
use domain::*;
use infrastructure::*;
use std::sync::Arc;
use tracing::info;

/// Content Application - wires a store backend into the content manager
pub struct ContentApp {
    pub content_manager: ContentManager,
}

impl ContentApp {
    /// Content catalogue persisted in the SQLite file at `database_path`
    pub fn new(database_path: &str) -> Result<Self, DomainError> {
        // Infrastructure layer - database setup
        let database = Database::new(database_path)?;
        let pool = database.get_pool().clone();

        let content_repository: Arc<dyn ContentRepository> =
            Arc::new(SqliteContentRepository::new(pool));

        Ok(Self::with_repository(content_repository))
    }

    /// Content catalogue that lives only as long as the process
    pub fn in_memory() -> Self {
        Self::with_repository(Arc::new(InMemoryContentRepository::new()))
    }

    pub fn with_repository(content_repository: Arc<dyn ContentRepository>) -> Self {
        Self {
            content_manager: ContentManager::new(content_repository),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, DomainError> {
        info!(backend = %config.storage_backend, "Initializing content store");

        match config.storage_backend {
            StorageBackend::Sqlite => Self::new(&config.database_path),
            StorageBackend::Memory => Ok(Self::in_memory()),
        }
    }
}
