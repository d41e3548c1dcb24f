use std::path::PathBuf;
use std::sync::Arc;

use crate::app::error::{GazetteError, Result};
use crate::config::Config;
use crate::fetcher::{Fetcher, NewsApiClient};
use crate::repository::NewsRepository;
use crate::service::NewsService;
use crate::store::{BookmarkStore, SettingsStore, SqliteStorage, Storage};

/// Explicitly constructed wiring of the whole application: storage and
/// its two stores, and the client → repository → service chain. Built
/// once in `main` and passed by reference; there is no global
/// container.
pub struct AppContext {
    pub storage: Arc<dyn Storage>,
    pub settings: SettingsStore,
    pub bookmarks: BookmarkStore,
    pub repository: Arc<NewsRepository>,
    pub service: NewsService,
}

impl AppContext {
    pub fn new(config: &Config, db_path: Option<PathBuf>) -> Result<Self> {
        let db_path = match db_path {
            Some(p) => p,
            None => Self::default_db_path()?,
        };
        let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::new(&db_path)?);
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(NewsApiClient::new(config)?);
        Ok(Self::assemble(storage, fetcher))
    }

    pub fn in_memory(config: &Config) -> Result<Self> {
        let storage: Arc<dyn Storage> = Arc::new(SqliteStorage::in_memory()?);
        let fetcher: Arc<dyn Fetcher + Send + Sync> = Arc::new(NewsApiClient::new(config)?);
        Ok(Self::assemble(storage, fetcher))
    }

    /// Wire the graph from already-built leaves. The seam tests use to
    /// substitute a stub fetcher or storage.
    pub fn assemble(storage: Arc<dyn Storage>, fetcher: Arc<dyn Fetcher + Send + Sync>) -> Self {
        let settings = SettingsStore::load(storage.clone());
        let bookmarks = BookmarkStore::load(storage.clone());
        let repository = Arc::new(NewsRepository::new(fetcher));
        let service = NewsService::new(repository.clone());

        Self {
            storage,
            settings,
            bookmarks,
            repository,
            service,
        }
    }

    fn default_db_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir()
            .ok_or_else(|| GazetteError::Config("could not find data directory".into()))?;
        let gazette_dir = data_dir.join("gazette");
        std::fs::create_dir_all(&gazette_dir)?;
        Ok(gazette_dir.join("gazette.db"))
    }
}
