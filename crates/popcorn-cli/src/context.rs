use color_eyre::eyre::eyre;
use color_eyre::Result;
use popcorn_config::{ApiKey, Config, PathManager};
use popcorn_core::{SearchEngine, ViewModel, WatchedList, WatchedStore};
use popcorn_sources::{MovieSource, OmdbClient};
use std::sync::Arc;
use tracing::debug;

pub type SharedSource = dyn MovieSource;

/// Everything resolved once at startup: locations, config and the API key
pub struct AppContext {
    pub paths: PathManager,
    pub config: Config,
    pub api_key: ApiKey,
}

impl AppContext {
    pub fn load() -> Result<Self> {
        let paths = PathManager::default();
        paths
            .ensure_directories()
            .map_err(|e| eyre!("Failed to create {}: {}", paths.config_dir().display(), e))?;

        let config_file = paths.config_file();
        let config = Config::load_or_default(&config_file)
            .map_err(|e| eyre!("Failed to load config from {}: {}", config_file.display(), e))?;
        let api_key = ApiKey::resolve(&config);
        debug!(origin = %api_key.origin(), "Resolved OMDb API key");

        Ok(Self { paths, config, api_key })
    }

    pub fn source(&self) -> Result<Arc<SharedSource>> {
        let client = OmdbClient::new(self.api_key.clone(), self.config.omdb.base_url.clone())
            .map_err(|e| eyre!("Failed to build the OMDb client: {}", e))?;
        Ok(Arc::new(client))
    }

    pub fn watched_store(&self) -> WatchedStore {
        WatchedStore::new(self.paths.data_dir())
    }

    pub fn watched_list(&self) -> WatchedList {
        WatchedList::open(self.watched_store())
    }

    pub fn search_engine(&self, source: Arc<SharedSource>) -> SearchEngine<SharedSource> {
        SearchEngine::new(source, self.config.search.min_query_len)
    }

    pub fn view_model(&self, source: Arc<SharedSource>) -> ViewModel<SharedSource> {
        ViewModel::new(source, self.watched_list())
    }
}
