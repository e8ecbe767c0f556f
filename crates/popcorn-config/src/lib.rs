pub mod api_key;
pub mod config;
pub mod paths;

pub use api_key::{ApiKey, KeyOrigin, API_KEY_ENV, DEV_API_KEY};
pub use config::{Config, OmdbConfig, SearchOptions, DEFAULT_OMDB_BASE_URL};
pub use paths::{PathManager, home_override};
