use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::MovieSource;
use async_trait::async_trait;
use popcorn_config::ApiKey;
use popcorn_models::{MovieDetail, SearchResultItem};
use reqwest::Client;
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    api_key: ApiKey,
    base_url: String,
}

impl OmdbClient {
    /// Builds an https-only client; TLS backend failures are returned, never
    /// replaced by a default client.
    pub fn new(api_key: ApiKey, base_url: impl Into<String>) -> Result<Self, SourceError> {
        let client = Client::builder()
            .user_agent(concat!("popcorn/", env!("CARGO_PKG_VERSION")))
            .https_only(true)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            api_key,
            base_url: base_url.into(),
        })
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}?apikey={}&s={}",
            self.base_url,
            urlencoding::encode(self.api_key.as_str()),
            urlencoding::encode(query)
        )
    }

    fn detail_url(&self, imdb_id: &str) -> String {
        format!(
            "{}?apikey={}&i={}",
            self.base_url,
            urlencoding::encode(self.api_key.as_str()),
            urlencoding::encode(imdb_id)
        )
    }

    async fn get_body(&self, url: &str) -> Result<String, SourceError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status));
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl MovieSource for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SourceError> {
        debug!(query = %query, "Searching OMDb");
        let body = self.get_body(&self.search_url(query)).await?;
        api::parse_search_response(&body)
    }

    async fn movie_details(&self, imdb_id: &str) -> Result<MovieDetail, SourceError> {
        debug!(imdb_id = %imdb_id, "Fetching OMDb detail");
        let body = self.get_body(&self.detail_url(imdb_id)).await?;
        api::parse_detail_response(&body)
    }
}
