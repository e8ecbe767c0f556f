use crate::error::SourceError;
use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResultItem};

/// A remote catalogue that can search titles and fetch a single movie by id.
///
/// Implementations do not handle cancellation themselves: callers drop or
/// race the returned future when the query or selection it belongs to goes stale.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Short name used as the `source` field in log events
    fn source_name(&self) -> &str;

    /// Free-text title search. A "no match" answer is `SourceError::NotFound`.
    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SourceError>;

    /// Full record for one external identifier
    async fn movie_details(&self, imdb_id: &str) -> Result<MovieDetail, SourceError>;
}
