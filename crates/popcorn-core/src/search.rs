//! Query-driven search lifecycle.
//!
//! Every query change bumps a generation counter and cancels the request in
//! flight. A request only ever writes state while its generation is current,
//! so a late answer for a superseded query is dropped even if it slips past
//! cancellation.

use popcorn_models::{sanitize_poster, SearchResultItem};
use popcorn_sources::{MovieSource, SourceError};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const NOT_FOUND_MESSAGE: &str = "No movies found";
pub const FAILURE_MESSAGE: &str = "Something went wrong with fetching movies";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResultItem>,
    pub loading: bool,
    pub error: Option<String>,
}

#[derive(Default)]
struct Current {
    generation: u64,
    cancel: Option<CancellationToken>,
}

struct Inner {
    current: Mutex<Current>,
    state: watch::Sender<SearchState>,
}

impl Inner {
    fn current(&self) -> MutexGuard<'_, Current> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn finish(&self, source: &str, generation: u64, outcome: Result<Vec<SearchResultItem>, SourceError>) {
        let mut current = self.current();
        if current.generation != generation {
            debug!(generation, "Dropping stale search result");
            return;
        }
        current.cancel = None;

        self.state.send_modify(|state| {
            state.loading = false;
            match outcome {
                Ok(results) => {
                    debug!(source, query = %state.query, count = results.len(), "Search finished");
                    state.results = results
                        .into_iter()
                        .map(|mut item| {
                            item.poster = Some(sanitize_poster(item.poster.as_deref()));
                            item
                        })
                        .collect();
                    state.error = None;
                }
                Err(e) if e.is_not_found() => {
                    debug!(source, query = %state.query, "No movies matched");
                    state.results.clear();
                    state.error = Some(NOT_FOUND_MESSAGE.to_string());
                }
                Err(e) => {
                    warn!(source, query = %state.query, error = %e, "Search failed");
                    state.results.clear();
                    state.error = Some(FAILURE_MESSAGE.to_string());
                }
            }
        });
    }
}

/// Turns a changing query into `SearchState` updates published on a watch channel.
///
/// Must be used from within a tokio runtime; each accepted query spawns one task.
pub struct SearchEngine<S: MovieSource + ?Sized + 'static> {
    source: Arc<S>,
    min_query_len: usize,
    inner: Arc<Inner>,
}

impl<S: MovieSource + ?Sized + 'static> SearchEngine<S> {
    pub fn new(source: Arc<S>, min_query_len: usize) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            source,
            min_query_len,
            inner: Arc::new(Inner {
                current: Mutex::new(Current::default()),
                state,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state.subscribe()
    }

    pub fn state(&self) -> SearchState {
        self.inner.state.borrow().clone()
    }

    /// Re-evaluate for a new query value.
    ///
    /// Too-short queries clear results and error without touching the network.
    /// Anything else supersedes the request in flight and starts a new one.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        let mut current = self.inner.current();

        current.generation += 1;
        let generation = current.generation;
        if let Some(previous) = current.cancel.take() {
            previous.cancel();
        }

        let search_text = query.trim().to_string();
        if search_text.chars().count() < self.min_query_len {
            self.inner.state.send_replace(SearchState {
                query,
                results: Vec::new(),
                loading: false,
                error: None,
            });
            return;
        }

        let token = CancellationToken::new();
        current.cancel = Some(token.clone());
        self.inner.state.send_modify(|state| {
            state.query = query;
            state.loading = true;
            state.error = None;
        });
        drop(current);

        let source = Arc::clone(&self.source);
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(query = %search_text, generation, "Search cancelled");
                    return;
                }
                outcome = source.search(&search_text) => outcome,
            };
            inner.finish(source.source_name(), generation, outcome);
        });
    }

    /// Follow an observable query until its sender is dropped.
    pub async fn drive(&self, mut queries: watch::Receiver<String>) {
        loop {
            let query = queries.borrow_and_update().clone();
            self.set_query(query);
            if queries.changed().await.is_err() {
                break;
            }
        }
    }

    /// Set the query and wait for its outcome.
    ///
    /// If another query supersedes this one before it settles, the returned
    /// state belongs to whichever query settled last.
    pub async fn search(&self, query: &str) -> SearchState {
        let mut rx = self.subscribe();
        self.set_query(query);
        let settled = rx
            .wait_for(|state| !state.loading)
            .await
            .map(|state| state.clone());
        settled.unwrap_or_else(|_| self.state())
    }
}

impl<S: MovieSource + ?Sized + 'static> Drop for SearchEngine<S> {
    fn drop(&mut self) {
        if let Some(token) = self.inner.current().cancel.take() {
            token.cancel();
        }
    }
}
