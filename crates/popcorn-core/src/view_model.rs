//! Detail-pane view model: owns the selection state machine, the detail fetch
//! for the current selection, and the watched list.

use crate::selection::{Selection, SelectionError, SelectionState};
use crate::stats::WatchedSummary;
use crate::store::WatchedList;
use chrono::Utc;
use popcorn_models::WatchedEntry;
use popcorn_sources::MovieSource;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

const DETAIL_FAILURE_MESSAGE: &str = "Something went wrong loading the movie";

/// Snapshot published after every change
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewState {
    pub selection: Selection,
    pub rating: Option<u8>,
    pub rating_decisions: u32,
    pub watched: Vec<WatchedEntry>,
    pub summary: WatchedSummary,
    pub window_title: String,
}

impl ViewState {
    pub fn is_watched(&self, imdb_id: &str) -> bool {
        self.watched.iter().any(|e| e.imdb_id == imdb_id)
    }

    /// The rating stored for an already-watched movie
    pub fn watched_rating(&self, imdb_id: &str) -> Option<u8> {
        self.watched
            .iter()
            .find(|e| e.imdb_id == imdb_id)
            .map(|e| e.user_rating)
    }
}

struct Model {
    selection: SelectionState,
    watched: WatchedList,
    cancel: Option<CancellationToken>,
}

impl Model {
    fn snapshot(&self) -> ViewState {
        ViewState {
            selection: self.selection.selection().clone(),
            rating: self.selection.rating(),
            rating_decisions: self.selection.rating_decisions(),
            watched: self.watched.entries().to_vec(),
            summary: self.watched.summary(),
            window_title: self.selection.window_title(),
        }
    }

    fn cancel_fetch(&mut self) {
        if let Some(token) = self.cancel.take() {
            token.cancel();
        }
    }
}

struct Inner {
    model: Mutex<Model>,
    view: watch::Sender<ViewState>,
}

impl Inner {
    fn model(&self) -> MutexGuard<'_, Model> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn publish(&self, model: &Model) {
        self.view.send_replace(model.snapshot());
    }
}

pub struct ViewModel<S: MovieSource + ?Sized + 'static> {
    source: Arc<S>,
    inner: Arc<Inner>,
}

impl<S: MovieSource + ?Sized + 'static> ViewModel<S> {
    pub fn new(source: Arc<S>, watched: WatchedList) -> Self {
        let model = Model {
            selection: SelectionState::new(),
            watched,
            cancel: None,
        };
        let (view, _) = watch::channel(model.snapshot());

        Self {
            source,
            inner: Arc::new(Inner {
                model: Mutex::new(model),
                view,
            }),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.inner.view.subscribe()
    }

    pub fn state(&self) -> ViewState {
        self.inner.view.borrow().clone()
    }

    pub fn window_title(&self) -> String {
        self.inner.view.borrow().window_title.clone()
    }

    /// Toggle the selection; a newly selected movie is fetched in the background.
    /// Must be called from within a tokio runtime.
    pub fn select(&self, imdb_id: &str) {
        let mut model = self.inner.model();
        model.cancel_fetch();

        let ticket = model.selection.select(imdb_id);
        self.inner.publish(&model);

        let Some(ticket) = ticket else {
            debug!(imdb_id = %imdb_id, "Selection toggled off");
            return;
        };

        let token = CancellationToken::new();
        model.cancel = Some(token.clone());
        drop(model);

        let source = Arc::clone(&self.source);
        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!(imdb_id = %ticket.imdb_id, "Detail fetch cancelled");
                    return;
                }
                outcome = source.movie_details(&ticket.imdb_id) => outcome,
            };

            let outcome = outcome.map_err(|e| {
                warn!(
                    source = source.source_name(),
                    imdb_id = %ticket.imdb_id,
                    error = %e,
                    "Failed to load movie detail"
                );
                if e.is_not_found() {
                    e.to_string()
                } else {
                    DETAIL_FAILURE_MESSAGE.to_string()
                }
            });

            let mut model = inner.model();
            if model.selection.resolve(&ticket, outcome) {
                model.cancel = None;
                inner.publish(&model);
            } else {
                debug!(imdb_id = %ticket.imdb_id, "Dropping stale movie detail");
            }
        });
    }

    pub fn close(&self) {
        let mut model = self.inner.model();
        model.cancel_fetch();
        model.selection.close();
        self.inner.publish(&model);
    }

    pub fn set_rating(&self, rating: u8) -> Result<(), SelectionError> {
        let mut model = self.inner.model();
        model.selection.set_rating(rating)?;
        self.inner.publish(&model);
        Ok(())
    }

    /// Add the open movie with the chosen rating to the watched list and close it.
    ///
    /// Movies already in the list are refused. If only the write to disk fails,
    /// the entry is still in the in-memory list, the pane still closes and
    /// `Persist` is returned.
    pub fn commit(&self) -> Result<WatchedEntry, SelectionError> {
        let mut model = self.inner.model();
        let entry = model.selection.entry(Utc::now())?;
        if model.watched.contains(&entry.imdb_id) {
            return Err(SelectionError::AlreadyWatched(entry.imdb_id));
        }

        let saved = model.watched.append(entry.clone());
        model.selection.close();
        self.inner.publish(&model);

        saved.map_err(|e| SelectionError::Persist(e.to_string()))?;
        info!(imdb_id = %entry.imdb_id, rating = entry.user_rating, "Added to watched list");
        Ok(entry)
    }

    /// Remove a movie from the watched list; unknown ids are a no-op.
    pub fn remove_watched(&self, imdb_id: &str) -> anyhow::Result<bool> {
        let mut model = self.inner.model();
        let removed = model.watched.remove(imdb_id);
        self.inner.publish(&model);
        let removed = removed?;
        if removed {
            info!(imdb_id = %imdb_id, "Removed from watched list");
        }
        Ok(removed)
    }

    /// Wait until the current selection is no longer loading
    pub async fn settled(&self) -> ViewState {
        let mut rx = self.subscribe();
        let settled = rx
            .wait_for(|state| !state.selection.is_loading())
            .await
            .map(|state| state.clone());
        settled.unwrap_or_else(|_| self.state())
    }
}

impl<S: MovieSource + ?Sized + 'static> Drop for ViewModel<S> {
    fn drop(&mut self) {
        self.inner.model().cancel_fetch();
    }
}
