//! Which movie is open in the detail pane, and what the user has done with it.
//!
//! `SelectionState` is a plain state machine with no I/O. Every selection
//! change bumps a generation; a fetched detail is only applied through a
//! [`DetailTicket`] whose id and generation both still match.

use chrono::{DateTime, Utc};
use popcorn_models::{sanitize_poster, MovieDetail, WatchedEntry, MAX_USER_RATING, MIN_USER_RATING};
use serde::Serialize;
use thiserror::Error;

pub const DEFAULT_WINDOW_TITLE: &str = "Popcorn";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    Idle,
    DetailLoading { imdb_id: String },
    DetailReady { imdb_id: String, detail: MovieDetail },
    DetailFailed { imdb_id: String, message: String },
}

impl Selection {
    pub fn imdb_id(&self) -> Option<&str> {
        match self {
            Selection::Idle => None,
            Selection::DetailLoading { imdb_id }
            | Selection::DetailReady { imdb_id, .. }
            | Selection::DetailFailed { imdb_id, .. } => Some(imdb_id),
        }
    }

    pub fn detail(&self) -> Option<&MovieDetail> {
        match self {
            Selection::DetailReady { detail, .. } => Some(detail),
            _ => None,
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Selection::DetailLoading { .. })
    }
}

/// Handle for one detail fetch, issued when a selection starts loading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailTicket {
    pub imdb_id: String,
    pub generation: u64,
}

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("No movie is selected")]
    NoSelection,
    #[error("The movie detail has not loaded")]
    NoDetail,
    #[error("Choose a rating before adding the movie")]
    NoRating,
    #[error("Rating must be between 1 and 10, got {0}")]
    InvalidRating(u8),
    #[error("{0} is already in the watched list")]
    AlreadyWatched(String),
    #[error("Failed to save the watched list: {0}")]
    Persist(String),
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selection: Selection,
    generation: u64,
    rating: Option<u8>,
    rating_decisions: u32,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    pub fn rating_decisions(&self) -> u32 {
        self.rating_decisions
    }

    fn begin_session(&mut self) {
        self.generation += 1;
        self.rating = None;
        self.rating_decisions = 0;
    }

    /// Toggle selection. Selecting the open movie again closes it (returns
    /// None); any other id starts loading and returns the ticket to fetch with.
    pub fn select(&mut self, imdb_id: &str) -> Option<DetailTicket> {
        let reselected = self.selection.imdb_id() == Some(imdb_id);
        self.begin_session();

        if reselected {
            self.selection = Selection::Idle;
            return None;
        }

        self.selection = Selection::DetailLoading {
            imdb_id: imdb_id.to_string(),
        };
        Some(DetailTicket {
            imdb_id: imdb_id.to_string(),
            generation: self.generation,
        })
    }

    pub fn close(&mut self) {
        self.begin_session();
        self.selection = Selection::Idle;
    }

    /// Apply a fetch outcome. Returns false, changing nothing, when the
    /// ticket no longer matches the current selection.
    pub fn resolve(&mut self, ticket: &DetailTicket, outcome: Result<MovieDetail, String>) -> bool {
        if ticket.generation != self.generation {
            return false;
        }
        match &self.selection {
            Selection::DetailLoading { imdb_id } if *imdb_id == ticket.imdb_id => {}
            _ => return false,
        }

        self.selection = match outcome {
            Ok(mut detail) => {
                detail.poster = sanitize_poster(Some(&detail.poster));
                Selection::DetailReady {
                    imdb_id: ticket.imdb_id.clone(),
                    detail,
                }
            }
            Err(message) => Selection::DetailFailed {
                imdb_id: ticket.imdb_id.clone(),
                message,
            },
        };
        true
    }

    /// Record the user's rating. Each change to a different value counts as
    /// one rating decision; repeating the current value does not.
    pub fn set_rating(&mut self, rating: u8) -> Result<(), SelectionError> {
        if !(MIN_USER_RATING..=MAX_USER_RATING).contains(&rating) {
            return Err(SelectionError::InvalidRating(rating));
        }
        if self.selection.is_idle() {
            return Err(SelectionError::NoSelection);
        }
        if self.selection.detail().is_none() {
            return Err(SelectionError::NoDetail);
        }

        if self.rating != Some(rating) {
            self.rating = Some(rating);
            self.rating_decisions += 1;
        }
        Ok(())
    }

    /// Build the entry a commit would store, without changing state
    pub fn entry(&self, added_at: DateTime<Utc>) -> Result<WatchedEntry, SelectionError> {
        let (imdb_id, detail) = match &self.selection {
            Selection::DetailReady { imdb_id, detail } => (imdb_id, detail),
            Selection::Idle => return Err(SelectionError::NoSelection),
            _ => return Err(SelectionError::NoDetail),
        };
        let user_rating = self.rating.ok_or(SelectionError::NoRating)?;

        Ok(WatchedEntry {
            imdb_id: imdb_id.clone(),
            title: detail.title.clone(),
            year: detail.year.clone(),
            poster: detail.poster.clone(),
            imdb_rating: detail.imdb_rating,
            runtime: detail.runtime_minutes(),
            user_rating,
            rating_decisions: self.rating_decisions,
            added_at: Some(added_at),
        })
    }

    pub fn window_title(&self) -> String {
        match self.selection.detail() {
            Some(detail) if !detail.title.trim().is_empty() => format!("Movie | {}", detail.title),
            _ => DEFAULT_WINDOW_TITLE.to_string(),
        }
    }
}
