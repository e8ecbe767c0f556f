//! In-memory `MovieSource` with scripted answers and delays, for driving the
//! async lifecycles under tokio's paused clock.

use async_trait::async_trait;
use popcorn_models::{MovieDetail, SearchResultItem};
use popcorn_sources::{MovieSource, SourceError};
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

#[derive(Clone)]
pub enum Outcome<T> {
    Ok(T),
    NotFound,
    Status(u16),
}

impl<T: Clone> Outcome<T> {
    fn to_result(&self) -> Result<T, SourceError> {
        match self {
            Outcome::Ok(value) => Ok(value.clone()),
            Outcome::NotFound => Err(SourceError::NotFound("Movie not found!".to_string())),
            Outcome::Status(code) => Err(SourceError::Status(
                reqwest::StatusCode::from_u16(*code).unwrap(),
            )),
        }
    }
}

#[derive(Default)]
pub struct ScriptedSource {
    searches: HashMap<String, (Duration, Outcome<Vec<SearchResultItem>>)>,
    details: HashMap<String, (Duration, Outcome<MovieDetail>)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: &str, delay_ms: u64, outcome: Outcome<Vec<SearchResultItem>>) -> Self {
        self.searches
            .insert(query.to_string(), (Duration::from_millis(delay_ms), outcome));
        self
    }

    pub fn detail(mut self, imdb_id: &str, delay_ms: u64, outcome: Outcome<MovieDetail>) -> Self {
        self.details
            .insert(imdb_id.to_string(), (Duration::from_millis(delay_ms), outcome));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MovieSource for ScriptedSource {
    fn source_name(&self) -> &str {
        "scripted"
    }

    async fn search(&self, query: &str) -> Result<Vec<SearchResultItem>, SourceError> {
        self.calls.lock().unwrap().push(format!("search:{}", query));
        let (delay, outcome) = self
            .searches
            .get(query)
            .cloned()
            .unwrap_or((Duration::ZERO, Outcome::NotFound));
        tokio::time::sleep(delay).await;
        outcome.to_result()
    }

    async fn movie_details(&self, imdb_id: &str) -> Result<MovieDetail, SourceError> {
        self.calls.lock().unwrap().push(format!("detail:{}", imdb_id));
        let (delay, outcome) = self
            .details
            .get(imdb_id)
            .cloned()
            .unwrap_or((Duration::ZERO, Outcome::NotFound));
        tokio::time::sleep(delay).await;
        outcome.to_result()
    }
}

pub fn result_item(imdb_id: &str, title: &str) -> SearchResultItem {
    SearchResultItem {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "2010".to_string(),
        poster: Some(format!("https://img.example.com/{}.jpg", imdb_id)),
    }
}

pub fn detail(imdb_id: &str, title: &str) -> MovieDetail {
    MovieDetail {
        imdb_id: imdb_id.to_string(),
        title: title.to_string(),
        year: "2010".to_string(),
        released: "16 Jul 2010".to_string(),
        runtime: "148 min".to_string(),
        genre: "Sci-Fi".to_string(),
        director: "Christopher Nolan".to_string(),
        actors: "Leonardo DiCaprio".to_string(),
        language: "English".to_string(),
        plot: "Dreams within dreams.".to_string(),
        poster: "http://example.com/poster.jpg".to_string(),
        imdb_rating: Some(8.8),
    }
}

pub async fn settle() {
    tokio::time::sleep(Duration::from_secs(5)).await;
}
