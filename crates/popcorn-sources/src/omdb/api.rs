//! OMDb wire format and conversion into popcorn models.
//!
//! Every OMDb reply carries `"Response": "True" | "False"`; a `"False"` reply
//! has an `"Error"` string and nothing else worth reading.

use crate::error::SourceError;
use popcorn_models::{MovieDetail, SearchResultItem};
use serde::Deserialize;

const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Response", default)]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
    #[serde(rename = "Search", default)]
    search: Vec<OmdbSearchItem>,
}

#[derive(Debug, Deserialize)]
struct OmdbSearchItem {
    #[serde(rename = "imdbID")]
    imdb_id: String,
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster")]
    poster: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "PascalCase", default)]
struct OmdbDetailResponse {
    response: String,
    error: Option<String>,
    title: String,
    year: String,
    released: String,
    runtime: String,
    genre: String,
    director: String,
    actors: String,
    language: String,
    plot: String,
    poster: String,
    #[serde(rename = "imdbRating")]
    imdb_rating: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

fn not_found(error: Option<String>) -> SourceError {
    SourceError::NotFound(error.unwrap_or_else(|| "Movie not found!".to_string()))
}

pub fn parse_search_response(body: &str) -> Result<Vec<SearchResultItem>, SourceError> {
    let response: OmdbSearchResponse = serde_json::from_str(body)?;
    if response.response.eq_ignore_ascii_case("false") {
        return Err(not_found(response.error));
    }

    Ok(response
        .search
        .into_iter()
        .map(|item| SearchResultItem {
            imdb_id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster: item.poster,
        })
        .collect())
}

pub fn parse_detail_response(body: &str) -> Result<MovieDetail, SourceError> {
    let response: OmdbDetailResponse = serde_json::from_str(body)?;
    if response.response.eq_ignore_ascii_case("false") {
        return Err(not_found(response.error));
    }

    let imdb_rating = match response.imdb_rating.trim() {
        "" | NOT_AVAILABLE => None,
        value => value.parse::<f64>().ok(),
    };

    Ok(MovieDetail {
        imdb_id: response.imdb_id,
        title: response.title,
        year: response.year,
        released: response.released,
        runtime: response.runtime,
        genre: response.genre,
        director: response.director,
        actors: response.actors,
        language: response.language,
        plot: response.plot,
        poster: response.poster,
        imdb_rating,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_search_found() {
        let body = r#"{
            "Search": [
                {"Title": "Inception", "Year": "2010", "imdbID": "tt1375666", "Type": "movie", "Poster": "https://example.com/inception.jpg"},
                {"Title": "Inception: Motion Comics", "Year": "2010–", "imdbID": "tt1790736", "Type": "series", "Poster": "N/A"}
            ],
            "totalResults": "2",
            "Response": "True"
        }"#;

        let results = parse_search_response(body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].imdb_id, "tt1375666");
        assert_eq!(results[0].title, "Inception");
        assert_eq!(results[1].poster.as_deref(), Some("N/A"));
    }

    #[test]
    fn test_parse_search_not_found() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let err = parse_search_response(body).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Movie not found!");
    }

    #[test]
    fn test_parse_search_garbage_is_decode_error() {
        let err = parse_search_response("<html>").unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }

    #[test]
    fn test_parse_detail() {
        let body = r#"{
            "Title": "Inception", "Year": "2010", "Rated": "PG-13", "Released": "16 Jul 2010",
            "Runtime": "148 min", "Genre": "Action, Adventure, Sci-Fi", "Director": "Christopher Nolan",
            "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt", "Plot": "A thief who steals corporate secrets.",
            "Language": "English, Japanese", "Poster": "http://example.com/inception.jpg",
            "imdbRating": "8.8", "imdbID": "tt1375666", "Type": "movie", "Response": "True"
        }"#;

        let detail = parse_detail_response(body).unwrap();
        assert_eq!(detail.title, "Inception");
        assert_eq!(detail.director, "Christopher Nolan");
        assert_eq!(detail.runtime_minutes(), Some(148));
        assert_eq!(detail.imdb_rating, Some(8.8));
        // Poster sanitizing happens in the view model, not here
        assert_eq!(detail.poster, "http://example.com/inception.jpg");
    }

    #[test]
    fn test_parse_detail_unavailable_rating() {
        let body = r#"{"Title":"Obscure","Year":"1921","Runtime":"N/A","imdbRating":"N/A","imdbID":"tt0000001","Response":"True"}"#;
        let detail = parse_detail_response(body).unwrap();
        assert_eq!(detail.imdb_rating, None);
        assert_eq!(detail.runtime_minutes(), None);
    }

    #[test]
    fn test_parse_detail_not_found() {
        let body = r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#;
        let err = parse_detail_response(body).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Incorrect IMDb ID.");
    }
}
