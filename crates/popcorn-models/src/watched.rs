use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_USER_RATING: u8 = 1;
pub const MAX_USER_RATING: u8 = 10;

/// A movie the user has watched and rated.
///
/// Field names on disk follow the camelCase keys of the stored list
/// (`imdbID`, `userRating`, ...) so existing files stay readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    #[serde(rename = "imdbID")]
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: String,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<f64>,
    #[serde(default)]
    pub runtime: Option<u32>, // Minutes
    #[serde(rename = "userRating")]
    pub user_rating: u8, // 1-10
    #[serde(rename = "countRatingDecisions", default)]
    pub rating_decisions: u32,
    #[serde(rename = "addedAt", default, skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_legacy_keys() {
        let json = r#"{
            "imdbID": "tt1375666",
            "title": "Inception",
            "year": "2010",
            "poster": "https://example.com/inception.jpg",
            "imdbRating": 8.8,
            "runtime": 148,
            "userRating": 10,
            "countRatingDecisions": 2
        }"#;

        let entry: WatchedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.imdb_id, "tt1375666");
        assert_eq!(entry.runtime, Some(148));
        assert_eq!(entry.user_rating, 10);
        assert_eq!(entry.rating_decisions, 2);
        assert_eq!(entry.added_at, None);
    }

    #[test]
    fn test_missing_rating_fields_default() {
        let json = r#"{"imdbID":"tt1","title":"T","year":"1999","poster":"/placeholder.png","userRating":7}"#;
        let entry: WatchedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.imdb_rating, None);
        assert_eq!(entry.runtime, None);
        assert_eq!(entry.rating_decisions, 0);
    }
}
