use serde::{Deserialize, Serialize};

/// One row of a title search. Lives only as long as the result set it came from.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
}

/// Full record for a single movie, fetched when a result is selected.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieDetail {
    pub imdb_id: String,
    pub title: String,
    pub year: String,
    pub released: String,
    pub runtime: String, // Free text as reported by the remote, e.g. "148 min"
    pub genre: String,
    pub director: String,
    pub actors: String,
    pub language: String,
    pub plot: String,
    pub poster: String,
    pub imdb_rating: Option<f64>, // None when the remote reports "N/A"
}

impl MovieDetail {
    pub fn runtime_minutes(&self) -> Option<u32> {
        parse_runtime_minutes(&self.runtime)
    }

    /// Remote rating above 8 marks a top pick in the detail pane
    pub fn is_top_rated(&self) -> bool {
        self.imdb_rating.map(|r| r > 8.0).unwrap_or(false)
    }
}

/// Parse the leading integer of a free-text runtime ("148 min" -> 148).
/// Returns None for "N/A" or anything that doesn't start with a digit.
pub fn parse_runtime_minutes(runtime: &str) -> Option<u32> {
    let digits: String = runtime
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_runtime_minutes() {
        assert_eq!(parse_runtime_minutes("148 min"), Some(148));
        assert_eq!(parse_runtime_minutes("  90 min"), Some(90));
        assert_eq!(parse_runtime_minutes("N/A"), None);
        assert_eq!(parse_runtime_minutes(""), None);
    }

    #[test]
    fn test_top_rated_threshold() {
        let mut detail = MovieDetail {
            imdb_rating: Some(8.8),
            ..MovieDetail::default()
        };
        assert!(detail.is_top_rated());

        detail.imdb_rating = Some(8.0);
        assert!(!detail.is_top_rated());

        detail.imdb_rating = None;
        assert!(!detail.is_top_rated());
    }
}
