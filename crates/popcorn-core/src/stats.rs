use popcorn_models::WatchedEntry;
use serde::Serialize;

/// Arithmetic mean; an empty slice averages to 0, never NaN.
pub fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Round to two decimals, halves away from zero.
///
/// The value is first snapped to 1e-6 of a cent so that literals like 1.005,
/// stored in binary as 1.00499999..., round the way they read.
pub fn round_two_decimals(value: f64) -> f64 {
    let cents = value * 100.0;
    let cents = (cents * 1e6).round() / 1e6;
    cents.round() / 100.0
}

pub fn format_two_decimals(value: f64) -> String {
    if !value.is_finite() {
        return "0.00".to_string();
    }
    format!("{:.2}", round_two_decimals(value))
}

/// Aggregates shown above the watched list
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WatchedSummary {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime: f64,
}

impl WatchedSummary {
    /// Entries with an unknown remote rating or runtime are left out of that
    /// field's mean only.
    pub fn from_entries(entries: &[WatchedEntry]) -> Self {
        let imdb: Vec<f64> = entries.iter().filter_map(|e| e.imdb_rating).collect();
        let user: Vec<f64> = entries.iter().map(|e| f64::from(e.user_rating)).collect();
        let runtime: Vec<f64> = entries
            .iter()
            .filter_map(|e| e.runtime.map(f64::from))
            .collect();

        Self {
            count: entries.len(),
            avg_imdb_rating: average(&imdb),
            avg_user_rating: average(&user),
            avg_runtime: average(&runtime),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, imdb: Option<f64>, runtime: Option<u32>, user: u8) -> WatchedEntry {
        WatchedEntry {
            imdb_id: id.to_string(),
            title: id.to_string(),
            year: "2000".to_string(),
            poster: "/placeholder.png".to_string(),
            imdb_rating: imdb,
            runtime,
            user_rating: user,
            rating_decisions: 0,
            added_at: None,
        }
    }

    #[test]
    fn test_average_empty_is_zero() {
        let avg = average(&[]);
        assert_eq!(avg, 0.0);
        assert!(!avg.is_nan());
    }

    #[test]
    fn test_average_values() {
        assert_eq!(average(&[8.0, 10.0]), 9.0);
        assert_eq!(average(&[7.0]), 7.0);
    }

    #[test]
    fn test_round_half_boundaries() {
        assert_eq!(format_two_decimals(1.005), "1.01");
        assert_eq!(format_two_decimals(0.125), "0.13");
        assert_eq!(format_two_decimals(2.675), "2.68");
        assert_eq!(format_two_decimals(9.995), "10.00");
        assert_eq!(format_two_decimals(1.004999), "1.00");
        assert_eq!(format_two_decimals(-1.005), "-1.01");
    }

    #[test]
    fn test_format_plain_values() {
        assert_eq!(format_two_decimals(0.0), "0.00");
        assert_eq!(format_two_decimals(9.0), "9.00");
        assert_eq!(format_two_decimals(132.0), "132.00");
        assert_eq!(format_two_decimals(23.0 / 3.0), "7.67");
        assert_eq!(format_two_decimals(f64::NAN), "0.00");
    }

    #[test]
    fn test_summary_of_empty_list() {
        let summary = WatchedSummary::from_entries(&[]);
        assert_eq!(summary, WatchedSummary::default());
    }

    #[test]
    fn test_summary_skips_unknown_fields() {
        let entries = vec![
            entry("tt1375666", Some(8.8), Some(148), 10),
            entry("tt0088763", Some(8.5), Some(116), 9),
            entry("tt0000001", None, None, 5),
        ];

        let summary = WatchedSummary::from_entries(&entries);
        assert_eq!(summary.count, 3);
        assert_eq!(format_two_decimals(summary.avg_imdb_rating), "8.65");
        assert_eq!(summary.avg_user_rating, 8.0);
        assert_eq!(summary.avg_runtime, 132.0);
    }
}
