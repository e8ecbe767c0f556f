/// Local placeholder used when the remote has no poster
pub const PLACEHOLDER_POSTER: &str = "/placeholder.png";

const UNAVAILABLE: &str = "N/A";

/// Normalize a poster URL for display and storage.
///
/// Missing, empty and "N/A" posters map to [`PLACEHOLDER_POSTER`]; plain
/// `http://` URLs are upgraded to `https://`. Anything else is returned as-is.
pub fn sanitize_poster(poster: Option<&str>) -> String {
    let poster = match poster.map(str::trim) {
        Some(p) if !p.is_empty() && p != UNAVAILABLE => p,
        _ => return PLACEHOLDER_POSTER.to_string(),
    };

    match poster.get(..7) {
        Some(scheme) if scheme.eq_ignore_ascii_case("http://") => {
            format!("https://{}", &poster[7..])
        }
        _ => poster.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unavailable_poster_uses_placeholder() {
        assert_eq!(sanitize_poster(Some("N/A")), PLACEHOLDER_POSTER);
        assert_eq!(sanitize_poster(Some("")), PLACEHOLDER_POSTER);
        assert_eq!(sanitize_poster(None), PLACEHOLDER_POSTER);
    }

    #[test]
    fn test_insecure_poster_upgraded() {
        assert_eq!(
            sanitize_poster(Some("http://m.media-amazon.com/images/a.jpg")),
            "https://m.media-amazon.com/images/a.jpg"
        );
        assert_eq!(
            sanitize_poster(Some("HTTP://example.com/p.jpg")),
            "https://example.com/p.jpg"
        );
    }

    #[test]
    fn test_secure_poster_unchanged() {
        let url = "https://m.media-amazon.com/images/M/MV5B._V1_SX300.jpg";
        assert_eq!(sanitize_poster(Some(url)), url);
    }
}
