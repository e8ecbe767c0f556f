pub mod movie;
pub mod poster;
pub mod watched;

pub use movie::{MovieDetail, SearchResultItem, parse_runtime_minutes};
pub use poster::{sanitize_poster, PLACEHOLDER_POSTER};
pub use watched::{WatchedEntry, MAX_USER_RATING, MIN_USER_RATING};
