pub mod search;
pub mod selection;
pub mod stats;
pub mod store;
pub mod view_model;

#[cfg(test)]
mod test_support;

pub use search::{SearchEngine, SearchState, FAILURE_MESSAGE, NOT_FOUND_MESSAGE};
pub use selection::{DetailTicket, Selection, SelectionError, SelectionState, DEFAULT_WINDOW_TITLE};
pub use stats::{average, format_two_decimals, round_two_decimals, WatchedSummary};
pub use store::{WatchedList, WatchedStore, WATCHED_SLOT};
pub use view_model::{ViewModel, ViewState};
