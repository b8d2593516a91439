use super::state::AppState;
use crate::{FeedUpdate, KeyValueStore};

/// Process the current state (e.g., publish a finished popular fetch).
pub fn process_state<S: KeyValueStore>(state: &mut AppState<S>) {
    match state.feed.poll() {
        FeedUpdate::Ready(movies) => {
            state.set_status(format!("Loaded {} popular movies", movies.len()));
            state.publish_popular(movies);
        }
        // The cause is in the log; the list keeps what it had.
        FeedUpdate::Failed => {
            state.loading = false;
            state.clear_status();
        }
        FeedUpdate::Loading => state.loading = true,
        FeedUpdate::Idle => state.loading = false,
    }
}
