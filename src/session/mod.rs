mod gameplay_event;
mod live_updater;
mod score_session;

pub use gameplay_event::GameplayEvent;
pub use live_updater::{LiveScoreUpdater, DEFAULT_DEBOUNCE_WINDOW};
pub use score_session::{CompletedSession, ScoreSession};
