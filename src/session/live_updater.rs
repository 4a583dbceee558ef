use log::trace;
use std::time::{Duration, Instant};

use crate::events::{Channel, SubscriptionId};
use crate::model::{GameplayStats, ScoreDelta};
use crate::scoring::ScoringEngine;

pub const DEFAULT_DEBOUNCE_WINDOW: Duration = Duration::from_millis(100);

/// Trailing-edge debounce around live scoring. The owning loop calls
/// `submit` on every gameplay change and `poll` on every frame; bursts within
/// the window collapse into one recomputation of the latest snapshot.
pub struct LiveScoreUpdater {
    engine: ScoringEngine,
    window: Duration,
    pending: Option<(GameplayStats, Instant)>,
    last_seen: Option<GameplayStats>,
    updates: Channel<ScoreDelta>,
}

impl LiveScoreUpdater {
    pub fn new(engine: ScoringEngine, window: Duration) -> Self {
        Self {
            engine,
            window,
            pending: None,
            last_seen: None,
            updates: Channel::new(),
        }
    }

    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&ScoreDelta) + 'static,
    {
        self.updates.subscribe(callback)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.updates.unsubscribe(id)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replaces any pending snapshot and restarts the window.
    pub fn submit(&mut self, stats: &GameplayStats, now: Instant) {
        self.pending = Some((stats.clone(), now));
    }

    /// Fires when the latest submission has been quiet for the whole window.
    pub fn poll(&mut self, now: Instant) -> Option<ScoreDelta> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, submitted)| now.saturating_duration_since(*submitted) >= self.window);
        if ready {
            self.flush()
        } else {
            None
        }
    }

    /// Fires immediately if anything is pending.
    pub fn flush(&mut self) -> Option<ScoreDelta> {
        let (stats, _) = self.pending.take()?;
        let delta = self
            .engine
            .calculate_score_delta(self.last_seen.as_ref(), &stats);
        trace!(
            target: "live_score",
            "Live score {} ({:+}, {})",
            delta.new_score,
            delta.delta,
            delta.reason
        );
        self.last_seen = Some(stats);
        self.updates.emit(&delta);
        Some(delta)
    }

    /// Drops the pending update and the last-seen snapshot; the next update
    /// reports as a game start.
    pub fn reset(&mut self) {
        self.pending = None;
        self.last_seen = None;
    }
}
