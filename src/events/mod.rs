mod channel;

pub use channel::{Channel, Listener, SubscriptionId};

/// Implemented by anything that folds a stream of events into its own state.
pub trait EventHandler<T> {
    fn handle_event(&mut self, event: &T);
}
