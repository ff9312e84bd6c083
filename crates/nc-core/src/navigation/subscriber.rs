//! History subscriber trait

use super::HistoryContext;

/// Trait for components that display the location selected by the history
pub trait HistorySubscriber: Send + Sync {
    /// Called after every navigation call with the newly selected location
    fn on_location_change(&self, context: &HistoryContext);
}
