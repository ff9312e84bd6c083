//! Browsing history implementation

use super::{HistoryContext, HistorySubscriber};
use std::sync::{Arc, Weak};
use parking_lot::RwLock;
use tracing::debug;

/// History state stored internally
#[derive(Debug, Clone, Default)]
struct HistoryState {
    entries: Vec<String>,
    index: usize,
}

impl HistoryState {
    /// Drop every entry after the current index (the abandoned forward branch)
    fn truncate_forward(&mut self) {
        if self.entries.len() > self.index + 1 {
            debug!(
                "Truncating history after index {}, dropping {:?}",
                self.index,
                &self.entries[self.index + 1..]
            );
            self.entries.truncate(self.index + 1);
        }
    }

    fn push(&mut self, location: String) -> String {
        self.truncate_forward();
        self.entries.push(location);
        self.index = self.entries.len() - 1;
        self.entries[self.index].clone()
    }

    fn selected(&self) -> Option<String> {
        self.entries.get(self.index).cloned()
    }
}

/// Linear navigation history with browser-style branch truncation.
///
/// Meant to be driven from the UI event thread; the lock only guards against
/// the history being shared between widgets.
pub struct BrowsingHistory {
    state: RwLock<HistoryState>,
    subscribers: RwLock<Vec<Weak<dyn HistorySubscriber>>>,
}

impl BrowsingHistory {
    /// Create an empty history
    pub fn new() -> Self {
        Self {
            state: RwLock::new(HistoryState::default()),
            subscribers: RwLock::new(Vec::new()),
        }
    }

    /// Create a history seeded with its start page
    pub fn with_start_page(location: impl Into<String>) -> Self {
        let history = Self::new();
        history.state.write().push(location.into());
        history
    }

    /// Navigate to a new location, discarding any forward entries
    pub fn add_new_page(&self, location: impl Into<String>) -> String {
        let location = location.into();
        debug!("Adding new page to history: {}", location);

        let selected = self.state.write().push(location);
        self.notify_subscribers();
        selected
    }

    /// Navigate anew to the first page ever recorded.
    ///
    /// This appends a copy of the first entry rather than moving the index
    /// back to 0, so repeated use grows the history.
    pub fn start_page(&self) -> Option<String> {
        let mut state = self.state.write();
        let first = state.entries.first().cloned()?;
        debug!("Returning to start page: {}", first);
        let selected = state.push(first);
        drop(state);

        self.notify_subscribers();
        Some(selected)
    }

    /// Step back one entry; stays put at the start of the history
    pub fn prev_page(&self) -> Option<String> {
        let mut state = self.state.write();
        if state.index > 0 {
            state.index -= 1;
        }
        let selected = state.selected()?;
        debug!("Back to history entry {}: {}", state.index, selected);
        drop(state);

        self.notify_subscribers();
        Some(selected)
    }

    /// Step forward one entry; stays put at the end of the history
    pub fn next_page(&self) -> Option<String> {
        let mut state = self.state.write();
        if state.index + 1 < state.entries.len() {
            state.index += 1;
        }
        let selected = state.selected()?;
        debug!("Forward to history entry {}: {}", state.index, selected);
        drop(state);

        self.notify_subscribers();
        Some(selected)
    }

    /// Currently selected location
    pub fn current(&self) -> Option<String> {
        self.state.read().selected()
    }

    pub fn index(&self) -> usize {
        self.state.read().index
    }

    pub fn len(&self) -> usize {
        self.state.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().entries.is_empty()
    }

    pub fn entries(&self) -> Vec<String> {
        self.state.read().entries.clone()
    }

    pub fn can_go_back(&self) -> bool {
        self.state.read().index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        let state = self.state.read();
        state.index + 1 < state.entries.len()
    }

    /// Get the current history context, `None` before any page is visited
    pub fn get_context(&self) -> Option<HistoryContext> {
        let state = self.state.read();
        state.selected().map(|location| HistoryContext {
            location,
            index: state.index,
            len: state.entries.len(),
        })
    }

    /// Add a subscriber
    pub fn add_subscriber(&self, subscriber: Arc<dyn HistorySubscriber>) {
        self.subscribers.write().push(Arc::downgrade(&subscriber));
    }

    /// Notify all subscribers of the selected location
    fn notify_subscribers(&self) {
        let Some(context) = self.get_context() else {
            return;
        };
        let mut subscribers = self.subscribers.write();

        // Remove any dead weak references
        subscribers.retain(|weak| weak.strong_count() > 0);

        for weak in subscribers.iter() {
            if let Some(subscriber) = weak.upgrade() {
                subscriber.on_location_change(&context);
            }
        }
    }
}

impl Default for BrowsingHistory {
    fn default() -> Self {
        Self::new()
    }
}
