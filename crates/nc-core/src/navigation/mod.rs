//! Back/forward/home navigation for the in-app document viewer

mod history;
mod subscriber;

pub use history::BrowsingHistory;
pub use subscriber::HistorySubscriber;

/// Context passed to subscribers after each navigation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryContext {
    /// Location now selected
    pub location: String,
    /// Index of the selected location
    pub index: usize,
    /// Number of entries in the history
    pub len: usize,
}

impl HistoryContext {
    pub fn can_go_back(&self) -> bool {
        self.index > 0
    }

    pub fn can_go_forward(&self) -> bool {
        self.index + 1 < self.len
    }
}
