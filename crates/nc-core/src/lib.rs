//! Core model for the neuroConstruct data set tools
//!
//! This crate provides the in-memory data set record plotted by the
//! viewers, and the navigation history used by the help viewer.

pub mod dataset;
pub mod navigation;

// Re-export commonly used types
pub use dataset::{DataPoint, DataSetRecord, GraphColour, GraphFormat, ModelError};
pub use navigation::{BrowsingHistory, HistoryContext, HistorySubscriber};
