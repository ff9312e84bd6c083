use std::fmt;
use serde::{Serialize, Deserialize};

/// A single plotted point, with an optional annotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
    pub comment: Option<String>,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, comment: None }
    }

    pub fn with_comment(x: f64, y: f64, comment: impl Into<String>) -> Self {
        Self { x, y, comment: Some(comment.into()) }
    }
}

impl fmt::Display for DataPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?})", self.x, self.y)
    }
}
