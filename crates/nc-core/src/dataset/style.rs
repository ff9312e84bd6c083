//! Display style of a data set: plot format and colour

use std::fmt;
use serde::{Serialize, Deserialize};

/// RGB colour used to draw a data set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GraphColour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl GraphColour {
    pub const BLACK: GraphColour = GraphColour::new(0, 0, 0);
    pub const RED: GraphColour = GraphColour::new(255, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl Default for GraphColour {
    fn default() -> Self {
        Self::BLACK
    }
}

/// Renders as `[r=255,g=0,b=0]`, the form stored in data set files
impl fmt::Display for GraphColour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[r={},g={},b={}]", self.r, self.g, self.b)
    }
}

/// How the points of a data set are drawn
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GraphFormat {
    Circles,
    #[default]
    Lines,
    ThickLines,
    Crosses,
    Points,
    BarChart,
    /// Token written by a newer version, kept verbatim
    Other(String),
}

impl GraphFormat {
    /// Token stored in the `graphFormat` parameter
    pub fn token(&self) -> &str {
        match self {
            GraphFormat::Circles => "Circles",
            GraphFormat::Lines => "Lines",
            GraphFormat::ThickLines => "Thick lines",
            GraphFormat::Crosses => "Crosses",
            GraphFormat::Points => "Points",
            GraphFormat::BarChart => "Bar chart",
            GraphFormat::Other(token) => token,
        }
    }

    /// Parse a stored token. Matching is case-insensitive; unknown tokens
    /// are kept as [`GraphFormat::Other`].
    pub fn from_token(token: &str) -> Self {
        let trimmed = token.trim();
        match trimmed.to_lowercase().as_str() {
            "circles" => GraphFormat::Circles,
            "lines" => GraphFormat::Lines,
            "thick lines" => GraphFormat::ThickLines,
            "crosses" => GraphFormat::Crosses,
            "points" => GraphFormat::Points,
            "bar chart" => GraphFormat::BarChart,
            _ => GraphFormat::Other(trimmed.to_string()),
        }
    }
}

impl fmt::Display for GraphFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}
