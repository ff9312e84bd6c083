//! Reading and writing data set files
//!
//! A data set file is line oriented text. Comment lines start with `//`
//! (`#` is also accepted on load); comments of the form `//@name=value` carry
//! the data set's metadata. Every other non-blank line holds one point,
//! `x, y` or `x y`, with an optional `// comment` after a comma separated
//! pair.

mod colour;
mod decoder;
mod encoder;
mod line;

pub use colour::{parse_colour, ColourParseError};
pub use decoder::{decode_str, decode_str_with_config, load, load_partial, read, read_with_config};
pub use encoder::{encode, save, FILE_HEADER};

/// Comment marker
pub const COMMENT: &str = "//";

/// Alternative comment marker accepted on load
pub const COMMENT_ALT: &str = "#";

/// Marks a comment as a parameter
pub const PARAM_PREFIX: &str = "@";

/// Recognised parameter names
pub mod param {
    pub const NUM_POINTS: &str = "numPoints";
    pub const REFERENCE: &str = "reference";
    pub const DESCRIPTION: &str = "description";
    pub const GRAPH_FORMAT: &str = "graphFormat";
    pub const GRAPH_COLOUR: &str = "graphColour";
    pub const X_UNITS: &str = "xUnits";
    pub const Y_UNITS: &str = "yUnits";
    pub const X_LEGEND: &str = "xLegend";
    pub const Y_LEGEND: &str = "yLegend";
}

/// Newline token used inside parameter values
const NEWLINE_TOKEN: &str = "\\n";

fn escape(value: &str) -> String {
    value.replace('\n', NEWLINE_TOKEN)
}

fn unescape(value: &str) -> String {
    value.replace(NEWLINE_TOKEN, "\n")
}

/// How much of a file to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// Metadata and every point
    Full,
    /// Metadata only; reading stops at the first point line
    HeaderOnly,
}
