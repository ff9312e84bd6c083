//! Data set model
//!
//! A data set is a named, described series of X/Y points plus the metadata
//! needed to plot it (axis units and legends, colour and plot format). Each
//! data set may be associated with one backing file at a time.

mod point;
mod style;

pub use point::DataPoint;
pub use style::{GraphColour, GraphFormat};

use std::fmt;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Errors raised when a data set is used out of its bounds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("The point number {index} doesn't exist, only {count} valid points")]
    PointOutOfRange { index: usize, count: usize },

    #[error("There are {0} points, not enough for an X spacing")]
    NotEnoughPoints(usize),

    #[error("X values not evenly spaced at point {index}: expected {expected}, found {found}")]
    UnevenSpacing { index: usize, expected: f64, found: f64 },
}

/// A plottable series of points with its display metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSetRecord {
    /// Short display name
    pub reference: String,

    /// Free text, may span several lines
    pub description: String,

    pub graph_format: GraphFormat,
    pub graph_colour: GraphColour,

    pub x_unit: String,
    pub y_unit: String,
    pub x_legend: String,
    pub y_legend: String,

    /// File this data set is stored in, if any
    pub backing_file: Option<PathBuf>,

    /// Points in plot order
    points: Vec<DataPoint>,
}

impl DataSetRecord {
    /// Create an empty data set drawn with black lines
    pub fn new(reference: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            description: description.into(),
            graph_format: GraphFormat::default(),
            graph_colour: GraphColour::default(),
            x_unit: String::new(),
            y_unit: String::new(),
            x_legend: String::new(),
            y_legend: String::new(),
            backing_file: None,
            points: Vec::new(),
        }
    }

    pub fn set_units(&mut self, x_unit: impl Into<String>, y_unit: impl Into<String>) {
        self.x_unit = x_unit.into();
        self.y_unit = y_unit.into();
    }

    pub fn set_legends(&mut self, x_legend: impl Into<String>, y_legend: impl Into<String>) {
        self.x_legend = x_legend.into();
        self.y_legend = y_legend.into();
    }

    pub fn backing_file(&self) -> Option<&Path> {
        self.backing_file.as_deref()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.points
    }

    pub fn point(&self, index: usize) -> Option<&DataPoint> {
        self.points.get(index)
    }

    /// Append a point and return its index
    pub fn add_point(&mut self, x: f64, y: f64) -> usize {
        self.push_point(DataPoint::new(x, y))
    }

    /// Append a fully formed point and return its index. Blank comments are dropped.
    pub fn push_point(&mut self, mut point: DataPoint) -> usize {
        if point.comment.as_deref().is_some_and(|c| c.trim().is_empty()) {
            point.comment = None;
        }
        self.points.push(point);
        self.points.len() - 1
    }

    /// Annotate a point. A blank comment removes any existing one.
    pub fn set_comment(&mut self, index: usize, comment: impl Into<String>) -> Result<(), ModelError> {
        let point = self.point_mut(index)?;
        let comment = comment.into();
        point.comment = if comment.trim().is_empty() { None } else { Some(comment) };
        Ok(())
    }

    pub fn comment(&self, index: usize) -> Option<&str> {
        self.points.get(index).and_then(|p| p.comment.as_deref())
    }

    /// Remove a point; later points (and their comments) move down by one
    pub fn delete_point(&mut self, index: usize) -> Result<DataPoint, ModelError> {
        self.check_index(index)?;
        Ok(self.points.remove(index))
    }

    pub fn set_x(&mut self, index: usize, value: f64) -> Result<(), ModelError> {
        self.point_mut(index)?.x = value;
        Ok(())
    }

    pub fn set_y(&mut self, index: usize, value: f64) -> Result<(), ModelError> {
        self.point_mut(index)?.y = value;
        Ok(())
    }

    pub fn x_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.x).collect()
    }

    pub fn y_values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }

    /// True when every x value is greater than the one before it
    pub fn are_x_strictly_increasing(&self) -> bool {
        self.points.windows(2).all(|pair| pair[1].x > pair[0].x)
    }

    pub fn max_x(&self) -> Option<&DataPoint> {
        self.extreme_by(|p| p.x, |candidate, best| candidate > best)
    }

    pub fn min_x(&self) -> Option<&DataPoint> {
        self.extreme_by(|p| p.x, |candidate, best| candidate < best)
    }

    pub fn max_y(&self) -> Option<&DataPoint> {
        self.extreme_by(|p| p.y, |candidate, best| candidate > best)
    }

    pub fn min_y(&self) -> Option<&DataPoint> {
        self.extreme_by(|p| p.y, |candidate, best| candidate < best)
    }

    /// Common spacing between consecutive x values.
    ///
    /// Spacings may drift by at most 1/500 of the previous spacing, so this is
    /// only suitable for graphing purposes.
    pub fn x_spacing(&self) -> Result<f64, ModelError> {
        if self.points.len() < 2 {
            return Err(ModelError::NotEnoughPoints(self.points.len()));
        }

        let mut spacing = self.points[1].x - self.points[0].x;
        for (i, pair) in self.points.windows(2).enumerate().skip(1) {
            let next = pair[1].x - pair[0].x;
            if (next - spacing).abs() > spacing.abs() / 500.0 {
                return Err(ModelError::UnevenSpacing {
                    index: i + 1,
                    expected: spacing,
                    found: next,
                });
            }
            spacing = next;
        }
        Ok(spacing)
    }

    /// The y value of the first point at exactly `x`
    pub fn y_at(&self, x: f64) -> Option<f64> {
        self.points.iter().find(|p| p.x == x).map(|p| p.y)
    }

    /// Reference with characters that are awkward in identifiers replaced
    pub fn safe_reference(&self) -> String {
        self.reference
            .chars()
            .filter(|c| *c != '(' && *c != ')')
            .map(|c| match c {
                ' ' | '-' | ':' | '+' | '/' | '.' => '_',
                other => other,
            })
            .collect()
    }

    fn check_index(&self, index: usize) -> Result<(), ModelError> {
        if index < self.points.len() {
            Ok(())
        } else {
            Err(ModelError::PointOutOfRange { index, count: self.points.len() })
        }
    }

    fn point_mut(&mut self, index: usize) -> Result<&mut DataPoint, ModelError> {
        self.check_index(index)?;
        Ok(&mut self.points[index])
    }

    fn extreme_by(
        &self,
        key: impl Fn(&DataPoint) -> f64,
        better: impl Fn(f64, f64) -> bool,
    ) -> Option<&DataPoint> {
        let mut best: Option<&DataPoint> = None;
        for point in &self.points {
            if best.map_or(true, |current| better(key(point), key(current))) {
                best = Some(point);
            }
        }
        best
    }
}

/// Short summary: first two points, and the last one when there are more
impl fmt::Display for DataSetRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataSet: {} [", self.reference)?;
        let n = self.points.len();
        for (i, point) in self.points.iter().take(2).enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", point)?;
        }
        if n == 3 {
            write!(f, ", {}", self.points[2])?;
        } else if n > 3 {
            write!(f, ", ... , {}", self.points[n - 1])?;
        }
        write!(f, "] ({} points)", n)
    }
}
