//! Line classification and point-line parsing

use nc_core::DataPoint;

use super::{COMMENT, COMMENT_ALT, PARAM_PREFIX};

/// What a single line of a data set file holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Line<'a> {
    Blank,
    /// `//@name=value`
    Parameter { name: &'a str, value: &'a str },
    /// Any other comment, with the marker stripped
    Comment(&'a str),
    /// Anything else; expected to hold an x/y pair
    Point(&'a str),
}

/// Classify a raw line. Surrounding whitespace is ignored, including around
/// parameter values, so padded values do not survive a save and load.
pub(crate) fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }

    let Some(comment) = line
        .strip_prefix(COMMENT)
        .or_else(|| line.strip_prefix(COMMENT_ALT))
    else {
        return Line::Point(line);
    };

    let comment = comment.trim();
    if let Some((name, value)) = comment
        .strip_prefix(PARAM_PREFIX)
        .and_then(|param| param.split_once('='))
    {
        return Line::Parameter { name, value: value.trim() };
    }
    Line::Comment(comment)
}

/// Parse `x, y  // comment` or `x y`.
///
/// A comma takes precedence over whitespace as the field separator. Inline
/// comments are only recognised on comma separated lines and are trimmed, so
/// leading or trailing spaces in a comment are lost on reload.
pub(crate) fn parse_point(line: &str) -> Result<DataPoint, String> {
    if let Some((x_field, rest)) = line.split_once(',') {
        let (y_field, comment) = match rest.split_once(COMMENT) {
            Some((y_field, comment)) => (y_field, Some(comment.trim())),
            None => (rest, None),
        };
        let x = parse_value(x_field, "x")?;
        let y = parse_value(y_field, "y")?;
        let comment = comment.filter(|c| !c.is_empty()).map(str::to_string);
        return Ok(DataPoint { x, y, comment });
    }

    match line.split_once(char::is_whitespace) {
        Some((x_field, y_field)) => {
            let x = parse_value(x_field, "x")?;
            let y = parse_value(y_field, "y")?;
            Ok(DataPoint::new(x, y))
        }
        None => Err("expected two values separated by a comma or whitespace".to_string()),
    }
}

fn parse_value(field: &str, axis: &str) -> Result<f64, String> {
    let field = field.trim();
    field
        .parse::<f64>()
        .map_err(|_| format!("{} value {:?} is not a number", axis, field))
}
