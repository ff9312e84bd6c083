//! Parser for the `graphColour` parameter value, `[r=<int>,g=<int>,b=<int>]`

use nc_core::GraphColour;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColourParseError {
    #[error("colour is missing {0:?}")]
    MissingDelimiter(&'static str),

    #[error("colour component {component} is not an integer in 0-255: {value:?}")]
    InvalidComponent { component: char, value: String },
}

/// Parse a colour by locating `r=`, `,g=`, `,b=` and `]` in turn.
///
/// Text before `r=` is ignored, so values written as `java.awt.Color[r=..]`
/// by older versions still load.
pub fn parse_colour(value: &str) -> Result<GraphColour, ColourParseError> {
    let (_, rest) = split(value, "r=")?;
    let (red, rest) = split(rest, ",g=")?;
    let (green, rest) = split(rest, ",b=")?;
    let (blue, _) = split(rest, "]")?;

    Ok(GraphColour::new(
        component('r', red)?,
        component('g', green)?,
        component('b', blue)?,
    ))
}

fn split<'a>(text: &'a str, delimiter: &'static str) -> Result<(&'a str, &'a str), ColourParseError> {
    text.split_once(delimiter)
        .ok_or(ColourParseError::MissingDelimiter(delimiter))
}

fn component(name: char, value: &str) -> Result<u8, ColourParseError> {
    let invalid = || ColourParseError::InvalidComponent {
        component: name,
        value: value.to_string(),
    };
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    value.parse::<u8>().map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_colour() {
        assert_eq!(parse_colour("[r=255,g=0,b=0]"), Ok(GraphColour::RED));
        assert_eq!(parse_colour("[r=12,g=34,b=56]"), Ok(GraphColour::new(12, 34, 56)));
        assert_eq!(
            parse_colour("java.awt.Color[r=0,g=128,b=255]"),
            Ok(GraphColour::new(0, 128, 255))
        );
    }

    #[test]
    fn test_display_round_trip() {
        let colour = GraphColour::new(7, 8, 9);
        assert_eq!(parse_colour(&colour.to_string()), Ok(colour));
    }

    #[test]
    fn test_missing_delimiters() {
        assert_eq!(parse_colour("red"), Err(ColourParseError::MissingDelimiter("r=")));
        assert_eq!(parse_colour("[r=1;g=2;b=3]"), Err(ColourParseError::MissingDelimiter(",g=")));
        assert_eq!(parse_colour("[r=1,g=2]"), Err(ColourParseError::MissingDelimiter(",b=")));
        assert_eq!(parse_colour("[r=1,g=2,b=3"), Err(ColourParseError::MissingDelimiter("]")));
    }

    #[test]
    fn test_invalid_components() {
        assert!(matches!(
            parse_colour("[r=256,g=0,b=0]"),
            Err(ColourParseError::InvalidComponent { component: 'r', .. })
        ));
        assert!(matches!(
            parse_colour("[r=0,g=-1,b=0]"),
            Err(ColourParseError::InvalidComponent { component: 'g', .. })
        ));
        assert!(matches!(
            parse_colour("[r=0,g=0,b=]"),
            Err(ColourParseError::InvalidComponent { component: 'b', .. })
        ));
        assert!(matches!(
            parse_colour("[r=0,g=0,b= 1]"),
            Err(ColourParseError::InvalidComponent { component: 'b', .. })
        ));
    }
}
