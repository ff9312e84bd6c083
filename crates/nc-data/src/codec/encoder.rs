//! Writing data sets back to their text format

use std::fs::File;
use std::io::{BufWriter, Write};
use nc_core::DataSetRecord;
use tracing::info;

use super::{escape, param, COMMENT, PARAM_PREFIX};
use crate::{DataError, DataResult};

/// First line of every saved data set file
pub const FILE_HEADER: &str = "This is a file storing the contents of a neuroConstruct Data Set, \
along with some other information to facilitate management/display of the Data Set";

/// Parameter values are single line; newlines are written as the `\n` token
fn param_line(out: &mut String, name: &str, value: &str) {
    out.push_str(&format!("{}{}{}={}\n", COMMENT, PARAM_PREFIX, name, escape(value)));
}

/// Render a data set in the line-oriented file format
pub fn encode(record: &DataSetRecord) -> String {
    let mut out = format!("{} {}\n", COMMENT, FILE_HEADER);

    param_line(&mut out, param::NUM_POINTS, &record.len().to_string());
    param_line(&mut out, param::REFERENCE, &record.reference);
    param_line(&mut out, param::DESCRIPTION, &record.description);
    param_line(&mut out, param::GRAPH_FORMAT, record.graph_format.token());
    param_line(&mut out, param::GRAPH_COLOUR, &record.graph_colour.to_string());
    param_line(&mut out, param::X_UNITS, &record.x_unit);
    param_line(&mut out, param::Y_UNITS, &record.y_unit);
    param_line(&mut out, param::X_LEGEND, &record.x_legend);
    param_line(&mut out, param::Y_LEGEND, &record.y_legend);

    // {:?} keeps the shortest representation that parses back exactly
    for point in record.points() {
        match &point.comment {
            Some(comment) => out.push_str(&format!(
                "{:?}, {:?}  {} {}\n",
                point.x,
                point.y,
                COMMENT,
                comment.replace('\n', " ")
            )),
            None => out.push_str(&format!("{:?}, {:?}\n", point.x, point.y)),
        }
    }
    out
}

/// Overwrite the record's backing file with its current contents
pub fn save(record: &DataSetRecord) -> DataResult<()> {
    let path = record
        .backing_file()
        .ok_or_else(|| DataError::NoBackingFile(record.reference.clone()))?;

    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(encode(record).as_bytes())?;
    writer.flush()?;

    info!("Saved data set {:?} to {}", record.reference, path.display());
    Ok(())
}
