//! Pull-based decoder for data set files

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use nc_core::{DataSetRecord, GraphFormat};
use tracing::{debug, info, warn};

use super::colour::parse_colour;
use super::line::{classify, parse_point, Line};
use super::{param, unescape, LoadMode};
use crate::config::DataSetConfig;
use crate::{DataError, DataResult};

/// Where the decoder is in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecodeState {
    /// Only blank and comment lines seen so far
    ReadingHeader,
    /// At least one point line consumed
    ReadingPoints,
    /// No more lines wanted
    Done,
}

struct Decoder<'p> {
    path: &'p Path,
    mode: LoadMode,
    state: DecodeState,
    record: DataSetRecord,
    declared_points: Option<usize>,
}

impl<'p> Decoder<'p> {
    fn new(path: &'p Path, mode: LoadMode, config: &DataSetConfig) -> Self {
        let reference = fallback_reference(path, config);
        let description = format!("Data loaded from file: {}", path.display());

        let mut record = DataSetRecord::new(reference, description);
        record.backing_file = Some(path.to_path_buf());

        Self {
            path,
            mode,
            state: DecodeState::ReadingHeader,
            record,
            declared_points: None,
        }
    }

    fn is_done(&self) -> bool {
        self.state == DecodeState::Done
    }

    /// Consume one line; `line_number` is 1-based
    fn feed(&mut self, line_number: usize, raw: &str) -> DataResult<()> {
        match classify(raw) {
            Line::Blank => {}
            Line::Parameter { name, value } => {
                self.apply_parameter(name, value)
                    .map_err(|reason| self.format_error(line_number, raw, reason))?;
            }
            Line::Comment(text) => {
                debug!("Unknown comment: ({})", text);
            }
            Line::Point(text) => {
                if self.mode == LoadMode::HeaderOnly {
                    self.state = DecodeState::Done;
                    return Ok(());
                }
                let point = parse_point(text)
                    .map_err(|reason| self.format_error(line_number, raw, reason))?;
                self.record.push_point(point);
                self.state = DecodeState::ReadingPoints;
            }
        }
        Ok(())
    }

    fn apply_parameter(&mut self, name: &str, value: &str) -> Result<(), String> {
        debug!("Found param: {}, its value is: {}", name, value);
        match name {
            param::NUM_POINTS => match value.trim().parse::<usize>() {
                Ok(count) => self.declared_points = Some(count),
                Err(_) => warn!("Ignoring non-numeric {} in {}: {:?}", name, self.path.display(), value),
            },
            param::REFERENCE => self.record.reference = unescape(value),
            param::DESCRIPTION => self.record.description = unescape(value),
            param::GRAPH_FORMAT => self.record.graph_format = GraphFormat::from_token(&unescape(value)),
            param::GRAPH_COLOUR => {
                self.record.graph_colour = parse_colour(value).map_err(|e| e.to_string())?;
            }
            param::X_UNITS => self.record.x_unit = unescape(value),
            param::Y_UNITS => self.record.y_unit = unescape(value),
            param::X_LEGEND => self.record.x_legend = unescape(value),
            param::Y_LEGEND => self.record.y_legend = unescape(value),
            _ => warn!("Ignoring unknown parameter {:?} in {}", name, self.path.display()),
        }
        Ok(())
    }

    fn format_error(&self, line: usize, raw: &str, reason: String) -> DataError {
        DataError::Format {
            path: self.path.to_path_buf(),
            line,
            text: raw.to_string(),
            reason,
        }
    }

    fn finish(self) -> DataSetRecord {
        if self.mode == LoadMode::Full {
            if let Some(declared) = self.declared_points {
                if declared != self.record.len() {
                    debug!(
                        "{} declares {} points but holds {}",
                        self.path.display(),
                        declared,
                        self.record.len()
                    );
                }
            }
        }
        self.record
    }
}

/// Reference used when a file has no `reference` parameter: the file name
/// without the configured extension
fn fallback_reference(path: &Path, config: &DataSetConfig) -> String {
    match path.file_name().and_then(|n| n.to_str()) {
        Some(name) if config.matches_extension(name) => config.strip_extension(name).to_string(),
        _ => path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string(),
    }
}

/// Decode from any source of lines, pulling only as many lines as the mode needs
pub(crate) fn decode_lines<I>(
    lines: I,
    path: &Path,
    mode: LoadMode,
    config: &DataSetConfig,
) -> DataResult<DataSetRecord>
where
    I: IntoIterator<Item = io::Result<String>>,
{
    let mut decoder = Decoder::new(path, mode, config);
    for (index, line) in lines.into_iter().enumerate() {
        let line = line.map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => DataError::Format {
                path: path.to_path_buf(),
                line: index + 1,
                text: String::new(),
                reason: "line is not valid UTF-8".to_string(),
            },
            _ => DataError::Io(e),
        })?;
        decoder.feed(index + 1, &line)?;
        if decoder.is_done() {
            break;
        }
    }
    Ok(decoder.finish())
}

/// Decode data set text already in memory. `path` becomes the backing file.
pub fn decode_str(text: &str, path: &Path, mode: LoadMode) -> DataResult<DataSetRecord> {
    decode_str_with_config(text, path, mode, &DataSetConfig::default())
}

/// Decode in-memory text, naming unreferenced data sets after `config`'s extension
pub fn decode_str_with_config(
    text: &str,
    path: &Path,
    mode: LoadMode,
    config: &DataSetConfig,
) -> DataResult<DataSetRecord> {
    decode_lines(text.lines().map(|line| Ok(line.to_string())), path, mode, config)
}

/// Read a data set file
pub fn read(path: &Path, mode: LoadMode) -> DataResult<DataSetRecord> {
    read_with_config(path, mode, &DataSetConfig::default())
}

/// Read a data set file stored under `config`'s extension
pub fn read_with_config(path: &Path, mode: LoadMode, config: &DataSetConfig) -> DataResult<DataSetRecord> {
    let file = File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => DataError::NotFound { path: path.to_path_buf() },
        _ => DataError::Io(e),
    })?;

    let record = decode_lines(BufReader::new(file).lines(), path, mode, config)?;
    info!(
        "Loaded data set {:?} from {} ({:?}, {} points)",
        record.reference,
        path.display(),
        mode,
        record.len()
    );
    Ok(record)
}

/// Read a whole data set file, points included
pub fn load(path: &Path) -> DataResult<DataSetRecord> {
    read(path, LoadMode::Full)
}

/// Read only the header metadata of a data set file, stopping at the first point
pub fn load_partial(path: &Path) -> DataResult<DataSetRecord> {
    read(path, LoadMode::HeaderOnly)
}
