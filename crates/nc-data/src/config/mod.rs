//! Configuration for the data set directory

use std::fs;
use std::path::{Path, PathBuf};
use serde::{Serialize, Deserialize};
use tracing::info;

use crate::DataError;

/// Extension of data set files
pub const DEFAULT_EXTENSION: &str = ".ds";

/// Prefix of suggested names for new data sets
pub const DEFAULT_NAME_PREFIX: &str = "DataSet_";

/// Where data sets live and how they are named and listed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSetConfig {
    /// Directory holding the data set files
    pub directory: PathBuf,

    /// File extension, including the leading dot
    pub extension: String,

    /// Prefix used when suggesting names for new data sets
    pub name_prefix: String,

    /// `chrono` format string for the "last saved" column
    pub timestamp_format: String,
}

impl Default for DataSetConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("dataSets"),
            extension: DEFAULT_EXTENSION.to_string(),
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            timestamp_format: "%-H:%M (%b %-d, %y)".to_string(),
        }
    }
}

impl DataSetConfig {
    /// Create a configuration for a data set directory
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            ..Self::default()
        }
    }

    /// Whether a file name carries the data set extension
    pub fn matches_extension(&self, file_name: &str) -> bool {
        file_name.len() > self.extension.len() && file_name.ends_with(&self.extension)
    }

    /// Strip the data set extension from a file name, if present
    pub fn strip_extension<'a>(&self, file_name: &'a str) -> &'a str {
        if self.matches_extension(file_name) {
            &file_name[..file_name.len() - self.extension.len()]
        } else {
            file_name
        }
    }

    /// File name for a data set reference: spaces and colons become underscores
    pub fn file_name_for(&self, reference: &str) -> String {
        let name: String = reference
            .chars()
            .map(|c| if c == ' ' || c == ':' { '_' } else { c })
            .collect();
        format!("{}{}", name, self.extension)
    }

    /// Path of the file that stores a data set with this reference.
    ///
    /// The file must land directly in the data set directory, so blank
    /// references, path separators and `.`/`..` are rejected.
    pub fn path_for(&self, reference: &str) -> Result<PathBuf, DataError> {
        let trimmed = reference.trim();
        if trimmed.is_empty()
            || trimmed == "."
            || trimmed == ".."
            || reference.contains(['/', '\\', '\0'])
        {
            return Err(DataError::InvalidName(reference.to_string()));
        }
        Ok(self.directory.join(self.file_name_for(reference)))
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self, DataError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => DataError::NotFound { path: path.to_path_buf() },
            _ => DataError::Io(e),
        })?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        info!("Loaded data set config from {}", path.display());
        Ok(config)
    }

    /// Save the configuration as pretty-printed JSON
    pub fn save_json_file(&self, path: &Path) -> Result<(), DataError> {
        let text = serde_json::to_string_pretty(self)?;
        fs::write(path, text)?;
        Ok(())
    }

    fn validate(&self) -> Result<(), DataError> {
        if self.extension.is_empty() {
            return Err(DataError::Config("extension must not be empty".to_string()));
        }
        if self.name_prefix.trim().is_empty() {
            return Err(DataError::Config("name_prefix must not be blank".to_string()));
        }
        Ok(())
    }
}
