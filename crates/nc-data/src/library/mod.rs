//! Listing and management of the data sets stored in one directory
//!
//! Listing only decodes the metadata block of each file; the points of a
//! data set are read when a row is loaded.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use chrono::{DateTime, Local};
use nc_core::{DataSetRecord, GraphColour, GraphFormat};
use parking_lot::RwLock;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::codec::{read_with_config, save, LoadMode};
use crate::config::DataSetConfig;
use crate::{DataError, DataResult};

/// Description given to newly created data sets
pub const NEW_DESCRIPTION: &str = "-- No description --";

/// One row of the listing
#[derive(Debug, Clone)]
pub struct DataSetEntry {
    /// File holding the data set
    pub path: PathBuf,
    /// Last modification time of the file
    pub modified: Option<SystemTime>,
    /// Metadata decoded from the file; holds no points
    pub summary: DataSetRecord,
}

impl DataSetEntry {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unknown")
            .to_string()
    }

    pub fn reference(&self) -> &str {
        &self.summary.reference
    }

    pub fn description(&self) -> &str {
        &self.summary.description
    }

    /// Modification time rendered with a `chrono` format string
    pub fn last_saved(&self, format: &str) -> String {
        match self.modified {
            Some(time) => DateTime::<Local>::from(time).format(format).to_string(),
            None => "-".to_string(),
        }
    }
}

/// The data sets of a directory, oldest first
pub struct DataSetLibrary {
    config: DataSetConfig,
    entries: RwLock<Vec<DataSetEntry>>,
}

impl DataSetLibrary {
    /// Create an empty library; call [`DataSetLibrary::refresh`] to fill it
    pub fn new(config: DataSetConfig) -> Self {
        Self {
            config,
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Create a library and list its directory
    pub fn open(config: DataSetConfig) -> DataResult<Self> {
        let library = Self::new(config);
        library.refresh()?;
        Ok(library)
    }

    pub fn config(&self) -> &DataSetConfig {
        &self.config
    }

    pub fn directory(&self) -> &Path {
        &self.config.directory
    }

    /// Re-read the directory, returning the number of data sets found.
    ///
    /// Files that fail to decode are logged and left out of the listing. A
    /// missing directory lists as empty.
    pub fn refresh(&self) -> DataResult<usize> {
        let dir = &self.config.directory;
        debug!("Refreshing data sets in {}", dir.display());

        if !dir.exists() {
            self.entries.write().clear();
            return Ok(0);
        }

        let mut candidates = Vec::new();
        for dir_entry in fs::read_dir(dir)? {
            let dir_entry = dir_entry?;
            let metadata = dir_entry.metadata()?;
            let name = dir_entry.file_name();
            let matches = name
                .to_str()
                .is_some_and(|n| self.config.matches_extension(n));
            if metadata.is_file() && matches {
                candidates.push((dir_entry.path(), metadata.modified().ok()));
            }
        }

        let config = &self.config;
        let mut entries: Vec<DataSetEntry> = candidates
            .into_par_iter()
            .filter_map(|(path, modified)| match read_with_config(&path, LoadMode::HeaderOnly, config) {
                Ok(summary) => Some(DataSetEntry { path, modified, summary }),
                Err(e) => {
                    warn!("Skipping invalid data set {}: {}", path.display(), e);
                    None
                }
            })
            .collect();

        entries.sort_by(|a, b| a.modified.cmp(&b.modified).then_with(|| a.path.cmp(&b.path)));

        let count = entries.len();
        *self.entries.write() = entries;
        info!("Found {} data sets in {}", count, dir.display());
        Ok(count)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    pub fn entries(&self) -> Vec<DataSetEntry> {
        self.entries.read().clone()
    }

    pub fn entry(&self, row: usize) -> DataResult<DataSetEntry> {
        let entries = self.entries.read();
        entries.get(row).cloned().ok_or(DataError::InvalidRow {
            row,
            count: entries.len(),
        })
    }

    pub fn references(&self) -> Vec<String> {
        self.entries
            .read()
            .iter()
            .map(|e| e.summary.reference.clone())
            .collect()
    }

    /// Row of the data set with this reference
    pub fn find(&self, reference: &str) -> Option<usize> {
        self.entries
            .read()
            .iter()
            .position(|e| e.summary.reference == reference)
    }

    /// Fully load the data set behind a row
    pub fn load(&self, row: usize) -> DataResult<DataSetRecord> {
        let entry = self.entry(row)?;
        read_with_config(&entry.path, LoadMode::Full, &self.config)
    }

    /// First `<prefix><n>` name not already used as a reference
    pub fn suggest_name(&self) -> String {
        let references = self.references();
        (0..)
            .map(|n| format!("{}{}", self.config.name_prefix, n))
            .find(|name| !references.contains(name))
            .unwrap_or_else(|| self.config.name_prefix.clone())
    }

    /// Create and save a new data set holding a single point at the origin.
    /// Fails rather than overwrite an existing file.
    pub fn create(&self, name: &str) -> DataResult<DataSetRecord> {
        let path = self.config.path_for(name)?;
        if path.exists() {
            return Err(DataError::AlreadyExists { path });
        }
        fs::create_dir_all(&self.config.directory)?;

        let mut record = DataSetRecord::new(name, NEW_DESCRIPTION);
        record.graph_format = GraphFormat::Circles;
        record.graph_colour = GraphColour::RED;
        record.add_point(0.0, 0.0);
        record.backing_file = Some(path);

        save(&record)?;
        self.refresh()?;
        Ok(record)
    }

    /// Give a data set a new reference and move it to the matching file.
    /// Fails if that file already holds another data set.
    pub fn rename(&self, row: usize, new_reference: &str) -> DataResult<DataSetRecord> {
        let old_path = self.entry(row)?.path;
        let new_path = self.config.path_for(new_reference)?;
        if new_path != old_path && new_path.exists() {
            return Err(DataError::AlreadyExists { path: new_path });
        }

        let mut record = read_with_config(&old_path, LoadMode::Full, &self.config)?;
        record.reference = new_reference.to_string();
        record.backing_file = Some(new_path.clone());
        save(&record)?;

        if new_path != old_path {
            fs::remove_file(&old_path)?;
        }
        info!("Renamed data set {} to {:?}", old_path.display(), new_reference);

        self.refresh()?;
        Ok(record)
    }

    /// Save an edited data set back to its file and refresh the listing
    pub fn update(&self, record: &DataSetRecord) -> DataResult<()> {
        save(record)?;
        self.refresh()?;
        Ok(())
    }

    /// Delete the file behind a row
    pub fn delete(&self, row: usize) -> DataResult<()> {
        let entry = self.entry(row)?;
        fs::remove_file(&entry.path)?;
        info!("Deleted data set {}", entry.path.display());
        self.refresh()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::tempdir;

    fn set_modified(path: &Path, secs: u64) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs)).unwrap();
    }

    #[test]
    fn test_create_and_list() {
        let dir = tempdir().unwrap();
        let library = DataSetLibrary::open(DataSetConfig::new(dir.path())).unwrap();
        assert!(library.is_empty());
        assert_eq!(library.suggest_name(), "DataSet_0");

        let record = library.create("DataSet_0").unwrap();
        assert_eq!(record.graph_colour, GraphColour::RED);
        assert!(dir.path().join("DataSet_0.ds").exists());

        assert_eq!(library.len(), 1);
        assert_eq!(library.references(), vec!["DataSet_0"]);
        assert_eq!(library.suggest_name(), "DataSet_1");

        let entry = library.entry(0).unwrap();
        assert_eq!(entry.file_name(), "DataSet_0.ds");
        assert_eq!(entry.description(), NEW_DESCRIPTION);
        assert!(entry.summary.is_empty());

        let loaded = library.load(0).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_listing_order_and_filtering() {
        let dir = tempdir().unwrap();
        let library = DataSetLibrary::new(DataSetConfig::new(dir.path()));
        library.create("newer").unwrap();
        library.create("older").unwrap();
        set_modified(&dir.path().join("newer.ds"), 2_000_000);
        set_modified(&dir.path().join("older.ds"), 1_000_000);

        fs::write(dir.path().join("notes.txt"), "1, 2\n").unwrap();
        fs::write(dir.path().join("broken.ds"), "//@reference=broken\n//@graphColour=blue\n").unwrap();
        fs::create_dir(dir.path().join("sub.ds")).unwrap();

        assert_eq!(library.refresh().unwrap(), 2);
        assert_eq!(library.references(), vec!["older", "newer"]);
        assert_eq!(library.find("newer"), Some(1));
        assert_eq!(library.find("broken"), None);
    }

    #[test]
    fn test_rename_moves_file() {
        let dir = tempdir().unwrap();
        let library = DataSetLibrary::new(DataSetConfig::new(dir.path()));
        let mut record = library.create("first").unwrap();
        record.add_point(1.0, 2.0);
        library.update(&record).unwrap();

        let renamed = library.rename(0, "Soma: trace 1").unwrap();
        assert_eq!(renamed.reference, "Soma: trace 1");
        assert_eq!(renamed.len(), 2);
        assert!(!dir.path().join("first.ds").exists());
        assert!(dir.path().join("Soma__trace_1.ds").exists());
        assert_eq!(library.references(), vec!["Soma: trace 1"]);
    }

    #[test]
    fn test_rename_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let library = DataSetLibrary::new(DataSetConfig::new(dir.path()));
        library.create("A").unwrap();
        let mut b = library.create("B").unwrap();
        b.add_point(1.0, 1.0);
        b.add_point(2.0, 4.0);
        library.update(&b).unwrap();

        let row = library.find("A").unwrap();
        let err = library.rename(row, "B").unwrap_err();
        assert!(matches!(err, DataError::AlreadyExists { .. }));

        assert!(dir.path().join("A.ds").exists());
        let kept = library.load(library.find("B").unwrap()).unwrap();
        assert_eq!(kept.len(), 3);
        assert_eq!(library.len(), 2);

        // renaming onto its own file is allowed
        let row = library.find("A").unwrap();
        assert_eq!(library.rename(row, "A").unwrap().reference, "A");
    }

    #[test]
    fn test_rename_stays_in_directory() {
        let dir = tempdir().unwrap();
        let sets = dir.path().join("sets");
        let library = DataSetLibrary::new(DataSetConfig::new(&sets));
        library.create("inside").unwrap();

        for bad in ["../escape", "sub/x", ".."] {
            assert!(matches!(library.rename(0, bad), Err(DataError::InvalidName(_))));
        }
        assert!(!dir.path().join("escape.ds").exists());
        assert!(sets.join("inside.ds").exists());
        assert!(matches!(library.create("../out"), Err(DataError::InvalidName(_))));
    }

    #[test]
    fn test_create_refuses_existing_file() {
        let dir = tempdir().unwrap();
        let library = DataSetLibrary::new(DataSetConfig::new(dir.path()));
        let mut first = library.create("same").unwrap();
        first.add_point(5.0, 5.0);
        library.update(&first).unwrap();

        assert!(matches!(library.create("same"), Err(DataError::AlreadyExists { .. })));
        assert_eq!(library.load(0).unwrap().len(), 2);
    }

    #[test]
    fn test_multi_dot_extension_listing() {
        let dir = tempdir().unwrap();
        let config = DataSetConfig {
            extension: ".ds.txt".to_string(),
            ..DataSetConfig::new(dir.path())
        };
        fs::write(dir.path().join("trace.ds.txt"), "1, 2
").unwrap();
        fs::write(dir.path().join("other.ds"), "1, 2
").unwrap();

        let library = DataSetLibrary::open(config).unwrap();
        assert_eq!(library.references(), vec!["trace"]);
        assert_eq!(library.load(0).unwrap().reference, "trace");
    }

    #[test]
    fn test_delete_and_bad_rows() {
        let dir = tempdir().unwrap();
        let library = DataSetLibrary::new(DataSetConfig::new(dir.path()));
        library.create("gone").unwrap();

        library.delete(0).unwrap();
        assert!(library.is_empty());
        assert!(matches!(library.load(0), Err(DataError::InvalidRow { row: 0, count: 0 })));
        assert!(library.delete(3).is_err());
    }

    #[test]
    fn test_missing_directory_lists_empty() {
        let dir = tempdir().unwrap();
        let library = DataSetLibrary::open(DataSetConfig::new(dir.path().join("absent"))).unwrap();
        assert_eq!(library.len(), 0);
    }

    #[test]
    fn test_last_saved_format() {
        let entry = DataSetEntry {
            path: PathBuf::from("a.ds"),
            modified: None,
            summary: DataSetRecord::new("a", ""),
        };
        assert_eq!(entry.last_saved("%Y"), "-");

        let entry = DataSetEntry {
            modified: Some(SystemTime::now()),
            ..entry
        };
        assert_eq!(entry.last_saved("%Y"), Local::now().format("%Y").to_string());
    }
}
