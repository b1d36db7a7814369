//! Loaded and normalized accident table for one session.

use crate::data::filter::FilterOptions;
use crate::data::loader::{DataLoader, LoaderError};
use crate::data::processor::{DataProcessor, ProcessorError};
use crate::data::record::NormalizedRecord;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error(transparent)]
    Source(#[from] LoaderError),
    #[error(transparent)]
    Processing(#[from] ProcessorError),
}

/// Immutable for its lifetime: filters and aggregates are computed from it,
/// never written back.
#[derive(Debug, Clone)]
pub struct Dataset {
    source: PathBuf,
    records: Vec<NormalizedRecord>,
    options: FilterOptions,
}

impl Dataset {
    /// Load, type and normalize the CSV at `path`.
    pub fn open(path: &Path) -> Result<Self, DatasetError> {
        let df = DataLoader::load_csv(path)?;
        let records = DataProcessor::normalize(DataProcessor::records_from_frame(&df)?);
        Ok(Self::from_records(path, records))
    }

    pub fn from_records(source: &Path, records: Vec<NormalizedRecord>) -> Self {
        let options = FilterOptions::observe(&records);
        Self {
            source: source.to_path_buf(),
            records,
            options,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn records(&self) -> &[NormalizedRecord] {
        &self.records
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_open_normalizes_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("traffic_accidents.csv");
        fs::write(
            &path,
            "Accident_ID,City,Weather,Road_Type,Severity,Vehicles_Involved,Casualties,Date\n\
             1,Pune,Rain,Highway,High,3 cars,2 injured,2023-01-05\n\
             2,Delhi,Clear,Urban,Unknown,none,,2023-01-06\n",
        )
        .unwrap();

        let dataset = Dataset::open(&path).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.source(), path.as_path());

        let first = &dataset.records()[0];
        assert_eq!(first.vehicles_involved_count, 3);
        assert_eq!(first.casualties_count, 2);
        assert_eq!(first.severity_level, Some(3));

        let second = &dataset.records()[1];
        assert_eq!(second.vehicles_involved_count, 0);
        assert_eq!(second.casualties_count, 0);
        assert_eq!(second.severity_level, None);

        assert_eq!(dataset.options().cities, vec!["Pune", "Delhi"]);
        assert_eq!(dataset.options().severities, vec!["High", "Unknown"]);
    }

    #[test]
    fn test_open_missing_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("partial.csv");
        fs::write(&path, "Accident_ID,City\n1,Pune\n").unwrap();

        assert!(matches!(
            Dataset::open(&path),
            Err(DatasetError::Processing(ProcessorError::FieldAbsent(_)))
        ));
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            Dataset::open(&dir.path().join("absent.csv")),
            Err(DatasetError::Source(LoaderError::NotFound(_)))
        ));
    }
}
