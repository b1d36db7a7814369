//! Data module - CSV loading, normalization and filtering

mod dataset;
mod filter;
mod loader;
mod processor;
mod record;

pub use dataset::{Dataset, DatasetError};
pub use filter::{filter_records, FilterOptions, FilterSelection, FilteredView};
pub use loader::{DataLoader, LoaderError};
pub use processor::{columns, DataProcessor, ProcessorError};
pub use record::{AccidentRecord, NormalizedRecord, Severity};
