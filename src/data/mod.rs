//! Data module - CSV loading, cleaning and export

mod loader;
mod processor;
mod records;
mod writer;

pub use loader::{is_numeric_dtype, DataLoader, LoaderError};
pub use processor::{CleaningReport, ColumnAction, DataProcessor, ProcessorError};
pub use records::SalesRecord;
pub use writer::{write_csv, ExportError};
