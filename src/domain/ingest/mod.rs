//! Ingest module - turns platform CSV exports into normalized records.
//!
//! Format detection is header-driven; row-level problems become warnings
//! and only batch-level problems are fatal.

mod dates;
mod format;
mod normalizer;
mod record;

pub use dates::parse_entry_date;
pub use format::{clean_header, detect_format, ColumnMap, FormatSignature, SIGNATURES};
pub use normalizer::{
    IngestSettings, NormalizedBatch, RecordNormalizer, RowWarning, DEFAULT_MAX_INPUT_BYTES,
};
pub use record::NormalizedRecord;
