// crates/driftscope-store/src/csv.rs
//
// CSV-backed append-only results log.
//
// Format: one record per line, three named fields
//   input_sentence,output_sentence,distance
// The header line is written exactly once per distinct file: only when
// this append creates the file. Appending to an existing file (e.g.
// several runs sharing a path) never re-writes the header.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use driftscope_core::{DistanceRecord, DriftError, RecordSink};

const HEADER: &str = "input_sentence,output_sentence,distance";

/// Append-only CSV log implementing `RecordSink`.
#[derive(Debug, Clone)]
pub struct CsvResultsStore {
    path: PathBuf,
}

impl CsvResultsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Synchronous append used by the `RecordSink` impl.
    ///
    /// Opens the file for append (creating it if missing), writes the
    /// header for a newly created file, writes the record line, flushes,
    /// and closes. No handle is held across calls.
    pub fn append_sync(&self, record: &DistanceRecord) -> Result<(), DriftError> {
        let existed = self.path.exists();

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                DriftError::Storage(format!("failed to open {}: {}", self.path.display(), e))
            })?;

        if !existed {
            writeln!(file, "{}", HEADER)
                .map_err(|e| DriftError::Storage(format!("header write failed: {}", e)))?;
        }

        writeln!(
            file,
            "{},{},{}",
            quote_field(&record.input_sentence),
            quote_field(&record.output_sentence),
            record.distance
        )
        .map_err(|e| DriftError::Storage(format!("record write failed: {}", e)))?;

        file.flush()
            .map_err(|e| DriftError::Storage(format!("flush failed: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl RecordSink for CsvResultsStore {
    async fn append(&self, record: &DistanceRecord) -> Result<(), DriftError> {
        self.append_sync(record)
    }
}

/// Quote a CSV field when it contains a delimiter, quote, or newline.
/// Embedded quotes are doubled.
fn quote_field(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
