use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// A per-file failure recorded during extraction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileDiagnostic {
    pub path: PathBuf,
    pub message: String,
}

/// Statistics about one extraction run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStats {
    /// Number of input files
    pub files: usize,

    /// Results received by the aggregator
    pub processed: usize,

    /// Records stored
    pub stored: usize,

    /// Records skipped because `data.json` had no congress field
    pub skipped: usize,

    /// Records that replaced an earlier record with the same identifier
    pub replaced: usize,

    /// Highest number of extractions in flight at once
    pub peak_in_flight: usize,

    /// Time taken in milliseconds
    pub time_ms: u64,

    /// Errors encountered
    pub errors: Vec<FileDiagnostic>,
}

impl PipelineStats {
    pub fn new(files: usize) -> Self {
        Self {
            files,
            processed: 0,
            stored: 0,
            skipped: 0,
            replaced: 0,
            peak_in_flight: 0,
            time_ms: 0,
            errors: Vec::new(),
        }
    }

    pub fn add_stored(&mut self, replaced: bool) {
        self.processed += 1;
        self.stored += 1;
        if replaced {
            self.replaced += 1;
        }
    }

    pub fn add_skipped(&mut self) {
        self.processed += 1;
        self.skipped += 1;
    }

    pub fn add_error(&mut self, path: PathBuf, message: String) {
        self.processed += 1;
        self.errors.push(FileDiagnostic { path, message });
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.processed == self.files
    }
}

impl Default for PipelineStats {
    fn default() -> Self {
        Self::new(0)
    }
}
