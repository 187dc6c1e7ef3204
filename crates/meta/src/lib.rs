//! # Bills Meta
//!
//! Bill metadata extraction and aggregation.
//!
//! ## Pipeline
//!
//! ```text
//! Congress data directory
//!     │
//!     ├──> Data File Scanner
//!     │      └─> data.json paths
//!     │
//!     ├──> Extractors (bounded by the admission gate, blocking pool)
//!     │      └─> BillRecord per file
//!     │
//!     ├──> Aggregator (single task)
//!     │      └─> BillStore + title indexes
//!     │
//!     └──> JSON writers
//! ```
//!
//! ## Example
//!
//! ```no_run
//! use bills_meta::{DataFileScanner, ExtractionPipeline, PipelineConfig};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let paths = DataFileScanner::new("/data/congress").scan_data_json();
//!     let outcome = ExtractionPipeline::new(PipelineConfig::from_env())
//!         .run(paths)
//!         .await?;
//!
//!     println!("Stored {} bills", outcome.stats.stored);
//!     Ok(())
//! }
//! ```

mod error;
mod extractor;
mod limits;
mod output;
mod pipeline;
mod scanner;
mod stats;
mod store;
mod types;

pub use error::{BillMetaError, Result};
pub use extractor::{extract_bill_record, parse_bill_record};
pub use limits::{
    extract_concurrency_from_env, AdmissionGate, AdmissionSnapshot, ExtractionPermit,
    DEFAULT_EXTRACT_CONCURRENCY, EXTRACT_CONCURRENCY_ENV, MAX_EXTRACT_CONCURRENCY,
};
pub use output::{
    write_bill_meta_files, write_json_atomic, write_outputs, BillMetaFilesReport, OutputSummary,
    BILLS_FILE, BILL_META_FILE, BILL_SIMILARITY_FILE, MAIN_TITLE_INDEX_FILE, PER_BILL_META_FILE,
    TITLE_INDEX_FILE,
};
pub use pipeline::{Extraction, ExtractionPipeline, PipelineConfig, PipelineOutcome};
pub use scanner::{DataFileScanner, DATA_JSON_FILE, DOCUMENT_XML_FILE};
pub use stats::{FileDiagnostic, PipelineStats};
pub use store::{BillStore, TitleIndex};
pub use types::{
    ActionItem, BillRecord, CommitteeItem, CosponsorItem, DataJson, RelatedBillItem,
    RelatedBillMap, RelatedBillReference, TitleEntry,
};
