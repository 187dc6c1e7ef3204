use crate::error::{BillMetaError, Result};
use crate::extractor::extract_bill_record;
use crate::limits::{
    extract_concurrency_from_env, AdmissionGate, DEFAULT_EXTRACT_CONCURRENCY,
    MAX_EXTRACT_CONCURRENCY,
};
use crate::stats::PipelineStats;
use crate::store::BillStore;
use crate::types::BillRecord;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Instant;
use tokio::sync::mpsc;

/// Configuration for [`ExtractionPipeline`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Extractions allowed in flight at once
    pub concurrency: usize,

    /// Process files in reverse discovery order
    pub reverse_order: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_EXTRACT_CONCURRENCY,
            reverse_order: true,
        }
    }
}

impl PipelineConfig {
    /// Defaults with `BILLS_EXTRACT_CONCURRENCY` applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.concurrency = extract_concurrency_from_env(config.concurrency);
        config
    }

    /// Validate configuration
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.concurrency == 0 {
            return Err("concurrency must be > 0".to_string());
        }
        if self.concurrency > MAX_EXTRACT_CONCURRENCY {
            return Err(format!(
                "concurrency must be <= {MAX_EXTRACT_CONCURRENCY}, got {}",
                self.concurrency
            ));
        }
        Ok(())
    }
}

/// Result of one extraction task, sent to the aggregator
#[derive(Debug)]
pub struct Extraction {
    pub path: PathBuf,
    pub result: Result<BillRecord>,
}

#[derive(Debug)]
pub struct PipelineOutcome {
    pub store: BillStore,
    pub stats: PipelineStats,
}

/// Runs the record extractor over many files with bounded concurrency and
/// funnels every result through a single aggregator.
pub struct ExtractionPipeline {
    config: PipelineConfig,
    gate: AdmissionGate,
}

impl ExtractionPipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let gate = AdmissionGate::new(config.concurrency);
        Self { config, gate }
    }

    pub const fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    /// Extract every path into a fresh [`BillStore`].
    ///
    /// Per-file failures are recorded in the stats; only a lost aggregator
    /// fails the whole run.
    pub async fn run(&self, mut paths: Vec<PathBuf>) -> Result<PipelineOutcome> {
        let start = Instant::now();
        if self.config.reverse_order {
            paths.reverse();
        }
        let total = paths.len();
        log::info!(
            "Extracting {total} files (concurrency {})",
            self.gate.limit()
        );

        let (tx, rx) = mpsc::channel::<Extraction>(self.gate.limit());
        let aggregator = tokio::spawn(aggregate(rx, total));

        for path in paths {
            let permit = self.gate.acquire().await;
            let tx = tx.clone();
            tokio::spawn(async move {
                let task_path = path.clone();
                let result = match tokio::task::spawn_blocking(move || {
                    extract_bill_record(&task_path)
                })
                .await
                {
                    Ok(result) => result,
                    Err(e) => Err(BillMetaError::TaskFailed {
                        path: path.clone(),
                        message: e.to_string(),
                    }),
                };
                drop(permit);
                if tx.send(Extraction { path, result }).await.is_err() {
                    log::error!("Aggregator stopped before all results were delivered");
                }
            });
        }
        drop(tx);

        let (store, mut stats) = aggregator
            .await
            .map_err(|e| BillMetaError::Other(format!("Aggregator task failed: {e}")))?;

        if !stats.is_complete() {
            return Err(BillMetaError::Other(format!(
                "Aggregator received {} of {} results",
                stats.processed, stats.files
            )));
        }

        stats.peak_in_flight = self.gate.snapshot().peak_in_flight;
        stats.time_ms = start.elapsed().as_millis() as u64;
        log::info!(
            "Extraction finished: {} stored, {} skipped, {} errors in {}ms",
            stats.stored,
            stats.skipped,
            stats.errors.len(),
            stats.time_ms
        );
        Ok(PipelineOutcome { store, stats })
    }
}

async fn aggregate(mut rx: mpsc::Receiver<Extraction>, total: usize) -> (BillStore, PipelineStats) {
    let store = BillStore::new();
    let mut stats = PipelineStats::new(total);

    while let Some(Extraction { path, result }) = rx.recv().await {
        match result {
            Ok(record) => {
                let bill = record.bill_congress_type_number.clone();
                let replaced = store.insert_record(record).is_some();
                if replaced {
                    log::warn!("{bill} extracted more than once; keeping {}", path.display());
                }
                stats.add_stored(replaced);
                log::debug!("[{}] Stored metadata for {bill}", stats.stored);
            }
            Err(e) if e.is_skip() => {
                log::debug!("Skipping {}: {e}", path.display());
                stats.add_skipped();
            }
            Err(e) => {
                log::warn!("Failed to extract {}: {e}", path.display());
                stats.add_error(path, e.to_string());
            }
        }

        if stats.processed % 1000 == 0 {
            log::info!("Processed {}/{} files", stats.processed, stats.files);
        }
    }

    (store, stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = PipelineConfig::default();
        assert_eq!(config.concurrency, DEFAULT_EXTRACT_CONCURRENCY);
        assert!(config.reverse_order);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_concurrency() {
        let zero = PipelineConfig {
            concurrency: 0,
            ..PipelineConfig::default()
        };
        assert!(zero.validate().is_err());

        let huge = PipelineConfig {
            concurrency: MAX_EXTRACT_CONCURRENCY + 1,
            ..PipelineConfig::default()
        };
        assert!(huge.validate().is_err());
    }

    #[tokio::test]
    async fn empty_input_yields_empty_store() {
        let pipeline = ExtractionPipeline::new(PipelineConfig::default());
        let outcome = pipeline.run(Vec::new()).await.unwrap();
        assert!(outcome.store.is_empty());
        assert_eq!(outcome.stats.files, 0);
        assert!(outcome.stats.errors.is_empty());
    }
}
