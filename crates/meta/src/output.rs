use crate::error::{BillMetaError, Result};
use crate::stats::FileDiagnostic;
use crate::store::BillStore;
use crate::types::RelatedBillItem;
use bills_protocol::BillNumber;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const BILLS_FILE: &str = "billsGo.json";
pub const TITLE_INDEX_FILE: &str = "titleNoYearIndexGo.json";
pub const MAIN_TITLE_INDEX_FILE: &str = "mainTitleNoYearIndexGo.json";
pub const BILL_SIMILARITY_FILE: &str = "billSimilarityGo.json";
pub const BILL_META_FILE: &str = "billMetaGo.json";

/// Per-bill metadata file written next to each `data.json`
pub const PER_BILL_META_FILE: &str = "billMeta.json";

/// Files written by [`write_outputs`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSummary {
    pub bills: PathBuf,
    pub title_index: PathBuf,
    pub main_title_index: PathBuf,
    pub bill_similarity: PathBuf,
    pub bill_meta: PathBuf,
}

/// Outcome of [`write_bill_meta_files`]
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BillMetaFilesReport {
    pub written: usize,
    pub errors: Vec<FileDiagnostic>,
}

/// Serialize `value` as pretty JSON, replacing `path` atomically.
pub async fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }
    let bytes = serde_json::to_vec_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, bytes).await?;
    tokio::fs::rename(&tmp, path).await?;
    Ok(())
}

/// Write the five aggregate files into `dir`.
pub async fn write_outputs(store: &BillStore, dir: &Path) -> Result<OutputSummary> {
    let summary = OutputSummary {
        bills: dir.join(BILLS_FILE),
        title_index: dir.join(TITLE_INDEX_FILE),
        main_title_index: dir.join(MAIN_TITLE_INDEX_FILE),
        bill_similarity: dir.join(BILL_SIMILARITY_FILE),
        bill_meta: dir.join(BILL_META_FILE),
    };

    let records = store.records();
    let similarity: BTreeMap<&str, Vec<&RelatedBillItem>> = records
        .iter()
        .map(|(bill, record)| (bill.as_str(), record.related_dict.values().collect()))
        .collect();

    log::info!("Writing {} bills to {}", records.len(), dir.display());
    write_json_atomic(&summary.bills, &store.bill_numbers()).await?;
    write_json_atomic(&summary.title_index, &store.titles().to_map()).await?;
    write_json_atomic(&summary.main_title_index, &store.main_titles().to_map()).await?;
    write_json_atomic(&summary.bill_similarity, &similarity).await?;
    write_json_atomic(&summary.bill_meta, &records).await?;
    Ok(summary)
}

/// Write `billMeta.json` into each stored bill's directory under
/// `congress_data_dir`.
///
/// Bills whose directory does not exist are reported and skipped.
pub async fn write_bill_meta_files(
    store: &BillStore,
    congress_data_dir: &Path,
) -> BillMetaFilesReport {
    let mut report = BillMetaFilesReport::default();

    for (bill, record) in store.records() {
        let target = match bill_meta_dir(congress_data_dir, &bill) {
            Ok(dir) => dir,
            Err(e) => {
                report.errors.push(FileDiagnostic {
                    path: congress_data_dir.to_path_buf(),
                    message: e.to_string(),
                });
                continue;
            }
        };

        if !tokio::fs::try_exists(&target).await.unwrap_or(false) {
            log::warn!("No directory for {bill} at {}", target.display());
            report.errors.push(FileDiagnostic {
                path: target,
                message: format!("missing bill directory for {bill}"),
            });
            continue;
        }

        let path = target.join(PER_BILL_META_FILE);
        match write_json_atomic(&path, &record).await {
            Ok(()) => {
                log::debug!("Saved metadata for {bill} to {}", path.display());
                report.written += 1;
            }
            Err(e) => {
                log::warn!("Failed to write {}: {e}", path.display());
                report.errors.push(FileDiagnostic {
                    path,
                    message: e.to_string(),
                });
            }
        }
    }

    report
}

fn bill_meta_dir(congress_data_dir: &Path, bill: &str) -> Result<PathBuf> {
    let parsed = BillNumber::parse(bill).map_err(BillMetaError::from)?;
    Ok(congress_data_dir.join(parsed.bill_dir()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BillRecord;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn store_with(bills: &[&str]) -> BillStore {
        let store = BillStore::new();
        for bill in bills {
            store.insert_record(BillRecord {
                bill_congress_type_number: (*bill).to_string(),
                congress: "116".to_string(),
                short_title: "Consumers First Act".to_string(),
                ..BillRecord::default()
            });
        }
        store
    }

    #[tokio::test]
    async fn writes_all_aggregate_files() {
        let temp = TempDir::new().expect("tempdir");
        let store = store_with(&["116s2341", "116hr1500"]);

        let summary = write_outputs(&store, temp.path()).await.unwrap();

        let bills: Vec<String> =
            serde_json::from_slice(&tokio::fs::read(&summary.bills).await.unwrap()).unwrap();
        assert_eq!(bills, vec!["116hr1500", "116s2341"]);

        let titles: BTreeMap<String, Vec<String>> =
            serde_json::from_slice(&tokio::fs::read(&summary.title_index).await.unwrap()).unwrap();
        assert_eq!(titles["Consumers First Act"].len(), 2);

        let meta: BTreeMap<String, BillRecord> =
            serde_json::from_slice(&tokio::fs::read(&summary.bill_meta).await.unwrap()).unwrap();
        assert_eq!(meta["116hr1500"].short_title, "Consumers First Act");

        assert!(summary.bill_similarity.exists());
        assert!(summary.main_title_index.exists());
        assert!(!temp.path().join("billsGo.json.tmp").exists());
    }

    #[tokio::test]
    async fn per_bill_files_report_missing_directories() {
        let temp = TempDir::new().expect("tempdir");
        tokio::fs::create_dir_all(temp.path().join("116/bills/hr/hr1500"))
            .await
            .unwrap();
        let store = store_with(&["116hr1500", "116hr1501"]);

        let report = write_bill_meta_files(&store, temp.path()).await;

        assert_eq!(report.written, 1);
        assert_eq!(report.errors.len(), 1);
        assert!(temp
            .path()
            .join("116/bills/hr/hr1500")
            .join(PER_BILL_META_FILE)
            .exists());
    }
}
