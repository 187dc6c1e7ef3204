use crate::config::{SimilarityConfig, Thresholds};
use crate::error::Result;
use crate::ngrams::DocumentNgrams;
use bills_protocol::{BillNumber, Reason};
use bills_text::NgramTable;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Relationship between a row document and a column document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Identical,
    NearlyIdentical,
    /// The row document is (mostly) contained in the column document
    IncorporatedBy,
    /// The row document contains (most of) the column document
    Incorporates,
    SomeSimilarity,
    Unrelated,
}

impl Classification {
    #[must_use]
    pub fn reason(self) -> Reason {
        match self {
            Self::Identical => Reason::Identical,
            Self::NearlyIdentical => Reason::NearlyIdentical,
            Self::IncorporatedBy => Reason::IncludedBy,
            Self::Incorporates => Reason::Includes,
            Self::SomeSimilarity => Reason::SomeSimilarity,
            Self::Unrelated => Reason::Unrelated,
        }
    }
}

impl From<Classification> for Reason {
    fn from(classification: Classification) -> Self {
        classification.reason()
    }
}

/// One cell of the comparison matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareItem {
    /// Share of the row document found in the column document
    pub score: f64,
    /// Share of the column document found in the row document
    pub reciprocal_score: f64,
    pub explanation: Classification,
}

/// `N×N` comparison result with the documents' labels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompareMatrix {
    pub labels: Vec<String>,
    pub items: Vec<Vec<CompareItem>>,
}

impl CompareMatrix {
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<&CompareItem> {
        self.items.get(row).and_then(|cells| cells.get(column))
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Share of `a`'s n-gram occurrences that also appear in `b`.
///
/// Computed as `Σ b[k] / Σ a[k]` over the keys of `a`, rounded to two
/// decimals and capped at 1. An empty `a` scores 0.
#[must_use]
pub fn containment(a: &NgramTable, b: &NgramTable) -> f64 {
    let mut total = 0usize;
    let mut shared = 0usize;
    for (gram, count) in a.iter() {
        total += count;
        shared += b.count(gram);
    }
    if total == 0 {
        return 0.0;
    }
    let score = (100.0 * shared as f64 / total as f64).round() / 100.0;
    score.clamp(0.0, 1.0)
}

/// Label a pair of containment scores.
///
/// `total` and `reciprocal_total` are the n-gram counts of the row and
/// column documents.
#[must_use]
pub fn classify(
    score: f64,
    reciprocal: f64,
    total: usize,
    reciprocal_total: usize,
    thresholds: &Thresholds,
) -> Classification {
    if score == 1.0 && reciprocal == 1.0 {
        return Classification::Identical;
    }

    // minimum_total keeps short bills from counting as nearly identical
    let large = total > thresholds.minimum_total && reciprocal_total > thresholds.minimum_total;
    let close = 1.0 - score / reciprocal < thresholds.nearly_identical_tolerance;
    if (large || close)
        && score > thresholds.nearly_identical
        && reciprocal > thresholds.nearly_identical
    {
        return Classification::NearlyIdentical;
    }

    if score < thresholds.unrelated && reciprocal < thresholds.unrelated {
        return Classification::Unrelated;
    }
    if score > thresholds.incorporate && reciprocal / score < thresholds.incorporate_ratio {
        return Classification::IncorporatedBy;
    }
    if reciprocal > thresholds.incorporate && score / reciprocal < thresholds.incorporate_ratio {
        return Classification::Incorporates;
    }
    Classification::SomeSimilarity
}

/// Compare every pair of loaded documents.
#[must_use]
pub fn compare_ngrams(ngrams: &DocumentNgrams, thresholds: &Thresholds) -> CompareMatrix {
    let tables = ngrams.tables();
    let n = tables.len();
    let totals: Vec<usize> = tables.iter().map(NgramTable::total).collect();
    let mut items: Vec<Vec<Option<CompareItem>>> = vec![vec![None; n]; n];

    for i in 0..n {
        log::debug!("Comparison for document {i}");
        for j in 0..=i {
            let score_ij = containment(&tables[i], &tables[j]);
            let score_ji = containment(&tables[j], &tables[i]);

            items[i][j] = Some(CompareItem {
                score: score_ij,
                reciprocal_score: score_ji,
                explanation: classify(score_ij, score_ji, totals[i], totals[j], thresholds),
            });
            items[j][i] = Some(CompareItem {
                score: score_ji,
                reciprocal_score: score_ij,
                explanation: classify(score_ji, score_ij, totals[j], totals[i], thresholds),
            });
        }
    }

    CompareMatrix {
        labels: ngrams.labels().to_vec(),
        items: items
            .into_iter()
            .map(|row| row.into_iter().flatten().collect())
            .collect(),
    }
}

/// Load and compare documents at `paths`.
pub async fn compare_documents(paths: &[PathBuf], config: &SimilarityConfig) -> Result<CompareMatrix> {
    let ngrams = DocumentNgrams::load(paths, config).await?;
    log::info!("Comparing {} documents", ngrams.len());
    Ok(compare_ngrams(&ngrams, &config.thresholds))
}

/// Compare bill versions such as `116hr1500rh` by their `document.xml`
/// under `data_root`.
///
/// Bill numbers that do not name a version are logged and left out.
pub async fn compare_bills(
    data_root: &Path,
    bill_numbers: &[String],
    config: &SimilarityConfig,
) -> Result<CompareMatrix> {
    let mut labels = Vec::with_capacity(bill_numbers.len());
    let mut paths = Vec::with_capacity(bill_numbers.len());
    for bill in bill_numbers {
        match document_path(data_root, bill) {
            Ok(path) => {
                labels.push(bill.clone());
                paths.push(path);
            }
            Err(e) => log::error!("Skipping {bill}: {e}"),
        }
    }

    let ngrams = DocumentNgrams::load(&paths, config)
        .await?
        .with_labels(labels);
    log::info!("Comparing {} bills", ngrams.len());
    Ok(compare_ngrams(&ngrams, &config.thresholds))
}

/// `{root}/{congress}/bills/{type}/{type}{n}/text-versions/{v}/document.xml`
pub fn document_path(data_root: &Path, bill_number: &str) -> Result<PathBuf> {
    let parsed = BillNumber::parse(bill_number)?;
    Ok(data_root.join(parsed.text_version_dir()?).join("document.xml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn table(text: &str) -> NgramTable {
        bills_text::build_ngram_table(text, 4)
    }

    #[test]
    fn containment_is_directional() {
        let small = table("alpha bravo charlie delta echo foxtrot");
        let large = table("alpha bravo charlie delta echo foxtrot gamma hotel india juliet kilo lima");

        assert_eq!(containment(&small, &large), 1.0);
        assert_eq!(containment(&large, &small), 0.33);
        assert_eq!(containment(&NgramTable::default(), &large), 0.0);
    }

    #[test]
    fn classification_rules_in_order() {
        let t = Thresholds::default();
        assert_eq!(classify(1.0, 1.0, 10, 10, &t), Classification::Identical);
        assert_eq!(classify(0.95, 0.9, 200, 200, &t), Classification::NearlyIdentical);
        // small documents need close scores
        assert_eq!(classify(0.81, 0.95, 20, 20, &t), Classification::SomeSimilarity);
        assert_eq!(classify(0.85, 0.9, 20, 20, &t), Classification::NearlyIdentical);
        assert_eq!(classify(0.05, 0.02, 200, 200, &t), Classification::Unrelated);
        assert_eq!(classify(0.95, 0.1, 20, 400, &t), Classification::IncorporatedBy);
        assert_eq!(classify(0.1, 0.95, 400, 20, &t), Classification::Incorporates);
        assert_eq!(classify(0.5, 0.4, 200, 200, &t), Classification::SomeSimilarity);
    }

    #[test]
    fn zero_scores_do_not_panic() {
        let t = Thresholds::default();
        assert_eq!(classify(0.0, 0.0, 0, 0, &t), Classification::Unrelated);
    }

    #[test]
    fn classification_maps_to_reason_tags() {
        assert_eq!(Classification::Incorporates.reason().as_str(), "bills-includes");
        assert_eq!(Classification::IncorporatedBy.reason().as_str(), "bills-included_by");
        assert_eq!(Reason::from(Classification::Identical), Reason::Identical);
    }

    #[test]
    fn matrix_cells_mirror_each_other() {
        let config = SimilarityConfig::default();
        let ngrams = DocumentNgrams::from_texts(
            [
                ("small", "alpha bravo charlie delta echo foxtrot"),
                (
                    "large",
                    "alpha bravo charlie delta echo foxtrot gamma hotel india juliet kilo lima mike november oscar papa quebec romeo sierra tango",
                ),
            ],
            &config,
        )
        .unwrap();

        let matrix = compare_ngrams(&ngrams, &config.thresholds);
        assert_eq!(matrix.labels, vec!["small", "large"]);

        let small_in_large = matrix.get(0, 1).unwrap();
        let large_in_small = matrix.get(1, 0).unwrap();
        assert_eq!(small_in_large.score, large_in_small.reciprocal_score);
        assert_eq!(small_in_large.reciprocal_score, large_in_small.score);
        assert_eq!(small_in_large.explanation, Classification::IncorporatedBy);
        assert_eq!(large_in_small.explanation, Classification::Incorporates);

        assert_eq!(matrix.get(0, 0).unwrap().explanation, Classification::Identical);
    }

    #[test]
    fn document_path_requires_version() {
        let root = Path::new("/data");
        assert_eq!(
            document_path(root, "116hr1500rh").unwrap(),
            PathBuf::from("/data/116/bills/hr/hr1500/text-versions/rh/document.xml")
        );
        assert!(document_path(root, "116hr1500").is_err());
        assert!(document_path(root, "bogus").is_err());
    }
}
