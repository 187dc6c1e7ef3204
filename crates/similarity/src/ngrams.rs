use crate::config::SimilarityConfig;
use crate::error::{Result, SimilarityError};
use bills_text::{NgramTable, Tokenizer};
use std::path::{Path, PathBuf};

/// N-gram tables for a list of documents, in input order
#[derive(Debug, Clone, Default)]
pub struct DocumentNgrams {
    labels: Vec<String>,
    tables: Vec<NgramTable>,
}

impl DocumentNgrams {
    /// Read every path and build its n-gram table.
    ///
    /// Files are read on the blocking pool in parallel. Any unreadable file
    /// fails the whole load.
    pub async fn load(paths: &[PathBuf], config: &SimilarityConfig) -> Result<Self> {
        config.validate()?;
        let tokenizer = Tokenizer::new(config.tokenizer.clone())?;
        let ngram_size = config.ngram_size;

        let mut tasks = Vec::with_capacity(paths.len());
        for path in paths {
            let path = path.clone();
            let tokenizer = tokenizer.clone();
            tasks.push(tokio::task::spawn_blocking(move || {
                read_table(&path, &tokenizer, ngram_size)
            }));
        }

        let mut tables = Vec::with_capacity(tasks.len());
        for (i, task) in tasks.into_iter().enumerate() {
            let table = task
                .await
                .map_err(|e| SimilarityError::TaskFailed(e.to_string()))??;
            log::debug!(
                "N-grams for document {i}: {} distinct, {} total",
                table.len(),
                table.total()
            );
            tables.push(table);
        }

        let labels = paths.iter().map(|p| p.display().to_string()).collect();
        Ok(Self { labels, tables })
    }

    /// Tables built from in-memory texts, labelled by the caller.
    pub fn from_texts<L, T>(documents: impl IntoIterator<Item = (L, T)>, config: &SimilarityConfig) -> Result<Self>
    where
        L: Into<String>,
        T: AsRef<str>,
    {
        config.validate()?;
        let tokenizer = Tokenizer::new(config.tokenizer.clone())?;
        let mut ngrams = Self::default();
        for (label, text) in documents {
            ngrams.labels.push(label.into());
            ngrams
                .tables
                .push(tokenizer.ngram_table(text.as_ref(), config.ngram_size));
        }
        Ok(ngrams)
    }

    /// Replace the path labels, e.g. with bill numbers.
    #[must_use]
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        if labels.len() == self.tables.len() {
            self.labels = labels;
        } else {
            log::warn!(
                "Ignoring {} labels for {} documents",
                labels.len(),
                self.tables.len()
            );
        }
        self
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn tables(&self) -> &[NgramTable] {
        &self.tables
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

fn read_table(path: &Path, tokenizer: &Tokenizer, ngram_size: usize) -> Result<NgramTable> {
    let text = std::fs::read_to_string(path).map_err(|source| SimilarityError::ComparisonInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(tokenizer.ngram_table(&text, ngram_size))
}
