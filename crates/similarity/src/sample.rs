use crate::config::WordSampleConfig;
use crate::error::{Result, SimilarityError};
use bills_text::{Tokenizer, TokenizerConfig};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Random word sample drawn from a set of bill documents
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WordSample {
    /// Documents that contributed words
    pub documents: usize,
    /// Documents that could not be read
    pub skipped: Vec<PathBuf>,
    pub words: Vec<String>,
}

/// Tokenize every document and draw a random sample of its words.
///
/// Each readable document contributes `fraction` of its tokens. The pooled
/// words are shuffled once more and cut to `max_words`. Unreadable documents
/// are logged and listed in [`WordSample::skipped`].
pub async fn collect_word_samples(
    paths: &[PathBuf],
    tokenizer: &TokenizerConfig,
    config: &WordSampleConfig,
) -> Result<WordSample> {
    config.validate()?;
    let tokenizer = Tokenizer::new(tokenizer.clone())?;

    let mut tasks = Vec::with_capacity(paths.len());
    for path in paths {
        let path = path.clone();
        let tokenizer = tokenizer.clone();
        tasks.push(tokio::task::spawn_blocking(move || {
            let words = read_words(&path, &tokenizer);
            (path, words)
        }));
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut sample = WordSample::default();
    for task in tasks {
        let (path, words) = task
            .await
            .map_err(|e| SimilarityError::TaskFailed(e.to_string()))?;
        let mut words = match words {
            Ok(words) => words,
            Err(e) => {
                log::warn!("{e}");
                sample.skipped.push(path);
                continue;
            }
        };

        words.shuffle(&mut rng);
        words.truncate(sample_len(words.len(), config.fraction));
        log::debug!("Sampled {} words from {}", words.len(), path.display());
        sample.documents += 1;
        sample.words.extend(words);
    }

    sample.words.shuffle(&mut rng);
    sample.words.truncate(config.max_words);
    log::info!(
        "Word sample: {} words from {} documents ({} skipped)",
        sample.words.len(),
        sample.documents,
        sample.skipped.len()
    );
    Ok(sample)
}

fn sample_len(total: usize, fraction: f64) -> usize {
    ((total as f64 * fraction).round() as usize).min(total)
}

fn read_words(path: &Path, tokenizer: &Tokenizer) -> Result<Vec<String>> {
    let text = std::fs::read_to_string(path).map_err(|source| SimilarityError::ComparisonInput {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(tokenizer.tokenize(&text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_len_rounds_and_caps() {
        assert_eq!(sample_len(100, 0.05), 5);
        assert_eq!(sample_len(30, 0.05), 2);
        assert_eq!(sample_len(9, 0.05), 0);
        assert_eq!(sample_len(10, 1.0), 10);
    }
}
