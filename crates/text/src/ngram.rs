use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Occurrence counts of every `n`-token window of a document.
///
/// Keys are kept in first-seen order so iteration is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NgramTable {
    counts: HashMap<String, usize>,
    keys: Vec<String>,
}

impl NgramTable {
    /// Count every contiguous window of `n` tokens, joined by a single space.
    ///
    /// Fewer than `n` tokens (or `n == 0`) yields an empty table.
    #[must_use]
    pub fn from_tokens<S: AsRef<str>>(tokens: &[S], n: usize) -> Self {
        let mut table = Self::default();
        if n == 0 || tokens.len() < n {
            return table;
        }

        for window in tokens.windows(n) {
            let gram = window
                .iter()
                .map(AsRef::as_ref)
                .collect::<Vec<&str>>()
                .join(" ");
            table.add(gram);
        }
        table
    }

    fn add(&mut self, gram: String) {
        if let Some(count) = self.counts.get_mut(&gram) {
            *count += 1;
            return;
        }
        self.keys.push(gram.clone());
        self.counts.insert(gram, 1);
    }

    /// Occurrences of `gram` (0 when absent)
    #[must_use]
    pub fn count(&self, gram: &str) -> usize {
        self.counts.get(gram).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Number of distinct n-grams
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Sum of all counts
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// `(gram, count)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> + '_ {
        self.keys
            .iter()
            .map(|key| (key.as_str(), self.count(key)))
    }
}
