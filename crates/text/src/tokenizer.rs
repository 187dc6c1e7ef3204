use crate::config::TokenizerConfig;
use crate::error::Result;
use crate::ngram::NgramTable;
use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;
use unicode_segmentation::UnicodeSegmentation;

static MARKUP_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("markup pattern"));

const LEADING_PUNCT: &[char] = &['(', '[', '"', '\'', '\u{201c}', '\u{2018}'];
const TRAILING_PUNCT: &[char] = &[
    ')', ']', '"', '\'', '\u{201d}', '\u{2019}', ',', ';', ':', '!', '?',
];
const CLITICS: &[&str] = &["n't", "'s", "\u{2019}s", "'re", "'ve", "'ll", "'d", "'m"];

/// Replaces every `<...>` span with a single space.
#[must_use]
pub fn strip_markup(text: &str) -> Cow<'_, str> {
    MARKUP_RE.replace_all(text, " ")
}

/// Word tokenizer used for n-gram comparison
#[derive(Debug, Clone)]
pub struct Tokenizer {
    config: TokenizerConfig,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            config: TokenizerConfig::default(),
        }
    }
}

impl Tokenizer {
    pub fn new(config: TokenizerConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "Tokenizer: min_token_len={}, excluded_punctuation={:?}",
            config.min_token_len,
            config.excluded_punctuation
        );
        Ok(Self { config })
    }

    #[must_use]
    pub const fn config(&self) -> &TokenizerConfig {
        &self.config
    }

    /// Split text into word tokens.
    ///
    /// Markup is removed and the text is split on whitespace. Sentence
    /// punctuation is trimmed from both ends and a trailing clitic (`'s`,
    /// `n't`, ...) is split off, so hyphenated and dotted words reach the
    /// filter whole. A token is kept when it is at least `min_token_len`
    /// graphemes long and contains no excluded punctuation.
    #[must_use]
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let plain = strip_markup(text);
        plain
            .split_whitespace()
            .flat_map(split_word)
            .filter(|word| self.keeps(word))
            .map(str::to_string)
            .collect()
    }

    /// Tokenize `text` and count every window of `n` tokens.
    #[must_use]
    pub fn ngram_table(&self, text: &str, n: usize) -> NgramTable {
        NgramTable::from_tokens(&self.tokenize(text), n)
    }

    fn keeps(&self, word: &str) -> bool {
        word.graphemes(true).count() >= self.config.min_token_len
            && !word
                .chars()
                .any(|c| self.config.excluded_punctuation.contains(c))
    }
}

/// Trim one whitespace-delimited word and split off a trailing clitic.
fn split_word(raw: &str) -> impl Iterator<Item = &str> {
    let mut word = raw
        .trim_start_matches(LEADING_PUNCT)
        .trim_end_matches(TRAILING_PUNCT);
    // a single final period ends the sentence; "U.S.C." keeps its inner dots
    if let Some(stripped) = word.strip_suffix('.') {
        if !stripped.contains('.') {
            word = stripped.trim_end_matches(TRAILING_PUNCT);
        }
    }

    let clitic = CLITICS
        .iter()
        .find(|c| word.len() > c.len() && word.ends_with(**c))
        .map(|c| word.len() - c.len());
    let (head, tail) = match clitic {
        Some(at) => (&word[..at], Some(&word[at..])),
        None => (word, None),
    };
    std::iter::once(head)
        .chain(tail)
        .filter(|part| !part.is_empty())
}

/// Tokenize with the default configuration.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    Tokenizer::default().tokenize(text)
}

/// Build an n-gram table with the default tokenizer.
#[must_use]
pub fn build_ngram_table(text: &str, n: usize) -> NgramTable {
    Tokenizer::default().ngram_table(text, n)
}
