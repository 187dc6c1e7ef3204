//! # Bills Similarity
//!
//! Pairwise n-gram comparison of bill documents.
//!
//! ## Pipeline
//!
//! ```text
//! document.xml paths
//!     │
//!     ├──> N-gram tables (blocking pool, input order kept)
//!     │
//!     ├──> Containment scores, both directions per pair
//!     │
//!     └──> Classification
//!            identical · nearly_identical · incorporates
//!            incorporated_by · some_similarity · unrelated
//! ```
//!
//! [`collect_word_samples`] draws a random word sample from the same
//! documents with the same tokenizer.
//!
//! Cell `[i][j]` of a [`CompareMatrix`] holds the share of document `i` found
//! in document `j`; cell `[j][i]` holds the reverse.

mod compare;
mod config;
mod error;
mod ngrams;
mod sample;

pub use compare::{
    classify, compare_bills, compare_documents, compare_ngrams, containment, document_path,
    Classification, CompareItem, CompareMatrix,
};
pub use config::{
    SimilarityConfig, Thresholds, WordSampleConfig, DEFAULT_MAX_SAMPLE_WORDS,
    DEFAULT_SAMPLE_FRACTION,
};
pub use error::{Result, SimilarityError};
pub use ngrams::DocumentNgrams;
pub use sample::{collect_word_samples, WordSample};
