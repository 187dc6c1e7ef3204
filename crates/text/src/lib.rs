//! # Bills Text
//!
//! Pure text normalization used by the metadata pipeline and the similarity engine.
//!
//! ## Pipeline
//!
//! ```text
//! Document text
//!     │
//!     ├──> Markup stripping (<...> spans → space)
//!     │
//!     ├──> Word tokenization (Unicode word bounds)
//!     │      └─> drop short tokens and tokens with punctuation
//!     │
//!     └──> N-gram table (sliding window → occurrence counts)
//! ```
//!
//! Titles get their own normalization: a trailing `of YYYY` is removed so that
//! `Consumers First Act of 2020` and `Consumers First Act` index together.
//!
//! ## Example
//!
//! ```rust
//! use bills_text::{build_ngram_table, strip_trailing_year};
//!
//! let table = build_ngram_table("<p>amend section heading striking paragraph inserting</p>", 4);
//! assert_eq!(table.total(), 3);
//! assert_eq!(strip_trailing_year("Clean Water Act of 1972"), "Clean Water Act");
//! ```

mod config;
mod error;
mod ngram;
mod title;
mod tokenizer;

pub use config::{
    TokenizerConfig, DEFAULT_EXCLUDED_PUNCTUATION, DEFAULT_MIN_TOKEN_LEN, DEFAULT_NGRAM_SIZE,
};
pub use error::{Result, TextError};
pub use ngram::NgramTable;
pub use title::{dedup_preserving_order, push_unique, strip_trailing_year};
pub use tokenizer::{build_ngram_table, strip_markup, tokenize, Tokenizer};
