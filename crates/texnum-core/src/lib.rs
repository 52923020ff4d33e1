//! # texnum Core
//!
//! Style checks for numerals in LaTeX sources.
//!
//! ## Overview
//!
//! Two rules are provided:
//!
//! - [`number_words`] - small integers (zero to ten) written as numerals in
//!   prose should be spelled out
//! - [`tabular`] - numeric table columns should be aligned on the decimal
//!   point (`siunitx` `S` columns)
//!
//! Both rules scan a *working text* that may differ from the file on disk
//! (comments stripped, macros expanded) and report positions in the
//! *original* text through a [`SourceMap`](source::SourceMap).
//!
//! ## Modules
//!
//! - [`source`] - positions, ranges, source mapping and [`Document`](source::Document)
//! - [`environment`] - nesting of math, verbatim and float blocks
//! - [`numeric`] - numeric literal scanning
//! - [`sentence`] - pluggable sentence segmentation
//! - [`number_words`] - the sentence-level number-word rule
//! - [`tabular`] - column specification parsing and the alignment rule
//! - [`rule`] - the [`Rule`](rule::Rule) trait and [`Linter`](rule::Linter)
//! - [`config`] - JSON configuration
//!
//! ## Examples
//!
//! ```
//! use texnum_core::config::LintConfig;
//! use texnum_core::rule::Linter;
//! use texnum_core::source::Document;
//!
//! let doc = Document::new("paper.tex", "We ran 3 experiments.\n");
//! let linter = Linter::from_config(&LintConfig::default());
//!
//! let advisories = linter.check(&doc);
//! assert_eq!(advisories.len(), 1);
//! assert_eq!(advisories[0].range.start.column, 7);
//! ```
//!
//! Swapping the sentence splitter:
//!
//! ```
//! use texnum_core::number_words::SentenceNumberChecker;
//! use texnum_core::sentence::SentenceSplitter;
//! use texnum_core::source::Document;
//!
//! struct Semicolons;
//!
//! impl SentenceSplitter for Semicolons {
//!     fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
//!         text.split(';').map(str::trim).collect()
//!     }
//! }
//!
//! let checker = SentenceNumberChecker::with_splitter(Semicolons);
//! let doc = Document::new("notes.tex", "3 apples; 12 pears");
//! assert_eq!(checker.check(&doc).len(), 1);
//! ```

pub mod advisory;
pub mod config;
pub mod environment;
pub mod error;
pub mod number_words;
pub mod numeric;
pub mod rule;
pub mod sentence;
pub mod source;
pub mod tabular;

pub use advisory::Advisory;
pub use config::LintConfig;
pub use error::{ConfigError, ConfigResult};
pub use rule::{Linter, Rule};
pub use source::{Document, Position, Range, SourceMap};
