//! Small integers written as numerals in prose.
//!
//! Style guides ask for the integers zero to ten to be spelled out in running
//! text. The check works sentence by sentence and is deliberately
//! all-or-nothing: a sentence is reported only when *every* numeral in it is
//! an integer in range. "Between 3.5 and 2" is numeric data, not prose, and is
//! left alone even though it contains a small integer.
//!
//! ## Algorithm
//!
//! 1. Lines inside suppressing blocks (see [`crate::environment`]) are skipped.
//! 2. Each remaining line is segmented by the injected [`SentenceSplitter`].
//! 3. The numerals of a sentence are inspected in order; the first decimal or
//!    out-of-range integer disqualifies the sentence.
//! 4. A sentence with at least one numeral and no disqualifier yields one
//!    advisory, anchored at its first numeral.

use crate::advisory::Advisory;
use crate::environment::EnvironmentTracker;
use crate::numeric::{self, NumericToken};
use crate::rule::Rule;
use crate::sentence::{locate_sentences, RuleBasedSplitter, SentenceSplitter};
use crate::source::Document;

pub const RULE_ID: &str = "num:words";

pub const MESSAGE: &str = "use the English word for integers from zero to ten";

pub const DEFAULT_MAX_VALUE: i64 = 10;

/// Reports sentences whose numerals are all small integers.
#[derive(Debug, Clone)]
pub struct SentenceNumberChecker<S = RuleBasedSplitter> {
    splitter: S,
    max_value: i64,
}

impl SentenceNumberChecker<RuleBasedSplitter> {
    pub fn new() -> Self {
        Self::with_splitter(RuleBasedSplitter::new())
    }
}

impl Default for SentenceNumberChecker<RuleBasedSplitter> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SentenceSplitter> SentenceNumberChecker<S> {
    pub fn with_splitter(splitter: S) -> Self {
        Self {
            splitter,
            max_value: DEFAULT_MAX_VALUE,
        }
    }

    /// Sets the largest integer that should be spelled out.
    pub fn max_value(mut self, max_value: i64) -> Self {
        self.max_value = max_value;
        self
    }

    /// Returns the numeral to report for `sentence`, if the sentence violates.
    pub fn check_sentence<'a>(&self, sentence: &'a str) -> Option<NumericToken<'a>> {
        let mut first = None;
        for token in numeric::scan(sentence) {
            match token.value() {
                Some(value) if (0..=self.max_value).contains(&value) => {
                    first.get_or_insert(token);
                }
                _ => return None,
            }
        }
        first
    }

    /// Evaluates a whole document.
    pub fn check(&self, document: &Document) -> Vec<Advisory> {
        let mut tracker = EnvironmentTracker::new();
        let mut advisories = Vec::new();
        for (line_no, raw) in document.lines().enumerate() {
            let line = raw.trim_end();
            tracker.enter(line);
            if tracker.is_active() {
                self.check_line(document, line_no, line, &mut advisories);
            }
            tracker.exit(line);
        }
        advisories
    }

    fn check_line(
        &self,
        document: &Document,
        line_no: usize,
        line: &str,
        advisories: &mut Vec<Advisory>,
    ) {
        let sentences = self.splitter.split(line);
        for sentence in locate_sentences(line, &sentences) {
            if let Some(token) = self.check_sentence(sentence.text) {
                let range = document.map_range(
                    line_no,
                    sentence.offset + token.start,
                    sentence.offset + token.end,
                );
                advisories.push(document.advisory(RULE_ID, range, MESSAGE));
            }
        }
    }
}

impl<S: SentenceSplitter> Rule for SentenceNumberChecker<S> {
    fn id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Don't use Arabic numerals for integers from zero to ten."
    }

    fn evaluate(&self, document: &Document) -> Vec<Advisory> {
        self.check(document)
    }
}
