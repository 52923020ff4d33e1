//! Scanning of numeric literals.

use once_cell::sync::Lazy;
use regex::Regex;

/// Optional minus, digits, optional decimal point, at least one trailing digit.
static NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"-?[0-9]*\.?[0-9]+").expect("number pattern is valid"));

/// A numeric literal found in a piece of text.
///
/// `start` and `end` are byte offsets into the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumericToken<'a> {
    pub text: &'a str,
    pub start: usize,
    pub end: usize,
}

impl NumericToken<'_> {
    pub fn is_decimal(&self) -> bool {
        self.text.contains('.')
    }

    /// Integer value of the token; `None` for decimals and for integers that
    /// do not fit in an `i64`.
    pub fn value(&self) -> Option<i64> {
        if self.is_decimal() {
            return None;
        }
        self.text.parse().ok()
    }
}

/// Lazily yields the numeric tokens of `text` from left to right.
///
/// The iterator is cheap to clone; a clone restarts from the clone point.
pub fn scan(text: &str) -> NumericTokens<'_> {
    NumericTokens {
        haystack: text,
        position: 0,
    }
}

#[derive(Debug, Clone)]
pub struct NumericTokens<'a> {
    haystack: &'a str,
    position: usize,
}

impl<'a> Iterator for NumericTokens<'a> {
    type Item = NumericToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.haystack.len() {
            return None;
        }
        let found = NUMBER.find_at(self.haystack, self.position)?;
        self.position = found.end();
        Some(NumericToken {
            text: found.as_str(),
            start: found.start(),
            end: found.end(),
        })
    }
}
