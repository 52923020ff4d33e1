//! Sentence segmentation.
//!
//! Segmentation is a pluggable capability: anything implementing
//! [`SentenceSplitter`] can be injected into the number-word rule, whether it
//! is backed by a statistical model or by rules. [`RuleBasedSplitter`] is the
//! default.

use std::collections::HashSet;

/// Splits a line of text into its sentences, in order.
pub trait SentenceSplitter: Send + Sync {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// A sentence and its byte offset within the line it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sentence<'a> {
    pub text: &'a str,
    pub offset: usize,
}

/// Recovers the offset of each sentence within `line`.
///
/// Sentences are searched for left to right from a running cursor, so a
/// sentence repeated within the line is located at its own occurrence.
/// Sentences that cannot be found verbatim are dropped.
pub fn locate_sentences<'a>(line: &'a str, sentences: &[&str]) -> Vec<Sentence<'a>> {
    let mut located = Vec::with_capacity(sentences.len());
    let mut cursor = 0;
    for sentence in sentences.iter().filter(|s| !s.is_empty()) {
        let Some(found) = line[cursor..].find(sentence) else {
            log::trace!("sentence not found in line: {sentence:?}");
            continue;
        };
        let offset = cursor + found;
        cursor = offset + sentence.len();
        located.push(Sentence {
            text: &line[offset..cursor],
            offset,
        });
    }
    located
}

const DEFAULT_ABBREVIATIONS: &[&str] = &[
    "al", "approx", "cf", "ch", "dr", "e.g", "eq", "eqs", "etc", "fig", "figs", "i.e", "jr", "mr",
    "mrs", "ms", "no", "nos", "p", "pp", "prof", "ref", "refs", "resp", "sec", "sect", "sr", "st",
    "tab", "vol", "vs", "viz",
];

/// Punctuation-driven segmentation.
///
/// A sentence ends at `.`, `?` or `!` (plus any closing quotes or brackets)
/// followed by whitespace or the end of the text, unless the word before a
/// `.` is a known abbreviation or a single capital initial.
#[derive(Debug, Clone)]
pub struct RuleBasedSplitter {
    abbreviations: HashSet<String>,
}

impl RuleBasedSplitter {
    pub fn new() -> Self {
        Self {
            abbreviations: DEFAULT_ABBREVIATIONS.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn with_abbreviations(mut self, abbreviations: &[&str]) -> Self {
        for abbreviation in abbreviations {
            self.abbreviations
                .insert(abbreviation.trim_end_matches('.').to_lowercase());
        }
        self
    }

    fn is_abbreviation(&self, preceding: &str) -> bool {
        let word = preceding
            .rsplit(|c: char| c.is_whitespace() || matches!(c, '(' | '[' | '{' | '~'))
            .next()
            .unwrap_or_default();
        let mut chars = word.chars();
        if let (Some(first), None) = (chars.next(), chars.next()) {
            if first.is_uppercase() {
                return true;
            }
        }
        self.abbreviations.contains(&word.to_lowercase())
    }
}

impl Default for RuleBasedSplitter {
    fn default() -> Self {
        Self::new()
    }
}

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '?' | '!')
}

fn is_closing(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '}')
}

impl SentenceSplitter for RuleBasedSplitter {
    fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut sentences = Vec::new();
        let mut start = 0;
        let mut chars = text.char_indices().peekable();

        while let Some((idx, c)) = chars.next() {
            if !is_terminator(c) {
                continue;
            }
            let mut end = idx + c.len_utf8();
            while let Some(&(next_idx, next)) = chars.peek() {
                if !is_terminator(next) && !is_closing(next) {
                    break;
                }
                end = next_idx + next.len_utf8();
                chars.next();
            }
            let at_break = chars.peek().map_or(true, |&(_, next)| next.is_whitespace());
            if !at_break || (c == '.' && self.is_abbreviation(&text[start..idx])) {
                continue;
            }
            push_trimmed(&mut sentences, &text[start..end]);
            start = end;
        }
        push_trimmed(&mut sentences, &text[start..]);
        sentences
    }
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn split(text: &str) -> Vec<&str> {
        RuleBasedSplitter::new().split(text)
    }

    #[test]
    fn test_split_on_terminators() {
        assert_eq!(
            split("We ran 3 tests. Did they pass? Yes!"),
            vec!["We ran 3 tests.", "Did they pass?", "Yes!"]
        );
    }

    #[test]
    fn test_decimal_point_does_not_split() {
        assert_eq!(split("The mean was 3.5 and 2 more."), vec!["The mean was 3.5 and 2 more."]);
    }

    #[test]
    fn test_abbreviations_and_initials() {
        assert_eq!(
            split("See Fig. 3 and the work of D. Knuth et al. for details. Done."),
            vec!["See Fig. 3 and the work of D. Knuth et al. for details.", "Done."]
        );
        assert_eq!(split("Use e.g. 4 cores."), vec!["Use e.g. 4 cores."]);
    }

    #[test]
    fn test_closing_punctuation_stays_with_sentence() {
        assert_eq!(
            split(r#"He said "stop." Then 2 left."#),
            vec![r#"He said "stop.""#, "Then 2 left."]
        );
    }

    #[test]
    fn test_custom_abbreviation() {
        let splitter = RuleBasedSplitter::new().with_abbreviations(&["Thm."]);
        assert_eq!(splitter.split("By Thm. 2 we are done."), vec!["By Thm. 2 we are done."]);
    }

    #[test]
    fn test_locate_sentences() {
        let line = "  One 1.  One 1.  ";
        let located = locate_sentences(line, &["One 1.", "One 1.", "missing"]);
        assert_eq!(
            located,
            vec![
                Sentence { text: "One 1.", offset: 2 },
                Sentence { text: "One 1.", offset: 10 },
            ]
        );
    }
}
