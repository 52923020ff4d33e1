//! Decimal alignment of numeric table columns.
//!
//! A column whose cells are mostly numbers reads best when aligned on the
//! decimal point, which in LaTeX means the `S` column type from `siunitx`.
//! [`TabularAlignmentChecker`] walks the lines of a document, accumulating
//! per-table statistics in a [`TableState`], and reports a table once at its
//! `\end{tabular}` if any numeric-heavy column is not decimal-aligned.
//!
//! ## Per-line state machine
//!
//! ```text
//!            \begin{tabular}{spec}
//!   Idle ───────────────────────────► InTable ──┐ row: count numeric cells
//!    ▲                                   │  ◄────┘
//!    └───────────── \end{tabular} ───────┘ density check, reset
//! ```
//!
//! Rows are source lines holding exactly one unescaped `\\`. Rows that
//! cannot be accounted for are skipped: lines with several terminators and
//! rows whose cell count disagrees with the specification are reported,
//! rows using `\multicolumn` are ignored silently.

pub mod column_spec;

pub use column_spec::{ColumnSpec, ColumnSpecToken};

use crate::advisory::Advisory;
use crate::rule::Rule;
use crate::source::{Document, Range};
use once_cell::sync::Lazy;
use regex::Regex;

pub const RULE_ID: &str = "num:tabular";

pub const ALIGN_MESSAGE: &str = "align numeric columns by decimal point";

pub const MULTIPLE_ROWS_MESSAGE: &str = "start at most one new row per source line";

pub const COLUMN_COUNT_MESSAGE: &str = "column count must match the column specification";

pub const DEFAULT_DENSITY_THRESHOLD: f64 = 0.5;

/// Column type of `siunitx` decimal-aligned columns.
pub const DECIMAL_ALIGNED: char = 'S';

static TABULAR_BEGIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\begin\s*\{\s*tabular\s*\}").expect("tabular begin is valid"));

static TABULAR_END: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\end\s*\{\s*tabular\s*\}").expect("tabular end is valid"));

/// An optional `[pos]` argument, then the brace opening the column specification.
static SPEC_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(?:\[[^\]]*\]\s*)?\{").expect("spec opening is valid"));

static LEADING_RULE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^\s*(?:\\(?:hline|toprule|midrule|bottomrule)\b|\\c(?:mid)?rule(?:\([^)]*\))?\s*\{[^}]*\})\s*",
    )
    .expect("rule command pattern is valid")
});

/// Stand-in for `\&` so that escaped ampersands never split cells.
const ESCAPED_AMPERSAND: &str = "\u{1a}";

/// Byte positions of the unescaped `\\` row terminators in `line`.
///
/// A backslash always consumes the character after it, so `\&` and `\%` are
/// skipped and `\\\\` counts twice.
pub fn row_terminators(line: &str) -> RowTerminators<'_> {
    RowTerminators {
        bytes: line.as_bytes(),
        position: 0,
    }
}

pub fn count_row_terminators(line: &str) -> usize {
    row_terminators(line).count()
}

#[derive(Debug, Clone)]
pub struct RowTerminators<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl Iterator for RowTerminators<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.position < self.bytes.len() {
            let at = self.position;
            if self.bytes[at] != b'\\' {
                self.position += 1;
                continue;
            }
            self.position += 2;
            if self.bytes.get(at + 1) == Some(&b'\\') {
                return Some(at);
            }
        }
        None
    }
}

/// Statistics for the table currently being read.
///
/// `numeric_count` always has `column_count` entries. A fresh (default)
/// state is idle.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableState {
    pub in_table: bool,
    pub column_count: usize,
    pub numeric_count: Vec<usize>,
    pub row_count: usize,
    pub column_types: Vec<char>,
    /// Source span of the column specification, where advisories are anchored.
    pub spec_span: Range,
}

impl TableState {
    /// State for a table that has just been opened with `spec`.
    pub fn open(spec: &ColumnSpec, spec_span: Range) -> Self {
        let column_types = spec.column_types();
        Self {
            in_table: true,
            column_count: column_types.len(),
            numeric_count: vec![0; column_types.len()],
            row_count: 0,
            column_types,
            spec_span,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Fraction of data rows in which column `column` holds a number.
    ///
    /// `None` when no row has been counted yet or the column does not exist.
    pub fn density(&self, column: usize) -> Option<f64> {
        if self.row_count == 0 {
            return None;
        }
        let count = *self.numeric_count.get(column)?;
        Some(count as f64 / self.row_count as f64)
    }
}

/// Reports tables with numeric columns that are not decimal-aligned.
#[derive(Debug, Clone)]
pub struct TabularAlignmentChecker {
    density_threshold: f64,
    aligned_types: Vec<char>,
}

impl Default for TabularAlignmentChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TabularAlignmentChecker {
    pub fn new() -> Self {
        Self {
            density_threshold: DEFAULT_DENSITY_THRESHOLD,
            aligned_types: vec![DECIMAL_ALIGNED],
        }
    }

    /// A column is numeric-heavy when its density exceeds `threshold`.
    pub fn density_threshold(mut self, threshold: f64) -> Self {
        self.density_threshold = threshold;
        self
    }

    /// Column types exempt from the check.
    pub fn aligned_types(mut self, types: impl IntoIterator<Item = char>) -> Self {
        self.aligned_types = types.into_iter().collect();
        self
    }

    /// Evaluates a whole document with a fresh [`TableState`].
    pub fn check(&self, document: &Document) -> Vec<Advisory> {
        let mut state = TableState::default();
        let mut advisories = Vec::new();
        for (line_no, raw) in document.lines().enumerate() {
            self.process_line(&mut state, document, line_no, raw.trim_end(), &mut advisories);
        }
        if state.in_table {
            log::debug!(
                "{}: tabular still open at end of document after {} rows",
                document.resource(),
                state.row_count
            );
        }
        advisories
    }

    /// Advances `state` over one line of the working text.
    pub fn process_line(
        &self,
        state: &mut TableState,
        document: &Document,
        line_no: usize,
        line: &str,
        advisories: &mut Vec<Advisory>,
    ) {
        let mut from = 0;
        if state.in_table {
            let begin_at = TABULAR_BEGIN.find(line).map(|m| m.start());
            if let Some(end) = TABULAR_END.find(line) {
                if begin_at.map_or(true, |begin| end.start() < begin) {
                    self.process_row(state, document, line_no, line, 0, end.start(), advisories);
                    self.close_table(state, document, advisories);
                    from = end.end();
                }
            }
        }
        if let Some(begin) = TABULAR_BEGIN.find_at(line, from) {
            if state.in_table {
                log::warn!(
                    "{}:{}: tabular opened inside another tabular; discarding the outer table",
                    document.resource(),
                    line_no + 1
                );
                state.reset();
            }
            match self.open_table(state, document, line_no, line, begin.end()) {
                Some(spec_end) => from = spec_end,
                None => return,
            }
        }
        if !state.in_table {
            return;
        }

        let end = TABULAR_END.find_at(line, from);
        let to = end.as_ref().map_or(line.len(), |m| m.start());
        self.process_row(state, document, line_no, line, from, to, advisories);
        if end.is_some() {
            self.close_table(state, document, advisories);
        }
    }

    /// Opens a table at `\begin{tabular}`. Returns the column just past the
    /// column specification, or `None` when the line has no specification.
    fn open_table(
        &self,
        state: &mut TableState,
        document: &Document,
        line_no: usize,
        line: &str,
        after_begin: usize,
    ) -> Option<usize> {
        let Some(open) = SPEC_OPEN.find(&line[after_begin..]) else {
            log::debug!(
                "{}:{}: tabular without an inline column specification",
                document.resource(),
                line_no + 1
            );
            return None;
        };
        let spec_start = after_begin + open.end();
        let spec = ColumnSpec::parse(&line[spec_start..]);
        let spec_end = spec_start + spec.consumed();
        let span = document.map_range(line_no, spec_start, spec_end);
        *state = TableState::open(&spec, span);
        log::debug!(
            "{}:{}: tabular opened with {} columns {:?}",
            document.resource(),
            line_no + 1,
            state.column_count,
            state.column_types
        );
        Some(if line[spec_end..].starts_with('}') {
            spec_end + 1
        } else {
            spec_end
        })
    }

    /// Accounts for the row held in `line[from..to]`, if any.
    #[allow(clippy::too_many_arguments)]
    fn process_row(
        &self,
        state: &mut TableState,
        document: &Document,
        line_no: usize,
        line: &str,
        from: usize,
        to: usize,
        advisories: &mut Vec<Advisory>,
    ) {
        let segment = &line[from..to];
        let mut terminators = row_terminators(segment);
        let Some(first) = terminators.next() else {
            return;
        };
        if terminators.next().is_some() {
            let range = document.map_range(line_no, from + first, from + first + 2);
            advisories.push(document.advisory(RULE_ID, range, MULTIPLE_ROWS_MESSAGE));
            return;
        }

        let content = &segment[..first];
        if content.contains("\\multicolumn") {
            log::trace!("{}:{}: skipping \\multicolumn row", document.resource(), line_no + 1);
            return;
        }
        let cells_text = strip_leading_rules(content).replace("\\&", ESCAPED_AMPERSAND);
        let cells: Vec<&str> = cells_text.split('&').collect();
        if cells.len() != state.column_count {
            log::trace!(
                "{}:{}: row has {} cells, expected {}",
                document.resource(),
                line_no + 1,
                cells.len(),
                state.column_count
            );
            let range = document.map_range(line_no, from, from + first);
            advisories.push(document.advisory(RULE_ID, range, COLUMN_COUNT_MESSAGE));
            return;
        }

        for (count, cell) in state.numeric_count.iter_mut().zip(&cells) {
            if is_numeric(cell) {
                *count += 1;
            }
        }
        state.row_count += 1;
    }

    fn close_table(
        &self,
        state: &mut TableState,
        document: &Document,
        advisories: &mut Vec<Advisory>,
    ) {
        let misaligned = self.is_misaligned(state);
        log::debug!(
            "{}: tabular closed after {} rows, misaligned: {}",
            document.resource(),
            state.row_count,
            misaligned
        );
        if misaligned {
            advisories.push(document.advisory(RULE_ID, state.spec_span, ALIGN_MESSAGE));
        }
        state.reset();
    }

    /// Whether some numeric-heavy column of `state` is not decimal-aligned.
    /// A table without counted rows is never misaligned.
    pub fn is_misaligned(&self, state: &TableState) -> bool {
        state
            .column_types
            .iter()
            .enumerate()
            .any(|(column, column_type)| {
                state
                    .density(column)
                    .is_some_and(|density| density > self.density_threshold)
                    && !self.aligned_types.contains(column_type)
            })
    }
}

impl Rule for TabularAlignmentChecker {
    fn id(&self) -> &'static str {
        RULE_ID
    }

    fn description(&self) -> &'static str {
        "Align numeric table columns by decimal point."
    }

    fn evaluate(&self, document: &Document) -> Vec<Advisory> {
        self.check(document)
    }
}

fn strip_leading_rules(mut content: &str) -> &str {
    while let Some(found) = LEADING_RULE.find(content) {
        content = &content[found.end()..];
    }
    content
}

/// A cell is numeric when it parses as a number and holds at least one digit,
/// which keeps textual `inf` and `nan` cells out.
fn is_numeric(cell: &str) -> bool {
    let cell = cell.trim();
    cell.bytes().any(|b| b.is_ascii_digit()) && cell.parse::<f64>().is_ok()
}

#[cfg(test)]
mod tests;
