//! Tracking of blocks in which prose scanning is suppressed.
//!
//! Math, verbatim and float-like environments contain numerals that are not
//! prose. [`EnvironmentTracker`] keeps a nesting depth over their delimiters;
//! prose is scanned only while the depth is zero.
//!
//! The depth is kind-agnostic: `\end{equation}` closes a depth opened by
//! `\begin{table}`. Only one level is entered (or left) per line, however
//! many delimiters the line holds.

use once_cell::sync::Lazy;
use regex::Regex;

/// Environments whose content is never treated as prose. Starred forms such
/// as `figure*` and `table*` are matched as well.
pub const SUPPRESSING_ENVIRONMENTS: &[&str] = &[
    "equation",
    "equation*",
    "align",
    "align*",
    "table",
    "tabular",
    "verbatim",
    "lstlisting",
    "IEEEkeywords",
    "figure",
    "matrix",
    "bmatrix",
    "Bmatrix",
    "pmatrix",
    "vmatrix",
    "Vmatrix",
    "smallmatrix",
];

static BLOCK_BEGIN: Lazy<Regex> = Lazy::new(|| delimiter_pattern("begin"));
static BLOCK_END: Lazy<Regex> = Lazy::new(|| delimiter_pattern("end"));

fn delimiter_pattern(command: &str) -> Regex {
    let names = SUPPRESSING_ENVIRONMENTS
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\\{command}\s*\{{\s*(?:{names})\*?\s*\}}"))
        .expect("environment delimiter pattern is valid")
}

/// Returns `true` if `line` opens a suppressing block.
pub fn opens_block(line: &str) -> bool {
    BLOCK_BEGIN.is_match(line) || has_control_symbol(line, b'[')
}

/// Returns `true` if `line` closes a suppressing block.
pub fn closes_block(line: &str) -> bool {
    BLOCK_END.is_match(line) || has_control_symbol(line, b']')
}

/// Finds the control symbol `\<symbol>` with an unescaped backslash, so that
/// the row-spacing form `\\[2pt]` is not mistaken for display math.
fn has_control_symbol(line: &str, symbol: u8) -> bool {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            if bytes.get(i + 1) == Some(&symbol) {
                return true;
            }
            i += 2;
        } else {
            i += 1;
        }
    }
    false
}

/// Nesting depth over suppressing blocks for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentTracker {
    depth: usize,
}

impl EnvironmentTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Call before the content of `line` is processed.
    pub fn enter(&mut self, line: &str) {
        if opens_block(line) {
            self.depth += 1;
        }
    }

    /// Call after the content of `line` is processed.
    ///
    /// An end delimiter at depth zero is ignored, so a stray `\end{...}`
    /// cannot suppress the rest of the document.
    pub fn exit(&mut self, line: &str) {
        if !closes_block(line) {
            return;
        }
        match self.depth.checked_sub(1) {
            Some(depth) => self.depth = depth,
            None => log::warn!("block end without a matching begin: {}", line.trim()),
        }
    }

    /// Prose scanning is active only outside every block.
    pub fn is_active(&self) -> bool {
        self.depth == 0
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn reset(&mut self) {
        self.depth = 0;
    }
}
