//! Parsing of `tabular` column specifications such as `l|c|S` or `@{}lp{3cm}r`.

/// One unit of a column specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColumnSpecToken {
    /// A single-character specifier: a column type, `|`, `@`, ...
    Type(char),
    /// A brace-delimited group, braces included, e.g. `{3cm}`.
    Group(String),
}

impl ColumnSpecToken {
    pub fn leading_char(&self) -> char {
        match self {
            ColumnSpecToken::Type(c) => *c,
            ColumnSpecToken::Group(_) => '{',
        }
    }

    /// `|` draws a rule between columns.
    pub fn is_separator(&self) -> bool {
        matches!(self, ColumnSpecToken::Type('|'))
    }

    /// Whether this token introduces a data column.
    ///
    /// Groups are arguments of the preceding specifier, and `@`, `!`, `>`
    /// and `<` insert material between or around columns.
    pub fn is_column(&self) -> bool {
        match self {
            ColumnSpecToken::Type(c) => !matches!(c, '|' | '@' | '!' | '>' | '<'),
            ColumnSpecToken::Group(_) => false,
        }
    }
}

/// A parsed column specification.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnSpec {
    tokens: Vec<ColumnSpecToken>,
    consumed: usize,
}

impl ColumnSpec {
    /// Parses `spec` from left to right.
    ///
    /// Whitespace is skipped. A `{` captures everything up to and including
    /// the first unescaped `}`; an unterminated group runs to the end of the
    /// input. A `}` outside a group ends the specification, which lets the
    /// caller pass the rest of a line after `\begin{tabular}{`.
    pub fn parse(spec: &str) -> Self {
        let mut tokens = Vec::new();
        let mut pos = 0;
        while let Some(c) = spec[pos..].chars().next() {
            match c {
                '{' => {
                    let end = group_end(spec, pos);
                    tokens.push(ColumnSpecToken::Group(spec[pos..end].to_string()));
                    pos = end;
                    continue;
                }
                '}' => return Self { tokens, consumed: pos },
                c if c.is_whitespace() => {}
                other => tokens.push(ColumnSpecToken::Type(other)),
            }
            pos += c.len_utf8();
        }
        Self {
            tokens,
            consumed: spec.len(),
        }
    }

    pub fn tokens(&self) -> &[ColumnSpecToken] {
        &self.tokens
    }

    /// Type codes of the data columns, in order.
    pub fn column_types(&self) -> Vec<char> {
        self.tokens
            .iter()
            .filter(|token| token.is_column())
            .map(ColumnSpecToken::leading_char)
            .collect()
    }

    pub fn column_count(&self) -> usize {
        self.tokens.iter().filter(|token| token.is_column()).count()
    }

    /// Byte length of the specification text, excluding the `}` that closed it.
    pub fn consumed(&self) -> usize {
        self.consumed
    }
}

/// Index just past the first unescaped `}` after `open`, or the input length.
fn group_end(spec: &str, open: usize) -> usize {
    let bytes = spec.as_bytes();
    let mut i = open + 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'}' => return i + 1,
            _ => i += 1,
        }
    }
    bytes.len()
}
