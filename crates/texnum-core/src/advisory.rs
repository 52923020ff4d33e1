use crate::source::Range;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One reported stylistic defect.
///
/// `range` points into the original source. `line` and `offset` are the
/// original line at `range.start` and the byte offset of `range.start` from
/// the start of the document, so a renderer never has to re-read the file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub rule_id: String,
    pub range: Range,
    pub message: String,
    pub resource: String,
    pub line: String,
    pub offset: usize,
}

impl Advisory {
    /// Renders the advisory followed by its source line and a caret marker.
    pub fn render(&self) -> String {
        let start = self.range.start.column.min(self.line.len());
        let end = if self.range.end.line == self.range.start.line {
            self.range.end.column.clamp(start, self.line.len())
        } else {
            self.line.len()
        };
        let indent = char_width(&self.line, 0, start);
        let width = char_width(&self.line, start, end).max(1);
        format!(
            "{}\n  {}\n  {}{}",
            self,
            self.line,
            " ".repeat(indent),
            "^".repeat(width)
        )
    }
}

fn char_width(line: &str, start: usize, end: usize) -> usize {
    line.get(start..end).map_or(end - start, |s| s.chars().count())
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}: {} [{}]",
            self.resource,
            self.range.start.line + 1,
            self.range.start.column + 1,
            self.message,
            self.rule_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::Position;
    use expect_test::expect;

    fn sample() -> Advisory {
        Advisory {
            rule_id: "num:words".to_string(),
            range: Range::new(Position::new(4, 9), Position::new(4, 10)),
            message: "use the English word for integers from zero to ten".to_string(),
            resource: "paper.tex".to_string(),
            line: "We found 3 defects.".to_string(),
            offset: 120,
        }
    }

    #[test]
    fn test_display() {
        expect![[r#"paper.tex:5:10: use the English word for integers from zero to ten [num:words]"#]]
            .assert_eq(&sample().to_string());
    }

    #[test]
    fn test_render_with_caret() {
        expect![[r#"
            paper.tex:5:10: use the English word for integers from zero to ten [num:words]
              We found 3 defects.
                       ^"#]]
        .assert_eq(&sample().render());
    }

    #[test]
    fn test_json_shape() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["rule_id"], "num:words");
        assert_eq!(value["range"]["start"]["line"], 4);
        assert_eq!(value["offset"], 120);
    }
}
