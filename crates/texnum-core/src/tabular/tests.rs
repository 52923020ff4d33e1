use super::*;
use crate::source::{Document, Position};

fn check(text: &str) -> Vec<Advisory> {
    TabularAlignmentChecker::new().check(&Document::new("table.tex", text))
}

#[test]
fn test_count_row_terminators() {
    assert_eq!(count_row_terminators("\t\t 1 & 1 \\\\"), 1);
    assert_eq!(count_row_terminators("\t\t 1 & 1 \\\\\\\\"), 2);
    assert_eq!(count_row_terminators("\t\t 1 & 1 \\\\\\&"), 1);
    assert_eq!(count_row_terminators("a \\& b"), 0);
    assert_eq!(count_row_terminators("trailing \\"), 0);
    assert_eq!(count_row_terminators(""), 0);
}

#[test]
fn test_row_terminator_positions() {
    let positions: Vec<_> = row_terminators(r"a \\ b \\[2pt]").collect();
    assert_eq!(positions, vec![2, 7]);
}

#[test]
fn test_numeric_column_not_aligned() {
    let text = "\
\\begin{tabular}{l|S}
a & 1.5 \\\\
2 & 2.25 \\\\
3 & 3.0 \\\\
4 & 4.75 \\\\
5 & 5.5 \\\\
\\end{tabular}
";
    let advisories = check(text);
    assert_eq!(advisories.len(), 1);
    let advisory = &advisories[0];
    assert_eq!(advisory.rule_id, RULE_ID);
    assert_eq!(advisory.message, ALIGN_MESSAGE);
    assert_eq!(advisory.range.start, Position::new(0, 16));
    assert_eq!(advisory.range.end, Position::new(0, 19));
    assert_eq!(advisory.line, "\\begin{tabular}{l|S}");
}

#[test]
fn test_aligned_numeric_columns_pass() {
    let text = "\
\\begin{tabular}{lS}
alpha & 1.5 \\\\
beta & 2.25 \\\\
\\end{tabular}
";
    assert!(check(text).is_empty());
}

#[test]
fn test_one_advisory_per_table() {
    let text = "\
\\begin{tabular}{ccc}
1 & 2 & 3 \\\\
4 & 5 & 6 \\\\
\\end{tabular}
";
    assert_eq!(check(text).len(), 1);
}

#[test]
fn test_density_at_threshold_is_not_reported() {
    let text = "\
\\begin{tabular}{lc}
1 & x \\\\
y & z \\\\
\\end{tabular}
";
    assert!(check(text).is_empty());
}

#[test]
fn test_zero_row_table() {
    let text = "\\begin{tabular}{rr}\n\\hline\n\\end{tabular}\n";
    assert!(check(text).is_empty());
}

#[test]
fn test_multiple_rows_on_one_line() {
    let text = "\
\\begin{tabular}{S}
1 \\\\ 2 \\\\
\\end{tabular}
";
    let advisories = check(text);
    assert_eq!(advisories.len(), 1);
    assert_eq!(advisories[0].message, MULTIPLE_ROWS_MESSAGE);
    assert_eq!(advisories[0].range.start, Position::new(1, 2));
    assert_eq!(advisories[0].range.end, Position::new(1, 4));
}

#[test]
fn test_column_count_mismatch() {
    let text = "\
\\begin{tabular}{ll}
a & b & c \\\\
\\end{tabular}
";
    let advisories = check(text);
    assert_eq!(advisories.len(), 1);
    assert_eq!(advisories[0].message, COLUMN_COUNT_MESSAGE);
    assert_eq!(advisories[0].range.start, Position::new(1, 0));
    assert_eq!(advisories[0].range.end, Position::new(1, 10));
}

#[test]
fn test_escaped_ampersand_is_not_a_separator() {
    let text = "\
\\begin{tabular}{lS}
R\\&D & 1.0 \\\\
\\end{tabular}
";
    assert!(check(text).is_empty());
}

#[test]
fn test_multicolumn_rows_are_skipped() {
    let text = "\
\\begin{tabular}{ll}
\\multicolumn{2}{c}{Header} \\\\
x & y \\\\
\\end{tabular}
";
    assert!(check(text).is_empty());
}

#[test]
fn test_rule_commands_are_stripped() {
    let text = "\
\\begin{tabular}{lr}
\\toprule x & 1 \\\\
\\midrule \\cmidrule(lr){1-2} y & 2 \\\\
\\end{tabular}
";
    let advisories = check(text);
    assert_eq!(advisories.len(), 1);
    assert_eq!(advisories[0].message, ALIGN_MESSAGE);
}

#[test]
fn test_end_without_begin_is_ignored() {
    assert!(check("1 & 2 \\\\\n\\end{tabular}\n").is_empty());
}

#[test]
fn test_row_on_end_line_is_counted() {
    let text = "\\begin{tabular}{c}\nx \\\\\n1 \\\\ \\end{tabular}\n";
    assert!(check(text).is_empty());
    let text = "\\begin{tabular}{c}\n1 \\\\ \\end{tabular}\n";
    assert_eq!(check(text).len(), 1);
}

#[test]
fn test_single_line_table() {
    let text = r"\begin{tabular}[t]{cc} 1 & 2 \\ \end{tabular}";
    let advisories = check(text);
    assert_eq!(advisories.len(), 1);
    assert_eq!(advisories[0].range.start, Position::new(0, 19));
}

#[test]
fn test_missing_specification_does_not_open_table() {
    let text = "\\begin{tabular}\n1 & 2 \\\\\n\\end{tabular}\n";
    assert!(check(text).is_empty());
}

#[test]
fn test_state_resets_between_tables() {
    let text = "\
\\begin{tabular}{c}
1 \\\\
\\end{tabular}
\\begin{tabular}{cc}
a & b \\\\
\\end{tabular}
";
    let advisories = check(text);
    assert_eq!(advisories.len(), 1);
    assert_eq!(advisories[0].range.start.line, 0);
}

#[test]
fn test_end_then_begin_on_one_line() {
    let text = "\
\\begin{tabular}{cc}
1 & 2 \\\\
3 & 4 \\\\
\\end{tabular}\\begin{tabular}{ll}
7 & 8 \\\\
\\end{tabular}
";
    let advisories = check(text);
    assert_eq!(advisories.len(), 2);
    assert_eq!(advisories[0].range.start, Position::new(0, 16));
    assert_eq!(advisories[1].range.start, Position::new(3, 29));
}

#[test]
fn test_textual_infinities_are_not_numeric() {
    let text = "\
\\begin{tabular}{lS}
inf & 1.0 \\\\
nan & 2.0 \\\\
-infinity & 3.0 \\\\
NaN & 4.0 \\\\
\\end{tabular}
";
    assert!(check(text).is_empty());
    assert!(is_numeric(" 1e3 "));
    assert!(!is_numeric("inf"));
}

#[test]
fn test_process_line_drives_state() {
    let checker = TabularAlignmentChecker::new();
    let doc = Document::new("t.tex", "");
    let mut state = TableState::default();
    let mut advisories = Vec::new();

    checker.process_line(&mut state, &doc, 0, r"\begin{tabular}{l|S|r}", &mut advisories);
    assert!(state.in_table);
    assert_eq!(state.column_count, 3);
    assert_eq!(state.column_types, vec!['l', 'S', 'r']);
    assert_eq!(state.numeric_count, vec![0, 0, 0]);

    checker.process_line(&mut state, &doc, 1, r"a & 1.5 & 7 \\", &mut advisories);
    checker.process_line(&mut state, &doc, 2, r"b & n/a & 8 \\", &mut advisories);
    assert_eq!(state.row_count, 2);
    assert_eq!(state.numeric_count, vec![0, 1, 2]);
    assert_eq!(state.density(2), Some(1.0));
    assert!(checker.is_misaligned(&state));

    checker.process_line(&mut state, &doc, 3, r"\end{tabular}", &mut advisories);
    assert_eq!(state, TableState::default());
    assert_eq!(advisories.len(), 1);
}

#[test]
fn test_configured_aligned_types() {
    let checker = TabularAlignmentChecker::new()
        .aligned_types(['S', 'd'])
        .density_threshold(0.9);
    let doc = Document::new(
        "t.tex",
        "\\begin{tabular}{dl}\n1 & 2 \\\\\n3 & x \\\\\n\\end{tabular}\n",
    );
    assert!(checker.check(&doc).is_empty());
}
