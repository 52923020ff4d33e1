#![no_main]
use libfuzzer_sys::fuzz_target;
use texnum_core::tabular::ColumnSpec;

fuzz_target!(|data: &[u8]| {
    // Unterminated groups and stray braces must neither panic nor over-read.
    let s = String::from_utf8_lossy(data);
    let spec = ColumnSpec::parse(&s);
    assert!(spec.consumed() <= s.len());
    assert!(spec.column_count() <= spec.tokens().len());
});
