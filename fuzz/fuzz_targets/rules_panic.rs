#![no_main]
use libfuzzer_sys::fuzz_target;
use texnum_core::{Document, LintConfig, Linter};

fuzz_target!(|data: &[u8]| {
    // Lossy conversion keeps "almost text" inputs in play.
    let s = String::from_utf8_lossy(data);
    let linter = Linter::from_config(&LintConfig::default());
    let _ = linter.check(&Document::new("fuzz.tex", s.into_owned()));
});
