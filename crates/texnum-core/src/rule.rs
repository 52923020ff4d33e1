use crate::advisory::Advisory;
use crate::config::LintConfig;
use crate::number_words::SentenceNumberChecker;
use crate::source::Document;
use crate::tabular::TabularAlignmentChecker;

/// A check run over a whole document.
///
/// `evaluate` takes `&self`: all per-document state lives inside the call,
/// so a rule can be reused across documents and shared between threads.
pub trait Rule: Send + Sync {
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    fn evaluate(&self, document: &Document) -> Vec<Advisory>;
}

/// An ordered set of rules.
#[derive(Default)]
pub struct Linter {
    rules: Vec<Box<dyn Rule>>,
}

impl Linter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the enabled rules of `config`.
    pub fn from_config(config: &LintConfig) -> Self {
        let mut linter = Self::new();
        if config.number_words.enabled {
            linter = linter
                .with_rule(SentenceNumberChecker::new().max_value(config.number_words.max_value));
        }
        if config.tabular.enabled {
            linter = linter.with_rule(
                TabularAlignmentChecker::new()
                    .density_threshold(config.tabular.density_threshold)
                    .aligned_types(config.tabular.aligned_types.iter().copied()),
            );
        }
        linter
    }

    pub fn with_rule(mut self, rule: impl Rule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    /// Keeps only the rules whose id is listed.
    pub fn retain_ids<S: AsRef<str>>(&mut self, ids: &[S]) {
        self.rules
            .retain(|rule| ids.iter().any(|id| id.as_ref() == rule.id()));
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|rule| rule.as_ref())
    }

    /// Runs every rule in order and concatenates their advisories.
    pub fn check(&self, document: &Document) -> Vec<Advisory> {
        self.rules
            .iter()
            .flat_map(|rule| rule.evaluate(document))
            .collect()
    }
}
