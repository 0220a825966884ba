//! Ordered first-match-wins classifiers

use std::fmt;

type Predicate<I> = Box<dyn Fn(&I) -> bool + Send + Sync>;

struct Rule<I, O> {
    name: &'static str,
    predicate: Predicate<I>,
    outcome: O,
}

/// An ordered list of `(predicate, outcome)` rules with a default outcome
///
/// Rules are evaluated in insertion order and the first matching rule wins.
/// When no rule matches the default is returned, so classification is total.
pub struct Classifier<I, O> {
    rules: Vec<Rule<I, O>>,
    default: O,
}

impl<I, O: Clone> Classifier<I, O> {
    pub fn new(default: O) -> Self {
        Self {
            rules: Vec::new(),
            default,
        }
    }

    /// Append a rule after all existing ones
    pub fn rule(
        mut self,
        name: &'static str,
        predicate: impl Fn(&I) -> bool + Send + Sync + 'static,
        outcome: O,
    ) -> Self {
        self.rules.push(Rule {
            name,
            predicate: Box::new(predicate),
            outcome,
        });
        self
    }

    pub fn classify(&self, input: &I) -> O {
        self.rules
            .iter()
            .find(|rule| (rule.predicate)(input))
            .map(|rule| rule.outcome.clone())
            .unwrap_or_else(|| self.default.clone())
    }

    /// Name of the rule that matched, or `None` when the default applied
    pub fn matched_rule(&self, input: &I) -> Option<&'static str> {
        self.rules
            .iter()
            .find(|rule| (rule.predicate)(input))
            .map(|rule| rule.name)
    }

    /// Rule names in evaluation order
    #[cfg(test)]
    pub(crate) fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name).collect()
    }
}

impl<I, O: fmt::Debug> fmt::Debug for Classifier<I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rules: Vec<(&str, &O)> = self.rules.iter().map(|r| (r.name, &r.outcome)).collect();
        f.debug_struct("Classifier")
            .field("rules", &rules)
            .field("default", &self.default)
            .finish()
    }
}
