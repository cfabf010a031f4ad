//! Ordered registry of window rules.
//!
//! Registration order is the rule's identity. When several rules match the
//! same window, the one registered last is the most specific and is tried
//! first.

use std::collections::BTreeSet;
use std::ops::Range;

use prakriya_model::RuleId;
use thiserror::Error;
use tracing::trace;

use crate::window::{Window, WindowRule};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleSetError {
    #[error("window rule registered twice: {0}")]
    DuplicateRule(String),
    #[error("rule sets {first} and {second} share rule identities {overlap:?}")]
    OverlappingIds {
        first: String,
        second: String,
        overlap: Range<usize>,
    },
}

/// Reject sets whose identities overlap. Declines are recorded by identity,
/// so two rules sharing one would block each other.
pub fn ensure_disjoint(sets: &[(&str, &RuleSet)]) -> Result<(), RuleSetError> {
    for (i, (first, a)) in sets.iter().enumerate() {
        for (second, b) in &sets[i + 1..] {
            let (a, b) = (a.id_range(), b.id_range());
            let overlap = a.start.max(b.start)..a.end.min(b.end);
            if !overlap.is_empty() {
                return Err(RuleSetError::OverlappingIds {
                    first: (*first).to_string(),
                    second: (*second).to_string(),
                    overlap,
                });
            }
        }
    }
    Ok(())
}

#[derive(Debug, Default)]
pub struct RuleSet {
    rules: Vec<WindowRule>,
    first_id: usize,
}

impl RuleSet {
    pub fn builder() -> RuleSetBuilder {
        RuleSetBuilder::default()
    }

    /// A builder whose identities continue after this set's, so rules in the
    /// two sets never share an identity.
    pub fn builder_after(&self) -> RuleSetBuilder {
        RuleSetBuilder {
            rules: Vec::new(),
            first_id: self.next_id(),
        }
    }

    fn next_id(&self) -> usize {
        self.first_id + self.rules.len()
    }

    /// Identities assigned to this set's rules.
    pub fn id_range(&self) -> Range<usize> {
        self.first_id..self.next_id()
    }

    /// Rules in registration order.
    pub fn rules(&self) -> &[WindowRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply the most specific rule that changes the window.
    ///
    /// Rules are consulted latest-registered first. The first matching rule
    /// whose output differs from the input wins. If none does, the window
    /// passes through unchanged.
    pub fn apply(&self, window: &Window) -> Vec<Window> {
        for rule in self.rules.iter().rev() {
            if !rule.matches(window) {
                continue;
            }
            let windows = rule.apply(window);
            if windows.iter().any(|w| w != window) {
                trace!(rule = rule.name(), term = %window.cur, outcomes = windows.len(), "window rule applied");
                return windows;
            }
        }
        vec![window.clone()]
    }
}

#[derive(Debug, Default)]
pub struct RuleSetBuilder {
    rules: Vec<WindowRule>,
    first_id: usize,
}

impl RuleSetBuilder {
    #[must_use]
    pub fn rule(mut self, rule: WindowRule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Assign identities and reject duplicate names.
    pub fn build(self) -> Result<RuleSet, RuleSetError> {
        let mut names = BTreeSet::new();
        let mut rules = Vec::with_capacity(self.rules.len());
        for (offset, rule) in self.rules.into_iter().enumerate() {
            if !names.insert(rule.name().to_string()) {
                return Err(RuleSetError::DuplicateRule(rule.name().to_string()));
            }
            rules.push(rule.with_id(RuleId(self.first_id + offset)));
        }
        Ok(RuleSet {
            rules,
            first_id: self.first_id,
        })
    }
}
