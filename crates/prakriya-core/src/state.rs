//! Immutable derivation state.
//!
//! A [`State`] is an ordered sequence of terms plus the set of operations
//! already attempted on it. Terms are held behind `Arc`, so deriving a new
//! state from an old one copies pointers, not terms.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use prakriya_model::{Op, Tag, Term};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    terms: Vec<Arc<Term>>,
    ops: BTreeSet<Op>,
}

impl State {
    pub fn new(terms: impl IntoIterator<Item = Term>) -> Self {
        Self {
            terms: terms.into_iter().map(Arc::new).collect(),
            ops: BTreeSet::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Term>> {
        self.terms.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Term>> + '_ {
        self.terms.iter()
    }

    pub fn ops(&self) -> &BTreeSet<Op> {
        &self.ops
    }

    pub fn has_op(&self, op: Op) -> bool {
        self.ops.contains(&op)
    }

    /// First term carrying `tag`, with its index.
    pub fn find(&self, tag: Tag) -> Option<(usize, &Arc<Term>)> {
        self.find_all(tag).next()
    }

    /// Every term carrying `tag`, in positional order.
    pub fn find_all(&self, tag: Tag) -> impl Iterator<Item = (usize, &Arc<Term>)> + '_ {
        self.terms
            .iter()
            .enumerate()
            .filter(move |(_, term)| term.has_tag(tag))
    }

    /// The first term after `index` that still has sounds.
    pub fn next(&self, index: usize) -> Option<(usize, &Arc<Term>)> {
        self.terms
            .iter()
            .enumerate()
            .skip(index + 1)
            .find(|(_, term)| !term.is_empty())
    }

    /// The last term before `index` that still has sounds.
    pub fn prev(&self, index: usize) -> Option<(usize, &Arc<Term>)> {
        self.terms
            .iter()
            .enumerate()
            .take(index)
            .rev()
            .find(|(_, term)| !term.is_empty())
    }

    /// A new state with the term at `index` replaced. Out-of-range indices
    /// return an identical state.
    #[must_use]
    pub fn replace(&self, index: usize, term: impl Into<Arc<Term>>) -> Self {
        let mut state = self.clone();
        if let Some(slot) = state.terms.get_mut(index) {
            *slot = term.into();
        }
        state
    }

    /// A new state with `term` inserted before `index`.
    #[must_use]
    pub fn insert(&self, index: usize, term: impl Into<Arc<Term>>) -> Self {
        let mut state = self.clone();
        let index = index.min(state.terms.len());
        state.terms.insert(index, term.into());
        state
    }

    /// A new state with `op` recorded.
    #[must_use]
    pub fn add_op(&self, op: Op) -> Self {
        let mut state = self.clone();
        state.ops.insert(op);
        state
    }

    /// Concatenated values of every term.
    pub fn surface(&self) -> String {
        self.terms.iter().map(|term| term.value()).collect()
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for term in self.terms.iter().filter(|term| !term.is_empty()) {
            if !first {
                write!(f, " + ")?;
            }
            write!(f, "{term}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> State {
        State::new([Term::dhatu("gam"), Term::new(""), Term::vibhakti("atus")])
    }

    #[test]
    fn next_skips_empty_terms() {
        let state = sample();
        assert_eq!(state.next(0).map(|(i, _)| i), Some(2));
        assert_eq!(state.prev(2).map(|(i, _)| i), Some(0));
        assert!(state.next(2).is_none());
    }

    #[test]
    fn replace_shares_untouched_terms() {
        let state = sample();
        let replaced = state.replace(0, Term::dhatu("gm"));
        assert!(Arc::ptr_eq(&state.terms[2], &replaced.terms[2]));
        assert_eq!(state.surface(), "gamatus");
        assert_eq!(replaced.surface(), "gmatus");
    }

    #[test]
    fn display_joins_non_empty_values() {
        assert_eq!(sample().to_string(), "gam + atus");
    }
}
