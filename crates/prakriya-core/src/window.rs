//! Windowed rules: a left/current/right view of three adjacent terms.
//!
//! A [`WindowRule`] matches its context predicates against a [`Window`] and
//! runs its body only on a match. The body reports what to do with the
//! current term through a [`RuleResult`]; the rule turns that into zero,
//! one, or two successor windows.

use std::fmt;
use std::sync::Arc;

use prakriya_model::{RuleId, Term, Upadesha};

/// Three adjacent terms. Only `cur` is ever rewritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Window {
    pub left: Option<Arc<Term>>,
    pub cur: Arc<Term>,
    pub right: Option<Arc<Term>>,
}

impl Window {
    pub fn new(left: Option<Arc<Term>>, cur: Arc<Term>, right: Option<Arc<Term>>) -> Self {
        Self { left, cur, right }
    }

    /// The same window with `cur` replaced.
    #[must_use]
    pub fn with_cur(&self, cur: Term) -> Self {
        Self {
            left: self.left.clone(),
            cur: Arc::new(cur),
            right: self.right.clone(),
        }
    }
}

type Predicate = dyn Fn(Option<&Term>) -> bool + Send + Sync;

/// A predicate over one position of a window. An absent neighbour is
/// passed as `None`.
pub struct Context(Box<Predicate>);

impl Context {
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(Option<&Term>) -> bool + Send + Sync + 'static,
    {
        Self(Box::new(predicate))
    }

    pub fn matches(&self, term: Option<&Term>) -> bool {
        (self.0)(term)
    }

    #[must_use]
    pub fn and(self, other: Context) -> Self {
        Self::new(move |term| self.matches(term) && other.matches(term))
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Context(..)")
    }
}

/// Context predicates used by the stem rules.
pub mod ctx {
    use prakriya_model::{Lakshana, Marker, SoundClass, Tag};

    use super::Context;

    pub fn tag(tag: Tag) -> Context {
        Context::new(move |term| term.is_some_and(|t| t.has_tag(tag)))
    }

    pub fn lakshana_any(lakshana: &[Lakshana]) -> Context {
        let lakshana = lakshana.to_vec();
        Context::new(move |term| term.is_some_and(|t| t.any_lakshana(&lakshana)))
    }

    pub fn marker_any(markers: &[Marker]) -> Context {
        let markers = markers.to_vec();
        Context::new(move |term| term.is_some_and(|t| t.any_marker(&markers)))
    }

    pub fn starts_with(class: SoundClass) -> Context {
        Context::new(move |term| term.is_some_and(|t| t.starts_with(&class)))
    }

    pub fn ends_with(class: SoundClass) -> Context {
        Context::new(move |term| term.is_some_and(|t| t.ends_in(&class)))
    }

    /// Matches terms whose clean upadeśa value is one of `values`.
    pub fn clean_in(values: &[&str]) -> Context {
        let values: Vec<String> = values.iter().map(|v| (*v).to_string()).collect();
        Context::new(move |term| term.is_some_and(|t| values.iter().any(|v| v == t.clean())))
    }

    /// Negation. An absent term satisfies `not(..)` of anything that
    /// requires a term.
    pub fn not(inner: Context) -> Context {
        Context::new(move |term| !inner.matches(term))
    }
}

/// A substitution for the current term.
pub enum Substitution {
    /// Placed by [`Term::tasya`] according to the upadeśa's markers.
    Upadesha(Upadesha),
    /// Arbitrary rewrite given the current term and its right neighbour.
    Operator(Box<dyn FnOnce(&Term, Option<&Term>) -> Term + Send>),
}

impl Substitution {
    pub fn agama(raw: &str) -> Self {
        Substitution::Upadesha(Upadesha::agama(raw))
    }

    pub fn adesha(raw: &str) -> Self {
        Substitution::Upadesha(Upadesha::adesha(raw))
    }

    pub fn operator<F>(f: F) -> Self
    where
        F: FnOnce(&Term, Option<&Term>) -> Term + Send + 'static,
    {
        Substitution::Operator(Box::new(f))
    }

    fn apply(self, cur: &Term, right: Option<&Term>) -> Term {
        match self {
            Substitution::Upadesha(upadesha) => cur.tasya(&upadesha),
            Substitution::Operator(f) => f(cur, right),
        }
    }
}

impl fmt::Debug for Substitution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Substitution::Upadesha(upadesha) => write!(f, "Upadesha({upadesha})"),
            Substitution::Operator(_) => f.write_str("Operator(..)"),
        }
    }
}

/// What a window body decided.
#[derive(Debug)]
pub enum RuleResult {
    /// The rule does not change anything.
    Unchanged,
    Substitute(Substitution),
    /// The substitution may be declined. Both outcomes are produced.
    Optional(Substitution),
}

type WindowBody = dyn Fn(&Window) -> RuleResult + Send + Sync;

pub struct WindowRule {
    name: String,
    id: RuleId,
    left: Option<Context>,
    cur: Option<Context>,
    right: Option<Context>,
    body: Box<WindowBody>,
}

impl WindowRule {
    pub fn new<F>(name: impl Into<String>, body: F) -> Self
    where
        F: Fn(&Window) -> RuleResult + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            id: RuleId(0),
            left: None,
            cur: None,
            right: None,
            body: Box::new(body),
        }
    }

    #[must_use]
    pub fn left(mut self, context: Context) -> Self {
        self.left = Some(context);
        self
    }

    #[must_use]
    pub fn cur(mut self, context: Context) -> Self {
        self.cur = Some(context);
        self
    }

    #[must_use]
    pub fn right(mut self, context: Context) -> Self {
        self.right = Some(context);
        self
    }

    /// Set by the rule set on registration.
    pub(crate) fn with_id(mut self, id: RuleId) -> Self {
        self.id = id;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    /// Returns true if every context predicate holds. Missing predicates
    /// always hold.
    pub fn matches(&self, window: &Window) -> bool {
        let holds = |context: &Option<Context>, term: Option<&Term>| {
            context.as_ref().is_none_or(|c| c.matches(term))
        };
        holds(&self.left, window.left.as_deref())
            && holds(&self.cur, Some(&window.cur))
            && holds(&self.right, window.right.as_deref())
    }

    /// Successor windows. A window the rule does not match passes through
    /// unchanged.
    ///
    /// An optional result yields the declined window first, with this
    /// rule's identity recorded on the current term. If it was already
    /// recorded, or if accepting leaves the value as it was, only the
    /// declined window is produced.
    pub fn apply(&self, window: &Window) -> Vec<Window> {
        if !self.matches(window) {
            return vec![window.clone()];
        }
        let right = window.right.as_deref();
        match (self.body)(window) {
            RuleResult::Unchanged => vec![window.clone()],
            RuleResult::Substitute(substitution) => {
                vec![window.with_cur(substitution.apply(&window.cur, right))]
            }
            RuleResult::Optional(substitution) => {
                let declined = window.with_cur(window.cur.decline(self.id));
                if window.cur.is_declined(self.id) {
                    return vec![declined];
                }
                let accepted = substitution.apply(&window.cur, right);
                if accepted.value() == window.cur.value() {
                    // Accepting would only duplicate the declined branch.
                    return vec![declined];
                }
                vec![declined, window.with_cur(accepted)]
            }
        }
    }
}

impl fmt::Debug for WindowRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowRule")
            .field("name", &self.name)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use prakriya_model::Tag;

    use super::*;

    fn window(cur: &str, right: Option<Term>) -> Window {
        Window::new(None, Arc::new(Term::dhatu(cur)), right.map(Arc::new))
    }

    #[test]
    fn unmatched_window_passes_through() {
        let rule = WindowRule::new("lopa", |_: &Window| {
            RuleResult::Substitute(Substitution::operator(|cur, _| cur.lopa()))
        })
        .left(ctx::tag(Tag::Abhyasa));
        let input = window("ci", None);
        assert_eq!(rule.apply(&input), vec![input.clone()]);
    }

    #[test]
    fn optional_without_effect_only_declines() {
        let rule = WindowRule::new("same", |_: &Window| {
            RuleResult::Optional(Substitution::operator(|cur, _| cur.clone()))
        });
        let out = rule.apply(&window("ci", None));
        assert_eq!(out.len(), 1);
        assert!(out[0].cur.is_declined(rule.id()));
    }

    #[test]
    fn not_accepts_absent_neighbour() {
        let context = ctx::not(ctx::tag(Tag::Pratyaya));
        assert!(context.matches(None));
        assert!(!context.matches(Some(&Term::pratyaya("kta"))));
    }
}
