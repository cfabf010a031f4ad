//! State-level rules and the `once` / `require` combinators.
//!
//! A rule maps one [`State`] to zero or more successor states. Zero
//! successors means the rule does not apply. Combinators wrap a rule and
//! gate it on the operations recorded in the state.

use prakriya_model::Op;

use crate::state::State;

/// A rule that produces successor states.
pub trait Rule: Send + Sync {
    /// Name used in derivation histories and logs.
    fn name(&self) -> &str;

    /// Successor states. Empty when the rule does not apply.
    fn apply(&self, state: &State) -> Vec<State>;

    /// Operations that must already be recorded for this rule to run.
    fn requires(&self) -> Vec<Op> {
        Vec::new()
    }

    /// Operations this rule records.
    fn produces(&self) -> Vec<Op> {
        Vec::new()
    }
}

impl Rule for Box<dyn Rule> {
    fn name(&self) -> &str {
        self.as_ref().name()
    }

    fn apply(&self, state: &State) -> Vec<State> {
        self.as_ref().apply(state)
    }

    fn requires(&self) -> Vec<Op> {
        self.as_ref().requires()
    }

    fn produces(&self) -> Vec<Op> {
        self.as_ref().produces()
    }
}

type RuleBody = dyn Fn(&State) -> Vec<State> + Send + Sync;

/// A rule backed by a closure.
pub struct FnRule {
    name: String,
    body: Box<RuleBody>,
}

/// Lift a closure into a named rule.
pub fn rule<F>(name: impl Into<String>, body: F) -> FnRule
where
    F: Fn(&State) -> Vec<State> + Send + Sync + 'static,
{
    FnRule {
        name: name.into(),
        body: Box::new(body),
    }
}

impl Rule for FnRule {
    fn name(&self) -> &str {
        &self.name
    }

    fn apply(&self, state: &State) -> Vec<State> {
        (self.body)(state)
    }
}

/// Runs the inner rule at most once per derivation path.
///
/// The operation is recorded on the state before the inner rule sees it, so
/// every successor carries it, and a state that already carries it yields
/// nothing.
pub struct Once<R> {
    inner: R,
    op: Op,
}

impl<R: Rule> Rule for Once<R> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn apply(&self, state: &State) -> Vec<State> {
        if state.has_op(self.op) {
            return Vec::new();
        }
        self.inner.apply(&state.add_op(self.op))
    }

    fn requires(&self) -> Vec<Op> {
        self.inner.requires()
    }

    fn produces(&self) -> Vec<Op> {
        let mut ops = self.inner.produces();
        ops.push(self.op);
        ops
    }
}

/// Runs the inner rule only if the operation has already been recorded.
///
/// The operation only has to have been attempted; it need not have
/// changed anything.
pub struct Require<R> {
    inner: R,
    op: Op,
}

impl<R: Rule> Rule for Require<R> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn apply(&self, state: &State) -> Vec<State> {
        if !state.has_op(self.op) {
            return Vec::new();
        }
        self.inner.apply(state)
    }

    fn requires(&self) -> Vec<Op> {
        let mut ops = self.inner.requires();
        ops.push(self.op);
        ops
    }

    fn produces(&self) -> Vec<Op> {
        self.inner.produces()
    }
}

/// Combinator methods available on every rule.
pub trait RuleExt: Rule + Sized {
    fn once(self, op: Op) -> Once<Self> {
        Once { inner: self, op }
    }

    fn require(self, op: Op) -> Require<Self> {
        Require { inner: self, op }
    }

    fn boxed(self) -> Box<dyn Rule>
    where
        Self: 'static,
    {
        Box::new(self)
    }
}

impl<R: Rule> RuleExt for R {}

#[cfg(test)]
mod tests {
    use prakriya_model::Term;

    use super::*;

    fn identity() -> FnRule {
        rule("identity", |state: &State| vec![state.clone()])
    }

    #[test]
    fn once_stamps_before_running() {
        let stamped = identity().once(Op::Rt);
        let state = State::new([Term::dhatu("kf")]);
        let out = stamped.apply(&state);
        assert_eq!(out.len(), 1);
        assert!(out[0].has_op(Op::Rt));
        assert!(stamped.apply(&out[0]).is_empty());
    }

    #[test]
    fn require_blocks_without_op() {
        let gated = identity().require(Op::Dvirvacana);
        let state = State::new([Term::dhatu("kf")]);
        assert!(gated.apply(&state).is_empty());
        assert_eq!(gated.apply(&state.add_op(Op::Dvirvacana)).len(), 1);
    }

    #[test]
    fn combinators_report_ops() {
        let wrapped = identity().once(Op::AngaAci).require(Op::AngaAdesha);
        assert_eq!(wrapped.requires(), vec![Op::AngaAdesha]);
        assert_eq!(wrapped.produces(), vec![Op::AngaAci]);
        assert_eq!(wrapped.name(), "identity");
    }
}
