//! Depth-first derivation driver.

use tracing::{debug, info_span, warn};

use crate::config::Limits;
use crate::pipeline::Pipeline;
use crate::state::State;

/// One recorded step: the stage that fired and the state it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub stage: String,
    pub state: State,
}

/// A finished derivation: a state no stage can advance, and how it was
/// reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Derivation {
    pub state: State,
    pub history: Vec<Step>,
}

/// Results of one run. `truncated` is set when a limit stopped the search
/// before every branch was explored.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    pub derivations: Vec<Derivation>,
    pub expansions: usize,
    pub truncated: bool,
}

#[derive(Debug)]
pub struct Deriver<'a> {
    pipeline: &'a Pipeline,
    limits: Limits,
}

impl<'a> Deriver<'a> {
    pub fn new(pipeline: &'a Pipeline, limits: Limits) -> Self {
        Self { pipeline, limits }
    }

    /// Explore every branch from `start`, depth first. Successors are
    /// explored in the order the stage produced them.
    pub fn derive(&self, start: State) -> Outcome {
        let _span = info_span!("derive", start = %start).entered();
        let mut outcome = Outcome::default();
        let mut stack = vec![(start, Vec::<Step>::new())];

        while let Some((state, history)) = stack.pop() {
            if outcome.expansions >= self.limits.max_steps {
                warn!(max_steps = self.limits.max_steps, "step limit reached, returning partial results");
                outcome.truncated = true;
                break;
            }
            outcome.expansions += 1;

            let successors = self.pipeline.step(&state);
            if successors.is_empty() {
                debug!(result = %state, steps = history.len(), "derivation finished");
                outcome.derivations.push(Derivation { state, history });
                if outcome.derivations.len() >= self.limits.max_results {
                    if !stack.is_empty() {
                        warn!(max_results = self.limits.max_results, "result limit reached");
                        outcome.truncated = true;
                    }
                    break;
                }
                continue;
            }
            for (stage, next) in successors.into_iter().rev() {
                let mut history = history.clone();
                history.push(Step {
                    stage: stage.to_string(),
                    state: next.clone(),
                });
                stack.push((next, history));
            }
        }
        outcome
    }
}
