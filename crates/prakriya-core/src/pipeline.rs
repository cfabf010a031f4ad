//! Ordered pipeline of state-level stages.
//!
//! Each stage is a [`Rule`], usually wrapped in `once` / `require`. A step
//! runs the stages in order and keeps the output of the first one that
//! produces anything.
//!
//! # Standard Pipeline Order
//!
//! 1. **dvirvacana** - reduplicate before liṭ and san
//! 2. **anga_adesha** - samprasāraṇa, guṇa, vṛddhi
//! 3. **rt** - guṇa of ṛ-final stems before liṭ
//! 4. **anga_aci** - substitutions before a vowel
//! 5. **ac_adesha** - deletions and the liṭ e-substitution
//! 6. **anga_ku** - ku-class substitution after an abhyāsa

use std::collections::BTreeSet;

use prakriya_model::Op;
use thiserror::Error;
use tracing::debug;

use crate::rule::Rule;
use crate::state::State;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("stage {stage} requires `{op}`, which no stage produces")]
    UnknownDependency { stage: String, op: Op },
    #[error("stage {stage} produces `{op}`, which another stage already produces")]
    DuplicateStage { stage: String, op: Op },
}

pub struct Pipeline {
    stages: Vec<Box<dyn Rule>>,
}

impl Pipeline {
    pub fn builder() -> PipelineBuilder {
        PipelineBuilder::default()
    }

    /// Stage names in execution order.
    pub fn stage_names(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub fn stages(&self) -> &[Box<dyn Rule>] {
        &self.stages
    }

    /// Successors of `state` under the first stage that yields anything,
    /// paired with that stage's name. Empty when no stage applies.
    pub fn step(&self, state: &State) -> Vec<(&str, State)> {
        for stage in &self.stages {
            let successors = stage.apply(state);
            if successors.is_empty() {
                continue;
            }
            debug!(stage = stage.name(), successors = successors.len(), "stage fired");
            return successors
                .into_iter()
                .map(|successor| (stage.name(), successor))
                .collect();
        }
        Vec::new()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("stages", &self.stage_names())
            .finish()
    }
}

#[derive(Default)]
pub struct PipelineBuilder {
    stages: Vec<Box<dyn Rule>>,
}

impl PipelineBuilder {
    #[must_use]
    pub fn stage(mut self, stage: impl Rule + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Check that every required op is produced by some stage and that no
    /// op is produced twice.
    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let mut produced = BTreeSet::new();
        for stage in &self.stages {
            for op in stage.produces() {
                if !produced.insert(op) {
                    return Err(PipelineError::DuplicateStage {
                        stage: stage.name().to_string(),
                        op,
                    });
                }
            }
        }
        for stage in &self.stages {
            if let Some(op) = stage.requires().into_iter().find(|op| !produced.contains(op)) {
                return Err(PipelineError::UnknownDependency {
                    stage: stage.name().to_string(),
                    op,
                });
            }
        }
        Ok(Pipeline {
            stages: self.stages,
        })
    }
}
