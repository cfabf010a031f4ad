//! The standard stage pipeline and the window rule sets it consults.

use std::sync::Arc;

use crate::abhyasa;
use crate::anga::{self, windows};
use crate::config::PrakriyaConfig;
use crate::derive::Deriver;
use crate::error::Result;
use crate::pipeline::Pipeline;
use crate::registry::{RuleSet, ensure_disjoint};

pub struct Grammar {
    config: PrakriyaConfig,
    pipeline: Pipeline,
    rule_sets: Vec<(&'static str, Arc<RuleSet>)>,
}

impl Grammar {
    pub fn new(config: PrakriyaConfig) -> Result<Self> {
        config.validate()?;
        let gana = Arc::new(config.gana.clone());
        let aci = Arc::new(windows::aci_rules()?);
        let ku = Arc::new(windows::ku_rules(&aci)?);
        ensure_disjoint(&[("anga_aci", &*aci), ("anga_ku", &*ku)])?;

        let pipeline = Pipeline::builder()
            .stage(abhyasa::dvirvacana())
            .stage(anga::adesha(Arc::clone(&gana)))
            .stage(anga::rt())
            .stage(anga::aci(Arc::clone(&aci)))
            .stage(anga::ac_adesha(gana))
            .stage(anga::ku(Arc::clone(&ku)))
            .build()?;

        Ok(Self {
            config,
            pipeline,
            rule_sets: vec![("anga_aci", aci), ("anga_ku", ku)],
        })
    }

    pub fn config(&self) -> &PrakriyaConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Window rule sets, keyed by the stage that consults them.
    pub fn rule_sets(&self) -> &[(&'static str, Arc<RuleSet>)] {
        &self.rule_sets
    }

    pub fn deriver(&self) -> Deriver<'_> {
        Deriver::new(&self.pipeline, self.config.limits)
    }
}

impl std::fmt::Debug for Grammar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Grammar")
            .field("pipeline", &self.pipeline)
            .field("rule_sets", &self.rule_sets)
            .finish()
    }
}
