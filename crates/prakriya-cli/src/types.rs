use serde::Serialize;

use prakriya_core::{Derivation, Outcome};

/// Everything one `derive` run reports, in both output formats.
#[derive(Debug, Serialize)]
pub struct DeriveReport {
    pub dhatu: String,
    pub suffix: String,
    pub lakshana: Vec<String>,
    pub results: Vec<DerivationJson>,
    pub expansions: usize,
    pub truncated: bool,
}

#[derive(Debug, Serialize)]
pub struct DerivationJson {
    pub surface: String,
    /// Non-empty term values, in order.
    pub terms: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepJson>,
}

#[derive(Debug, Serialize)]
pub struct StepJson {
    pub stage: String,
    pub state: String,
}

impl DeriveReport {
    pub fn new(
        dhatu: &str,
        suffix: &str,
        lakshana: Vec<String>,
        outcome: &Outcome,
        with_steps: bool,
    ) -> Self {
        Self {
            dhatu: dhatu.to_string(),
            suffix: suffix.to_string(),
            lakshana,
            results: outcome
                .derivations
                .iter()
                .map(|derivation| DerivationJson::new(derivation, with_steps))
                .collect(),
            expansions: outcome.expansions,
            truncated: outcome.truncated,
        }
    }
}

impl DerivationJson {
    fn new(derivation: &Derivation, with_steps: bool) -> Self {
        let steps = if with_steps {
            derivation
                .history
                .iter()
                .map(|step| StepJson {
                    stage: step.stage.clone(),
                    state: step.state.to_string(),
                })
                .collect()
        } else {
            Vec::new()
        };
        Self {
            surface: derivation.state.surface(),
            terms: derivation
                .state
                .iter()
                .filter(|term| !term.is_empty())
                .map(|term| term.value().to_string())
                .collect(),
            steps,
        }
    }
}
