use thiserror::Error;

use crate::config::ConfigError;
use crate::pipeline::PipelineError;
use crate::registry::RuleSetError;

/// Failure to assemble the grammar. Rule application itself never fails.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error(transparent)]
    RuleSet(#[from] RuleSetError),
    #[error(transparent)]
    Pipeline(#[from] PipelineError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, BuildError>;
