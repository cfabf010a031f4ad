//! Conditional rewriting of Sanskrit derivation states.
//!
//! A derivation starts from a [`State`] of terms and is advanced by a
//! [`Pipeline`] of stages. Each stage is a [`Rule`] gated by the `once` and
//! `require` combinators; stages that work on a single term consult a
//! [`RuleSet`] of [`WindowRule`]s.

pub mod abhyasa;
pub mod anga;
pub mod config;
pub mod derive;
pub mod error;
pub mod grammar;
pub mod pipeline;
pub mod registry;
pub mod rule;
pub mod state;
pub mod window;

pub use config::{ConfigError, Gana, Limits, PrakriyaConfig};
pub use derive::{Derivation, Deriver, Outcome, Step};
pub use error::{BuildError, Result};
pub use grammar::Grammar;
pub use pipeline::{Pipeline, PipelineError};
pub use registry::{RuleSet, RuleSetError, ensure_disjoint};
pub use rule::{FnRule, Once, Require, Rule, RuleExt, rule};
pub use state::State;
pub use window::{Context, RuleResult, Substitution, Window, WindowRule, ctx};
