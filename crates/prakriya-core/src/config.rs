//! Engine configuration, loaded from TOML.
//!
//! ```toml
//! [limits]
//! max_steps = 10000
//! max_results = 64
//!
//! [gana]
//! vac = ["vac", "svap", "yaj"]
//! grah = ["grah", "jyA"]
//! phan = ["PaR", "rAj"]
//! ```
//!
//! Every section and key is optional; missing values take the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid config: {message}")]
    Invalid { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PrakriyaConfig {
    pub limits: Limits,
    pub gana: Gana,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Limits {
    /// Total state expansions allowed for one derivation.
    pub max_steps: usize,
    /// Finished derivations kept before the search stops.
    pub max_results: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_steps: 10_000,
            max_results: 64,
        }
    }
}

/// Dhātu lists the stem rules consult, by clean upadeśa value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Gana {
    /// Samprasāraṇa before kit (6.1.15).
    pub vac: Vec<String>,
    /// Samprasāraṇa before kit and ṅit (6.1.16).
    pub grah: Vec<String>,
    /// Optional e-substitution in liṭ (6.4.125).
    pub phan: Vec<String>,
}

const VAC: &[&str] = &[
    "vac", "svap", "yaj", "vap", "vah", "vas", "ve", "vye", "hve", "vad", "Svi",
];
const GRAH: &[&str] = &[
    "grah", "jyA", "vay", "vyaD", "vaS", "vyac", "vraSc", "pracC", "Brasj",
];
const PHAN: &[&str] = &["PaR", "rAj", "BrAj", "BrAS", "BlAS", "syam", "svan"];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl Default for Gana {
    fn default() -> Self {
        Self {
            vac: owned(VAC),
            grah: owned(GRAH),
            phan: owned(PHAN),
        }
    }
}

impl Gana {
    pub fn in_vac(&self, clean: &str) -> bool {
        self.vac.iter().any(|d| d == clean)
    }

    pub fn in_grah(&self, clean: &str) -> bool {
        self.grah.iter().any(|d| d == clean)
    }

    pub fn in_phan(&self, clean: &str) -> bool {
        self.phan.iter().any(|d| d == clean)
    }
}

impl PrakriyaConfig {
    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: PrakriyaConfig =
            toml::from_str(&contents).map_err(|source| ConfigError::Toml {
                path: path.to_path_buf(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise use the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_steps == 0 {
            return Err(invalid("limits.max_steps must be positive"));
        }
        if self.limits.max_results == 0 {
            return Err(invalid("limits.max_results must be positive"));
        }
        for (name, list) in [
            ("vac", &self.gana.vac),
            ("grah", &self.gana.grah),
            ("phan", &self.gana.phan),
        ] {
            if list.iter().any(|d| d.trim().is_empty()) {
                return Err(invalid(&format!("gana.{name} contains an empty entry")));
            }
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Invalid {
        message: message.to_string(),
    }
}
