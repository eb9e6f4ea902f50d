//! Simulation configuration.
//!
//! Supports loading configuration from:
//! 1. Configuration files (YAML)
//! 2. Environment variables (with BB84_ prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Environment variables
//! 2. Configuration file
//! 3. Default values

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{QkdError, QkdResult};

/// Settings for simulation runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Qubits per round.
    #[serde(default = "default_num_qubits")]
    pub num_qubits: usize,

    /// Seed for the random source; entropy-seeded when absent.
    #[serde(default)]
    pub seed: Option<u64>,

    /// Upper bound on qubits per round.
    #[serde(default = "default_max_qubits")]
    pub max_qubits: usize,

    /// Rounds sampled by yield statistics.
    #[serde(default = "default_stats_rounds")]
    pub stats_rounds: usize,

    /// Qubits per round for yield statistics.
    #[serde(default = "default_stats_qubits")]
    pub stats_qubits: usize,
}

fn default_num_qubits() -> usize {
    5
}

fn default_max_qubits() -> usize {
    1_000_000
}

fn default_stats_rounds() -> usize {
    10_000
}

fn default_stats_qubits() -> usize {
    100
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_qubits: default_num_qubits(),
            seed: None,
            max_qubits: default_max_qubits(),
            stats_rounds: default_stats_rounds(),
            stats_qubits: default_stats_qubits(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> QkdResult<Self> {
        let config = Self::parse_file(path.as_ref())?;
        config.validate()?;
        Ok(config)
    }

    /// Read and deserialize without validating.
    fn parse_file(path: &Path) -> QkdResult<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| QkdError::Config(format!("{}: {e}", path.display())))?;

        serde_yaml_ng::from_str(&contents)
            .map_err(|e| QkdError::Config(format!("{}: {e}", path.display())))
    }

    /// Load from an optional file, then apply environment overrides.
    ///
    /// Validation runs once, after the overrides.
    pub fn load(config_file: Option<&Path>) -> QkdResult<Self> {
        Self::load_with_vars(config_file, |key| std::env::var(key).ok())
    }

    fn load_with_vars<F>(config_file: Option<&Path>, var: F) -> QkdResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = match config_file {
            Some(path) => Self::parse_file(path)?,
            None => Self::default(),
        };
        let config = config.merge_vars(var)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `BB84_*` environment variables on top of `self`.
    pub fn merge_env(self) -> QkdResult<Self> {
        self.merge_vars(|key| std::env::var(key).ok())
    }

    fn merge_vars<F>(mut self, var: F) -> QkdResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = var("BB84_QUBITS") {
            self.num_qubits = parse_qubit_count(&v)?;
        }
        if let Some(v) = var("BB84_SEED") {
            self.seed = Some(
                v.trim()
                    .parse()
                    .map_err(|e| QkdError::Config(format!("BB84_SEED={v}: {e}")))?,
            );
        }
        if let Some(v) = var("BB84_MAX_QUBITS") {
            self.max_qubits = parse_qubit_count(&v)?;
        }
        if let Some(v) = var("BB84_STATS_ROUNDS") {
            self.stats_rounds = parse_count("round count", &v)?;
        }
        if let Some(v) = var("BB84_STATS_QUBITS") {
            self.stats_qubits = parse_qubit_count(&v)?;
        }
        Ok(self)
    }

    /// Check cross-field constraints.
    pub fn validate(&self) -> QkdResult<()> {
        self.check_qubits(self.num_qubits)?;
        self.check_qubits(self.stats_qubits)?;
        if self.stats_rounds == 0 {
            return Err(QkdError::InvalidInput(
                "stats_rounds must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Fail with [`QkdError::TooManyQubits`] when `requested` exceeds `max_qubits`.
    pub fn check_qubits(&self, requested: usize) -> QkdResult<()> {
        if requested > self.max_qubits {
            return Err(QkdError::TooManyQubits {
                requested,
                max: self.max_qubits,
            });
        }
        Ok(())
    }
}

/// Parse a qubit count from text. Negative or non-numeric input is an
/// [`QkdError::InvalidInput`].
pub fn parse_qubit_count(s: &str) -> QkdResult<usize> {
    parse_count("qubit count", s)
}

fn parse_count(what: &str, s: &str) -> QkdResult<usize> {
    let s = s.trim();
    if s.starts_with('-') {
        return Err(QkdError::InvalidInput(format!(
            "{what} must be non-negative, got {s}"
        )));
    }
    s.parse()
        .map_err(|e| QkdError::InvalidInput(format!("{what} '{s}' is not a valid count: {e}")))
}
