//! Ballot configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::BallotError;

/// Configuration for a ballot and the process hosting it.
///
/// Can be loaded from a TOML file via [`BallotConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallotConfig {
    /// Maximum number of forwarding hops followed when resolving a delegation.
    /// Unset means "number of known accounts + 1", which no acyclic chain
    /// can exceed.
    #[serde(default)]
    pub max_delegation_depth: Option<usize>,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl BallotConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, BallotError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| BallotError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, BallotError> {
        toml::from_str(s).map_err(|e| BallotError::Config(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, BallotError> {
        toml::to_string_pretty(self).map_err(|e| BallotError::Config(e.to_string()))
    }

    /// Set an explicit delegation depth bound.
    pub fn with_max_delegation_depth(mut self, depth: usize) -> Self {
        self.max_delegation_depth = Some(depth);
        self
    }

    /// The hop bound to use for a ballot that currently knows `known_accounts`.
    pub fn delegation_bound(&self, known_accounts: usize) -> usize {
        self.max_delegation_depth
            .unwrap_or_else(|| known_accounts.saturating_add(1))
    }
}

impl Default for BallotConfig {
    fn default() -> Self {
        Self {
            max_delegation_depth: None,
            log_format: default_log_format(),
            log_level: default_log_level(),
        }
    }
}
