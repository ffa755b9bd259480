//! Configuration for the Quill editor.
//!
//! Loads `config.toml` from the path discovered by [`crate::paths::discover`],
//! with optional CLI override via `--config`.
//!
//! Priority: CLI override > discovered `.quill/config.toml` > embedded defaults.

use crate::history::CheckpointPolicy;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{path::Path, time::Duration};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Length change, in chars, that always qualifies an edit for an undo step.
    pub checkpoint_min_delta: usize,

    /// Pause since the last checkpoint, in milliseconds, that qualifies an edit.
    pub checkpoint_pause_ms: u64,

    /// Upper bound on undo and redo depth. `None` keeps every snapshot.
    pub history_limit: Option<usize>,

    /// Default for find and replace when the caller doesn't say.
    pub match_case: bool,
}

impl Default for Config {
    fn default() -> Self {
        let policy = CheckpointPolicy::default();
        Self {
            checkpoint_min_delta: policy.min_delta,
            checkpoint_pause_ms: policy.pause.as_millis() as u64,
            history_limit: None,
            match_case: false,
        }
    }
}

impl Config {
    /// Read and deserialize a TOML config file from the given path.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration with priority: CLI override > discovered path > defaults.
    pub fn load_with_overrides(
        cli_override: Option<&Path>,
        discovered_path: Option<&Path>,
    ) -> Result<Self> {
        if let Some(path) = cli_override {
            return Self::load(path);
        }
        if let Some(path) = discovered_path {
            return Self::load(path);
        }
        Self::load_embedded()
    }

    fn load_embedded() -> Result<Self> {
        let source = include_str!("../../config.toml");
        toml::from_str(source).context("Failed to parse embedded config.toml")
    }

    pub fn checkpoint_policy(&self) -> CheckpointPolicy {
        CheckpointPolicy {
            min_delta: self.checkpoint_min_delta,
            pause: Duration::from_millis(self.checkpoint_pause_ms),
        }
    }
}
