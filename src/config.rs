// src/config.rs
//! Advisor configuration (TOML or JSON).
//!
//! Shape:
//! ```toml
//! danger_signals_path = "config/danger_signals.json"  # optional replacement table
//! dev_log = false                                     # force hashed dev events on
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::danger::DangerSignalTable;

pub const ENV_CONFIG_PATH: &str = "RHINITIS_CONFIG_PATH";
pub const DEFAULT_TOML_PATH: &str = "config/advisor.toml";
pub const DEFAULT_JSON_PATH: &str = "config/advisor.json";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub danger_signals_path: Option<PathBuf>,
    pub dev_log: bool,
}

impl AdvisorConfig {
    /// Load from an explicit path. The extension picks the first format tried.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading advisor config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        parse_config(&content, ext.as_str())
            .with_context(|| format!("parsing advisor config at {}", path.display()))
    }

    /// Resolve configuration using env var + fallbacks:
    /// 1) $RHINITIS_CONFIG_PATH (must exist)
    /// 2) config/advisor.toml
    /// 3) config/advisor.json
    /// 4) defaults
    ///
    /// A `.env` file in the working directory is loaded first, best-effort.
    pub fn load_default() -> Result<Self> {
        let _ = dotenvy::dotenv();

        if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if pb.exists() {
                return Self::load_from(&pb);
            }
            return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
        }
        let toml_p = PathBuf::from(DEFAULT_TOML_PATH);
        if toml_p.exists() {
            return Self::load_from(&toml_p);
        }
        let json_p = PathBuf::from(DEFAULT_JSON_PATH);
        if json_p.exists() {
            return Self::load_from(&json_p);
        }
        warn!(target: "advisor", "no advisor config found, using defaults");
        Ok(Self::default())
    }

    /// The configured danger table, or the built-in one.
    pub fn danger_table(&self) -> Result<DangerSignalTable> {
        match &self.danger_signals_path {
            Some(p) => DangerSignalTable::load_from_file(p),
            None => Ok(DangerSignalTable::builtin().clone()),
        }
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<AdvisorConfig> {
    if hint_ext == "json" {
        if let Ok(cfg) = serde_json::from_str(s) {
            return Ok(cfg);
        }
        return toml::from_str(s).map_err(|e| anyhow!("unsupported advisor config format: {e}"));
    }
    if let Ok(cfg) = toml::from_str(s) {
        return Ok(cfg);
    }
    serde_json::from_str(s).map_err(|e| anyhow!("unsupported advisor config format: {e}"))
}
