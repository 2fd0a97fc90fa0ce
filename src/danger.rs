//! Danger-signal triage over raw free text.
//!
//! A table maps each emergency category to literal trigger phrases and an urgent
//! action. Matching is exact substring containment: no case folding, no
//! tokenization, no fuzzy matching. Each category is reported at most once
//! (first matching phrase wins) and every category is checked.
//!
//! The built-in table lives in `config/danger_signals.json` and is embedded at
//! compile time. Callers may load a replacement table of the same shape.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

static BUILTIN: Lazy<DangerSignalTable> = Lazy::new(|| {
    let raw = include_str!("../config/danger_signals.json");
    DangerSignalTable::from_json_str(raw).expect("valid built-in danger signal table")
});

/// Emergency category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DangerCategory {
    AsthmaAttack,
    Anaphylaxis,
    SinusitisComplication,
    SevereEpistaxis,
}

/// One row of the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerRule {
    pub category: DangerCategory,
    pub keywords: Vec<String>,
    pub action: String,
}

/// A reported category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerSignal {
    pub category: DangerCategory,
    pub action: String,
    /// The phrase that triggered the category.
    pub matched_keyword: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DangerSignalTable {
    signals: Vec<DangerRule>,
}

impl DangerSignalTable {
    /// The embedded default table.
    pub fn builtin() -> &'static DangerSignalTable {
        &BUILTIN
    }

    /// Build a table from rows, validating them.
    pub fn new(signals: Vec<DangerRule>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for rule in &signals {
            if !seen.insert(rule.category) {
                bail!("duplicate danger category {:?}", rule.category);
            }
            if rule.action.trim().is_empty() {
                bail!("danger category {:?} has an empty action", rule.category);
            }
            if rule.keywords.is_empty() {
                bail!("danger category {:?} has no keywords", rule.category);
            }
            // An empty phrase would be a substring of every input.
            if rule.keywords.iter().any(|k| k.is_empty()) {
                bail!("danger category {:?} has an empty keyword", rule.category);
            }
        }
        Ok(Self { signals })
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let parsed: DangerSignalTable =
            serde_json::from_str(raw).context("parsing danger signal table")?;
        Self::new(parsed.signals)
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading danger signal table from {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("invalid danger signal table at {}", path.display()))
    }

    pub fn rules(&self) -> &[DangerRule] {
        &self.signals
    }

    /// Report every category with at least one phrase contained in `text`, in table order.
    pub fn detect(&self, text: &str) -> Vec<DangerSignal> {
        let mut found = Vec::new();
        for rule in &self.signals {
            let Some(hit) = rule.keywords.iter().find(|k| text.contains(k.as_str())) else {
                continue;
            };
            debug!(target: "danger", category = ?rule.category, "danger signal matched");
            found.push(DangerSignal {
                category: rule.category,
                action: rule.action.clone(),
                matched_keyword: hit.clone(),
            });
        }
        found
    }
}

/// Detect danger signals using the built-in table.
pub fn detect_danger_signals(text: &str) -> Vec<DangerSignal> {
    DangerSignalTable::builtin().detect(text)
}
