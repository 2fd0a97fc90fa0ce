// src/error.rs
//! Validation errors raised while constructing input value objects.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The four TNSS sub-scores, used to point at the offending field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymptomField {
    Sneeze,
    Rhinorrhea,
    NasalItch,
    NasalCongestion,
}

impl SymptomField {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sneeze => "sneeze",
            Self::Rhinorrhea => "rhinorrhea",
            Self::NasalItch => "nasal_itch",
            Self::NasalCongestion => "nasal_congestion",
        }
    }
}

impl fmt::Display for SymptomField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The only error the evaluation core propagates. Values are never clamped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("symptom score `{field}` must be within 0..=3, got {value}")]
    SymptomOutOfRange { field: SymptomField, value: i64 },
}
