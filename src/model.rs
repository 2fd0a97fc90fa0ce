// src/model.rs
//! Input value objects and the two classification outputs.
//!
//! Everything here is constructed once per evaluation and owned by the caller.
//! `SymptomScore` is the only type with an invariant: each sub-score is in 0..=3,
//! checked eagerly in `SymptomScore::new` and during deserialization.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SymptomField, ValidationError};

/// Upper bound of a single TNSS sub-score.
pub const MAX_SUB_SCORE: u8 = 3;

/// TNSS sub-scores (sneeze, rhinorrhea, nasal itch, nasal congestion).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawSymptomScore")]
pub struct SymptomScore {
    sneeze: u8,
    rhinorrhea: u8,
    nasal_itch: u8,
    nasal_congestion: u8,
}

/// Unchecked shape used only to route deserialization through `SymptomScore::new`.
#[derive(Deserialize)]
struct RawSymptomScore {
    sneeze: i64,
    rhinorrhea: i64,
    nasal_itch: i64,
    nasal_congestion: i64,
}

impl TryFrom<RawSymptomScore> for SymptomScore {
    type Error = ValidationError;

    fn try_from(raw: RawSymptomScore) -> Result<Self, Self::Error> {
        SymptomScore::new(raw.sneeze, raw.rhinorrhea, raw.nasal_itch, raw.nasal_congestion)
    }
}

impl SymptomScore {
    /// Validating constructor. Fields are checked in declaration order and the
    /// first out-of-range value is reported.
    pub fn new(
        sneeze: i64,
        rhinorrhea: i64,
        nasal_itch: i64,
        nasal_congestion: i64,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            sneeze: sub_score(SymptomField::Sneeze, sneeze)?,
            rhinorrhea: sub_score(SymptomField::Rhinorrhea, rhinorrhea)?,
            nasal_itch: sub_score(SymptomField::NasalItch, nasal_itch)?,
            nasal_congestion: sub_score(SymptomField::NasalCongestion, nasal_congestion)?,
        })
    }

    pub fn sneeze(&self) -> u8 {
        self.sneeze
    }

    pub fn rhinorrhea(&self) -> u8 {
        self.rhinorrhea
    }

    pub fn nasal_itch(&self) -> u8 {
        self.nasal_itch
    }

    pub fn nasal_congestion(&self) -> u8 {
        self.nasal_congestion
    }

    /// Sub-score by field, for table-driven rules.
    pub fn get(&self, field: SymptomField) -> u8 {
        match field {
            SymptomField::Sneeze => self.sneeze,
            SymptomField::Rhinorrhea => self.rhinorrhea,
            SymptomField::NasalItch => self.nasal_itch,
            SymptomField::NasalCongestion => self.nasal_congestion,
        }
    }

    /// Total Nasal Symptom Score, 0..=12.
    pub fn tnss(&self) -> u8 {
        self.sneeze + self.rhinorrhea + self.nasal_itch + self.nasal_congestion
    }
}

fn sub_score(field: SymptomField, value: i64) -> Result<u8, ValidationError> {
    if (0..=i64::from(MAX_SUB_SCORE)).contains(&value) {
        Ok(value as u8)
    } else {
        Err(ValidationError::SymptomOutOfRange { field, value })
    }
}

/// Course of disease: attack days per week and duration in weeks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiseaseCourse {
    pub days_per_week: u32,
    pub duration_weeks: u32,
}

impl DiseaseCourse {
    pub fn new(days_per_week: u32, duration_weeks: u32) -> Self {
        Self {
            days_per_week,
            duration_weeks,
        }
    }
}

/// Patient attributes consulted by the treatment synthesizer.
///
/// Medication and allergy names are compared literally (no normalization).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientProfile {
    pub age: u32,
    pub is_pregnant: bool,
    pub is_lactating: bool,
    pub has_asthma: bool,
    pub has_glaucoma: bool,
    /// Benign prostatic hyperplasia.
    pub has_bph: bool,
    pub has_hypertension: bool,
    pub has_heart_disease: bool,
    pub has_liver_disease: bool,
    pub has_kidney_disease: bool,
    /// Creatinine clearance in ml/min, when measured.
    pub renal_clearance: Option<f64>,
    pub current_medications: BTreeSet<String>,
    pub drug_allergies: BTreeSet<String>,
    pub recent_alcohol: bool,
}

impl PatientProfile {
    /// Profile with the given age and every flag unset.
    pub fn new(age: u32) -> Self {
        Self {
            age,
            ..Self::default()
        }
    }

    pub fn with_medication(mut self, name: impl Into<String>) -> Self {
        self.current_medications.insert(name.into());
        self
    }

    pub fn with_drug_allergy(mut self, name: impl Into<String>) -> Self {
        self.drug_allergies.insert(name.into());
        self
    }

    pub fn with_renal_clearance(mut self, ml_per_min: f64) -> Self {
        self.renal_clearance = Some(ml_per_min);
        self
    }

    /// True if any of `names` is among the current medications.
    pub fn takes_any(&self, names: &[&str]) -> bool {
        names.iter().any(|n| self.current_medications.contains(*n))
    }
}

/// Severity grade derived from TNSS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Mild,
    Moderate,
    Severe,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mild => "轻度",
            Self::Moderate => "中度",
            Self::Severe => "重度",
        }
    }

    /// Moderate and Severe share the same treatment branch.
    pub fn is_moderate_or_worse(&self) -> bool {
        matches!(self, Self::Moderate | Self::Severe)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Course pattern derived from `DiseaseCourse`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pattern {
    Intermittent,
    Persistent,
}

impl Pattern {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Intermittent => "间歇性",
            Self::Persistent => "持续性",
        }
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
