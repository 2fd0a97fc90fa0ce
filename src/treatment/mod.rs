// src/treatment/mod.rs
//! Treatment plan synthesis for confirmed AR.
//!
//! Precedence: age under two → pregnancy → lactation → general rule table.
//! The first three are full overrides; the general table (see `rules`) never
//! runs for them. An infant gets the minimal plan whatever else is flagged.

pub mod plan;
pub mod populations;
pub mod rules;

use tracing::info;

use crate::model::{Pattern, PatientProfile, Severity, SymptomScore};

pub use self::plan::{AdjunctTherapy, MedicationEntry, PlanPopulation, TreatmentPlan};
use self::populations::INFANT_AGE_LIMIT;
use self::rules::{apply_general_rules, PlanContext};

/// Build a personalized plan. Callers are expected to have confirmed AR first.
pub fn synthesize_treatment_plan(
    severity: Severity,
    pattern: Pattern,
    patient: &PatientProfile,
    symptoms: &SymptomScore,
) -> TreatmentPlan {
    if patient.age < INFANT_AGE_LIMIT {
        info!(target: "treatment", age = patient.age, "infant plan selected");
        return populations::infant_plan();
    }
    if patient.is_pregnant {
        info!(target: "treatment", ?severity, "pregnancy plan selected");
        return populations::pregnancy_plan(severity);
    }
    if patient.is_lactating {
        info!(target: "treatment", ?severity, "lactation plan selected");
        return populations::lactation_plan(severity);
    }

    let ctx = PlanContext {
        severity,
        pattern,
        patient,
        symptoms,
    };
    let mut plan = TreatmentPlan::new(PlanPopulation::General);
    apply_general_rules(&ctx, &mut plan);
    plan
}
