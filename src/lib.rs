// src/lib.rs
// Public library surface: four pure components plus the optional `Advisor` pipeline.

pub mod classify;
pub mod danger;
pub mod differential;
pub mod error;
pub mod model;
pub mod treatment;

// Ambient: configuration, dev logging, pipeline convenience
pub mod config;
pub mod debug;
pub mod engine;

// ---- Re-exports for stable public API ----
pub use crate::classify::{classify_pattern, classify_severity};
pub use crate::danger::{detect_danger_signals, DangerCategory, DangerSignal, DangerSignalTable};
pub use crate::differential::{
    run_differential_diagnosis, AlternativeDiagnosis, ClinicalSignals, Confidence,
    DifferentialFinding, DifferentialResult, SignalValue,
};
pub use crate::engine::{Advisor, Assessment, Intake};
pub use crate::error::{SymptomField, ValidationError};
pub use crate::model::{DiseaseCourse, Pattern, PatientProfile, Severity, SymptomScore};
pub use crate::treatment::{
    synthesize_treatment_plan, AdjunctTherapy, MedicationEntry, PlanPopulation, TreatmentPlan,
};
