//! # Advisor
//! Convenience pipeline that performs the caller-side composition:
//! danger triage → differential → classification → treatment plan.
//!
//! Pure with respect to its inputs: the only state is the immutable danger
//! table chosen at construction. The four components stay callable on their own.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::classify::{classify_pattern, classify_severity};
use crate::config::AdvisorConfig;
use crate::danger::{DangerSignal, DangerSignalTable};
use crate::debug::{dev_log_text_event, dev_logging_enabled};
use crate::differential::{run_differential_diagnosis, ClinicalSignals, DifferentialResult};
use crate::model::{DiseaseCourse, Pattern, PatientProfile, Severity, SymptomScore};
use crate::treatment::{synthesize_treatment_plan, TreatmentPlan};

/// Everything one assessment needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intake {
    /// Raw complaint text for danger triage; skipped when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_text: Option<String>,
    #[serde(default)]
    pub signals: ClinicalSignals,
    pub symptoms: SymptomScore,
    pub course: DiseaseCourse,
    pub patient: PatientProfile,
}

/// Where the pipeline stopped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Assessment {
    /// Urgent referral; nothing else was evaluated.
    Emergency { signals: Vec<DangerSignal> },
    /// A look-alike condition is more likely than AR.
    AlternativeDiagnosis { differential: DifferentialResult },
    /// No alternative found, but AR features are insufficient.
    Inconclusive { differential: DifferentialResult },
    AllergicRhinitis {
        differential: DifferentialResult,
        tnss: u8,
        severity: Severity,
        pattern: Pattern,
        plan: TreatmentPlan,
    },
}

impl Assessment {
    pub fn is_emergency(&self) -> bool {
        matches!(self, Assessment::Emergency { .. })
    }

    pub fn plan(&self) -> Option<&TreatmentPlan> {
        match self {
            Assessment::AllergicRhinitis { plan, .. } => Some(plan),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Advisor {
    danger: DangerSignalTable,
    dev_log: bool,
}

impl Default for Advisor {
    fn default() -> Self {
        Self::new(DangerSignalTable::builtin().clone())
    }
}

impl Advisor {
    pub fn new(danger: DangerSignalTable) -> Self {
        Self {
            danger,
            dev_log: dev_logging_enabled(),
        }
    }

    pub fn from_config(cfg: &AdvisorConfig) -> anyhow::Result<Self> {
        let danger = cfg.danger_table()?;
        info!(
            target: "advisor",
            categories = danger.rules().len(),
            custom_table = cfg.danger_signals_path.is_some(),
            "advisor ready"
        );
        Ok(Self {
            danger,
            dev_log: cfg.dev_log || dev_logging_enabled(),
        })
    }

    pub fn danger_table(&self) -> &DangerSignalTable {
        &self.danger
    }

    pub fn assess(&self, intake: &Intake) -> Assessment {
        // (1) Danger triage short-circuits everything else.
        if let Some(text) = intake.free_text.as_deref() {
            let signals = self.danger.detect(text);
            if !signals.is_empty() {
                let labels: Vec<String> = signals
                    .iter()
                    .map(|s| format!("{:?}", s.category))
                    .collect();
                dev_log_text_event(self.dev_log, "danger_detected", text, &labels);
                return Assessment::Emergency { signals };
            }
        }

        // (2) Differential.
        let differential = run_differential_diagnosis(&intake.signals);
        if differential.suspected().is_some() {
            return Assessment::AlternativeDiagnosis { differential };
        }
        if !differential.may_proceed_to_ar {
            return Assessment::Inconclusive { differential };
        }

        // (3) Classification and (4) plan.
        let tnss = intake.symptoms.tnss();
        let severity = classify_severity(tnss);
        let pattern = classify_pattern(&intake.course);
        debug!(target: "advisor", tnss, ?severity, ?pattern, "AR classified");

        let plan = synthesize_treatment_plan(severity, pattern, &intake.patient, &intake.symptoms);
        Assessment::AllergicRhinitis {
            differential,
            tnss,
            severity,
            pattern,
            plan,
        }
    }
}
