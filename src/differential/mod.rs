// src/differential/mod.rs
//! Differential diagnosis: stepwise elimination of common cold, sinusitis and
//! vasomotor rhinitis before confirming allergic rhinitis (AR).
//!
//! Order:
//! 1) cold → 2) sinusitis → 3) vasomotor rhinitis → 4) AR confirmation
//!
//! The first exclusion stage whose score reaches its threshold produces a single
//! finding and ends the run. Stages that do not trigger append their label to
//! `excluded`. Missing signals never error; they simply contribute nothing
//! (or, for absence rows, count as absent).

pub mod signals;
pub mod stages;

use serde::{Deserialize, Serialize};
use tracing::debug;

pub use self::signals::{names, ClinicalSignals, SignalValue};
use self::stages::{tally, AR_CONFIRMATION, EXCLUSION_STAGES};

/// The look-alike conditions ruled out before AR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlternativeDiagnosis {
    CommonCold,
    Sinusitis,
    VasomotorRhinitis,
}

impl AlternativeDiagnosis {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CommonCold => "感冒（急性上呼吸道感染）",
            Self::Sinusitis => "鼻窦炎（急性/慢性）",
            Self::VasomotorRhinitis => "血管运动性鼻炎",
        }
    }
}

/// Confidence tier of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Confidence {
    High,
    Medium,
}

impl Confidence {
    pub fn label(&self) -> &'static str {
        match self {
            Self::High => "高",
            Self::Medium => "中",
        }
    }
}

/// A suspected alternative diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferentialFinding {
    pub diagnosis: AlternativeDiagnosis,
    pub name: String,
    pub confidence: Confidence,
    /// Stage score that triggered the finding.
    pub score: u32,
    /// Supporting signs, in table order.
    pub signs: Vec<String>,
    pub guidance: String,
}

/// Outcome of one differential run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifferentialResult {
    /// Labels of stages evaluated without triggering.
    pub excluded: Vec<String>,
    /// At most one entry: runs stop at the first triggered stage.
    pub findings: Vec<DifferentialFinding>,
    pub may_proceed_to_ar: bool,
    /// Set only when the AR confirmation stage was reached.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub guidance: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ar_score: Option<u32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ar_signs: Vec<String>,
}

impl DifferentialResult {
    /// The triggered alternative diagnosis, if any.
    pub fn suspected(&self) -> Option<&DifferentialFinding> {
        self.findings.first()
    }
}

/// Run the four-stage elimination over a (possibly partial) signal map.
pub fn run_differential_diagnosis(signals: &ClinicalSignals) -> DifferentialResult {
    let mut result = DifferentialResult::default();

    for stage in EXCLUSION_STAGES.iter() {
        let t = tally(stage.signs, signals);
        let triggered = t.score >= stage.threshold;
        debug!(
            target: "differential",
            stage = ?stage.diagnosis,
            score = t.score,
            threshold = stage.threshold,
            triggered,
            "exclusion stage evaluated"
        );

        if triggered {
            let confidence = if t.score >= stage.high_confidence_at {
                Confidence::High
            } else {
                Confidence::Medium
            };
            result.findings.push(DifferentialFinding {
                diagnosis: stage.diagnosis,
                name: stage.diagnosis.name().to_string(),
                confidence,
                score: t.score,
                signs: t.signs,
                guidance: stage.guidance.to_string(),
            });
            return result;
        }
        result.excluded.push(stage.excluded_label.to_string());
    }

    let ar = tally(AR_CONFIRMATION.signs, signals);
    result.may_proceed_to_ar = ar.score >= AR_CONFIRMATION.threshold;
    debug!(
        target: "differential",
        score = ar.score,
        threshold = AR_CONFIRMATION.threshold,
        confirmed = result.may_proceed_to_ar,
        "AR confirmation stage evaluated"
    );
    result.guidance.push(if result.may_proceed_to_ar {
        AR_CONFIRMATION.confirmed_guidance.to_string()
    } else {
        AR_CONFIRMATION.escalation_guidance.to_string()
    });
    result.ar_score = Some(ar.score);
    result.ar_signs = ar.signs;
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cold_wins_over_sinusitis() {
        let s = ClinicalSignals::new()
            .with(names::DURATION_DAYS, 3)
            .with(names::HAS_FEVER, true)
            .with(names::SORE_THROAT, true)
            .with(names::BODY_ACHE, true)
            .with(names::PURULENT_DISCHARGE, true)
            .with(names::FACIAL_PAIN, true);
        let r = run_differential_diagnosis(&s);
        assert_eq!(r.findings.len(), 1);
        let f = r.suspected().unwrap();
        assert_eq!(f.diagnosis, AlternativeDiagnosis::CommonCold);
        assert_eq!(f.confidence, Confidence::High);
        assert_eq!(f.score, 6);
        assert!(r.excluded.is_empty());
        assert!(!r.may_proceed_to_ar);
        assert!(r.ar_score.is_none());
    }

    #[test]
    fn empty_input_reaches_ar_stage_and_escalates() {
        let r = run_differential_diagnosis(&ClinicalSignals::new());
        assert!(r.findings.is_empty());
        assert_eq!(r.excluded.len(), 3);
        assert_eq!(r.ar_score, Some(0));
        assert!(!r.may_proceed_to_ar);
        assert_eq!(r.guidance.len(), 1);
        assert!(r.guidance[0].contains("转人工问诊"));
    }

    #[test]
    fn medium_confidence_just_over_threshold() {
        // fever (2) + sore throat (1) = 3 → cold, medium
        let s = ClinicalSignals::new()
            .with(names::HAS_FEVER, true)
            .with(names::SORE_THROAT, true);
        let mut r = run_differential_diagnosis(&s);
        let f = r.findings.remove(0);
        assert_eq!(f.diagnosis, AlternativeDiagnosis::CommonCold);
        assert_eq!(f.confidence, Confidence::Medium);
        assert_eq!(f.signs, vec!["发热", "咽痛"]);
    }
}
