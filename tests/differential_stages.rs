// tests/differential_stages.rs
// Stage-by-stage behavior of the differential engine through the public API.

use rhinitis_advisor::differential::names;
use rhinitis_advisor::{
    run_differential_diagnosis, AlternativeDiagnosis, ClinicalSignals, Confidence,
};

fn full_ar_signals() -> ClinicalSignals {
    ClinicalSignals::new()
        .with(names::HAS_SNEEZE, true)
        .with(names::HAS_CLEAR_DISCHARGE, true)
        .with(names::SIGNIFICANT_ITCH, true)
        .with(names::HAS_NASAL_CONGESTION, true)
        .with(names::RECURRENT, true)
        .with(names::HAS_ALLERGEN, true)
}

#[test]
fn cold_and_sinusitis_signs_report_cold_only() {
    let s = ClinicalSignals::new()
        .with(names::DURATION_DAYS, 3)
        .with(names::HAS_FEVER, true)
        .with(names::SORE_THROAT, true)
        .with(names::BODY_ACHE, true)
        .with(names::PURULENT_DISCHARGE, true)
        .with(names::FACIAL_PAIN, true);

    let r = run_differential_diagnosis(&s);
    assert_eq!(r.findings.len(), 1);
    let f = &r.findings[0];
    assert_eq!(f.diagnosis, AlternativeDiagnosis::CommonCold);
    assert!(f.score >= 4);
    assert_eq!(f.confidence, Confidence::High);
    assert_eq!(f.name, AlternativeDiagnosis::CommonCold.name());
    assert!(!f.guidance.is_empty());
    assert!(!r.may_proceed_to_ar);
}

#[test]
fn long_course_sinusitis_is_reported_after_excluding_cold() {
    // Fever alone scores 2 for cold (below 3), then sinusitis scores 3+2+2+1+1 = 9.
    let s = ClinicalSignals::new()
        .with(names::DURATION_DAYS, 15)
        .with(names::PURULENT_DISCHARGE, true)
        .with(names::FACIAL_PAIN, true)
        .with(names::LOSS_OF_SMELL, true)
        .with(names::HAS_FEVER, true)
        .with(names::HEADACHE, true);

    let r = run_differential_diagnosis(&s);
    assert_eq!(r.excluded.len(), 1);
    assert!(r.excluded[0].starts_with("感冒"));
    let f = r.suspected().expect("sinusitis finding");
    assert_eq!(f.diagnosis, AlternativeDiagnosis::Sinusitis);
    assert_eq!(f.score, 9);
    assert_eq!(f.confidence, Confidence::High);
    assert_eq!(f.signs.len(), 5);
}

#[test]
fn sinusitis_medium_at_threshold() {
    // purulent (3) + headache (1) = 4
    let s = ClinicalSignals::new()
        .with(names::PURULENT_DISCHARGE, true)
        .with(names::HEADACHE, true);
    let r = run_differential_diagnosis(&s);
    let f = r.suspected().unwrap();
    assert_eq!(f.diagnosis, AlternativeDiagnosis::Sinusitis);
    assert_eq!(f.confidence, Confidence::Medium);
}

#[test]
fn vasomotor_profile() {
    let s = ClinicalSignals::new()
        .with(names::DURATION_DAYS, 60)
        .with(names::COLD_AIR_TRIGGER, true)
        .with(names::ODOR_TRIGGER, true)
        .with(names::SIGNIFICANT_ITCH, false)
        .with(names::HAS_ALLERGEN, false)
        .with(names::HAS_SNEEZE, true)
        .with(names::HAS_NASAL_CONGESTION, true);

    let r = run_differential_diagnosis(&s);
    assert_eq!(r.excluded.len(), 2);
    let f = r.suspected().unwrap();
    assert_eq!(f.diagnosis, AlternativeDiagnosis::VasomotorRhinitis);
    // 2 + 2 + 2 (no itch) + 1 (no allergen)
    assert_eq!(f.score, 7);
    assert_eq!(f.confidence, Confidence::High);
}

#[test]
fn unset_itch_counts_as_absent_for_vasomotor() {
    // cold-air (2) + unset itch (2) + unset allergen (1) = 5
    let s = ClinicalSignals::new().with(names::COLD_AIR_TRIGGER, true);
    let r = run_differential_diagnosis(&s);
    let f = r.suspected().unwrap();
    assert_eq!(f.diagnosis, AlternativeDiagnosis::VasomotorRhinitis);
    assert!(f.signs.iter().any(|s| s == "鼻痒不明显"));
}

#[test]
fn no_signals_escalates() {
    let r = run_differential_diagnosis(&ClinicalSignals::new());
    assert!(r.findings.is_empty());
    assert_eq!(r.ar_score, Some(0));
    assert!(!r.may_proceed_to_ar);
    assert!(r.guidance[0].contains("耳鼻喉科"));
}

#[test]
fn full_ar_presentation_proceeds() {
    let r = run_differential_diagnosis(&full_ar_signals().with(names::DURATION_DAYS, 30));
    assert!(r.findings.is_empty());
    assert_eq!(r.excluded.len(), 3);
    assert_eq!(r.ar_score, Some(8));
    assert!(r.may_proceed_to_ar);
    assert_eq!(r.ar_signs.len(), 6);
    assert!(r.guidance[0].contains("TNSS"));
}

#[test]
fn ar_presentation_without_duration_proceeds() {
    // no duration_days: the cold stage cannot score its duration sign
    let r = run_differential_diagnosis(&full_ar_signals());
    assert!(r.findings.is_empty());
    assert!(r.suspected().is_none());
    assert_eq!(r.excluded.len(), 3);
    assert_eq!(r.ar_score, Some(8));
    assert!(r.may_proceed_to_ar);
}

#[test]
fn ar_score_four_is_not_enough() {
    // itch (2) + allergen (2) = 4
    let s = ClinicalSignals::new()
        .with(names::SIGNIFICANT_ITCH, true)
        .with(names::HAS_ALLERGEN, true);
    let r = run_differential_diagnosis(&s);
    assert_eq!(r.ar_score, Some(4));
    assert!(!r.may_proceed_to_ar);
}

#[test]
fn json_input_map_is_accepted() {
    let s: ClinicalSignals = serde_json::from_str(
        r#"{
            "duration_days": 30,
            "has_sneeze": true,
            "has_clear_discharge": true,
            "significant_itch": true,
            "has_nasal_congestion": true,
            "recurrent": true,
            "has_allergen": true,
            "has_fever": false,
            "purulent_discharge": false,
            "cold_air_trigger": false
        }"#,
    )
    .unwrap();
    let r = run_differential_diagnosis(&s);
    assert!(r.may_proceed_to_ar);

    let v = serde_json::to_value(&r).unwrap();
    assert_eq!(v["may_proceed_to_ar"], serde_json::json!(true));
    assert_eq!(v["ar_score"], serde_json::json!(8));
    assert!(v["findings"].as_array().unwrap().is_empty());
}
