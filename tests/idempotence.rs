// tests/idempotence.rs
// Randomized checks: every entry point is a pure function of its inputs.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use rhinitis_advisor::differential::names;
use rhinitis_advisor::{
    classify_pattern, classify_severity, detect_danger_signals, run_differential_diagnosis,
    synthesize_treatment_plan, ClinicalSignals, DiseaseCourse, Pattern, PatientProfile, Severity,
    SymptomScore,
};

const FLAGS: &[&str] = &[
    names::HAS_FEVER,
    names::SORE_THROAT,
    names::YELLOW_DISCHARGE,
    names::BODY_ACHE,
    names::PURULENT_DISCHARGE,
    names::FACIAL_PAIN,
    names::LOSS_OF_SMELL,
    names::HEADACHE,
    names::COLD_AIR_TRIGGER,
    names::ODOR_TRIGGER,
    names::POSITION_TRIGGER,
    names::SIGNIFICANT_ITCH,
    names::HAS_ALLERGEN,
    names::HAS_SNEEZE,
    names::HAS_CLEAR_DISCHARGE,
    names::HAS_NASAL_CONGESTION,
    names::RECURRENT,
];

fn random_signals(rng: &mut StdRng) -> ClinicalSignals {
    let mut s = ClinicalSignals::new();
    for name in FLAGS {
        // leave roughly a third unset
        match rng.random_range(0..3) {
            0 => {}
            1 => s.insert(*name, false),
            _ => s.insert(*name, true),
        }
    }
    if rng.random_bool(0.7) {
        s.insert(names::DURATION_DAYS, rng.random_range(1..120_i64));
    }
    s
}

fn random_symptoms(rng: &mut StdRng) -> SymptomScore {
    SymptomScore::new(
        rng.random_range(0..=3),
        rng.random_range(0..=3),
        rng.random_range(0..=3),
        rng.random_range(0..=3),
    )
    .unwrap()
}

fn random_patient(rng: &mut StdRng) -> PatientProfile {
    let mut p = PatientProfile::new(rng.random_range(0..90));
    p.is_pregnant = rng.random_bool(0.1);
    p.is_lactating = rng.random_bool(0.1);
    p.has_asthma = rng.random_bool(0.3);
    p.has_glaucoma = rng.random_bool(0.2);
    p.has_bph = rng.random_bool(0.2);
    p.has_kidney_disease = rng.random_bool(0.2);
    p.recent_alcohol = rng.random_bool(0.2);
    if rng.random_bool(0.5) {
        p.renal_clearance = Some(rng.random_range(5.0..120.0));
    }
    if rng.random_bool(0.3) {
        p = p.with_medication("阿司匹林");
    }
    p
}

#[test]
fn differential_is_deterministic_and_reports_at_most_one_finding() {
    let mut rng = StdRng::seed_from_u64(0xA11E);
    for _ in 0..500 {
        let s = random_signals(&mut rng);
        let a = run_differential_diagnosis(&s);
        let b = run_differential_diagnosis(&s);
        assert_eq!(a, b);
        assert!(a.findings.len() <= 1);
        if a.findings.is_empty() {
            assert_eq!(a.excluded.len(), 3);
            assert!(a.ar_score.is_some());
        } else {
            assert!(!a.may_proceed_to_ar);
            assert!(a.ar_score.is_none());
        }
    }
}

#[test]
fn plans_are_deterministic_and_general_plans_always_have_saline() {
    let mut rng = StdRng::seed_from_u64(42);
    let severities = [Severity::Mild, Severity::Moderate, Severity::Severe];
    let patterns = [Pattern::Intermittent, Pattern::Persistent];
    for _ in 0..500 {
        let symptoms = random_symptoms(&mut rng);
        let patient = random_patient(&mut rng);
        let severity = severities[rng.random_range(0..severities.len())];
        let pattern = patterns[rng.random_range(0..patterns.len())];

        let a = synthesize_treatment_plan(severity, pattern, &patient, &symptoms);
        let b = synthesize_treatment_plan(severity, pattern, &patient, &symptoms);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
        assert!(!a.primary_medications.is_empty());
        if a.population == rhinitis_advisor::PlanPopulation::General {
            assert_eq!(a.adjunct_therapies.len(), 1);
        }
    }
}

#[test]
fn classifier_covers_the_whole_range() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..200 {
        let s = random_symptoms(&mut rng);
        let t = s.tnss();
        assert!(t <= 12);
        let sev = classify_severity(t);
        assert_eq!(sev, classify_severity(t));
        assert_eq!(sev == Severity::Mild, t <= 4);
        assert_eq!(sev == Severity::Severe, t >= 9);

        let course = DiseaseCourse::new(rng.random_range(0..8), rng.random_range(0..52));
        let expected = if course.days_per_week < 4 || course.duration_weeks < 4 {
            Pattern::Intermittent
        } else {
            Pattern::Persistent
        };
        assert_eq!(classify_pattern(&course), expected);
    }
}

#[test]
fn danger_detection_is_repeatable() {
    let text = "我现在呼吸困难，胸闷，喘不过气";
    assert_eq!(detect_danger_signals(text), detect_danger_signals(text));
}
