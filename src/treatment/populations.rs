//! Special-population plans. These replace the general rule table entirely.

use super::plan::{MedicationSpec, PlanPopulation, TreatmentPlan};
use crate::model::Severity;

/// Patients younger than this get the infant plan.
pub const INFANT_AGE_LIMIT: u32 = 2;

const PREGNANCY_SALINE: MedicationSpec = MedicationSpec {
    dosage: Some("每天3-4次"),
    priority: Some("首选"),
    safety: Some("完全安全"),
    ..MedicationSpec::named("生理盐水鼻腔冲洗")
};

const PREGNANCY_BUDESONIDE: MedicationSpec = MedicationSpec {
    dosage: Some("每天1次，每侧鼻孔1-2喷"),
    safety: Some("FDA妊娠分级B级，相对安全"),
    ..MedicationSpec::named("布地奈德鼻喷剂")
};

const PREGNANCY_LORATADINE: MedicationSpec = MedicationSpec {
    dosage: Some("10mg 每天1次"),
    safety: Some("FDA妊娠分级B级"),
    note: Some("症状明显时使用"),
    ..MedicationSpec::named("氯雷他定")
};

const PREGNANCY_CONTRAINDICATIONS: &[&str] = &[
    "伪麻黄碱",
    "第一代抗组胺药",
    "长期大剂量鼻用减充血剂",
];

const PREGNANCY_WARNING: &str = "⚠️ 孕期用药需谨慎，以下方案相对安全，但仍建议产科医生评估";

const PREGNANCY_TRIMESTER_NOTES: &[&str] = &[
    "孕早期（前3个月）：尽量避免用药，首选非药物治疗",
    "孕中晚期：可谨慎使用以下药物",
];

const LACTATION_SALINE: MedicationSpec = MedicationSpec {
    dosage: Some("每天2-3次"),
    safety: Some("完全安全"),
    ..MedicationSpec::named("生理盐水鼻腔冲洗")
};

const LACTATION_BUDESONIDE: MedicationSpec = MedicationSpec {
    dosage: Some("每天1次，每侧鼻孔1-2喷"),
    safety: Some("局部作用，极少进入乳汁"),
    ..MedicationSpec::named("布地奈德鼻喷剂")
};

const LACTATION_LORATADINE: MedicationSpec = MedicationSpec {
    dosage: Some("10mg 每天1次"),
    safety: Some("少量进入乳汁，但无明显影响"),
    ..MedicationSpec::named("氯雷他定")
};

const LACTATION_NOTE: &str = "✅ 以下药物在哺乳期相对安全，乳汁中含量极低";

const INFANT_SALINE: MedicationSpec = MedicationSpec {
    dosage: Some("每天2-3次"),
    note: Some("婴幼儿唯一安全选择"),
    ..MedicationSpec::named("生理盐水鼻腔冲洗")
};

const INFANT_REFERRAL: &str = "2岁以下婴幼儿建议线下儿科就诊";

/// Non-drug measures first; budesonide and loratadine only from moderate severity.
pub fn pregnancy_plan(severity: Severity) -> TreatmentPlan {
    let mut plan = TreatmentPlan::new(PlanPopulation::Pregnancy);
    plan.warn(PREGNANCY_WARNING);
    for note in PREGNANCY_TRIMESTER_NOTES {
        plan.instruct(*note);
    }

    plan.add_medication(&PREGNANCY_SALINE);
    if severity.is_moderate_or_worse() {
        plan.add_medication(&PREGNANCY_BUDESONIDE);
        plan.add_medication(&PREGNANCY_LORATADINE);
    }

    for item in PREGNANCY_CONTRAINDICATIONS {
        plan.contraindicate(*item);
    }
    plan
}

pub fn lactation_plan(severity: Severity) -> TreatmentPlan {
    let mut plan = TreatmentPlan::new(PlanPopulation::Lactation);
    plan.warn(LACTATION_NOTE);

    plan.add_medication(&LACTATION_SALINE);
    if severity.is_moderate_or_worse() {
        plan.add_medication(&LACTATION_BUDESONIDE);
        plan.add_medication(&LACTATION_LORATADINE);
    }
    plan
}

/// Saline only, plus a referral. Nothing else applies under two years.
pub fn infant_plan() -> TreatmentPlan {
    let mut plan = TreatmentPlan::new(PlanPopulation::Infant);
    plan.add_medication(&INFANT_SALINE);
    plan.instruct(INFANT_REFERRAL);
    plan
}
