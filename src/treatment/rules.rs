//! General treatment rule table.
//!
//! Each `PlanRule` pairs a `When` (all set fields must hold) with a `Then`
//! (entries appended to the plan). Every matching rule fires, in table order:
//!   1. comorbidity contraindications
//!   2. regimen by (severity, pattern) and symptom add-ons
//!   3. universal saline adjunct
//!   4. safety checks (alcohol, antiplatelets, renal function)
//! Rules only append; nothing fired earlier is removed or replaced.

use tracing::debug;

use super::plan::{AdjunctSpec, MedicationSpec, TreatmentPlan};
use crate::error::SymptomField;
use crate::model::{Pattern, PatientProfile, Severity, SymptomScore};

/// Creatinine clearance (ml/min) below which antihistamine doses are reduced.
pub const RENAL_CLEARANCE_CUTOFF: f64 = 30.0;

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct PlanContext<'a> {
    pub severity: Severity,
    pub pattern: Pattern,
    pub patient: &'a PatientProfile,
    pub symptoms: &'a SymptomScore,
}

/// Patient-level predicate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PatientCondition {
    Asthma,
    Glaucoma,
    ProstaticHyperplasia,
    RecentAlcohol,
    TakingAnyOf(&'static [&'static str]),
    /// Kidney disease with a measured clearance below the limit.
    RenalClearanceBelow(f64),
}

impl PatientCondition {
    pub fn holds(&self, p: &PatientProfile) -> bool {
        match *self {
            Self::Asthma => p.has_asthma,
            Self::Glaucoma => p.has_glaucoma,
            Self::ProstaticHyperplasia => p.has_bph,
            Self::RecentAlcohol => p.recent_alcohol,
            Self::TakingAnyOf(names) => p.takes_any(names),
            Self::RenalClearanceBelow(limit) => {
                p.has_kidney_disease && p.renal_clearance.is_some_and(|c| c < limit)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct When {
    pub severities: Option<&'static [Severity]>,
    pub pattern: Option<Pattern>,
    pub condition: Option<PatientCondition>,
    pub symptom_at_least: Option<(SymptomField, u8)>,
}

/// Matches every context.
pub const ALWAYS: When = When {
    severities: None,
    pattern: None,
    condition: None,
    symptom_at_least: None,
};

impl When {
    pub fn matches(&self, ctx: &PlanContext<'_>) -> bool {
        if let Some(sevs) = self.severities {
            if !sevs.contains(&ctx.severity) {
                return false;
            }
        }
        if let Some(p) = self.pattern {
            if p != ctx.pattern {
                return false;
            }
        }
        if let Some(c) = &self.condition {
            if !c.holds(ctx.patient) {
                return false;
            }
        }
        if let Some((field, min)) = self.symptom_at_least {
            if ctx.symptoms.get(field) < min {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Then {
    pub medications: &'static [MedicationSpec],
    pub adjuncts: &'static [AdjunctSpec],
    pub contraindications: &'static [&'static str],
    pub warnings: &'static [&'static str],
    pub instructions: &'static [&'static str],
}

pub const NOTHING: Then = Then {
    medications: &[],
    adjuncts: &[],
    contraindications: &[],
    warnings: &[],
    instructions: &[],
};

impl Then {
    pub fn apply(&self, plan: &mut TreatmentPlan) {
        for m in self.medications {
            plan.add_medication(m);
        }
        for a in self.adjuncts {
            plan.add_adjunct(a);
        }
        for c in self.contraindications {
            plan.contraindicate(*c);
        }
        for w in self.warnings {
            plan.warn(*w);
        }
        for i in self.instructions {
            plan.instruct(*i);
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PlanRule {
    pub name: &'static str,
    pub when: When,
    pub then: Then,
}

const MILD: &[Severity] = &[Severity::Mild];
const MODERATE_OR_SEVERE: &[Severity] = &[Severity::Moderate, Severity::Severe];

const NASAL_STEROID_OPTIONS: &[&str] = &["糠酸莫米松", "丙酸氟替卡松", "布地奈德"];

const ON_DEMAND_ANTIHISTAMINE: MedicationSpec = MedicationSpec {
    dosage: Some("氯雷他定 10mg 每天1次，按需使用"),
    duration: Some("症状发作时使用"),
    ..MedicationSpec::named("氯雷他定片 或 鼻用抗组胺药")
};

const FIRST_LINE_NASAL_STEROID: MedicationSpec = MedicationSpec {
    options: NASAL_STEROID_OPTIONS,
    dosage: Some("每天1次，每侧鼻孔2喷"),
    duration: Some("至少2-4周"),
    ..MedicationSpec::named("鼻用糖皮质激素（首选）")
};

const AS_NEEDED_ORAL_ANTIHISTAMINE: MedicationSpec = MedicationSpec {
    options: &["氯雷他定", "地氯雷他定"],
    dosage: Some("按需使用，控制鼻痒、喷嚏"),
    ..MedicationSpec::named("口服抗组胺药（辅助）")
};

const MANDATORY_NASAL_STEROID: MedicationSpec = MedicationSpec {
    options: NASAL_STEROID_OPTIONS,
    dosage: Some("每天1-2次，每侧鼻孔2喷"),
    duration: Some("至少4周，症状控制后逐步减量"),
    ..MedicationSpec::named("鼻用糖皮质激素（必需）")
};

const SHORT_COURSE_DECONGESTANT: MedicationSpec = MedicationSpec {
    drug: Some("羟甲唑啉"),
    dosage: Some("每侧鼻孔1-2喷，每天2次"),
    duration: Some("不超过3-5天"),
    warning: Some("⚠️ 长期使用导致药物性鼻炎"),
    ..MedicationSpec::named("鼻用减充血剂（短期）")
};

const ORAL_ANTIHISTAMINE: MedicationSpec = MedicationSpec {
    options: &["氯雷他定", "地氯雷他定", "左西替利嗪"],
    dosage: Some("每天1次"),
    ..MedicationSpec::named("口服抗组胺药")
};

const LEUKOTRIENE_ANTAGONIST: MedicationSpec = MedicationSpec {
    dosage: Some("10mg 每天1次（晚上）"),
    rationale: Some("同时管理上下气道炎症"),
    ..MedicationSpec::named("孟鲁司特钠")
};

const SALINE_IRRIGATION: AdjunctSpec = AdjunctSpec {
    name: "生理盐水/海盐水鼻腔冲洗",
    frequency: "每天2-3次",
    benefit: "物理清除过敏原、稀释分泌物",
};

/// Literal medication names that trigger the bleeding-risk warning.
pub const ANTIPLATELET_NAMES: &[&str] = &["阿司匹林", "氯吡格雷", "aspirin", "clopidogrel"];

pub static GENERAL_RULES: &[PlanRule] = &[
    PlanRule {
        name: "glaucoma_contraindications",
        when: When {
            condition: Some(PatientCondition::Glaucoma),
            ..ALWAYS
        },
        then: Then {
            contraindications: &["第一代抗组胺药（扑尔敏等）", "鼻用减充血剂（羟甲唑啉等）"],
            ..NOTHING
        },
    },
    PlanRule {
        name: "bph_contraindications",
        when: When {
            condition: Some(PatientCondition::ProstaticHyperplasia),
            ..ALWAYS
        },
        then: Then {
            contraindications: &["第一代抗组胺药", "伪麻黄碱"],
            ..NOTHING
        },
    },
    PlanRule {
        name: "mild_intermittent_on_demand_antihistamine",
        when: When {
            severities: Some(MILD),
            pattern: Some(Pattern::Intermittent),
            ..ALWAYS
        },
        then: Then {
            medications: &[ON_DEMAND_ANTIHISTAMINE],
            ..NOTHING
        },
    },
    PlanRule {
        name: "mild_persistent_nasal_steroid",
        when: When {
            severities: Some(MILD),
            pattern: Some(Pattern::Persistent),
            ..ALWAYS
        },
        then: Then {
            medications: &[FIRST_LINE_NASAL_STEROID, AS_NEEDED_ORAL_ANTIHISTAMINE],
            ..NOTHING
        },
    },
    PlanRule {
        name: "moderate_severe_nasal_steroid",
        when: When {
            severities: Some(MODERATE_OR_SEVERE),
            ..ALWAYS
        },
        then: Then {
            medications: &[MANDATORY_NASAL_STEROID],
            ..NOTHING
        },
    },
    PlanRule {
        name: "congestion_short_course_decongestant",
        when: When {
            severities: Some(MODERATE_OR_SEVERE),
            symptom_at_least: Some((SymptomField::NasalCongestion, 2)),
            ..ALWAYS
        },
        then: Then {
            medications: &[SHORT_COURSE_DECONGESTANT],
            ..NOTHING
        },
    },
    PlanRule {
        name: "itch_oral_antihistamine",
        when: When {
            severities: Some(MODERATE_OR_SEVERE),
            symptom_at_least: Some((SymptomField::NasalItch, 2)),
            ..ALWAYS
        },
        then: Then {
            medications: &[ORAL_ANTIHISTAMINE],
            ..NOTHING
        },
    },
    PlanRule {
        name: "asthma_leukotriene_antagonist",
        when: When {
            severities: Some(MODERATE_OR_SEVERE),
            condition: Some(PatientCondition::Asthma),
            ..ALWAYS
        },
        then: Then {
            medications: &[LEUKOTRIENE_ANTAGONIST],
            warnings: &["🚨 合并哮喘患者：鼻炎控制不佳可能诱发哮喘发作。\
                         如出现喘息、呼吸困难，请立即就医！"],
            ..NOTHING
        },
    },
    PlanRule {
        name: "saline_irrigation",
        when: ALWAYS,
        then: Then {
            adjuncts: &[SALINE_IRRIGATION],
            ..NOTHING
        },
    },
    PlanRule {
        name: "alcohol_sedation_warning",
        when: When {
            condition: Some(PatientCondition::RecentAlcohol),
            ..ALWAYS
        },
        then: Then {
            warnings: &["⚠️ 近期饮酒：请避免使用西替利嗪等可能引起镇静的药物"],
            ..NOTHING
        },
    },
    PlanRule {
        name: "antiplatelet_bleeding_warning",
        when: When {
            condition: Some(PatientCondition::TakingAnyOf(ANTIPLATELET_NAMES)),
            ..ALWAYS
        },
        then: Then {
            warnings: &["⚠️ 您正在使用抗凝药物，长期使用鼻用激素可能增加鼻出血风险，请注意观察"],
            ..NOTHING
        },
    },
    PlanRule {
        name: "renal_dose_adjustment",
        when: When {
            condition: Some(PatientCondition::RenalClearanceBelow(RENAL_CLEARANCE_CUTOFF)),
            ..ALWAYS
        },
        then: Then {
            instructions: &["肾功能不全（肌酐清除率<30ml/min）：\n\
                             - 西替利嗪：5mg 隔日1次\n\
                             - 左西替利嗪：5mg 隔日1次\n\
                             - 优先选择：鼻用激素（无需调整剂量）"],
            ..NOTHING
        },
    },
];

/// Fire every matching rule of `GENERAL_RULES` into `plan`.
pub fn apply_general_rules(ctx: &PlanContext<'_>, plan: &mut TreatmentPlan) {
    for rule in GENERAL_RULES {
        if rule.when.matches(ctx) {
            debug!(target: "treatment", rule = rule.name, "rule fired");
            rule.then.apply(plan);
            plan.applied_rules.push(rule.name.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_names_are_unique() {
        let mut names: Vec<&str> = GENERAL_RULES.iter().map(|r| r.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), GENERAL_RULES.len());
    }

    #[test]
    fn renal_rule_needs_kidney_disease_and_a_value() {
        let c = PatientCondition::RenalClearanceBelow(RENAL_CLEARANCE_CUTOFF);

        let mut p = PatientProfile::new(50).with_renal_clearance(20.0);
        assert!(!c.holds(&p), "clearance alone is not enough");

        p.has_kidney_disease = true;
        assert!(c.holds(&p));

        p.renal_clearance = None;
        assert!(!c.holds(&p));

        p.renal_clearance = Some(30.0);
        assert!(!c.holds(&p), "cutoff is exclusive");
    }

    #[test]
    fn when_requires_every_set_field() {
        let p = PatientProfile::new(30);
        let s = SymptomScore::new(1, 1, 1, 2).unwrap();
        let ctx = PlanContext {
            severity: Severity::Moderate,
            pattern: Pattern::Persistent,
            patient: &p,
            symptoms: &s,
        };
        let congestion = When {
            severities: Some(MODERATE_OR_SEVERE),
            symptom_at_least: Some((SymptomField::NasalCongestion, 2)),
            ..ALWAYS
        };
        let itch = When {
            symptom_at_least: Some((SymptomField::NasalItch, 2)),
            ..congestion
        };
        assert!(congestion.matches(&ctx));
        assert!(!itch.matches(&ctx));
        assert!(ALWAYS.matches(&ctx));
    }
}
