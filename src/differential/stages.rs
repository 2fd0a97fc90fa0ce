//! Weighted-sign tables for the four differential stages.
//!
//! Each stage is plain data: a list of `(criterion, weight, label)` rows, a trigger
//! threshold and (for exclusion stages) the score from which confidence is high.
//! The engine in `differential/mod.rs` walks `EXCLUSION_STAGES` in order and then
//! `AR_CONFIRMATION`.

use super::signals::{names, ClinicalSignals};
use super::AlternativeDiagnosis;

/// Condition over the signal map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Criterion {
    /// Signal is truthy.
    Present(&'static str),
    /// Signal is falsy or unset.
    Absent(&'static str),
    /// Signal is numeric and `<= limit`. An absent value never matches.
    AtMost { signal: &'static str, limit: f64 },
}

impl Criterion {
    pub fn holds(&self, signals: &ClinicalSignals) -> bool {
        match *self {
            Criterion::Present(name) => signals.flag(name),
            Criterion::Absent(name) => !signals.flag(name),
            Criterion::AtMost { signal, limit } => {
                signals.number(signal).is_some_and(|v| v <= limit)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WeightedSign {
    pub criterion: Criterion,
    pub weight: u32,
    pub label: &'static str,
}

const fn sign(criterion: Criterion, weight: u32, label: &'static str) -> WeightedSign {
    WeightedSign {
        criterion,
        weight,
        label,
    }
}

/// Score and supporting-sign labels accumulated over one stage's table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    pub score: u32,
    pub signs: Vec<String>,
}

/// Sum the weights of every row whose criterion holds, in table order.
pub fn tally(rows: &[WeightedSign], signals: &ClinicalSignals) -> Tally {
    rows.iter()
        .filter(|row| row.criterion.holds(signals))
        .fold(Tally::default(), |mut acc, row| {
            acc.score += row.weight;
            acc.signs.push(row.label.to_string());
            acc
        })
}

/// A stage that, when triggered, reports an alternative diagnosis and stops evaluation.
#[derive(Debug)]
pub struct ExclusionStage {
    pub diagnosis: AlternativeDiagnosis,
    pub signs: &'static [WeightedSign],
    pub threshold: u32,
    pub high_confidence_at: u32,
    pub guidance: &'static str,
    /// Recorded in `DifferentialResult::excluded` when the stage does not trigger.
    pub excluded_label: &'static str,
}

/// Final stage: decides whether the presentation supports an AR workup.
#[derive(Debug)]
pub struct ConfirmationStage {
    pub signs: &'static [WeightedSign],
    pub threshold: u32,
    pub confirmed_guidance: &'static str,
    pub escalation_guidance: &'static str,
}

use Criterion::{Absent, AtMost, Present};

const COLD_SIGNS: &[WeightedSign] = &[
    sign(
        AtMost {
            signal: names::DURATION_DAYS,
            limit: 10.0,
        },
        2,
        "病程≤10天",
    ),
    sign(Present(names::HAS_FEVER), 2, "发热"),
    sign(Present(names::SORE_THROAT), 1, "咽痛"),
    sign(Present(names::YELLOW_DISCHARGE), 1, "黄涕"),
    sign(Present(names::BODY_ACHE), 1, "全身酸痛"),
];

const SINUSITIS_SIGNS: &[WeightedSign] = &[
    sign(Present(names::PURULENT_DISCHARGE), 3, "脓性鼻涕（黄/绿）"),
    sign(Present(names::FACIAL_PAIN), 2, "面部/面颊疼痛"),
    sign(Present(names::LOSS_OF_SMELL), 2, "嗅觉明显下降"),
    sign(Present(names::HAS_FEVER), 1, "发热"),
    sign(Present(names::HEADACHE), 1, "头痛"),
];

const VASOMOTOR_SIGNS: &[WeightedSign] = &[
    sign(Present(names::COLD_AIR_TRIGGER), 2, "冷空气诱发"),
    sign(Present(names::ODOR_TRIGGER), 2, "刺激性气味诱发"),
    sign(Present(names::POSITION_TRIGGER), 1, "体位变化诱发"),
    sign(Absent(names::SIGNIFICANT_ITCH), 2, "鼻痒不明显"),
    sign(Absent(names::HAS_ALLERGEN), 1, "无明确过敏原"),
];

const AR_SIGNS: &[WeightedSign] = &[
    sign(Present(names::HAS_SNEEZE), 1, "频繁打喷嚏"),
    sign(Present(names::HAS_CLEAR_DISCHARGE), 1, "清水样鼻涕"),
    sign(Present(names::SIGNIFICANT_ITCH), 2, "明显鼻痒"),
    sign(Present(names::HAS_NASAL_CONGESTION), 1, "鼻塞"),
    sign(Present(names::RECURRENT), 1, "反复发作"),
    sign(Present(names::HAS_ALLERGEN), 2, "有明确过敏原"),
];

/// Evaluated strictly in this order; the first triggered stage wins.
pub static EXCLUSION_STAGES: [ExclusionStage; 3] = [
    ExclusionStage {
        diagnosis: AlternativeDiagnosis::CommonCold,
        signs: COLD_SIGNS,
        threshold: 3,
        high_confidence_at: 4,
        guidance: "根据您的症状，更像是感冒。建议：\n\
                   1. 多休息、多喝水\n\
                   2. 症状通常7-10天内自然缓解\n\
                   3. 如持续不愈或加重，请就医\n\
                   4. 可对症处理：发热可服用退热药，咽痛可含服咽喉片",
        excluded_label: "感冒（病程长/无发热/无黄涕）",
    },
    ExclusionStage {
        diagnosis: AlternativeDiagnosis::Sinusitis,
        signs: SINUSITIS_SIGNS,
        threshold: 4,
        high_confidence_at: 6,
        guidance: "您的症状提示可能为鼻窦炎，建议：\n\
                   1. 前往耳鼻喉科就诊\n\
                   2. 可能需要抗生素治疗\n\
                   3. 必要时需要CT检查明确诊断\n\
                   4. 不建议自行用药",
        excluded_label: "鼻窦炎（无脓涕/无面部疼痛）",
    },
    ExclusionStage {
        diagnosis: AlternativeDiagnosis::VasomotorRhinitis,
        signs: VASOMOTOR_SIGNS,
        threshold: 4,
        high_confidence_at: 5,
        guidance: "您的症状可能是血管运动性鼻炎，建议：\n\
                   1. 避免诱因（冷空气、刺激性气味、温度骤变）\n\
                   2. 可使用鼻用糖皮质激素\n\
                   3. 生理盐水鼻腔冲洗\n\
                   4. 如症状严重，建议耳鼻喉科就诊",
        excluded_label: "血管运动性鼻炎（鼻痒明显/有明确过敏原）",
    },
];

pub static AR_CONFIRMATION: ConfirmationStage = ConfirmationStage {
    signs: AR_SIGNS,
    threshold: 5,
    confirmed_guidance: "✅ 已排除感冒、鼻窦炎、血管运动性鼻炎\n\
                         ✅ 症状符合过敏性鼻炎特征\n\
                         → 可以进入TNSS评分和治疗方案制定",
    escalation_guidance: "⚠️ 症状不典型，无法明确诊断\n\
                          建议：\n\
                          1. 转人工问诊服务（由执业医师评估）\n\
                          2. 前往线下耳鼻喉科就诊\n\
                          3. 可能需要过敏原检测、鼻镜检查等进一步检查",
};
