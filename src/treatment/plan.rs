//! Treatment plan output shape and the static specs the rule tables are written in.

use serde::{Deserialize, Serialize};

/// Which branch produced the plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanPopulation {
    General,
    Pregnancy,
    Lactation,
    /// Under two years of age.
    Infant,
}

/// One medication recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drug: Option<String>,
    /// Interchangeable products; pick one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dosage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rationale: Option<String>,
}

/// Non-drug or supportive therapy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdjunctTherapy {
    pub name: String,
    pub frequency: String,
    pub benefit: String,
}

/// Static, table-friendly form of `MedicationEntry`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MedicationSpec {
    pub name: &'static str,
    pub drug: Option<&'static str>,
    pub options: &'static [&'static str],
    pub dosage: Option<&'static str>,
    pub duration: Option<&'static str>,
    pub warning: Option<&'static str>,
    pub note: Option<&'static str>,
    pub safety: Option<&'static str>,
    pub priority: Option<&'static str>,
    pub rationale: Option<&'static str>,
}

impl MedicationSpec {
    pub const fn named(name: &'static str) -> Self {
        Self {
            name,
            drug: None,
            options: &[],
            dosage: None,
            duration: None,
            warning: None,
            note: None,
            safety: None,
            priority: None,
            rationale: None,
        }
    }

    pub fn to_entry(&self) -> MedicationEntry {
        let own = |s: Option<&'static str>| s.map(str::to_string);
        MedicationEntry {
            name: self.name.to_string(),
            drug: own(self.drug),
            options: self.options.iter().map(|o| o.to_string()).collect(),
            dosage: own(self.dosage),
            duration: own(self.duration),
            warning: own(self.warning),
            note: own(self.note),
            safety: own(self.safety),
            priority: own(self.priority),
            rationale: own(self.rationale),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdjunctSpec {
    pub name: &'static str,
    pub frequency: &'static str,
    pub benefit: &'static str,
}

impl AdjunctSpec {
    pub fn to_therapy(&self) -> AdjunctTherapy {
        AdjunctTherapy {
            name: self.name.to_string(),
            frequency: self.frequency.to_string(),
            benefit: self.benefit.to_string(),
        }
    }
}

/// Complete plan. Lists only ever grow while a plan is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreatmentPlan {
    pub population: PlanPopulation,
    pub primary_medications: Vec<MedicationEntry>,
    pub adjunct_therapies: Vec<AdjunctTherapy>,
    pub contraindications: Vec<String>,
    pub warnings: Vec<String>,
    pub special_instructions: Vec<String>,
    /// Names of general-table rules that fired, in firing order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applied_rules: Vec<String>,
}

impl TreatmentPlan {
    pub fn new(population: PlanPopulation) -> Self {
        Self {
            population,
            primary_medications: Vec::new(),
            adjunct_therapies: Vec::new(),
            contraindications: Vec::new(),
            warnings: Vec::new(),
            special_instructions: Vec::new(),
            applied_rules: Vec::new(),
        }
    }

    pub fn add_medication(&mut self, spec: &MedicationSpec) {
        self.primary_medications.push(spec.to_entry());
    }

    pub fn add_adjunct(&mut self, spec: &AdjunctSpec) {
        self.adjunct_therapies.push(spec.to_therapy());
    }

    pub fn contraindicate(&mut self, item: impl Into<String>) {
        self.contraindications.push(item.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn instruct(&mut self, message: impl Into<String>) {
        self.special_instructions.push(message.into());
    }

    /// First primary medication whose name contains `fragment`.
    pub fn medication(&self, fragment: &str) -> Option<&MedicationEntry> {
        self.primary_medications
            .iter()
            .find(|m| m.name.contains(fragment))
    }

    pub fn is_contraindicated(&self, fragment: &str) -> bool {
        self.contraindications.iter().any(|c| c.contains(fragment))
    }
}
