//! Partial, name-keyed signal map consumed by the differential engine.
//!
//! The engine is total over this map: an absent key reads as `false` / no value.
//! Values keep whatever JSON-ish type the caller supplied; `flag()` applies the
//! usual truthiness (non-zero number, non-empty text) so loosely typed callers work.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Well-known signal names.
pub mod names {
    pub const DURATION_DAYS: &str = "duration_days";
    pub const HAS_FEVER: &str = "has_fever";
    pub const SORE_THROAT: &str = "sore_throat";
    pub const YELLOW_DISCHARGE: &str = "yellow_discharge";
    pub const BODY_ACHE: &str = "body_ache";

    pub const PURULENT_DISCHARGE: &str = "purulent_discharge";
    pub const FACIAL_PAIN: &str = "facial_pain";
    pub const LOSS_OF_SMELL: &str = "loss_of_smell";
    pub const HEADACHE: &str = "headache";

    pub const COLD_AIR_TRIGGER: &str = "cold_air_trigger";
    pub const ODOR_TRIGGER: &str = "odor_trigger";
    pub const POSITION_TRIGGER: &str = "position_trigger";
    pub const SIGNIFICANT_ITCH: &str = "significant_itch";
    pub const HAS_ALLERGEN: &str = "has_allergen";

    pub const HAS_SNEEZE: &str = "has_sneeze";
    pub const HAS_CLEAR_DISCHARGE: &str = "has_clear_discharge";
    pub const HAS_NASAL_CONGESTION: &str = "has_nasal_congestion";
    pub const RECURRENT: &str = "recurrent";
}

/// One signal value as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SignalValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Null,
}

impl SignalValue {
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Null => false,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(*n),
            _ => None,
        }
    }
}

impl From<bool> for SignalValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for SignalValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for SignalValue {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i32> for SignalValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<u32> for SignalValue {
    fn from(n: u32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for SignalValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for SignalValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

/// Name → value map of clinical signals. Ordered so iteration and serialization are stable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClinicalSignals(BTreeMap<String, SignalValue>);

impl ClinicalSignals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<SignalValue>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<SignalValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&SignalValue> {
        self.0.get(name)
    }

    /// Truthiness of a signal; absent reads as `false`.
    pub fn flag(&self, name: &str) -> bool {
        self.0.get(name).is_some_and(SignalValue::is_truthy)
    }

    /// Numeric value of a signal, if present and numeric.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.0.get(name).and_then(SignalValue::as_number)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ClinicalSignals
where
    K: Into<String>,
    V: Into<SignalValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut signals = Self::new();
        for (k, v) in iter {
            signals.insert(k, v);
        }
        signals
    }
}
