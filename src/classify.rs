//! Severity and pattern classifier. No I/O, no state.

use crate::model::{DiseaseCourse, Pattern, Severity};

/// TNSS at or below this is mild.
const MILD_MAX_TNSS: u8 = 4;
/// TNSS at or below this (and above mild) is moderate.
const MODERATE_MAX_TNSS: u8 = 8;

/// Fewer attack days per week than this is intermittent.
const PERSISTENT_MIN_DAYS_PER_WEEK: u32 = 4;
/// Fewer weeks than this is intermittent.
const PERSISTENT_MIN_WEEKS: u32 = 4;

/// Map a TNSS total (0..=12) to a severity grade.
///
/// The range is guaranteed by `SymptomScore`; values above 12 still grade as severe.
pub fn classify_severity(tnss: u8) -> Severity {
    if tnss <= MILD_MAX_TNSS {
        Severity::Mild
    } else if tnss <= MODERATE_MAX_TNSS {
        Severity::Moderate
    } else {
        Severity::Severe
    }
}

/// Either short attack frequency or short duration alone makes the course intermittent.
pub fn classify_pattern(course: &DiseaseCourse) -> Pattern {
    if course.days_per_week < PERSISTENT_MIN_DAYS_PER_WEEK
        || course.duration_weeks < PERSISTENT_MIN_WEEKS
    {
        Pattern::Intermittent
    } else {
        Pattern::Persistent
    }
}
