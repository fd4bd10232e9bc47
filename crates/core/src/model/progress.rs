use std::fmt;

use crate::model::profile::{LegacyHours, StudentProfile};

/// UI-ready summary of a student's semester hours.
///
/// Always recomputed from a fresh profile; never mutated in place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgressRecord {
    pub completed_hours: f64,
    pub total_hours: f64,
    pub progress_percentage: f64,
    pub debt: f64,
    pub self_sport_hours: f64,
    pub is_complete: bool,
}

impl ProgressRecord {
    /// Progress from the current profile shape.
    #[must_use]
    pub fn from_profile(profile: &StudentProfile) -> Self {
        Self::compute(
            profile.hours,
            profile.required_hours,
            profile.debt,
            profile.self_sport_hours,
        )
    }

    /// Progress from the older semester-hours endpoint.
    ///
    /// Self-sport hours count toward completion only when they are not paying
    /// off debt.
    #[must_use]
    pub fn from_legacy(hours: &LegacyHours) -> Self {
        Self::compute(
            hours.hours_not_self + hours.hours_self_not_debt,
            hours.hours_sem_max,
            hours.debt,
            hours.hours_self_not_debt + hours.hours_self_debt,
        )
    }

    fn compute(completed_hours: f64, total_hours: f64, debt: f64, self_sport_hours: f64) -> Self {
        let progress_percentage = if total_hours > 0.0 {
            completed_hours * 100.0 / total_hours
        } else {
            0.0
        };

        Self {
            completed_hours,
            total_hours,
            progress_percentage,
            debt,
            self_sport_hours,
            is_complete: progress_percentage >= 100.0,
        }
    }

    /// Hours still missing; zero once the requirement is met.
    #[must_use]
    pub fn remaining_hours(&self) -> f64 {
        (self.total_hours - self.completed_hours).max(0.0)
    }

    /// Percentage rounded to two decimals for display.
    #[must_use]
    pub fn rounded_percentage(&self) -> f64 {
        (self.progress_percentage * 100.0).round() / 100.0
    }
}

impl fmt::Display for ProgressRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} h ({:.2}%)",
            self.completed_hours, self.total_hours, self.progress_percentage
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_progress_partial() {
        let profile = StudentProfile::with_hours(12.0, 30.0, 2.0, 3.0);
        let progress = ProgressRecord::from_profile(&profile);
        assert_eq!(
            progress,
            ProgressRecord {
                completed_hours: 12.0,
                total_hours: 30.0,
                progress_percentage: 40.0,
                debt: 2.0,
                self_sport_hours: 3.0,
                is_complete: false,
            }
        );
        assert_eq!(progress.remaining_hours(), 18.0);
    }

    #[test]
    fn profile_progress_from_nested_json() {
        let profile: StudentProfile = serde_json::from_str(
            r#"{"student_info": {"hours": 12, "required_hours": 30, "debt": 2, "self_sport_hours": 3}}"#,
        )
        .unwrap();
        let progress = ProgressRecord::from_profile(&profile);
        assert_eq!(progress.progress_percentage, 40.0);
        assert!(!progress.is_complete);
    }

    #[test]
    fn zero_total_hours_yields_zero_percent() {
        let progress = ProgressRecord::from_profile(&StudentProfile::with_hours(5.0, 0.0, 0.0, 0.0));
        assert_eq!(progress.progress_percentage, 0.0);
        assert!(!progress.is_complete);
    }

    #[test]
    fn over_completion_is_complete() {
        let progress =
            ProgressRecord::from_profile(&StudentProfile::with_hours(35.0, 30.0, 0.0, 0.0));
        assert_eq!(progress.rounded_percentage(), 116.67);
        assert!(progress.is_complete);
        assert_eq!(progress.remaining_hours(), 0.0);
    }

    #[test]
    fn exactly_required_hours_is_complete() {
        let progress =
            ProgressRecord::from_profile(&StudentProfile::with_hours(30.0, 30.0, 0.0, 0.0));
        assert!(progress.is_complete);
    }

    #[test]
    fn legacy_progress_matches_profile_totals() {
        let legacy = LegacyHours {
            hours_not_self: 8.0,
            hours_self_not_debt: 4.0,
            hours_self_debt: 0.0,
            hours_sem_max: 30.0,
            debt: 0.0,
        };
        let from_legacy = ProgressRecord::from_legacy(&legacy);
        let from_profile =
            ProgressRecord::from_profile(&StudentProfile::with_hours(12.0, 30.0, 0.0, 4.0));

        assert_eq!(from_legacy.completed_hours, 12.0);
        assert_eq!(from_legacy, from_profile);
    }

    #[test]
    fn legacy_self_hours_include_debt_payoff() {
        let legacy = LegacyHours {
            hours_not_self: 2.0,
            hours_self_not_debt: 1.0,
            hours_self_debt: 2.0,
            hours_sem_max: 30.0,
            debt: 3.0,
        };
        let progress = ProgressRecord::from_legacy(&legacy);
        assert_eq!(progress.completed_hours, 3.0);
        assert_eq!(progress.self_sport_hours, 3.0);
        assert_eq!(progress.debt, 3.0);
    }

    #[test]
    fn display_shows_hours_and_percent() {
        let progress = ProgressRecord::from_profile(&StudentProfile::with_hours(12.0, 30.0, 0.0, 0.0));
        assert_eq!(progress.to_string(), "12/30 h (40.00%)");
    }
}
