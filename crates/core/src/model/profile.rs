use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

pub const PLACEHOLDER_NAME: &str = "Student";
pub const PLACEHOLDER_EMAIL: &str = "";
pub const PLACEHOLDER_MEDICAL_GROUP: &str = "Unknown";

//
// ─── WIRE SHAPES ───────────────────────────────────────────────────────────────
//

/// Reads a value of type `T`, or `None` when the field is null or of another
/// type. A malformed field never fails the surrounding record.
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Lenient<T> {
        Value(T),
        Mismatch(IgnoredAny),
    }

    Ok(match Lenient::<T>::deserialize(deserializer)? {
        Lenient::Value(value) => Some(value),
        Lenient::Mismatch(_) => None,
    })
}

/// Student fields as they appear on the wire, in either API generation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StudentFieldsPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub medical_group: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub required_hours: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub debt: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub self_sport_hours: Option<f64>,
}

/// A profile response in either API generation.
///
/// The current generation nests the counters under `student_info`; the older
/// one serves them at the top level. Both are read, field by field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfilePayload {
    #[serde(default, deserialize_with = "lenient")]
    pub student_info: Option<StudentFieldsPayload>,
    #[serde(flatten)]
    pub top_level: StudentFieldsPayload,
}

//
// ─── CANONICAL PROFILE ─────────────────────────────────────────────────────────
//

/// Student profile after shape resolution.
///
/// Deserializes from either payload shape. Nested values win over top-level
/// ones; absent or mistyped counters become `0` and absent or mistyped text
/// becomes a placeholder.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "ProfilePayload")]
pub struct StudentProfile {
    pub name: String,
    pub email: String,
    pub medical_group: String,
    pub hours: f64,
    pub required_hours: f64,
    pub debt: f64,
    pub self_sport_hours: f64,
}

impl StudentProfile {
    /// Profile with placeholder text and the given hour counters.
    #[must_use]
    pub fn with_hours(hours: f64, required_hours: f64, debt: f64, self_sport_hours: f64) -> Self {
        Self {
            name: PLACEHOLDER_NAME.to_string(),
            email: PLACEHOLDER_EMAIL.to_string(),
            medical_group: PLACEHOLDER_MEDICAL_GROUP.to_string(),
            hours,
            required_hours,
            debt,
            self_sport_hours,
        }
    }
}

impl From<ProfilePayload> for StudentProfile {
    fn from(payload: ProfilePayload) -> Self {
        let primary = payload.student_info.unwrap_or_default();
        let fallback = payload.top_level;

        let text = |a: Option<String>, b: Option<String>, placeholder: &str| {
            a.or(b).unwrap_or_else(|| placeholder.to_string())
        };
        let number = |a: Option<f64>, b: Option<f64>| a.or(b).unwrap_or(0.0);

        Self {
            name: text(primary.name, fallback.name, PLACEHOLDER_NAME),
            email: text(primary.email, fallback.email, PLACEHOLDER_EMAIL),
            medical_group: text(
                primary.medical_group,
                fallback.medical_group,
                PLACEHOLDER_MEDICAL_GROUP,
            ),
            hours: number(primary.hours, fallback.hours),
            required_hours: number(primary.required_hours, fallback.required_hours),
            debt: number(primary.debt, fallback.debt),
            self_sport_hours: number(primary.self_sport_hours, fallback.self_sport_hours),
        }
    }
}

//
// ─── LEGACY HOURS ──────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OngoingSemesterPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub hours_not_self: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub hours_self_not_debt: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub hours_self_debt: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub hours_sem_max: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub debt: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LegacyHoursPayload {
    #[serde(default, deserialize_with = "lenient")]
    pub ongoing_semester: Option<OngoingSemesterPayload>,
}

/// Semester counters from the older hours endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(from = "LegacyHoursPayload")]
pub struct LegacyHours {
    pub hours_not_self: f64,
    pub hours_self_not_debt: f64,
    pub hours_self_debt: f64,
    pub hours_sem_max: f64,
    pub debt: f64,
}

impl From<LegacyHoursPayload> for LegacyHours {
    fn from(payload: LegacyHoursPayload) -> Self {
        let semester = payload.ongoing_semester.unwrap_or_default();
        Self {
            hours_not_self: semester.hours_not_self.unwrap_or(0.0),
            hours_self_not_debt: semester.hours_self_not_debt.unwrap_or(0.0),
            hours_self_debt: semester.hours_self_debt.unwrap_or(0.0),
            hours_sem_max: semester.hours_sem_max.unwrap_or(0.0),
            debt: semester.debt.unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(json: &str) -> StudentProfile {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn nested_shape_is_preferred() {
        let p = profile(
            r#"{
                "hours": 1,
                "name": "Top Level",
                "student_info": {"hours": 12, "required_hours": 30, "debt": 2, "self_sport_hours": 3, "name": "Ada"}
            }"#,
        );
        assert_eq!(p.name, "Ada");
        assert_eq!(p.hours, 12.0);
        assert_eq!(p.required_hours, 30.0);
        assert_eq!(p.debt, 2.0);
        assert_eq!(p.self_sport_hours, 3.0);
    }

    #[test]
    fn nested_shape_falls_back_per_field() {
        let p = profile(
            r#"{"email": "ada@uni.example", "required_hours": 30, "student_info": {"hours": 4}}"#,
        );
        assert_eq!(p.email, "ada@uni.example");
        assert_eq!(p.hours, 4.0);
        assert_eq!(p.required_hours, 30.0);
    }

    #[test]
    fn flat_shape_is_accepted() {
        let p = profile(r#"{"hours": 5, "required_hours": 30, "debt": 0, "self_sport_hours": 1}"#);
        assert_eq!(p.hours, 5.0);
        assert_eq!(p.required_hours, 30.0);
        assert_eq!(p.name, PLACEHOLDER_NAME);
        assert_eq!(p.medical_group, PLACEHOLDER_MEDICAL_GROUP);
    }

    #[test]
    fn null_student_info_uses_flat_fields() {
        let p = profile(r#"{"student_info": null, "hours": 7, "required_hours": 30}"#);
        assert_eq!(p.hours, 7.0);
        assert_eq!(p.required_hours, 30.0);
    }

    #[test]
    fn missing_and_null_counters_default_to_zero() {
        let p = profile(r#"{"student_info": {"hours": null}}"#);
        assert_eq!(p, StudentProfile::with_hours(0.0, 0.0, 0.0, 0.0));

        let empty = profile("{}");
        assert_eq!(empty, StudentProfile::with_hours(0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn mistyped_nested_field_costs_only_that_field() {
        let p = profile(r#"{"student_info": {"hours": "12", "required_hours": 30}}"#);
        assert_eq!(p.hours, 0.0);
        assert_eq!(p.required_hours, 30.0);

        let p = profile(r#"{"hours": 5, "student_info": {"hours": [12], "debt": 1}}"#);
        assert_eq!(p.hours, 5.0);
        assert_eq!(p.debt, 1.0);
    }

    #[test]
    fn mistyped_top_level_field_is_ignored() {
        let p = profile(
            r#"{"name": {"first": "Ada"}, "student_info": {"hours": 12, "required_hours": 30}}"#,
        );
        assert_eq!(p.name, PLACEHOLDER_NAME);
        assert_eq!(p.hours, 12.0);
        assert_eq!(p.required_hours, 30.0);
    }

    #[test]
    fn non_object_student_info_uses_flat_fields() {
        let p = profile(r#"{"student_info": "n/a", "hours": 7, "required_hours": 30}"#);
        assert_eq!(p.hours, 7.0);
        assert_eq!(p.required_hours, 30.0);
    }

    #[test]
    fn legacy_hours_default_missing_fields() {
        let hours: LegacyHours = serde_json::from_str(
            r#"{"ongoing_semester": {"hours_not_self": 8, "hours_self_not_debt": 4, "hours_sem_max": 30}}"#,
        )
        .unwrap();
        assert_eq!(hours.hours_not_self, 8.0);
        assert_eq!(hours.hours_self_debt, 0.0);
        assert_eq!(hours.debt, 0.0);

        let empty: LegacyHours = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, LegacyHours::default());

        let mistyped: LegacyHours = serde_json::from_str(
            r#"{"ongoing_semester": {"hours_not_self": "8", "hours_sem_max": 30}}"#,
        )
        .unwrap();
        assert_eq!(mistyped.hours_not_self, 0.0);
        assert_eq!(mistyped.hours_sem_max, 30.0);
    }
}
