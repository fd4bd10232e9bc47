use chrono::{Duration, FixedOffset, NaiveDate, NaiveTime};

use sport_core::model::{Training, TrainingId};

/// Campus offset used for built-in sample sessions (UTC+3).
const CAMPUS_OFFSET_SECS: i32 = 3 * 3600;

// (day offset from Monday, activity, start, end, place)
const SAMPLE_WEEK: &[(i64, &str, (u32, u32), (u32, u32), &str)] = &[
    (0, "Table Tennis", (9, 0), (10, 30), "Sports complex, hall 1"),
    (0, "Yoga", (18, 0), (19, 0), "Sports complex, hall 2"),
    (1, "Basketball", (19, 0), (20, 30), "Sports complex, main hall"),
    (2, "Swimming", (7, 30), (8, 30), "Pool"),
    (3, "Volleyball", (18, 0), (19, 30), "Sports complex, main hall"),
    (4, "Football", (17, 0), (18, 30), "Stadium"),
    (5, "Running", (10, 0), (11, 0), "Stadium"),
];

/// Built-in sessions shown when the backend is unreachable.
///
/// They are never bookable: `can_check_in` is always `false`.
#[must_use]
pub fn sample_trainings(week_start: NaiveDate) -> Vec<Training> {
    let Some(offset) = FixedOffset::east_opt(CAMPUS_OFFSET_SECS) else {
        return Vec::new();
    };

    (1_u64..)
        .zip(SAMPLE_WEEK)
        .filter_map(|(id, &(day, activity, start, end, place))| {
            let date = week_start + Duration::days(day);
            let start = NaiveTime::from_hms_opt(start.0, start.1, 0)?;
            let end = NaiveTime::from_hms_opt(end.0, end.1, 0)?;
            Some(Training {
                id: TrainingId::new(id),
                activity: activity.to_string(),
                start: date.and_time(start).and_local_timezone(offset).single()?,
                end: date.and_time(end).and_local_timezone(offset).single()?,
                place: Some(place.to_string()),
                checked_in: false,
                can_check_in: false,
                capacity: None,
                load: 0,
            })
        })
        .collect()
}
