//! Plain-text rendering for the terminal front end.

use chrono::Datelike;
use std::fmt::Write as _;

use services::{DataSource, ProfileProgress, WeekSchedule};
use sport_core::model::{Club, ClubDetail, FaqCategory, FitnessExercise, ProgressRecord};
use sport_core::schedule::weekday_name;

const DATE_FORMAT: &str = "%d %b %Y";

pub fn week(schedule: &WeekSchedule) -> String {
    let mut out = String::new();
    if let DataSource::Sample { reason } = schedule.source() {
        let _ = writeln!(out, "!! SAMPLE DATA: schedule unavailable ({reason})");
        let _ = writeln!(out, "!! These sessions are examples and cannot be booked.");
        let _ = writeln!(out);
    }
    let _ = writeln!(
        out,
        "Week of {}",
        schedule.week_start().format(DATE_FORMAT)
    );

    for day in schedule.days() {
        let _ = writeln!(
            out,
            "\n{} {}",
            weekday_name(day.date.weekday()),
            day.date.format(DATE_FORMAT)
        );
        if day.sessions.is_empty() {
            let _ = writeln!(out, "  (no sessions)");
            continue;
        }
        for session in &day.sessions {
            let marker = if session.enrolled { "[x]" } else { "[ ]" };
            let places = match session.training.free_places() {
                Some(0) => " full".to_string(),
                Some(free) => format!(" {free} free"),
                None => String::new(),
            };
            let place = session
                .training
                .place
                .as_deref()
                .map(|place| format!(" @ {place}"))
                .unwrap_or_default();
            let _ = writeln!(
                out,
                "  {marker} {}  {}{place}{places}",
                session.slot.time(),
                session.slot.activity()
            );
            let _ = writeln!(out, "      id: {}", session.key);
        }
    }
    out
}

pub fn progress(record: &ProgressRecord) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Progress: {record}");
    let _ = writeln!(out, "Remaining: {:.1} h", record.remaining_hours());
    let _ = writeln!(out, "Self-sport: {:.1} h", record.self_sport_hours);
    if record.debt > 0.0 {
        let _ = writeln!(out, "Debt: {:.1} h", record.debt);
    }
    if record.is_complete {
        let _ = writeln!(out, "Semester requirement met.");
    }
    out
}

pub fn profile(result: &ProfileProgress) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", result.profile.name);
    if !result.profile.email.is_empty() {
        let _ = writeln!(out, "{}", result.profile.email);
    }
    let _ = writeln!(out, "Medical group: {}", result.profile.medical_group);
    out.push_str(&progress(&result.progress));
    out
}

pub fn clubs(clubs: &[Club]) -> String {
    if clubs.is_empty() {
        return "No clubs.\n".to_string();
    }
    let mut out = String::new();
    for club in clubs {
        let _ = writeln!(
            out,
            "{:>5}  {} ({} groups)",
            club.id.value(),
            club.name,
            club.groups.len()
        );
    }
    out
}

pub fn club(detail: &ClubDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", detail.club.name);
    if !detail.club.description.is_empty() {
        let _ = writeln!(out, "{}", detail.club.description);
    }
    for group in &detail.club.groups {
        let places = group
            .free_places()
            .map(|free| format!(", {free} free"))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "\n{} ({} enrolled{places})",
            group.name, group.current_load
        );
        if !group.trainers.is_empty() {
            let _ = writeln!(out, "  trainers: {}", group.trainers.join(", "));
        }
        for member in detail.members_of(&group.name) {
            let _ = writeln!(out, "  - {}", member.name);
        }
    }
    out
}

pub fn faq(categories: &[FaqCategory]) -> String {
    let mut out = String::new();
    for category in categories {
        let _ = writeln!(out, "== {} ==", category.name);
        for entry in &category.entries {
            let _ = writeln!(out, "Q: {}", entry.question);
            let _ = writeln!(out, "A: {}\n", entry.answer);
        }
    }
    out
}

pub fn exercises(exercises: &[FitnessExercise]) -> String {
    let mut out = String::new();
    for exercise in exercises {
        let kind = match (&exercise.select, &exercise.unit) {
            (Some(options), _) => format!("one of: {}", options.join(", ")),
            (None, Some(unit)) => unit.clone(),
            (None, None) => "number".to_string(),
        };
        let _ = writeln!(out, "{:>4}  {} [{kind}]", exercise.id.value(), exercise.name);
    }
    out
}
