//! Plain-text views of journal data for the terminal.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::calendar::{build_month_grid, weeks, CalendarCell, YearMonth, WEEKDAY_NAMES};
use crate::entry::{format_time, BehaviorEntry, FoodEntry, TimelineEntry, VoiceEntry};
use crate::voice::{format_elapsed, RecorderState};

/// Width of one calendar column.
const CELL_WIDTH: usize = 6;

/// A month grid. Days with entries carry a `+N` badge.
#[must_use]
pub fn month(ym: YearMonth, counts: &BTreeMap<u32, usize>) -> String {
    let width = CELL_WIDTH * WEEKDAY_NAMES.len();
    let mut lines = vec![
        format!("{:^width$}", ym.to_string()).trim_end().to_string(),
        WEEKDAY_NAMES
            .iter()
            .map(|name| format!("{name:>4}  "))
            .collect::<String>()
            .trim_end()
            .to_string(),
    ];

    let grid = build_month_grid(ym);
    for week in weeks(&grid) {
        let row: String = week
            .iter()
            .map(|cell| match cell {
                CalendarCell::Blank => " ".repeat(CELL_WIDTH),
                CalendarCell::Day(day) => {
                    let badge = counts
                        .get(day)
                        .map(|n| format!("+{n}"))
                        .unwrap_or_default();
                    format!("{day:>4}{badge:<2}")
                }
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }

    let total: usize = counts.values().sum();
    lines.push(String::new());
    lines.push(format!("{total} entries this month"));
    lines.join("\n")
}

/// Timeline entries for one day, under a dated heading.
#[must_use]
pub fn day(date: NaiveDate, entries: &[&TimelineEntry]) -> String {
    let mut lines = vec![date.format("%A, %B %-d, %Y").to_string()];
    if entries.is_empty() {
        lines.push("  No entries for this day.".to_string());
    }
    for entry in entries {
        lines.push(format!(
            "  {:>8}  {:<10} {} ({})",
            format_time(entry.time),
            entry.entry_type.label(),
            entry.title,
            entry.mood
        ));
    }
    lines.join("\n")
}

/// Food entries, most relevant detail first.
#[must_use]
pub fn food_list(entries: &[FoodEntry]) -> String {
    if entries.is_empty() {
        return "No food entries found.".to_string();
    }
    let mut lines = Vec::new();
    for entry in entries {
        lines.push(format!(
            "{} [{}] {} {}",
            entry.food,
            entry.category,
            entry.date,
            format_time(entry.time)
        ));
        lines.push(format!(
            "    {} - {}",
            entry.reaction.reaction_label(),
            entry.amount
        ));
        if !entry.notes.is_empty() {
            lines.push(format!("    {}", entry.notes));
        }
    }
    lines.join("\n")
}

/// Behavior entries with triggers and calming tools.
#[must_use]
pub fn behavior_list(entries: &[BehaviorEntry]) -> String {
    if entries.is_empty() {
        return "No behavior entries found.".to_string();
    }
    let mut lines = Vec::new();
    for entry in entries {
        lines.push(format!(
            "{} ({}, intensity {}/5, {}) {} {}",
            entry.behavior,
            entry.mood,
            entry.intensity,
            entry.duration,
            entry.date,
            format_time(entry.time)
        ));
        if !entry.triggers.is_empty() {
            lines.push(format!("    Triggers: {}", entry.triggers.join(", ")));
        }
        if !entry.calming_tools.is_empty() {
            lines.push(format!(
                "    Calming tools: {}",
                entry.calming_tools.join(", ")
            ));
        }
        if !entry.notes.is_empty() {
            lines.push(format!("    {}", entry.notes));
        }
    }
    lines.join("\n")
}

fn bullets(points: &[String]) -> impl Iterator<Item = String> + '_ {
    points.iter().map(|point| format!("  • {point}"))
}

/// Voice notes with their bullet summaries.
#[must_use]
pub fn voice_list(entries: &[VoiceEntry]) -> String {
    if entries.is_empty() {
        return "No voice notes found.".to_string();
    }
    let mut lines = Vec::new();
    for entry in entries {
        lines.push(format!(
            "{} · {} · {}",
            entry.category.label(),
            format_elapsed(entry.duration_secs),
            entry.recorded_at.format("%Y-%m-%d %H:%M")
        ));
        lines.extend(bullets(&entry.bullet_points));
    }
    lines.join("\n")
}

/// A finished recording: duration, any error, and the summary.
#[must_use]
pub fn recording(state: &RecorderState) -> String {
    let mut lines = vec![format!("Duration: {}", state.elapsed_label())];
    if let Some(error) = &state.error {
        lines.push(format!("Error: {error}"));
    }
    if let Some(category) = state.category {
        lines.push(format!("Category: {}", category.label()));
    }
    if state.bullet_points.is_empty() {
        lines.push("Nothing to summarize.".to_string());
    } else {
        lines.push("Summary:".to_string());
        lines.extend(bullets(&state.bullet_points));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::entry::{EntryType, Mood, VoiceCategory};
    use crate::repository::seed;

    fn jan() -> YearMonth {
        YearMonth::new(2024, 0).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_month_layout() {
        let counts = seed::timeline().day_counts(jan(), None);
        let text = month(jan(), &counts);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0].trim(), "January 2024");
        assert!(lines[1].starts_with(" Sun   Mon"));
        // 2024-01-01 is a Monday: one blank column, then the 1st.
        assert_eq!(lines[2], "         1     2     3     4     5     6");
        assert!(lines[3].contains("  11+2"));
        assert!(lines[3].contains("  13+3"));
        assert!(lines[4].contains("  14+3"));
        assert!(lines[4].contains("  15+3"));
        assert_eq!(lines.last(), Some(&"13 entries this month"));
    }

    #[test]
    fn test_month_without_entries() {
        let text = month(jan(), &BTreeMap::new());
        assert!(!text.contains('+'));
        assert!(text.ends_with("0 entries this month"));
    }

    #[test]
    fn test_day_lists_entries() {
        let entry = TimelineEntry::new(
            EntryType::Food,
            "Loved pasta lunch",
            chrono::NaiveTime::from_hms_opt(12, 30, 0).unwrap(),
            Mood::Positive,
        );
        let text = day(today(), &[&entry]);
        assert!(text.starts_with("Monday, January 15, 2024"));
        assert!(text.contains("12:30 PM  Food       Loved pasta lunch (positive)"));
    }

    #[test]
    fn test_day_without_entries() {
        let text = day(today(), &[]);
        assert!(text.contains("No entries for this day."));
    }

    #[test]
    fn test_food_list() {
        let text = food_list(&seed::food_entries(today()));
        assert!(text.contains("Pasta with butter [Main Meal] 2024-01-15 12:30 PM"));
        assert!(text.contains("Loved it - full portion"));
        assert!(text.contains("Disliked - none"));
        assert_eq!(food_list(&[]), "No food entries found.");
    }

    #[test]
    fn test_behavior_list() {
        let text = behavior_list(&seed::behavior_entries(today()));
        assert!(text.contains("Fussy and irritable (negative, intensity 3/5, 15 minutes)"));
        assert!(text.contains("Triggers: Hungry, Tired"));
        assert!(text.contains("Calming tools: Teether, Soft music"));
        assert_eq!(behavior_list(&[]), "No behavior entries found.");
    }

    #[test]
    fn test_voice_list() {
        let now = Utc.with_ymd_and_hms(2024, 1, 15, 18, 0, 0).unwrap();
        let text = voice_list(&seed::voice_entries(now));
        assert!(text.contains("Behavior & Mood · 1:20 · 2024-01-15 14:00"));
        assert!(text.contains("  • First time clapping hands together"));
        assert_eq!(voice_list(&[]), "No voice notes found.");
    }

    #[test]
    fn test_recording_summary() {
        let state = RecorderState {
            bullet_points: vec!["Ate well".to_string(), "Napped".to_string()],
            category: Some(VoiceCategory::General),
            elapsed_secs: 75,
            ..RecorderState::default()
        };
        let text = recording(&state);
        assert_eq!(
            text,
            "Duration: 1:15\nCategory: General Note\nSummary:\n  • Ate well\n  • Napped"
        );
    }

    #[test]
    fn test_recording_with_error() {
        let state = RecorderState {
            error: Some("No speech detected.".to_string()),
            ..RecorderState::default()
        };
        let text = recording(&state);
        assert!(text.contains("Error: No speech detected."));
        assert!(text.ends_with("Nothing to summarize."));
    }
}
