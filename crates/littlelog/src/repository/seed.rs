//! Sample journal data.
//!
//! Food, behavior and voice samples are dated relative to the day they are
//! loaded. Timeline samples sit in January 2024.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use super::Timeline;
use crate::calendar::date_key;
use crate::entry::{
    BehaviorEntry, EntryType, FoodEntry, Mood, TimelineEntry, VoiceCategory, VoiceEntry,
};

/// The month the timeline samples fall in.
pub const SAMPLE_YEAR: i32 = 2024;
/// Zero-based month of the timeline samples.
pub const SAMPLE_MONTH0: u32 = 0;

fn at(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

fn yesterday(today: NaiveDate) -> NaiveDate {
    today.pred_opt().unwrap_or(today)
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// Sample meals: two today, one yesterday.
#[must_use]
pub fn food_entries(today: NaiveDate) -> Vec<FoodEntry> {
    let food = |name: &str, category: &str, date, time, reaction, amount: &str, notes: &str| {
        FoodEntry {
            id: None,
            food: name.to_string(),
            category: category.to_string(),
            date,
            time,
            reaction,
            amount: amount.to_string(),
            notes: notes.to_string(),
        }
    };
    vec![
        food(
            "Pasta with butter",
            "Main Meal",
            today,
            at(12, 30),
            Mood::Positive,
            "full portion",
            "Ate the whole bowl! Seemed to really enjoy it.",
        ),
        food(
            "Apple slices",
            "Snack",
            today,
            at(15, 15),
            Mood::Neutral,
            "partial",
            "Ate a few pieces, then lost interest.",
        ),
        food(
            "Broccoli",
            "Vegetable",
            yesterday(today),
            at(18, 0),
            Mood::Negative,
            "none",
            "Pushed it away immediately. Made a face.",
        ),
    ]
}

/// Sample behavior episodes: two today, one yesterday.
#[must_use]
pub fn behavior_entries(today: NaiveDate) -> Vec<BehaviorEntry> {
    vec![
        BehaviorEntry {
            id: None,
            behavior: "Happy and playful".to_string(),
            mood: Mood::Positive,
            intensity: 4,
            duration: "30 minutes".to_string(),
            date: today,
            time: at(14, 0),
            triggers: strings(&["After nap", "Favorite toy"]),
            calming_tools: Vec::new(),
            notes: "Giggling and clapping hands. Very engaged with blocks.".to_string(),
        },
        BehaviorEntry {
            id: None,
            behavior: "Fussy and irritable".to_string(),
            mood: Mood::Negative,
            intensity: 3,
            duration: "15 minutes".to_string(),
            date: today,
            time: at(16, 30),
            triggers: strings(&["Hungry", "Tired"]),
            calming_tools: strings(&["Teether", "Soft music"]),
            notes: "Crying and pushing things away. Teether helped calm down.".to_string(),
        },
        BehaviorEntry {
            id: None,
            behavior: "Calm and focused".to_string(),
            mood: Mood::Neutral,
            intensity: 2,
            duration: "45 minutes".to_string(),
            date: yesterday(today),
            time: at(10, 0),
            triggers: strings(&["Morning routine"]),
            calming_tools: Vec::new(),
            notes: "Quietly playing with sensory toys. Very focused.".to_string(),
        },
    ]
}

fn voice(
    category: VoiceCategory,
    bullets: &[&str],
    recorded_at: DateTime<Utc>,
    duration_secs: u64,
) -> VoiceEntry {
    let bullet_points = strings(bullets);
    let transcript = bullet_points
        .iter()
        .map(|b| format!("{b}."))
        .collect::<Vec<_>>()
        .join(" ");
    VoiceEntry {
        id: None,
        category,
        transcript,
        bullet_points,
        recorded_at,
        duration_secs,
    }
}

/// Sample voice notes recorded two hours, four hours and one day before `now`.
#[must_use]
pub fn voice_entries(now: DateTime<Utc>) -> Vec<VoiceEntry> {
    vec![
        voice(
            VoiceCategory::Food,
            &[
                "Had pasta for lunch around 12:30",
                "Ate the whole bowl enthusiastically",
                "Made happy sounds while eating",
                "No negative reactions observed",
            ],
            now - Duration::hours(2),
            45,
        ),
        voice(
            VoiceCategory::Behavior,
            &[
                "Fussy period started around 4 PM",
                "Crying and pushing toys away",
                "Teether helped calm him down",
                "Back to normal after 15 minutes",
            ],
            now - Duration::hours(4),
            80,
        ),
        voice(
            VoiceCategory::Milestone,
            &[
                "First time clapping hands together",
                "Happened during playtime this morning",
                "Seemed very proud of himself",
                "Repeated it several times",
            ],
            now - Duration::days(1),
            30,
        ),
    ]
}

/// Sample timeline for January 11-15, 2024.
#[must_use]
pub fn timeline() -> Timeline {
    let samples: [(u32, EntryType, &str, NaiveTime, Mood); 13] = [
        (15, EntryType::Food, "Loved pasta lunch", at(12, 30), Mood::Positive),
        (15, EntryType::Behavior, "Happy after nap", at(15, 0), Mood::Positive),
        (15, EntryType::Voice, "Voice log about playtime", at(16, 15), Mood::Neutral),
        (14, EntryType::Food, "Tried new vegetables", at(18, 0), Mood::Neutral),
        (14, EntryType::Behavior, "Fussy before bedtime", at(19, 30), Mood::Negative),
        (14, EntryType::Calming, "Teether helped calm down", at(19, 45), Mood::Positive),
        (13, EntryType::Milestone, "First time clapping hands", at(10, 0), Mood::Positive),
        (13, EntryType::Food, "Breakfast went well", at(8, 30), Mood::Positive),
        (13, EntryType::Behavior, "Very playful morning", at(9, 0), Mood::Positive),
        (12, EntryType::Food, "Refused broccoli", at(18, 0), Mood::Negative),
        (12, EntryType::Voice, "Quick note about nap time", at(14, 0), Mood::Neutral),
        (11, EntryType::Behavior, "Calm and focused play", at(10, 30), Mood::Positive),
        (11, EntryType::Food, "Enjoyed snack time", at(15, 0), Mood::Positive),
    ];

    let mut timeline = Timeline::new();
    for (day, entry_type, title, time, mood) in samples {
        timeline.record_key(
            date_key(SAMPLE_YEAR, SAMPLE_MONTH0, day),
            TimelineEntry::new(entry_type, title, time, mood),
        );
    }
    timeline
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::YearMonth;
    use crate::transcript;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    #[test]
    fn test_food_samples() {
        let entries = food_entries(today());
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].food, "Pasta with butter");
        assert_eq!(entries[2].date, NaiveDate::from_ymd_opt(2024, 1, 14).unwrap());
        assert!(entries.iter().all(|e| e.id.is_none()));
    }

    #[test]
    fn test_behavior_samples() {
        let entries = behavior_entries(today());
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[1].calming_tools, vec!["Teether", "Soft music"]);
        assert!(entries.iter().all(|e| (1..=5).contains(&e.intensity)));
    }

    #[test]
    fn test_voice_transcripts_segment_to_bullets() {
        for entry in voice_entries(Utc::now()) {
            assert_eq!(transcript::segment(&entry.transcript), entry.bullet_points);
        }
    }

    #[test]
    fn test_voice_samples_are_in_the_past() {
        let now = Utc::now();
        let entries = voice_entries(now);
        assert!(entries.iter().all(|e| e.recorded_at < now));
        assert_eq!(entries[1].duration_secs, 80);
    }

    #[test]
    fn test_timeline_samples() {
        let timeline = timeline();
        let jan = YearMonth::new(SAMPLE_YEAR, SAMPLE_MONTH0).unwrap();
        assert_eq!(timeline.len(), 13);
        assert_eq!(timeline.entries_for_day(jan, 15, None).len(), 3);
        assert_eq!(timeline.entries_for_day(jan, 11, None).len(), 2);
        assert_eq!(
            timeline.entries_for_day(jan, 13, Some("milestone"))[0].title,
            "First time clapping hands"
        );
        assert!(timeline.entries_for_day(jan, 16, None).is_empty());
    }
}
