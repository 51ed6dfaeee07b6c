//! Journal entry types.
//!
//! Food, behavior and voice entries are the records kept by the list views;
//! timeline entries are the compact per-day items shown on the calendar.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::FieldAccess;

/// Kind of activity shown on the timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// A meal or snack.
    Food,
    /// A behavior or mood observation.
    Behavior,
    /// A voice note.
    Voice,
    /// A calming tool that was used.
    Calming,
    /// A developmental milestone.
    Milestone,
}

impl EntryType {
    /// All entry types, in display order.
    pub const ALL: [Self; 5] = [
        Self::Food,
        Self::Behavior,
        Self::Voice,
        Self::Calming,
        Self::Milestone,
    ];

    /// Stable string id used in filters and serialized data.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Behavior => "behavior",
            Self::Voice => "voice",
            Self::Calming => "calming",
            Self::Milestone => "milestone",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Behavior => "Behavior",
            Self::Voice => "Voice Log",
            Self::Calming => "Calming",
            Self::Milestone => "Milestone",
        }
    }
}

impl std::fmt::Display for EntryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntryType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::unknown_value("entry type", s))
    }
}

/// How the child seemed. Doubles as the reaction to a food.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    /// Happy, engaged, loved it.
    Positive,
    /// Indifferent.
    Neutral,
    /// Upset, refused, disliked it.
    Negative,
}

impl Mood {
    /// All moods, in display order.
    pub const ALL: [Self; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    /// Stable string id.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }

    /// Label used when the mood describes a food reaction.
    #[must_use]
    pub fn reaction_label(self) -> &'static str {
        match self {
            Self::Positive => "Loved it",
            Self::Neutral => "Neutral",
            Self::Negative => "Disliked",
        }
    }
}

impl std::fmt::Display for Mood {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| Error::unknown_value("mood", s))
    }
}

/// Category a voice note is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceCategory {
    /// Food and reactions.
    Food,
    /// Behavior and mood.
    Behavior,
    /// Calming tools.
    Calming,
    /// Milestone.
    Milestone,
    /// Anything else.
    General,
}

impl VoiceCategory {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::Food,
        Self::Behavior,
        Self::Calming,
        Self::Milestone,
        Self::General,
    ];

    /// Stable string id.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Food => "food",
            Self::Behavior => "behavior",
            Self::Calming => "calming",
            Self::Milestone => "milestone",
            Self::General => "general",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Food => "Food & Reactions",
            Self::Behavior => "Behavior & Mood",
            Self::Calming => "Calming Tools",
            Self::Milestone => "Milestone",
            Self::General => "General Note",
        }
    }
}

impl std::fmt::Display for VoiceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VoiceCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::unknown_value("voice category", s))
    }
}

/// Food categories offered by the entry form.
pub const FOOD_CATEGORIES: &[&str] = &[
    "Main Meal",
    "Snack",
    "Fruit",
    "Vegetable",
    "Dairy",
    "Protein",
    "Grain",
    "Beverage",
    "Treat",
];

/// Format a time of day the way the journal displays it, e.g. `12:30 PM`.
#[must_use]
pub fn format_time(time: NaiveTime) -> String {
    time.format("%-I:%M %p").to_string()
}

/// A single item on the calendar timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// What kind of activity this was.
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Short description.
    pub title: String,
    /// Time of day.
    pub time: NaiveTime,
    /// Overall mood.
    pub mood: Mood,
}

impl TimelineEntry {
    /// Create a new timeline entry.
    #[must_use]
    pub fn new(
        entry_type: EntryType,
        title: impl Into<String>,
        time: NaiveTime,
        mood: Mood,
    ) -> Self {
        Self {
            entry_type,
            title: title.into(),
            time,
            mood,
        }
    }
}

impl FieldAccess for TimelineEntry {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "type" => Some(self.entry_type.as_str()),
            "title" => Some(&self.title),
            "mood" => Some(self.mood.as_str()),
            _ => None,
        }
    }
}

/// A logged meal or snack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodEntry {
    /// Identifier assigned by the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// What was offered.
    pub food: String,
    /// One of [`FOOD_CATEGORIES`], or free text.
    pub category: String,
    /// Day it was eaten.
    pub date: NaiveDate,
    /// Time of day.
    pub time: NaiveTime,
    /// How it went.
    pub reaction: Mood,
    /// How much was eaten.
    pub amount: String,
    /// Free-form notes.
    pub notes: String,
}

impl FieldAccess for FoodEntry {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "food" => Some(&self.food),
            "category" => Some(&self.category),
            "reaction" => Some(self.reaction.as_str()),
            "amount" => Some(&self.amount),
            "notes" => Some(&self.notes),
            _ => None,
        }
    }
}

/// A logged behavior or mood episode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorEntry {
    /// Identifier assigned by the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Observed behavior, e.g. "Happy and playful".
    pub behavior: String,
    /// Overall mood.
    pub mood: Mood,
    /// Intensity on a 1..=5 scale.
    pub intensity: u8,
    /// How long it lasted.
    pub duration: String,
    /// Day it happened.
    pub date: NaiveDate,
    /// Time of day.
    pub time: NaiveTime,
    /// Suspected triggers.
    pub triggers: Vec<String>,
    /// Calming tools that were used.
    pub calming_tools: Vec<String>,
    /// Free-form notes.
    pub notes: String,
}

impl FieldAccess for BehaviorEntry {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "behavior" => Some(&self.behavior),
            "mood" => Some(self.mood.as_str()),
            "duration" => Some(&self.duration),
            "notes" => Some(&self.notes),
            _ => None,
        }
    }
}

/// A recorded voice note and its bullet-point summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceEntry {
    /// Identifier assigned by the repository.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Where the note is filed.
    pub category: VoiceCategory,
    /// Raw transcript text.
    pub transcript: String,
    /// Transcript split into sentences.
    pub bullet_points: Vec<String>,
    /// When recording finished.
    pub recorded_at: DateTime<Utc>,
    /// Recording length in seconds.
    pub duration_secs: u64,
}

impl FieldAccess for VoiceEntry {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "category" => Some(self.category.as_str()),
            "transcript" => Some(&self.transcript),
            _ => None,
        }
    }
}
