//! Entry forms as reducers.
//!
//! Form fields are plain snapshots. An action produces the next snapshot and
//! `submit` validates the snapshot into an entry.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::entry::{BehaviorEntry, FoodEntry, Mood};
use crate::error::{Error, Result};

/// Amount choices offered by the food form, as `(value, label)`.
pub const AMOUNT_OPTIONS: &[(&str, &str)] = &[
    ("none", "None"),
    ("few-bites", "A few bites"),
    ("partial", "About half"),
    ("most", "Most of it"),
    ("full", "All of it"),
];

/// Behavior types offered by the behavior form.
pub const BEHAVIOR_TYPES: &[&str] = &[
    "Happy and playful",
    "Calm and focused",
    "Excited and energetic",
    "Fussy and irritable",
    "Crying/upset",
    "Overstimulated",
    "Withdrawn/quiet",
    "Aggressive behavior",
    "Self-soothing",
];

/// Common triggers offered as checkboxes.
pub const COMMON_TRIGGERS: &[&str] = &[
    "Hungry",
    "Tired",
    "Overstimulated",
    "Change in routine",
    "Loud noises",
    "New environment",
    "Separation anxiety",
    "Physical discomfort",
    "After nap",
    "Before meal",
];

/// Calming strategies offered as checkboxes.
pub const CALMING_STRATEGIES: &[&str] = &[
    "Teether",
    "Soft blanket",
    "Favorite toy",
    "Soft music",
    "Dim lights",
    "Gentle rocking",
    "Quiet space",
    "Deep pressure",
    "Sensory toy",
    "Pacifier",
];

/// Duration choices offered by the behavior form, as `(value, label)`.
pub const DURATION_OPTIONS: &[(&str, &str)] = &[
    ("few-minutes", "A few minutes"),
    ("15-minutes", "15 minutes"),
    ("30-minutes", "30 minutes"),
    ("1-hour", "1 hour"),
    ("longer", "Longer than 1 hour"),
];

/// Lowest behavior intensity.
pub const MIN_INTENSITY: u8 = 1;
/// Highest behavior intensity.
pub const MAX_INTENSITY: u8 = 5;
/// Intensity a fresh behavior form starts at.
pub const DEFAULT_INTENSITY: u8 = 3;

/// Parse a form time value, either `HH:MM` or `H:MM AM`.
///
/// # Errors
///
/// Returns `Error::InvalidEntry` for the `time` field if the value is empty
/// or not a time of day.
pub fn parse_time(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::invalid_entry("time", "time is required"));
    }
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%I:%M %p"))
        .map_err(|_| Error::invalid_entry("time", format!("'{value}' is not a time of day")))
}

fn required(field: &'static str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        Err(Error::invalid_entry(field, format!("{field} is required")))
    } else {
        Ok(value.to_string())
    }
}

/// Set `item` in `list` when `checked`, clear it otherwise.
///
/// Adding a present item or removing an absent one changes nothing.
fn toggle(list: &mut Vec<String>, item: String, checked: bool) {
    let present = list.contains(&item);
    if checked && !present {
        list.push(item);
    } else if !checked && present {
        list.retain(|existing| *existing != item);
    }
}

// ============================================================================
// Food
// ============================================================================

/// Fields of the food form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodForm {
    /// Food item.
    pub food: String,
    /// Category.
    pub category: String,
    /// Reaction, if one was picked.
    pub reaction: Option<Mood>,
    /// Amount eaten.
    pub amount: String,
    /// Time of day, as typed.
    pub time: String,
    /// Notes.
    pub notes: String,
}

/// Changes to the food form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoodFormAction {
    /// Set the food item.
    SetFood(String),
    /// Set the category.
    SetCategory(String),
    /// Pick a reaction.
    SetReaction(Mood),
    /// Set the amount.
    SetAmount(String),
    /// Set the time.
    SetTime(String),
    /// Set the notes.
    SetNotes(String),
    /// Clear every field.
    Reset,
}

impl FoodForm {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action, returning the next form state.
    #[must_use]
    pub fn reduce(&self, action: FoodFormAction) -> Self {
        let mut next = self.clone();
        match action {
            FoodFormAction::SetFood(food) => next.food = food,
            FoodFormAction::SetCategory(category) => next.category = category,
            FoodFormAction::SetReaction(reaction) => next.reaction = Some(reaction),
            FoodFormAction::SetAmount(amount) => next.amount = amount,
            FoodFormAction::SetTime(time) => next.time = time,
            FoodFormAction::SetNotes(notes) => next.notes = notes,
            FoodFormAction::Reset => next = Self::default(),
        }
        next
    }

    /// Validate the form into an entry dated `date`.
    ///
    /// A missing reaction is recorded as neutral.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidEntry` if the food or time is missing, or the
    /// time cannot be parsed.
    pub fn submit(&self, date: NaiveDate) -> Result<FoodEntry> {
        let food = required("food", &self.food)?;
        let time = parse_time(&self.time)?;
        debug!(%food, %date, "Food form submitted");
        Ok(FoodEntry {
            id: None,
            food,
            category: self.category.trim().to_string(),
            date,
            time,
            reaction: self.reaction.unwrap_or(Mood::Neutral),
            amount: self.amount.clone(),
            notes: self.notes.clone(),
        })
    }
}

// ============================================================================
// Behavior
// ============================================================================

/// Fields of the behavior form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BehaviorForm {
    /// Behavior type.
    pub behavior: String,
    /// Mood, if one was picked.
    pub mood: Option<Mood>,
    /// Intensity, always within `MIN_INTENSITY..=MAX_INTENSITY`.
    pub intensity: u8,
    /// Duration.
    pub duration: String,
    /// Time of day, as typed.
    pub time: String,
    /// Checked triggers, in the order they were checked.
    pub triggers: Vec<String>,
    /// Checked calming tools, in the order they were checked.
    pub calming_tools: Vec<String>,
    /// Notes.
    pub notes: String,
}

impl Default for BehaviorForm {
    fn default() -> Self {
        Self {
            behavior: String::new(),
            mood: None,
            intensity: DEFAULT_INTENSITY,
            duration: String::new(),
            time: String::new(),
            triggers: Vec::new(),
            calming_tools: Vec::new(),
            notes: String::new(),
        }
    }
}

/// Changes to the behavior form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BehaviorFormAction {
    /// Set the behavior type.
    SetBehavior(String),
    /// Pick a mood.
    SetMood(Mood),
    /// Set the intensity; clamped to the valid range.
    SetIntensity(u8),
    /// Set the duration.
    SetDuration(String),
    /// Set the time.
    SetTime(String),
    /// Check or uncheck a trigger.
    ToggleTrigger {
        /// Trigger name.
        trigger: String,
        /// New checkbox state.
        checked: bool,
    },
    /// Check or uncheck a calming tool.
    ToggleCalmingTool {
        /// Tool name.
        tool: String,
        /// New checkbox state.
        checked: bool,
    },
    /// Set the notes.
    SetNotes(String),
    /// Clear every field.
    Reset,
}

impl BehaviorForm {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an action, returning the next form state.
    #[must_use]
    pub fn reduce(&self, action: BehaviorFormAction) -> Self {
        let mut next = self.clone();
        match action {
            BehaviorFormAction::SetBehavior(behavior) => next.behavior = behavior,
            BehaviorFormAction::SetMood(mood) => next.mood = Some(mood),
            BehaviorFormAction::SetIntensity(intensity) => {
                next.intensity = intensity.clamp(MIN_INTENSITY, MAX_INTENSITY);
            }
            BehaviorFormAction::SetDuration(duration) => next.duration = duration,
            BehaviorFormAction::SetTime(time) => next.time = time,
            BehaviorFormAction::ToggleTrigger { trigger, checked } => {
                toggle(&mut next.triggers, trigger, checked);
            }
            BehaviorFormAction::ToggleCalmingTool { tool, checked } => {
                toggle(&mut next.calming_tools, tool, checked);
            }
            BehaviorFormAction::SetNotes(notes) => next.notes = notes,
            BehaviorFormAction::Reset => next = Self::default(),
        }
        next
    }

    /// Validate the form into an entry dated `date`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidEntry` if the behavior, mood or time is
    /// missing, or the time cannot be parsed.
    pub fn submit(&self, date: NaiveDate) -> Result<BehaviorEntry> {
        let behavior = required("behavior", &self.behavior)?;
        let mood = self
            .mood
            .ok_or_else(|| Error::invalid_entry("mood", "mood is required"))?;
        let time = parse_time(&self.time)?;
        debug!(%behavior, %date, "Behavior form submitted");
        Ok(BehaviorEntry {
            id: None,
            behavior,
            mood,
            intensity: self.intensity,
            duration: self.duration.clone(),
            date,
            time,
            triggers: self.triggers.clone(),
            calming_tools: self.calming_tools.clone(),
            notes: self.notes.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    fn field_of(err: &Error) -> &'static str {
        match err {
            Error::InvalidEntry { field, .. } => *field,
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parse_time_formats() {
        assert_eq!(
            parse_time("18:00").unwrap(),
            NaiveTime::from_hms_opt(18, 0, 0).unwrap()
        );
        assert_eq!(
            parse_time("03:15 PM").unwrap(),
            NaiveTime::from_hms_opt(15, 15, 0).unwrap()
        );
        assert_eq!(field_of(&parse_time("").unwrap_err()), "time");
        assert_eq!(field_of(&parse_time("noon").unwrap_err()), "time");
    }

    #[test]
    fn test_food_form_reduce_is_pure() {
        let empty = FoodForm::new();
        let filled = empty.reduce(FoodFormAction::SetFood("Pasta".to_string()));
        assert!(empty.food.is_empty());
        assert_eq!(filled.food, "Pasta");
    }

    #[test]
    fn test_food_form_submit() {
        let form = FoodForm::new()
            .reduce(FoodFormAction::SetFood("  Pasta with butter ".to_string()))
            .reduce(FoodFormAction::SetCategory("Main Meal".to_string()))
            .reduce(FoodFormAction::SetReaction(Mood::Positive))
            .reduce(FoodFormAction::SetAmount("full".to_string()))
            .reduce(FoodFormAction::SetTime("12:30".to_string()))
            .reduce(FoodFormAction::SetNotes("Ate the whole bowl!".to_string()));

        let entry = form.submit(today()).unwrap();
        assert_eq!(entry.food, "Pasta with butter");
        assert_eq!(entry.category, "Main Meal");
        assert_eq!(entry.reaction, Mood::Positive);
        assert_eq!(entry.time, NaiveTime::from_hms_opt(12, 30, 0).unwrap());
        assert_eq!(entry.date, today());
        assert!(entry.id.is_none());
    }

    #[test]
    fn test_food_form_requires_food_and_time() {
        let form = FoodForm::new().reduce(FoodFormAction::SetTime("12:30".to_string()));
        assert_eq!(field_of(&form.submit(today()).unwrap_err()), "food");

        let form = FoodForm::new().reduce(FoodFormAction::SetFood("Apple".to_string()));
        let err = form.submit(today()).unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(field_of(&err), "time");
    }

    #[test]
    fn test_food_form_missing_reaction_is_neutral() {
        let entry = FoodForm::new()
            .reduce(FoodFormAction::SetFood("Apple".to_string()))
            .reduce(FoodFormAction::SetTime("15:15".to_string()))
            .submit(today())
            .unwrap();
        assert_eq!(entry.reaction, Mood::Neutral);
    }

    #[test]
    fn test_food_form_reset() {
        let form = FoodForm::new()
            .reduce(FoodFormAction::SetFood("Apple".to_string()))
            .reduce(FoodFormAction::Reset);
        assert_eq!(form, FoodForm::default());
    }

    #[test]
    fn test_behavior_form_defaults() {
        let form = BehaviorForm::new();
        assert_eq!(form.intensity, DEFAULT_INTENSITY);
        assert!(form.triggers.is_empty());
        assert!(form.mood.is_none());
    }

    #[test]
    fn test_behavior_intensity_is_clamped() {
        let form = BehaviorForm::new();
        assert_eq!(
            form.reduce(BehaviorFormAction::SetIntensity(0)).intensity,
            MIN_INTENSITY
        );
        assert_eq!(
            form.reduce(BehaviorFormAction::SetIntensity(9)).intensity,
            MAX_INTENSITY
        );
        assert_eq!(form.reduce(BehaviorFormAction::SetIntensity(4)).intensity, 4);
    }

    #[test]
    fn test_behavior_toggles() {
        let check = |trigger: &str, checked| BehaviorFormAction::ToggleTrigger {
            trigger: trigger.to_string(),
            checked,
        };
        let form = BehaviorForm::new()
            .reduce(check("Hungry", true))
            .reduce(check("Tired", true))
            .reduce(check("Hungry", true));
        assert_eq!(form.triggers, vec!["Hungry", "Tired"]);

        let form = form.reduce(check("Loud noises", false));
        assert_eq!(form.triggers, vec!["Hungry", "Tired"]);

        let form = form.reduce(check("Hungry", false));
        assert_eq!(form.triggers, vec!["Tired"]);

        let form = form.reduce(BehaviorFormAction::ToggleCalmingTool {
            tool: "Teether".to_string(),
            checked: true,
        });
        assert_eq!(form.calming_tools, vec!["Teether"]);
    }

    #[test]
    fn test_behavior_form_submit() {
        let form = BehaviorForm::new()
            .reduce(BehaviorFormAction::SetBehavior("Fussy and irritable".to_string()))
            .reduce(BehaviorFormAction::SetMood(Mood::Negative))
            .reduce(BehaviorFormAction::SetTime("16:30".to_string()))
            .reduce(BehaviorFormAction::SetDuration("15-minutes".to_string()))
            .reduce(BehaviorFormAction::ToggleCalmingTool {
                tool: "Teether".to_string(),
                checked: true,
            });
        let entry = form.submit(today()).unwrap();
        assert_eq!(entry.behavior, "Fussy and irritable");
        assert_eq!(entry.mood, Mood::Negative);
        assert_eq!(entry.intensity, DEFAULT_INTENSITY);
        assert_eq!(entry.calming_tools, vec!["Teether"]);
        assert_eq!(entry.time, NaiveTime::from_hms_opt(16, 30, 0).unwrap());
    }

    #[test]
    fn test_behavior_form_required_fields() {
        let base = BehaviorForm::new().reduce(BehaviorFormAction::SetTime("10:00".to_string()));
        assert_eq!(field_of(&base.submit(today()).unwrap_err()), "behavior");

        let with_behavior =
            base.reduce(BehaviorFormAction::SetBehavior("Calm and focused".to_string()));
        assert_eq!(field_of(&with_behavior.submit(today()).unwrap_err()), "mood");

        let complete = with_behavior.reduce(BehaviorFormAction::SetMood(Mood::Neutral));
        assert!(complete.submit(today()).is_ok());
    }

    #[test]
    fn test_option_lists() {
        assert_eq!(BEHAVIOR_TYPES.len(), 9);
        assert!(COMMON_TRIGGERS.contains(&"After nap"));
        assert!(CALMING_STRATEGIES.contains(&"Teether"));
        assert!(AMOUNT_OPTIONS.iter().any(|(value, _)| *value == "partial"));
        assert!(DURATION_OPTIONS.iter().any(|(_, label)| *label == "1 hour"));
    }
}
