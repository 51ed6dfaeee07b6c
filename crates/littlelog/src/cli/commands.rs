//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::path::PathBuf;

use chrono::{Datelike, NaiveDate, NaiveTime};
use clap::{Args, Subcommand, ValueEnum};

use crate::calendar::{shift_months, YearMonth};
use crate::entry::{EntryType, Mood, VoiceCategory};
use crate::error::{Error, Result};
use crate::filter::{ListQuery, ALL};
use crate::forms::{BehaviorForm, BehaviorFormAction, FoodForm, FoodFormAction};

/// Parse a `YYYY-MM-DD` argument.
fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| Error::DateOutOfRange(format!("{value}: {e}")))
}

/// The time typed on the command line, or `now` as `HH:MM`.
fn time_or(time: Option<&str>, now: NaiveTime) -> String {
    time.map_or_else(|| now.format("%H:%M").to_string(), str::to_string)
}

/// Calendar command arguments.
#[derive(Debug, Args)]
pub struct CalendarCommand {
    /// Year to show (defaults to the configured start date)
    #[arg(short, long)]
    pub year: Option<i32>,

    /// Month to show, 1-12 (defaults to the configured start date)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Move this many months forward (negative for back)
    #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
    pub offset: i32,

    /// Only count entries of this type
    #[arg(short = 't', long = "type", value_enum)]
    pub entry_type: Option<EntryTypeArg>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl CalendarCommand {
    /// Resolve the month to show, starting from `base`.
    ///
    /// `--year` and `--month` replace the corresponding part of `base`;
    /// `--offset` then moves from the first of that month.
    ///
    /// # Errors
    ///
    /// Returns an error if the month is invalid or out of range.
    pub fn resolve(&self, base: NaiveDate) -> Result<YearMonth> {
        let year = self.year.unwrap_or_else(|| base.year());
        let month0 = self.month.map_or_else(|| base.month0(), |m| m.saturating_sub(1));
        let start = YearMonth::new(year, month0)?;
        let shifted = shift_months(start.first_day(), self.offset)?;
        Ok(YearMonth::of(shifted))
    }

    /// The entry type filter, or `default` when `--type` is not given.
    #[must_use]
    pub fn filter_type<'a>(&self, default: &'a str) -> &'a str {
        self.entry_type
            .map_or(default, |t| EntryType::from(t).as_str())
    }
}

/// Day command arguments.
#[derive(Debug, Args)]
pub struct DayCommand {
    /// Day to show, as YYYY-MM-DD
    pub date: String,

    /// Only show entries of this type
    #[arg(short = 't', long = "type", value_enum)]
    pub entry_type: Option<EntryTypeArg>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl DayCommand {
    /// Parse the requested date.
    ///
    /// # Errors
    ///
    /// Returns `Error::DateOutOfRange` if the date is not a real `YYYY-MM-DD` date.
    pub fn parse_date(&self) -> Result<NaiveDate> {
        parse_day(&self.date)
    }

    /// The entry type filter, or `default` when `--type` is not given.
    #[must_use]
    pub fn filter_type<'a>(&self, default: &'a str) -> &'a str {
        self.entry_type
            .map_or(default, |t| EntryType::from(t).as_str())
    }
}

/// Food arguments: list entries, or log a new one with `add`.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct FoodCommand {
    /// Log a new entry instead of listing
    #[command(subcommand)]
    pub action: Option<FoodAction>,

    /// Case-insensitive search on the food name
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Exact category, e.g. "Snack" ("all" for every category)
    #[arg(long, default_value = ALL)]
    pub category: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl FoodCommand {
    /// Build the list query.
    #[must_use]
    pub fn query(&self) -> ListQuery {
        ListQuery::new("food", "category")
            .search(self.search.as_str())
            .select(&self.category)
    }
}

/// Behavior arguments: list entries, or log a new one with `add`.
#[derive(Debug, Args)]
#[command(args_conflicts_with_subcommands = true)]
pub struct BehaviorCommand {
    /// Log a new entry instead of listing
    #[command(subcommand)]
    pub action: Option<BehaviorAction>,

    /// Case-insensitive search on the behavior
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only show entries with this mood
    #[arg(short, long, value_enum)]
    pub mood: Option<MoodArg>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl BehaviorCommand {
    /// Build the list query.
    #[must_use]
    pub fn query(&self) -> ListQuery {
        let mood = self.mood.map_or(ALL, |m| Mood::from(m).as_str());
        ListQuery::new("behavior", "mood")
            .search(self.search.as_str())
            .select(mood)
    }
}

/// Food subcommands.
#[derive(Debug, Subcommand)]
pub enum FoodAction {
    /// Log a meal or snack
    Add(FoodAddCommand),
}

/// Arguments for logging a food entry.
#[derive(Debug, Args)]
pub struct FoodAddCommand {
    /// What was eaten
    pub food: String,

    /// Category, e.g. "Snack" or "Vegetable"
    #[arg(long, default_value = "")]
    pub category: String,

    /// Reaction to the food (neutral if not given)
    #[arg(short, long, value_enum)]
    pub reaction: Option<MoodArg>,

    /// How much was eaten, e.g. "partial"
    #[arg(short, long, default_value = "")]
    pub amount: String,

    /// Day of the meal, as YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Time of day, as HH:MM or "H:MM PM" (defaults to now)
    #[arg(short, long)]
    pub time: Option<String>,

    /// Notes
    #[arg(short, long, default_value = "")]
    pub notes: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl FoodAddCommand {
    /// Fill in the food form, defaulting the time to `now`.
    #[must_use]
    pub fn form(&self, now: NaiveTime) -> FoodForm {
        let mut actions = vec![
            FoodFormAction::SetFood(self.food.clone()),
            FoodFormAction::SetCategory(self.category.clone()),
            FoodFormAction::SetAmount(self.amount.clone()),
            FoodFormAction::SetTime(time_or(self.time.as_deref(), now)),
            FoodFormAction::SetNotes(self.notes.clone()),
        ];
        if let Some(reaction) = self.reaction {
            actions.push(FoodFormAction::SetReaction(reaction.into()));
        }
        actions
            .into_iter()
            .fold(FoodForm::new(), |form, action| form.reduce(action))
    }

    /// The entry's day, or `today` when `--date` is not given.
    ///
    /// # Errors
    ///
    /// Returns `Error::DateOutOfRange` if `--date` is not a real date.
    pub fn entry_date(&self, today: NaiveDate) -> Result<NaiveDate> {
        self.date.as_deref().map_or(Ok(today), parse_day)
    }
}

/// Behavior subcommands.
#[derive(Debug, Subcommand)]
pub enum BehaviorAction {
    /// Log a behavior episode
    Add(BehaviorAddCommand),
}

/// Arguments for logging a behavior entry.
#[derive(Debug, Args)]
pub struct BehaviorAddCommand {
    /// What the behavior looked like, e.g. "Fussy and irritable"
    pub behavior: String,

    /// Overall mood
    #[arg(short, long, value_enum)]
    pub mood: Option<MoodArg>,

    /// Intensity from 1 to 5
    #[arg(short, long, default_value = "3")]
    pub intensity: u8,

    /// How long it lasted, e.g. "15 minutes"
    #[arg(long, default_value = "")]
    pub duration: String,

    /// A trigger; repeat for more than one
    #[arg(long = "trigger", value_name = "TRIGGER")]
    pub triggers: Vec<String>,

    /// A calming tool that was used; repeat for more than one
    #[arg(long = "calming", value_name = "TOOL")]
    pub calming_tools: Vec<String>,

    /// Day of the episode, as YYYY-MM-DD (defaults to today)
    #[arg(short, long)]
    pub date: Option<String>,

    /// Time of day, as HH:MM or "H:MM PM" (defaults to now)
    #[arg(short, long)]
    pub time: Option<String>,

    /// Notes
    #[arg(short, long, default_value = "")]
    pub notes: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl BehaviorAddCommand {
    /// Fill in the behavior form, defaulting the time to `now`.
    #[must_use]
    pub fn form(&self, now: NaiveTime) -> BehaviorForm {
        let mut actions = vec![
            BehaviorFormAction::SetBehavior(self.behavior.clone()),
            BehaviorFormAction::SetIntensity(self.intensity),
            BehaviorFormAction::SetDuration(self.duration.clone()),
            BehaviorFormAction::SetTime(time_or(self.time.as_deref(), now)),
            BehaviorFormAction::SetNotes(self.notes.clone()),
        ];
        if let Some(mood) = self.mood {
            actions.push(BehaviorFormAction::SetMood(mood.into()));
        }
        actions.extend(self.triggers.iter().map(|trigger| {
            BehaviorFormAction::ToggleTrigger {
                trigger: trigger.clone(),
                checked: true,
            }
        }));
        actions.extend(
            self.calming_tools
                .iter()
                .map(|tool| BehaviorFormAction::ToggleCalmingTool {
                    tool: tool.clone(),
                    checked: true,
                }),
        );
        actions
            .into_iter()
            .fold(BehaviorForm::new(), |form, action| form.reduce(action))
    }

    /// The entry's day, or `today` when `--date` is not given.
    ///
    /// # Errors
    ///
    /// Returns `Error::DateOutOfRange` if `--date` is not a real date.
    pub fn entry_date(&self, today: NaiveDate) -> Result<NaiveDate> {
        self.date.as_deref().map_or(Ok(today), parse_day)
    }
}

/// Voice note list arguments.
#[derive(Debug, Args)]
pub struct VoiceCommand {
    /// Case-insensitive search on the transcript
    #[arg(short, long, default_value = "")]
    pub search: String,

    /// Only show notes in this category
    #[arg(long, value_enum)]
    pub category: Option<VoiceCategoryArg>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl VoiceCommand {
    /// Build the list query.
    #[must_use]
    pub fn query(&self) -> ListQuery {
        let category = self
            .category
            .map_or(ALL, |c| VoiceCategory::from(c).as_str());
        ListQuery::new("transcript", "category")
            .search(self.search.as_str())
            .select(category)
    }
}

/// Summarize command arguments.
#[derive(Debug, Args)]
pub struct SummarizeCommand {
    /// Transcript text; "-" or nothing reads standard input
    pub text: Option<String>,

    /// File the note under this category
    #[arg(long, value_enum)]
    pub category: Option<VoiceCategoryArg>,

    /// Save the note to the journal (requires --category)
    #[arg(short, long)]
    pub save: bool,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

impl SummarizeCommand {
    /// Check if the transcript should be read from standard input.
    #[must_use]
    pub fn reads_stdin(&self) -> bool {
        matches!(self.text.as_deref(), None | Some("-"))
    }
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Entry type argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EntryTypeArg {
    /// Meals and snacks
    Food,
    /// Behavior and mood
    Behavior,
    /// Voice notes
    Voice,
    /// Calming tools
    Calming,
    /// Milestones
    Milestone,
}

impl From<EntryTypeArg> for EntryType {
    fn from(arg: EntryTypeArg) -> Self {
        match arg {
            EntryTypeArg::Food => Self::Food,
            EntryTypeArg::Behavior => Self::Behavior,
            EntryTypeArg::Voice => Self::Voice,
            EntryTypeArg::Calming => Self::Calming,
            EntryTypeArg::Milestone => Self::Milestone,
        }
    }
}

/// Mood argument for filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MoodArg {
    /// Positive
    Positive,
    /// Neutral
    Neutral,
    /// Negative
    Negative,
}

impl From<MoodArg> for Mood {
    fn from(arg: MoodArg) -> Self {
        match arg {
            MoodArg::Positive => Self::Positive,
            MoodArg::Neutral => Self::Neutral,
            MoodArg::Negative => Self::Negative,
        }
    }
}

/// Voice category argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VoiceCategoryArg {
    /// Food and reactions
    Food,
    /// Behavior and mood
    Behavior,
    /// Calming tools
    Calming,
    /// Milestone
    Milestone,
    /// General note
    General,
}

impl From<VoiceCategoryArg> for VoiceCategory {
    fn from(arg: VoiceCategoryArg) -> Self {
        match arg {
            VoiceCategoryArg::Food => Self::Food,
            VoiceCategoryArg::Behavior => Self::Behavior,
            VoiceCategoryArg::Calming => Self::Calming,
            VoiceCategoryArg::Milestone => Self::Milestone,
            VoiceCategoryArg::General => Self::General,
        }
    }
}
