//! All repositories and the timeline, kept in step.

use chrono::{DateTime, Utc};
use tracing::info;

use super::{seed, InMemoryRepository, Repository, Timeline};
use crate::entry::{BehaviorEntry, EntryType, FoodEntry, Mood, TimelineEntry, VoiceEntry};
use crate::error::Result;

/// The journal: food, behavior and voice repositories plus the timeline.
///
/// Entries logged through `log_*` also appear on the timeline for their day.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    /// Food entries.
    pub food: InMemoryRepository<FoodEntry>,
    /// Behavior entries.
    pub behavior: InMemoryRepository<BehaviorEntry>,
    /// Voice notes.
    pub voice: InMemoryRepository<VoiceEntry>,
    /// Calendar timeline.
    pub timeline: Timeline,
}

impl Journal {
    /// Create an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a journal loaded with the sample data, dated relative to `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if a sample entry is rejected by its repository.
    pub fn seeded(now: DateTime<Utc>) -> Result<Self> {
        let today = now.date_naive();
        let journal = Self {
            food: InMemoryRepository::from_records(seed::food_entries(today))?,
            behavior: InMemoryRepository::from_records(seed::behavior_entries(today))?,
            voice: InMemoryRepository::from_records(seed::voice_entries(now))?,
            timeline: seed::timeline(),
        };
        info!(
            food = journal.food.count(),
            behavior = journal.behavior.count(),
            voice = journal.voice.count(),
            timeline = journal.timeline.len(),
            "Loaded sample journal"
        );
        Ok(journal)
    }

    /// Store a food entry and add it to the timeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository rejects the entry.
    pub fn log_food(&mut self, entry: FoodEntry) -> Result<FoodEntry> {
        let entry = self.food.create(entry)?;
        self.timeline.record(
            entry.date,
            TimelineEntry::new(EntryType::Food, &entry.food, entry.time, entry.reaction),
        );
        Ok(entry)
    }

    /// Store a behavior entry and add it to the timeline.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository rejects the entry.
    pub fn log_behavior(&mut self, entry: BehaviorEntry) -> Result<BehaviorEntry> {
        let entry = self.behavior.create(entry)?;
        self.timeline.record(
            entry.date,
            TimelineEntry::new(EntryType::Behavior, &entry.behavior, entry.time, entry.mood),
        );
        Ok(entry)
    }

    /// Store a voice note and add it to the timeline on the day it was recorded.
    ///
    /// # Errors
    ///
    /// Returns an error if the repository rejects the entry.
    pub fn log_voice(&mut self, entry: VoiceEntry) -> Result<VoiceEntry> {
        let entry = self.voice.create(entry)?;
        let title = entry.bullet_points.first().map_or_else(
            || entry.category.label().to_string(),
            |first| format!("{}: {first}", entry.category.label()),
        );
        self.timeline.record(
            entry.recorded_at.date_naive(),
            TimelineEntry::new(EntryType::Voice, title, entry.recorded_at.time(), Mood::Neutral),
        );
        Ok(entry)
    }
}
