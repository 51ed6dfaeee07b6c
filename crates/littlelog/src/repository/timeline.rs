//! Per-day timeline entries, keyed by date.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::calendar::{self, DateKey, YearMonth};
use crate::entry::TimelineEntry;
use crate::filter::{FieldAccess, Selection};

/// Timeline entries grouped by day, each day in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    days: BTreeMap<DateKey, Vec<TimelineEntry>>,
}

impl Timeline {
    /// Create an empty timeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry to `date`.
    pub fn record(&mut self, date: NaiveDate, entry: TimelineEntry) {
        self.record_key(DateKey::from_date(date), entry);
    }

    /// Append an entry to the day named by `key`.
    pub fn record_key(&mut self, key: DateKey, entry: TimelineEntry) {
        trace!(%key, title = %entry.title, "Recording timeline entry");
        self.days.entry(key).or_default().push(entry);
    }

    /// Entries for one day of `ym`, optionally restricted to one entry type.
    #[must_use]
    pub fn entries_for_day(
        &self,
        ym: YearMonth,
        day: u32,
        filter_type: Option<&str>,
    ) -> Vec<&TimelineEntry> {
        calendar::entries_for_day(&self.days, ym.year(), ym.month0(), day, filter_type)
    }

    /// All entries stored under `key`.
    #[must_use]
    pub fn entries_on(&self, key: &DateKey) -> &[TimelineEntry] {
        self.days.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    /// Matching entry counts for each day of `ym` that has any.
    #[must_use]
    pub fn day_counts(&self, ym: YearMonth, filter_type: Option<&str>) -> BTreeMap<u32, usize> {
        (1..=ym.days())
            .filter_map(|day| {
                let count = self.entries_for_day(ym, day, filter_type).len();
                (count > 0).then_some((day, count))
            })
            .collect()
    }

    /// Total matching entries in `ym`.
    #[must_use]
    pub fn count_in_month(&self, ym: YearMonth, filter_type: Option<&str>) -> usize {
        self.day_counts(ym, filter_type).values().sum()
    }

    /// Entries of every day, in date order.
    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &[TimelineEntry])> {
        self.days.iter().map(|(key, entries)| (key, entries.as_slice()))
    }

    /// Total number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.days.values().map(Vec::len).sum()
    }

    /// Check if the timeline has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.values().all(Vec::is_empty)
    }

    /// Count entries per type across the whole timeline.
    #[must_use]
    pub fn type_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for entry in self.days.values().flatten() {
            if let Some(kind) = entry.field("type") {
                *counts.entry(kind.to_string()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// Check if `filter_type` names something the timeline can filter on.
    #[must_use]
    pub fn accepts_filter(filter_type: &str) -> bool {
        match Selection::parse(filter_type) {
            Selection::All => true,
            Selection::Only(value) => value.parse::<crate::entry::EntryType>().is_ok(),
        }
    }
}
