//! Month grid arithmetic for the timeline calendar.
//!
//! Months are addressed with a zero-based index (`0` = January) throughout,
//! matching the date keys produced by [`date_key`].

use std::collections::BTreeMap;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{Error, Result};
use crate::filter::{FieldAccess, Selection};

/// Number of columns in a calendar week row.
pub const DAYS_PER_WEEK: usize = 7;

/// A calendar date encoded as `YYYY-MM-DD`, used to look up a day's entries.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DateKey(String);

impl DateKey {
    /// Build the key for a `NaiveDate`.
    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        date_key(date.year(), date.month0(), date.day())
    }

    /// Parse a `YYYY-MM-DD` string, rejecting dates that do not exist.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DateOutOfRange`] if the text is not a valid date.
    pub fn parse(text: &str) -> Result<Self> {
        let date = NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map_err(|e| Error::DateOutOfRange(format!("{text}: {e}")))?;
        Ok(Self::from_date(date))
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DateKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One slot of a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "day")]
pub enum CalendarCell {
    /// Padding before the first of the month.
    Blank,
    /// A day of the month, `1..=days_in_month`.
    Day(u32),
}

impl CalendarCell {
    /// The day number, if this cell holds one.
    #[must_use]
    pub fn day(self) -> Option<u32> {
        match self {
            Self::Blank => None,
            Self::Day(day) => Some(day),
        }
    }
}

/// Direction of month navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MonthDirection {
    /// One month back.
    Prev,
    /// One month forward.
    Next,
}

/// A validated year and zero-based month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    year: i32,
    month0: u32,
}

impl YearMonth {
    /// Validate a year and zero-based month index.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDate`] if `month0` is not in `0..=11` or the
    /// month falls outside the supported date range.
    pub fn new(year: i32, month0: u32) -> Result<Self> {
        if month0 > 11 || NaiveDate::from_ymd_opt(year, month0 + 1, 1).is_none() {
            return Err(Error::InvalidDate {
                year,
                month0,
                day: 0,
            });
        }
        Ok(Self { year, month0 })
    }

    /// The month containing `date`.
    #[must_use]
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month0: date.month0(),
        }
    }

    /// Calendar year.
    #[must_use]
    pub fn year(self) -> i32 {
        self.year
    }

    /// Zero-based month index.
    #[must_use]
    pub fn month0(self) -> u32 {
        self.month0
    }

    /// English month name.
    #[must_use]
    pub fn month_name(self) -> &'static str {
        MONTH_NAMES[self.month0 as usize]
    }

    /// Number of days in this month.
    #[must_use]
    pub fn days(self) -> u32 {
        days_in_month(self.year, self.month0)
    }

    /// The first day of this month.
    #[must_use]
    pub fn first_day(self) -> NaiveDate {
        // Constructed only through `new`/`of`, both of which guarantee the day exists.
        NaiveDate::from_ymd_opt(self.year, self.month0 + 1, 1).unwrap_or_default()
    }

    /// Check whether `day` is a valid day number for this month.
    #[must_use]
    pub fn contains_day(self, day: u32) -> bool {
        (1..=self.days()).contains(&day)
    }
}

impl std::fmt::Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Short weekday headers, Sunday first.
pub const WEEKDAY_NAMES: [&str; DAYS_PER_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Gregorian leap year rule.
#[must_use]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in a month of the proleptic Gregorian calendar.
///
/// `month0` must be in `0..=11`; larger values are treated as December.
#[must_use]
pub fn days_in_month(year: i32, month0: u32) -> u32 {
    match month0 {
        0 | 2 | 4 | 6 | 7 | 9 => 31,
        3 | 5 | 8 | 10 => 30,
        1 if is_leap_year(year) => 29,
        1 => 28,
        _ => 31,
    }
}

/// Weekday of the first of the month, `0` = Sunday through `6` = Saturday.
#[must_use]
pub fn first_weekday(ym: YearMonth) -> u32 {
    ym.first_day().weekday().num_days_from_sunday()
}

/// Build the cells of a month view: leading blanks, then days `1..=n`.
#[must_use]
pub fn build_month_grid(ym: YearMonth) -> Vec<CalendarCell> {
    let blanks = first_weekday(ym);
    let days = ym.days();
    trace!(%ym, blanks, days, "Building month grid");

    let mut cells = Vec::with_capacity((blanks + days) as usize);
    cells.extend((0..blanks).map(|_| CalendarCell::Blank));
    cells.extend((1..=days).map(CalendarCell::Day));
    cells
}

/// Split a grid into week rows of seven; the last row may be short.
#[must_use]
pub fn weeks(grid: &[CalendarCell]) -> Vec<&[CalendarCell]> {
    grid.chunks(DAYS_PER_WEEK).collect()
}

/// Format the lookup key for a day: `year-MM-DD` with a one-based month.
#[must_use]
pub fn date_key(year: i32, month0: u32, day: u32) -> DateKey {
    DateKey(format!("{year}-{:02}-{day:02}", month0 + 1))
}

/// Look up a day's entries and apply the entry-type filter.
///
/// A missing key yields an empty list. `None` and `"all"` keep every entry;
/// any other value keeps entries whose `type` field equals it. Storage order
/// is preserved.
#[must_use]
pub fn entries_for_day<'a, E: FieldAccess>(
    by_key: &'a BTreeMap<DateKey, Vec<E>>,
    year: i32,
    month0: u32,
    day: u32,
    filter_type: Option<&str>,
) -> Vec<&'a E> {
    let key = date_key(year, month0, day);
    let selection = Selection::from_option(filter_type);
    by_key
        .get(&key)
        .map(|entries| {
            entries
                .iter()
                .filter(|e| selection.accepts(e.field("type")))
                .collect()
        })
        .unwrap_or_default()
}

/// Move a date exactly one calendar month.
///
/// The day of month is clamped to the last day of the target month, so
/// January 31 moves to the end of February rather than into March.
///
/// # Errors
///
/// Returns [`Error::DateOutOfRange`] if the result leaves the supported range.
pub fn advance_month(date: NaiveDate, direction: MonthDirection) -> Result<NaiveDate> {
    let step = Months::new(1);
    let moved = match direction {
        MonthDirection::Prev => date.checked_sub_months(step),
        MonthDirection::Next => date.checked_add_months(step),
    };
    moved.ok_or_else(|| Error::DateOutOfRange(format!("{date} {direction:?}")))
}

/// Move a date by `offset` months, clamping the day each step.
///
/// # Errors
///
/// Returns [`Error::DateOutOfRange`] if the result leaves the supported range.
pub fn shift_months(date: NaiveDate, offset: i32) -> Result<NaiveDate> {
    let direction = if offset < 0 {
        MonthDirection::Prev
    } else {
        MonthDirection::Next
    };
    (0..offset.unsigned_abs()).try_fold(date, |d, _| advance_month(d, direction))
}
