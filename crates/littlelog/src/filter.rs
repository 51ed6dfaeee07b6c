//! Search and category filtering for list views.
//!
//! Every list (food, behavior, voice, a timeline day) is narrowed by two
//! predicates combined with AND: a case-insensitive substring search on one
//! field and an exact match on another, where the selection `"all"` disables
//! the exact match.

use serde::{Deserialize, Serialize};

/// Selection value that matches every item.
pub const ALL: &str = "all";

/// Read access to named string fields of a record.
///
/// Filters address fields by name so that one query shape works across all
/// entry types. Unknown names return `None`.
pub trait FieldAccess {
    /// Get the string value of the named field, if the record has one.
    fn field(&self, name: &str) -> Option<&str>;
}

/// An exact-match selection, with `"all"` as the pass-everything sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Selection {
    /// Match every item.
    #[default]
    All,
    /// Match items whose field equals this value.
    Only(String),
}

impl Selection {
    /// Parse a selection; `"all"` is the sentinel, anything else is literal.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Only(value.to_string())
        }
    }

    /// Treat a missing selection the same as `"all"`.
    #[must_use]
    pub fn from_option(value: Option<&str>) -> Self {
        value.map_or(Self::All, Self::parse)
    }

    /// Check whether a field value satisfies this selection.
    #[must_use]
    pub fn accepts(&self, value: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => value == Some(expected.as_str()),
        }
    }

    /// Check if this selection passes everything.
    #[must_use]
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl From<String> for Selection {
    fn from(value: String) -> Self {
        if value == ALL {
            Self::All
        } else {
            Self::Only(value)
        }
    }
}

impl From<Selection> for String {
    fn from(selection: Selection) -> Self {
        match selection {
            Selection::All => ALL.to_string(),
            Selection::Only(value) => value,
        }
    }
}

impl std::fmt::Display for Selection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "{ALL}"),
            Self::Only(value) => write!(f, "{value}"),
        }
    }
}

/// Case-insensitive containment test of `query` against `field`.
///
/// An empty query matches every item, including items without the field.
/// Otherwise an absent field never matches.
#[must_use]
pub fn matches_substring<T: FieldAccess + ?Sized>(item: &T, field: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    item.field(field)
        .is_some_and(|value| value.to_lowercase().contains(&needle))
}

/// Exact equality test of `field` against `selected`.
#[must_use]
pub fn matches_exact<T: FieldAccess + ?Sized>(item: &T, field: &str, selected: &Selection) -> bool {
    selected.accepts(item.field(field))
}

/// Keep items whose `field` contains `query`, ignoring case. Order is preserved.
#[must_use]
pub fn filter_by_substring<'a, T: FieldAccess>(
    items: &'a [T],
    field: &str,
    query: &str,
) -> Vec<&'a T> {
    items
        .iter()
        .filter(|item| matches_substring(*item, field, query))
        .collect()
}

/// Keep items whose `field` equals `selected`; `"all"` keeps everything.
/// Order is preserved.
#[must_use]
pub fn filter_by_exact_field<'a, T: FieldAccess>(
    items: &'a [T],
    field: &str,
    selected: &str,
) -> Vec<&'a T> {
    let selection = Selection::parse(selected);
    items
        .iter()
        .filter(|item| matches_exact(*item, field, &selection))
        .collect()
}

/// A search term and a selection, applied together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Field the search term is matched against.
    pub search_field: &'static str,
    /// Search term; empty matches everything.
    pub search: String,
    /// Field the selection is matched against.
    pub select_field: &'static str,
    /// Exact-match selection.
    pub selection: Selection,
}

impl ListQuery {
    /// A query that matches everything.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a query searching `search_field` and selecting on `select_field`.
    #[must_use]
    pub fn new(search_field: &'static str, select_field: &'static str) -> Self {
        Self {
            search_field,
            search: String::new(),
            select_field,
            selection: Selection::All,
        }
    }

    /// Set the search term.
    #[must_use]
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    /// Set the selection from its string form.
    #[must_use]
    pub fn select(mut self, selected: &str) -> Self {
        self.selection = Selection::parse(selected);
        self
    }

    /// Check whether a single item passes both predicates.
    #[must_use]
    pub fn matches<T: FieldAccess + ?Sized>(&self, item: &T) -> bool {
        matches_substring(item, self.search_field, &self.search)
            && matches_exact(item, self.select_field, &self.selection)
    }

    /// Apply the query to a slice, preserving order.
    #[must_use]
    pub fn apply<'a, T: FieldAccess>(&self, items: &'a [T]) -> Vec<&'a T> {
        items.iter().filter(|item| self.matches(*item)).collect()
    }
}
