//! Vector-backed repository.

use tracing::debug;

use super::{Record, Repository};
use crate::error::{Error, Result};
use crate::filter::ListQuery;

/// Keeps entries in a `Vec` in insertion order.
///
/// Ids start at 1 and increase by one per created entry.
#[derive(Debug, Clone)]
pub struct InMemoryRepository<T> {
    records: Vec<T>,
    next_id: u64,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: Record> InMemoryRepository<T> {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository holding `records`, assigning ids in order.
    ///
    /// # Errors
    ///
    /// Returns an error if any record already has an id.
    pub fn from_records(records: impl IntoIterator<Item = T>) -> Result<Self> {
        let mut repo = Self::new();
        for record in records {
            repo.create(record)?;
        }
        Ok(repo)
    }

    /// Borrow every entry, in insertion order.
    #[must_use]
    pub fn all(&self) -> &[T] {
        &self.records
    }

    /// Check if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Record> Repository<T> for InMemoryRepository<T> {
    fn list(&self, query: &ListQuery) -> Vec<T> {
        let matched: Vec<T> = query.apply(&self.records).into_iter().cloned().collect();
        debug!(
            search = %query.search,
            selection = %query.selection,
            matched = matched.len(),
            total = self.records.len(),
            "Listed entries"
        );
        matched
    }

    fn create(&mut self, record: T) -> Result<T> {
        if let Some(id) = record.id() {
            return Err(Error::invalid_entry(
                "id",
                format!("entry already has id {id}"),
            ));
        }
        let id = self.next_id;
        self.next_id += 1;
        let record = record.with_id(id);
        self.records.push(record.clone());
        debug!(id, "Created entry");
        Ok(record)
    }

    fn get(&self, id: u64) -> Option<T> {
        self.records
            .iter()
            .find(|record| record.id() == Some(id))
            .cloned()
    }

    fn count(&self) -> usize {
        self.records.len()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveTime};

    use super::*;
    use crate::entry::{FoodEntry, Mood};

    fn food(name: &str, category: &str, reaction: Mood) -> FoodEntry {
        FoodEntry {
            id: None,
            food: name.to_string(),
            category: category.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            reaction,
            amount: String::new(),
            notes: String::new(),
        }
    }

    fn repo() -> InMemoryRepository<FoodEntry> {
        InMemoryRepository::from_records([
            food("Pasta with butter", "Main Meal", Mood::Positive),
            food("Apple slices", "Snack", Mood::Neutral),
            food("Broccoli", "Vegetable", Mood::Negative),
            food("Apple sauce", "Fruit", Mood::Positive),
        ])
        .unwrap()
    }

    #[test]
    fn test_create_assigns_increasing_ids() {
        let mut repo: InMemoryRepository<FoodEntry> = InMemoryRepository::new();
        let first = repo.create(food("A", "Snack", Mood::Neutral)).unwrap();
        let second = repo.create(food("B", "Snack", Mood::Neutral)).unwrap();
        assert_eq!(first.id, Some(1));
        assert_eq!(second.id, Some(2));
        assert_eq!(repo.count(), 2);
    }

    #[test]
    fn test_create_rejects_existing_id() {
        let mut repo: InMemoryRepository<FoodEntry> = InMemoryRepository::new();
        let created = repo.create(food("A", "Snack", Mood::Neutral)).unwrap();
        let err = repo.create(created).unwrap_err();
        assert!(err.is_validation_error());
        assert_eq!(repo.count(), 1);
    }

    #[test]
    fn test_list_filters_in_insertion_order() {
        let repo = repo();
        let query = ListQuery::new("food", "category").search("apple");
        let names: Vec<_> = repo.list(&query).into_iter().map(|f| f.food).collect();
        assert_eq!(names, vec!["Apple slices", "Apple sauce"]);

        let query = ListQuery::new("food", "category")
            .search("apple")
            .select("Fruit");
        assert_eq!(repo.list(&query).len(), 1);

        assert_eq!(repo.list(&ListQuery::all()).len(), 4);
    }

    #[test]
    fn test_get_by_id() {
        let repo = repo();
        assert_eq!(repo.get(3).map(|f| f.food), Some("Broccoli".to_string()));
        assert!(repo.get(99).is_none());
    }

    #[test]
    fn test_all_and_is_empty() {
        assert!(InMemoryRepository::<FoodEntry>::new().is_empty());
        let repo = repo();
        assert_eq!(repo.all().len(), 4);
        assert_eq!(repo.all()[0].food, "Pasta with butter");
    }
}
