//! Entry storage behind a repository interface.
//!
//! List views depend only on [`Repository`]: a filtered `list` and a
//! `create` that assigns ids. [`InMemoryRepository`] is the only backend;
//! nothing is persisted.

mod journal;
mod memory;
pub mod seed;
mod timeline;

pub use journal::Journal;
pub use memory::InMemoryRepository;
pub use timeline::Timeline;

use crate::entry::{BehaviorEntry, FoodEntry, VoiceEntry};
use crate::error::Result;
use crate::filter::{FieldAccess, ListQuery};

/// A storable entry with a repository-assigned id.
pub trait Record: FieldAccess + Clone {
    /// The assigned id, or `None` before the record is created.
    fn id(&self) -> Option<u64>;

    /// Return the record with its id set.
    #[must_use]
    fn with_id(self, id: u64) -> Self;
}

impl Record for FoodEntry {
    fn id(&self) -> Option<u64> {
        self.id
    }

    fn with_id(self, id: u64) -> Self {
        Self { id: Some(id), ..self }
    }
}

impl Record for BehaviorEntry {
    fn id(&self) -> Option<u64> {
        self.id
    }

    fn with_id(self, id: u64) -> Self {
        Self { id: Some(id), ..self }
    }
}

impl Record for VoiceEntry {
    fn id(&self) -> Option<u64> {
        self.id
    }

    fn with_id(self, id: u64) -> Self {
        Self { id: Some(id), ..self }
    }
}

/// Read and create access to one kind of entry.
pub trait Repository<T: Record> {
    /// Entries matching `query`, in insertion order.
    fn list(&self, query: &ListQuery) -> Vec<T>;

    /// Store a new entry and return it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry already has an id.
    fn create(&mut self, record: T) -> Result<T>;

    /// Get an entry by id.
    fn get(&self, id: u64) -> Option<T>;

    /// Number of stored entries.
    fn count(&self) -> usize;
}
