//! `littlelog` - A daily journal for a little one
//!
//! This library provides the journal model: food and behavior entries, voice
//! notes summarized into bullet points, and a calendar timeline of the day's
//! activity, all held in memory.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod calendar;
pub mod cli;
pub mod config;
pub mod entry;
pub mod error;
pub mod filter;
pub mod forms;
pub mod logging;
pub mod repository;
pub mod transcript;
pub mod voice;

pub use calendar::{DateKey, YearMonth};
pub use config::Config;
pub use entry::{
    BehaviorEntry, EntryType, FoodEntry, Mood, TimelineEntry, VoiceCategory, VoiceEntry,
};
pub use error::{Error, Result};
pub use filter::ListQuery;
pub use logging::init_logging;
pub use repository::{Journal, Repository, Timeline};
pub use voice::{SpeechEngine, VoiceSession};
