//! Command-line interface for littlelog.
//!
//! This module provides the CLI structure and text rendering for the
//! `littlelog` binary.

mod commands;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{
    BehaviorAction, BehaviorAddCommand, BehaviorCommand, CalendarCommand, ConfigCommand,
    DayCommand, EntryTypeArg, FoodAction, FoodAddCommand, FoodCommand, MoodArg,
    SummarizeCommand, VoiceCategoryArg, VoiceCommand,
};

/// littlelog - A daily journal for a little one
///
/// Browse the calendar timeline, list food and behavior entries, and turn
/// dictated notes into bullet-point summaries.
#[derive(Debug, Parser)]
#[command(name = "littlelog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show a month of the timeline with entry counts per day
    Calendar(CalendarCommand),

    /// Show the timeline entries for one day
    Day(DayCommand),

    /// List or log food entries
    Food(FoodCommand),

    /// List or log behavior entries
    Behavior(BehaviorCommand),

    /// List voice notes
    Voice(VoiceCommand),

    /// Summarize a dictated note into bullet points
    Summarize(SummarizeCommand),

    /// View or validate configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        crate::logging::Verbosity::from_flags(self.quiet, self.verbose)
    }
}
