//! `littlelog` - CLI for the littlelog journal
//!
//! This binary browses the journal's calendar timeline, lists and logs
//! entries, and summarizes dictated notes into bullet points.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::io::Read;
use std::sync::Arc;

use anyhow::{bail, Context};
use chrono::{Datelike, Local, Utc};
use clap::Parser;
use tracing::debug;

use littlelog::cli::{
    render, BehaviorAction, BehaviorAddCommand, BehaviorCommand, CalendarCommand, Cli, Command,
    ConfigCommand, DayCommand, FoodAction, FoodAddCommand, FoodCommand, SummarizeCommand,
    VoiceCommand,
};
use littlelog::voice::{
    RecorderAction, RecorderState, ScriptedEngine, SessionHandle, SpeechCapability, SpeechEngine,
};
use littlelog::{init_logging, Config, Journal, Repository, VoiceSession, YearMonth};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    // Load configuration
    let config = Config::load_from(cli.config.clone())?;

    let mut journal = if config.data.seed_sample_data {
        Journal::seeded(Utc::now())?
    } else {
        Journal::new()
    };

    // Execute the command
    match cli.command {
        Command::Calendar(cmd) => handle_calendar(&config, &journal, &cmd),
        Command::Day(cmd) => handle_day(&config, &journal, &cmd),
        Command::Food(cmd) => handle_food(&mut journal, &cmd),
        Command::Behavior(cmd) => handle_behavior(&mut journal, &cmd),
        Command::Voice(cmd) => handle_voice(&journal, &cmd),
        Command::Summarize(cmd) => handle_summarize(&config, &mut journal, cmd).await,
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn handle_calendar(
    config: &Config,
    journal: &Journal,
    cmd: &CalendarCommand,
) -> anyhow::Result<()> {
    let base = config.start_date(Local::now().date_naive());
    let ym = cmd.resolve(base)?;
    let filter = cmd.filter_type(&config.timeline.default_filter);
    let counts = journal.timeline.day_counts(ym, Some(filter));
    debug!(%ym, filter, days = counts.len(), "Showing calendar");

    if cmd.json {
        let view = serde_json::json!({
            "year": ym.year(),
            "month": ym.month0() + 1,
            "name": ym.to_string(),
            "filter": filter,
            "days": counts,
        });
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render::month(ym, &counts));
    }
    Ok(())
}

fn handle_day(config: &Config, journal: &Journal, cmd: &DayCommand) -> anyhow::Result<()> {
    let date = cmd.parse_date()?;
    let filter = cmd.filter_type(&config.timeline.default_filter);
    let entries = journal
        .timeline
        .entries_for_day(YearMonth::of(date), date.day(), Some(filter));

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("{}", render::day(date, &entries));
    }
    Ok(())
}

fn handle_food(journal: &mut Journal, cmd: &FoodCommand) -> anyhow::Result<()> {
    if let Some(FoodAction::Add(add)) = &cmd.action {
        return handle_food_add(journal, add);
    }

    let entries = journal.food.list(&cmd.query());
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("{}", render::food_list(&entries));
    }
    Ok(())
}

fn handle_food_add(journal: &mut Journal, cmd: &FoodAddCommand) -> anyhow::Result<()> {
    let now = Local::now();
    let date = cmd.entry_date(now.date_naive())?;
    let entry = journal.log_food(cmd.form(now.time()).submit(date)?)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!("{}", render::food_list(std::slice::from_ref(&entry)));
        println!();
        println!(
            "Saved food entry #{} ({} food entries in journal)",
            entry.id.unwrap_or_default(),
            journal.food.count()
        );
    }
    Ok(())
}

fn handle_behavior(journal: &mut Journal, cmd: &BehaviorCommand) -> anyhow::Result<()> {
    if let Some(BehaviorAction::Add(add)) = &cmd.action {
        return handle_behavior_add(journal, add);
    }

    let entries = journal.behavior.list(&cmd.query());
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("{}", render::behavior_list(&entries));
    }
    Ok(())
}

fn handle_behavior_add(journal: &mut Journal, cmd: &BehaviorAddCommand) -> anyhow::Result<()> {
    let now = Local::now();
    let date = cmd.entry_date(now.date_naive())?;
    let entry = journal.log_behavior(cmd.form(now.time()).submit(date)?)?;

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&entry)?);
    } else {
        println!("{}", render::behavior_list(std::slice::from_ref(&entry)));
        println!();
        println!(
            "Saved behavior entry #{} ({} behavior entries in journal)",
            entry.id.unwrap_or_default(),
            journal.behavior.count()
        );
    }
    Ok(())
}

fn handle_voice(journal: &Journal, cmd: &VoiceCommand) -> anyhow::Result<()> {
    let entries = journal.voice.list(&cmd.query());
    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        println!("{}", render::voice_list(&entries));
    }
    Ok(())
}

async fn handle_summarize(
    config: &Config,
    journal: &mut Journal,
    cmd: SummarizeCommand,
) -> anyhow::Result<()> {
    if cmd.save && cmd.category.is_none() {
        bail!("--save requires --category");
    }

    let text = if cmd.reads_stdin() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read transcript from stdin")?;
        buf
    } else {
        cmd.text.clone().unwrap_or_default()
    };

    // Dictated text is replayed through the engine as one interim and one
    // final result, the way a live recognizer would deliver it.
    let engine: Arc<dyn SpeechEngine> = Arc::new(ScriptedEngine::dictation(&text));
    let capability = SpeechCapability::resolve(Some(engine), true);
    let session = VoiceSession::new(&capability, config.recognition_settings())?
        .with_channel_capacity(config.voice.channel_capacity)
        .with_processing_delay(config.processing_delay());

    let handle = SessionHandle::new();
    let stopper = handle.clone();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            stopper.stop();
        }
    });

    let recorded_at = Utc::now();
    let recording = session.record(&handle).await;
    interrupt.abort();
    let recording = recording?;

    let mut state = RecorderState::from_recording(&recording);
    if let Some(category) = cmd.category {
        state = state.reduce(RecorderAction::CategorySelected(category.into()));
    }

    let saved = if cmd.save {
        Some(journal.log_voice(state.draft(recorded_at)?)?)
    } else {
        None
    };

    if cmd.json {
        let view = serde_json::json!({
            "transcript": recording.transcript,
            "bullet_points": recording.bullet_points,
            "termination": recording.termination,
            "elapsed_secs": state.elapsed_secs,
            "category": state.category,
            "saved": saved,
        });
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{}", render::recording(&state));
        if let Some(entry) = saved {
            println!();
            println!(
                "Saved voice note #{} ({} voice notes in journal)",
                entry.id.unwrap_or_default(),
                journal.voice.count()
            );
        }
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                let start_date = config
                    .timeline
                    .start_date
                    .map_or_else(|| "today".to_string(), |d| d.to_string());
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Timeline]");
                println!("  Start date:         {start_date}");
                println!("  Default filter:     {}", config.timeline.default_filter);
                println!();
                println!("[Voice]");
                println!("  Language:           {}", config.voice.language);
                println!("  Continuous:         {}", config.voice.continuous);
                println!("  Interim results:    {}", config.voice.interim_results);
                println!(
                    "  Processing delay:   {} ms",
                    config.voice.processing_delay_ms
                );
                println!("  Channel capacity:   {}", config.voice.channel_capacity);
                println!();
                println!("[Data]");
                println!("  Seed sample data:   {}", config.data.seed_sample_data);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
