//! Recorder state as immutable snapshots.
//!
//! The recorder view holds no mutable fields. Each user action or engine
//! event produces a new [`RecorderState`] through [`RecorderState::reduce`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    PermissionStatus, RecognitionError, RecognitionEvent, Recording, Termination,
    PERMISSION_REQUIRED_MESSAGE,
};
use crate::entry::{VoiceCategory, VoiceEntry};
use crate::error::{Error, Result};

/// Microphone permission as the recorder sees it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    /// Not asked yet.
    #[default]
    Unknown,
    /// Waiting for the platform to answer.
    Requesting,
    /// Access granted.
    Granted,
    /// Access refused.
    Denied,
}

impl From<PermissionStatus> for PermissionState {
    fn from(status: PermissionStatus) -> Self {
        match status {
            PermissionStatus::Granted => Self::Granted,
            PermissionStatus::Denied => Self::Denied,
        }
    }
}

/// Everything that can change the recorder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecorderAction {
    /// The permission prompt was shown.
    PermissionRequested,
    /// The platform answered the permission prompt.
    PermissionResolved(PermissionStatus),
    /// The user pressed record.
    RecordingStarted,
    /// An event from the speech engine.
    Recognition(RecognitionEvent),
    /// One second passed.
    Tick,
    /// The user pressed stop.
    StopRequested,
    /// Summarization finished.
    ProcessingFinished(Vec<String>),
    /// The user filed the note under a category.
    CategorySelected(VoiceCategory),
    /// The note was saved.
    Saved,
    /// The recorder was dismissed without saving.
    Closed,
}

/// A snapshot of the recorder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecorderState {
    /// Microphone permission.
    pub permission: PermissionState,
    /// Whether the engine is listening.
    pub is_recording: bool,
    /// Whether the transcript is being summarized.
    pub is_processing: bool,
    /// Finalized transcript.
    pub transcript: String,
    /// Latest unfinalized text, shown as a preview.
    pub interim: String,
    /// Summary of the transcript.
    pub bullet_points: Vec<String>,
    /// Selected category.
    pub category: Option<VoiceCategory>,
    /// Seconds since recording started.
    pub elapsed_secs: u64,
    /// User-facing error message.
    pub error: Option<String>,
}

impl RecorderState {
    /// Create the initial state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The state after a finished session: summarized, nothing pending.
    #[must_use]
    pub fn from_recording(recording: &Recording) -> Self {
        let mut state = Self {
            permission: PermissionState::Granted,
            transcript: recording.transcript.clone(),
            bullet_points: recording.bullet_points.clone(),
            elapsed_secs: recording.elapsed.as_secs(),
            ..Self::default()
        };
        if let Termination::Failed(e) = &recording.termination {
            state.apply_event(RecognitionEvent::Error(e.clone()));
        }
        state
    }

    /// Apply an action, returning the next state.
    #[must_use]
    pub fn reduce(&self, action: RecorderAction) -> Self {
        let mut next = self.clone();
        match action {
            RecorderAction::PermissionRequested => {
                next.permission = PermissionState::Requesting;
            }
            RecorderAction::PermissionResolved(status) => {
                next.permission = status.into();
                next.error = match status {
                    PermissionStatus::Granted => None,
                    PermissionStatus::Denied => Some(PERMISSION_REQUIRED_MESSAGE.to_string()),
                };
            }
            RecorderAction::RecordingStarted => {
                if self.can_start() {
                    next = Self {
                        permission: self.permission,
                        is_recording: true,
                        ..Self::default()
                    };
                }
            }
            RecorderAction::Recognition(event) => next.apply_event(event),
            RecorderAction::Tick => {
                if self.is_recording {
                    next.elapsed_secs += 1;
                }
            }
            RecorderAction::StopRequested => {
                next.is_recording = false;
                next.interim.clear();
                next.is_processing = !next.transcript.trim().is_empty();
            }
            RecorderAction::ProcessingFinished(bullet_points) => {
                next.is_processing = false;
                next.bullet_points = bullet_points;
            }
            RecorderAction::CategorySelected(category) => {
                next.category = Some(category);
            }
            RecorderAction::Saved | RecorderAction::Closed => {
                next = Self {
                    permission: self.permission,
                    ..Self::default()
                };
            }
        }
        next
    }

    fn apply_event(&mut self, event: RecognitionEvent) {
        match event {
            RecognitionEvent::Started => {
                self.permission = PermissionState::Granted;
                self.error = None;
            }
            // Results arriving after a stop would desync transcript and bullets.
            RecognitionEvent::Update { .. } if !self.is_recording => {}
            RecognitionEvent::Update {
                text,
                is_final: true,
            } => {
                let text = text.trim();
                if !text.is_empty() {
                    if !self.transcript.is_empty() {
                        self.transcript.push(' ');
                    }
                    self.transcript.push_str(text);
                }
                self.interim.clear();
            }
            RecognitionEvent::Update {
                text,
                is_final: false,
            } => {
                self.interim = text;
            }
            RecognitionEvent::Error(e) => {
                self.is_recording = false;
                self.interim.clear();
                if e == RecognitionError::PermissionDenied {
                    self.permission = PermissionState::Denied;
                }
                self.error = Some(e.user_message());
            }
            RecognitionEvent::Ended => {
                self.is_recording = false;
            }
        }
    }

    /// Check if a new recording may start.
    #[must_use]
    pub fn can_start(&self) -> bool {
        !self.is_recording
            && !self.is_processing
            && !matches!(
                self.permission,
                PermissionState::Requesting | PermissionState::Denied
            )
    }

    /// Check if the note can be saved.
    #[must_use]
    pub fn can_save(&self) -> bool {
        self.category.is_some() && !self.bullet_points.is_empty()
    }

    /// Transcript followed by the interim preview.
    #[must_use]
    pub fn preview(&self) -> String {
        match (self.transcript.is_empty(), self.interim.is_empty()) {
            (_, true) => self.transcript.clone(),
            (true, false) => self.interim.clone(),
            (false, false) => format!("{} {}", self.transcript, self.interim),
        }
    }

    /// The elapsed timer as `m:ss`.
    #[must_use]
    pub fn elapsed_label(&self) -> String {
        format_elapsed(self.elapsed_secs)
    }

    /// Build the entry to save.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidEntry` if no category is selected or there are
    /// no bullet points.
    pub fn draft(&self, recorded_at: DateTime<Utc>) -> Result<VoiceEntry> {
        let category = self
            .category
            .ok_or_else(|| Error::invalid_entry("category", "select a category"))?;
        if self.bullet_points.is_empty() {
            return Err(Error::invalid_entry(
                "bullet_points",
                "record a note before saving",
            ));
        }
        Ok(VoiceEntry {
            id: None,
            category,
            transcript: self.transcript.clone(),
            bullet_points: self.bullet_points.clone(),
            recorded_at,
            duration_secs: self.elapsed_secs,
        })
    }
}

/// Format seconds as `m:ss`.
#[must_use]
pub fn format_elapsed(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript;

    fn recording() -> RecorderState {
        RecorderState::new()
            .reduce(RecorderAction::PermissionRequested)
            .reduce(RecorderAction::PermissionResolved(PermissionStatus::Granted))
            .reduce(RecorderAction::RecordingStarted)
            .reduce(RecorderAction::Recognition(RecognitionEvent::Started))
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(0), "0:00");
        assert_eq!(format_elapsed(45), "0:45");
        assert_eq!(format_elapsed(80), "1:20");
        assert_eq!(format_elapsed(3600), "60:00");
    }

    #[test]
    fn test_permission_flow() {
        let state = RecorderState::new().reduce(RecorderAction::PermissionRequested);
        assert_eq!(state.permission, PermissionState::Requesting);
        assert!(!state.can_start());

        let denied = state.reduce(RecorderAction::PermissionResolved(PermissionStatus::Denied));
        assert_eq!(denied.permission, PermissionState::Denied);
        assert_eq!(denied.error.as_deref(), Some(PERMISSION_REQUIRED_MESSAGE));
        assert!(!denied.can_start());

        let granted = state.reduce(RecorderAction::PermissionResolved(PermissionStatus::Granted));
        assert_eq!(granted.permission, PermissionState::Granted);
        assert!(granted.error.is_none());
        assert!(granted.can_start());
    }

    #[test]
    fn test_reduce_does_not_mutate_previous_snapshot() {
        let before = recording();
        let after = before.reduce(RecorderAction::Recognition(RecognitionEvent::final_text(
            "Hello.",
        )));
        assert!(before.transcript.is_empty());
        assert_eq!(after.transcript, "Hello.");
    }

    #[test]
    fn test_updates_accumulate_final_text() {
        let state = recording()
            .reduce(RecorderAction::Recognition(RecognitionEvent::interim_text(
                "Had pas",
            )))
            .reduce(RecorderAction::Recognition(RecognitionEvent::final_text(
                "Had pasta.",
            )))
            .reduce(RecorderAction::Recognition(RecognitionEvent::interim_text(
                "Ate it",
            )));
        assert_eq!(state.transcript, "Had pasta.");
        assert_eq!(state.interim, "Ate it");
        assert_eq!(state.preview(), "Had pasta. Ate it");
    }

    #[test]
    fn test_tick_only_while_recording() {
        let state = recording()
            .reduce(RecorderAction::Tick)
            .reduce(RecorderAction::Tick);
        assert_eq!(state.elapsed_secs, 2);
        assert_eq!(state.elapsed_label(), "0:02");

        let stopped = state.reduce(RecorderAction::StopRequested);
        assert_eq!(stopped.reduce(RecorderAction::Tick).elapsed_secs, 2);
    }

    #[test]
    fn test_stop_with_transcript_starts_processing() {
        let state = recording()
            .reduce(RecorderAction::Recognition(RecognitionEvent::final_text(
                "Had pasta. Ate it all!",
            )))
            .reduce(RecorderAction::StopRequested);
        assert!(!state.is_recording);
        assert!(state.is_processing);
        assert!(!state.can_start());

        let bullets = transcript::segment(&state.transcript);
        let state = state.reduce(RecorderAction::ProcessingFinished(bullets));
        assert!(!state.is_processing);
        assert_eq!(state.bullet_points, vec!["Had pasta", "Ate it all"]);
    }

    #[test]
    fn test_stop_without_transcript_skips_processing() {
        let state = recording().reduce(RecorderAction::StopRequested);
        assert!(!state.is_processing);
        assert!(state.can_start());
    }

    #[test]
    fn test_recognition_error_sets_message() {
        let state = recording().reduce(RecorderAction::Recognition(RecognitionEvent::Error(
            RecognitionError::NoSpeech,
        )));
        assert!(!state.is_recording);
        assert!(state.error.as_deref().unwrap().contains("No speech"));
        assert_eq!(state.permission, PermissionState::Granted);

        let state = recording().reduce(RecorderAction::Recognition(RecognitionEvent::Error(
            RecognitionError::PermissionDenied,
        )));
        assert_eq!(state.permission, PermissionState::Denied);
    }

    #[test]
    fn test_can_save_requires_category_and_bullets() {
        let state = recording()
            .reduce(RecorderAction::StopRequested)
            .reduce(RecorderAction::ProcessingFinished(vec!["One".to_string()]));
        assert!(!state.can_save());

        let state = state.reduce(RecorderAction::CategorySelected(VoiceCategory::Food));
        assert!(state.can_save());

        let empty = RecorderState::new().reduce(RecorderAction::CategorySelected(
            VoiceCategory::General,
        ));
        assert!(!empty.can_save());
    }

    #[test]
    fn test_draft() {
        let now = Utc::now();
        let state = recording()
            .reduce(RecorderAction::Recognition(RecognitionEvent::final_text(
                "First clap.",
            )))
            .reduce(RecorderAction::Tick)
            .reduce(RecorderAction::StopRequested)
            .reduce(RecorderAction::ProcessingFinished(vec![
                "First clap".to_string()
            ]));

        let err = state.draft(now).unwrap_err();
        assert!(err.is_validation_error());

        let entry = state
            .reduce(RecorderAction::CategorySelected(VoiceCategory::Milestone))
            .draft(now)
            .unwrap();
        assert_eq!(entry.category, VoiceCategory::Milestone);
        assert_eq!(entry.bullet_points, vec!["First clap"]);
        assert_eq!(entry.duration_secs, 1);
        assert_eq!(entry.recorded_at, now);
        assert!(entry.id.is_none());
    }

    #[test]
    fn test_saved_resets_but_keeps_permission() {
        let state = recording()
            .reduce(RecorderAction::Recognition(RecognitionEvent::final_text("Hi.")))
            .reduce(RecorderAction::Saved);
        assert_eq!(state.permission, PermissionState::Granted);
        assert!(state.transcript.is_empty());
        assert!(!state.is_recording);

        let closed = recording().reduce(RecorderAction::Closed);
        assert_eq!(closed, RecorderState {
            permission: PermissionState::Granted,
            ..RecorderState::default()
        });
    }

    #[test]
    fn test_from_recording() {
        let recording = Recording {
            transcript: "One. Two.".to_string(),
            bullet_points: vec!["One".to_string(), "Two".to_string()],
            termination: Termination::Stopped,
            elapsed: std::time::Duration::from_millis(61_500),
        };
        let state = RecorderState::from_recording(&recording);
        assert_eq!(state.elapsed_label(), "1:01");
        assert_eq!(state.bullet_points.len(), 2);
        assert!(state.error.is_none());
        assert!(!state.can_save());
        assert!(state
            .reduce(RecorderAction::CategorySelected(VoiceCategory::General))
            .can_save());

        let failed = Recording {
            termination: Termination::Failed(RecognitionError::Network),
            ..recording
        };
        let state = RecorderState::from_recording(&failed);
        assert!(state.error.as_deref().unwrap().contains("Network error"));
    }

    #[test]
    fn test_updates_after_stop_are_ignored() {
        let stopped = recording()
            .reduce(RecorderAction::Recognition(RecognitionEvent::final_text(
                "Had pasta.",
            )))
            .reduce(RecorderAction::StopRequested);
        let late = stopped
            .reduce(RecorderAction::Recognition(RecognitionEvent::final_text(
                "Late words.",
            )))
            .reduce(RecorderAction::Recognition(RecognitionEvent::interim_text(
                "More",
            )));
        assert_eq!(late.transcript, "Had pasta.");
        assert!(late.interim.is_empty());

        let bullets = transcript::segment(&late.transcript);
        let entry = late
            .reduce(RecorderAction::ProcessingFinished(bullets))
            .reduce(RecorderAction::CategorySelected(VoiceCategory::Food))
            .draft(Utc::now())
            .unwrap();
        assert_eq!(entry.transcript, "Had pasta.");
        assert_eq!(entry.bullet_points, vec!["Had pasta"]);
    }

    #[test]
    fn test_updates_after_end_are_ignored() {
        let state = recording()
            .reduce(RecorderAction::Recognition(RecognitionEvent::Ended))
            .reduce(RecorderAction::Recognition(RecognitionEvent::final_text(
                "Too late.",
            )));
        assert!(state.transcript.is_empty());
    }

    #[test]
    fn test_recording_started_ignored_while_busy() {
        let state = recording().reduce(RecorderAction::Recognition(
            RecognitionEvent::final_text("Keep me."),
        ));
        let again = state.reduce(RecorderAction::RecordingStarted);
        assert_eq!(again.transcript, "Keep me.");
    }
}
