//! Voice note capture.
//!
//! Speech-to-text is an external capability. This module defines the seam
//! ([`SpeechEngine`]), the startup capability check ([`SpeechCapability`]),
//! a session driver that accumulates a transcript until the user stops
//! ([`VoiceSession`]) and a reducer for the recorder's UI state
//! ([`recorder`]).

mod capability;
pub mod recorder;
mod scripted;
mod session;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::mpsc;

pub use capability::{SpeechCapability, UnavailableReason};
pub use recorder::{format_elapsed, PermissionState, RecorderAction, RecorderState};
pub use scripted::ScriptedEngine;
pub use session::{Recording, SessionHandle, Termination, VoiceSession};

/// Message shown when the microphone permission request is refused.
pub const PERMISSION_REQUIRED_MESSAGE: &str =
    "Microphone access is required for voice logging. Please allow access in your system settings.";

/// Errors reported by a speech engine.
///
/// None of these are retried automatically; the user is asked to act.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "detail")]
pub enum RecognitionError {
    /// The user or platform refused microphone access.
    #[error("microphone permission denied")]
    PermissionDenied,

    /// The engine heard nothing it could transcribe.
    #[error("no speech detected")]
    NoSpeech,

    /// The recognizer lost its network connection.
    #[error("network error during recognition")]
    Network,

    /// Any other engine failure, with the engine's error code.
    #[error("recognition error: {0}")]
    Other(String),
}

impl RecognitionError {
    /// Map an engine error code onto the known error classes.
    #[must_use]
    pub fn classify(code: &str) -> Self {
        match code {
            "not-allowed" | "service-not-allowed" => Self::PermissionDenied,
            "no-speech" => Self::NoSpeech,
            "network" => Self::Network,
            other => Self::Other(other.to_string()),
        }
    }

    /// Text suitable for showing to the user.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::PermissionDenied => {
                "Microphone access was denied. Please allow microphone access and try again."
                    .to_string()
            }
            Self::NoSpeech => {
                "No speech detected. Please try speaking closer to your microphone.".to_string()
            }
            Self::Network => {
                "Network error occurred. Please check your internet connection.".to_string()
            }
            Self::Other(code) => format!("Speech recognition error: {code}"),
        }
    }
}

/// Outcome of a microphone permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    /// Access granted.
    Granted,
    /// Access refused.
    Denied,
}

/// Events streamed by a running recognition session, in chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "event")]
pub enum RecognitionEvent {
    /// The engine is listening.
    Started,
    /// New transcript text. Only final text is kept; interim text is a preview.
    Update {
        /// Transcribed text.
        text: String,
        /// Whether the engine will not revise this text.
        is_final: bool,
    },
    /// Terminal failure.
    Error(RecognitionError),
    /// Terminal end of stream.
    Ended,
}

impl RecognitionEvent {
    /// Final transcript text.
    #[must_use]
    pub fn final_text(text: impl Into<String>) -> Self {
        Self::Update {
            text: text.into(),
            is_final: true,
        }
    }

    /// Interim transcript text.
    #[must_use]
    pub fn interim_text(text: impl Into<String>) -> Self {
        Self::Update {
            text: text.into(),
            is_final: false,
        }
    }

    /// Check if no further events follow this one.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Error(_) | Self::Ended)
    }
}

/// Recognition options passed to the engine on start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionSettings {
    /// BCP 47 language tag.
    pub language: String,
    /// Keep listening across pauses.
    pub continuous: bool,
    /// Deliver interim results.
    pub interim_results: bool,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            continuous: true,
            interim_results: true,
        }
    }
}

/// A host speech-to-text capability.
///
/// Implementors wrap a platform recognizer. Events must be sent in
/// chronological order and end with [`RecognitionEvent::Ended`] or
/// [`RecognitionEvent::Error`].
#[async_trait::async_trait]
pub trait SpeechEngine: Send + Sync + std::fmt::Debug {
    /// Engine name, for logging.
    fn name(&self) -> &'static str;

    /// Ask for microphone access. Suspends until the platform answers.
    async fn request_permission(&self) -> PermissionStatus;

    /// Start recognizing and stream events through `tx`.
    ///
    /// May return once the stream has ended or keep running until
    /// [`SpeechEngine::stop`] is called.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot start at all.
    async fn start(
        &self,
        settings: &RecognitionSettings,
        tx: mpsc::Sender<RecognitionEvent>,
    ) -> Result<(), RecognitionError>;

    /// Ask the engine to stop streaming.
    fn stop(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_known_codes() {
        assert_eq!(
            RecognitionError::classify("not-allowed"),
            RecognitionError::PermissionDenied
        );
        assert_eq!(
            RecognitionError::classify("no-speech"),
            RecognitionError::NoSpeech
        );
        assert_eq!(
            RecognitionError::classify("network"),
            RecognitionError::Network
        );
        assert_eq!(
            RecognitionError::classify("aborted"),
            RecognitionError::Other("aborted".to_string())
        );
    }

    #[test]
    fn test_user_messages() {
        assert!(RecognitionError::PermissionDenied
            .user_message()
            .contains("denied"));
        assert!(RecognitionError::NoSpeech
            .user_message()
            .contains("No speech detected"));
        assert!(RecognitionError::Network
            .user_message()
            .contains("internet connection"));
        assert_eq!(
            RecognitionError::Other("audio-capture".to_string()).user_message(),
            "Speech recognition error: audio-capture"
        );
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            RecognitionError::NoSpeech.to_string(),
            "no speech detected"
        );
        assert!(RecognitionError::Other("x".to_string())
            .to_string()
            .contains('x'));
    }

    #[test]
    fn test_event_constructors() {
        assert_eq!(
            RecognitionEvent::final_text("hi"),
            RecognitionEvent::Update {
                text: "hi".to_string(),
                is_final: true
            }
        );
        assert!(!RecognitionEvent::interim_text("hi").is_terminal());
        assert!(RecognitionEvent::Ended.is_terminal());
        assert!(RecognitionEvent::Error(RecognitionError::Network).is_terminal());
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(RecognitionEvent::final_text("Had pasta.")).unwrap();
        assert_eq!(json["event"], "update");
        assert_eq!(json["is_final"], true);

        let json =
            serde_json::to_value(RecognitionEvent::Error(RecognitionError::NoSpeech)).unwrap();
        assert_eq!(json["event"], "error");
    }

    #[test]
    fn test_default_settings() {
        let settings = RecognitionSettings::default();
        assert_eq!(settings.language, "en-US");
        assert!(settings.continuous);
        assert!(settings.interim_results);
    }
}
