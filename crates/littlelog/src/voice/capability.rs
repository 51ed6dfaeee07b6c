//! Host speech capability, resolved once at startup.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::SpeechEngine;

/// Why voice logging cannot run on this host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnavailableReason {
    /// Neither a speech recognizer nor a microphone is present.
    Unsupported,
    /// No speech recognizer is present.
    NoSpeechRecognition,
    /// No microphone is present.
    NoMicrophone,
}

impl UnavailableReason {
    /// User-facing explanation.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Unsupported => {
                "Voice recording is not supported on this system. Speech recognition and microphone access are both unavailable."
            }
            Self::NoSpeechRecognition => {
                "Speech recognition is not available on this system. Voice notes cannot be transcribed."
            }
            Self::NoMicrophone => {
                "No microphone is available. Connect a microphone to record voice notes."
            }
        }
    }
}

impl std::fmt::Display for UnavailableReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Whether voice capture can run, and the engine to run it with.
#[derive(Debug, Clone)]
pub enum SpeechCapability {
    /// A usable engine.
    Available(Arc<dyn SpeechEngine>),
    /// Voice capture is not possible.
    Unavailable(UnavailableReason),
}

impl SpeechCapability {
    /// Resolve the capability from what the host provides.
    #[must_use]
    pub fn resolve(engine: Option<Arc<dyn SpeechEngine>>, has_microphone: bool) -> Self {
        let capability = match (engine, has_microphone) {
            (Some(engine), true) => Self::Available(engine),
            (None, false) => Self::Unavailable(UnavailableReason::Unsupported),
            (None, true) => Self::Unavailable(UnavailableReason::NoSpeechRecognition),
            (Some(_), false) => Self::Unavailable(UnavailableReason::NoMicrophone),
        };
        match &capability {
            Self::Available(engine) => {
                debug!(engine = engine.name(), "Speech capability available");
            }
            Self::Unavailable(reason) => {
                debug!(?reason, "Speech capability unavailable");
            }
        }
        capability
    }

    /// Check if an engine is available.
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Get the engine, if available.
    #[must_use]
    pub fn engine(&self) -> Option<&Arc<dyn SpeechEngine>> {
        match self {
            Self::Available(engine) => Some(engine),
            Self::Unavailable(_) => None,
        }
    }

    /// Get the reason voice capture is unavailable, if it is.
    #[must_use]
    pub fn unavailable_reason(&self) -> Option<UnavailableReason> {
        match self {
            Self::Available(_) => None,
            Self::Unavailable(reason) => Some(*reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::ScriptedEngine;

    fn engine() -> Arc<dyn SpeechEngine> {
        Arc::new(ScriptedEngine::new(Vec::new()))
    }

    #[test]
    fn test_resolve_available() {
        let capability = SpeechCapability::resolve(Some(engine()), true);
        assert!(capability.is_available());
        assert_eq!(capability.engine().map(|e| e.name()), Some("scripted"));
        assert_eq!(capability.unavailable_reason(), None);
    }

    #[test]
    fn test_resolve_unavailable_reasons() {
        assert_eq!(
            SpeechCapability::resolve(None, false).unavailable_reason(),
            Some(UnavailableReason::Unsupported)
        );
        assert_eq!(
            SpeechCapability::resolve(None, true).unavailable_reason(),
            Some(UnavailableReason::NoSpeechRecognition)
        );
        assert_eq!(
            SpeechCapability::resolve(Some(engine()), false).unavailable_reason(),
            Some(UnavailableReason::NoMicrophone)
        );
    }

    #[test]
    fn test_unavailable_messages() {
        assert!(UnavailableReason::NoMicrophone
            .message()
            .contains("microphone"));
        assert!(UnavailableReason::NoSpeechRecognition
            .to_string()
            .contains("Speech recognition"));
        assert!(UnavailableReason::Unsupported
            .message()
            .contains("not supported"));
    }
}
