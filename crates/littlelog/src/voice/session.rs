//! Drives one recording from permission request to bullet points.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{mpsc, Notify};
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::{
    PermissionStatus, RecognitionError, RecognitionEvent, RecognitionSettings, SpeechCapability,
    SpeechEngine,
};
use crate::error::{Error, Result};
use crate::transcript;

/// Default capacity of the engine event channel.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// A cloneable handle for stopping a running session.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    stop_signal: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl SessionHandle {
    /// Create a new handle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal the session to stop.
    pub fn stop(&self) {
        self.stop_signal.store(true, Ordering::SeqCst);
        self.notify.notify_one();
    }

    /// Check if the stop signal has been sent.
    #[must_use]
    pub fn should_stop(&self) -> bool {
        self.stop_signal.load(Ordering::SeqCst)
    }

    async fn cancelled(&self) {
        if self.should_stop() {
            return;
        }
        self.notify.notified().await;
    }
}

/// How a recording ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "error")]
pub enum Termination {
    /// The engine ended the stream.
    Ended,
    /// The user stopped the session.
    Stopped,
    /// The engine reported an error.
    Failed(RecognitionError),
}

/// The result of a recording session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recording {
    /// Finalized transcript text, in arrival order.
    pub transcript: String,
    /// The transcript split into sentences.
    pub bullet_points: Vec<String>,
    /// How the session ended.
    pub termination: Termination,
    /// Time from engine start to termination.
    pub elapsed: Duration,
}

impl Recording {
    /// Check if nothing was transcribed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transcript.trim().is_empty()
    }

    /// The recognition error, if the session failed.
    #[must_use]
    pub fn error(&self) -> Option<&RecognitionError> {
        match &self.termination {
            Termination::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Records voice notes with an available speech engine.
#[derive(Debug, Clone)]
pub struct VoiceSession {
    engine: Arc<dyn SpeechEngine>,
    settings: RecognitionSettings,
    channel_capacity: usize,
    processing_delay: Duration,
}

impl VoiceSession {
    /// Create a session for the resolved capability.
    ///
    /// # Errors
    ///
    /// Returns `Error::VoiceUnavailable` if the capability is unavailable.
    pub fn new(capability: &SpeechCapability, settings: RecognitionSettings) -> Result<Self> {
        match capability {
            SpeechCapability::Available(engine) => Ok(Self {
                engine: Arc::clone(engine),
                settings,
                channel_capacity: DEFAULT_CHANNEL_CAPACITY,
                processing_delay: Duration::ZERO,
            }),
            SpeechCapability::Unavailable(reason) => {
                Err(Error::VoiceUnavailable(reason.message().to_string()))
            }
        }
    }

    /// Set the engine event channel capacity (minimum 1).
    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Pause this long after recording, before summarizing.
    #[must_use]
    pub fn with_processing_delay(mut self, delay: Duration) -> Self {
        self.processing_delay = delay;
        self
    }

    /// Record until the engine ends, fails, or `handle` is stopped.
    ///
    /// Only finalized text is accumulated. After a stop is observed no
    /// further events are consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if microphone permission is denied. Engine errors
    /// during recognition are reported in [`Recording::termination`].
    pub async fn record(&self, handle: &SessionHandle) -> Result<Recording> {
        if self.engine.request_permission().await == PermissionStatus::Denied {
            warn!(engine = self.engine.name(), "Microphone permission denied");
            return Err(RecognitionError::PermissionDenied.into());
        }

        let (tx, mut rx) = mpsc::channel(self.channel_capacity);
        let engine = Arc::clone(&self.engine);
        let settings = self.settings.clone();
        let producer = tokio::spawn(async move { engine.start(&settings, tx).await });

        info!(
            engine = self.engine.name(),
            language = %self.settings.language,
            "Voice session started"
        );
        let started = Instant::now();

        let mut transcript = String::new();
        let mut interim = String::new();
        let mut channel_closed = false;

        let mut termination = loop {
            tokio::select! {
                biased;
                () = handle.cancelled() => break Termination::Stopped,
                event = rx.recv() => match event {
                    Some(RecognitionEvent::Started) => debug!("Engine listening"),
                    Some(RecognitionEvent::Update { text, is_final: true }) => {
                        append_final(&mut transcript, &text);
                        interim.clear();
                    }
                    Some(RecognitionEvent::Update { text, is_final: false }) => {
                        debug!(preview = %text, "Interim transcript");
                        interim = text;
                    }
                    Some(RecognitionEvent::Error(e)) => break Termination::Failed(e),
                    Some(RecognitionEvent::Ended) => break Termination::Ended,
                    None => {
                        channel_closed = true;
                        break Termination::Ended;
                    }
                },
            }
        };
        let elapsed = started.elapsed();
        drop(rx);

        if channel_closed {
            // The engine dropped its sender; surface a failed start.
            match producer.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => termination = Termination::Failed(e),
                Err(e) => termination = Termination::Failed(RecognitionError::Other(e.to_string())),
            }
        } else {
            self.engine.stop();
            producer.abort();
        }

        match &termination {
            Termination::Failed(e) => warn!(error = %e, "Voice session failed"),
            _ => info!(?termination, elapsed_ms = elapsed.as_millis(), "Voice session ended"),
        }
        if !interim.is_empty() {
            debug!(preview = %interim, "Discarding unfinalized transcript");
        }

        let transcript = transcript.trim().to_string();
        if !transcript.is_empty() && !self.processing_delay.is_zero() {
            tokio::time::sleep(self.processing_delay).await;
        }
        let bullet_points = transcript::segment(&transcript);

        Ok(Recording {
            transcript,
            bullet_points,
            termination,
            elapsed,
        })
    }
}

fn append_final(transcript: &mut String, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    if !transcript.is_empty() {
        transcript.push(' ');
    }
    transcript.push_str(text);
}
