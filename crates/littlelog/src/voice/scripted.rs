//! A speech engine that replays a fixed script.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::debug;

use super::{
    PermissionStatus, RecognitionError, RecognitionEvent, RecognitionSettings, SpeechEngine,
};

/// Replays a list of recognition events.
///
/// `Started` is sent first and `Ended` last unless the script ends with its
/// own terminal event. Stopping the engine ends the replay before the next
/// event.
#[derive(Debug, Clone)]
pub struct ScriptedEngine {
    events: Vec<RecognitionEvent>,
    permission: PermissionStatus,
    event_delay: Duration,
    stopped: Arc<AtomicBool>,
}

impl ScriptedEngine {
    /// Create an engine that grants permission and replays `events`.
    #[must_use]
    pub fn new(events: Vec<RecognitionEvent>) -> Self {
        Self {
            events,
            permission: PermissionStatus::Granted,
            event_delay: Duration::ZERO,
            stopped: Arc::new(AtomicBool::new(false)),
        }
    }

    /// An engine that dictates `text`: one interim preview, then the final text.
    #[must_use]
    pub fn dictation(text: &str) -> Self {
        Self::new(vec![
            RecognitionEvent::interim_text(text),
            RecognitionEvent::final_text(text),
        ])
    }

    /// Set the permission answer.
    #[must_use]
    pub fn with_permission(mut self, permission: PermissionStatus) -> Self {
        self.permission = permission;
        self
    }

    /// Wait this long before each scripted event.
    #[must_use]
    pub fn with_event_delay(mut self, delay: Duration) -> Self {
        self.event_delay = delay;
        self
    }

    fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SpeechEngine for ScriptedEngine {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn request_permission(&self) -> PermissionStatus {
        self.permission
    }

    async fn start(
        &self,
        _settings: &RecognitionSettings,
        tx: mpsc::Sender<RecognitionEvent>,
    ) -> Result<(), RecognitionError> {
        self.stopped.store(false, Ordering::SeqCst);

        if tx.send(RecognitionEvent::Started).await.is_err() {
            return Ok(());
        }

        for event in &self.events {
            if !self.event_delay.is_zero() {
                tokio::time::sleep(self.event_delay).await;
            }
            if self.is_stopped() {
                debug!("Scripted engine stopped");
                return Ok(());
            }
            let terminal = event.is_terminal();
            if tx.send(event.clone()).await.is_err() {
                return Ok(());
            }
            if terminal {
                return Ok(());
            }
        }

        // Receiver may already be gone.
        let _ = tx.send(RecognitionEvent::Ended).await;
        Ok(())
    }

    fn stop(&self) {
        self.stopped.store(true, Ordering::SeqCst);
    }
}
