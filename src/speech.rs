//! Speech capture capability
//!
//! Voice input is modeled as an injected capability rather than a hard
//! dependency on any microphone API, so the voice path is testable with a
//! scripted capture. The lifecycle is a single linear transition:
//! idle -> listening -> idle, and capture completion triggers exactly one
//! automatic send.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::gateway::BackendGateway;
use crate::models::{ChatMessage, MessageSender};
use crate::session::ChatSession;

/// Terminal event of one capture attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureEvent {
    /// Recognized utterance, ready to send as a chat message.
    Transcript(String),
    /// Capture failed (no microphone, recognition error, user denied).
    Error(String),
}

/// Injected speech-capture capability.
///
/// `start` runs one capture to completion; `stop` aborts a capture in
/// progress, after which `start` resolves with whatever was recognized so
/// far or an error.
#[async_trait]
pub trait SpeechCapture: Send {
    async fn start(&mut self) -> CaptureEvent;
    async fn stop(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Idle,
    Listening,
}

/// Couples a speech capture to a chat session.
///
/// Capture is mutually exclusive with message sending: one
/// [`capture_and_send`](Self::capture_and_send) call owns both the capture
/// and the session for its whole duration.
pub struct VoiceChat<C: SpeechCapture> {
    capture: C,
    state: VoiceState,
}

impl<C: SpeechCapture> VoiceChat<C> {
    pub fn new(capture: C) -> Self {
        Self {
            capture,
            state: VoiceState::Idle,
        }
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    /// Run one capture; on a transcript, send it as a chat message.
    ///
    /// Exactly one send happens per completed capture. A capture error
    /// appends one system line to the transcript instead. Either way the
    /// lifecycle returns to idle.
    pub async fn capture_and_send(
        &mut self,
        gateway: &BackendGateway,
        session: &mut ChatSession,
    ) -> VoiceState {
        self.state = VoiceState::Listening;
        info!("Voice capture started");

        let event = self.capture.start().await;
        self.state = VoiceState::Idle;

        match event {
            CaptureEvent::Transcript(text) => {
                info!("Voice capture complete, sending transcript");
                session.send(gateway, &text).await;
            }
            CaptureEvent::Error(reason) => {
                warn!("Voice capture failed: {}", reason);
                session_append_system(session, format!("Voice input failed: {}", reason));
            }
        }

        self.state
    }

    /// Abort a capture in progress.
    pub async fn stop(&mut self) {
        self.capture.stop().await;
    }
}

fn session_append_system(session: &mut ChatSession, text: String) {
    session.append_local(ChatMessage::new(MessageSender::System, text));
}
