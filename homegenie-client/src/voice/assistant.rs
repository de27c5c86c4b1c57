//! Voice/text assistant state machine
//!
//! Single session, single-threaded: IDLE -> RECORDING -> PROCESSING and
//! back to IDLE with a response or an error. Text mode bypasses RECORDING.
//! At most one turn is ever in flight; the affordance guards themselves
//! (`can_start_recording`, `can_send_text`) enforce it - there is no queue.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use shared::{MaintenanceRequest, VoiceTextQuery, VoiceTurn};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::http::HttpClient;
use crate::voice::ports::{AudioCapturePort, AudioPlaybackPort, CaptureError};

/// Assistant phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistantPhase {
    #[default]
    Idle,
    Recording,
    Processing,
}

/// The one cross-component signal this flow produces.
#[derive(Debug, Clone)]
pub enum AssistantEvent {
    /// The backend created a ticket out of this turn; the host dashboard
    /// should reload its list.
    RequestCreated(MaintenanceRequest),
}

/// Voice/text assistant over the capture/playback ports.
pub struct VoiceAssistant {
    http: HttpClient,
    capture: Box<dyn AudioCapturePort>,
    playback: Box<dyn AudioPlaybackPort>,
    events: mpsc::UnboundedSender<AssistantEvent>,
    phase: AssistantPhase,
    /// Typed input for text mode; cleared only on a successful send
    pub text_input: String,
    transcript: Option<String>,
    last_turn: Option<VoiceTurn>,
    error: Option<String>,
    conversation_id: Option<String>,
}

impl VoiceAssistant {
    /// Build the assistant and the event stream its host listens on.
    pub fn new(
        http: HttpClient,
        capture: Box<dyn AudioCapturePort>,
        playback: Box<dyn AudioPlaybackPort>,
    ) -> (Self, mpsc::UnboundedReceiver<AssistantEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (
            Self {
                http,
                capture,
                playback,
                events,
                phase: AssistantPhase::Idle,
                text_input: String::new(),
                transcript: None,
                last_turn: None,
                error: None,
                conversation_id: None,
            },
            receiver,
        )
    }

    pub fn phase(&self) -> AssistantPhase {
        self.phase
    }

    pub fn transcript(&self) -> Option<&str> {
        self.transcript.as_deref()
    }

    pub fn last_turn(&self) -> Option<&VoiceTurn> {
        self.last_turn.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn conversation_id(&self) -> Option<&str> {
        self.conversation_id.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_playing()
    }

    pub fn can_start_recording(&self) -> bool {
        self.phase == AssistantPhase::Idle
    }

    pub fn can_send_text(&self) -> bool {
        self.phase == AssistantPhase::Idle && !self.text_input.trim().is_empty()
    }

    /// Start a recording. Requires a granted microphone permission;
    /// denial is terminal for this attempt and leaves the phase at IDLE
    /// with a persistent error message.
    pub async fn start_recording(&mut self) {
        if !self.can_start_recording() {
            return;
        }
        self.error = None;
        self.last_turn = None;

        match self.capture.start().await {
            Ok(()) => {
                debug!("recording started");
                self.phase = AssistantPhase::Recording;
            }
            Err(CaptureError::PermissionDenied) => {
                warn!("microphone permission denied");
                self.error = Some(
                    "Microphone access denied. Please enable microphone permissions.".to_string(),
                );
            }
            Err(err) => {
                warn!(%err, "capture failed to start");
                self.error = Some(err.to_string());
            }
        }
    }

    /// Stop the recording, upload the clip, and render the reply.
    ///
    /// The capture port releases the device as part of `stop`, regardless
    /// of how the upload goes.
    pub async fn stop_recording(&mut self) {
        if self.phase != AssistantPhase::Recording {
            return;
        }
        self.phase = AssistantPhase::Processing;

        let clip = match self.capture.stop().await {
            Ok(clip) => clip,
            Err(err) => {
                warn!(%err, "failed to finalize recording");
                self.error = Some("Failed to process voice input. Please try again.".to_string());
                self.phase = AssistantPhase::Idle;
                return;
            }
        };

        debug!(bytes = clip.bytes.len(), mime = %clip.mime, "uploading recording");
        let result = self
            .http
            .voice_interact(clip.bytes, &clip.mime, self.conversation_id.as_deref())
            .await;

        match result {
            Ok(turn) => self.handle_turn(turn, None).await,
            Err(err) => {
                warn!(%err, "voice upload failed");
                self.error = Some("Failed to process voice input. Please try again.".to_string());
            }
        }
        self.phase = AssistantPhase::Idle;
    }

    /// Send the typed input, threading the conversation id from the
    /// previous turn. The input clears only on success.
    pub async fn send_text(&mut self) {
        if !self.can_send_text() {
            return;
        }
        self.phase = AssistantPhase::Processing;
        self.error = None;
        self.last_turn = None;

        let query = VoiceTextQuery {
            transcribed_text: self.text_input.trim().to_string(),
            conversation_id: self.conversation_id.clone(),
        };
        let typed = query.transcribed_text.clone();

        match self.http.voice_interact_text(&query).await {
            Ok(turn) => {
                self.handle_turn(turn, Some(typed)).await;
                self.text_input.clear();
            }
            Err(err) => {
                warn!(%err, "text turn failed");
                self.error = Some("Failed to process your request. Please try again.".to_string());
            }
        }
        self.phase = AssistantPhase::Idle;
    }

    /// Pause reply playback mid-stream.
    pub async fn stop_playback(&mut self) {
        if let Err(err) = self.playback.stop().await {
            warn!(%err, "failed to stop playback");
        }
    }

    async fn handle_turn(&mut self, turn: VoiceTurn, typed: Option<String>) {
        self.transcript = turn.transcribed_text.clone().or(typed);
        self.conversation_id = turn.conversation_id.clone();

        if let Some(created) = &turn.created_ticket {
            info!(id = created.id, "assistant created a ticket");
            let _ = self.events.send(AssistantEvent::RequestCreated(created.clone()));
        }

        if let Some(encoded) = &turn.audio_response_base64 {
            match STANDARD.decode(encoded) {
                Ok(bytes) => {
                    if let Err(err) = self.playback.play(bytes).await {
                        warn!(%err, "reply playback failed");
                    }
                }
                Err(err) => warn!(%err, "undecodable reply audio"),
            }
        }

        self.last_turn = Some(turn);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::voice::ports::AudioClip;
    use crate::{ClientConfig, MemorySessionStorage, SessionStore};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct DeniedCapture;

    #[async_trait]
    impl AudioCapturePort for DeniedCapture {
        async fn start(&mut self) -> Result<(), CaptureError> {
            Err(CaptureError::PermissionDenied)
        }
        async fn stop(&mut self) -> Result<AudioClip, CaptureError> {
            unreachable!("never started")
        }
    }

    struct BrokenCapture {
        started: bool,
    }

    #[async_trait]
    impl AudioCapturePort for BrokenCapture {
        async fn start(&mut self) -> Result<(), CaptureError> {
            self.started = true;
            Ok(())
        }
        async fn stop(&mut self) -> Result<AudioClip, CaptureError> {
            Err(CaptureError::Device("track lost".to_string()))
        }
    }

    struct NullPlayback;

    #[async_trait]
    impl crate::voice::ports::AudioPlaybackPort for NullPlayback {
        async fn play(&mut self, _bytes: Vec<u8>) -> Result<(), crate::voice::ports::PlaybackError> {
            Ok(())
        }
        async fn stop(&mut self) -> Result<(), crate::voice::ports::PlaybackError> {
            Ok(())
        }
        fn is_playing(&self) -> bool {
            false
        }
    }

    fn http() -> HttpClient {
        let config = ClientConfig::default();
        let session = Arc::new(SessionStore::new(
            &config,
            Box::new(MemorySessionStorage::new()),
        ));
        HttpClient::new(&config, session)
    }

    #[tokio::test]
    async fn permission_denial_is_terminal_and_returns_to_idle() {
        let (mut assistant, _events) =
            VoiceAssistant::new(http(), Box::new(DeniedCapture), Box::new(NullPlayback));

        assistant.start_recording().await;
        assert_eq!(assistant.phase(), AssistantPhase::Idle);
        assert!(assistant.error().unwrap().contains("Microphone access denied"));
        // the user may simply try again
        assert!(assistant.can_start_recording());
    }

    #[tokio::test]
    async fn failed_clip_finalization_surfaces_an_error_without_upload() {
        let (mut assistant, _events) = VoiceAssistant::new(
            http(),
            Box::new(BrokenCapture { started: false }),
            Box::new(NullPlayback),
        );

        assistant.start_recording().await;
        assert_eq!(assistant.phase(), AssistantPhase::Recording);

        assistant.stop_recording().await;
        assert_eq!(assistant.phase(), AssistantPhase::Idle);
        assert!(assistant.error().unwrap().contains("Failed to process voice input"));
    }

    #[tokio::test]
    async fn blank_text_input_never_sends() {
        let (mut assistant, _events) = VoiceAssistant::new(
            http(),
            Box::new(BrokenCapture { started: false }),
            Box::new(NullPlayback),
        );

        assistant.text_input = "   ".to_string();
        assert!(!assistant.can_send_text());
        // send_text is a no-op; no network call is attempted, so this
        // cannot fail even with no backend running
        assistant.send_text().await;
        assert_eq!(assistant.phase(), AssistantPhase::Idle);
        assert!(assistant.error().is_none());
    }

    #[tokio::test]
    async fn stop_without_active_recording_is_a_no_op() {
        let (mut assistant, _events) = VoiceAssistant::new(
            http(),
            Box::new(BrokenCapture { started: false }),
            Box::new(NullPlayback),
        );

        assistant.stop_recording().await;
        assert_eq!(assistant.phase(), AssistantPhase::Idle);
        assert!(assistant.error().is_none());
    }
}
