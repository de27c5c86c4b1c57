//! Capability ports over the platform's media APIs
//!
//! The assistant state machine depends only on these traits, so it runs
//! against fakes in tests and against whatever microphone/speaker glue
//! the embedding shell provides in production.

use async_trait::async_trait;
use thiserror::Error;

/// Capture error type
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The user denied the microphone permission prompt
    #[error("Microphone access denied")]
    PermissionDenied,

    /// No usable input device / device-level failure
    #[error("Audio device error: {0}")]
    Device(String),
}

/// Playback error type
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Audio playback error: {0}")]
    Playback(String),
}

/// One finalized audio recording.
#[derive(Debug, Clone)]
pub struct AudioClip {
    pub bytes: Vec<u8>,
    pub mime: String,
}

/// Microphone capture lifecycle.
///
/// `stop` must release the underlying device unconditionally, whatever
/// happens to the clip afterwards.
#[async_trait]
pub trait AudioCapturePort: Send {
    /// Request permission (if needed) and start recording.
    async fn start(&mut self) -> Result<(), CaptureError>;

    /// Stop recording, release the device, and hand back the clip.
    async fn stop(&mut self) -> Result<AudioClip, CaptureError>;
}

/// Speaker playback of a synthesized reply.
#[async_trait]
pub trait AudioPlaybackPort: Send {
    /// Begin playing the decoded audio immediately.
    async fn play(&mut self, bytes: Vec<u8>) -> Result<(), PlaybackError>;

    /// Pause playback mid-stream.
    async fn stop(&mut self) -> Result<(), PlaybackError>;

    fn is_playing(&self) -> bool;
}
