//! Voice/text assistant

pub mod assistant;
pub mod ports;

pub use assistant::{AssistantEvent, AssistantPhase, VoiceAssistant};
pub use ports::{AudioCapturePort, AudioClip, AudioPlaybackPort, CaptureError, PlaybackError};
