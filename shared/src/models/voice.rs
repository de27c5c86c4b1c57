//! Voice Assistant DTOs

use serde::{Deserialize, Serialize};

use super::request::MaintenanceRequest;

/// Text-mode query: typed input plus the conversation id carried forward
/// from the previous turn, enabling multi-turn threading.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceTextQuery {
    pub transcribed_text: String,
    pub conversation_id: Option<String>,
}

/// One assistant turn. Ephemeral: held in memory for the active session
/// only, never persisted by the client.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct VoiceTurn {
    /// What the backend heard (audio mode) or echoed (text mode)
    #[serde(default)]
    pub transcribed_text: Option<String>,
    #[serde(default)]
    pub text_response: Option<String>,
    /// Synthesized reply audio, base64-encoded mp3
    #[serde(default)]
    pub audio_response_base64: Option<String>,
    #[serde(default)]
    pub conversation_id: Option<String>,
    /// Present when the turn resulted in a new ticket
    #[serde(default)]
    pub created_ticket: Option<MaintenanceRequest>,
    #[serde(default)]
    pub requires_followup: bool,
    #[serde(default)]
    pub followup_question: Option<String>,
}
