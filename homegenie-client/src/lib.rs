//! HomeGenie Client - maintenance-ticketing client logic
//!
//! Role-aware request lifecycle against the remote maintenance/user
//! services: session store, decorated HTTP calls, dashboard view model,
//! create/assignment flows, and the voice/text assistant.

pub mod assignment;
pub mod config;
pub mod create;
pub mod dashboard;
pub mod error;
pub mod http;
pub mod session;
pub mod voice;

pub use assignment::{AssignmentFlow, AssignmentOutcome, DirectoryState};
pub use config::ClientConfig;
pub use create::CreateRequestFlow;
pub use dashboard::{Notice, NoticeLevel, RequestAction, RequestListModel, StatusFilter};
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use session::{
    FileSessionStorage, MemorySessionStorage, SessionError, SessionStorage, SessionStore,
};
pub use voice::{
    AssistantEvent, AssistantPhase, AudioCapturePort, AudioClip, AudioPlaybackPort, CaptureError,
    PlaybackError, VoiceAssistant,
};

// Re-export shared types for convenience
pub use shared::{
    AuthUser, Category, CreateRequest, LoginRequest, MaintenanceRequest, Priority,
    RegisterRequest, RequestStatus, Role, Statistics, Technician, UpdateRequest, VoiceTurn,
};
