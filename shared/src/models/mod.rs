//! Data models

pub mod request;
pub mod role;
pub mod statistics;
pub mod technician;
pub mod voice;

pub use request::{
    Category, CreateRequest, MaintenanceRequest, Priority, RequestPage, RequestStatus,
    UpdateRequest,
};
pub use role::Role;
pub use statistics::Statistics;
pub use technician::Technician;
pub use voice::{VoiceTextQuery, VoiceTurn};
