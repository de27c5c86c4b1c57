//! Shared types for the HomeGenie maintenance client
//!
//! Wire-format models and request/response DTOs used by every client flow.
//! The backend is a Java service: fields are camelCase on the wire and
//! enums are SCREAMING_SNAKE_CASE.

pub mod client;
pub mod models;

pub use client::{AuthUser, LoginRequest, RegisterRequest};
pub use models::{
    Category, CreateRequest, MaintenanceRequest, Priority, RequestPage, RequestStatus, Role,
    Statistics, Technician, UpdateRequest, VoiceTextQuery, VoiceTurn,
};
