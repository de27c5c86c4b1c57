//! Technician Directory Model

use serde::{Deserialize, Serialize};

/// Technician directory entry, read-only reference data.
///
/// Used to populate the assignment picker and to resolve an assigned
/// technician id to a display identity.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Technician {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub flat_number: Option<String>,
    #[serde(default)]
    pub specialty: Option<String>,
    #[serde(default)]
    pub active: bool,
}
