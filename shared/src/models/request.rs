//! Maintenance Request Model

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Request category, produced by the backend's AI classifier.
/// Opaque to the client: never set or edited locally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Plumbing,
    Electrical,
    Cleaning,
    Security,
    Carpentry,
    Painting,
    Hvac,
    Others,
}

/// Request priority, produced by the backend's AI classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Moderate,
    High,
    Critical,
}

/// Ticket lifecycle status.
///
/// PENDING -> IN_PROGRESS (via assignment) -> COMPLETED (terminal).
/// No transition moves a ticket backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RequestStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "PENDING",
            RequestStatus::InProgress => "IN_PROGRESS",
            RequestStatus::Completed => "COMPLETED",
        }
    }
}

/// Maintenance request entity (server-authoritative).
///
/// Deserialization is deliberately lenient: the voice flow's created-ticket
/// payload carries only a handful of fields, so everything the backend may
/// omit defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    #[serde(default)]
    pub id: i64,
    /// Creator's user id
    #[serde(default)]
    pub user_id: i64,
    /// Creator's display name, resolved server-side
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub priority: Option<Priority>,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub image_url: Option<String>,
    /// Assigned technician's user id, set only when leaving PENDING
    #[serde(default)]
    pub assigned_to: Option<i64>,
    #[serde(default)]
    pub assigned_to_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub resolved_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub admin_notes: Option<String>,
}

impl MaintenanceRequest {
    /// A ticket may be assigned only while PENDING and unassigned.
    pub fn is_assignable(&self) -> bool {
        self.status == RequestStatus::Pending && self.assigned_to.is_none()
    }

    /// Completion is only reachable from IN_PROGRESS with a technician set.
    pub fn is_completable(&self) -> bool {
        self.status == RequestStatus::InProgress && self.assigned_to.is_some()
    }
}

/// List responses arrive either as a bare array or as a paginated
/// envelope with a `content` field; both normalize to a plain vec.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RequestPage {
    Plain(Vec<MaintenanceRequest>),
    Paged { content: Vec<MaintenanceRequest> },
}

impl RequestPage {
    pub fn into_vec(self) -> Vec<MaintenanceRequest> {
        match self {
            RequestPage::Plain(requests) => requests,
            RequestPage::Paged { content } => content,
        }
    }
}

/// Create request payload
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateRequest {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

/// Update request payload
///
/// Only two shapes are ever sent: a bare status update, or an assignment
/// which binds a technician and forces IN_PROGRESS in one call.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<RequestStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<i64>,
}

impl UpdateRequest {
    /// Bare status transition (IN_PROGRESS -> COMPLETED in practice).
    pub fn status(status: RequestStatus) -> Self {
        Self {
            status: Some(status),
            assigned_to: None,
        }
    }

    /// Assignment: sets the technician and forces IN_PROGRESS.
    pub fn assignment(technician_id: i64) -> Self {
        Self {
            status: Some(RequestStatus::InProgress),
            assigned_to: Some(technician_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_screaming_snake_case() {
        assert_eq!(
            serde_json::to_string(&RequestStatus::InProgress).unwrap(),
            "\"IN_PROGRESS\""
        );
        assert_eq!(
            serde_json::from_str::<Category>("\"HVAC\"").unwrap(),
            Category::Hvac
        );
    }

    #[test]
    fn page_normalizes_bare_array_and_envelope() {
        let bare: RequestPage = serde_json::from_str(r#"[{"id": 1}, {"id": 2}]"#).unwrap();
        assert_eq!(bare.into_vec().len(), 2);

        let paged: RequestPage =
            serde_json::from_str(r#"{"content": [{"id": 3}], "totalPages": 1}"#).unwrap();
        let requests = paged.into_vec();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].id, 3);
    }

    #[test]
    fn created_ticket_shape_parses_with_defaults() {
        let req: MaintenanceRequest = serde_json::from_str(
            r#"{"id": 42, "category": "HVAC", "priority": "HIGH", "status": "PENDING"}"#,
        )
        .unwrap();
        assert_eq!(req.id, 42);
        assert_eq!(req.category, Some(Category::Hvac));
        assert_eq!(req.priority, Some(Priority::High));
        assert_eq!(req.status, RequestStatus::Pending);
        assert!(req.title.is_empty());
        assert!(req.assigned_to.is_none());
    }

    #[test]
    fn lifecycle_helpers_follow_the_invariants() {
        let pending = MaintenanceRequest {
            id: 1,
            ..Default::default()
        };
        assert!(pending.is_assignable());
        assert!(!pending.is_completable());

        let in_progress = MaintenanceRequest {
            status: RequestStatus::InProgress,
            assigned_to: Some(7),
            ..Default::default()
        };
        assert!(!in_progress.is_assignable());
        assert!(in_progress.is_completable());

        // IN_PROGRESS without a technician must not be completable
        let orphaned = MaintenanceRequest {
            status: RequestStatus::InProgress,
            ..Default::default()
        };
        assert!(!orphaned.is_completable());
    }

    #[test]
    fn update_payload_serializes_only_set_fields() {
        let status_only = UpdateRequest::status(RequestStatus::Completed);
        assert_eq!(
            serde_json::to_string(&status_only).unwrap(),
            r#"{"status":"COMPLETED"}"#
        );

        let assignment = serde_json::to_value(UpdateRequest::assignment(9)).unwrap();
        assert_eq!(assignment["assignedTo"], 9);
        assert_eq!(assignment["status"], "IN_PROGRESS");
    }
}
