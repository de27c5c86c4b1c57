//! Request-list view model
//!
//! One instance per dashboard. Fetches the role-appropriate ticket list
//! plus, for admins, the statistics snapshot and technician directory.
//! Mutations never merge locally: a successful assign/status update
//! triggers a full reload, strictly sequenced after the mutation.

use shared::{
    AuthUser, MaintenanceRequest, RequestStatus, Role, Statistics, Technician, UpdateRequest,
};
use tracing::{debug, info};

use crate::http::HttpClient;

/// Severity of a transient notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Error,
}

/// Transient user-facing notification (toast equivalent).
#[derive(Debug, Clone)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Status filter tabs on the list view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Status(RequestStatus),
}

impl StatusFilter {
    pub fn matches(&self, request: &MaintenanceRequest) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Status(status) => request.status == *status,
        }
    }
}

/// Mutating control a ticket card may expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    /// Open the technician picker (admin, PENDING, unassigned)
    Assign,
    /// IN_PROGRESS -> COMPLETED (admin or technician, assigned only)
    MarkComplete,
}

/// Role gating for mutating controls.
///
/// Residents only ever read status. Legality of the transition itself is
/// enforced by the backend; the client merely withholds the affordance.
pub fn actions_for(role: Role, request: &MaintenanceRequest) -> Vec<RequestAction> {
    let mut actions = Vec::new();
    match role {
        Role::Resident => {}
        Role::Admin => {
            if request.is_assignable() {
                actions.push(RequestAction::Assign);
            }
            if request.is_completable() {
                actions.push(RequestAction::MarkComplete);
            }
        }
        Role::Technician => {
            if request.is_completable() {
                actions.push(RequestAction::MarkComplete);
            }
        }
    }
    actions
}

/// Per-dashboard view model over the fetched lists.
pub struct RequestListModel {
    http: HttpClient,
    user: AuthUser,
    requests: Vec<MaintenanceRequest>,
    statistics: Option<Statistics>,
    technicians: Vec<Technician>,
    notice: Option<Notice>,
    loading: bool,
}

impl RequestListModel {
    pub fn new(http: HttpClient, user: AuthUser) -> Self {
        Self {
            http,
            user,
            requests: Vec::new(),
            statistics: None,
            technicians: Vec::new(),
            notice: None,
            loading: false,
        }
    }

    pub fn user(&self) -> &AuthUser {
        &self.user
    }

    pub fn requests(&self) -> &[MaintenanceRequest] {
        &self.requests
    }

    pub fn statistics(&self) -> Option<&Statistics> {
        self.statistics.as_ref()
    }

    pub fn technicians(&self) -> &[Technician] {
        &self.technicians
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Take the pending notification, if any.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }

    /// Load tickets, statistics and the directory together.
    ///
    /// The three calls are issued concurrently and applied independently
    /// as each resolves; any failure keeps the prior state for that slice
    /// and surfaces a notice. Statistics are admin-only; the directory is
    /// fetched wherever assigned names must resolve (admin, resident).
    pub async fn load_all(&mut self) {
        self.loading = true;
        debug!(role = %self.user.role, "loading dashboard data");

        let wants_statistics = self.user.role == Role::Admin;
        let wants_directory = matches!(self.user.role, Role::Admin | Role::Resident);

        let (requests, statistics, technicians) = tokio::join!(
            self.http.list_requests(&self.user),
            async {
                if wants_statistics {
                    Some(self.http.statistics().await)
                } else {
                    None
                }
            },
            async {
                if wants_directory {
                    Some(self.http.technicians().await)
                } else {
                    None
                }
            },
        );

        match requests {
            Ok(requests) => self.requests = requests,
            Err(err) => self.notice = Some(Notice::error(err.notice_message())),
        }
        match statistics {
            Some(Ok(statistics)) => self.statistics = Some(statistics),
            Some(Err(err)) => self.notice = Some(Notice::error(err.notice_message())),
            None => {}
        }
        match technicians {
            Some(Ok(technicians)) => self.technicians = technicians,
            Some(Err(err)) => self.notice = Some(Notice::error(err.notice_message())),
            None => {}
        }

        self.loading = false;
    }

    /// Single externally-driven status transition.
    ///
    /// No local legality check: the backend is authoritative, and repeat
    /// invocations each issue their own PUT (no client-side dedup).
    pub async fn update_status(&mut self, id: i64, status: RequestStatus) {
        match self
            .http
            .update_request(id, &UpdateRequest::status(status))
            .await
        {
            Ok(_) => {
                info!(id, status = status.as_str(), "status updated");
                self.notice = Some(Notice::success(
                    "Status updated! Resident will be notified via email.",
                ));
                self.load_all().await;
            }
            Err(err) => self.notice = Some(Notice::error(err.notice_message())),
        }
    }

    /// Bind a technician and force IN_PROGRESS in one call, then reload.
    pub async fn assign(&mut self, id: i64, technician_id: i64) -> bool {
        match self
            .http
            .update_request(id, &UpdateRequest::assignment(technician_id))
            .await
        {
            Ok(_) => {
                info!(id, technician_id, "technician assigned");
                self.notice = Some(Notice::success(
                    "Technician assigned! They will receive an email notification.",
                ));
                self.load_all().await;
                true
            }
            Err(err) => {
                self.notice = Some(Notice::error(err.notice_message()));
                false
            }
        }
    }

    /// Subset of the fetched list matching the active tab.
    pub fn filtered(&self, filter: StatusFilter) -> Vec<&MaintenanceRequest> {
        self.requests.iter().filter(|r| filter.matches(r)).collect()
    }

    /// Controls to render for one ticket card, gated by the session role.
    pub fn actions_for(&self, request: &MaintenanceRequest) -> Vec<RequestAction> {
        actions_for(self.user.role, request)
    }

    /// Resolve an assigned technician id to a display name.
    pub fn resolve_technician(&self, id: i64) -> Option<&str> {
        self.technicians
            .iter()
            .find(|t| t.id == id)
            .map(|t| t.full_name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(status: RequestStatus, assigned_to: Option<i64>) -> MaintenanceRequest {
        MaintenanceRequest {
            id: 1,
            status,
            assigned_to,
            ..Default::default()
        }
    }

    #[test]
    fn residents_never_see_mutating_controls() {
        for status in [
            RequestStatus::Pending,
            RequestStatus::InProgress,
            RequestStatus::Completed,
        ] {
            for assigned in [None, Some(5)] {
                assert!(actions_for(Role::Resident, &request(status, assigned)).is_empty());
            }
        }
    }

    #[test]
    fn admin_sees_assign_only_for_pending_unassigned() {
        let pending = request(RequestStatus::Pending, None);
        assert_eq!(actions_for(Role::Admin, &pending), vec![RequestAction::Assign]);

        // already assigned: nothing to offer even while PENDING
        let pending_assigned = request(RequestStatus::Pending, Some(2));
        assert!(actions_for(Role::Admin, &pending_assigned).is_empty());
    }

    #[test]
    fn mark_complete_requires_in_progress_and_assignee() {
        let ready = request(RequestStatus::InProgress, Some(2));
        assert_eq!(
            actions_for(Role::Admin, &ready),
            vec![RequestAction::MarkComplete]
        );
        assert_eq!(
            actions_for(Role::Technician, &ready),
            vec![RequestAction::MarkComplete]
        );

        let unassigned = request(RequestStatus::InProgress, None);
        assert!(actions_for(Role::Admin, &unassigned).is_empty());
        assert!(actions_for(Role::Technician, &unassigned).is_empty());
    }

    #[test]
    fn invalid_completed_without_assignee_yields_no_affordance() {
        // the backend should never produce this state; the UI still must
        // not offer a control for it
        let invalid = request(RequestStatus::Completed, None);
        assert!(actions_for(Role::Admin, &invalid).is_empty());
        assert!(actions_for(Role::Technician, &invalid).is_empty());
    }

    fn fixture_model() -> RequestListModel {
        use crate::{ClientConfig, MemorySessionStorage, SessionStore};
        use std::sync::Arc;

        let config = ClientConfig::default();
        let session = Arc::new(SessionStore::new(
            &config,
            Box::new(MemorySessionStorage::new()),
        ));
        let http = HttpClient::new(&config, session);
        let user = AuthUser {
            user_id: 1,
            role: Role::Admin,
            ..Default::default()
        };
        let mut model = RequestListModel::new(http, user);
        model.requests = vec![
            request(RequestStatus::Pending, None),
            request(RequestStatus::Pending, None),
            request(RequestStatus::InProgress, Some(2)),
            request(RequestStatus::InProgress, Some(3)),
            request(RequestStatus::Completed, Some(2)),
        ];
        model
    }

    #[test]
    fn filter_tabs_partition_the_fixture() {
        let model = fixture_model();
        assert_eq!(model.filtered(StatusFilter::All).len(), 5);
        assert_eq!(
            model.filtered(StatusFilter::Status(RequestStatus::Pending)).len(),
            2
        );
        assert_eq!(
            model
                .filtered(StatusFilter::Status(RequestStatus::InProgress))
                .len(),
            2
        );
        assert_eq!(
            model
                .filtered(StatusFilter::Status(RequestStatus::Completed))
                .len(),
            1
        );
    }

    #[test]
    fn technician_names_resolve_from_the_directory() {
        let mut model = fixture_model();
        model.technicians = vec![Technician {
            id: 2,
            full_name: "Pat Fixer".to_string(),
            ..Default::default()
        }];
        assert_eq!(model.resolve_technician(2), Some("Pat Fixer"));
        assert_eq!(model.resolve_technician(99), None);
    }
}
