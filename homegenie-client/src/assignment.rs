//! Assignment flow
//!
//! Modal presenting the technician directory for one PENDING ticket.
//! No eligibility filtering by specialty: every technician is offered.
//! An empty directory is its own rendered state, distinct from loading.

use shared::{MaintenanceRequest, Technician};

use crate::dashboard::RequestListModel;

/// Directory as presented by the picker.
#[derive(Debug, Clone)]
pub enum DirectoryState {
    Loading,
    /// Explicit "no technicians available" state
    Empty,
    Loaded(Vec<Technician>),
}

/// Result of an assignment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// Mutation accepted; modal closed, selection cleared, list reloaded
    Assigned,
    /// Mutation rejected; modal stays open for another pick
    Failed,
}

/// Modal state for assigning a technician to one request.
#[derive(Debug)]
pub struct AssignmentFlow {
    request: MaintenanceRequest,
    directory: DirectoryState,
    /// Technician id with the in-flight assignment, disabling the rest
    busy: Option<i64>,
}

impl AssignmentFlow {
    /// Open the modal for a request with the current directory snapshot.
    pub fn open(request: MaintenanceRequest, technicians: &[Technician]) -> Self {
        let directory = if technicians.is_empty() {
            DirectoryState::Empty
        } else {
            DirectoryState::Loaded(technicians.to_vec())
        };
        Self {
            request,
            directory,
            busy: None,
        }
    }

    /// Modal opened before the directory fetch resolved.
    pub fn open_loading(request: MaintenanceRequest) -> Self {
        Self {
            request,
            directory: DirectoryState::Loading,
            busy: None,
        }
    }

    pub fn request(&self) -> &MaintenanceRequest {
        &self.request
    }

    pub fn directory(&self) -> &DirectoryState {
        &self.directory
    }

    /// Replace the directory once its fetch resolves.
    pub fn directory_loaded(&mut self, technicians: Vec<Technician>) {
        self.directory = if technicians.is_empty() {
            DirectoryState::Empty
        } else {
            DirectoryState::Loaded(technicians)
        };
    }

    /// Whether the picker accepts a selection right now.
    pub fn can_pick(&self) -> bool {
        self.busy.is_none()
    }

    /// The entry showing the per-item busy indicator, if any.
    pub fn busy_technician(&self) -> Option<i64> {
        self.busy
    }

    /// Issue the assignment through the list model.
    ///
    /// Marks the picked entry busy for the duration; on failure the busy
    /// marker clears and the modal remains open. Cancel is just dropping
    /// the flow - no side effects.
    pub async fn assign(
        &mut self,
        model: &mut RequestListModel,
        technician_id: i64,
    ) -> AssignmentOutcome {
        if self.busy.is_some() {
            return AssignmentOutcome::Failed;
        }
        self.busy = Some(technician_id);

        let assigned = model.assign(self.request.id, technician_id).await;
        self.busy = None;

        if assigned {
            AssignmentOutcome::Assigned
        } else {
            AssignmentOutcome::Failed
        }
    }
}
