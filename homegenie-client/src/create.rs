//! Create-request flow
//!
//! Collects title/description/optional image and submits. The image is
//! validated and inlined locally (base64 data URL) before any network
//! call; category and priority are assigned server-side.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use shared::{CreateRequest, MaintenanceRequest};
use tracing::info;

use crate::http::HttpClient;
use crate::{ClientError, ClientResult};

/// Hard local limit on the raw image size.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Soft display limit on the description. Not enforced on submit.
pub const DESCRIPTION_SOFT_LIMIT: usize = 1000;

/// Form state for one create-request submission.
///
/// On failure the form stays populated for retry; on success it clears
/// and the host returns to the list view and reloads.
#[derive(Debug, Default, Clone)]
pub struct CreateRequestFlow {
    pub title: String,
    pub description: String,
    image_base64: Option<String>,
    submitting: bool,
}

impl CreateRequestFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn image(&self) -> Option<&str> {
        self.image_base64.as_deref()
    }

    /// Characters left under the soft description limit, for display only.
    pub fn description_chars_remaining(&self) -> isize {
        DESCRIPTION_SOFT_LIMIT as isize - self.description.chars().count() as isize
    }

    /// Attach an image, rejecting anything over [`MAX_IMAGE_BYTES`] before
    /// any network traffic. Exactly at the limit is accepted.
    pub fn attach_image(&mut self, bytes: &[u8], mime: &str) -> ClientResult<()> {
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(ClientError::ImageTooLarge {
                size: bytes.len(),
                limit: MAX_IMAGE_BYTES,
            });
        }
        let encoded = STANDARD.encode(bytes);
        self.image_base64 = Some(format!("data:{mime};base64,{encoded}"));
        Ok(())
    }

    pub fn remove_image(&mut self) {
        self.image_base64 = None;
    }

    fn validate(&self) -> ClientResult<()> {
        if self.title.trim().is_empty() {
            return Err(ClientError::Validation("Title is required".to_string()));
        }
        if self.description.trim().is_empty() {
            return Err(ClientError::Validation(
                "Description is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Submit the form. The creator's id rides on the decorated request
    /// headers; the server answers with the classified ticket.
    pub async fn submit(&mut self, http: &HttpClient) -> ClientResult<MaintenanceRequest> {
        self.validate()?;
        self.submitting = true;

        let payload = CreateRequest {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            image_base64: self.image_base64.clone(),
        };

        let result = http.create_request(&payload).await;
        self.submitting = false;

        match result {
            Ok(created) => {
                info!(id = created.id, "maintenance request created");
                *self = Self::new();
                Ok(created)
            }
            // keep the form populated for retry
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_at_exactly_the_limit_is_accepted_and_encoded() {
        let mut flow = CreateRequestFlow::new();
        let bytes = vec![0u8; MAX_IMAGE_BYTES];
        flow.attach_image(&bytes, "image/png").unwrap();

        let data_url = flow.image().expect("image attached");
        assert!(data_url.starts_with("data:image/png;base64,"));
    }

    #[test]
    fn image_one_byte_over_the_limit_is_rejected_locally() {
        let mut flow = CreateRequestFlow::new();
        let bytes = vec![0u8; MAX_IMAGE_BYTES + 1];
        let err = flow.attach_image(&bytes, "image/jpeg").unwrap_err();
        assert!(matches!(err, ClientError::ImageTooLarge { .. }));
        assert!(flow.image().is_none());
    }

    #[test]
    fn removed_image_is_not_submitted() {
        let mut flow = CreateRequestFlow::new();
        flow.attach_image(b"img", "image/png").unwrap();
        flow.remove_image();
        assert!(flow.image().is_none());
    }

    #[test]
    fn blank_title_or_description_fails_validation() {
        let mut flow = CreateRequestFlow::new();
        flow.title = "  ".to_string();
        flow.description = "Dripping under sink".to_string();
        assert!(matches!(flow.validate(), Err(ClientError::Validation(_))));

        flow.title = "Leaky faucet".to_string();
        flow.description = String::new();
        assert!(matches!(flow.validate(), Err(ClientError::Validation(_))));

        flow.description = "Dripping under sink".to_string();
        assert!(flow.validate().is_ok());
    }

    #[test]
    fn soft_limit_is_a_display_hint_only() {
        let mut flow = CreateRequestFlow::new();
        flow.title = "t".to_string();
        flow.description = "d".repeat(DESCRIPTION_SOFT_LIMIT + 50);
        assert!(flow.description_chars_remaining() < 0);
        // still valid for submission
        assert!(flow.validate().is_ok());
    }
}
