//! HTTP client for the maintenance and user services
//!
//! Every outbound call passes through one decoration point that attaches
//! the bearer token and the numeric `X-User-Id` header from the current
//! session, leaving the rest of the request untouched.

use std::sync::Arc;

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use shared::{
    AuthUser, CreateRequest, MaintenanceRequest, RequestPage, Role, Statistics, Technician,
    UpdateRequest, VoiceTextQuery, VoiceTurn,
};
use tracing::{debug, warn};

use crate::{ClientConfig, ClientError, ClientResult, SessionStore};

/// Header carrying the numeric user id on authenticated calls.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// HTTP client for the HomeGenie services.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    maintenance_base: String,
    user_base: String,
    session: Arc<SessionStore>,
}

impl HttpClient {
    /// Create a new HTTP client bound to a session.
    pub fn new(config: &ClientConfig, session: Arc<SessionStore>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            maintenance_base: config.maintenance_base_url.trim_end_matches('/').to_string(),
            user_base: config.user_base_url.trim_end_matches('/').to_string(),
            session,
        }
    }

    fn maintenance_url(&self, path: &str) -> String {
        format!("{}/{}", self.maintenance_base, path.trim_start_matches('/'))
    }

    fn user_url(&self, path: &str) -> String {
        format!("{}/{}", self.user_base, path.trim_start_matches('/'))
    }

    /// Decorate a request with the session identity.
    fn authenticated(&self, request: RequestBuilder) -> RequestBuilder {
        let mut request = request;
        if let Some(user) = self.session.current_user() {
            if let Some(token) = &user.token {
                request = request.header(
                    reqwest::header::AUTHORIZATION,
                    format!("Bearer {token}"),
                );
            }
            request = request.header(USER_ID_HEADER, user.user_id.to_string());
        }
        request
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> ClientResult<T> {
        debug!(%url, "GET");
        let response = self.authenticated(self.client.get(&url)).send().await?;
        Self::handle_response(response).await
    }

    async fn post_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        url: String,
        body: &B,
    ) -> ClientResult<T> {
        debug!(%url, "POST");
        let response = self
            .authenticated(self.client.post(&url).json(body))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn put_json<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        url: String,
        body: &B,
    ) -> ClientResult<T> {
        debug!(%url, "PUT");
        let response = self
            .authenticated(self.client.put(&url).json(body))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Handle a response with a JSON body.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_for(status, response).await);
        }
        response.json().await.map_err(Into::into)
    }

    /// Map a non-2xx response to a typed error, preferring the backend's
    /// `message` field over the raw body.
    async fn error_for(status: StatusCode, response: reqwest::Response) -> ClientError {
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<Value>(&text)
            .ok()
            .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
            .unwrap_or(text);
        warn!(%status, %message, "request failed");
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::FORBIDDEN => ClientError::Forbidden(message),
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::BAD_REQUEST => ClientError::Validation(message),
            _ => ClientError::Internal(message),
        }
    }

    // ========== Maintenance API ==========

    /// Fetch the role-appropriate set of tickets.
    ///
    /// ADMIN sees everything, TECHNICIAN the tickets assigned to them,
    /// RESIDENT the tickets they created. Both bare-array and paginated
    /// responses normalize to a plain vec.
    pub async fn list_requests(&self, user: &AuthUser) -> ClientResult<Vec<MaintenanceRequest>> {
        let url = match user.role {
            Role::Admin => self.maintenance_url("maintenance"),
            Role::Technician => {
                self.maintenance_url(&format!("maintenance/technician/{}", user.user_id))
            }
            Role::Resident => self.maintenance_url(&format!("maintenance/user/{}", user.user_id)),
        };
        let page: RequestPage = self.get_json(url).await?;
        Ok(page.into_vec())
    }

    /// Fetch the aggregate statistics snapshot (admin dashboard).
    pub async fn statistics(&self) -> ClientResult<Statistics> {
        self.get_json(self.maintenance_url("maintenance/statistics"))
            .await
    }

    /// Fetch the technician directory.
    pub async fn technicians(&self) -> ClientResult<Vec<Technician>> {
        self.get_json(self.maintenance_url("maintenance/technicians"))
            .await
    }

    /// Create a ticket. The server assigns id, category and priority.
    pub async fn create_request(
        &self,
        payload: &CreateRequest,
    ) -> ClientResult<MaintenanceRequest> {
        self.post_json(self.maintenance_url("maintenance"), payload)
            .await
    }

    /// Update a ticket: bare status transition or assignment.
    pub async fn update_request(
        &self,
        id: i64,
        payload: &UpdateRequest,
    ) -> ClientResult<MaintenanceRequest> {
        self.put_json(self.maintenance_url(&format!("maintenance/{id}")), payload)
            .await
    }

    /// Delete a ticket. No specified flow calls this; it exists because
    /// the API exposes it.
    pub async fn delete_request(&self, id: i64) -> ClientResult<()> {
        let url = self.maintenance_url(&format!("maintenance/{id}"));
        debug!(%url, "DELETE");
        let response = self.authenticated(self.client.delete(&url)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_for(status, response).await);
        }
        Ok(())
    }

    // ========== User API ==========

    /// Fetch the full user directory from the user service.
    pub async fn list_users(&self) -> ClientResult<Vec<Technician>> {
        self.get_json(self.user_url("users")).await
    }

    // ========== Voice API ==========

    /// Upload one recorded audio clip and receive the interpreted turn.
    pub async fn voice_interact(
        &self,
        audio: Vec<u8>,
        mime: &str,
        conversation_id: Option<&str>,
    ) -> ClientResult<VoiceTurn> {
        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("recording.wav")
            .mime_str(mime)?;
        let mut form = reqwest::multipart::Form::new().part("audio", part);
        if let Some(id) = conversation_id {
            form = form.text("conversationId", id.to_string());
        }

        let url = self.maintenance_url("maintenance/voice/interact");
        debug!(%url, "POST multipart");
        let response = self
            .authenticated(self.client.post(&url).multipart(form))
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Send a typed assistant query, threading the conversation id.
    pub async fn voice_interact_text(&self, query: &VoiceTextQuery) -> ClientResult<VoiceTurn> {
        self.post_json(self.maintenance_url("maintenance/voice/interact-text"), query)
            .await
    }
}
