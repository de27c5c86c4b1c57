//! Session store
//!
//! Holds the authenticated identity for the lifetime of the session and
//! persists it through a swappable storage port, so a reload (or a test)
//! can hydrate without re-authenticating. Absence or corruption of the
//! persisted payload is treated as logged out.

use std::path::PathBuf;
use std::sync::{Mutex, RwLock};

use serde_json::Value;
use shared::{AuthUser, LoginRequest, RegisterRequest};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;

/// Well-known key the identity is persisted under.
pub const SESSION_KEY: &str = "homegenieUser";

/// Session error type
#[derive(Debug, Error)]
pub enum SessionError {
    /// Bad credentials or rejected registration, with the server's message
    #[error("{0}")]
    Auth(String),

    /// Transport failure talking to the auth endpoint
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Persisted payload could not be encoded/decoded
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Storage backend failure
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Storage port for the persisted identity.
///
/// One opaque string under one well-known key; the in-memory backend
/// substitutes for browser local storage in tests.
pub trait SessionStorage: Send + Sync {
    fn read(&self) -> Option<String>;
    fn write(&self, raw: &str) -> Result<(), SessionError>;
    fn clear(&self);
}

/// File-backed session storage (JSON file on disk).
#[derive(Debug)]
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Storage under `dir`, named after the well-known session key.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir.into().join(format!("{SESSION_KEY}.json")))
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl SessionStorage for FileSessionStorage {
    fn read(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn write(&self, raw: &str) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, raw)?;
        Ok(())
    }

    fn clear(&self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

/// In-memory session storage for tests.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    raw: Mutex<Option<String>>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seeded storage, for hydrate-on-startup tests.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Mutex::new(Some(raw.into())),
        }
    }
}

impl SessionStorage for MemorySessionStorage {
    fn read(&self) -> Option<String> {
        self.raw.lock().unwrap().clone()
    }

    fn write(&self, raw: &str) -> Result<(), SessionError> {
        *self.raw.lock().unwrap() = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) {
        *self.raw.lock().unwrap() = None;
    }
}

/// Session store: exclusive owner of the authenticated identity.
///
/// Written only by login/register/logout; read by every outbound call
/// through [`current_user`](Self::current_user) snapshots.
pub struct SessionStore {
    storage: Box<dyn SessionStorage>,
    current: RwLock<Option<AuthUser>>,
    http: reqwest::Client,
    user_base_url: String,
}

impl SessionStore {
    pub fn new(config: &ClientConfig, storage: Box<dyn SessionStorage>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            storage,
            current: RwLock::new(None),
            http,
            user_base_url: config.user_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Hydrate the identity from storage.
    ///
    /// Returns the restored identity, or `None` when storage is empty or
    /// the payload does not parse (the corrupt payload is dropped).
    pub fn restore(&self) -> Option<AuthUser> {
        let raw = self.storage.read()?;
        match serde_json::from_str::<AuthUser>(&raw) {
            Ok(user) => {
                debug!(user_id = user.user_id, role = %user.role, "session restored");
                *self.current.write().unwrap() = Some(user.clone());
                Some(user)
            }
            Err(err) => {
                warn!(%err, "discarding unparseable session payload");
                self.storage.clear();
                None
            }
        }
    }

    /// Authenticate against the user service and persist the identity.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthUser, SessionError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let url = format!("{}/auth/login", self.user_base_url);
        let response = self.http.post(&url).json(&body).send().await?;
        self.finish_auth(response, "Invalid credentials").await
    }

    /// Create an account and persist the returned identity.
    pub async fn register(&self, profile: &RegisterRequest) -> Result<AuthUser, SessionError> {
        let url = format!("{}/auth/register", self.user_base_url);
        let response = self.http.post(&url).json(profile).send().await?;
        self.finish_auth(response, "Registration failed").await
    }

    /// Clear the persisted and in-memory identity.
    pub fn logout(&self) {
        info!("logging out");
        self.storage.clear();
        *self.current.write().unwrap() = None;
    }

    /// Snapshot of the held identity.
    pub fn current_user(&self) -> Option<AuthUser> {
        self.current.read().unwrap().clone()
    }

    async fn finish_auth(
        &self,
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<AuthUser, SessionError> {
        if !response.status().is_success() {
            let message = response
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v.get("message").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| fallback.to_string());
            return Err(SessionError::Auth(message));
        }

        let user: AuthUser = response.json().await?;
        self.storage.write(&serde_json::to_string(&user)?)?;
        info!(user_id = user.user_id, role = %user.role, "session established");
        *self.current.write().unwrap() = Some(user.clone());
        Ok(user)
    }
}
