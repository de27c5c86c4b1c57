//! Client configuration

/// Environment variable for the user-service base URL.
pub const ENV_USER_SERVICE_URL: &str = "HOMEGENIE_USER_SERVICE_URL";
/// Environment variable for the maintenance-service base URL.
pub const ENV_MAINTENANCE_SERVICE_URL: &str = "HOMEGENIE_MAINTENANCE_SERVICE_URL";

const DEFAULT_USER_BASE: &str = "http://localhost:8081/api";
const DEFAULT_MAINTENANCE_BASE: &str = "http://localhost:8082/api";

/// Client configuration for connecting to the HomeGenie services.
///
/// Auth lives on the user service, everything else on the maintenance
/// service; the two are deployed separately and configured separately.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// User service base URL (auth, user directory)
    pub user_base_url: String,

    /// Maintenance service base URL (tickets, statistics, voice)
    pub maintenance_base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new configuration with explicit base URLs
    pub fn new(user_base_url: impl Into<String>, maintenance_base_url: impl Into<String>) -> Self {
        Self {
            user_base_url: user_base_url.into(),
            maintenance_base_url: maintenance_base_url.into(),
            timeout: 30,
        }
    }

    /// Load base URLs from the environment, falling back to the local
    /// development ports.
    pub fn from_env() -> Self {
        let user = std::env::var(ENV_USER_SERVICE_URL)
            .unwrap_or_else(|_| DEFAULT_USER_BASE.to_string());
        let maintenance = std::env::var(ENV_MAINTENANCE_SERVICE_URL)
            .unwrap_or_else(|_| DEFAULT_MAINTENANCE_BASE.to_string());
        Self::new(user, maintenance)
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_USER_BASE, DEFAULT_MAINTENANCE_BASE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_services() {
        let config = ClientConfig::default();
        assert_eq!(config.user_base_url, "http://localhost:8081/api");
        assert_eq!(config.maintenance_base_url, "http://localhost:8082/api");
        assert_eq!(config.timeout, 30);
    }
}
