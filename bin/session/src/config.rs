//! Configuration for the session tool.
//!
//! Loaded via the `config` crate from `TRAINING_HUB__*` environment
//! variables, e.g. `TRAINING_HUB__STORAGE__BASE_URL` or
//! `TRAINING_HUB__AUTH__ENABLE_ADMIN_LOGIN=true`.
//!
//! See [`AuthConfig`](training_hub_platform_access::AuthConfig) for the auth
//! settings.

use serde::Deserialize;
use training_hub_core::RuntimeOrigin;
use training_hub_platform_access::AuthConfig;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TRAINING_HUB";

/// Tool configuration composed from library configs.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Origin the application is served from. Relative URLs resolve against it.
    #[serde(default)]
    pub app_origin: Option<RuntimeOrigin>,

    /// Record storage configuration.
    #[serde(default)]
    pub storage: StorageConfig,

    /// SSO auth configuration.
    #[serde(default)]
    pub auth: AuthConfig,
}

/// Record-storage configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// Storage base URL as deployed: absolute, relative, or empty for the origin.
    #[serde(default)]
    pub base_url: String,
}

impl AppConfig {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is present but invalid.
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::from_source(config::Environment::with_prefix(ENV_PREFIX))
    }

    fn from_source(environment: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(environment.separator("__").try_parsing(true))
            .build()?
            .try_deserialize()
    }
}
