use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    #[serde(default)]
    pub auth: AuthSettings,
    pub firestore: FirestoreSettings,
    #[serde(default)]
    pub collection: CollectionSettings,
    #[serde(default)]
    pub sessions: SessionSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthSettings {
    /// Static bearer token for the admin routes. Provisioned externally;
    /// an empty value locks the admin surface.
    #[serde(default)]
    pub admin_token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FirestoreSettings {
    #[serde(default = "default_firestore_base_url")]
    pub base_url: String,
    pub project_id: String,
    pub api_key: String,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_firestore_base_url() -> String {
    "https://firestore.googleapis.com/v1".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize)]
pub struct CollectionSettings {
    #[serde(default = "default_properties_collection")]
    pub properties: String,
    #[serde(default = "default_requests_collection")]
    pub search_requests: String,
    #[serde(default = "default_settings_collection")]
    pub settings: String,
    /// Document id of the single settings blob inside the settings collection.
    #[serde(default = "default_settings_doc")]
    pub settings_doc: String,
}

fn default_properties_collection() -> String { "properties".to_string() }
fn default_requests_collection() -> String { "encargos".to_string() }
fn default_settings_collection() -> String { "settings".to_string() }
fn default_settings_doc() -> String { "general".to_string() }

impl Default for CollectionSettings {
    fn default() -> Self {
        Self {
            properties: default_properties_collection(),
            search_requests: default_requests_collection(),
            settings: default_settings_collection(),
            settings_doc: default_settings_doc(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_ttl")]
    pub ttl_secs: u64,
    #[serde(default = "default_session_capacity")]
    pub max_capacity: u64,
}

fn default_session_ttl() -> u64 { 1800 }
fn default_session_capacity() -> u64 { 10_000 }

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_session_ttl(),
            max_capacity: default_session_capacity(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "default".to_string() }

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Environment variables (prefixed with FINCA_)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            // Add default config file
            .add_source(File::with_name("config/default").required(false))
            // Add local config file (for development overrides)
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables (prefixed with FINCA_)
            // e.g., FINCA_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FINCA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        // Substitute environment variables for the externally provisioned
        // credentials, e.g. FIRESTORE_API_KEY without the config prefix
        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FINCA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Substitute well-known environment variables into config values.
/// Bare names (FIRESTORE_API_KEY, FIRESTORE_PROJECT_ID, ADMIN_TOKEN) win
/// over the prefixed form so deploy targets can keep their existing secrets.
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("FIRESTORE_API_KEY")
        .or_else(|_| env::var("FINCA_FIRESTORE__API_KEY"))
        .ok();
    let project_id = env::var("FIRESTORE_PROJECT_ID")
        .or_else(|_| env::var("FINCA_FIRESTORE__PROJECT_ID"))
        .ok();
    let admin_token = env::var("ADMIN_TOKEN")
        .or_else(|_| env::var("FINCA_AUTH__ADMIN_TOKEN"))
        .ok();

    let mut builder = Config::builder().add_source(settings);

    if let Some(api_key) = api_key {
        builder = builder.set_override("firestore.api_key", api_key)?;
    }
    if let Some(project_id) = project_id {
        builder = builder.set_override("firestore.project_id", project_id)?;
    }
    if let Some(admin_token) = admin_token {
        builder = builder.set_override("auth.admin_token", admin_token)?;
    }

    builder.build()
}
