use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub environment: Environment,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: Environment::default(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Mount the account, provider and client routes
    #[serde(default = "default_auth_enabled")]
    pub enabled: bool,
    /// Fixed session lifetime, counted from login
    #[serde(default = "default_session_ttl_hours")]
    pub session_ttl_hours: i64,
    /// How often expired sessions are swept from the store
    #[serde(default = "default_session_sweep_interval")]
    pub session_sweep_interval_secs: u64,
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// Force the `Secure` cookie flag outside production
    #[serde(default)]
    pub secure_cookie: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: default_auth_enabled(),
            session_ttl_hours: default_session_ttl_hours(),
            session_sweep_interval_secs: default_session_sweep_interval(),
            cookie_name: default_cookie_name(),
            secure_cookie: false,
        }
    }
}

fn default_auth_enabled() -> bool {
    true
}

fn default_session_ttl_hours() -> i64 {
    24
}

fn default_session_sweep_interval() -> u64 {
    3600
}

fn default_cookie_name() -> String {
    "handyfix.sid".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_seed_sample_data")]
    pub seed_sample_data: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            seed_sample_data: default_seed_sample_data(),
        }
    }
}

fn default_seed_sample_data() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            info!("Loading configuration from {}", path.display());
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            Self::from_toml(&content)
        } else {
            info!("No config file found, using defaults");
            Ok(Config::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config =
            toml::from_str(content).with_context(|| "Failed to parse configuration file")?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would break logins at runtime
    pub fn validate(&self) -> Result<()> {
        let hours = self.auth.session_ttl_hours;
        if hours <= 0 || chrono::Duration::try_hours(hours).is_none() {
            bail!("auth.session_ttl_hours must be a positive number of hours, got {}", hours);
        }

        let name = &self.auth.cookie_name;
        if name.is_empty() || !name.chars().all(is_cookie_name_char) {
            bail!("auth.cookie_name {:?} is not a valid cookie name", name);
        }

        Ok(())
    }

    /// Whether session cookies carry the `Secure` attribute
    pub fn secure_cookies(&self) -> bool {
        self.auth.secure_cookie || self.server.environment == Environment::Production
    }

    pub fn session_ttl(&self) -> chrono::Duration {
        chrono::Duration::try_hours(self.auth.session_ttl_hours)
            .filter(|ttl| *ttl > chrono::Duration::zero())
            .unwrap_or_else(|| chrono::Duration::hours(default_session_ttl_hours()))
    }
}

/// RFC 6265 token characters
fn is_cookie_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || "!#$%&'*+-.^_`|~".contains(c)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            auth: AuthConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}
