//! Configuration management

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::constants::*;
use crate::error::AppError;
use crate::utils::is_under_prefix;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub session: SessionSettings,
    pub guard: GuardSettings,
    pub admin: AdminSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    pub static_dir: String,
}

/// How session tokens are protected against tampering.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SigningMode {
    /// HMAC-SHA256 signature, verified on every request.
    #[default]
    Hs256,
    /// Legacy unsigned tokens: empty signature, only expiry is checked.
    None,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionSettings {
    pub cookie_name: String,
    pub ttl_seconds: i64,
    #[serde(default)]
    pub signing: SigningMode,
    #[serde(default)]
    pub secret: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GuardSettings {
    pub protected_prefix: String,
    pub login_path: String,
    pub home_path: String,
    #[serde(default)]
    pub excluded_prefixes: Vec<String>,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AdminSettings {
    pub email: String,
    #[serde(default)]
    pub password: Option<String>,
    /// Argon2 PHC string. Takes precedence over `password`.
    #[serde(default)]
    pub password_hash: Option<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            env: ENV_DEVELOPMENT.to_string(),
            host: "127.0.0.1".to_string(),
            port: 8080,
            name: "civic-server".to_string(),
            static_dir: "static".to_string(),
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_SESSION_COOKIE.to_string(),
            ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            signing: SigningMode::default(),
            secret: None,
        }
    }
}

impl Default for GuardSettings {
    fn default() -> Self {
        Self {
            protected_prefix: DEFAULT_PROTECTED_PREFIX.to_string(),
            login_path: DEFAULT_LOGIN_PATH.to_string(),
            home_path: DEFAULT_HOME_PATH.to_string(),
            excluded_prefixes: DEFAULT_EXCLUDED_PREFIXES.iter().map(|p| p.to_string()).collect(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| ENV_DEVELOPMENT.into());
        let defaults = AppConfig::default();
        let config = Config::builder()
            .set_default("app.env", env.clone())?
            .set_default("app.host", defaults.app.host)?
            .set_default("app.port", i64::from(defaults.app.port))?
            .set_default("app.name", defaults.app.name)?
            .set_default("app.static_dir", defaults.app.static_dir)?
            .set_default("session.cookie_name", defaults.session.cookie_name)?
            .set_default("session.ttl_seconds", defaults.session.ttl_seconds)?
            .set_default("session.signing", "hs256")?
            .set_default("guard.protected_prefix", defaults.guard.protected_prefix)?
            .set_default("guard.login_path", defaults.guard.login_path)?
            .set_default("guard.home_path", defaults.guard.home_path)?
            .set_default("guard.excluded_prefixes", defaults.guard.excluded_prefixes)?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(
                Environment::with_prefix("CIVIC")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("guard.excluded_prefixes"),
            )
            .build()?;

        let config: AppConfig = config.try_deserialize()?;
        config.validate()?;
        tracing::debug!(env = %config.app.env, signing = ?config.session.signing, "Configuration loaded");
        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.app.env.eq_ignore_ascii_case(ENV_PRODUCTION)
    }

    /// Rejects settings the guard cannot work with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.admin.email.trim().is_empty() {
            return Err(AppError::InvalidConfig("admin.email must be set".into()));
        }
        if self.admin.password.is_none() && self.admin.password_hash.is_none() {
            return Err(AppError::InvalidConfig(
                "one of admin.password or admin.password_hash must be set".into(),
            ));
        }
        if self.session.ttl_seconds <= 0 {
            return Err(AppError::InvalidConfig("session.ttl_seconds must be positive".into()));
        }
        if self.session.cookie_name.trim().is_empty() {
            return Err(AppError::InvalidConfig("session.cookie_name must be set".into()));
        }

        let prefix = &self.guard.protected_prefix;
        if !prefix.starts_with('/') {
            return Err(AppError::InvalidConfig(format!(
                "guard.protected_prefix must start with '/': {}",
                prefix
            )));
        }
        for (key, path) in [
            ("guard.login_path", &self.guard.login_path),
            ("guard.home_path", &self.guard.home_path),
        ] {
            if !is_under_prefix(path, prefix) {
                return Err(AppError::InvalidConfig(format!(
                    "{} must be under {}: {}",
                    key, prefix, path
                )));
            }
        }
        if self.guard.login_path == self.guard.home_path {
            return Err(AppError::InvalidConfig(
                "guard.login_path and guard.home_path must differ".into(),
            ));
        }

        if self.session.signing == SigningMode::Hs256
            && self.is_production()
            && self.session.secret.as_deref().map_or(true, |s| s.is_empty())
        {
            return Err(AppError::MissingSessionSecret);
        }

        Ok(())
    }
}
