//! Administrator credential verification

use std::sync::Arc;

use async_trait::async_trait;
use civic_shared::config::AdminSettings;
use civic_shared::AppError;
use subtle::ConstantTimeEq;
use tracing::error;

use crate::password::PasswordService;

/// Decides whether an (identifier, secret) pair belongs to an administrator.
/// Implementations must not reveal which half was wrong.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, identifier: &str, secret: &str) -> bool;
}

/// Single administrator identity held in plain text.
#[derive(Debug, Clone)]
pub struct StaticCredentials {
    identifier: String,
    secret: String,
}

impl StaticCredentials {
    pub fn new(identifier: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            secret: secret.into(),
        }
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentials {
    async fn verify(&self, identifier: &str, secret: &str) -> bool {
        // constant time per half; only the lengths can leak
        let identifier_ok = identifier.as_bytes().ct_eq(self.identifier.as_bytes());
        let secret_ok = secret.as_bytes().ct_eq(self.secret.as_bytes());
        bool::from(identifier_ok & secret_ok)
    }
}

/// Single administrator identity with an Argon2 password hash.
#[derive(Debug, Clone)]
pub struct HashedCredentials {
    identifier: String,
    password_hash: Arc<str>,
}

impl HashedCredentials {
    pub fn new(identifier: impl Into<String>, password_hash: &str) -> Result<Self, AppError> {
        PasswordService::check_format(password_hash)
            .map_err(|e| AppError::InvalidConfig(format!("admin.password_hash: {}", e)))?;
        Ok(Self {
            identifier: identifier.into(),
            password_hash: Arc::from(password_hash),
        })
    }
}

#[async_trait]
impl CredentialVerifier for HashedCredentials {
    async fn verify(&self, identifier: &str, secret: &str) -> bool {
        let identifier_ok: bool = identifier.as_bytes().ct_eq(self.identifier.as_bytes()).into();
        let hash = self.password_hash.clone();
        let secret = secret.to_string();

        // Argon2 is deliberately slow, keep it off the async workers
        let secret_ok = tokio::task::spawn_blocking(move || PasswordService::verify(&secret, &hash))
            .await
            .map_err(|e| error!("Password verification task failed: {}", e))
            .and_then(|r| r.map_err(|e| error!("Password verification failed: {}", e)))
            .unwrap_or(false);

        identifier_ok & secret_ok
    }
}

/// Picks the verifier for the configured administrator. A hash wins over a
/// plain password when both are present.
pub fn from_settings(admin: &AdminSettings) -> Result<Arc<dyn CredentialVerifier>, AppError> {
    match (&admin.password_hash, &admin.password) {
        (Some(hash), _) => Ok(Arc::new(HashedCredentials::new(admin.email.clone(), hash)?)),
        (None, Some(password)) => Ok(Arc::new(StaticCredentials::new(
            admin.email.clone(),
            password.clone(),
        ))),
        (None, None) => Err(AppError::InvalidConfig(
            "one of admin.password or admin.password_hash must be set".into(),
        )),
    }
}
