use std::sync::Arc;

use civic_security::{credentials, Clock, CredentialVerifier, SessionService};
use civic_shared::{AppConfig, AppError};

use crate::cookies::SessionCookies;
use crate::scope::PathScope;

/// Shared by the guard and the handlers. Immutable after startup.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionService,
    pub credentials: Arc<dyn CredentialVerifier>,
    pub cookies: SessionCookies,
    pub scope: Arc<PathScope>,
}

impl AppState {
    pub fn new(
        sessions: SessionService,
        credentials: Arc<dyn CredentialVerifier>,
        cookies: SessionCookies,
        scope: PathScope,
    ) -> Self {
        Self {
            sessions,
            credentials,
            cookies,
            scope: Arc::new(scope),
        }
    }

    pub fn from_config(config: &AppConfig, clock: Arc<dyn Clock>) -> Result<Self, AppError> {
        let sessions =
            SessionService::from_settings(&config.session, config.is_production(), clock)?;
        let credentials = credentials::from_settings(&config.admin)?;

        Ok(Self::new(
            sessions,
            credentials,
            SessionCookies::from_config(config),
            PathScope::from_settings(&config.guard),
        ))
    }
}
