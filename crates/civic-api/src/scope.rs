//! Which request paths the admin guard is responsible for

use civic_shared::config::GuardSettings;
use civic_shared::utils::{is_under_prefix, normalize_path};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    /// Outside the protected prefix, or an excluded asset path.
    Unprotected,
    /// The login page itself.
    Login,
    /// Anything else under the protected prefix.
    Protected,
}

#[derive(Debug, Clone)]
pub struct PathScope {
    protected_prefix: String,
    login_path: String,
    home_path: String,
    excluded_prefixes: Vec<String>,
}

impl PathScope {
    pub fn new(
        protected_prefix: impl Into<String>,
        login_path: impl Into<String>,
        home_path: impl Into<String>,
        excluded_prefixes: Vec<String>,
    ) -> Self {
        Self {
            protected_prefix: protected_prefix.into(),
            login_path: login_path.into(),
            home_path: home_path.into(),
            excluded_prefixes,
        }
    }

    pub fn from_settings(settings: &GuardSettings) -> Self {
        Self::new(
            settings.protected_prefix.clone(),
            settings.login_path.clone(),
            settings.home_path.clone(),
            settings.excluded_prefixes.clone(),
        )
    }

    pub fn login_path(&self) -> &str {
        &self.login_path
    }

    pub fn home_path(&self) -> &str {
        &self.home_path
    }

    /// Classifies a raw request path. The path is decoded and normalised
    /// first so that it names the same resource a file server would pick;
    /// one that cannot be decoded is treated as protected.
    pub fn classify(&self, raw_path: &str) -> PathKind {
        let Some(path) = normalize_path(raw_path) else {
            return PathKind::Protected;
        };
        let path = path.as_str();

        if !is_under_prefix(path, &self.protected_prefix) {
            return PathKind::Unprotected;
        }
        if self
            .excluded_prefixes
            .iter()
            .any(|excluded| is_under_prefix(path, excluded))
        {
            return PathKind::Unprotected;
        }
        if path.trim_end_matches('/') == self.login_path.trim_end_matches('/') {
            return PathKind::Login;
        }
        PathKind::Protected
    }
}

impl Default for PathScope {
    fn default() -> Self {
        Self::from_settings(&GuardSettings::default())
    }
}
