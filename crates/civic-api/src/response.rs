//! API Response wrapper

use chrono::DateTime;
use civic_security::SessionClaims;
use serde::Serialize;

/// Body of every admin auth endpoint: `{"ok": bool, "error"?: string}`.
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session: Option<SessionInfo>,
}

#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub email: String,
    pub role: String,
    pub expires_at: String,
}

impl From<&SessionClaims> for SessionInfo {
    fn from(claims: &SessionClaims) -> Self {
        Self {
            email: claims.sub.clone(),
            role: claims.role.clone(),
            expires_at: DateTime::from_timestamp(claims.exp, 0)
                .map(|dt| dt.to_rfc3339())
                .unwrap_or_default(),
        }
    }
}

impl ApiResponse {
    pub fn success() -> Self {
        Self {
            ok: true,
            error: None,
            session: None,
        }
    }

    pub fn error(message: &str) -> Self {
        Self {
            ok: false,
            error: Some(message.to_string()),
            session: None,
        }
    }

    pub fn with_session(claims: &SessionClaims) -> Self {
        Self {
            session: Some(claims.into()),
            ..Self::success()
        }
    }
}
