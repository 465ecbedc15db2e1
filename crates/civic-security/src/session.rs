//! Admin session issuance and validation
//!
//! [`SessionService`] is the single place that decides whether a session
//! token is good. The route guard and the handler extractor both call
//! [`SessionService::validate`], so they cannot drift apart.

use std::sync::Arc;

use civic_shared::config::{SessionSettings, SigningMode};
use civic_shared::constants::ADMIN_ROLE;
use civic_shared::AppError;
use rand::Rng;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::clock::Clock;
use crate::jwt::{JwtError, SessionClaims, TokenCodec};

/// A freshly minted session.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub token: String,
    pub claims: SessionClaims,
}

#[derive(Clone)]
pub struct SessionService {
    codec: TokenCodec,
    clock: Arc<dyn Clock>,
    ttl_seconds: i64,
}

impl SessionService {
    pub fn new(codec: TokenCodec, clock: Arc<dyn Clock>, ttl_seconds: i64) -> Self {
        Self {
            codec,
            clock,
            ttl_seconds,
        }
    }

    /// Builds the service from configuration. Signed mode without a secret
    /// falls back to a random per-process key outside production, which
    /// logs everybody out on restart.
    pub fn from_settings(
        settings: &SessionSettings,
        production: bool,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let codec = match (settings.signing, settings.secret.as_deref()) {
            (SigningMode::None, _) => {
                warn!("Admin session tokens are unsigned; any client can forge a session");
                TokenCodec::unsigned()
            }
            (SigningMode::Hs256, Some(secret)) if !secret.is_empty() => {
                TokenCodec::hs256(secret.as_bytes())
            }
            (SigningMode::Hs256, _) if production => return Err(AppError::MissingSessionSecret),
            (SigningMode::Hs256, _) => {
                warn!("No session secret configured, using an ephemeral one");
                let secret: [u8; 32] = rand::rng().random();
                TokenCodec::hs256(&secret)
            }
        };

        Ok(Self::new(codec, clock, settings.ttl_seconds))
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub fn is_signed(&self) -> bool {
        self.codec.is_signed()
    }

    /// Mints a token for `subject`, valid for the configured TTL.
    pub fn issue(&self, subject: &str) -> Result<IssuedSession, JwtError> {
        let now = self.clock.now_secs();
        let claims = SessionClaims {
            sub: subject.to_string(),
            role: ADMIN_ROLE.to_string(),
            iat: now,
            exp: now + self.ttl_seconds,
            jti: Some(Uuid::new_v4().to_string()),
        };
        let token = self.codec.encode(&claims)?;
        Ok(IssuedSession { token, claims })
    }

    /// Returns the claims of a well-formed, fresh (and, when signing is on,
    /// authentic) token. Every failure collapses to `None`.
    pub fn validate(&self, token: &str) -> Option<SessionClaims> {
        match self.codec.decode(token, self.clock.now_secs()) {
            Ok(claims) => Some(claims),
            Err(e) => {
                debug!("Session token rejected: {}", e);
                None
            }
        }
    }
}
