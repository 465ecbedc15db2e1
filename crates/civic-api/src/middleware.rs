// ============================================================================
// Civic API - Admin Route Guard
// File: crates/civic-api/src/middleware.rs
// ============================================================================
//! Route guard for the admin area
//!
//! Runs on every request. Paths outside the protected prefix pass straight
//! through. The login page bounces visitors who already hold a valid
//! session; every other protected path requires one. Absent and invalid
//! sessions get the same redirect so the response never tells a client
//! whether its cookie was missing or rejected.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use civic_security::SessionClaims;
use tracing::debug;

use crate::scope::PathKind;
use crate::state::AppState;

/// Outcome of the guard for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Forward,
    /// Forward and hand the validated claims to the handler.
    ForwardWithSession(SessionClaims),
    RedirectHome,
    RedirectToLogin { clear_cookie: bool },
}

impl GuardDecision {
    /// `had_cookie` is whether the request carried a session cookie at all;
    /// `claims` is the result of validating it.
    pub fn evaluate(kind: PathKind, had_cookie: bool, claims: Option<SessionClaims>) -> Self {
        match (kind, claims) {
            (PathKind::Unprotected, _) => GuardDecision::Forward,
            (PathKind::Login, Some(_)) => GuardDecision::RedirectHome,
            (PathKind::Login, None) => GuardDecision::Forward,
            (PathKind::Protected, Some(claims)) => GuardDecision::ForwardWithSession(claims),
            (PathKind::Protected, None) => GuardDecision::RedirectToLogin {
                clear_cookie: had_cookie,
            },
        }
    }
}

pub async fn admin_guard(State(state): State<AppState>, mut request: Request, next: Next) -> Response {
    let kind = state.scope.classify(request.uri().path());
    if kind == PathKind::Unprotected {
        return next.run(request).await;
    }

    let jar = CookieJar::from_headers(request.headers());
    let token = state.cookies.token(&jar);
    let claims = token.and_then(|token| state.sessions.validate(token));
    let decision = GuardDecision::evaluate(kind, token.is_some(), claims);

    debug!(path = %request.uri().path(), ?kind, decision = decision_name(&decision), "Admin guard");

    match decision {
        GuardDecision::Forward => next.run(request).await,
        GuardDecision::ForwardWithSession(claims) => {
            request.extensions_mut().insert(claims);
            next.run(request).await
        }
        GuardDecision::RedirectHome => Redirect::temporary(state.scope.home_path()).into_response(),
        GuardDecision::RedirectToLogin { clear_cookie } => {
            let redirect = Redirect::temporary(state.scope.login_path());
            if clear_cookie {
                (state.cookies.clear(jar), redirect).into_response()
            } else {
                redirect.into_response()
            }
        }
    }
}

fn decision_name(decision: &GuardDecision) -> &'static str {
    match decision {
        GuardDecision::Forward => "forward",
        GuardDecision::ForwardWithSession(_) => "forward_with_session",
        GuardDecision::RedirectHome => "redirect_home",
        GuardDecision::RedirectToLogin { .. } => "redirect_login",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claims() -> SessionClaims {
        SessionClaims {
            sub: "admin@civic.test".into(),
            role: "admin".into(),
            iat: 0,
            exp: 10,
            jti: None,
        }
    }

    #[test]
    fn test_unprotected_paths_ignore_the_session() {
        assert_eq!(
            GuardDecision::evaluate(PathKind::Unprotected, false, None),
            GuardDecision::Forward
        );
        assert_eq!(
            GuardDecision::evaluate(PathKind::Unprotected, true, Some(claims())),
            GuardDecision::Forward
        );
    }

    #[test]
    fn test_login_path() {
        assert_eq!(
            GuardDecision::evaluate(PathKind::Login, true, Some(claims())),
            GuardDecision::RedirectHome
        );
        assert_eq!(
            GuardDecision::evaluate(PathKind::Login, true, None),
            GuardDecision::Forward
        );
        assert_eq!(
            GuardDecision::evaluate(PathKind::Login, false, None),
            GuardDecision::Forward
        );
    }

    #[test]
    fn test_protected_path() {
        assert_eq!(
            GuardDecision::evaluate(PathKind::Protected, true, Some(claims())),
            GuardDecision::ForwardWithSession(claims())
        );
        assert_eq!(
            GuardDecision::evaluate(PathKind::Protected, false, None),
            GuardDecision::RedirectToLogin { clear_cookie: false }
        );
        assert_eq!(
            GuardDecision::evaluate(PathKind::Protected, true, None),
            GuardDecision::RedirectToLogin { clear_cookie: true }
        );
    }
}
