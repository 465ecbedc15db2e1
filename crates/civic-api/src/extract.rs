//! Handler-level access to the admin session

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;
use civic_security::SessionClaims;

use crate::error::ApiError;
use crate::state::AppState;

/// Validated admin session of the current request.
///
/// Behind the route guard the claims are already in the request extensions.
/// Elsewhere (the JSON API lives outside `/admin`) the cookie is checked
/// again through the same [`civic_security::SessionService`]. A rejected
/// cookie is removed in the 401 response.
#[derive(Debug, Clone)]
pub struct AdminSession(pub SessionClaims);

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        if let Some(claims) = parts.extensions.get::<SessionClaims>() {
            return Ok(AdminSession(claims.clone()));
        }

        let jar = CookieJar::from_headers(&parts.headers);
        let Some(token) = state.cookies.token(&jar) else {
            return Err(ApiError::Unauthorized("no session cookie".into()).into_response());
        };

        match state.sessions.validate(token) {
            Some(claims) => Ok(AdminSession(claims)),
            None => Err((
                state.cookies.clear(jar),
                ApiError::Unauthorized("invalid session cookie".into()),
            )
                .into_response()),
        }
    }
}
