// ============================================================================
// Civic API - Admin Auth Handlers
// File: crates/civic-api/src/handlers/auth.rs
// ============================================================================
//! Admin login, logout and session introspection

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use civic_shared::utils::mask_email;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::extract::AdminSession;
use crate::response::ApiResponse;
use crate::state::AppState;

/// Login request payload
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(alias = "identifier")]
    pub email: String,
    #[serde(alias = "secret")]
    pub password: String,
}

/// Login handler - POST /api/admin/login
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<ApiResponse>), ApiError> {
    let Json(payload) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if !state
        .credentials
        .verify(&payload.email, &payload.password)
        .await
    {
        warn!("Admin login failed for {}", mask_email(&payload.email));
        return Err(ApiError::InvalidCredentials);
    }

    let issued = state
        .sessions
        .issue(&payload.email)
        .map_err(|e| ApiError::InternalError(e.to_string()))?;

    info!(
        jti = issued.claims.jti.as_deref().unwrap_or_default(),
        exp = issued.claims.exp,
        "Admin login succeeded for {}",
        mask_email(&payload.email)
    );

    Ok((
        jar.add(state.cookies.session(issued.token)),
        Json(ApiResponse::success()),
    ))
}

/// Logout handler - POST /api/admin/logout
///
/// Sessions live only in the cookie, so dropping it is all there is to do.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Json<ApiResponse>) {
    (state.cookies.clear(jar), Json(ApiResponse::success()))
}

/// Current session - GET /api/admin/session
pub async fn session(AdminSession(claims): AdminSession) -> Json<ApiResponse> {
    Json(ApiResponse::with_session(&claims))
}
