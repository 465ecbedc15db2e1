use std::path::Path;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::{
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};

use crate::handlers::{auth, health};
use crate::middleware::admin_guard;
use crate::state::AppState;

/// Builds the application router.
///
/// `pages` carries whatever serves the admin area (static files in the
/// server binary, stub handlers in tests). The guard wraps everything, and
/// decides per path whether it applies.
pub fn router(state: AppState, pages: Router) -> Router {
    let api_routes = Router::new()
        .route("/api/admin/login", post(auth::login))
        .route("/api/admin/logout", post(auth::logout))
        .route("/api/admin/session", get(auth::session))
        .with_state(state.clone());

    Router::new()
        .route("/health", get(health::health_check))
        .merge(api_routes)
        .merge(pages)
        .layer(middleware::from_fn_with_state(state, admin_guard))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::default()))
}

/// Static admin UI under `static_dir/admin`.
///
/// Only the two pages and the `static/` asset folder are mounted, each at a
/// fixed route under `/admin`. Nothing is served from a catch-all, so a file
/// is only reachable through a path the guard has already classified.
pub fn static_pages(static_dir: impl AsRef<Path>) -> Router {
    let admin_dir = static_dir.as_ref().join("admin");
    Router::new()
        .route_service("/admin", ServeFile::new(admin_dir.join("index.html")))
        .route_service("/admin/login", ServeFile::new(admin_dir.join("login.html")))
        .nest_service("/admin/static", ServeDir::new(admin_dir.join("static")))
}
