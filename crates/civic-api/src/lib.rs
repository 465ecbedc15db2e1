//! # Civic API
//!
//! HTTP surface of the admin session guard: login/logout handlers, the
//! `/admin` route guard, the session extractor and router assembly.

pub mod cookies;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod scope;
pub mod state;

pub use routes::{router, static_pages};
pub use state::AppState;
