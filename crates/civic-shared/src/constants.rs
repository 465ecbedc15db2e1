//! Application-wide constants

pub const DEFAULT_SESSION_COOKIE: &str = "admin_session";
pub const DEFAULT_SESSION_TTL_SECONDS: i64 = 24 * 60 * 60;
pub const ADMIN_ROLE: &str = "admin";

pub const DEFAULT_PROTECTED_PREFIX: &str = "/admin";
pub const DEFAULT_LOGIN_PATH: &str = "/admin/login";
pub const DEFAULT_HOME_PATH: &str = "/admin";
pub const DEFAULT_EXCLUDED_PREFIXES: &[&str] = &["/admin/_next", "/admin/static", "/admin/favicon.ico"];

pub const ENV_PRODUCTION: &str = "production";
pub const ENV_DEVELOPMENT: &str = "development";
