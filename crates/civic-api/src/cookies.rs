//! Admin session cookie

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use civic_shared::AppConfig;
use time::Duration;

/// Name and attributes of the session cookie.
#[derive(Debug, Clone)]
pub struct SessionCookies {
    name: String,
    max_age_seconds: i64,
    secure: bool,
}

impl SessionCookies {
    pub fn new(name: impl Into<String>, max_age_seconds: i64, secure: bool) -> Self {
        Self {
            name: name.into(),
            max_age_seconds,
            secure,
        }
    }

    /// `Secure` is only set in production so plain-http development works.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.session.cookie_name.clone(),
            config.session.ttl_seconds,
            config.is_production(),
        )
    }

    /// Token carried by the request, if any.
    pub fn token<'a>(&self, jar: &'a CookieJar) -> Option<&'a str> {
        jar.get(&self.name)
            .map(|cookie| cookie.value())
            .filter(|value| !value.is_empty())
    }

    pub fn session(&self, token: String) -> Cookie<'static> {
        Cookie::build((self.name.clone(), token))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .max_age(Duration::seconds(self.max_age_seconds))
            .secure(self.secure)
            .build()
    }

    /// Expired, empty cookie that makes the browser drop the session.
    pub fn removal(&self) -> Cookie<'static> {
        let mut cookie = Cookie::build((self.name.clone(), ""))
            .http_only(true)
            .same_site(SameSite::Lax)
            .path("/")
            .secure(self.secure)
            .build();
        cookie.make_removal();
        cookie
    }

    /// Always emits a removal `Set-Cookie`, whether or not the request had one.
    pub fn clear(&self, jar: CookieJar) -> CookieJar {
        jar.add(self.removal())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_cookie_attributes() {
        let cookies = SessionCookies::new("admin_session", 86_400, false);
        let rendered = cookies.session("tok".into()).to_string();

        assert!(rendered.starts_with("admin_session=tok"));
        assert!(rendered.contains("HttpOnly"));
        assert!(rendered.contains("SameSite=Lax"));
        assert!(rendered.contains("Path=/"));
        assert!(rendered.contains("Max-Age=86400"));
        assert!(!rendered.contains("Secure"));
    }

    #[test]
    fn test_secure_flag_in_production() {
        let cookies = SessionCookies::new("admin_session", 86_400, true);
        assert!(cookies.session("tok".into()).to_string().contains("Secure"));
    }

    #[test]
    fn test_removal_cookie_expires_immediately() {
        let cookies = SessionCookies::new("admin_session", 86_400, false);
        let rendered = cookies.removal().to_string();

        assert!(rendered.starts_with("admin_session=;"));
        assert!(rendered.contains("Max-Age=0"));
        assert!(rendered.contains("Path=/"));
    }

    #[test]
    fn test_empty_cookie_counts_as_absent() {
        let cookies = SessionCookies::new("admin_session", 86_400, false);
        let jar = CookieJar::new().add(Cookie::new("admin_session", ""));
        assert_eq!(cookies.token(&jar), None);

        let jar = CookieJar::new().add(Cookie::new("admin_session", "abc"));
        assert_eq!(cookies.token(&jar), Some("abc"));
    }
}
