//! Cookie builders for the session id.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

use crate::session::SessionId;

/// Cookie name for the session id.
pub const ECCLESIA_SESSION: &str = "ecclesia_session";

/// Read and validate the session id from the jar.
pub fn session_id(jar: &CookieJar) -> Option<SessionId> {
    jar.get(ECCLESIA_SESSION)
        .and_then(|c| SessionId::parse(c.value()))
}

/// Set the session cookie on the jar.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use ecclesia_auth_types::cookie::{set_session_cookie, ECCLESIA_SESSION};
/// use ecclesia_auth_types::session::SessionId;
///
/// let id = SessionId::generate();
/// let jar = set_session_cookie(CookieJar::new(), &id, "example.com".to_string(), 3600);
/// let cookie = jar.get(ECCLESIA_SESSION).unwrap();
/// assert_eq!(cookie.value(), id.as_str());
/// assert_eq!(cookie.path(), Some("/"));
/// assert_eq!(cookie.domain(), Some("example.com"));
/// assert_eq!(cookie.max_age(), Some(time::Duration::seconds(3600)));
/// assert!(cookie.http_only().unwrap_or(false));
/// assert!(cookie.secure().unwrap_or(false));
/// ```
pub fn set_session_cookie(
    jar: CookieJar,
    id: &SessionId,
    domain: String,
    max_age_secs: u64,
) -> CookieJar {
    let cookie = Cookie::build((ECCLESIA_SESSION, id.as_str().to_owned()))
        .path("/")
        .domain(domain)
        .max_age(Duration::seconds(max_age_secs as i64))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}

/// Expire the session cookie by setting Max-Age to 0.
///
/// ```
/// use axum_extra::extract::cookie::CookieJar;
/// use ecclesia_auth_types::cookie::{clear_session_cookie, set_session_cookie, ECCLESIA_SESSION};
/// use ecclesia_auth_types::session::SessionId;
///
/// let jar = set_session_cookie(CookieJar::new(), &SessionId::generate(), "example.com".to_string(), 60);
/// let jar = clear_session_cookie(jar, "example.com".to_string());
/// let cookie = jar.get(ECCLESIA_SESSION).unwrap();
/// assert_eq!(cookie.max_age(), Some(time::Duration::ZERO));
/// assert_eq!(cookie.value(), "");
/// ```
pub fn clear_session_cookie(jar: CookieJar, domain: String) -> CookieJar {
    let cookie = Cookie::build((ECCLESIA_SESSION, ""))
        .path("/")
        .domain(domain)
        .max_age(Duration::ZERO)
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
        .build();
    jar.add(cookie)
}
