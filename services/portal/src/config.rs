use serde::Deserialize;

use ecclesia_core::config::Config;

/// Portal configuration, read from environment variables of the same name in
/// upper case (`database_url` ← `DATABASE_URL`).
#[derive(Debug, Deserialize)]
pub struct PortalConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL for sessions.
    pub redis_url: String,
    /// Domain attribute of the session cookie.
    pub cookie_domain: String,
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    /// Sender of reset-code e-mails.
    #[serde(default = "default_mail_from")]
    pub mail_from: String,
    /// TCP port to listen on.
    #[serde(default = "default_portal_port")]
    pub portal_port: u16,
    /// Sliding lifetime of a server-side session (two weeks by default).
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

fn default_smtp_port() -> u16 {
    587
}

fn default_mail_from() -> String {
    "noreply@egliselagrace.com".to_owned()
}

fn default_portal_port() -> u16 {
    3120
}

fn default_session_ttl_secs() -> u64 {
    14 * 24 * 60 * 60
}

impl Config for PortalConfig {}
