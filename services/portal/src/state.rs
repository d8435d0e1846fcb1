use axum_extra::extract::cookie::CookieJar;
use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use ecclesia_auth_types::cookie::{clear_session_cookie, set_session_cookie};

use crate::error::PortalError;
use crate::infra::db::{
    DbAccountRepository, DbResetChallengeRepository, DbSettingsRepository, DbThemeRepository,
};
use crate::infra::hashing::BcryptHasher;
use crate::infra::mail::SmtpResetNotifier;
use crate::infra::session::RedisSessionStore;
use crate::session::Session;
use crate::settings::SettingsHandle;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub mailer: SmtpResetNotifier,
    pub hasher: BcryptHasher,
    pub settings: SettingsHandle,
    pub cookie_domain: String,
    pub session_ttl_secs: u64,
}

impl AppState {
    pub fn account_repo(&self) -> DbAccountRepository {
        DbAccountRepository {
            db: self.db.clone(),
        }
    }

    pub fn reset_challenge_repo(&self) -> DbResetChallengeRepository {
        DbResetChallengeRepository {
            db: self.db.clone(),
        }
    }

    pub fn settings_repo(&self) -> DbSettingsRepository {
        DbSettingsRepository {
            db: self.db.clone(),
        }
    }

    pub fn theme_repo(&self) -> DbThemeRepository {
        DbThemeRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_store(&self) -> RedisSessionStore {
        RedisSessionStore {
            pool: self.redis.clone(),
            ttl_secs: self.session_ttl_secs,
        }
    }

    pub async fn load_session(&self, jar: &CookieJar) -> Result<Session, PortalError> {
        Session::load(&self.session_store(), jar).await
    }

    /// Persist the session and (re)issue its cookie, refreshing both lifetimes.
    pub async fn commit_session(
        &self,
        mut session: Session,
        jar: CookieJar,
    ) -> Result<CookieJar, PortalError> {
        session.save(&self.session_store()).await?;
        Ok(set_session_cookie(
            jar,
            session.id(),
            self.cookie_domain.clone(),
            self.session_ttl_secs,
        ))
    }

    pub async fn end_session(
        &self,
        session: Session,
        jar: CookieJar,
    ) -> Result<CookieJar, PortalError> {
        session.destroy(&self.session_store()).await?;
        Ok(clear_session_cookie(jar, self.cookie_domain.clone()))
    }
}
