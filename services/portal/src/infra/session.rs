use anyhow::Context as _;
use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;

use ecclesia_auth_types::session::{SessionData, SessionId};

use crate::domain::repository::SessionStore;
use crate::error::PortalError;

/// Sessions as JSON strings under `session:{id}`, expiring `ttl_secs` after
/// the last write.
#[derive(Clone)]
pub struct RedisSessionStore {
    pub pool: Pool,
    pub ttl_secs: u64,
}

fn session_key(id: &SessionId) -> String {
    format!("session:{id}")
}

impl SessionStore for RedisSessionStore {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionData>, PortalError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| PortalError::Internal(e.into()))?;
        let raw: Option<String> = conn
            .get(session_key(id))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| PortalError::Internal(e.into()))?;
        raw.map(|json| serde_json::from_str(&json).context("decode session record"))
            .transpose()
            .map_err(PortalError::from)
    }

    async fn save(&self, id: &SessionId, data: &SessionData) -> Result<(), PortalError> {
        let json = serde_json::to_string(data).context("encode session record")?;
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| PortalError::Internal(e.into()))?;
        let (): () = conn
            .set_ex(session_key(id), json, self.ttl_secs)
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| PortalError::Internal(e.into()))?;
        Ok(())
    }

    async fn delete(&self, id: &SessionId) -> Result<(), PortalError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| PortalError::Internal(e.into()))?;
        let _: i64 = conn
            .del(session_key(id))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| PortalError::Internal(e.into()))?;
        Ok(())
    }
}
