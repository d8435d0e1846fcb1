//! Server-side session bound to the request's cookie.

use axum_extra::extract::cookie::CookieJar;

use ecclesia_auth_types::cookie;
use ecclesia_auth_types::session::{SessionData, SessionId};

use crate::domain::repository::SessionStore;
use crate::error::PortalError;

/// A loaded (or freshly started) session. Nothing is written back until
/// [`Session::save`] is called, so a failing handler leaves storage as it was.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    stored: bool,
    pub data: SessionData,
}

impl Session {
    /// Resolve the cookie to a stored record. A missing, malformed or
    /// unknown cookie starts an empty session under a new id.
    pub async fn load<S: SessionStore>(store: &S, jar: &CookieJar) -> Result<Self, PortalError> {
        let Some(id) = cookie::session_id(jar) else {
            return Ok(Self::fresh());
        };
        match store.load(&id).await? {
            Some(data) => Ok(Self {
                id,
                stored: true,
                data,
            }),
            None => Ok(Self::fresh()),
        }
    }

    pub fn fresh() -> Self {
        Self {
            id: SessionId::generate(),
            stored: false,
            data: SessionData::default(),
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Whether a record for this id existed when the session was loaded.
    pub fn is_stored(&self) -> bool {
        self.stored
    }

    /// Move the data to a new id, deleting the old record. Called whenever
    /// the session becomes authenticated.
    pub async fn cycle_id<S: SessionStore>(&mut self, store: &S) -> Result<(), PortalError> {
        let old = std::mem::replace(&mut self.id, SessionId::generate());
        if self.stored {
            store.delete(&old).await?;
            self.stored = false;
        }
        Ok(())
    }

    pub async fn save<S: SessionStore>(&mut self, store: &S) -> Result<(), PortalError> {
        store.save(&self.id, &self.data).await?;
        self.stored = true;
        Ok(())
    }

    pub async fn destroy<S: SessionStore>(self, store: &S) -> Result<(), PortalError> {
        if self.stored {
            store.delete(&self.id).await?;
        }
        Ok(())
    }
}
