use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::CookieJar;

use ecclesia_auth_types::cookie;
use ecclesia_domain::capability::{Capability, CapabilitySet};
use ecclesia_domain::id::UserId;

use crate::domain::repository::{AccountRepository, SessionStore};
use crate::domain::types::Account;
use crate::error::PortalError;
use crate::state::AppState;

/// Authenticated, active account behind the session cookie. Capabilities are
/// computed once here and checked by handlers with [`CurrentUser::require`].
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub account: Account,
    pub capabilities: CapabilitySet,
}

impl CurrentUser {
    pub fn new(account: Account) -> Self {
        let capabilities = account.capabilities();
        Self {
            account,
            capabilities,
        }
    }

    pub fn id(&self) -> UserId {
        self.account.id
    }

    pub fn require(&self, capability: Capability) -> Result<(), PortalError> {
        if self.capabilities.contains(capability) {
            Ok(())
        } else {
            Err(PortalError::Forbidden)
        }
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = PortalError;

    // Same shape as the other extractors in the workspace: read headers
    // synchronously, then return an owned future.
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let session_id = cookie::session_id(&CookieJar::from_headers(&parts.headers));
        let store = state.session_store();
        let accounts = state.account_repo();

        async move {
            let session_id = session_id.ok_or(PortalError::Unauthenticated)?;
            let user_id = store
                .load(&session_id)
                .await?
                .and_then(|data| data.user_id())
                .ok_or(PortalError::Unauthenticated)?;
            let account = accounts
                .find_by_id(user_id)
                .await?
                .filter(|a| a.is_active)
                .ok_or(PortalError::Unauthenticated)?;
            Ok(Self::new(account))
        }
    }
}
