//! Server-side session record.
//!
//! A session carries three independent slots:
//!
//! | Slot | Set by | Cleared by |
//! |------|--------|------------|
//! | `user_id` | login, password-reset completion | logout |
//! | `reset_token` | reset code issuance | successful code verification, login |
//! | `reset_user_id` | successful code verification | password-reset completion, login |
//!
//! The reset slots are what let the three reset round-trips continue without
//! the user being logged in: step 2 needs `reset_token`, step 3 needs
//! `reset_user_id`, and neither can be forged from the client since only the
//! opaque session id travels in the cookie.

use std::fmt;

use ecclesia_domain::id::{ResetToken, UserId};
use rand::RngExt;
use serde::{Deserialize, Serialize};

/// Length of a generated session id.
pub const SESSION_ID_LEN: usize = 40;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Random identifier of a server-side session. This is the only value stored
/// in the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn generate() -> Self {
        let mut rng = rand::rng();
        let id = (0..SESSION_ID_LEN)
            .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
            .collect();
        Self(id)
    }

    /// Accept a cookie value only if it has the shape of a generated id.
    ///
    /// ```
    /// use ecclesia_auth_types::session::SessionId;
    ///
    /// let id = SessionId::generate();
    /// assert_eq!(SessionId::parse(id.as_str()), Some(id));
    /// assert_eq!(SessionId::parse("session:*"), None);
    /// ```
    pub fn parse(value: &str) -> Option<Self> {
        let well_formed =
            value.len() == SESSION_ID_LEN && value.bytes().all(|b| b.is_ascii_alphanumeric());
        well_formed.then(|| Self(value.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Contents of one server-side session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user_id: Option<UserId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reset_token: Option<ResetToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reset_user_id: Option<UserId>,
}

impl SessionData {
    /// Authenticated account, if any.
    pub fn user_id(&self) -> Option<UserId> {
        self.user_id
    }

    /// Authenticate as `user_id`. A reset pending in this session is abandoned.
    pub fn login(&mut self, user_id: UserId) {
        self.user_id = Some(user_id);
        self.reset_token = None;
        self.reset_user_id = None;
    }

    /// Drop every slot.
    pub fn logout(&mut self) {
        *self = Self::default();
    }

    /// Pending reset token, set after a code was issued.
    pub fn reset_token(&self) -> Option<ResetToken> {
        self.reset_token
    }

    pub fn bind_reset_token(&mut self, token: ResetToken) {
        self.reset_token = Some(token);
    }

    /// Account whose reset code was verified and who may now set a password.
    pub fn reset_user_id(&self) -> Option<UserId> {
        self.reset_user_id
    }

    /// Code verified: the token slot is consumed and the owner is bound.
    pub fn promote_reset(&mut self, user_id: UserId) {
        self.reset_token = None;
        self.reset_user_id = Some(user_id);
    }

    /// Password set: release the pending user and authenticate as them.
    pub fn complete_reset(&mut self) -> Option<UserId> {
        let user_id = self.reset_user_id.take()?;
        self.user_id = Some(user_id);
        Some(user_id)
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}
