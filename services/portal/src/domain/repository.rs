#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use rand::RngExt;
use uuid::Uuid;

use ecclesia_auth_types::session::{SessionData, SessionId};
use ecclesia_domain::id::{ResetToken, UserId};
use ecclesia_domain::user::Role;

use crate::domain::types::{
    Account, AccountProfile, ChurchSettings, RESET_CODE_MAX, RESET_CODE_MIN, ResetChallenge,
    ThemePreset,
};
use crate::error::PortalError;

/// Source of the current instant. Injected so expiry can be tested at exact boundaries.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of reset codes.
pub trait ResetCodeGenerator: Send + Sync {
    /// A six-digit numeric code.
    fn generate(&self) -> String;
}

/// Uniform random code in `[RESET_CODE_MIN, RESET_CODE_MAX]`.
#[derive(Clone, Copy, Default)]
pub struct RandomResetCode;

impl ResetCodeGenerator for RandomResetCode {
    fn generate(&self) -> String {
        rand::rng()
            .random_range(RESET_CODE_MIN..=RESET_CODE_MAX)
            .to_string()
    }
}

/// Repository for portal accounts.
pub trait AccountRepository: Send + Sync {
    /// First active account with this email. Duplicates are tolerated; the
    /// oldest account wins.
    async fn find_active_by_email(&self, email: &str) -> Result<Option<Account>, PortalError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, PortalError>;

    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, PortalError>;

    /// Insert a new account. A username already in use is `UsernameTaken`.
    async fn create(&self, account: &Account) -> Result<(), PortalError>;

    async fn update_profile(&self, id: UserId, profile: &AccountProfile)
    -> Result<(), PortalError>;

    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<(), PortalError>;

    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> Result<(), PortalError>;

    async fn update_role(&self, id: UserId, role: Role) -> Result<(), PortalError>;

    async fn set_active(&self, id: UserId, is_active: bool) -> Result<(), PortalError>;

    async fn set_validated(&self, id: UserId, is_validated: bool) -> Result<(), PortalError>;
}

/// Repository for password-reset challenges.
pub trait ResetChallengeRepository: Send + Sync {
    /// Delete every challenge of the owner, then insert the new one (same transaction).
    async fn replace_for_user(&self, challenge: &ResetChallenge) -> Result<(), PortalError>;

    async fn find_by_token(&self, token: ResetToken)
    -> Result<Option<ResetChallenge>, PortalError>;

    /// Atomically count one failed attempt while the challenge is unused and
    /// below its ceiling. Returns the new attempt count, or `None` if the
    /// condition no longer held (used or exhausted concurrently).
    async fn record_failed_attempt(&self, id: Uuid) -> Result<Option<u16>, PortalError>;

    /// Atomically mark the challenge used while it is still usable at `now`.
    /// Returns `false` if another request won the race or it became unusable.
    async fn mark_used(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, PortalError>;
}

/// Out-of-band delivery of reset codes.
pub trait ResetNotifier: Send + Sync {
    /// Send the code to the account's address. An `Err` means nothing was sent.
    async fn send_reset_code(&self, recipient: &Account, code: &str) -> Result<(), PortalError>;
}

/// One-way password hashing used for every stored credential.
pub trait PasswordHasher: Send + Sync {
    async fn hash(&self, password: &str) -> Result<String, PortalError>;

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PortalError>;
}

/// Server-side session storage.
pub trait SessionStore: Send + Sync {
    async fn load(&self, id: &SessionId) -> Result<Option<SessionData>, PortalError>;

    /// Write the record and refresh its time-to-live.
    async fn save(&self, id: &SessionId, data: &SessionData) -> Result<(), PortalError>;

    async fn delete(&self, id: &SessionId) -> Result<(), PortalError>;
}

/// Persistence of the settings row.
pub trait SettingsRepository: Send + Sync {
    /// Load the settings row, inserting defaults if it does not exist yet.
    async fn get_or_create(&self) -> Result<ChurchSettings, PortalError>;

    async fn save(&self, settings: &ChurchSettings) -> Result<(), PortalError>;
}

pub trait ThemeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<ThemePreset>, PortalError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<ThemePreset>, PortalError>;
}
