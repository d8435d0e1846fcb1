use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use uuid::Uuid;

use ecclesia_domain::id::{ResetToken, UserId};
use ecclesia_domain::user::Role;
use ecclesia_portal::domain::repository::{
    AccountRepository, Clock, PasswordHasher, ResetChallengeRepository, ResetCodeGenerator,
    ResetNotifier, SettingsRepository, ThemeRepository,
};
use ecclesia_portal::domain::types::{
    Account, AccountProfile, ChurchSettings, ResetChallenge, ThemePreset,
};
use ecclesia_portal::error::PortalError;

// ── MockAccountRepo ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockAccountRepo {
    pub accounts: Arc<Mutex<Vec<Account>>>,
}

impl MockAccountRepo {
    pub fn new(accounts: Vec<Account>) -> Self {
        Self {
            accounts: Arc::new(Mutex::new(accounts)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Returns a shared handle to the account list for post-execution inspection.
    pub fn accounts_handle(&self) -> Arc<Mutex<Vec<Account>>> {
        Arc::clone(&self.accounts)
    }

    pub fn get(&self, id: UserId) -> Account {
        self.accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .expect("account exists")
    }

    fn modify(&self, id: UserId, f: impl FnOnce(&mut Account)) -> Result<(), PortalError> {
        let mut accounts = self.accounts.lock().unwrap();
        match accounts.iter_mut().find(|a| a.id == id) {
            Some(account) => {
                f(account);
                Ok(())
            }
            None => Err(PortalError::Internal(anyhow::anyhow!("no row for {id}"))),
        }
    }
}

impl AccountRepository for MockAccountRepo {
    async fn find_active_by_email(&self, email: &str) -> Result<Option<Account>, PortalError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.email == email && a.is_active)
            .cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, PortalError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.username == username)
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, PortalError> {
        Ok(self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create(&self, account: &Account) -> Result<(), PortalError> {
        let mut accounts = self.accounts.lock().unwrap();
        if accounts.iter().any(|a| a.username == account.username) {
            return Err(PortalError::UsernameTaken);
        }
        accounts.push(account.clone());
        Ok(())
    }

    async fn update_profile(
        &self,
        id: UserId,
        profile: &AccountProfile,
    ) -> Result<(), PortalError> {
        let p = profile.clone();
        self.modify(id, |a| {
            a.first_name = p.first_name;
            a.last_name = p.last_name;
            a.email = p.email;
            a.phone = p.phone;
        })
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<(), PortalError> {
        self.modify(id, |a| a.password_hash = password_hash.to_owned())
    }

    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> Result<(), PortalError> {
        self.modify(id, |a| a.last_login = Some(at))
    }

    async fn update_role(&self, id: UserId, role: Role) -> Result<(), PortalError> {
        self.modify(id, |a| a.role = role)
    }

    async fn set_active(&self, id: UserId, is_active: bool) -> Result<(), PortalError> {
        self.modify(id, |a| a.is_active = is_active)
    }

    async fn set_validated(&self, id: UserId, is_validated: bool) -> Result<(), PortalError> {
        self.modify(id, |a| a.is_validated = is_validated)
    }
}

// ── MockResetChallengeRepo ───────────────────────────────────────────────────

/// In-memory challenges with the same conditional-update semantics as the
/// database adapter.
#[derive(Clone, Default)]
pub struct MockResetChallengeRepo {
    pub challenges: Arc<Mutex<Vec<ResetChallenge>>>,
}

impl MockResetChallengeRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn challenges_handle(&self) -> Arc<Mutex<Vec<ResetChallenge>>> {
        Arc::clone(&self.challenges)
    }

    pub fn only(&self) -> ResetChallenge {
        let challenges = self.challenges.lock().unwrap();
        assert_eq!(challenges.len(), 1, "expected exactly one challenge");
        challenges[0].clone()
    }
}

impl ResetChallengeRepository for MockResetChallengeRepo {
    async fn replace_for_user(&self, challenge: &ResetChallenge) -> Result<(), PortalError> {
        let mut challenges = self.challenges.lock().unwrap();
        challenges.retain(|c| c.user_id != challenge.user_id);
        challenges.push(challenge.clone());
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: ResetToken,
    ) -> Result<Option<ResetChallenge>, PortalError> {
        Ok(self
            .challenges
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.token == token)
            .cloned())
    }

    async fn record_failed_attempt(&self, id: Uuid) -> Result<Option<u16>, PortalError> {
        let mut challenges = self.challenges.lock().unwrap();
        Ok(challenges
            .iter_mut()
            .find(|c| c.id == id && !c.used && c.attempts < c.max_attempts)
            .map(|c| {
                c.attempts += 1;
                c.attempts
            }))
    }

    async fn mark_used(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, PortalError> {
        let mut challenges = self.challenges.lock().unwrap();
        match challenges
            .iter_mut()
            .find(|c| c.id == id && c.is_usable(now))
        {
            Some(c) => {
                c.used = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ── MockNotifier ─────────────────────────────────────────────────────────────

/// Records `(recipient email, code)` for every delivery.
#[derive(Clone, Default)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<(String, String)>>>,
    pub fail: bool,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl ResetNotifier for MockNotifier {
    async fn send_reset_code(&self, recipient: &Account, code: &str) -> Result<(), PortalError> {
        if self.fail {
            return Err(PortalError::Internal(anyhow::anyhow!("smtp unavailable")));
        }
        self.sent
            .lock()
            .unwrap()
            .push((recipient.email.clone(), code.to_owned()));
        Ok(())
    }
}

// ── Codes, hashing, clock ────────────────────────────────────────────────────

pub struct FixedCode(pub &'static str);

impl ResetCodeGenerator for FixedCode {
    fn generate(&self) -> String {
        self.0.to_owned()
    }
}

/// Reversible stand-in for bcrypt: `hashed:{password}`.
#[derive(Clone, Copy)]
pub struct MockHasher;

impl PasswordHasher for MockHasher {
    async fn hash(&self, password: &str) -> Result<String, PortalError> {
        Ok(format!("hashed:{password}"))
    }

    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PortalError> {
        Ok(hash == format!("hashed:{password}"))
    }
}

/// Clock frozen at a settable instant. Clones share the instant.
#[derive(Clone)]
pub struct FixedClock {
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl FixedClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Arc::new(Mutex::new(now)),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// ── MockSettingsRepo / MockThemeRepo ─────────────────────────────────────────

/// Settings row. `save` commits immediately, then waits for the next queued
/// delay (if any) before returning, like a slow round-trip after commit.
#[derive(Clone, Default)]
pub struct MockSettingsRepo {
    pub row: Arc<Mutex<Option<ChurchSettings>>>,
    save_delays: Arc<Mutex<VecDeque<std::time::Duration>>>,
}

impl MockSettingsRepo {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn row_handle(&self) -> Arc<Mutex<Option<ChurchSettings>>> {
        Arc::clone(&self.row)
    }

    /// The n-th `save` call sleeps `delays[n]` after committing.
    pub fn with_save_delays(self, delays: impl IntoIterator<Item = std::time::Duration>) -> Self {
        self.save_delays.lock().unwrap().extend(delays);
        self
    }
}

impl SettingsRepository for MockSettingsRepo {
    async fn get_or_create(&self) -> Result<ChurchSettings, PortalError> {
        let mut row = self.row.lock().unwrap();
        Ok(row
            .get_or_insert_with(|| ChurchSettings::defaults(t0()))
            .clone())
    }

    async fn save(&self, settings: &ChurchSettings) -> Result<(), PortalError> {
        *self.row.lock().unwrap() = Some(settings.clone());
        let delay = self.save_delays.lock().unwrap().pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        Ok(())
    }
}

pub struct MockThemeRepo {
    pub themes: Vec<ThemePreset>,
}

impl MockThemeRepo {
    pub fn new(themes: Vec<ThemePreset>) -> Self {
        Self { themes }
    }
}

impl ThemeRepository for MockThemeRepo {
    async fn list(&self) -> Result<Vec<ThemePreset>, PortalError> {
        Ok(self.themes.clone())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ThemePreset>, PortalError> {
        Ok(self.themes.iter().find(|t| t.id == id).cloned())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap()
}

pub fn test_account() -> Account {
    Account {
        id: UserId(Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap()),
        username: "mdiallo".to_owned(),
        email: "m.diallo@example.com".to_owned(),
        first_name: "Moussa".to_owned(),
        last_name: "Diallo".to_owned(),
        phone: None,
        password_hash: "hashed:old-password".to_owned(),
        role: Role::Member,
        is_superuser: false,
        is_active: true,
        is_validated: true,
        last_login: Some(t0() - Duration::days(3)),
        created_at: t0() - Duration::days(30),
        updated_at: t0() - Duration::days(30),
    }
}

pub fn test_admin() -> Account {
    Account {
        id: UserId(Uuid::parse_str("00000000-0000-0000-0000-0000000000ad").unwrap()),
        username: "admin".to_owned(),
        email: "admin@example.com".to_owned(),
        role: Role::Admin,
        ..test_account()
    }
}

pub fn test_theme(id: i32, is_active: bool) -> ThemePreset {
    ThemePreset {
        id,
        name: format!("Theme {id}"),
        description: String::new(),
        primary_color: "#0F766E".to_owned(),
        secondary_color: "#115E59".to_owned(),
        accent_color: "#F97316".to_owned(),
        is_active,
    }
}
