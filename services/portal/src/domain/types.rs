use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ecclesia_domain::capability::CapabilitySet;
use ecclesia_domain::id::{ResetToken, UserId};
use ecclesia_domain::user::Role;

/// Portal account as seen by the account and reset use cases.
#[derive(Debug, Clone)]
pub struct Account {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: Role,
    pub is_superuser: bool,
    pub is_active: bool,
    pub is_validated: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::for_account(self.role, self.is_superuser)
    }

    pub fn profile(&self) -> AccountProfile {
        AccountProfile {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

/// The part of an account its owner may edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountProfile {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
}

/// One issued password-reset code.
///
/// The code is stored and compared as plaintext. Only the token is ever
/// handed to the client.
#[derive(Debug, Clone)]
pub struct ResetChallenge {
    pub id: Uuid,
    pub user_id: UserId,
    pub code: String,
    pub token: ResetToken,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub attempts: u16,
    pub max_attempts: u16,
    pub used: bool,
}

impl ResetChallenge {
    pub fn issue(user_id: UserId, code: String, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            code,
            token: ResetToken::generate(),
            created_at: now,
            expires_at: now + Duration::minutes(RESET_CODE_TTL_MINUTES),
            attempts: 0,
            max_attempts: RESET_MAX_ATTEMPTS,
            used: false,
        }
    }

    /// `now` equal to `expires_at` is still in time.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= self.max_attempts
    }

    pub fn is_usable(&self, now: DateTime<Utc>) -> bool {
        !self.used && !self.is_exhausted() && !self.is_expired(now)
    }

    pub fn remaining_attempts(&self) -> u16 {
        self.max_attempts.saturating_sub(self.attempts)
    }
}

/// Organization-wide settings. One instance per deployment.
///
/// Multi-line text fields (`leadership_team`, `custom_services`) hold one
/// entry per line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurchSettings {
    pub church_name: String,
    pub slogan: String,
    pub founded_date: Option<NaiveDate>,
    pub history: String,
    pub vision: String,
    pub mission: String,
    pub core_values: String,
    pub current_pastor: String,
    pub pastor_since: Option<NaiveDate>,
    pub pastor_bio: String,
    pub leadership_team: String,
    pub email: String,
    pub phone: String,
    pub whatsapp: String,
    pub address: String,
    pub city: String,
    pub country: String,
    pub facebook: String,
    pub instagram: String,
    pub youtube: String,
    pub twitter: String,
    pub website: String,
    pub colors: ThemeColors,
    pub sunday_service_time: Option<NaiveTime>,
    pub wednesday_service_time: Option<NaiveTime>,
    pub friday_service_time: Option<NaiveTime>,
    pub custom_services: String,
    pub timezone: String,
    pub language: String,
    pub enable_whatsapp_notifications: bool,
    pub enable_email_notifications: bool,
    #[serde(serialize_with = "ecclesia_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
    pub updated_by: Option<UserId>,
}

impl ChurchSettings {
    pub fn defaults(now: DateTime<Utc>) -> Self {
        Self {
            church_name: "Église Manager".to_owned(),
            slogan: String::new(),
            founded_date: None,
            history: String::new(),
            vision: String::new(),
            mission: String::new(),
            core_values: String::new(),
            current_pastor: String::new(),
            pastor_since: None,
            pastor_bio: String::new(),
            leadership_team: String::new(),
            email: String::new(),
            phone: String::new(),
            whatsapp: String::new(),
            address: String::new(),
            city: String::new(),
            country: "Niger".to_owned(),
            facebook: String::new(),
            instagram: String::new(),
            youtube: String::new(),
            twitter: String::new(),
            website: String::new(),
            colors: ThemeColors::default(),
            sunday_service_time: None,
            wednesday_service_time: None,
            friday_service_time: None,
            custom_services: String::new(),
            timezone: "Africa/Niamey".to_owned(),
            language: "fr".to_owned(),
            enable_whatsapp_notifications: true,
            enable_email_notifications: true,
            updated_at: now,
            updated_by: None,
        }
    }

    /// CSS custom properties for the configured palette.
    pub fn colors_css(&self) -> String {
        self.colors.to_css()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeColors {
    pub primary: String,
    pub secondary: String,
    pub accent: String,
    pub success: String,
    pub danger: String,
    pub warning: String,
}

impl ThemeColors {
    /// `:root` block with one `--color-*` property per color.
    pub fn to_css(&self) -> String {
        format!(
            ":root {{\n    --color-primary: {};\n    --color-secondary: {};\n    --color-accent: {};\n    --color-success: {};\n    --color-danger: {};\n    --color-warning: {};\n}}\n",
            self.primary, self.secondary, self.accent, self.success, self.danger, self.warning
        )
    }
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            primary: "#4F46E5".to_owned(),
            secondary: "#7C3AED".to_owned(),
            accent: "#F59E0B".to_owned(),
            success: "#10B981".to_owned(),
            danger: "#EF4444".to_owned(),
            warning: "#F59E0B".to_owned(),
        }
    }
}

/// Predefined palette; applying it overwrites primary, secondary and accent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemePreset {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub primary_color: String,
    pub secondary_color: String,
    pub accent_color: String,
    pub is_active: bool,
}

/// Languages the portal is translated into.
pub const SUPPORTED_LANGUAGES: [&str; 2] = ["fr", "en"];

/// Reset code time-to-live in minutes.
pub const RESET_CODE_TTL_MINUTES: i64 = 10;

/// Wrong submissions allowed per reset code.
pub const RESET_MAX_ATTEMPTS: u16 = 5;

/// Inclusive bounds of a generated reset code (always six digits).
pub const RESET_CODE_MIN: u32 = 100_000;
pub const RESET_CODE_MAX: u32 = 999_999;

/// Minimum accepted password length.
pub const PASSWORD_MIN_LEN: usize = 8;
