use std::sync::Arc;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use tracing::info;

use ecclesia_domain::id::UserId;

use crate::domain::repository::{Clock, SettingsRepository, ThemeRepository};
use crate::domain::types::{ChurchSettings, SUPPORTED_LANGUAGES, ThemeColors};
use crate::error::PortalError;
use crate::settings::SettingsHandle;

const CHURCH_NAME_MAX_LEN: usize = 200;
const SLOGAN_MAX_LEN: usize = 500;
const PASTOR_NAME_MAX_LEN: usize = 200;
const PHONE_MAX_LEN: usize = 20;
const PLACE_MAX_LEN: usize = 100;

/// `#RRGGBB`, case-insensitive.
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].bytes().all(|b| b.is_ascii_hexdigit())
}

fn is_http_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn invalid(message: impl Into<String>) -> PortalError {
    PortalError::InvalidSettings(message.into())
}

// ── UpdateSettings ────────────────────────────────────────────────────────────

/// Every editable field; the request replaces them all.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSettingsInput {
    pub church_name: String,
    #[serde(default)]
    pub slogan: String,
    #[serde(default)]
    pub founded_date: Option<NaiveDate>,
    #[serde(default)]
    pub history: String,
    #[serde(default)]
    pub vision: String,
    #[serde(default)]
    pub mission: String,
    #[serde(default)]
    pub core_values: String,
    #[serde(default)]
    pub current_pastor: String,
    #[serde(default)]
    pub pastor_since: Option<NaiveDate>,
    #[serde(default)]
    pub pastor_bio: String,
    #[serde(default)]
    pub leadership_team: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub whatsapp: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub youtube: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub website: String,
    pub colors: ThemeColors,
    #[serde(default)]
    pub sunday_service_time: Option<NaiveTime>,
    #[serde(default)]
    pub wednesday_service_time: Option<NaiveTime>,
    #[serde(default)]
    pub friday_service_time: Option<NaiveTime>,
    #[serde(default)]
    pub custom_services: String,
    pub timezone: String,
    pub language: String,
    pub enable_whatsapp_notifications: bool,
    pub enable_email_notifications: bool,
}

impl UpdateSettingsInput {
    fn validate(&self) -> Result<(), PortalError> {
        let name = self.church_name.trim();
        if name.is_empty() {
            return Err(invalid("church_name is required"));
        }
        for (field, value, max) in [
            ("church_name", name, CHURCH_NAME_MAX_LEN),
            ("slogan", self.slogan.as_str(), SLOGAN_MAX_LEN),
            ("current_pastor", self.current_pastor.as_str(), PASTOR_NAME_MAX_LEN),
            ("phone", self.phone.as_str(), PHONE_MAX_LEN),
            ("whatsapp", self.whatsapp.as_str(), PHONE_MAX_LEN),
            ("city", self.city.as_str(), PLACE_MAX_LEN),
            ("country", self.country.as_str(), PLACE_MAX_LEN),
        ] {
            if value.chars().count() > max {
                return Err(invalid(format!("{field} is too long")));
            }
        }
        if !SUPPORTED_LANGUAGES.contains(&self.language.as_str()) {
            return Err(invalid(format!("unsupported language: {}", self.language)));
        }
        let c = &self.colors;
        for (field, value) in [
            ("primary", &c.primary),
            ("secondary", &c.secondary),
            ("accent", &c.accent),
            ("success", &c.success),
            ("danger", &c.danger),
            ("warning", &c.warning),
        ] {
            if !is_hex_color(value) {
                return Err(invalid(format!("{field} color must be #RRGGBB")));
            }
        }
        for (field, value) in [
            ("facebook", &self.facebook),
            ("instagram", &self.instagram),
            ("youtube", &self.youtube),
            ("twitter", &self.twitter),
            ("website", &self.website),
        ] {
            if !value.is_empty() && !is_http_url(value) {
                return Err(invalid(format!("{field} must be an http(s) URL")));
            }
        }
        Ok(())
    }

    fn into_settings(self, actor: UserId, now: DateTime<Utc>) -> ChurchSettings {
        ChurchSettings {
            church_name: self.church_name.trim().to_owned(),
            slogan: self.slogan,
            founded_date: self.founded_date,
            history: self.history,
            vision: self.vision,
            mission: self.mission,
            core_values: self.core_values,
            current_pastor: self.current_pastor,
            pastor_since: self.pastor_since,
            pastor_bio: self.pastor_bio,
            leadership_team: self.leadership_team,
            email: self.email,
            phone: self.phone,
            whatsapp: self.whatsapp,
            address: self.address,
            city: self.city,
            country: self.country,
            facebook: self.facebook,
            instagram: self.instagram,
            youtube: self.youtube,
            twitter: self.twitter,
            website: self.website,
            colors: self.colors,
            sunday_service_time: self.sunday_service_time,
            wednesday_service_time: self.wednesday_service_time,
            friday_service_time: self.friday_service_time,
            custom_services: self.custom_services,
            timezone: self.timezone,
            language: self.language,
            enable_whatsapp_notifications: self.enable_whatsapp_notifications,
            enable_email_notifications: self.enable_email_notifications,
            updated_at: now,
            updated_by: Some(actor),
        }
    }
}

pub struct UpdateSettingsUseCase<S, C>
where
    S: SettingsRepository,
    C: Clock,
{
    pub repo: S,
    pub handle: SettingsHandle,
    pub clock: C,
}

impl<S, C> UpdateSettingsUseCase<S, C>
where
    S: SettingsRepository,
    C: Clock,
{
    pub async fn execute(
        &self,
        actor: UserId,
        input: UpdateSettingsInput,
    ) -> Result<Arc<ChurchSettings>, PortalError> {
        input.validate()?;

        let guard = self.handle.lock_writes().await;
        let settings = input.into_settings(actor, self.clock.now());
        self.repo.save(&settings).await?;
        let settings = self.handle.replace(&guard, settings);
        info!(by = %actor, "church settings updated");
        Ok(settings)
    }
}

// ── ApplyTheme ────────────────────────────────────────────────────────────────

pub struct ApplyThemeUseCase<S, T, C>
where
    S: SettingsRepository,
    T: ThemeRepository,
    C: Clock,
{
    pub repo: S,
    pub themes: T,
    pub handle: SettingsHandle,
    pub clock: C,
}

impl<S, T, C> ApplyThemeUseCase<S, T, C>
where
    S: SettingsRepository,
    T: ThemeRepository,
    C: Clock,
{
    /// Copy the preset's primary, secondary and accent colors into the settings.
    pub async fn execute(
        &self,
        actor: UserId,
        theme_id: i32,
    ) -> Result<Arc<ChurchSettings>, PortalError> {
        let theme = self
            .themes
            .find_by_id(theme_id)
            .await?
            .ok_or(PortalError::ThemeNotFound)?;
        if !theme.is_active {
            return Err(PortalError::ThemeInactive);
        }

        let guard = self.handle.lock_writes().await;
        let mut settings = (*self.handle.current()).clone();
        settings.colors.primary = theme.primary_color;
        settings.colors.secondary = theme.secondary_color;
        settings.colors.accent = theme.accent_color;
        settings.updated_at = self.clock.now();
        settings.updated_by = Some(actor);

        self.repo.save(&settings).await?;
        let settings = self.handle.replace(&guard, settings);
        info!(by = %actor, theme = %theme.name, "theme applied");
        Ok(settings)
    }
}

// ── PreviewColors ─────────────────────────────────────────────────────────────

/// Colors to try out; missing ones keep their saved value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewColorsInput {
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
}

impl PreviewColorsInput {
    /// The saved palette with the overrides applied. Nothing is persisted.
    pub fn apply_to(self, saved: &ThemeColors) -> Result<ThemeColors, PortalError> {
        let pick = |field: &str, value: Option<String>, fallback: &String| match value {
            Some(v) if is_hex_color(&v) => Ok(v),
            Some(_) => Err(invalid(format!("{field} color must be #RRGGBB"))),
            None => Ok(fallback.clone()),
        };
        Ok(ThemeColors {
            primary: pick("primary", self.primary, &saved.primary)?,
            secondary: pick("secondary", self.secondary, &saved.secondary)?,
            accent: pick("accent", self.accent, &saved.accent)?,
            ..saved.clone()
        })
    }
}
