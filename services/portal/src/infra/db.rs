use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ActiveValue::Set, ColumnTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, SqlErr, TransactionTrait,
};
use uuid::Uuid;

use ecclesia_domain::id::{ResetToken, UserId};
use ecclesia_domain::user::Role;
use ecclesia_portal_schema::{church_settings, reset_challenges, theme_presets, users};

use crate::domain::repository::{
    AccountRepository, ResetChallengeRepository, SettingsRepository, ThemeRepository,
};
use crate::domain::types::{
    Account, AccountProfile, ChurchSettings, ResetChallenge, ThemeColors, ThemePreset,
};
use crate::error::PortalError;

/// Primary key of the only settings row.
const SETTINGS_ROW_ID: i32 = 1;

// ── Account repository ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAccountRepository {
    pub db: DatabaseConnection,
}

impl AccountRepository for DbAccountRepository {
    async fn find_active_by_email(&self, email: &str) -> Result<Option<Account>, PortalError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .filter(users::Column::IsActive.eq(true))
            .order_by_asc(users::Column::CreatedAt)
            .one(&self.db)
            .await
            .context("find active account by email")?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<Account>, PortalError> {
        let model = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
            .context("find account by username")?;
        model.map(account_from_model).transpose()
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<Account>, PortalError> {
        let model = users::Entity::find_by_id(id.0)
            .one(&self.db)
            .await
            .context("find account by id")?;
        model.map(account_from_model).transpose()
    }

    async fn create(&self, account: &Account) -> Result<(), PortalError> {
        let a = account.clone();
        let inserted = users::ActiveModel {
            id: Set(a.id.0),
            username: Set(a.username),
            email: Set(a.email),
            first_name: Set(a.first_name),
            last_name: Set(a.last_name),
            phone: Set(a.phone),
            password_hash: Set(a.password_hash),
            role: Set(a.role.as_str().to_owned()),
            is_superuser: Set(a.is_superuser),
            is_active: Set(a.is_active),
            is_validated: Set(a.is_validated),
            last_login: Set(a.last_login),
            created_at: Set(a.created_at),
            updated_at: Set(a.updated_at),
        }
        .insert(&self.db)
        .await;
        match inserted {
            Ok(_) => Ok(()),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                Err(PortalError::UsernameTaken)
            }
            Err(e) => Err(anyhow::Error::new(e).context("create account").into()),
        }
    }

    async fn update_profile(
        &self,
        id: UserId,
        profile: &AccountProfile,
    ) -> Result<(), PortalError> {
        let p = profile.clone();
        users::ActiveModel {
            id: Set(id.0),
            first_name: Set(p.first_name),
            last_name: Set(p.last_name),
            email: Set(p.email),
            phone: Set(p.phone),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update profile")?;
        Ok(())
    }

    async fn update_password(&self, id: UserId, password_hash: &str) -> Result<(), PortalError> {
        users::ActiveModel {
            id: Set(id.0),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update password")?;
        Ok(())
    }

    async fn record_login(&self, id: UserId, at: DateTime<Utc>) -> Result<(), PortalError> {
        users::ActiveModel {
            id: Set(id.0),
            last_login: Set(Some(at)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("record login")?;
        Ok(())
    }

    async fn update_role(&self, id: UserId, role: Role) -> Result<(), PortalError> {
        users::ActiveModel {
            id: Set(id.0),
            role: Set(role.as_str().to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update role")?;
        Ok(())
    }

    async fn set_active(&self, id: UserId, is_active: bool) -> Result<(), PortalError> {
        users::ActiveModel {
            id: Set(id.0),
            is_active: Set(is_active),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set account active flag")?;
        Ok(())
    }

    async fn set_validated(&self, id: UserId, is_validated: bool) -> Result<(), PortalError> {
        users::ActiveModel {
            id: Set(id.0),
            is_validated: Set(is_validated),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set account validated flag")?;
        Ok(())
    }
}

fn account_from_model(model: users::Model) -> Result<Account, PortalError> {
    let role: Role = model
        .role
        .parse()
        .with_context(|| format!("account {} has unknown role", model.id))?;
    Ok(Account {
        id: UserId(model.id),
        username: model.username,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        phone: model.phone,
        password_hash: model.password_hash,
        role,
        is_superuser: model.is_superuser,
        is_active: model.is_active,
        is_validated: model.is_validated,
        last_login: model.last_login,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Reset challenge repository ────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbResetChallengeRepository {
    pub db: DatabaseConnection,
}

impl ResetChallengeRepository for DbResetChallengeRepository {
    async fn replace_for_user(&self, challenge: &ResetChallenge) -> Result<(), PortalError> {
        let challenge = challenge.clone();
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                Box::pin(async move {
                    reset_challenges::Entity::delete_many()
                        .filter(reset_challenges::Column::UserId.eq(challenge.user_id.0))
                        .exec(txn)
                        .await?;
                    reset_challenges::ActiveModel {
                        id: Set(challenge.id),
                        user_id: Set(challenge.user_id.0),
                        code: Set(challenge.code),
                        token: Set(challenge.token.0),
                        created_at: Set(challenge.created_at),
                        expires_at: Set(challenge.expires_at),
                        attempts: Set(challenge.attempts as i16),
                        max_attempts: Set(challenge.max_attempts as i16),
                        used: Set(challenge.used),
                    }
                    .insert(txn)
                    .await?;
                    Ok(())
                })
            })
            .await
            .context("replace reset challenge")?;
        Ok(())
    }

    async fn find_by_token(
        &self,
        token: ResetToken,
    ) -> Result<Option<ResetChallenge>, PortalError> {
        let model = reset_challenges::Entity::find()
            .filter(reset_challenges::Column::Token.eq(token.0))
            .one(&self.db)
            .await
            .context("find reset challenge by token")?;
        Ok(model.map(challenge_from_model))
    }

    async fn record_failed_attempt(&self, id: Uuid) -> Result<Option<u16>, PortalError> {
        let updated = reset_challenges::Entity::update_many()
            .col_expr(
                reset_challenges::Column::Attempts,
                Expr::col(reset_challenges::Column::Attempts).add(1),
            )
            .filter(reset_challenges::Column::Id.eq(id))
            .filter(reset_challenges::Column::Used.eq(false))
            .filter(
                Expr::col(reset_challenges::Column::Attempts)
                    .lt(Expr::col(reset_challenges::Column::MaxAttempts)),
            )
            .exec_with_returning(&self.db)
            .await
            .context("record failed reset attempt")?;
        Ok(updated.into_iter().next().map(|m| m.attempts.max(0) as u16))
    }

    async fn mark_used(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, PortalError> {
        let result = reset_challenges::Entity::update_many()
            .col_expr(reset_challenges::Column::Used, Expr::value(true))
            .filter(reset_challenges::Column::Id.eq(id))
            .filter(reset_challenges::Column::Used.eq(false))
            .filter(
                Expr::col(reset_challenges::Column::Attempts)
                    .lt(Expr::col(reset_challenges::Column::MaxAttempts)),
            )
            .filter(reset_challenges::Column::ExpiresAt.gte(now))
            .exec(&self.db)
            .await
            .context("mark reset challenge used")?;
        Ok(result.rows_affected == 1)
    }
}

fn challenge_from_model(model: reset_challenges::Model) -> ResetChallenge {
    ResetChallenge {
        id: model.id,
        user_id: UserId(model.user_id),
        code: model.code,
        token: ResetToken(model.token),
        created_at: model.created_at,
        expires_at: model.expires_at,
        attempts: model.attempts.max(0) as u16,
        max_attempts: model.max_attempts.max(0) as u16,
        used: model.used,
    }
}

// ── Settings repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbSettingsRepository {
    pub db: DatabaseConnection,
}

impl SettingsRepository for DbSettingsRepository {
    async fn get_or_create(&self) -> Result<ChurchSettings, PortalError> {
        if let Some(model) = church_settings::Entity::find_by_id(SETTINGS_ROW_ID)
            .one(&self.db)
            .await
            .context("load church settings")?
        {
            return Ok(settings_from_model(model));
        }

        let now = Utc::now();
        let mut active = settings_active_model(&ChurchSettings::defaults(now));
        active.created_at = Set(now);
        church_settings::Entity::insert(active)
            .on_conflict(
                OnConflict::column(church_settings::Column::Id)
                    .do_nothing()
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .context("insert default church settings")?;

        let model = church_settings::Entity::find_by_id(SETTINGS_ROW_ID)
            .one(&self.db)
            .await
            .context("reload church settings")?
            .context("church settings row missing after insert")?;
        Ok(settings_from_model(model))
    }

    async fn save(&self, settings: &ChurchSettings) -> Result<(), PortalError> {
        settings_active_model(settings)
            .update(&self.db)
            .await
            .context("save church settings")?;
        Ok(())
    }
}

fn settings_active_model(settings: &ChurchSettings) -> church_settings::ActiveModel {
    let s = settings.clone();
    church_settings::ActiveModel {
        id: Set(SETTINGS_ROW_ID),
        church_name: Set(s.church_name),
        slogan: Set(s.slogan),
        founded_date: Set(s.founded_date),
        history: Set(s.history),
        vision: Set(s.vision),
        mission: Set(s.mission),
        core_values: Set(s.core_values),
        current_pastor: Set(s.current_pastor),
        pastor_since: Set(s.pastor_since),
        pastor_bio: Set(s.pastor_bio),
        leadership_team: Set(s.leadership_team),
        email: Set(s.email),
        phone: Set(s.phone),
        whatsapp: Set(s.whatsapp),
        address: Set(s.address),
        city: Set(s.city),
        country: Set(s.country),
        facebook: Set(s.facebook),
        instagram: Set(s.instagram),
        youtube: Set(s.youtube),
        twitter: Set(s.twitter),
        website: Set(s.website),
        primary_color: Set(s.colors.primary),
        secondary_color: Set(s.colors.secondary),
        accent_color: Set(s.colors.accent),
        success_color: Set(s.colors.success),
        danger_color: Set(s.colors.danger),
        warning_color: Set(s.colors.warning),
        sunday_service_time: Set(s.sunday_service_time),
        wednesday_service_time: Set(s.wednesday_service_time),
        friday_service_time: Set(s.friday_service_time),
        custom_services: Set(s.custom_services),
        timezone: Set(s.timezone),
        language: Set(s.language),
        enable_whatsapp_notifications: Set(s.enable_whatsapp_notifications),
        enable_email_notifications: Set(s.enable_email_notifications),
        created_at: NotSet,
        updated_at: Set(s.updated_at),
        updated_by: Set(s.updated_by.map(|id| id.0)),
    }
}

fn settings_from_model(model: church_settings::Model) -> ChurchSettings {
    ChurchSettings {
        church_name: model.church_name,
        slogan: model.slogan,
        founded_date: model.founded_date,
        history: model.history,
        vision: model.vision,
        mission: model.mission,
        core_values: model.core_values,
        current_pastor: model.current_pastor,
        pastor_since: model.pastor_since,
        pastor_bio: model.pastor_bio,
        leadership_team: model.leadership_team,
        email: model.email,
        phone: model.phone,
        whatsapp: model.whatsapp,
        address: model.address,
        city: model.city,
        country: model.country,
        facebook: model.facebook,
        instagram: model.instagram,
        youtube: model.youtube,
        twitter: model.twitter,
        website: model.website,
        colors: ThemeColors {
            primary: model.primary_color,
            secondary: model.secondary_color,
            accent: model.accent_color,
            success: model.success_color,
            danger: model.danger_color,
            warning: model.warning_color,
        },
        sunday_service_time: model.sunday_service_time,
        wednesday_service_time: model.wednesday_service_time,
        friday_service_time: model.friday_service_time,
        custom_services: model.custom_services,
        timezone: model.timezone,
        language: model.language,
        enable_whatsapp_notifications: model.enable_whatsapp_notifications,
        enable_email_notifications: model.enable_email_notifications,
        updated_at: model.updated_at,
        updated_by: model.updated_by.map(UserId),
    }
}

// ── Theme repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbThemeRepository {
    pub db: DatabaseConnection,
}

impl ThemeRepository for DbThemeRepository {
    async fn list(&self) -> Result<Vec<ThemePreset>, PortalError> {
        let models = theme_presets::Entity::find()
            .order_by_asc(theme_presets::Column::Name)
            .all(&self.db)
            .await
            .context("list theme presets")?;
        Ok(models.into_iter().map(theme_from_model).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ThemePreset>, PortalError> {
        let model = theme_presets::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find theme preset")?;
        Ok(model.map(theme_from_model))
    }
}

fn theme_from_model(model: theme_presets::Model) -> ThemePreset {
    ThemePreset {
        id: model.id,
        name: model.name,
        description: model.description,
        primary_color: model.primary_color,
        secondary_color: model.secondary_color,
        accent_color: model.accent_color,
        is_active: model.is_active,
    }
}
