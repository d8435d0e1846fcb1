use tracing::info;
use uuid::Uuid;

use ecclesia_auth_types::session::SessionData;
use ecclesia_domain::capability::Capability;
use ecclesia_domain::id::UserId;
use ecclesia_domain::user::Role;

use crate::domain::repository::{AccountRepository, Clock, PasswordHasher};
use crate::domain::types::{Account, AccountProfile};
use crate::error::PortalError;
use crate::usecase::password_reset::validate_new_password;

pub const DASHBOARD_PATH: &str = "/dashboard";
pub const PROFILE_PATH: &str = "/accounts/profile";
pub const CHANGE_PASSWORD_PATH: &str = "/accounts/password";
pub const LOGIN_PATH: &str = "/login";

const USERNAME_MAX_LEN: usize = 150;
const NAME_MAX_LEN: usize = 150;
const PHONE_MAX_LEN: usize = 20;

fn invalid(message: impl Into<String>) -> PortalError {
    PortalError::InvalidProfile(message.into())
}

/// Letters, digits and `@ . + - _`, at most 150 characters.
pub fn is_valid_username(username: &str) -> bool {
    !username.is_empty()
        && username.chars().count() <= USERNAME_MAX_LEN
        && username
            .chars()
            .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
}

/// `local@domain.tld` without whitespace. Deliverability is not checked.
pub fn is_plausible_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
}

/// Trim and check the owner-editable fields. An empty phone becomes `None`.
pub fn clean_profile(
    first_name: &str,
    last_name: &str,
    email: &str,
    phone: &str,
) -> Result<AccountProfile, PortalError> {
    let (first_name, last_name, email, phone) =
        (first_name.trim(), last_name.trim(), email.trim(), phone.trim());
    for (field, value) in [("first_name", first_name), ("last_name", last_name)] {
        if value.is_empty() {
            return Err(invalid(format!("{field} is required")));
        }
        if value.chars().count() > NAME_MAX_LEN {
            return Err(invalid(format!("{field} is too long")));
        }
    }
    if !is_plausible_email(email) {
        return Err(invalid("email is not a valid address"));
    }
    if phone.chars().count() > PHONE_MAX_LEN {
        return Err(invalid("phone is too long"));
    }
    Ok(AccountProfile {
        first_name: first_name.to_owned(),
        last_name: last_name.to_owned(),
        email: email.to_owned(),
        phone: (!phone.is_empty()).then(|| phone.to_owned()),
    })
}

// ── Login ─────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub username: String,
    pub password: String,
}

#[derive(Debug)]
pub struct LoginOutput {
    pub account: Account,
    /// The account had never logged in before this call.
    pub first_login: bool,
}

impl LoginOutput {
    /// Where the freshly authenticated user lands.
    pub fn landing_path(&self) -> &'static str {
        if self.first_login {
            CHANGE_PASSWORD_PATH
        } else if self.account.capabilities().contains(Capability::Admin) {
            DASHBOARD_PATH
        } else {
            PROFILE_PATH
        }
    }
}

pub struct LoginUseCase<A, H, C>
where
    A: AccountRepository,
    H: PasswordHasher,
    C: Clock,
{
    pub accounts: A,
    pub hasher: H,
    pub clock: C,
}

impl<A, H, C> LoginUseCase<A, H, C>
where
    A: AccountRepository,
    H: PasswordHasher,
    C: Clock,
{
    pub async fn execute(
        &self,
        input: LoginInput,
        session: &mut SessionData,
    ) -> Result<LoginOutput, PortalError> {
        let account = self
            .accounts
            .find_by_username(input.username.trim())
            .await?
            .filter(|a| a.is_active)
            .ok_or(PortalError::InvalidCredentials)?;

        if !self
            .hasher
            .verify(&input.password, &account.password_hash)
            .await?
        {
            return Err(PortalError::InvalidCredentials);
        }

        let first_login = account.last_login.is_none();
        self.accounts
            .record_login(account.id, self.clock.now())
            .await?;
        session.login(account.id);

        info!(user_id = %account.id, first_login, "login");
        Ok(LoginOutput {
            account,
            first_login,
        })
    }
}

// ── ChangePassword ────────────────────────────────────────────────────────────

pub struct ChangePasswordInput {
    pub old_password: String,
    pub password1: String,
    pub password2: String,
}

pub struct ChangePasswordUseCase<A, H>
where
    A: AccountRepository,
    H: PasswordHasher,
{
    pub accounts: A,
    pub hasher: H,
}

impl<A, H> ChangePasswordUseCase<A, H>
where
    A: AccountRepository,
    H: PasswordHasher,
{
    pub async fn execute(
        &self,
        account: &Account,
        input: ChangePasswordInput,
    ) -> Result<(), PortalError> {
        if !self
            .hasher
            .verify(&input.old_password, &account.password_hash)
            .await?
        {
            return Err(PortalError::InvalidCredentials);
        }
        validate_new_password(&input.password1, &input.password2)?;

        let hash = self.hasher.hash(&input.password1).await?;
        self.accounts.update_password(account.id, &hash).await?;
        info!(user_id = %account.id, "password changed");
        Ok(())
    }
}

// ── AssignRole ────────────────────────────────────────────────────────────────

pub struct AssignRoleUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> AssignRoleUseCase<A> {
    pub async fn execute(&self, target: UserId, role: &str) -> Result<Role, PortalError> {
        let role: Role = role.trim().parse().map_err(|_| PortalError::InvalidRole)?;
        let account = self
            .accounts
            .find_by_id(target)
            .await?
            .ok_or(PortalError::UserNotFound)?;
        self.accounts.update_role(account.id, role).await?;
        info!(user_id = %account.id, %role, "role assigned");
        Ok(role)
    }
}

// ── ToggleStatus ──────────────────────────────────────────────────────────────

pub struct ToggleStatusUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> ToggleStatusUseCase<A> {
    /// Flip `is_active` of `target` and return the new value.
    pub async fn execute(&self, actor: UserId, target: UserId) -> Result<bool, PortalError> {
        if actor == target {
            return Err(PortalError::CannotModifySelf);
        }
        let account = self
            .accounts
            .find_by_id(target)
            .await?
            .ok_or(PortalError::UserNotFound)?;
        let is_active = !account.is_active;
        self.accounts.set_active(account.id, is_active).await?;
        info!(user_id = %account.id, by = %actor, is_active, "account status toggled");
        Ok(is_active)
    }
}

// ── Register ──────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub password1: String,
    pub password2: String,
}

pub struct RegisterUseCase<A, H, C>
where
    A: AccountRepository,
    H: PasswordHasher,
    C: Clock,
{
    pub accounts: A,
    pub hasher: H,
    pub clock: C,
}

impl<A, H, C> RegisterUseCase<A, H, C>
where
    A: AccountRepository,
    H: PasswordHasher,
    C: Clock,
{
    /// Create an active, not yet validated member account. The caller is not
    /// logged in.
    pub async fn execute(&self, input: RegisterInput) -> Result<Account, PortalError> {
        let username = input.username.trim();
        if !is_valid_username(username) {
            return Err(invalid(
                "username may only contain letters, digits and @.+-_",
            ));
        }
        let profile = clean_profile(
            &input.first_name,
            &input.last_name,
            &input.email,
            &input.phone,
        )?;
        validate_new_password(&input.password1, &input.password2)?;

        if self.accounts.find_by_username(username).await?.is_some() {
            return Err(PortalError::UsernameTaken);
        }

        let now = self.clock.now();
        let account = Account {
            id: UserId(Uuid::now_v7()),
            username: username.to_owned(),
            email: profile.email,
            first_name: profile.first_name,
            last_name: profile.last_name,
            phone: profile.phone,
            password_hash: self.hasher.hash(&input.password1).await?,
            role: Role::Member,
            is_superuser: false,
            is_active: true,
            is_validated: false,
            last_login: None,
            created_at: now,
            updated_at: now,
        };
        self.accounts.create(&account).await?;
        info!(user_id = %account.id, username = %account.username, "account registered");
        Ok(account)
    }
}

// ── UpdateProfile ─────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

pub struct UpdateProfileUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> UpdateProfileUseCase<A> {
    /// Owners edit their names and contact details. Role and flags stay with
    /// the admin actions.
    pub async fn execute(
        &self,
        account: &Account,
        input: UpdateProfileInput,
    ) -> Result<AccountProfile, PortalError> {
        let profile = clean_profile(
            &input.first_name,
            &input.last_name,
            &input.email,
            &input.phone,
        )?;
        if profile == account.profile() {
            return Ok(profile);
        }
        self.accounts.update_profile(account.id, &profile).await?;
        info!(user_id = %account.id, "profile updated");
        Ok(profile)
    }
}

// ── ValidateUser ──────────────────────────────────────────────────────────────

pub struct ValidateUserUseCase<A: AccountRepository> {
    pub accounts: A,
}

impl<A: AccountRepository> ValidateUserUseCase<A> {
    /// `validate` or `reject` the account and return the new `is_validated`.
    pub async fn execute(
        &self,
        actor: UserId,
        target: UserId,
        action: &str,
    ) -> Result<bool, PortalError> {
        let is_validated = match action.trim() {
            "validate" => true,
            "reject" => false,
            _ => return Err(PortalError::InvalidAction),
        };
        let account = self
            .accounts
            .find_by_id(target)
            .await?
            .ok_or(PortalError::UserNotFound)?;
        self.accounts
            .set_validated(account.id, is_validated)
            .await?;
        info!(user_id = %account.id, by = %actor, is_validated, "account validation changed");
        Ok(is_validated)
    }
}
