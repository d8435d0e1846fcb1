use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect};
use axum::{Form, Json};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use ecclesia_domain::capability::{Capability, CapabilitySet};
use ecclesia_domain::id::UserId;
use ecclesia_domain::user::Role;

use crate::domain::repository::SystemClock;
use crate::error::PortalError;
use crate::handlers::current_user::CurrentUser;
use crate::state::AppState;
use crate::usecase::account::{
    AssignRoleUseCase, ChangePasswordInput, ChangePasswordUseCase, LOGIN_PATH, LoginInput,
    LoginUseCase, PROFILE_PATH, RegisterInput, RegisterUseCase, ToggleStatusUseCase,
    UpdateProfileInput, UpdateProfileUseCase, ValidateUserUseCase,
};

#[derive(Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// `POST /login`
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<impl IntoResponse, PortalError> {
    let mut session = state.load_session(&jar).await?;
    let usecase = LoginUseCase {
        accounts: state.account_repo(),
        hasher: state.hasher,
        clock: SystemClock,
    };
    let output = usecase
        .execute(
            LoginInput {
                username: form.username,
                password: form.password,
            },
            &mut session.data,
        )
        .await?;
    session.cycle_id(&state.session_store()).await?;
    let jar = state.commit_session(session, jar).await?;
    Ok((jar, Redirect::to(output.landing_path())))
}

#[derive(Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    pub password1: String,
    pub password2: String,
}

/// `POST /register`
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<Redirect, PortalError> {
    let usecase = RegisterUseCase {
        accounts: state.account_repo(),
        hasher: state.hasher,
        clock: SystemClock,
    };
    usecase
        .execute(RegisterInput {
            username: form.username,
            email: form.email,
            first_name: form.first_name,
            last_name: form.last_name,
            phone: form.phone,
            password1: form.password1,
            password2: form.password2,
        })
        .await?;
    Ok(Redirect::to(LOGIN_PATH))
}

/// `POST /logout`
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, PortalError> {
    let session = state.load_session(&jar).await?;
    let jar = state.end_session(session, jar).await?;
    Ok((jar, Redirect::to(LOGIN_PATH)))
}

#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_superuser: bool,
    pub is_validated: bool,
    pub capabilities: CapabilitySet,
    #[serde(serialize_with = "ecclesia_core::serde::to_rfc3339_ms_opt")]
    pub last_login: Option<DateTime<Utc>>,
    #[serde(serialize_with = "ecclesia_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
}

impl From<CurrentUser> for ProfileResponse {
    fn from(user: CurrentUser) -> Self {
        let full_name = user.account.full_name();
        let a = user.account;
        Self {
            id: a.id,
            username: a.username,
            email: a.email,
            first_name: a.first_name,
            last_name: a.last_name,
            full_name,
            phone: a.phone,
            role: a.role,
            is_superuser: a.is_superuser,
            is_validated: a.is_validated,
            capabilities: user.capabilities,
            last_login: a.last_login,
            created_at: a.created_at,
        }
    }
}

/// `GET /accounts/profile`
pub async fn profile(user: CurrentUser) -> Json<ProfileResponse> {
    Json(user.into())
}

#[derive(Deserialize)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// `POST /accounts/profile`
pub async fn update_profile(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<ProfileForm>,
) -> Result<Redirect, PortalError> {
    let usecase = UpdateProfileUseCase {
        accounts: state.account_repo(),
    };
    usecase
        .execute(
            &user.account,
            UpdateProfileInput {
                first_name: form.first_name,
                last_name: form.last_name,
                email: form.email,
                phone: form.phone,
            },
        )
        .await?;
    Ok(Redirect::to(PROFILE_PATH))
}

#[derive(Deserialize)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub password1: String,
    pub password2: String,
}

/// `POST /accounts/password`
pub async fn change_password(
    State(state): State<AppState>,
    user: CurrentUser,
    Form(form): Form<ChangePasswordForm>,
) -> Result<Redirect, PortalError> {
    let usecase = ChangePasswordUseCase {
        accounts: state.account_repo(),
        hasher: state.hasher,
    };
    usecase
        .execute(
            &user.account,
            ChangePasswordInput {
                old_password: form.old_password,
                password1: form.password1,
                password2: form.password2,
            },
        )
        .await?;
    Ok(Redirect::to(PROFILE_PATH))
}

#[derive(Deserialize)]
pub struct AssignRoleForm {
    pub role: String,
}

/// `POST /accounts/{id}/role`
pub async fn assign_role(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Form(form): Form<AssignRoleForm>,
) -> Result<StatusCode, PortalError> {
    user.require(Capability::Admin)?;
    let usecase = AssignRoleUseCase {
        accounts: state.account_repo(),
    };
    usecase.execute(UserId(id), &form.role).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Serialize)]
pub struct ToggleStatusResponse {
    pub is_active: bool,
}

/// `POST /accounts/{id}/toggle-status`
pub async fn toggle_status(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ToggleStatusResponse>, PortalError> {
    user.require(Capability::Admin)?;
    let usecase = ToggleStatusUseCase {
        accounts: state.account_repo(),
    };
    let is_active = usecase.execute(user.id(), UserId(id)).await?;
    Ok(Json(ToggleStatusResponse { is_active }))
}

#[derive(Deserialize)]
pub struct ValidateUserForm {
    pub action: String,
}

#[derive(Serialize)]
pub struct ValidateUserResponse {
    pub is_validated: bool,
}

/// `POST /accounts/{id}/validate`
pub async fn validate_user(
    State(state): State<AppState>,
    user: CurrentUser,
    Path(id): Path<Uuid>,
    Form(form): Form<ValidateUserForm>,
) -> Result<Json<ValidateUserResponse>, PortalError> {
    user.require(Capability::Admin)?;
    let usecase = ValidateUserUseCase {
        accounts: state.account_repo(),
    };
    let is_validated = usecase
        .execute(user.id(), UserId(id), &form.action)
        .await?;
    Ok(Json(ValidateUserResponse { is_validated }))
}
