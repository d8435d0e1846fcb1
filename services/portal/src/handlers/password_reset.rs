use axum::Form;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::domain::repository::{RandomResetCode, SystemClock};
use crate::error::{PortalError, RESET_VERIFY_PATH};
use crate::state::AppState;
use crate::usecase::account::DASHBOARD_PATH;
use crate::usecase::password_reset::{
    CompleteResetInput, CompleteResetUseCase, RequestResetInput, RequestResetUseCase,
    VerifyResetCodeInput, VerifyResetCodeUseCase,
};

pub const RESET_NEW_PASSWORD_PATH: &str = "/password-reset/new";

#[derive(Deserialize)]
pub struct RequestResetForm {
    pub email: String,
}

/// `POST /password-reset`
pub async fn request_reset(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<RequestResetForm>,
) -> Result<impl IntoResponse, PortalError> {
    let mut session = state.load_session(&jar).await?;
    let usecase = RequestResetUseCase {
        accounts: state.account_repo(),
        challenges: state.reset_challenge_repo(),
        notifier: state.mailer.clone(),
        codes: RandomResetCode,
        clock: SystemClock,
    };
    usecase
        .execute(RequestResetInput { email: form.email }, &mut session.data)
        .await?;
    let jar = state.commit_session(session, jar).await?;
    Ok((jar, Redirect::to(RESET_VERIFY_PATH)))
}

#[derive(Deserialize)]
pub struct VerifyCodeForm {
    pub code: String,
}

/// `POST /password-reset/verify`
pub async fn verify_code(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<VerifyCodeForm>,
) -> Result<impl IntoResponse, PortalError> {
    let mut session = state.load_session(&jar).await?;
    let usecase = VerifyResetCodeUseCase {
        challenges: state.reset_challenge_repo(),
        clock: SystemClock,
    };
    usecase
        .execute(VerifyResetCodeInput { code: form.code }, &mut session.data)
        .await?;
    let jar = state.commit_session(session, jar).await?;
    Ok((jar, Redirect::to(RESET_NEW_PASSWORD_PATH)))
}

#[derive(Deserialize)]
pub struct NewPasswordForm {
    pub password1: String,
    pub password2: String,
}

/// `POST /password-reset/new`: set the password and log the session in.
pub async fn set_new_password(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<NewPasswordForm>,
) -> Result<impl IntoResponse, PortalError> {
    let mut session = state.load_session(&jar).await?;
    let usecase = CompleteResetUseCase {
        accounts: state.account_repo(),
        hasher: state.hasher,
        clock: SystemClock,
    };
    usecase
        .execute(
            CompleteResetInput {
                password1: form.password1,
                password2: form.password2,
            },
            &mut session.data,
        )
        .await?;
    session.cycle_id(&state.session_store()).await?;
    let jar = state.commit_session(session, jar).await?;
    Ok((jar, Redirect::to(DASHBOARD_PATH)))
}
