use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Where a caller is sent to restart the reset flow.
pub const RESET_START_PATH: &str = "/password-reset";
/// Where a caller re-enters a reset code.
pub const RESET_VERIFY_PATH: &str = "/password-reset/verify";

/// Portal service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("no active account found for this email")]
    NoMatchingAccount,
    #[error("session expired, please start again")]
    SessionExpired,
    #[error("invalid reset code")]
    ChallengeNotFound,
    #[error("this code has expired or has already been used")]
    ChallengeExpiredOrUsed,
    #[error("incorrect code, {remaining} attempt(s) remaining")]
    IncorrectCode { remaining: u16 },
    #[error("too many attempts, please request a new code")]
    AttemptsExhausted,
    #[error("the code must be exactly 6 digits")]
    MalformedCode,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("password must be at least 8 characters")]
    PasswordTooShort,
    #[error("invalid session")]
    InvalidSession,
    #[error("incorrect username or password")]
    InvalidCredentials,
    #[error("authentication required")]
    Unauthenticated,
    #[error("forbidden")]
    Forbidden,
    #[error("user not found")]
    UserNotFound,
    #[error("invalid role")]
    InvalidRole,
    #[error("you cannot change the status of your own account")]
    CannotModifySelf,
    #[error("this username is already taken")]
    UsernameTaken,
    #[error("invalid profile: {0}")]
    InvalidProfile(String),
    #[error("invalid action")]
    InvalidAction,
    #[error("theme not found")]
    ThemeNotFound,
    #[error("theme is inactive")]
    ThemeInactive,
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl PortalError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NoMatchingAccount => "NO_MATCHING_ACCOUNT",
            Self::SessionExpired => "SESSION_EXPIRED",
            Self::ChallengeNotFound => "CHALLENGE_NOT_FOUND",
            Self::ChallengeExpiredOrUsed => "CHALLENGE_EXPIRED_OR_USED",
            Self::IncorrectCode { .. } => "INCORRECT_CODE",
            Self::AttemptsExhausted => "ATTEMPTS_EXHAUSTED",
            Self::MalformedCode => "MALFORMED_CODE",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::InvalidSession => "INVALID_SESSION",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Forbidden => "FORBIDDEN",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::InvalidRole => "INVALID_ROLE",
            Self::CannotModifySelf => "CANNOT_MODIFY_SELF",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::InvalidProfile(_) => "INVALID_PROFILE",
            Self::InvalidAction => "INVALID_ACTION",
            Self::ThemeNotFound => "THEME_NOT_FOUND",
            Self::ThemeInactive => "THEME_INACTIVE",
            Self::InvalidSettings(_) => "INVALID_SETTINGS",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Step of the reset flow the caller should go back to, if any.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            Self::SessionExpired
            | Self::ChallengeNotFound
            | Self::ChallengeExpiredOrUsed
            | Self::AttemptsExhausted
            | Self::InvalidSession => Some(RESET_START_PATH),
            Self::IncorrectCode { .. } | Self::MalformedCode => Some(RESET_VERIFY_PATH),
            _ => None,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NoMatchingAccount
            | Self::ChallengeNotFound
            | Self::UserNotFound
            | Self::ThemeNotFound => StatusCode::NOT_FOUND,
            Self::SessionExpired
            | Self::IncorrectCode { .. }
            | Self::InvalidSession
            | Self::InvalidCredentials
            | Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::ChallengeExpiredOrUsed => StatusCode::GONE,
            Self::AttemptsExhausted => StatusCode::TOO_MANY_REQUESTS,
            Self::MalformedCode
            | Self::PasswordMismatch
            | Self::PasswordTooShort
            | Self::InvalidRole
            | Self::InvalidProfile(_)
            | Self::InvalidAction
            | Self::InvalidSettings(_) => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::CannotModifySelf | Self::UsernameTaken | Self::ThemeInactive => {
                StatusCode::CONFLICT
            }
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for PortalError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Client-facing kinds are visible in the access log already.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let mut body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        if let Some(path) = self.redirect() {
            body["redirect"] = serde_json::Value::from(path);
        }
        if let Self::IncorrectCode { remaining } = self {
            body["remaining_attempts"] = serde_json::Value::from(remaining);
        }
        (status, axum::Json(body)).into_response()
    }
}
