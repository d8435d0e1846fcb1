use tracing::{info, warn};

use ecclesia_auth_types::session::SessionData;
use ecclesia_domain::id::{ResetToken, UserId};

use crate::domain::repository::{
    AccountRepository, Clock, PasswordHasher, ResetChallengeRepository, ResetCodeGenerator,
    ResetNotifier,
};
use crate::domain::types::{Account, PASSWORD_MIN_LEN, ResetChallenge};
use crate::error::PortalError;

/// Shared password policy for reset completion and password change.
/// Mismatch is reported before length.
pub fn validate_new_password(password1: &str, password2: &str) -> Result<(), PortalError> {
    if password1 != password2 {
        return Err(PortalError::PasswordMismatch);
    }
    if password1.chars().count() < PASSWORD_MIN_LEN {
        return Err(PortalError::PasswordTooShort);
    }
    Ok(())
}

fn is_well_formed_code(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}

// ── Issue ─────────────────────────────────────────────────────────────────────

pub struct RequestResetInput {
    pub email: String,
}

pub struct RequestResetUseCase<A, R, N, G, C>
where
    A: AccountRepository,
    R: ResetChallengeRepository,
    N: ResetNotifier,
    G: ResetCodeGenerator,
    C: Clock,
{
    pub accounts: A,
    pub challenges: R,
    pub notifier: N,
    pub codes: G,
    pub clock: C,
}

impl<A, R, N, G, C> RequestResetUseCase<A, R, N, G, C>
where
    A: AccountRepository,
    R: ResetChallengeRepository,
    N: ResetNotifier,
    G: ResetCodeGenerator,
    C: Clock,
{
    /// Issue a fresh code for the active account owning `email`, replacing
    /// every earlier challenge of that account, and bind its token to the
    /// session. The session is left untouched on any failure.
    pub async fn execute(
        &self,
        input: RequestResetInput,
        session: &mut SessionData,
    ) -> Result<ResetToken, PortalError> {
        let email = input.email.trim();
        let account = self
            .accounts
            .find_active_by_email(email)
            .await?
            .ok_or(PortalError::NoMatchingAccount)?;

        let challenge = ResetChallenge::issue(account.id, self.codes.generate(), self.clock.now());
        self.challenges.replace_for_user(&challenge).await?;

        if let Err(e) = self
            .notifier
            .send_reset_code(&account, &challenge.code)
            .await
        {
            warn!(user_id = %account.id, "reset code delivery failed");
            return Err(e);
        }

        session.bind_reset_token(challenge.token);
        info!(user_id = %account.id, expires_at = %challenge.expires_at, "reset code issued");
        Ok(challenge.token)
    }
}

// ── Verify ────────────────────────────────────────────────────────────────────

pub struct VerifyResetCodeInput {
    pub code: String,
}

pub struct VerifyResetCodeUseCase<R, C>
where
    R: ResetChallengeRepository,
    C: Clock,
{
    pub challenges: R,
    pub clock: C,
}

impl<R, C> VerifyResetCodeUseCase<R, C>
where
    R: ResetChallengeRepository,
    C: Clock,
{
    /// Check a submitted code against the challenge bound to the session.
    ///
    /// On success the challenge is consumed, the token slot is cleared and
    /// the owner is bound for the final step. A wrong code costs one attempt;
    /// a code that is not six digits costs nothing.
    pub async fn execute(
        &self,
        input: VerifyResetCodeInput,
        session: &mut SessionData,
    ) -> Result<UserId, PortalError> {
        let token = session.reset_token().ok_or(PortalError::SessionExpired)?;

        let challenge = self
            .challenges
            .find_by_token(token)
            .await?
            .ok_or(PortalError::ChallengeNotFound)?;

        let now = self.clock.now();
        if challenge.used || challenge.is_expired(now) {
            return Err(PortalError::ChallengeExpiredOrUsed);
        }
        // Checked before comparing so that the right code is refused too.
        if challenge.is_exhausted() {
            return Err(PortalError::AttemptsExhausted);
        }

        let code = input.code.trim();
        if !is_well_formed_code(code) {
            return Err(PortalError::MalformedCode);
        }

        if code == challenge.code {
            if !self.challenges.mark_used(challenge.id, now).await? {
                return Err(PortalError::ChallengeExpiredOrUsed);
            }
            session.promote_reset(challenge.user_id);
            info!(user_id = %challenge.user_id, "reset code verified");
            return Ok(challenge.user_id);
        }

        match self.challenges.record_failed_attempt(challenge.id).await? {
            Some(attempts) => {
                let remaining = challenge.max_attempts.saturating_sub(attempts);
                warn!(user_id = %challenge.user_id, remaining, "incorrect reset code");
                Err(PortalError::IncorrectCode { remaining })
            }
            None => Err(PortalError::AttemptsExhausted),
        }
    }
}

// ── Complete ──────────────────────────────────────────────────────────────────

pub struct CompleteResetInput {
    pub password1: String,
    pub password2: String,
}

pub struct CompleteResetUseCase<A, H, C>
where
    A: AccountRepository,
    H: PasswordHasher,
    C: Clock,
{
    pub accounts: A,
    pub hasher: H,
    pub clock: C,
}

impl<A, H, C> CompleteResetUseCase<A, H, C>
where
    A: AccountRepository,
    H: PasswordHasher,
    C: Clock,
{
    /// Set the new password of the account bound by a verified code and log
    /// the session in as that account.
    pub async fn execute(
        &self,
        input: CompleteResetInput,
        session: &mut SessionData,
    ) -> Result<Account, PortalError> {
        let user_id = session.reset_user_id().ok_or(PortalError::InvalidSession)?;
        validate_new_password(&input.password1, &input.password2)?;

        let account = self
            .accounts
            .find_by_id(user_id)
            .await?
            .ok_or(PortalError::UserNotFound)?;

        let hash = self.hasher.hash(&input.password1).await?;
        self.accounts.update_password(account.id, &hash).await?;
        self.accounts
            .record_login(account.id, self.clock.now())
            .await?;

        session.complete_reset();
        info!(user_id = %account.id, "password reset completed");
        Ok(account)
    }
}
