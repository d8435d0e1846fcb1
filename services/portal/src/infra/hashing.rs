use anyhow::Context as _;

use crate::domain::repository::PasswordHasher;
use crate::error::PortalError;

/// bcrypt on the blocking pool; a hash costs tens of milliseconds at the default cost.
#[derive(Clone, Copy)]
pub struct BcryptHasher {
    pub cost: u32,
}

impl Default for BcryptHasher {
    fn default() -> Self {
        Self {
            cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl PasswordHasher for BcryptHasher {
    async fn hash(&self, password: &str) -> Result<String, PortalError> {
        let password = password.to_owned();
        let cost = self.cost;
        let hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
            .await
            .context("join bcrypt hash task")?
            .context("bcrypt hash")?;
        Ok(hash)
    }

    /// A stored hash bcrypt cannot parse counts as a mismatch.
    async fn verify(&self, password: &str, hash: &str) -> Result<bool, PortalError> {
        let password = password.to_owned();
        let hash = hash.to_owned();
        let matches = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .context("join bcrypt verify task")?;
        match matches {
            Ok(matches) => Ok(matches),
            Err(bcrypt::BcryptError::InvalidHash(_)) => Ok(false),
            Err(e) => Err(PortalError::Internal(e.into())),
        }
    }
}
