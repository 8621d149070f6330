//! Administrator provisioning service.
//!
//! Provisioning is split in two steps so callers only ask for a password
//! when one is needed:
//!
//! 1. [`AdminProvisioningService::resolve`] looks the email up. An existing
//!    account is either promoted or reported as a duplicate; an unknown email
//!    yields a [`PendingAdmin`] token.
//! 2. [`AdminProvisioningService::create`] consumes the token together with a
//!    validated [`PlainPassword`] and stores a new administrator.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::ports::{
    PasswordHashError, PasswordHasher, UserPersistenceError, UserRepository,
};
use crate::domain::{EmailAddress, Error, PasswordValidationError, PlainPassword, UserAccount};

/// Failures surfaced by the provisioning flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProvisionError {
    /// An account already uses the email and promotion was not requested.
    #[error("User with email \"{email}\" already exists!")]
    DuplicateAccount {
        /// Normalised email of the existing account.
        email: String,
    },
    /// Password and confirmation differ.
    #[error("Passwords do not match!")]
    PasswordMismatch,
    /// Password shorter than the configured minimum.
    #[error("Password must be at least {min} characters long!")]
    PasswordTooShort {
        /// Minimum number of characters.
        min: usize,
    },
    /// The hasher could not produce a hash.
    #[error(transparent)]
    Hashing(#[from] PasswordHashError),
    /// Storage failed.
    #[error(transparent)]
    Persistence(UserPersistenceError),
}

impl From<PasswordValidationError> for ProvisionError {
    fn from(value: PasswordValidationError) -> Self {
        match value {
            PasswordValidationError::Mismatch => Self::PasswordMismatch,
            PasswordValidationError::TooShort { min } => Self::PasswordTooShort { min },
        }
    }
}

impl From<UserPersistenceError> for ProvisionError {
    fn from(value: UserPersistenceError) -> Self {
        match value {
            UserPersistenceError::Duplicate { email } => Self::DuplicateAccount { email },
            other => Self::Persistence(other),
        }
    }
}

impl From<ProvisionError> for Error {
    fn from(value: ProvisionError) -> Self {
        match value {
            ProvisionError::DuplicateAccount { .. } => Error::conflict(value.to_string()),
            ProvisionError::PasswordMismatch | ProvisionError::PasswordTooShort { .. } => {
                Error::invalid_request(value.to_string())
            }
            ProvisionError::Hashing(err) => Error::internal(err.to_string()),
            ProvisionError::Persistence(UserPersistenceError::Connection { message }) => {
                Error::service_unavailable(format!("user repository unavailable: {message}"))
            }
            ProvisionError::Persistence(err) => Error::internal(err.to_string()),
        }
    }
}

/// Proof that an email was free when [`AdminProvisioningService::resolve`]
/// ran. Only the service can mint one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAdmin {
    email: EmailAddress,
}

impl PendingAdmin {
    /// Email the new administrator will be registered under.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }
}

/// Outcome of resolving an email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProvisionStep {
    /// The existing account now holds the admin role.
    Promoted {
        account: UserAccount,
        /// The account was an administrator before promotion.
        already_admin: bool,
    },
    /// No account exists; a password is needed to create one.
    AwaitingPassword(PendingAdmin),
}

/// Creates administrator accounts or promotes existing ones.
#[derive(Clone)]
pub struct AdminProvisioningService<R, H> {
    users: Arc<R>,
    hasher: Arc<H>,
}

impl<R, H> AdminProvisioningService<R, H> {
    /// Create a service over the given repository and hasher.
    pub fn new(users: Arc<R>, hasher: Arc<H>) -> Self {
        Self { users, hasher }
    }
}

impl<R, H> AdminProvisioningService<R, H>
where
    R: UserRepository,
    H: PasswordHasher,
{
    /// Decide what happens to `email`.
    ///
    /// With `promote` set, an existing account gains `ROLE_ADMIN` and only its
    /// roles are written back; accounts that already hold it are not written. Without it, an existing account is a
    /// [`ProvisionError::DuplicateAccount`]. Unknown emails always continue to
    /// account creation.
    pub async fn resolve(
        &self,
        email: &EmailAddress,
        promote: bool,
    ) -> Result<ProvisionStep, ProvisionError> {
        let existing = self.users.find_by_email(email).await?;

        let Some(mut account) = existing else {
            debug!(%email, promote, "no account found; awaiting password");
            return Ok(ProvisionStep::AwaitingPassword(PendingAdmin {
                email: email.clone(),
            }));
        };

        if !promote {
            warn!(%email, "account already exists");
            return Err(ProvisionError::DuplicateAccount {
                email: email.to_string(),
            });
        }

        let already_admin = !account.promote_to_admin();
        if !already_admin {
            self.users.update_roles(&account).await?;
        }
        info!(%email, user_id = %account.id(), already_admin, "account promoted to admin");

        Ok(ProvisionStep::Promoted {
            account,
            already_admin,
        })
    }

    /// Hash `password` and store a new administrator for `pending`.
    pub async fn create(
        &self,
        pending: PendingAdmin,
        password: &PlainPassword,
    ) -> Result<UserAccount, ProvisionError> {
        let hash = self.hasher.hash(password)?;
        let account = UserAccount::new_admin(pending.email, hash);
        self.users.insert(&account).await?;
        info!(email = %account.email(), user_id = %account.id(), "admin account created");
        Ok(account)
    }
}

#[cfg(test)]
#[path = "admin_provisioning_tests.rs"]
mod tests;
