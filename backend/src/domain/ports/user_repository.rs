//! Port abstraction for account persistence.
//!
//! Accounts are keyed by their normalised email address. Adapters must map
//! unique-constraint violations on the email column to
//! [`UserPersistenceError::Duplicate`] so the provisioning service can report
//! a clash that slipped past its existence check.

use async_trait::async_trait;

use crate::domain::{EmailAddress, UserAccount};

use super::define_port_error;

define_port_error! {
    /// Persistence errors raised by user repository adapters.
    pub enum UserPersistenceError {
        Connection { message: String } => "user repository connection failed: {message}",
        Query { message: String } => "user repository query failed: {message}",
        Duplicate { email: String } => "user with email \"{email}\" already exists",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch the account registered under `email`, if any.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserAccount>, UserPersistenceError>;

    /// Store a new account.
    async fn insert(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;

    /// Overwrite the stored roles of an existing account, leaving every other
    /// column untouched.
    async fn update_roles(&self, account: &UserAccount) -> Result<(), UserPersistenceError>;
}
