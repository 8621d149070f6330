//! Port abstraction for one-way password hashing.

use crate::domain::{PasswordHash, PlainPassword};

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashing adapters.
    pub enum PasswordHashError {
        Hash { message: String } => "password hashing failed: {message}",
        Verify { message: String } => "password verification failed: {message}",
    }
}

/// Produces and checks salted password hashes.
///
/// Hashing is CPU-bound and synchronous; callers running on an async runtime
/// keep the work short by using the adapter's default cost parameters.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash `password` with a fresh random salt.
    fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, PasswordHashError>;

    /// Check `password` against a previously stored `hash`.
    ///
    /// Returns `Ok(false)` for a well-formed hash that does not match.
    fn verify(
        &self,
        password: &PlainPassword,
        hash: &PasswordHash,
    ) -> Result<bool, PasswordHashError>;
}
