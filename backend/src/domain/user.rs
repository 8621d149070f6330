//! User account model.
//!
//! Accounts are identified by their email address. Passwords only ever
//! reach this module as one-way hashes; plaintext handling lives in
//! [`crate::domain::credentials`].

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Maximum number of characters accepted for an email address.
pub const EMAIL_MAX: usize = 180;

/// Validation errors raised while constructing account components.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Email was blank once trimmed.
    #[error("email address must not be empty")]
    EmptyEmail,
    /// Email exceeded [`EMAIL_MAX`] characters.
    #[error("email address must be at most {max} characters")]
    EmailTooLong {
        /// Configured upper bound.
        max: usize,
    },
    /// Email did not have the `local@domain` shape.
    #[error("email address \"{value}\" is not valid")]
    InvalidEmail {
        /// Offending input after trimming.
        value: String,
    },
    /// Role name did not match `ROLE_[A-Z0-9_]+`.
    #[error("role \"{value}\" must start with ROLE_ and use upper-case letters, digits, or underscores")]
    InvalidRole {
        /// Offending input.
        value: String,
    },
    /// Password hash was blank.
    #[error("password hash must not be empty")]
    EmptyPasswordHash,
}

/// Stable account identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a new random [`UserId`].
    #[must_use]
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, typically read back from storage.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Normalised email address used as the unique account key.
///
/// ## Invariants
/// - Trimmed and lower-cased.
/// - Exactly one `@` with non-empty local and domain parts.
/// - No interior whitespace; at most [`EMAIL_MAX`] characters.
///
/// # Examples
/// ```
/// use crm_backend::domain::EmailAddress;
///
/// let email = EmailAddress::new("  Admin@Example.COM ").expect("valid email");
/// assert_eq!(email.as_ref(), "admin@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an email address.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(UserValidationError::EmptyEmail);
        }
        if trimmed.chars().count() > EMAIL_MAX {
            return Err(UserValidationError::EmailTooLong { max: EMAIL_MAX });
        }

        let invalid = || UserValidationError::InvalidEmail {
            value: trimmed.to_owned(),
        };
        if trimmed.chars().any(char::is_whitespace) {
            return Err(invalid());
        }
        let (local, domain) = trimmed.split_once('@').ok_or_else(invalid)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(invalid());
        }
        if domain.starts_with('.') || domain.ends_with('.') {
            return Err(invalid());
        }

        Ok(Self(trimmed.to_lowercase()))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Authorisation role granted to an account.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Role(String);

impl Role {
    /// Role name carried by administrators.
    pub const ADMIN: &'static str = "ROLE_ADMIN";
    /// Role name implied for every account.
    pub const USER: &'static str = "ROLE_USER";

    /// Validate a role name.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let value = raw.into();
        let suffix = value.strip_prefix("ROLE_").unwrap_or_default();
        let well_formed = !suffix.is_empty()
            && suffix
                .chars()
                .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_');
        if !well_formed {
            return Err(UserValidationError::InvalidRole { value });
        }
        Ok(Self(value))
    }

    /// The administrator role.
    #[must_use]
    pub fn admin() -> Self {
        Self(Self::ADMIN.to_owned())
    }

    /// The baseline role every account holds.
    #[must_use]
    pub fn user() -> Self {
        Self(Self::USER.to_owned())
    }

    /// Borrow the role name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Role> for String {
    fn from(value: Role) -> Self {
        value.0
    }
}

impl TryFrom<String> for Role {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Ordered, de-duplicated set of roles stored for an account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleSet(BTreeSet<Role>);

impl RoleSet {
    /// Empty role set; the account still holds `ROLE_USER` implicitly.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse stored role names.
    pub fn try_from_strings<I, S>(roles: I) -> Result<Self, UserValidationError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        roles
            .into_iter()
            .map(Role::new)
            .collect::<Result<BTreeSet<_>, _>>()
            .map(Self)
    }

    /// Add a role, returning `true` when it was not already present.
    pub fn insert(&mut self, role: Role) -> bool {
        self.0.insert(role)
    }

    /// Whether the stored set contains `role`.
    pub fn contains(&self, role: &Role) -> bool {
        self.0.contains(role)
    }

    /// Iterate stored roles in order.
    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }

    /// Stored role names, suitable for persistence.
    pub fn to_strings(&self) -> Vec<String> {
        self.0.iter().map(|role| role.as_str().to_owned()).collect()
    }
}

impl FromIterator<Role> for RoleSet {
    fn from_iter<T: IntoIterator<Item = Role>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// One-way password hash in PHC string format.
///
/// `Debug` output is redacted so hashes never leak into logs.
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordHash(String);

impl PasswordHash {
    /// Wrap an encoded hash produced by a [`crate::domain::ports::PasswordHasher`].
    pub fn new(encoded: impl Into<String>) -> Result<Self, UserValidationError> {
        let encoded = encoded.into();
        if encoded.trim().is_empty() {
            return Err(UserValidationError::EmptyPasswordHash);
        }
        Ok(Self(encoded))
    }

    /// Borrow the encoded hash.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PasswordHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PasswordHash(<redacted>)")
    }
}

/// Persisted user account.
///
/// ## Invariants
/// - `email` is unique across accounts.
/// - `password_hash` is never the plaintext password.
/// - `ROLE_USER` is implied even when not stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserAccount {
    id: UserId,
    email: EmailAddress,
    password_hash: PasswordHash,
    roles: RoleSet,
}

impl UserAccount {
    /// Assemble an account from validated components.
    pub fn new(id: UserId, email: EmailAddress, password_hash: PasswordHash, roles: RoleSet) -> Self {
        Self {
            id,
            email,
            password_hash,
            roles,
        }
    }

    /// Build a fresh account holding only the admin role.
    pub fn new_admin(email: EmailAddress, password_hash: PasswordHash) -> Self {
        let roles = std::iter::once(Role::admin()).collect();
        Self::new(UserId::random(), email, password_hash, roles)
    }

    /// Stable account identifier.
    pub fn id(&self) -> &UserId {
        &self.id
    }

    /// Unique email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Stored password hash.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// Roles as stored.
    pub fn roles(&self) -> &RoleSet {
        &self.roles
    }

    /// Stored roles plus the implied `ROLE_USER`.
    pub fn effective_roles(&self) -> RoleSet {
        let mut roles = self.roles.clone();
        roles.insert(Role::user());
        roles
    }

    /// Whether the account holds the admin role.
    pub fn is_admin(&self) -> bool {
        self.roles.contains(&Role::admin())
    }

    /// Grant the admin role, keeping every other role and the password hash.
    ///
    /// Returns `true` when the role set changed.
    pub fn promote_to_admin(&mut self) -> bool {
        self.roles.insert(Role::admin())
    }
}
