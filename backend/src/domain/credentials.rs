//! Plaintext password handling for account provisioning.
//!
//! Keep prompt and argument parsing outside the domain by exposing
//! constructors that validate raw strings before a service hashes them.

use std::fmt;

use zeroize::Zeroizing;

/// Minimum number of characters accepted for a new password.
pub const PASSWORD_MIN_LENGTH: usize = 6;

/// Domain error returned when a candidate password is unacceptable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PasswordValidationError {
    /// Password and confirmation differ.
    #[error("Passwords do not match!")]
    Mismatch,
    /// Password is shorter than [`PASSWORD_MIN_LENGTH`].
    #[error("Password must be at least {min} characters long!")]
    TooShort {
        /// Configured lower bound.
        min: usize,
    },
}

/// Validated plaintext password, wiped from memory on drop.
///
/// ## Invariants
/// - At least [`PASSWORD_MIN_LENGTH`] characters (Unicode scalar values).
/// - Caller-provided whitespace is retained.
///
/// # Examples
/// ```
/// use crm_backend::domain::{PasswordValidationError, PlainPassword};
///
/// assert!(PlainPassword::new("s3cret!").is_ok());
/// assert_eq!(
///     PlainPassword::confirmed("s3cret!", "s3cret?").unwrap_err(),
///     PasswordValidationError::Mismatch,
/// );
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct PlainPassword(Zeroizing<String>);

impl PlainPassword {
    /// Validate a password supplied without confirmation.
    pub fn new(raw: &str) -> Result<Self, PasswordValidationError> {
        if raw.chars().count() < PASSWORD_MIN_LENGTH {
            return Err(PasswordValidationError::TooShort {
                min: PASSWORD_MIN_LENGTH,
            });
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Validate a password typed twice.
    ///
    /// The pair must match before the length rule is considered.
    pub fn confirmed(raw: &str, confirmation: &str) -> Result<Self, PasswordValidationError> {
        if raw != confirmation {
            return Err(PasswordValidationError::Mismatch);
        }
        Self::new(raw)
    }

    /// Expose the plaintext to a hasher.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for PlainPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("PlainPassword(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case("12345")]
    fn short_passwords_are_rejected(#[case] raw: &str) {
        let err = PlainPassword::new(raw).expect_err("short password must fail");
        assert_eq!(err, PasswordValidationError::TooShort { min: 6 });
    }

    #[rstest]
    #[case("123456")]
    #[case("  pad  ")]
    #[case("correct horse battery staple")]
    fn passwords_at_or_above_minimum_are_kept_verbatim(#[case] raw: &str) {
        let password = PlainPassword::new(raw).expect("valid password");
        assert_eq!(password.expose(), raw);
    }

    #[rstest]
    fn length_counts_characters_not_bytes() {
        assert!(PlainPassword::new("ééééé").is_err());
        assert!(PlainPassword::new("éééééé").is_ok());
    }

    #[rstest]
    fn short_password_is_rejected_even_when_confirmed() {
        let err = PlainPassword::confirmed("abc", "abc").expect_err("short password must fail");
        assert_eq!(err, PasswordValidationError::TooShort { min: 6 });
    }

    #[rstest]
    #[case("secret1", "secret2")]
    #[case("abc", "abd")]
    fn mismatch_is_reported_first(#[case] raw: &str, #[case] confirmation: &str) {
        let err = PlainPassword::confirmed(raw, confirmation).expect_err("mismatch must fail");
        assert_eq!(err, PasswordValidationError::Mismatch);
    }

    #[rstest]
    fn debug_output_is_redacted() {
        let password = PlainPassword::new("hunter22").expect("valid password");
        assert!(!format!("{password:?}").contains("hunter22"));
    }

    #[rstest]
    fn messages_match_console_wording() {
        assert_eq!(
            PasswordValidationError::Mismatch.to_string(),
            "Passwords do not match!"
        );
        assert_eq!(
            PasswordValidationError::TooShort { min: 6 }.to_string(),
            "Password must be at least 6 characters long!"
        );
    }
}
