//! Authentication primitives: login credentials and password rules.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a port or service.

use std::fmt;

use zeroize::Zeroizing;

/// Maximum allowed length for a password.
pub const PASSWORD_MAX: usize = 50;

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("admin", "password").unwrap();
/// assert_eq!(creds.username(), "admin");
/// assert_eq!(creds.password(), "password");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    username: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(username: &str, password: &str) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Username string suitable for account lookups.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Domain error returned when a candidate password breaks the house rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordValidationError {
    /// Password exceeded the maximum length.
    TooLong {
        /// The enforced maximum.
        max: usize,
    },
    /// Password lacked an uppercase letter.
    MissingUppercase,
    /// Password lacked a lowercase letter.
    MissingLowercase,
    /// Password lacked a digit.
    MissingDigit,
}

impl fmt::Display for PasswordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooLong { max } => write!(f, "password must be at most {max} characters"),
            Self::MissingUppercase => write!(f, "password must contain an uppercase letter"),
            Self::MissingLowercase => write!(f, "password must contain a lowercase letter"),
            Self::MissingDigit => write!(f, "password must contain a digit"),
        }
    }
}

impl std::error::Error for PasswordValidationError {}

/// A password that satisfies the complexity rules.
///
/// ## Invariants
/// - At most [`PASSWORD_MAX`] characters.
/// - Contains at least one uppercase letter, one lowercase letter, and one
///   digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate and construct a [`Password`] from raw input.
    pub fn new(raw: &str) -> Result<Self, PasswordValidationError> {
        if raw.chars().count() > PASSWORD_MAX {
            return Err(PasswordValidationError::TooLong { max: PASSWORD_MAX });
        }
        if !raw.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(PasswordValidationError::MissingUppercase);
        }
        if !raw.chars().any(|c| c.is_ascii_lowercase()) {
            return Err(PasswordValidationError::MissingLowercase);
        }
        if !raw.chars().any(|c| c.is_ascii_digit()) {
            return Err(PasswordValidationError::MissingDigit);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Password string for hashing.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Domain error returned when a password-change payload is invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordChangeValidationError {
    /// The current password was blank.
    EmptyCurrentPassword,
    /// The replacement password broke the complexity rules.
    NewPassword(PasswordValidationError),
    /// The confirmation did not repeat the replacement password.
    ConfirmationMismatch,
}

impl fmt::Display for PasswordChangeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCurrentPassword => write!(f, "current password must not be empty"),
            Self::NewPassword(inner) => inner.fmt(f),
            Self::ConfirmationMismatch => {
                write!(f, "confirmation must match the new password")
            }
        }
    }
}

impl std::error::Error for PasswordChangeValidationError {}

/// A validated request to replace an account's password.
///
/// The current password is carried verbatim for re-verification; the
/// replacement has already passed the complexity rules and its confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PasswordChange {
    current_password: Zeroizing<String>,
    new_password: Password,
}

impl PasswordChange {
    /// Construct a change request from the raw current, new, and confirmation
    /// inputs.
    pub fn try_from_parts(
        current: &str,
        new: &str,
        confirmation: &str,
    ) -> Result<Self, PasswordChangeValidationError> {
        if current.is_empty() {
            return Err(PasswordChangeValidationError::EmptyCurrentPassword);
        }

        let new_password =
            Password::new(new).map_err(PasswordChangeValidationError::NewPassword)?;
        if new != confirmation {
            return Err(PasswordChangeValidationError::ConfirmationMismatch);
        }

        Ok(Self {
            current_password: Zeroizing::new(current.to_owned()),
            new_password,
        })
    }

    /// Current password for re-verification.
    pub fn current_password(&self) -> &str {
        self.current_password.as_str()
    }

    /// Validated replacement password.
    pub fn new_password(&self) -> &Password {
        &self.new_password
    }
}
