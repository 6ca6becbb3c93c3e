//! User record and its validated field types.
//!
//! Each field is a newtype whose constructor enforces the format rule for
//! that field, so a constructed [`UserRecord`] is well-formed by
//! construction. Cross-record rules (uniqueness, existence) live in
//! [`crate::domain::directory`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Minimum trimmed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum trimmed length for a username.
pub const USERNAME_MAX: usize = 32;
/// Minimum password length.
pub const PASSWORD_MIN: usize = 2;
/// Maximum password length.
pub const PASSWORD_MAX: usize = 32;

/// Validation errors returned by the field constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum UserValidationError {
    /// Identifier is missing, non-numeric, or below 1.
    #[error("Invalid or missing ID")]
    InvalidId,
    /// Username falls outside the allowed trimmed length.
    #[error(
        "Username length must be between {min} and {max}",
        min = USERNAME_MIN,
        max = USERNAME_MAX
    )]
    InvalidUsername,
    /// Email does not match the `local@domain.tld` shape.
    #[error("Invalid email address")]
    InvalidEmail,
    /// Password breaks the length or character-class rule.
    #[error(
        "Password must be {min} to {max} letters and digits with at least one of each",
        min = PASSWORD_MIN,
        max = PASSWORD_MAX
    )]
    WeakPassword,
}

/// Record identifier assigned by the store.
///
/// Always an integer of at least 1; identifiers are never reused, even
/// after the record is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u64")]
pub struct UserId(u64);

impl UserId {
    /// Validate and construct a [`UserId`] from a raw integer.
    pub fn new(value: u64) -> Result<Self, UserValidationError> {
        if value >= 1 {
            Ok(Self(value))
        } else {
            Err(UserValidationError::InvalidId)
        }
    }

    /// Wrap a counter value without revalidation.
    ///
    /// The store guarantees its counter starts at 1.
    pub(crate) const fn from_counter(value: u64) -> Self {
        Self(value)
    }

    /// The underlying integer value.
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<UserId> for u64 {
    fn from(value: UserId) -> Self {
        value.0
    }
}

impl TryFrom<u64> for UserId {
    type Error = UserValidationError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl FromStr for UserId {
    type Err = UserValidationError;

    /// Parse a decimal path segment; anything that is not wholly an
    /// integer of at least 1 is invalid.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let value: u64 = raw
            .parse()
            .map_err(|_| UserValidationError::InvalidId)?;
        Self::new(value)
    }
}

/// Unique handle chosen by the user.
///
/// Construction trims surrounding whitespace and enforces the
/// [`USERNAME_MIN`]..=[`USERNAME_MAX`] length window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`], trimming surrounding
    /// whitespace first.
    pub fn new(raw: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let trimmed = raw.as_ref().trim();
        let length = trimmed.chars().count();
        if !(USERNAME_MIN..=USERNAME_MAX).contains(&length) {
            return Err(UserValidationError::InvalidUsername);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the normalized handle.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Username> for String {
    fn from(value: Username) -> Self {
        value.0
    }
}

impl TryFrom<String> for Username {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // The final dot-separated segment must be two or more letters.
        let pattern = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Contact address in `local@domain.tld` form.
///
/// Not trimmed: surrounding whitespace fails the pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        if !email_regex().is_match(&raw) {
            return Err(UserValidationError::InvalidEmail);
        }
        Ok(Self(raw))
    }

    /// Borrow the address.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
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

/// Secret credential for login.
///
/// Implements neither `Serialize` nor `Display`, and its `Debug` output
/// is redacted, so the value cannot leave the process through
/// serialization or logging.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// Validate and construct a [`Password`].
    ///
    /// Every character must be an ASCII letter or digit, the length must
    /// fall within [`PASSWORD_MIN`]..=[`PASSWORD_MAX`], and at least one
    /// letter and one digit must be present.
    pub fn new(raw: impl Into<String>) -> Result<Self, UserValidationError> {
        let raw = raw.into();
        let length = raw.chars().count();
        if !(PASSWORD_MIN..=PASSWORD_MAX).contains(&length) {
            return Err(UserValidationError::WeakPassword);
        }

        let mut has_letter = false;
        let mut has_digit = false;
        for ch in raw.chars() {
            if ch.is_ascii_digit() {
                has_digit = true;
            } else if ch.is_ascii_alphabetic() {
                has_letter = true;
            } else {
                return Err(UserValidationError::WeakPassword);
            }
        }
        if !has_letter || !has_digit {
            return Err(UserValidationError::WeakPassword);
        }

        Ok(Self(raw))
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// A stored user account.
///
/// ## Invariants
/// - `id` is never reassigned once set.
/// - `username` and `email` are unique across the owning store; the
///   directory enforces this before any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    id: UserId,
    username: Username,
    email: EmailAddress,
    password: Password,
}

impl UserRecord {
    /// Assemble a record from validated components.
    pub fn new(id: UserId, username: Username, email: EmailAddress, password: Password) -> Self {
        Self {
            id,
            username,
            email,
            password,
        }
    }

    /// Store-assigned identifier.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Unique handle.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Contact address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Login credential.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Merge supplied changes into this record, leaving omitted fields
    /// untouched.
    pub fn apply(&mut self, changes: ProfileChanges) {
        if let Some(username) = changes.username {
            self.username = username;
        }
        if let Some(email) = changes.email {
            self.email = email;
        }
        if let Some(password) = changes.password {
            self.password = password;
        }
    }
}

/// Validated field changes to merge into an existing record.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub username: Option<Username>,
    pub email: Option<EmailAddress>,
    pub password: Option<Password>,
}

impl ProfileChanges {
    /// A replacement carrying every field.
    pub fn replace_all(username: Username, email: EmailAddress, password: Password) -> Self {
        Self {
            username: Some(username),
            email: Some(email),
            password: Some(password),
        }
    }
}

/// A user record with the password stripped, safe to return to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    /// Store-assigned identifier.
    #[schema(value_type = u64, example = 1)]
    pub id: UserId,
    /// Unique handle.
    #[schema(value_type = String, example = "ada")]
    pub username: Username,
    /// Contact address.
    #[schema(value_type = String, example = "ada@example.com")]
    pub email: EmailAddress,
}

impl From<&UserRecord> for PublicUser {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id,
            username: record.username.clone(),
            email: record.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests;
