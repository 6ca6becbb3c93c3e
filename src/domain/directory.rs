//! Validation and business rules for the user catalogue.
//!
//! [`UserDirectory`] owns the record store and is its only writer. Each
//! operation applies its checks in a fixed order; the first failure wins
//! and aborts the request. A request failing both the username and the
//! email rule therefore reports only the username failure.

use serde_json::json;
use thiserror::Error;

use super::error::Error as ErrorEnvelope;
use super::store::UserStore;
use super::token::SessionToken;
use super::user::{
    EmailAddress, Password, ProfileChanges, PublicUser, UserId, UserRecord, UserValidationError,
    Username,
};

/// Raw profile fields as they arrive from the transport.
///
/// `None` and the empty string both mean "not supplied"; a
/// whitespace-only string counts as supplied and then fails whatever
/// format rule applies to it.
#[derive(Debug, Clone, Default)]
pub struct ProfileFields {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl ProfileFields {
    fn username(&self) -> Option<&str> {
        supplied(&self.username)
    }

    fn email(&self) -> Option<&str> {
        supplied(&self.email)
    }

    fn password(&self) -> Option<&str> {
        supplied(&self.password)
    }
}

/// Raw login credentials as they arrive from the transport.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub username: Option<String>,
    pub password: Option<String>,
}

fn supplied(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// Successful login: the account's public view plus a fresh token.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginGrant {
    pub user: PublicUser,
    pub token: SessionToken,
}

/// Rule failures raised by directory operations.
///
/// All are terminal for the current request; nothing is retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DirectoryError {
    /// A field failed its format rule.
    #[error(transparent)]
    Field(#[from] UserValidationError),
    /// Create and replace require every profile field.
    #[error("Username, email and password are required")]
    MissingFields,
    /// Partial update arrived without a single field to change.
    #[error("At least one of username, email or password is required")]
    EmptyPatch,
    /// Login requires both credentials.
    #[error("Username and password are required")]
    MissingCredentials,
    /// Another record already uses the requested username.
    #[error("Username already exists")]
    UsernameTaken,
    /// Another record already uses the requested email.
    #[error("Email already exists")]
    EmailTaken,
    /// No record matches; covers unknown ids and failed logins alike.
    #[error("User not found")]
    NotFound,
}

impl DirectoryError {
    /// Machine-readable reason carried in the error details.
    fn reason(self) -> &'static str {
        match self {
            Self::Field(UserValidationError::InvalidId) => "invalid_id",
            Self::Field(UserValidationError::InvalidUsername) => "invalid_username",
            Self::Field(UserValidationError::InvalidEmail) => "invalid_email",
            Self::Field(UserValidationError::WeakPassword) => "weak_password",
            Self::MissingFields | Self::EmptyPatch | Self::MissingCredentials => "missing_fields",
            Self::UsernameTaken => "username_taken",
            Self::EmailTaken => "email_taken",
            Self::NotFound => "not_found",
        }
    }

    /// The offending field, when one can be named.
    fn field(self) -> Option<&'static str> {
        match self {
            Self::Field(UserValidationError::InvalidId) => Some("id"),
            Self::Field(UserValidationError::InvalidUsername) | Self::UsernameTaken => {
                Some("username")
            }
            Self::Field(UserValidationError::InvalidEmail) | Self::EmailTaken => Some("email"),
            Self::Field(UserValidationError::WeakPassword) => Some("password"),
            Self::MissingFields
            | Self::EmptyPatch
            | Self::MissingCredentials
            | Self::NotFound => None,
        }
    }
}

impl From<DirectoryError> for ErrorEnvelope {
    fn from(err: DirectoryError) -> Self {
        if err == DirectoryError::NotFound {
            return Self::not_found(err.to_string());
        }
        let details = match err.field() {
            Some(field) => json!({ "field": field, "code": err.reason() }),
            None => json!({ "code": err.reason() }),
        };
        Self::invalid_request(err.to_string()).with_details(details)
    }
}

/// Owns the record store and enforces every business rule.
#[derive(Debug, Default)]
pub struct UserDirectory {
    store: UserStore,
}

impl UserDirectory {
    /// Create a directory over an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Public views of every account, in insertion order.
    pub fn list(&self) -> Vec<PublicUser> {
        self.store.list().iter().map(PublicUser::from).collect()
    }

    /// Fetch one account by id.
    pub fn fetch(&self, id: UserId) -> Result<PublicUser, DirectoryError> {
        self.store
            .find_by_id(id)
            .map(PublicUser::from)
            .ok_or(DirectoryError::NotFound)
    }

    /// Create an account from raw fields and assign it a fresh id.
    pub fn create(&mut self, fields: ProfileFields) -> Result<PublicUser, DirectoryError> {
        let (username, email, password) =
            match (fields.username(), fields.email(), fields.password()) {
                (Some(username), Some(email), Some(password)) => (username, email, password),
                _ => return Err(DirectoryError::MissingFields),
            };

        let username = self.admitted_username(username, None)?;
        let email = self.admitted_email(email, None)?;
        let password = Password::new(password)?;

        let id = self.store.next_id();
        let record = UserRecord::new(id, username, email, password);
        let view = PublicUser::from(&record);
        self.store.insert(record);
        Ok(view)
    }

    /// Replace every profile field of an existing account.
    pub fn replace(
        &mut self,
        id: UserId,
        fields: ProfileFields,
    ) -> Result<PublicUser, DirectoryError> {
        let (username, email, password) =
            match (fields.username(), fields.email(), fields.password()) {
                (Some(username), Some(email), Some(password)) => (username, email, password),
                _ => return Err(DirectoryError::MissingFields),
            };
        if self.store.find_by_id(id).is_none() {
            return Err(DirectoryError::NotFound);
        }

        let username = self.admitted_username(username, Some(id))?;
        let email = self.admitted_email(email, Some(id))?;
        let password = Password::new(password)?;

        self.committed(id, ProfileChanges::replace_all(username, email, password))
    }

    /// Merge the supplied subset of fields into an existing account.
    ///
    /// Existence is checked before presence, so a patch against an
    /// unknown id reports not-found even when the body is empty.
    pub fn patch(
        &mut self,
        id: UserId,
        fields: ProfileFields,
    ) -> Result<PublicUser, DirectoryError> {
        if self.store.find_by_id(id).is_none() {
            return Err(DirectoryError::NotFound);
        }
        if fields.username().is_none() && fields.email().is_none() && fields.password().is_none() {
            return Err(DirectoryError::EmptyPatch);
        }

        let mut changes = ProfileChanges::default();
        if let Some(raw) = fields.username() {
            changes.username = Some(self.admitted_username(raw, Some(id))?);
        }
        if let Some(raw) = fields.email() {
            changes.email = Some(self.admitted_email(raw, Some(id))?);
        }
        if let Some(raw) = fields.password() {
            changes.password = Some(Password::new(raw)?);
        }

        self.committed(id, changes)
    }

    /// Remove an account.
    pub fn remove(&mut self, id: UserId) -> Result<(), DirectoryError> {
        if self.store.remove(id) {
            Ok(())
        } else {
            Err(DirectoryError::NotFound)
        }
    }

    /// Authenticate by exact username and password match.
    ///
    /// Uniqueness checks are skipped: login is a lookup, not a mutation.
    /// A wrong password and an unknown username are indistinguishable to
    /// the caller; both report [`DirectoryError::NotFound`].
    pub fn login(&self, credentials: &Credentials) -> Result<LoginGrant, DirectoryError> {
        let (username, password) = match (
            supplied(&credentials.username),
            supplied(&credentials.password),
        ) {
            (Some(username), Some(password)) => (username, password),
            _ => return Err(DirectoryError::MissingCredentials),
        };

        let username = Username::new(username)?;
        let password = Password::new(password)?;

        let record = self
            .store
            .list()
            .iter()
            .find(|record| record.username() == &username && record.password() == &password)
            .ok_or(DirectoryError::NotFound)?;

        Ok(LoginGrant {
            user: PublicUser::from(record),
            token: SessionToken::issue(),
        })
    }

    /// Validate a username's format and uniqueness, in that order.
    fn admitted_username(
        &self,
        raw: &str,
        exclude: Option<UserId>,
    ) -> Result<Username, DirectoryError> {
        let username = Username::new(raw)?;
        if self.store.username_taken(&username, exclude) {
            return Err(DirectoryError::UsernameTaken);
        }
        Ok(username)
    }

    /// Validate an email's format and uniqueness, in that order.
    fn admitted_email(
        &self,
        raw: &str,
        exclude: Option<UserId>,
    ) -> Result<EmailAddress, DirectoryError> {
        let email = EmailAddress::new(raw)?;
        if self.store.email_taken(&email, exclude) {
            return Err(DirectoryError::EmailTaken);
        }
        Ok(email)
    }

    /// Apply validated changes and return the fresh public view.
    fn committed(
        &mut self,
        id: UserId,
        changes: ProfileChanges,
    ) -> Result<PublicUser, DirectoryError> {
        self.store
            .update(id, changes)
            .map(PublicUser::from)
            .ok_or(DirectoryError::NotFound)
    }
}
