//! Domain core: records, the in-memory store, and the rule engine.
//!
//! Purpose: define the strongly typed user model and the business rules
//! applied to it. Everything here is transport agnostic; the HTTP adapter
//! in [`crate::inbound`] converts requests into the plain field bundles
//! these types consume and maps failures onto status codes.
//!
//! Public surface:
//! - [`UserDirectory`]: owns the store, one operation per REST verb.
//! - [`UserStore`]: record collection plus the id counter.
//! - [`Error`] / [`ErrorCode`]: the shared error envelope.
//! - [`PublicUser`]: a record with the password stripped.

pub mod directory;
pub mod error;
pub mod store;
pub mod token;
pub mod user;

pub use self::directory::{Credentials, DirectoryError, LoginGrant, ProfileFields, UserDirectory};
pub use self::error::{Error, ErrorCode};
pub use self::store::UserStore;
pub use self::token::SessionToken;
pub use self::user::{
    EmailAddress, Password, PublicUser, UserId, UserRecord, UserValidationError, Username,
};
