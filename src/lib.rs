//! Roster: an in-memory user-management REST API.
//!
//! The domain core owns validation and storage; the inbound HTTP adapter
//! maps it onto the REST surface. There is no persistence: the record
//! store lives and dies with the process.

pub mod doc;
pub mod domain;
pub mod inbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
