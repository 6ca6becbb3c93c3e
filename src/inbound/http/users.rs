//! Users API handlers.
//!
//! ```text
//! GET    /v1/users        list accounts
//! POST   /v1/users        create an account
//! GET    /v1/users/{id}   fetch one account
//! PUT    /v1/users/{id}   replace an account
//! PATCH  /v1/users/{id}   amend an account
//! DELETE /v1/users/{id}   remove an account
//! GET    /v1/login        authenticate
//! ```
//!
//! Handlers carry no business rules: they parse the path and body, call
//! one [`crate::domain::UserDirectory`] operation under the state lock,
//! and wrap the outcome in the `{message, ...}` envelope.

use actix_web::{delete, get, patch, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Credentials, DirectoryError, Error, ProfileFields, PublicUser, SessionToken, UserId,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Profile fields accepted by create, replace, and amend.
///
/// Every field is optional at the transport layer; presence rules are
/// the domain's concern. Example JSON:
/// `{"username":"ada","email":"ada@example.com","password":"abc123"}`
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileBody {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl From<ProfileBody> for ProfileFields {
    fn from(body: ProfileBody) -> Self {
        Self {
            username: body.username,
            email: body.email,
            password: body.password,
        }
    }
}

/// Credentials accepted by login.
///
/// Example JSON: `{"username":"ada","password":"abc123"}`
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl From<LoginBody> for Credentials {
    fn from(body: LoginBody) -> Self {
        Self {
            username: body.username,
            password: body.password,
        }
    }
}

/// Envelope for responses carrying one account.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserEnvelope {
    /// Human-readable outcome.
    pub message: String,
    /// Public view of the affected account.
    pub user: PublicUser,
}

/// Envelope for responses carrying only a confirmation.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageEnvelope {
    /// Human-readable outcome.
    pub message: String,
}

/// Envelope for successful logins.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginEnvelope {
    /// Human-readable outcome.
    pub message: String,
    /// Public view of the authenticated account.
    pub user: PublicUser,
    /// Opaque, non-cryptographic session token.
    #[schema(value_type = String)]
    pub token: SessionToken,
}

/// Parse the `{id}` path segment, folding any failure into the invalid
/// id error.
fn parsed_id(raw: &str) -> Result<UserId, Error> {
    raw.parse::<UserId>()
        .map_err(|err| Error::from(DirectoryError::from(err)))
}

/// Unwrap an optional JSON body, treating an unreadable or absent body
/// as one with no fields so the presence rules report it.
fn body_or_default<T: Default>(payload: Option<web::Json<T>>) -> T {
    payload.map(web::Json::into_inner).unwrap_or_default()
}

/// List every account.
#[utoipa::path(
    get,
    path = "/v1/users",
    responses(
        (status = 200, description = "Public views of every account", body = [PublicUser]),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<PublicUser>>> {
    let directory = state.directory()?;
    Ok(web::Json(directory.list()))
}

/// Fetch one account by id.
#[utoipa::path(
    get,
    path = "/v1/users/{id}",
    params(("id" = u64, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account found", body = UserEnvelope),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "No such account", body = Error)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let id = parsed_id(&path)?;
    let directory = state.directory()?;
    let user = directory.fetch(id)?;
    Ok(web::Json(UserEnvelope {
        message: "User found".to_owned(),
        user,
    }))
}

/// Create an account.
#[utoipa::path(
    post,
    path = "/v1/users",
    request_body = ProfileBody,
    responses(
        (status = 200, description = "Account created", body = UserEnvelope),
        (status = 400, description = "Missing, invalid, or taken field", body = Error)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: Option<web::Json<ProfileBody>>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let mut directory = state.directory()?;
    let user = directory.create(body_or_default(payload).into())?;
    Ok(web::Json(UserEnvelope {
        message: "User created".to_owned(),
        user,
    }))
}

/// Replace every profile field of an account.
#[utoipa::path(
    put,
    path = "/v1/users/{id}",
    params(("id" = u64, Path, description = "Account identifier")),
    request_body = ProfileBody,
    responses(
        (status = 200, description = "Account updated", body = UserEnvelope),
        (status = 400, description = "Missing, invalid, or taken field", body = Error),
        (status = 404, description = "No such account", body = Error)
    ),
    tags = ["users"],
    operation_id = "replaceUser"
)]
#[put("/users/{id}")]
pub async fn replace_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: Option<web::Json<ProfileBody>>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let id = parsed_id(&path)?;
    let mut directory = state.directory()?;
    let user = directory.replace(id, body_or_default(payload).into())?;
    Ok(web::Json(UserEnvelope {
        message: "User updated".to_owned(),
        user,
    }))
}

/// Amend a subset of an account's profile fields.
#[utoipa::path(
    patch,
    path = "/v1/users/{id}",
    params(("id" = u64, Path, description = "Account identifier")),
    request_body = ProfileBody,
    responses(
        (status = 200, description = "Account updated", body = UserEnvelope),
        (status = 400, description = "No fields, or an invalid or taken field", body = Error),
        (status = 404, description = "No such account", body = Error)
    ),
    tags = ["users"],
    operation_id = "patchUser"
)]
#[patch("/users/{id}")]
pub async fn patch_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: Option<web::Json<ProfileBody>>,
) -> ApiResult<web::Json<UserEnvelope>> {
    let id = parsed_id(&path)?;
    let mut directory = state.directory()?;
    let user = directory.patch(id, body_or_default(payload).into())?;
    Ok(web::Json(UserEnvelope {
        message: "User updated".to_owned(),
        user,
    }))
}

/// Remove an account.
#[utoipa::path(
    delete,
    path = "/v1/users/{id}",
    params(("id" = u64, Path, description = "Account identifier")),
    responses(
        (status = 200, description = "Account removed", body = MessageEnvelope),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "No such account", body = Error)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageEnvelope>> {
    let id = parsed_id(&path)?;
    let mut directory = state.directory()?;
    directory.remove(id)?;
    Ok(web::Json(MessageEnvelope {
        message: "User deleted".to_owned(),
    }))
}

/// Authenticate and issue an opaque session token.
///
/// Login is a `GET` with a JSON body, kept for compatibility with
/// clients of the original service. A wrong password and an unknown
/// username produce the same not-found response.
#[utoipa::path(
    get,
    path = "/v1/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login success", body = LoginEnvelope),
        (status = 400, description = "Missing or malformed credentials", body = Error),
        (status = 404, description = "No account matches the credentials", body = Error)
    ),
    tags = ["users"],
    operation_id = "login"
)]
#[get("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: Option<web::Json<LoginBody>>,
) -> ApiResult<web::Json<LoginEnvelope>> {
    let directory = state.directory()?;
    let grant = directory.login(&body_or_default(payload).into())?;
    Ok(web::Json(LoginEnvelope {
        message: "User logged in".to_owned(),
        user: grant.user,
        token: grant.token,
    }))
}
