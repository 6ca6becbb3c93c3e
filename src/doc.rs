//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] aggregates every HTTP endpoint and the schemas their
//! bodies reference. Debug builds serve the document through Swagger UI
//! at `/docs`.

use utoipa::OpenApi;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster user directory API",
        description = "CRUD and login over an in-memory user collection."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    paths(
        crate::inbound::http::health::root,
        crate::inbound::http::health::v1_root,
        crate::inbound::http::users::list_users,
        crate::inbound::http::users::get_user,
        crate::inbound::http::users::create_user,
        crate::inbound::http::users::replace_user,
        crate::inbound::http::users::patch_user,
        crate::inbound::http::users::delete_user,
        crate::inbound::http::users::login,
    ),
    components(schemas(
        crate::domain::Error,
        crate::domain::ErrorCode,
        crate::domain::PublicUser,
        crate::inbound::http::users::ProfileBody,
        crate::inbound::http::users::LoginBody,
        crate::inbound::http::users::UserEnvelope,
        crate::inbound::http::users::MessageEnvelope,
        crate::inbound::http::users::LoginEnvelope,
    ))
)]
pub struct ApiDoc;
