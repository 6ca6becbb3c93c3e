//! Server construction and route wiring.

mod config;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

#[cfg(debug_assertions)]
use roster::ApiDoc;
use roster::domain::UserDirectory;
use roster::inbound::http::health::{root, v1_root};
use roster::inbound::http::state::HttpState;
use roster::inbound::http::users::{
    create_user, delete_user, get_user, list_users, login, patch_user, replace_user,
};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

fn build_app(
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let api = web::scope("/v1")
        .service(v1_root)
        .service(list_users)
        .service(get_user)
        .service(create_user)
        .service(replace_user)
        .service(patch_user)
        .service(delete_user)
        .service(login);

    let app = App::new().app_data(http_state).service(api).service(root);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an actix HTTP server over a fresh, empty user directory.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(config: &ServerConfig) -> std::io::Result<Server> {
    let http_state = web::Data::new(HttpState::new(UserDirectory::new()));
    let server = HttpServer::new(move || build_app(http_state.clone()))
        .bind(config.bind_addr())?
        .run();
    Ok(server)
}
