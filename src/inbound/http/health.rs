//! Greeting routes kept from the original service surface.
//!
//! `GET /` doubles as a liveness probe for load balancers; `GET /v1/`
//! greets clients of the versioned API.

use actix_web::{HttpResponse, get};

/// Plain-text liveness check at the server root.
#[utoipa::path(
    get,
    path = "/",
    tags = ["health"],
    operation_id = "rootProbe",
    responses((status = 200, description = "Service is up"))
)]
#[get("/")]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

/// Greeting for the versioned API root.
#[utoipa::path(
    get,
    path = "/v1/",
    tags = ["health"],
    operation_id = "apiGreeting",
    responses((status = 200, description = "API greeting"))
)]
#[get("/")]
pub async fn v1_root() -> HttpResponse {
    HttpResponse::Ok().body("hi")
}
