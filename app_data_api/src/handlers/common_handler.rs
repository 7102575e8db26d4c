use actix_web::{Responder, get, web};
use common::errors::AppError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(version);
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct VersionResponse {
    #[schema(example = "0.1.0")]
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/version",
    tag = "common",
    summary = "Get the version of the service",
    responses(
        (status = 200, description = "Service version", body = VersionResponse)
    )
)]
#[get("/version")]
pub async fn version() -> Result<impl Responder, AppError> {
    Ok(web::Json(VersionResponse { version: env!("CARGO_PKG_VERSION").to_string() }))
}
