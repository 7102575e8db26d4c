use crate::handlers::group::group_dto::GroupResponse;
use actix_web::{Responder, get, web};
use biz_service::biz_services::group_service::GroupService;
use common::errors::{AppError, ErrorResponse};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(group_get);
}

#[utoipa::path(
    get,
    path = "/groups/{slug}",
    summary = "Get a group by slug",
    tag = "groups",
    params(("slug" = String, Path, description = "Group slug")),
    responses(
        (status = 200, description = "The group", body = GroupResponse),
        (status = 404, description = "No group with this slug", body = ErrorResponse)
    )
)]
#[get("/groups/{slug}")]
pub async fn group_get(slug: web::Path<String>, group_service: web::Data<GroupService>) -> Result<impl Responder, AppError> {
    let group = group_service.get_group(&slug).await?;
    Ok(web::Json(GroupResponse::from(group)))
}
