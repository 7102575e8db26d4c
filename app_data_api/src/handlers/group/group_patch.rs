use crate::handlers::group::group_dto::{GroupPatchRequest, GroupResponse};
use actix_web::{Responder, patch, web};
use biz_service::biz_services::group_service::GroupService;
use common::errors::{AppError, ErrorResponse};
use common::models::ApiUser;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(group_patch);
}

#[utoipa::path(
    patch,
    path = "/groups/{slug}",
    summary = "Partially update a group",
    tag = "groups",
    params(("slug" = String, Path, description = "Group slug")),
    request_body = GroupPatchRequest,
    responses(
        (status = 200, description = "The updated group", body = GroupResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Editor role required", body = ErrorResponse),
        (status = 404, description = "No group with this slug", body = ErrorResponse),
        (status = 409, description = "The new slug is already in use", body = ErrorResponse),
        (status = 422, description = "Empty patch or invalid fields", body = ErrorResponse)
    )
)]
#[patch("/groups/{slug}")]
pub async fn group_patch(
    slug: web::Path<String>,
    dto: web::Json<GroupPatchRequest>,
    user: ApiUser,
    group_service: web::Data<GroupService>,
) -> Result<impl Responder, AppError> {
    dto.validate()?;
    let group = group_service.update_group(&user, &slug, dto.into_inner().into()).await?;
    Ok(web::Json(GroupResponse::from(group)))
}
