use actix_web::{HttpResponse, Responder, delete, web};
use biz_service::biz_services::group_service::GroupService;
use common::errors::{AppError, ErrorResponse};
use common::models::ApiUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(group_delete);
}

/// 幂等：群组不存在同样返回 204
#[utoipa::path(
    delete,
    path = "/groups/{slug}",
    summary = "Delete a group",
    tag = "groups",
    params(("slug" = String, Path, description = "Group slug")),
    responses(
        (status = 204, description = "The group no longer exists"),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Owner role required", body = ErrorResponse)
    )
)]
#[delete("/groups/{slug}")]
pub async fn group_delete(slug: web::Path<String>, user: ApiUser, group_service: web::Data<GroupService>) -> Result<impl Responder, AppError> {
    group_service.delete_group(&user, &slug).await?;
    Ok(HttpResponse::NoContent().finish())
}
