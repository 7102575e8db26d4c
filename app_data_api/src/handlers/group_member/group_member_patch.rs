use crate::handlers::group_member::group_member_dto::GroupMemberPatchItem;
use actix_web::{Responder, patch, web};
use biz_service::biz_services::group_member_service::GroupMemberService;
use common::errors::{AppError, ErrorResponse};
use common::models::ApiUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(group_member_patch);
}

/// 新增或更新成员角色；未列出的成员保持不变
#[utoipa::path(
    patch,
    path = "/groups/{slug}/members",
    summary = "Add members to a group or update their roles",
    tag = "groups",
    params(("slug" = String, Path, description = "Group slug")),
    request_body = Vec<GroupMemberPatchItem>,
    responses(
        (status = 200, description = "The applied changes", body = Vec<GroupMemberPatchItem>),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Owner role required", body = ErrorResponse),
        (status = 404, description = "No group with this slug", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ErrorResponse)
    )
)]
#[patch("/groups/{slug}/members")]
pub async fn group_member_patch(
    slug: web::Path<String>,
    dto: web::Json<Vec<GroupMemberPatchItem>>,
    user: ApiUser,
    member_service: web::Data<GroupMemberService>,
) -> Result<impl Responder, AppError> {
    if let Some(pos) = dto.iter().position(|item| item.id.trim().is_empty()) {
        return Err(AppError::validation_detail("Request validation failed", format!("[{}].id: must not be empty", pos)));
    }
    let changes = dto.into_inner().into_iter().map(Into::into).collect();
    let applied = member_service.update_members(&user, &slug, changes).await?;
    Ok(web::Json(applied.into_iter().map(GroupMemberPatchItem::from).collect::<Vec<_>>()))
}
