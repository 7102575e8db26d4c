use crate::handlers::group_member::group_member_dto::GroupMemberResponse;
use actix_web::{Responder, get, web};
use biz_service::biz_services::group_member_service::GroupMemberService;
use common::errors::{AppError, ErrorResponse};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(group_member_page);
}

#[utoipa::path(
    get,
    path = "/groups/{slug}/members",
    summary = "List all members of a group",
    tag = "groups",
    params(("slug" = String, Path, description = "Group slug")),
    responses(
        (status = 200, description = "Members with their roles", body = Vec<GroupMemberResponse>),
        (status = 404, description = "No group with this slug", body = ErrorResponse)
    )
)]
#[get("/groups/{slug}/members")]
pub async fn group_member_page(slug: web::Path<String>, member_service: web::Data<GroupMemberService>) -> Result<impl Responder, AppError> {
    let members = member_service.list_members(&slug).await?;
    Ok(web::Json(members.into_iter().map(GroupMemberResponse::from).collect::<Vec<_>>()))
}
