use actix_web::{HttpResponse, Responder, delete, web};
use biz_service::biz_services::group_member_service::GroupMemberService;
use common::errors::{AppError, ErrorResponse};
use common::models::ApiUser;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(group_member_remove);
}

#[utoipa::path(
    delete,
    path = "/groups/{slug}/members/{user_id}",
    summary = "Remove a member from a group",
    tag = "groups",
    params(
        ("slug" = String, Path, description = "Group slug"),
        ("user_id" = String, Path, description = "Member identity id")
    ),
    responses(
        (status = 204, description = "The user is not a member of the group"),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 403, description = "Owner role required", body = ErrorResponse),
        (status = 404, description = "No group with this slug", body = ErrorResponse)
    )
)]
#[delete("/groups/{slug}/members/{user_id}")]
pub async fn group_member_remove(
    path: web::Path<(String, String)>,
    user: ApiUser,
    member_service: web::Data<GroupMemberService>,
) -> Result<impl Responder, AppError> {
    let (slug, user_id) = path.into_inner();
    member_service.remove_member(&user, &slug, &user_id).await?;
    Ok(HttpResponse::NoContent().finish())
}
