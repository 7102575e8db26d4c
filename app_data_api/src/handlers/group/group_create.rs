use crate::handlers::group::group_dto::{GroupPostRequest, GroupResponse};
use actix_web::{HttpResponse, Responder, post, web};
use biz_service::biz_services::group_service::GroupService;
use common::errors::{AppError, ErrorResponse};
use common::models::ApiUser;
use validator::Validate;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(group_create);
}

#[utoipa::path(
    post,
    path = "/groups",
    summary = "Create a new group",
    tag = "groups",
    request_body = GroupPostRequest,
    responses(
        (status = 201, description = "The group was created", body = GroupResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 409, description = "The slug is already in use", body = ErrorResponse),
        (status = 422, description = "Invalid request body", body = ErrorResponse)
    )
)]
#[post("/groups")]
pub async fn group_create(
    dto: web::Json<GroupPostRequest>,
    user: ApiUser,
    group_service: web::Data<GroupService>,
) -> Result<impl Responder, AppError> {
    dto.validate()?;
    let group = group_service.create_group(&user, dto.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(GroupResponse::from(group)))
}
