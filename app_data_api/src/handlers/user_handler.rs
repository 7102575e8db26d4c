use actix_web::{Responder, get, web};
use biz_service::biz_services::user_service::UserService;
use biz_service::entitys::user_entity::UserEntity;
use common::errors::{AppError, ErrorResponse};
use common::models::ApiUser;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(user_self).service(user_list).service(user_get);
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: String,
    /// 个人命名空间的 slug
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// 仅在查询自身时返回
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_admin: Option<bool>,
}

impl From<UserEntity> for UserResponse {
    fn from(user: UserEntity) -> Self {
        Self { id: user.id, username: user.slug, email: user.email, first_name: user.first_name, last_name: user.last_name, is_admin: None }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserQuery {
    /// 按邮箱精确匹配
    pub exact_email: Option<String>,
}

fn require_login(user: &ApiUser) -> Result<(), AppError> {
    if user.is_authenticated() { Ok(()) } else { Err(AppError::Unauthorized("Authentication is required for this operation".to_string())) }
}

#[utoipa::path(
    get,
    path = "/user",
    summary = "Get the calling user",
    tag = "users",
    responses(
        (status = 200, description = "The caller", body = UserResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    )
)]
#[get("/user")]
pub async fn user_self(user: ApiUser, user_service: web::Data<UserService>) -> Result<impl Responder, AppError> {
    let entity = user_service.ensure_user(&user).await?;
    let mut response = UserResponse::from(entity);
    response.is_admin = Some(user.is_admin);
    Ok(web::Json(response))
}

#[utoipa::path(
    get,
    path = "/users",
    summary = "List known users",
    tag = "users",
    params(UserQuery),
    responses(
        (status = 200, description = "Users ordered by registration", body = Vec<UserResponse>),
        (status = 401, description = "Authentication required", body = ErrorResponse)
    )
)]
#[get("/users")]
pub async fn user_list(query: web::Query<UserQuery>, user: ApiUser, user_service: web::Data<UserService>) -> Result<impl Responder, AppError> {
    require_login(&user)?;
    let users = user_service.list_users(query.exact_email.as_deref()).await?;
    Ok(web::Json(users.into_iter().map(UserResponse::from).collect::<Vec<_>>()))
}

#[utoipa::path(
    get,
    path = "/users/{user_id}",
    summary = "Get a user by id",
    tag = "users",
    params(("user_id" = String, Path, description = "Identity id")),
    responses(
        (status = 200, description = "The user", body = UserResponse),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 404, description = "Unknown user", body = ErrorResponse)
    )
)]
#[get("/users/{user_id}")]
pub async fn user_get(user_id: web::Path<String>, user: ApiUser, user_service: web::Data<UserService>) -> Result<impl Responder, AppError> {
    require_login(&user)?;
    let entity = user_service.get_user(&user_id).await?;
    Ok(web::Json(UserResponse::from(entity)))
}
