use crate::handlers::common_handler::{self, VersionResponse};
use crate::handlers::group::group_dto::{GroupPatchRequest, GroupPostRequest, GroupResponse};
use crate::handlers::group::{group_create, group_delete, group_get, group_list, group_patch};
use crate::handlers::group_member::group_member_dto::{GroupMemberPatchItem, GroupMemberResponse};
use crate::handlers::group_member::{group_member_page, group_member_patch, group_member_remove};
use crate::handlers::namespace_handler::{self, NamespaceResponse};
use crate::handlers::user_handler::{self, UserResponse};
use actix_web::{HttpResponse, Responder, get, web};
use biz_service::entitys::group_member::GroupRole;
use biz_service::entitys::namespace_entity::NamespaceKind;
use common::errors::{AppError, ErrorBody, ErrorResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Data API", description = "Groups, group members and namespaces"),
    servers((url = "/api/data"), (url = "/ui-server/api/data")),
    paths(
        //群组
        group_list::group_list,
        group_create::group_create,
        group_get::group_get,
        group_patch::group_patch,
        group_delete::group_delete,

        //群成员
        group_member_page::group_member_page,
        group_member_patch::group_member_patch,
        group_member_remove::group_member_remove,

        //命名空间
        namespace_handler::namespace_list,
        namespace_handler::namespace_get,

        //用户
        user_handler::user_self,
        user_handler::user_list,
        user_handler::user_get,

        common_handler::version,
    ),
    components(schemas(
        GroupResponse,
        GroupPostRequest,
        GroupPatchRequest,
        GroupMemberResponse,
        GroupMemberPatchItem,
        GroupRole,
        NamespaceResponse,
        NamespaceKind,
        UserResponse,
        VersionResponse,
        ErrorResponse,
        ErrorBody,
    )),
    tags(
        (name = "groups", description = "Groups and their members"),
        (name = "namespaces", description = "Group and user namespaces"),
        (name = "users", description = "Known users"),
        (name = "common", description = "Service information")
    )
)]
pub struct ApiDoc;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(openapi_json);
}

#[get("/spec.json")]
async fn openapi_json() -> Result<impl Responder, AppError> {
    Ok(HttpResponse::Ok().content_type("application/json").body(ApiDoc::openapi().to_json()?))
}
