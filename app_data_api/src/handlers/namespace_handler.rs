use crate::result::paginated;
use actix_web::{Responder, get, web};
use biz_service::biz_services::namespace_service::{NamespaceService, NamespaceView};
use biz_service::entitys::group_member::GroupRole;
use biz_service::entitys::namespace_entity::NamespaceKind;
use common::errors::{AppError, ErrorResponse};
use common::models::ApiUser;
use common::pagination::{PaginationQuery, PaginationRequest};
use common::util::date_util::time_to_iso;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(namespace_list).service(namespace_get);
}

/// 群组或用户命名空间
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct NamespaceResponse {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub slug: String,
    /// UTC ISO-8601
    pub creation_date: String,
    pub created_by: String,
    pub namespace_kind: NamespaceKind,
}

impl From<NamespaceView> for NamespaceResponse {
    fn from(view: NamespaceView) -> Self {
        Self {
            id: view.id,
            name: view.name,
            slug: view.slug,
            creation_date: time_to_iso(view.create_time),
            created_by: view.created_by,
            namespace_kind: view.kind,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct NamespaceFilter {
    /// 只返回调用方角色不低于该值的群组
    pub minimum_role: Option<GroupRole>,
}

#[utoipa::path(
    get,
    path = "/namespaces",
    summary = "List the namespaces the caller can access",
    tag = "namespaces",
    params(PaginationQuery, NamespaceFilter),
    responses(
        (status = 200, description = "The caller's own namespace first, then groups", body = Vec<NamespaceResponse>,
            headers(("page" = u64), ("per-page" = u64), ("total" = u64), ("total-pages" = u64))),
        (status = 401, description = "Authentication required", body = ErrorResponse),
        (status = 422, description = "Invalid query parameters", body = ErrorResponse)
    )
)]
#[get("/namespaces")]
pub async fn namespace_list(
    query: web::Query<PaginationQuery>,
    filter: web::Query<NamespaceFilter>,
    user: ApiUser,
    namespace_service: web::Data<NamespaceService>,
) -> Result<impl Responder, AppError> {
    let pagination = PaginationRequest::try_from(&*query)?;
    let (namespaces, page) = namespace_service.list_namespaces(&user, &pagination, filter.minimum_role).await?;
    Ok(paginated(namespaces.into_iter().map(NamespaceResponse::from).collect(), &page))
}

#[utoipa::path(
    get,
    path = "/namespaces/{slug}",
    summary = "Get a group or user namespace by slug",
    tag = "namespaces",
    params(("slug" = String, Path, description = "Namespace slug")),
    responses(
        (status = 200, description = "The namespace", body = NamespaceResponse),
        (status = 404, description = "No namespace with this slug", body = ErrorResponse)
    )
)]
#[get("/namespaces/{slug}")]
pub async fn namespace_get(slug: web::Path<String>, namespace_service: web::Data<NamespaceService>) -> Result<impl Responder, AppError> {
    let namespace = namespace_service.get_namespace(&slug).await?;
    Ok(web::Json(NamespaceResponse::from(namespace)))
}
