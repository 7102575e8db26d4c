use crate::handlers::group::group_dto::GroupResponse;
use crate::result::paginated;
use actix_web::{Responder, get, web};
use biz_service::biz_services::group_service::GroupService;
use common::errors::{AppError, ErrorResponse};
use common::pagination::{PaginationQuery, PaginationRequest};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(group_list);
}

#[utoipa::path(
    get,
    path = "/groups",
    summary = "List all groups",
    tag = "groups",
    params(PaginationQuery),
    responses(
        (status = 200, description = "Groups ordered by creation date", body = Vec<GroupResponse>,
            headers(("page" = u64), ("per-page" = u64), ("total" = u64), ("total-pages" = u64))),
        (status = 422, description = "Invalid pagination parameters", body = ErrorResponse)
    )
)]
#[get("/groups")]
pub async fn group_list(query: web::Query<PaginationQuery>, group_service: web::Data<GroupService>) -> Result<impl Responder, AppError> {
    let pagination = PaginationRequest::try_from(&*query)?;
    let (groups, page) = group_service.list_groups(&pagination).await?;
    Ok(paginated(groups.into_iter().map(GroupResponse::from).collect(), &page))
}
