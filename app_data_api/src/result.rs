use actix_web::{HttpResponse, web};
use common::errors::AppError;
use common::pagination::PaginationResponse;
use serde::Serialize;

/// 列表响应：数据放在 body，分页信息放在响应头
pub fn paginated<T: Serialize>(items: Vec<T>, page: &PaginationResponse) -> HttpResponse {
    let mut builder = HttpResponse::Ok();
    for header in page.headers() {
        builder.insert_header(header);
    }
    builder.json(items)
}

// 请求体、查询串、路径参数解析失败统一返回 422
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _| AppError::validation_detail("Invalid request body", err.to_string()).into())
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _| AppError::validation_detail("Invalid query parameters", err.to_string()).into())
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _| AppError::validation_detail("Invalid path parameters", err.to_string()).into())
}
