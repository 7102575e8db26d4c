use crate::errors::AppError;
use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_PER_PAGE: u64 = 20;
pub const MAX_PER_PAGE: u64 = 100;

/// 分页查询参数
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// 页码（从 1 开始，默认 1）
    #[param(minimum = 1, example = 1)]
    pub page: Option<u64>,
    /// 每页大小（1-100，默认 20）
    #[param(minimum = 1, maximum = 100, example = 20)]
    pub per_page: Option<u64>,
}

/// 校验后的分页请求
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationRequest {
    pub page: u64,
    pub per_page: u64,
}

impl PaginationRequest {
    /// 越界参数直接报错，不做静默截断
    pub fn new(page: u64, per_page: u64) -> Result<Self, AppError> {
        if page < 1 {
            return Err(AppError::validation_detail("Invalid pagination parameters", "page: must be greater than or equal to 1"));
        }
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(AppError::validation_detail(
                "Invalid pagination parameters",
                format!("per_page: must be between 1 and {}", MAX_PER_PAGE),
            ));
        }
        Ok(Self { page, per_page })
    }

    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for PaginationRequest {
    fn default() -> Self {
        Self { page: DEFAULT_PAGE, per_page: DEFAULT_PER_PAGE }
    }
}

impl TryFrom<&PaginationQuery> for PaginationRequest {
    type Error = AppError;

    fn try_from(query: &PaginationQuery) -> Result<Self, Self::Error> {
        Self::new(query.page.unwrap_or(DEFAULT_PAGE), query.per_page.unwrap_or(DEFAULT_PER_PAGE))
    }
}

/// 分页结果：`total` 与 `total_pages` 均由服务端计算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationResponse {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl PaginationResponse {
    pub fn new(request: &PaginationRequest, total: u64) -> Self {
        Self { page: request.page, per_page: request.per_page, total, total_pages: total_pages(total, request.per_page) }
    }

    /// 响应头：page / per-page / total / total-pages
    pub fn headers(&self) -> [(&'static str, String); 4] {
        [
            ("page", self.page.to_string()),
            ("per-page", self.per_page.to_string()),
            ("total", self.total.to_string()),
            ("total-pages", self.total_pages.to_string()),
        ]
    }
}

pub fn total_pages(total: u64, per_page: u64) -> u64 {
    total.div_ceil(per_page.max(1))
}
