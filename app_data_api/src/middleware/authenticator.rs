use actix_web::http::header::{AUTHORIZATION, HeaderMap};
use common::config::{AuthConfig, AuthKind};
use common::errors::AppError;
use common::models::ApiUser;
use log::info;
use std::collections::HashSet;
use std::sync::Arc;

pub const FORWARDED_USER: &str = "X-Forwarded-User";
pub const FORWARDED_EMAIL: &str = "X-Forwarded-Email";
pub const FORWARDED_FIRST_NAME: &str = "X-Forwarded-First-Name";
pub const FORWARDED_LAST_NAME: &str = "X-Forwarded-Last-Name";

/// 从请求头解析调用方身份；没有身份信息时返回匿名用户
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, headers: &HeaderMap) -> Result<ApiUser, AppError>;
}

fn header_value(headers: &HeaderMap, name: &str) -> Result<Option<String>, AppError> {
    match headers.get(name) {
        None => Ok(None),
        Some(value) => {
            let value = value.to_str().map_err(|_| AppError::Unauthorized(format!("Invalid {} header", name)))?.trim();
            Ok(if value.is_empty() { None } else { Some(value.to_string()) })
        }
    }
}

/// 信任前置认证代理注入的身份请求头
#[derive(Debug, Default)]
pub struct GatewayAuthenticator {
    admin_ids: HashSet<String>,
}

impl GatewayAuthenticator {
    pub fn new(admin_ids: impl IntoIterator<Item = String>) -> Self {
        Self { admin_ids: admin_ids.into_iter().collect() }
    }
}

impl Authenticator for GatewayAuthenticator {
    fn authenticate(&self, headers: &HeaderMap) -> Result<ApiUser, AppError> {
        let Some(id) = header_value(headers, FORWARDED_USER)? else {
            return Ok(ApiUser::anonymous());
        };
        Ok(ApiUser {
            is_admin: self.admin_ids.contains(&id),
            id: Some(id),
            first_name: header_value(headers, FORWARDED_FIRST_NAME)?,
            last_name: header_value(headers, FORWARDED_LAST_NAME)?,
            email: header_value(headers, FORWARDED_EMAIL)?,
        })
    }
}

/// 开发/测试用：`Authorization: Bearer <json>`，token 本身即身份
#[derive(Debug, Default)]
pub struct DummyAuthenticator {
    admin_ids: HashSet<String>,
}

impl DummyAuthenticator {
    pub fn new(admin_ids: impl IntoIterator<Item = String>) -> Self {
        Self { admin_ids: admin_ids.into_iter().collect() }
    }
}

impl Authenticator for DummyAuthenticator {
    fn authenticate(&self, headers: &HeaderMap) -> Result<ApiUser, AppError> {
        let Some(value) = header_value(headers, AUTHORIZATION.as_str())? else {
            return Ok(ApiUser::anonymous());
        };
        let token = value.strip_prefix("Bearer ").ok_or_else(|| AppError::Unauthorized("Expected a Bearer token".to_string()))?;
        let mut user: ApiUser =
            serde_json::from_str(token).map_err(|e| AppError::Unauthorized(format!("Malformed identity token: {}", e)))?;
        if let Some(id) = &user.id {
            user.is_admin |= self.admin_ids.contains(id);
        }
        Ok(user)
    }
}

pub fn build_authenticator(config: &AuthConfig) -> Arc<dyn Authenticator> {
    info!("using {:?} authenticator, {} admin id(s)", config.kind, config.admin_ids.len());
    let admin_ids = config.admin_ids.iter().cloned();
    match config.kind {
        AuthKind::Gateway => Arc::new(GatewayAuthenticator::new(admin_ids)),
        AuthKind::Dummy => Arc::new(DummyAuthenticator::new(admin_ids)),
    }
}
