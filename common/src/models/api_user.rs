use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};
use std::future::{Ready, ready};

/// 当前请求的调用方身份（由认证中间件解析）
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiUser {
    /// 外部身份 ID，匿名用户为 `None`
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ApiUser {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.id.is_some()
    }

    /// 展示名：`first last`，都为空时返回 `None`
    pub fn full_name(&self) -> Option<String> {
        full_name(self.first_name.as_deref(), self.last_name.as_deref())
    }
}

/// 读取认证中间件写入请求扩展的身份，未经过中间件时视为匿名
impl FromRequest for ApiUser {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(req.extensions().get::<ApiUser>().cloned().unwrap_or_default()))
    }
}

pub fn full_name(first_name: Option<&str>, last_name: Option<&str>) -> Option<String> {
    let name = [first_name, last_name].into_iter().flatten().map(str::trim).filter(|s| !s.is_empty()).collect::<Vec<_>>().join(" ");
    if name.is_empty() { None } else { Some(name) }
}
