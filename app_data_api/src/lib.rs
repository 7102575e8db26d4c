use crate::middleware::{AuthMiddleware, Authenticator};
use actix_web::web;
use biz_service::biz_services;
use biz_service::store::DataStore;
use std::sync::Arc;

pub mod handlers;
pub mod middleware;
pub mod result;

#[cfg(test)]
mod api_tests;

/// 同一组路由同时挂载在两个前缀下
pub const BASE_PATHS: [&str; 2] = ["/api/data", "/ui-server/api/data"];

pub fn configure(cfg: &mut web::ServiceConfig, store: Arc<dyn DataStore>, authenticator: Arc<dyn Authenticator>) {
    biz_services::configure(cfg, store);
    cfg.app_data(result::json_config()).app_data(result::query_config()).app_data(result::path_config());
    for base in BASE_PATHS {
        cfg.service(web::scope(base).wrap(AuthMiddleware::new(authenticator.clone())).configure(handlers::configure));
    }
}
