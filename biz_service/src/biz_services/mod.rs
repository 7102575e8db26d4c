use crate::biz_services::group_member_service::GroupMemberService;
use crate::biz_services::group_service::GroupService;
use crate::biz_services::namespace_service::NamespaceService;
use crate::biz_services::user_service::UserService;
use crate::store::DataStore;
use actix_web::web;
use std::sync::Arc;

pub mod group_member_service;
pub mod group_service;
pub mod namespace_service;
mod permission;
pub mod user_service;

/// 注册业务服务为 `web::Data`
pub fn configure(cfg: &mut web::ServiceConfig, store: Arc<dyn DataStore>) {
    cfg.app_data(web::Data::new(GroupService::new(store.clone())));
    cfg.app_data(web::Data::new(GroupMemberService::new(store.clone())));
    cfg.app_data(web::Data::new(NamespaceService::new(store.clone())));
    cfg.app_data(web::Data::new(UserService::new(store)));
}
