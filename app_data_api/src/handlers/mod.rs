pub mod common_handler;
pub mod group;
pub mod group_member;
pub mod namespace_handler;
pub mod swagger;
pub mod user_handler;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    swagger::configure(cfg);
    common_handler::configure(cfg);
    group::configure(cfg);
    group_member::configure(cfg);
    namespace_handler::configure(cfg);
    user_handler::configure(cfg);
}
