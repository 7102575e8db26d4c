use actix_web::web;

pub mod group_create;
pub mod group_delete;
pub mod group_dto;
pub mod group_get;
pub mod group_list;
pub mod group_patch;

pub fn configure(cfg: &mut web::ServiceConfig) {
    group_list::configure(cfg);
    group_create::configure(cfg);
    group_get::configure(cfg);
    group_patch::configure(cfg);
    group_delete::configure(cfg);
}
