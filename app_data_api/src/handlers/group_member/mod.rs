use actix_web::web;

pub mod group_member_dto;
pub mod group_member_page;
pub mod group_member_patch;
pub mod group_member_remove;

pub fn configure(cfg: &mut web::ServiceConfig) {
    group_member_page::configure(cfg);
    group_member_patch::configure(cfg);
    group_member_remove::configure(cfg);
}
