pub mod group_entity;
pub mod group_member;
pub mod namespace_entity;
pub mod user_entity;
