use crate::entitys::group_entity::GroupEntity;
use crate::entitys::group_member::{GroupMemberEntity, GroupRole};
use crate::entitys::namespace_entity::NamespaceEntity;
use crate::entitys::user_entity::UserEntity;
use async_trait::async_trait;
use common::config::{DatabaseConfig, StoreKind};
use common::errors::AppError;
use common::repository::db::Db;
use log::info;
use std::sync::Arc;

pub mod memory_store;
pub mod mongo_store;

pub use memory_store::MemoryStore;
pub use mongo_store::MongoStore;

/// 存储层接口。所有列表按 (create_time, id) 升序返回。
#[async_trait]
pub trait DataStore: Send + Sync {
    // ---- 群组 ----
    async fn count_groups(&self) -> Result<u64, AppError>;
    async fn page_groups(&self, skip: u64, limit: u64) -> Result<Vec<GroupEntity>, AppError>;
    async fn find_group_by_slug(&self, slug: &str) -> Result<Option<GroupEntity>, AppError>;
    /// 同一事务写入群组、命名空间和群主；slug 已被占用时返回 `Conflict`
    async fn insert_group(&self, group: &GroupEntity, owner: &GroupMemberEntity) -> Result<(), AppError>;
    /// 按 id 覆盖 name/slug/description，slug 同步到命名空间
    async fn update_group(&self, group: &GroupEntity) -> Result<(), AppError>;
    /// 级联删除命名空间与成员，群组不存在时返回 `false`
    async fn delete_group(&self, group_id: &str) -> Result<bool, AppError>;

    // ---- 成员 ----
    async fn list_members(&self, group_id: &str) -> Result<Vec<GroupMemberEntity>, AppError>;
    async fn find_member(&self, group_id: &str, user_id: &str) -> Result<Option<GroupMemberEntity>, AppError>;
    /// 已存在的成员只更新角色，其余插入；整批原子执行，群组已删除时返回 `NotFound`
    async fn upsert_members(&self, group_id: &str, members: &[GroupMemberEntity]) -> Result<(), AppError>;
    async fn delete_member(&self, group_id: &str, user_id: &str) -> Result<bool, AppError>;
    async fn count_member_groups(&self, user_id: &str, roles: &[GroupRole]) -> Result<u64, AppError>;
    async fn page_member_groups(&self, user_id: &str, roles: &[GroupRole], skip: u64, limit: u64) -> Result<Vec<GroupEntity>, AppError>;

    // ---- 用户与命名空间 ----
    async fn find_user(&self, user_id: &str) -> Result<Option<UserEntity>, AppError>;
    async fn find_users(&self, user_ids: &[String]) -> Result<Vec<UserEntity>, AppError>;
    async fn list_users(&self, email: Option<&str>) -> Result<Vec<UserEntity>, AppError>;
    /// 同一事务写入用户与个人命名空间；slug 已被占用时返回 `Conflict`
    async fn insert_user(&self, user: &UserEntity) -> Result<(), AppError>;
    async fn update_user_profile(&self, user: &UserEntity) -> Result<(), AppError>;
    async fn find_namespace(&self, slug: &str) -> Result<Option<NamespaceEntity>, AppError>;
}

pub(crate) fn group_not_found(group_id: &str) -> AppError {
    AppError::NotFound(format!("Group with id '{}' does not exist", group_id))
}

pub(crate) fn slug_conflict(slug: &str) -> AppError {
    AppError::Conflict(format!("The slug '{}' is already in use", slug))
}

/// 按配置创建存储实现
pub async fn build_store(config: &DatabaseConfig) -> anyhow::Result<Arc<dyn DataStore>> {
    match config.kind {
        StoreKind::Memory => {
            info!("using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreKind::Mongo => {
            info!("using MongoDB store, db={}", config.db_name);
            let store = MongoStore::new(Db::connect(config).await?);
            store.init_indexes().await?;
            Ok(Arc::new(store))
        }
    }
}
