use crate::biz_services::permission::{require_group, require_role, require_user};
use crate::entitys::group_entity::GroupEntity;
use crate::entitys::group_member::{GroupMemberEntity, GroupRole};
use crate::store::DataStore;
use common::errors::AppError;
use common::models::ApiUser;
use common::pagination::{PaginationRequest, PaginationResponse};
use common::util::common_utils::build_id;
use common::util::date_util::now;
use log::info;
use std::sync::Arc;

/// 新建群组参数（字段已在接口层校验）
#[derive(Debug, Clone, Default)]
pub struct NewGroup {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
}

/// 群组部分更新；`description` 为空串表示清空
#[derive(Debug, Clone, Default)]
pub struct GroupPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

impl GroupPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.slug.is_none() && self.description.is_none()
    }
}

#[derive(Clone)]
pub struct GroupService {
    store: Arc<dyn DataStore>,
}

impl GroupService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub async fn list_groups(&self, pagination: &PaginationRequest) -> Result<(Vec<GroupEntity>, PaginationResponse), AppError> {
        let total = self.store.count_groups().await?;
        let groups = self.store.page_groups(pagination.offset(), pagination.per_page).await?;
        Ok((groups, PaginationResponse::new(pagination, total)))
    }

    /// 创建群组，创建者同时成为 owner
    pub async fn create_group(&self, user: &ApiUser, new_group: NewGroup) -> Result<GroupEntity, AppError> {
        let user_id = require_user(user)?;
        let time = now();
        let group = GroupEntity {
            id: build_id(),
            name: new_group.name,
            slug: new_group.slug,
            description: new_group.description.filter(|d| !d.is_empty()),
            created_by: user_id.to_string(),
            create_time: time,
            update_time: time,
        };
        let owner = GroupMemberEntity::new(&group.id, user_id, GroupRole::Owner, time);
        self.store.insert_group(&group, &owner).await?;
        info!("group created: id={}, slug={}, created_by={}", group.id, group.slug, user_id);
        Ok(group)
    }

    pub async fn get_group(&self, slug: &str) -> Result<GroupEntity, AppError> {
        require_group(self.store.as_ref(), slug).await
    }

    pub async fn update_group(&self, user: &ApiUser, slug: &str, patch: GroupPatch) -> Result<GroupEntity, AppError> {
        if patch.is_empty() {
            return Err(AppError::validation("At least one of name, slug or description must be provided"));
        }
        require_user(user)?;
        let mut group = require_group(self.store.as_ref(), slug).await?;
        require_role(self.store.as_ref(), &group, user, GroupRole::Editor).await?;

        if let Some(name) = patch.name {
            group.name = name;
        }
        if let Some(new_slug) = patch.slug {
            group.slug = new_slug;
        }
        if let Some(description) = patch.description {
            group.description = if description.is_empty() { None } else { Some(description) };
        }
        group.update_time = now();
        self.store.update_group(&group).await?;
        info!("group updated: id={}, slug={} -> {}", group.id, slug, group.slug);
        Ok(group)
    }

    /// 幂等删除：群组不存在时同样成功
    pub async fn delete_group(&self, user: &ApiUser, slug: &str) -> Result<(), AppError> {
        require_user(user)?;
        let Some(group) = self.store.find_group_by_slug(slug).await? else {
            return Ok(());
        };
        require_role(self.store.as_ref(), &group, user, GroupRole::Owner).await?;
        if self.store.delete_group(&group.id).await? {
            info!("group deleted: id={}, slug={}", group.id, group.slug);
        }
        Ok(())
    }
}
