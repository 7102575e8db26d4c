use crate::biz_services::permission::require_user;
use crate::biz_services::user_service::UserService;
use crate::entitys::group_entity::GroupEntity;
use crate::entitys::group_member::GroupRole;
use crate::entitys::namespace_entity::NamespaceKind;
use crate::entitys::user_entity::UserEntity;
use crate::store::DataStore;
use common::errors::AppError;
use common::models::ApiUser;
use common::models::api_user::full_name;
use common::pagination::{PaginationRequest, PaginationResponse};
use std::sync::Arc;

/// 群组与用户命名空间的统一视图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceView {
    pub id: String,
    pub kind: NamespaceKind,
    pub name: Option<String>,
    pub slug: String,
    pub created_by: String,
    pub create_time: i64,
}

impl From<GroupEntity> for NamespaceView {
    fn from(group: GroupEntity) -> Self {
        Self {
            id: group.id,
            kind: NamespaceKind::Group,
            name: Some(group.name),
            slug: group.slug,
            created_by: group.created_by,
            create_time: group.create_time,
        }
    }
}

impl From<UserEntity> for NamespaceView {
    fn from(user: UserEntity) -> Self {
        Self {
            id: user.namespace_id,
            kind: NamespaceKind::User,
            name: full_name(user.first_name.as_deref(), user.last_name.as_deref()),
            slug: user.slug,
            created_by: user.id,
            create_time: user.create_time,
        }
    }
}

#[derive(Clone)]
pub struct NamespaceService {
    store: Arc<dyn DataStore>,
    users: UserService,
}

impl NamespaceService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        let users = UserService::new(store.clone());
        Self { store, users }
    }

    /// 调用方的个人命名空间排在首位，其后是角色满足 `minimum_role` 的群组
    pub async fn list_namespaces(
        &self,
        user: &ApiUser,
        pagination: &PaginationRequest,
        minimum_role: Option<GroupRole>,
    ) -> Result<(Vec<NamespaceView>, PaginationResponse), AppError> {
        let user_id = require_user(user)?;
        let personal = self.users.ensure_user(user).await?;
        let roles = GroupRole::at_least(minimum_role.unwrap_or(GroupRole::Viewer));
        let total = self.store.count_member_groups(user_id, &roles).await? + 1;

        let offset = pagination.offset();
        let mut items = Vec::new();
        let (group_skip, group_limit) = if offset == 0 {
            items.push(NamespaceView::from(personal));
            (0, pagination.per_page - 1)
        } else {
            (offset - 1, pagination.per_page)
        };
        if group_limit > 0 {
            let groups = self.store.page_member_groups(user_id, &roles, group_skip, group_limit).await?;
            items.extend(groups.into_iter().map(NamespaceView::from));
        }
        Ok((items, PaginationResponse::new(pagination, total)))
    }

    pub async fn get_namespace(&self, slug: &str) -> Result<NamespaceView, AppError> {
        let not_found = || AppError::NotFound(format!("Namespace with slug '{}' does not exist", slug));
        let namespace = self.store.find_namespace(slug).await?.ok_or_else(not_found)?;
        match namespace.kind {
            NamespaceKind::Group => {
                let group = self.store.find_group_by_slug(slug).await?.ok_or_else(not_found)?;
                Ok(group.into())
            }
            NamespaceKind::User => {
                let user_id = namespace.user_id.ok_or_else(not_found)?;
                let user = self.store.find_user(&user_id).await?.ok_or_else(not_found)?;
                Ok(user.into())
            }
        }
    }
}
