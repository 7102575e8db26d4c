use crate::biz_services::permission::{require_group, require_role, require_user};
use crate::entitys::group_member::{GroupMemberEntity, GroupRole};
use crate::entitys::user_entity::UserEntity;
use crate::store::DataStore;
use common::errors::AppError;
use common::models::ApiUser;
use common::util::date_util::now;
use log::info;
use std::collections::HashMap;
use std::sync::Arc;

/// 单个成员的角色变更
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberChange {
    pub user_id: String,
    pub role: GroupRole,
}

/// 成员及其用户档案（用户未知时为 `None`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberView {
    pub member: GroupMemberEntity,
    pub user: Option<UserEntity>,
}

/// 同一批次中重复的用户以最后一条为准，保留首次出现的位置
fn merge_changes(changes: Vec<MemberChange>) -> Vec<MemberChange> {
    let mut merged: Vec<MemberChange> = Vec::with_capacity(changes.len());
    for change in changes {
        match merged.iter_mut().find(|c| c.user_id == change.user_id) {
            Some(existing) => existing.role = change.role,
            None => merged.push(change),
        }
    }
    merged
}

#[derive(Clone)]
pub struct GroupMemberService {
    store: Arc<dyn DataStore>,
}

impl GroupMemberService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    pub async fn list_members(&self, slug: &str) -> Result<Vec<MemberView>, AppError> {
        let group = require_group(self.store.as_ref(), slug).await?;
        let members = self.store.list_members(&group.id).await?;
        let user_ids: Vec<String> = members.iter().map(|m| m.user_id.clone()).collect();
        let mut users: HashMap<String, UserEntity> = self.store.find_users(&user_ids).await?.into_iter().map(|u| (u.id.clone(), u)).collect();
        Ok(members
            .into_iter()
            .map(|member| {
                let user = users.remove(&member.user_id);
                MemberView { member, user }
            })
            .collect())
    }

    /// 批量新增或更新成员角色，未出现在列表中的成员保持不变
    pub async fn update_members(&self, user: &ApiUser, slug: &str, changes: Vec<MemberChange>) -> Result<Vec<MemberChange>, AppError> {
        require_user(user)?;
        let group = require_group(self.store.as_ref(), slug).await?;
        require_role(self.store.as_ref(), &group, user, GroupRole::Owner).await?;

        let changes = merge_changes(changes);
        if changes.is_empty() {
            return Ok(changes);
        }
        let time = now();
        let members: Vec<GroupMemberEntity> = changes.iter().map(|c| GroupMemberEntity::new(&group.id, &c.user_id, c.role, time)).collect();
        self.store.upsert_members(&group.id, &members).await?;
        info!("group members updated: group={}, count={}", group.slug, members.len());
        Ok(changes)
    }

    /// 幂等移除：成员不存在时同样成功，群组不存在返回 `NotFound`
    pub async fn remove_member(&self, user: &ApiUser, slug: &str, member_id: &str) -> Result<(), AppError> {
        let caller_id = require_user(user)?;
        let group = require_group(self.store.as_ref(), slug).await?;
        if caller_id != member_id {
            require_role(self.store.as_ref(), &group, user, GroupRole::Owner).await?;
        }
        if self.store.delete_member(&group.id, member_id).await? {
            info!("group member removed: group={}, user={}", group.slug, member_id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::biz_services::group_service::GroupService;
    use crate::biz_services::group_service::tests::{caller, new_group};
    use crate::store::MemoryStore;

    fn change(user_id: &str, role: GroupRole) -> MemberChange {
        MemberChange { user_id: user_id.to_string(), role }
    }

    async fn setup() -> (Arc<dyn DataStore>, GroupMemberService) {
        let store: Arc<dyn DataStore> = Arc::new(MemoryStore::new());
        GroupService::new(store.clone()).create_group(&caller("owner"), new_group("team")).await.unwrap();
        (store.clone(), GroupMemberService::new(store))
    }

    fn roles(views: &[MemberView]) -> Vec<(String, GroupRole)> {
        let mut list: Vec<(String, GroupRole)> = views.iter().map(|v| (v.member.user_id.clone(), v.member.role)).collect();
        list.sort();
        list
    }

    #[test]
    fn test_merge_changes_last_wins() {
        let merged = merge_changes(vec![change("a", GroupRole::Viewer), change("b", GroupRole::Owner), change("a", GroupRole::Editor)]);
        assert_eq!(merged, vec![change("a", GroupRole::Editor), change("b", GroupRole::Owner)]);
    }

    #[tokio::test]
    async fn test_bulk_patch_keeps_other_members() {
        let (_, service) = setup().await;
        let owner = caller("owner");
        service.update_members(&owner, "team", vec![change("a", GroupRole::Viewer), change("c", GroupRole::Viewer)]).await.unwrap();

        let applied = service.update_members(&owner, "team", vec![change("a", GroupRole::Editor), change("b", GroupRole::Viewer)]).await.unwrap();
        assert_eq!(applied.len(), 2);

        let members = service.list_members("team").await.unwrap();
        assert_eq!(
            roles(&members),
            vec![
                ("a".to_string(), GroupRole::Editor),
                ("b".to_string(), GroupRole::Viewer),
                ("c".to_string(), GroupRole::Viewer),
                ("owner".to_string(), GroupRole::Owner),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_requires_owner() {
        let (_, service) = setup().await;
        service.update_members(&caller("owner"), "team", vec![change("ed", GroupRole::Editor)]).await.unwrap();

        let err = service.update_members(&caller("ed"), "team", vec![change("x", GroupRole::Viewer)]).await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
        let err = service.update_members(&ApiUser::anonymous(), "team", vec![]).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
        let err = service.update_members(&caller("owner"), "nope", vec![]).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_members_with_profile() {
        let (store, service) = setup().await;
        let user = UserEntity { id: "owner".into(), first_name: Some("Olga".into()), slug: "olga".into(), namespace_id: "ns".into(), ..Default::default() };
        store.insert_user(&user).await.unwrap();
        service.update_members(&caller("owner"), "team", vec![change("ghost", GroupRole::Viewer)]).await.unwrap();

        let members = service.list_members("team").await.unwrap();
        let owner = members.iter().find(|m| m.member.user_id == "owner").unwrap();
        assert_eq!(owner.user.as_ref().map(|u| u.slug.as_str()), Some("olga"));
        let ghost = members.iter().find(|m| m.member.user_id == "ghost").unwrap();
        assert!(ghost.user.is_none());

        assert!(matches!(service.list_members("nope").await.unwrap_err(), AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_member() {
        let (_, service) = setup().await;
        service.update_members(&caller("owner"), "team", vec![change("a", GroupRole::Viewer), change("b", GroupRole::Viewer)]).await.unwrap();

        let err = service.remove_member(&caller("a"), "team", "b").await.unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));

        service.remove_member(&caller("a"), "team", "a").await.unwrap();
        service.remove_member(&caller("owner"), "team", "b").await.unwrap();
        service.remove_member(&caller("owner"), "team", "b").await.unwrap();
        assert_eq!(roles(&service.list_members("team").await.unwrap()), vec![("owner".to_string(), GroupRole::Owner)]);

        let err = service.remove_member(&caller("owner"), "nope", "b").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
