use crate::entitys::group_entity::GroupEntity;
use crate::entitys::group_member::{GroupMemberEntity, GroupRole};
use crate::entitys::namespace_entity::NamespaceEntity;
use crate::entitys::user_entity::UserEntity;
use crate::store::{DataStore, group_not_found, slug_conflict};
use async_trait::async_trait;
use common::errors::AppError;
use std::collections::{BTreeMap, HashMap, HashSet};
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct MemoryState {
    groups: HashMap<String, GroupEntity>,
    members: BTreeMap<String, GroupMemberEntity>,
    /// key: slug
    namespaces: HashMap<String, NamespaceEntity>,
    users: HashMap<String, UserEntity>,
}

impl MemoryState {
    fn member_group_ids(&self, user_id: &str, roles: &[GroupRole]) -> HashSet<&str> {
        self.members
            .values()
            .filter(|m| m.user_id == user_id && roles.contains(&m.role))
            .map(|m| m.group_id.as_str())
            .collect()
    }
}

fn sorted_groups<'a>(groups: impl Iterator<Item = &'a GroupEntity>) -> Vec<&'a GroupEntity> {
    let mut list: Vec<&GroupEntity> = groups.collect();
    list.sort_by(|a, b| (a.create_time, &a.id).cmp(&(b.create_time, &b.id)));
    list
}

fn page<T: Clone>(list: Vec<&T>, skip: u64, limit: u64) -> Vec<T> {
    let skip = usize::try_from(skip).unwrap_or(usize::MAX);
    let limit = usize::try_from(limit).unwrap_or(usize::MAX);
    list.into_iter().skip(skip).take(limit).cloned().collect()
}

/// 内存存储：单把读写锁保护全部状态，每个操作天然原子
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataStore for MemoryStore {
    async fn count_groups(&self) -> Result<u64, AppError> {
        Ok(self.state.read().await.groups.len() as u64)
    }

    async fn page_groups(&self, skip: u64, limit: u64) -> Result<Vec<GroupEntity>, AppError> {
        let state = self.state.read().await;
        Ok(page(sorted_groups(state.groups.values()), skip, limit))
    }

    async fn find_group_by_slug(&self, slug: &str) -> Result<Option<GroupEntity>, AppError> {
        let state = self.state.read().await;
        Ok(state.groups.values().find(|g| g.slug == slug).cloned())
    }

    async fn insert_group(&self, group: &GroupEntity, owner: &GroupMemberEntity) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if state.namespaces.contains_key(&group.slug) {
            return Err(slug_conflict(&group.slug));
        }
        if state.groups.contains_key(&group.id) {
            return Err(AppError::Conflict(format!("Group with id '{}' already exists", group.id)));
        }
        state
            .namespaces
            .insert(group.slug.clone(), NamespaceEntity::for_group(&group.id, &group.slug, &group.created_by, group.create_time));
        state.groups.insert(group.id.clone(), group.clone());
        state.members.insert(owner.id.clone(), owner.clone());
        Ok(())
    }

    async fn update_group(&self, group: &GroupEntity) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        let previous_slug = match state.groups.get(&group.id) {
            Some(existing) => existing.slug.clone(),
            None => return Err(group_not_found(&group.id)),
        };
        if previous_slug != group.slug {
            if state.namespaces.contains_key(&group.slug) {
                return Err(slug_conflict(&group.slug));
            }
            if let Some(mut namespace) = state.namespaces.remove(&previous_slug) {
                namespace.slug = group.slug.clone();
                state.namespaces.insert(group.slug.clone(), namespace);
            }
        }
        if let Some(existing) = state.groups.get_mut(&group.id) {
            existing.name = group.name.clone();
            existing.slug = group.slug.clone();
            existing.description = group.description.clone();
            existing.update_time = group.update_time;
        }
        Ok(())
    }

    async fn delete_group(&self, group_id: &str) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        let Some(group) = state.groups.remove(group_id) else {
            return Ok(false);
        };
        state.namespaces.remove(&group.slug);
        state.members.retain(|_, m| m.group_id != group_id);
        Ok(true)
    }

    async fn list_members(&self, group_id: &str) -> Result<Vec<GroupMemberEntity>, AppError> {
        let state = self.state.read().await;
        let mut members: Vec<GroupMemberEntity> = state.members.values().filter(|m| m.group_id == group_id).cloned().collect();
        members.sort_by(|a, b| (a.create_time, &a.user_id).cmp(&(b.create_time, &b.user_id)));
        Ok(members)
    }

    async fn find_member(&self, group_id: &str, user_id: &str) -> Result<Option<GroupMemberEntity>, AppError> {
        let state = self.state.read().await;
        Ok(state.members.get(&GroupMemberEntity::build_id(group_id, user_id)).cloned())
    }

    async fn upsert_members(&self, group_id: &str, members: &[GroupMemberEntity]) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if !state.groups.contains_key(group_id) {
            return Err(group_not_found(group_id));
        }
        for member in members {
            state
                .members
                .entry(member.id.clone())
                .and_modify(|existing| {
                    existing.role = member.role;
                    existing.update_time = member.update_time;
                })
                .or_insert_with(|| member.clone());
        }
        Ok(())
    }

    async fn delete_member(&self, group_id: &str, user_id: &str) -> Result<bool, AppError> {
        let mut state = self.state.write().await;
        Ok(state.members.remove(&GroupMemberEntity::build_id(group_id, user_id)).is_some())
    }

    async fn count_member_groups(&self, user_id: &str, roles: &[GroupRole]) -> Result<u64, AppError> {
        let state = self.state.read().await;
        let group_ids = state.member_group_ids(user_id, roles);
        Ok(state.groups.keys().filter(|id| group_ids.contains(id.as_str())).count() as u64)
    }

    async fn page_member_groups(&self, user_id: &str, roles: &[GroupRole], skip: u64, limit: u64) -> Result<Vec<GroupEntity>, AppError> {
        let state = self.state.read().await;
        let group_ids = state.member_group_ids(user_id, roles);
        let groups = sorted_groups(state.groups.values().filter(|g| group_ids.contains(g.id.as_str())));
        Ok(page(groups, skip, limit))
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<UserEntity>, AppError> {
        Ok(self.state.read().await.users.get(user_id).cloned())
    }

    async fn find_users(&self, user_ids: &[String]) -> Result<Vec<UserEntity>, AppError> {
        let state = self.state.read().await;
        Ok(user_ids.iter().filter_map(|id| state.users.get(id).cloned()).collect())
    }

    async fn list_users(&self, email: Option<&str>) -> Result<Vec<UserEntity>, AppError> {
        let state = self.state.read().await;
        let mut users: Vec<UserEntity> = state
            .users
            .values()
            .filter(|u| email.is_none_or(|e| u.email.as_deref() == Some(e)))
            .cloned()
            .collect();
        users.sort_by(|a, b| (a.create_time, &a.id).cmp(&(b.create_time, &b.id)));
        Ok(users)
    }

    async fn insert_user(&self, user: &UserEntity) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if state.namespaces.contains_key(&user.slug) {
            return Err(slug_conflict(&user.slug));
        }
        if state.users.contains_key(&user.id) {
            return Err(AppError::Conflict(format!("User with id '{}' already exists", user.id)));
        }
        state
            .namespaces
            .insert(user.slug.clone(), NamespaceEntity::for_user(&user.namespace_id, &user.id, &user.slug, user.create_time));
        state.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn update_user_profile(&self, user: &UserEntity) -> Result<(), AppError> {
        let mut state = self.state.write().await;
        if let Some(existing) = state.users.get_mut(&user.id) {
            existing.first_name = user.first_name.clone();
            existing.last_name = user.last_name.clone();
            existing.email = user.email.clone();
            existing.update_time = user.update_time;
        }
        Ok(())
    }

    async fn find_namespace(&self, slug: &str) -> Result<Option<NamespaceEntity>, AppError> {
        Ok(self.state.read().await.namespaces.get(slug).cloned())
    }
}
