use crate::entitys::group_entity::GroupEntity;
use crate::entitys::group_member::{GroupMemberEntity, GroupRole};
use crate::entitys::namespace_entity::NamespaceEntity;
use crate::entitys::user_entity::UserEntity;
use crate::store::{DataStore, group_not_found, slug_conflict};
use async_trait::async_trait;
use common::errors::AppError;
use common::index_trait::{MongoIndexModelProvider, ensure_indexes};
use common::repository::db::Db;
use common::repository_util::{BaseRepository, Repository, is_duplicate_key};
use mongodb::bson::{Document, doc};

fn by_creation() -> Document {
    doc! { "create_time": 1, "_id": 1 }
}

fn role_names(roles: &[GroupRole]) -> Vec<String> {
    roles.iter().map(|r| r.to_string()).collect()
}

/// 唯一索引冲突转换为 slug 冲突
fn map_slug_error(e: mongodb::error::Error, slug: &str) -> AppError {
    if is_duplicate_key(&e) { slug_conflict(slug) } else { AppError::Mongo(e) }
}

/// MongoDB 存储，多文档写入走事务（需要副本集部署）
pub struct MongoStore {
    db: Db,
    groups: BaseRepository<GroupEntity>,
    members: BaseRepository<GroupMemberEntity>,
    namespaces: BaseRepository<NamespaceEntity>,
    users: BaseRepository<UserEntity>,
}

impl MongoStore {
    pub fn new(db: Db) -> Self {
        let groups = BaseRepository::new(db.db.collection(GroupEntity::collection_name()));
        let members = BaseRepository::new(db.db.collection(GroupMemberEntity::collection_name()));
        let namespaces = BaseRepository::new(db.db.collection(NamespaceEntity::collection_name()));
        let users = BaseRepository::new(db.db.collection(UserEntity::collection_name()));
        Self { db, groups, members, namespaces, users }
    }

    pub async fn init_indexes(&self) -> Result<(), AppError> {
        ensure_indexes::<GroupEntity>(&self.db).await?;
        ensure_indexes::<GroupMemberEntity>(&self.db).await?;
        ensure_indexes::<NamespaceEntity>(&self.db).await?;
        ensure_indexes::<UserEntity>(&self.db).await?;
        Ok(())
    }

    async fn member_group_ids(&self, user_id: &str, roles: &[GroupRole]) -> Result<Vec<String>, AppError> {
        let members = self
            .members
            .find_all(doc! { "user_id": user_id, "role": { "$in": role_names(roles) } }, doc! { "_id": 1 })
            .await?;
        Ok(members.into_iter().map(|m| m.group_id).collect())
    }
}

#[async_trait]
impl DataStore for MongoStore {
    async fn count_groups(&self) -> Result<u64, AppError> {
        Ok(self.groups.count(doc! {}).await?)
    }

    async fn page_groups(&self, skip: u64, limit: u64) -> Result<Vec<GroupEntity>, AppError> {
        Ok(self.groups.query_by_page(doc! {}, by_creation(), skip, limit).await?)
    }

    async fn find_group_by_slug(&self, slug: &str) -> Result<Option<GroupEntity>, AppError> {
        Ok(self.groups.find_one(doc! { "slug": slug }).await?)
    }

    async fn insert_group(&self, group: &GroupEntity, owner: &GroupMemberEntity) -> Result<(), AppError> {
        let namespace = NamespaceEntity::for_group(&group.id, &group.slug, &group.created_by, group.create_time);
        let mut session = self.db.start_transaction().await?;
        let result: Result<(), AppError> = async {
            self.namespaces.insert(&namespace, Some(&mut session)).await.map_err(|e| map_slug_error(e, &group.slug))?;
            self.groups.insert(group, Some(&mut session)).await.map_err(|e| map_slug_error(e, &group.slug))?;
            self.members.insert(owner, Some(&mut session)).await?;
            Ok(())
        }
        .await;
        self.db.finish_transaction(session, result).await
    }

    async fn update_group(&self, group: &GroupEntity) -> Result<(), AppError> {
        let mut session = self.db.start_transaction().await?;
        let result: Result<(), AppError> = async {
            self.namespaces
                .update_one(doc! { "_id": &group.id }, doc! { "$set": { "slug": &group.slug } }, Some(&mut session))
                .await
                .map_err(|e| map_slug_error(e, &group.slug))?;
            let matched = self
                .groups
                .update_one(
                    doc! { "_id": &group.id },
                    doc! { "$set": {
                        "name": &group.name,
                        "slug": &group.slug,
                        "description": group.description.as_deref(),
                        "update_time": group.update_time,
                    } },
                    Some(&mut session),
                )
                .await
                .map_err(|e| map_slug_error(e, &group.slug))?;
            if matched == 0 {
                return Err(group_not_found(&group.id));
            }
            Ok(())
        }
        .await;
        self.db.finish_transaction(session, result).await
    }

    async fn delete_group(&self, group_id: &str) -> Result<bool, AppError> {
        let mut session = self.db.start_transaction().await?;
        let result: Result<bool, AppError> = async {
            let deleted = self.groups.delete(doc! { "_id": group_id }, Some(&mut session)).await?;
            self.namespaces.delete(doc! { "_id": group_id }, Some(&mut session)).await?;
            self.members.delete(doc! { "group_id": group_id }, Some(&mut session)).await?;
            Ok(deleted > 0)
        }
        .await;
        self.db.finish_transaction(session, result).await
    }

    async fn list_members(&self, group_id: &str) -> Result<Vec<GroupMemberEntity>, AppError> {
        Ok(self.members.find_all(doc! { "group_id": group_id }, doc! { "create_time": 1, "user_id": 1 }).await?)
    }

    async fn find_member(&self, group_id: &str, user_id: &str) -> Result<Option<GroupMemberEntity>, AppError> {
        Ok(self.members.find_by_id(&GroupMemberEntity::build_id(group_id, user_id)).await?)
    }

    async fn upsert_members(&self, group_id: &str, members: &[GroupMemberEntity]) -> Result<(), AppError> {
        let mut session = self.db.start_transaction().await?;
        let result: Result<(), AppError> = async {
            // 事务内确认群组仍存在，避免与删除并发时留下孤立成员
            let group = self.groups.collection.find_one(doc! { "_id": group_id }).session(&mut session).await?;
            if group.is_none() {
                return Err(group_not_found(group_id));
            }
            for member in members {
                self.members
                    .upsert_one(
                        doc! { "_id": &member.id },
                        doc! {
                            "$set": { "role": member.role.to_string(), "update_time": member.update_time },
                            "$setOnInsert": {
                                "group_id": &member.group_id,
                                "user_id": &member.user_id,
                                "create_time": member.create_time,
                            },
                        },
                        Some(&mut session),
                    )
                    .await?;
            }
            Ok(())
        }
        .await;
        self.db.finish_transaction(session, result).await
    }

    async fn delete_member(&self, group_id: &str, user_id: &str) -> Result<bool, AppError> {
        let deleted = self.members.delete(doc! { "_id": GroupMemberEntity::build_id(group_id, user_id) }, None).await?;
        Ok(deleted > 0)
    }

    async fn count_member_groups(&self, user_id: &str, roles: &[GroupRole]) -> Result<u64, AppError> {
        let group_ids = self.member_group_ids(user_id, roles).await?;
        if group_ids.is_empty() {
            return Ok(0);
        }
        Ok(self.groups.count(doc! { "_id": { "$in": group_ids } }).await?)
    }

    async fn page_member_groups(&self, user_id: &str, roles: &[GroupRole], skip: u64, limit: u64) -> Result<Vec<GroupEntity>, AppError> {
        let group_ids = self.member_group_ids(user_id, roles).await?;
        if group_ids.is_empty() {
            return Ok(vec![]);
        }
        Ok(self.groups.query_by_page(doc! { "_id": { "$in": group_ids } }, by_creation(), skip, limit).await?)
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<UserEntity>, AppError> {
        Ok(self.users.find_by_id(user_id).await?)
    }

    async fn find_users(&self, user_ids: &[String]) -> Result<Vec<UserEntity>, AppError> {
        if user_ids.is_empty() {
            return Ok(vec![]);
        }
        Ok(self.users.find_all(doc! { "_id": { "$in": user_ids.to_vec() } }, by_creation()).await?)
    }

    async fn list_users(&self, email: Option<&str>) -> Result<Vec<UserEntity>, AppError> {
        let filter = match email {
            Some(email) => doc! { "email": email },
            None => doc! {},
        };
        Ok(self.users.find_all(filter, by_creation()).await?)
    }

    async fn insert_user(&self, user: &UserEntity) -> Result<(), AppError> {
        let namespace = NamespaceEntity::for_user(&user.namespace_id, &user.id, &user.slug, user.create_time);
        let mut session = self.db.start_transaction().await?;
        let result: Result<(), AppError> = async {
            self.namespaces.insert(&namespace, Some(&mut session)).await.map_err(|e| map_slug_error(e, &user.slug))?;
            self.users.insert(user, Some(&mut session)).await.map_err(|e| {
                if is_duplicate_key(&e) {
                    AppError::Conflict(format!("User with id '{}' already exists", user.id))
                } else {
                    AppError::Mongo(e)
                }
            })?;
            Ok(())
        }
        .await;
        self.db.finish_transaction(session, result).await
    }

    async fn update_user_profile(&self, user: &UserEntity) -> Result<(), AppError> {
        self.users
            .update_one(
                doc! { "_id": &user.id },
                doc! { "$set": {
                    "first_name": user.first_name.as_deref(),
                    "last_name": user.last_name.as_deref(),
                    "email": user.email.as_deref(),
                    "update_time": user.update_time,
                } },
                None,
            )
            .await?;
        Ok(())
    }

    async fn find_namespace(&self, slug: &str) -> Result<Option<NamespaceEntity>, AppError> {
        Ok(self.namespaces.find_one(doc! { "slug": slug }).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::from_document;
    use mongodb::error::{CommandError, Error, ErrorKind, WriteError, WriteFailure};

    fn error_doc(code: i32) -> Document {
        doc! { "code": code, "codeName": "Error", "errmsg": "server error" }
    }

    #[test]
    fn test_duplicate_key_becomes_slug_conflict() {
        let write_error: WriteError = from_document(error_doc(11000)).unwrap();
        let err = Error::from(ErrorKind::Write(WriteFailure::WriteError(write_error)));
        match map_slug_error(err, "r-project") {
            AppError::Conflict(msg) => assert!(msg.contains("r-project")),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_other_errors_stay_internal() {
        let command_error: CommandError = from_document(error_doc(112)).unwrap();
        let err = Error::from(ErrorKind::Command(command_error));
        assert!(matches!(map_slug_error(err, "r-project"), AppError::Mongo(_)));
    }
}
