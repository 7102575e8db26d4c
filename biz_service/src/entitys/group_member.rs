use mongo_macro::MongoIndexModelProvider;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, MongoIndexModelProvider)]
#[mongo_collection("group_members")]
#[mongo_index(fields["group_id", "user_id"], unique)]
#[mongo_index(fields["user_id"])]
pub struct GroupMemberEntity {
    #[serde(rename = "_id")]
    pub id: String, // 成员记录唯一 ID：group_id_user_id
    pub group_id: String,
    pub user_id: String,
    pub role: GroupRole,
    /// 创建时间（Unix 秒时间戳）
    pub create_time: i64,
    /// 最后更新时间（Unix 秒时间戳）
    pub update_time: i64,
}

impl GroupMemberEntity {
    pub fn new(group_id: &str, user_id: &str, role: GroupRole, now: i64) -> Self {
        Self {
            id: Self::build_id(group_id, user_id),
            group_id: group_id.to_string(),
            user_id: user_id.to_string(),
            role,
            create_time: now,
            update_time: now,
        }
    }

    pub fn build_id(group_id: &str, user_id: &str) -> String {
        format!("{}_{}", group_id, user_id)
    }
}

/// 成员角色：owner > editor > viewer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Hash, Default, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum GroupRole {
    #[default]
    Viewer,
    Editor,
    Owner,
}

impl GroupRole {
    pub const ALL: [GroupRole; 3] = [GroupRole::Viewer, GroupRole::Editor, GroupRole::Owner];

    pub fn rank(self) -> u8 {
        match self {
            GroupRole::Viewer => 1,
            GroupRole::Editor => 2,
            GroupRole::Owner => 3,
        }
    }

    /// 所有不低于 `minimum` 的角色
    pub fn at_least(minimum: GroupRole) -> Vec<GroupRole> {
        Self::ALL.into_iter().filter(|role| *role >= minimum).collect()
    }
}

impl Ord for GroupRole {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank().cmp(&other.rank())
    }
}

impl PartialOrd for GroupRole {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
