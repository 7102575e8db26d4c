use mongo_macro::MongoIndexModelProvider;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use utoipa::ToSchema;

/// 命名空间类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NamespaceKind {
    #[default]
    Group,
    User,
}

/// 命名空间记录：每个群组、每个用户各一条，slug 全局唯一
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, MongoIndexModelProvider)]
#[mongo_collection("namespaces")]
#[mongo_index(fields["slug"], unique)]
#[mongo_index(fields["user_id"])]
pub struct NamespaceEntity {
    /// 群组命名空间与群组 ID 相同
    #[serde(rename = "_id")]
    pub id: String,
    pub slug: String,
    pub kind: NamespaceKind,
    pub group_id: Option<String>,
    pub user_id: Option<String>,
    pub created_by: String,
    pub create_time: i64,
}

impl NamespaceEntity {
    pub fn for_group(group_id: &str, slug: &str, created_by: &str, create_time: i64) -> Self {
        Self {
            id: group_id.to_string(),
            slug: slug.to_string(),
            kind: NamespaceKind::Group,
            group_id: Some(group_id.to_string()),
            user_id: None,
            created_by: created_by.to_string(),
            create_time,
        }
    }

    pub fn for_user(namespace_id: &str, user_id: &str, slug: &str, create_time: i64) -> Self {
        Self {
            id: namespace_id.to_string(),
            slug: slug.to_string(),
            kind: NamespaceKind::User,
            group_id: None,
            user_id: Some(user_id.to_string()),
            created_by: user_id.to_string(),
            create_time,
        }
    }
}
