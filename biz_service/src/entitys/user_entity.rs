use mongo_macro::MongoIndexModelProvider;
use serde::{Deserialize, Serialize};

/// 来自身份提供方的用户档案
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, MongoIndexModelProvider)]
#[mongo_collection("users")]
#[mongo_index(fields["email"])]
pub struct UserEntity {
    /// 外部身份 ID
    #[serde(rename = "_id")]
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    /// 个人命名空间
    pub namespace_id: String,
    pub slug: String,
    pub create_time: i64,
    pub update_time: i64,
}
