use mongo_macro::MongoIndexModelProvider;
use serde::{Deserialize, Serialize};

/// 群组
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq, MongoIndexModelProvider)]
#[mongo_collection("groups")]
#[mongo_index(fields["slug"], unique)]
#[mongo_index(fields["create_time", "_id"])]
pub struct GroupEntity {
    /// 群组唯一 ID（ULID）
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    /// URL 中使用的唯一标识
    pub slug: String,
    pub description: Option<String>,
    /// 创建者外部身份 ID
    pub created_by: String,
    /// 创建时间（Unix 秒时间戳）
    pub create_time: i64,
    /// 最后更新时间（Unix 秒时间戳）
    pub update_time: i64,
}
