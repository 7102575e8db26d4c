use biz_service::biz_services::group_member_service::{MemberChange, MemberView};
use biz_service::entitys::group_member::GroupRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 群成员，用户已知时附带档案字段
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupMemberResponse {
    /// 成员的外部身份 ID
    pub id: String,
    pub role: GroupRole,
    /// 成员个人命名空间的 slug
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

impl From<MemberView> for GroupMemberResponse {
    fn from(view: MemberView) -> Self {
        let (namespace, first_name, last_name) = match view.user {
            Some(user) => (Some(user.slug), user.first_name, user.last_name),
            None => (None, None, None),
        };
        Self { id: view.member.user_id, role: view.member.role, namespace, first_name, last_name }
    }
}

/// 批量更新中的一项，同时用作响应
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct GroupMemberPatchItem {
    #[schema(example = "user-123")]
    pub id: String,
    pub role: GroupRole,
}

impl From<GroupMemberPatchItem> for MemberChange {
    fn from(item: GroupMemberPatchItem) -> Self {
        MemberChange { user_id: item.id, role: item.role }
    }
}

impl From<MemberChange> for GroupMemberPatchItem {
    fn from(change: MemberChange) -> Self {
        Self { id: change.user_id, role: change.role }
    }
}
