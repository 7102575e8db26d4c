use crate::entitys::group_entity::GroupEntity;
use crate::entitys::group_member::GroupRole;
use crate::store::DataStore;
use common::errors::AppError;
use common::models::ApiUser;

/// 匿名调用方返回 `Unauthorized`
pub(crate) fn require_user(user: &ApiUser) -> Result<&str, AppError> {
    user.id.as_deref().ok_or_else(|| AppError::Unauthorized("Authentication is required for this operation".to_string()))
}

pub(crate) async fn require_group(store: &dyn DataStore, slug: &str) -> Result<GroupEntity, AppError> {
    store.find_group_by_slug(slug).await?.ok_or_else(|| AppError::NotFound(format!("Group with slug '{}' does not exist", slug)))
}

/// 调用方在群内的角色，非成员为 `None`
pub(crate) async fn caller_role(store: &dyn DataStore, group: &GroupEntity, user: &ApiUser) -> Result<Option<GroupRole>, AppError> {
    let Some(user_id) = user.id.as_deref() else {
        return Ok(None);
    };
    Ok(store.find_member(&group.id, user_id).await?.map(|m| m.role))
}

/// 管理员或角色不低于 `minimum` 的成员
pub(crate) async fn require_role(store: &dyn DataStore, group: &GroupEntity, user: &ApiUser, minimum: GroupRole) -> Result<(), AppError> {
    require_user(user)?;
    if user.is_admin {
        return Ok(());
    }
    match caller_role(store, group, user).await? {
        Some(role) if role >= minimum => Ok(()),
        _ => Err(AppError::Forbidden(format!(
            "The operation requires at least the '{}' role in group '{}'",
            minimum, group.slug
        ))),
    }
}
