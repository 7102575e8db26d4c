use crate::biz_services::permission::require_user;
use crate::entitys::user_entity::UserEntity;
use crate::store::DataStore;
use common::errors::AppError;
use common::models::ApiUser;
use common::util::common_utils::build_id;
use common::util::date_util::now;
use common::util::validate::{SLUG_MAX_LEN, slugify};
use log::{info, warn};
use std::sync::Arc;

const MAX_SLUG_ATTEMPTS: u32 = 20;

/// 个人命名空间 slug 的基础值：邮箱前缀 > 姓名 > ID
fn slug_base(user: &ApiUser, user_id: &str) -> String {
    let local_part = user.email.as_deref().and_then(|e| e.split('@').next());
    let full_name = user.full_name();
    [local_part, full_name.as_deref(), Some(user_id)]
        .into_iter()
        .flatten()
        .find_map(slugify)
        .unwrap_or_else(|| "user".to_string())
}

/// `base-n`，必要时截断 base 以满足长度上限
fn with_suffix(base: &str, n: u32) -> String {
    let suffix = format!("-{}", n);
    let head: String = base.chars().take(SLUG_MAX_LEN - suffix.len()).collect();
    format!("{}{}", head.trim_end_matches(['-', '_', '.']), suffix)
}

#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn DataStore>,
}

impl UserService {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self { store }
    }

    /// 返回调用方的用户记录，首次出现时创建，之后同步档案字段
    pub async fn ensure_user(&self, user: &ApiUser) -> Result<UserEntity, AppError> {
        let user_id = require_user(user)?;
        if let Some(existing) = self.store.find_user(user_id).await? {
            return self.refresh_profile(existing, user).await;
        }

        let base = slug_base(user, user_id);
        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let slug = if attempt == 1 { base.clone() } else { with_suffix(&base, attempt) };
            if self.store.find_namespace(&slug).await?.is_some() {
                continue;
            }
            let time = now();
            let entity = UserEntity {
                id: user_id.to_string(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                email: user.email.clone(),
                namespace_id: build_id(),
                slug,
                create_time: time,
                update_time: time,
            };
            match self.store.insert_user(&entity).await {
                Ok(()) => {
                    info!("user registered: id={}, slug={}", entity.id, entity.slug);
                    return Ok(entity);
                }
                Err(AppError::Conflict(msg)) => {
                    // 并发请求可能已创建同一用户
                    if let Some(existing) = self.store.find_user(user_id).await? {
                        return Ok(existing);
                    }
                    warn!("retrying user slug allocation: {}", msg);
                }
                Err(e) => return Err(e),
            }
        }
        Err(AppError::Internal(format!("could not allocate a namespace slug for user '{}'", user_id)))
    }

    async fn refresh_profile(&self, mut existing: UserEntity, user: &ApiUser) -> Result<UserEntity, AppError> {
        if existing.first_name == user.first_name && existing.last_name == user.last_name && existing.email == user.email {
            return Ok(existing);
        }
        existing.first_name = user.first_name.clone();
        existing.last_name = user.last_name.clone();
        existing.email = user.email.clone();
        existing.update_time = now();
        self.store.update_user_profile(&existing).await?;
        Ok(existing)
    }

    pub async fn get_user(&self, user_id: &str) -> Result<UserEntity, AppError> {
        self.store.find_user(user_id).await?.ok_or_else(|| AppError::NotFound(format!("User with id '{}' does not exist", user_id)))
    }

    pub async fn list_users(&self, exact_email: Option<&str>) -> Result<Vec<UserEntity>, AppError> {
        self.store.list_users(exact_email).await
    }
}
