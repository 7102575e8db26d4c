use biz_service::biz_services::group_service::{GroupPatch, NewGroup};
use biz_service::entitys::group_entity::GroupEntity;
use common::util::date_util::time_to_iso;
use common::util::validate::{validate_description, validate_name, validate_slug};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationErrors};

/// 群组
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GroupResponse {
    /// ULID
    #[schema(example = "01HRA8P2W3K5N0ZJQ1Y7F4C6XD")]
    pub id: String,
    #[schema(example = "R Project")]
    pub name: String,
    #[schema(example = "r-project")]
    pub slug: String,
    /// UTC ISO-8601
    pub creation_date: String,
    pub created_by: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<GroupEntity> for GroupResponse {
    fn from(group: GroupEntity) -> Self {
        Self {
            id: group.id,
            name: group.name,
            slug: group.slug,
            creation_date: time_to_iso(group.create_time),
            created_by: group.created_by,
            description: group.description,
        }
    }
}

/// 创建群组请求体
#[derive(Debug, Deserialize, Serialize, ToSchema, Validate)]
pub struct GroupPostRequest {
    #[schema(example = "R Project")]
    #[validate(custom(function = "validate_name"))]
    pub name: String,
    #[schema(example = "r-project")]
    #[validate(custom(function = "validate_slug"))]
    pub slug: String,
    #[validate(custom(function = "validate_description"))]
    pub description: Option<String>,
}

impl From<GroupPostRequest> for NewGroup {
    fn from(req: GroupPostRequest) -> Self {
        NewGroup { name: req.name, slug: req.slug, description: req.description }
    }
}

/// 部分更新请求体，至少包含一个字段；`description` 传空串表示清空
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct GroupPatchRequest {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<String>,
}

impl Validate for GroupPatchRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(Err(e)) = self.name.as_deref().map(validate_name) {
            errors.add("name", e);
        }
        if let Some(Err(e)) = self.slug.as_deref().map(validate_slug) {
            errors.add("slug", e);
        }
        if let Some(Err(e)) = self.description.as_deref().map(validate_description) {
            errors.add("description", e);
        }
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl From<GroupPatchRequest> for GroupPatch {
    fn from(req: GroupPatchRequest) -> Self {
        GroupPatch { name: req.name, slug: req.slug, description: req.description }
    }
}
