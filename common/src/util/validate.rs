use lazy_static::lazy_static;
use regex::Regex;
use std::borrow::Cow;
use validator::ValidationError;

pub const SLUG_MAX_LEN: usize = 99;
pub const NAME_MAX_LEN: usize = 99;
pub const DESCRIPTION_MAX_LEN: usize = 500;

lazy_static! {
    static ref SLUG_CHARS_RE: Regex = Regex::new(r"^[a-zA-Z0-9][a-zA-Z0-9\-_.]*$").unwrap();
    static ref SLUG_DOUBLE_SEP_RE: Regex = Regex::new(r"[-._][-._]").unwrap();
    static ref SLUG_INVALID_CHAR_RE: Regex = Regex::new(r"[^a-z0-9\-_.]").unwrap();
    static ref SLUG_SEP_RUN_RE: Regex = Regex::new(r"[-._]{2,}").unwrap();
}

fn error(code: &'static str, message: String) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Owned(message))
}

/// ✅ slug 校验：字母数字开头，仅允许 `-_.`，不允许连续分隔符，不能以 `.git`/`.atom` 结尾
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    let len = slug.chars().count();
    if len == 0 || len > SLUG_MAX_LEN {
        return Err(error("slug", format!("slug must be between 1 and {} characters long", SLUG_MAX_LEN)));
    }
    if !SLUG_CHARS_RE.is_match(slug) {
        return Err(error(
            "slug",
            "slug must start with a letter or number and contain only letters, numbers, '-', '_' and '.'".to_string(),
        ));
    }
    if SLUG_DOUBLE_SEP_RE.is_match(slug) {
        return Err(error("slug", "slug must not contain two consecutive '-', '_' or '.' characters".to_string()));
    }
    if slug.ends_with(".git") || slug.ends_with(".atom") {
        return Err(error("slug", "slug must not end with '.git' or '.atom'".to_string()));
    }
    Ok(())
}

/// 名称：去除首尾空白后 1..=99 个字符，不允许空字节
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    let len = name.trim().chars().count();
    if len == 0 || name.chars().count() > NAME_MAX_LEN {
        return Err(error("name", format!("name must be between 1 and {} characters long", NAME_MAX_LEN)));
    }
    if name.contains('\0') {
        return Err(error("name", "name must not contain null bytes".to_string()));
    }
    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        return Err(error("description", format!("description must be at most {} characters long", DESCRIPTION_MAX_LEN)));
    }
    if description.contains('\0') {
        return Err(error("description", "description must not contain null bytes".to_string()));
    }
    Ok(())
}

/// 从任意文本生成合法 slug，无法生成时返回 `None`
pub fn slugify(value: &str) -> Option<String> {
    let lowered = value.trim().to_lowercase();
    let replaced = SLUG_INVALID_CHAR_RE.replace_all(&lowered, "-");
    let collapsed = SLUG_SEP_RUN_RE.replace_all(&replaced, "-");
    let mut slug: String = collapsed.trim_start_matches(['-', '_', '.']).chars().take(SLUG_MAX_LEN).collect();
    loop {
        let trimmed = slug.trim_end_matches(['-', '_', '.']);
        let stripped = trimmed.strip_suffix(".git").or_else(|| trimmed.strip_suffix(".atom"));
        match stripped {
            Some(rest) => slug = rest.to_string(),
            None => {
                slug = trimmed.to_string();
                break;
            }
        }
    }
    if validate_slug(&slug).is_ok() { Some(slug) } else { None }
}
