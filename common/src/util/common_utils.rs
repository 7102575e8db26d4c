use ulid::Ulid;

/// 生成 26 位 ULID（Crockford base32）
pub fn build_id() -> String {
    Ulid::new().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_id() {
        let id = build_id();
        assert_eq!(id.len(), 26);
        // 不区分大小写
        assert!(Ulid::from_string(&id.to_lowercase().to_ascii_uppercase()).is_ok());
        assert_ne!(build_id(), build_id());
    }
}
