use crate::repository::db::Db;
use mongodb::IndexModel;

pub trait MongoIndexModelProvider {
    /// 集合名称
    fn collection_name() -> &'static str;

    fn index_models() -> Vec<IndexModel>;
}

/// 启动时创建索引（已存在的同名索引会被忽略）
pub async fn ensure_indexes<T>(db: &Db) -> mongodb::error::Result<()>
where
    T: MongoIndexModelProvider + Send + Sync,
{
    let models = T::index_models();
    if models.is_empty() {
        return Ok(());
    }
    db.db.collection::<mongodb::bson::Document>(T::collection_name()).create_indexes(models).await?;
    Ok(())
}
