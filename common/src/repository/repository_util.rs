use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::{ClientSession, Collection, error::Result};
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;

const DUPLICATE_KEY_CODE: i32 = 11000;

/// 唯一索引冲突
pub fn is_duplicate_key(e: &mongodb::error::Error) -> bool {
    match e.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(we)) => we.code == DUPLICATE_KEY_CODE,
        ErrorKind::Command(ce) => ce.code == DUPLICATE_KEY_CODE,
        _ => false,
    }
}

#[async_trait]
pub trait Repository<T> {
    async fn find_by_id(&self, id: &str) -> Result<Option<T>>;
    async fn find_one(&self, filter: Document) -> Result<Option<T>>;
    async fn find_all(&self, filter: Document, sort: Document) -> Result<Vec<T>>;
    async fn query_by_page(&self, filter: Document, sort: Document, skip: u64, limit: u64) -> Result<Vec<T>>;
    async fn count(&self, filter: Document) -> Result<u64>;
    // 写操作：传入 session 时加入当前事务
    async fn insert(&self, entity: &T, session: Option<&mut ClientSession>) -> Result<()>;
    async fn update_one(&self, filter: Document, update: Document, session: Option<&mut ClientSession>) -> Result<u64>;
    async fn upsert_one(&self, filter: Document, update: Document, session: Option<&mut ClientSession>) -> Result<()>;
    async fn delete(&self, filter: Document, session: Option<&mut ClientSession>) -> Result<u64>;
}

pub struct BaseRepository<T: Send + Sync> {
    pub collection: Collection<T>,
    _marker: PhantomData<T>,
}

impl<T: Send + Sync> BaseRepository<T> {
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection, _marker: Default::default() }
    }
}

impl<T: Send + Sync> Clone for BaseRepository<T> {
    fn clone(&self) -> Self {
        Self::new(self.collection.clone())
    }
}

#[async_trait]
impl<T> Repository<T> for BaseRepository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    async fn find_by_id(&self, id: &str) -> Result<Option<T>> {
        self.find_one(doc! { "_id": id }).await
    }

    async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        let result = self.collection.find_one(filter).await?;
        Ok(result)
    }

    async fn find_all(&self, filter: Document, sort: Document) -> Result<Vec<T>> {
        let cursor = self.collection.find(filter).sort(sort).await?;
        cursor.try_collect().await
    }

    async fn query_by_page(&self, filter: Document, sort: Document, skip: u64, limit: u64) -> Result<Vec<T>> {
        if limit == 0 {
            return Ok(vec![]);
        }
        let mut cursor = self.collection.find(filter).sort(sort).skip(skip).limit(limit as i64).await?;
        let mut results: Vec<T> = vec![];
        while let Some(doc) = cursor.try_next().await? {
            results.push(doc);
        }
        Ok(results)
    }

    async fn count(&self, filter: Document) -> Result<u64> {
        self.collection.count_documents(filter).await
    }

    async fn insert(&self, entity: &T, session: Option<&mut ClientSession>) -> Result<()> {
        let action = self.collection.insert_one(entity);
        match session {
            Some(session) => action.session(session).await?,
            None => action.await?,
        };
        Ok(())
    }

    async fn update_one(&self, filter: Document, update: Document, session: Option<&mut ClientSession>) -> Result<u64> {
        let action = self.collection.update_one(filter, update);
        let result = match session {
            Some(session) => action.session(session).await?,
            None => action.await?,
        };
        Ok(result.matched_count)
    }

    async fn upsert_one(&self, filter: Document, update: Document, session: Option<&mut ClientSession>) -> Result<()> {
        let action = self.collection.update_one(filter, update).upsert(true);
        match session {
            Some(session) => action.session(session).await?,
            None => action.await?,
        };
        Ok(())
    }

    async fn delete(&self, filter: Document, session: Option<&mut ClientSession>) -> Result<u64> {
        let action = self.collection.delete_many(filter);
        let result = match session {
            Some(session) => action.session(session).await?,
            None => action.await?,
        };
        Ok(result.deleted_count)
    }
}
