use crate::config::DatabaseConfig;
use crate::errors::AppError;
use anyhow::{Result, anyhow};
use log::warn;
use mongodb::options::ClientOptions;
use mongodb::{Client, ClientSession, Database};

#[derive(Clone, Debug)]
pub struct Db {
    pub client: Client,
    pub db: Database,
}

impl Db {
    /// 创建新实例
    pub fn new(client: Client, db_name: &str) -> Self {
        let db = client.database(db_name);
        Self { client, db }
    }

    /// 初始化 MongoDB 数据库连接
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let client_options = ClientOptions::parse(&config.url)
            .await
            .map_err(|e| anyhow!("MongoDB URI parse error: {}", e))?;

        let client = Client::with_options(client_options).map_err(|e| anyhow!("MongoDB client init error: {}", e))?;
        Ok(Self::new(client, &config.db_name))
    }

    /// 开启多文档事务（需要副本集）
    pub async fn start_transaction(&self) -> Result<ClientSession, AppError> {
        let mut session = self.client.start_session().await?;
        session.start_transaction().await?;
        Ok(session)
    }

    /// 成功则提交，失败则回滚并返回原始错误
    pub async fn finish_transaction<T>(&self, mut session: ClientSession, result: Result<T, AppError>) -> Result<T, AppError> {
        match result {
            Ok(value) => {
                session.commit_transaction().await?;
                Ok(value)
            }
            Err(e) => {
                if let Err(abort_err) = session.abort_transaction().await {
                    warn!("abort transaction failed: {:?}", abort_err);
                }
                Err(e)
            }
        }
    }
}
