use anyhow::{Context, Result};
use config::Config;
use once_cell::sync::OnceCell;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub database: Option<DatabaseConfig>,
    pub server: Option<ServerConfig>,
    pub sys: Option<SysConfig>,
    pub auth: Option<AuthConfig>,
}

impl AppConfig {
    /// 读取配置文件，并允许 `APP__SECTION__KEY` 形式的环境变量覆盖
    pub fn new(file: &str) -> Result<Self> {
        let config = Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(config::Environment::with_prefix("APP").separator("__"))
            .build()
            .with_context(|| format!("Failed to build configuration from {}", file))?;
        let cfg = config.try_deserialize::<AppConfig>().context("Failed to deserialize configuration")?;
        Ok(cfg)
    }

    pub fn init(file: &str) -> Result<()> {
        let instance = Self::new(file)?;
        INSTANCE.set(Arc::new(instance)).map_err(|_| anyhow::anyhow!("AppConfig already initialized"))
    }

    pub fn get_database(&self) -> DatabaseConfig {
        self.database.clone().unwrap_or_default()
    }
    pub fn get_server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }
    pub fn get_sys(&self) -> SysConfig {
        self.sys.clone().unwrap_or_default()
    }
    pub fn get_auth(&self) -> AuthConfig {
        self.auth.clone().unwrap_or_default()
    }

    /// 获取单例，未初始化时返回默认配置
    pub fn get() -> Arc<Self> {
        INSTANCE.get().cloned().unwrap_or_default()
    }
}
static INSTANCE: OnceCell<Arc<AppConfig>> = OnceCell::new();

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    Mongo,
    #[default]
    Memory,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub kind: StoreKind,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub db_name: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SysConfig {
    //全局日志级别
    pub log_level: String,
}
impl Default for SysConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}
impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".to_string(), port: 8000 }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AuthKind {
    /// 由前置认证代理注入身份请求头
    #[default]
    Gateway,
    /// 开发/测试用：Bearer token 本身就是 JSON 身份
    Dummy,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AuthConfig {
    #[serde(default)]
    pub kind: AuthKind,
    #[serde(default)]
    pub admin_ids: Vec<String>,
}
