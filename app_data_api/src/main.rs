use actix_web::middleware::Logger;
use actix_web::{App, HttpServer};
use app_data_api::middleware::build_authenticator;
use biz_service::store::build_store;
use common::config::{AppConfig, SysConfig};
use log::{LevelFilter, warn};
use std::str::FromStr;

const DEFAULT_CONFIG_FILE: &str = "data-api-config.toml";

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // 读取配置文件
    let config_file = std::env::var("APP_CONFIG_FILE").unwrap_or_else(|_| DEFAULT_CONFIG_FILE.to_string());
    AppConfig::init(&config_file)?;
    let app_cfg = AppConfig::get();
    //初始化日志
    init_log(&app_cfg.get_sys());

    let store = build_store(&app_cfg.get_database()).await?;
    let authenticator = build_authenticator(&app_cfg.get_auth());
    let address_and_port = format!("{}:{}", app_cfg.get_server().host, app_cfg.get_server().port);
    warn!("Starting server on {}", address_and_port);
    HttpServer::new(move || {
        let store = store.clone();
        let authenticator = authenticator.clone();
        App::new()
            .wrap(Logger::default())
            // 配置 服务与控制器
            .configure(|cfg| app_data_api::configure(cfg, store, authenticator))
    })
    .bind(address_and_port)?
    .run()
    .await?;
    Ok(())
}

pub fn init_log(sys: &SysConfig) {
    let level = LevelFilter::from_str(&sys.log_level).unwrap_or(LevelFilter::Info);
    env_logger::Builder::new().filter(None, level).init();
}
