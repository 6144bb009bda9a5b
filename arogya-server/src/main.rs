//! Arogya服务器主程序

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use arogya_model::PremiumModel;
use arogya_store::PatientStore;
use arogya_web::{AppState, WebServer};

mod config;

use crate::config::ArogyaConfig;

/// Arogya服务器命令行参数
#[derive(Parser, Debug)]
#[command(name = "arogya-server")]
#[command(about = "保险保费预测与患者档案管理服务器")]
struct Args {
    /// 监听主机
    #[arg(long)]
    host: Option<String>,

    /// 监听端口
    #[arg(short, long)]
    port: Option<u16>,

    /// 患者档案JSON文件路径
    #[arg(short, long)]
    data_file: Option<String>,

    /// 模型工件路径
    #[arg(short, long)]
    model: Option<String>,

    /// 配置文件路径
    #[arg(short, long)]
    config: Option<String>,

    /// 日志级别
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ArogyaConfig::load(args.config.as_deref())?;
    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(data_file) = args.data_file {
        config.store.data_file = data_file;
    }
    if let Some(model) = args.model {
        config.model.artifact = model;
    }
    if let Some(log_level) = args.log_level {
        config.logging.level = log_level;
    }

    // 初始化日志, RUST_LOG优先于配置的级别
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("启动Arogya服务器...");
    if let Some(path) = &args.config {
        info!("配置文件: {}", path);
    }

    info!("服务器配置:");
    info!("  监听地址: {}:{}", config.server.host, config.server.port);
    info!("  档案文件: {}", config.store.data_file);
    info!("  模型工件: {}", config.model.artifact);

    // 模型加载失败视为致命错误, 不降级启动
    let model = PremiumModel::load(&config.model.artifact)
        .context("Failed to load model artifact")?;

    let store = PatientStore::new(&config.store.data_file);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server address")?;

    let state = AppState {
        model: Arc::new(model),
        store: Arc::new(store),
    };

    let server = WebServer::new(addr, state);
    if let Err(e) = server.run().await {
        error!("服务器启动失败: {}", e);
        return Err(e.into());
    }

    Ok(())
}
