//! 服务配置
//!
//! 配置优先级: 命令行参数 > 环境变量 > 配置文件 > 默认值。

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;

/// Arogya服务完整配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArogyaConfig {
    /// 服务器配置
    pub server: ServerConfig,
    /// 存储配置
    pub store: StoreConfig,
    /// 模型配置
    pub model: ModelConfig,
    /// 日志配置
    pub logging: LoggingConfig,
}

/// 服务器配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听主机
    pub host: String,
    /// 监听端口
    pub port: u16,
}

/// 存储配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// 患者档案JSON文件路径
    pub data_file: String,
}

/// 模型配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// 模型工件路径
    pub artifact: String,
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
}

impl ArogyaConfig {
    /// 从可选配置文件加载, AROGYA_*环境变量覆盖文件值
    ///
    /// 嵌套字段用双下划线分隔, 例如 AROGYA_SERVER__PORT=9000。
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path));
        }

        let settings = builder
            .add_source(Environment::with_prefix("AROGYA").separator("__"))
            .build()
            .context("Failed to build configuration")?;

        settings
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

impl Default for ArogyaConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            store: StoreConfig::default(),
            model: ModelConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: "./data/patients.json".to_string(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            artifact: "./data/model.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ArogyaConfig::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.store.data_file, "./data/patients.json");
        assert_eq!(config.model.artifact, "./data/model.json");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let config = ArogyaConfig::load(None).unwrap();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.logging.level, "info");
    }
}
