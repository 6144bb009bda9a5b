//! 错误定义模块

use thiserror::Error;

/// Arogya系统统一错误类型
///
/// 请求路径上的每个变体都对应一个固定的HTTP状态码和JSON响应体，
/// 映射逻辑在arogya-web中实现。
#[derive(Error, Debug)]
pub enum ArogyaError {
    #[error("配置错误: {0}")]
    Config(String),

    #[error("验证错误: {0}")]
    Validation(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("资源已存在: {0}")]
    AlreadyExists(String),

    #[error("无效参数: {0}")]
    InvalidArgument(String),

    #[error("预测失败: {0}")]
    Prediction(String),

    #[error("存储不可用: {0}")]
    StoreUnavailable(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("序列化错误: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("系统内部错误: {0}")]
    Internal(String),
}

/// Arogya系统统一结果类型
pub type Result<T> = std::result::Result<T, ArogyaError>;
