//! Arogya Web服务模块
//!
//! 将保费预测与患者档案两套API绑定到同一个axum路由上。

pub mod handlers;
pub mod server;

pub use handlers::AppState;
pub use server::{create_app, WebServer};
