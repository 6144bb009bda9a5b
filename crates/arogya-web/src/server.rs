//! Web服务器

use std::net::SocketAddr;

use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

use arogya_core::{ArogyaError, Result};

use crate::handlers::{
    api_root, create_patient, get_patient, health, predict, sort_patients, view_patients, AppState,
};

pub struct WebServer {
    addr: SocketAddr,
    app: Router,
}

impl WebServer {
    pub fn new(addr: SocketAddr, state: AppState) -> Self {
        let app = create_app(state);
        Self { addr, app }
    }

    pub async fn run(self) -> Result<()> {
        info!("Starting web server on {}", self.addr);

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        axum::serve(listener, self.app)
            .await
            .map_err(|e| ArogyaError::Internal(format!("Failed to start web server: {e}")))?;

        Ok(())
    }
}

/// 组装完整路由
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // 根路径
        .route("/", get(api_root))
        // 健康检查
        .route("/health", get(health))
        // 保费预测
        .route("/predict", post(predict))
        // 患者档案
        .route("/view", get(view_patients))
        .route("/patient/:patient_id", get(get_patient))
        .route("/sort", get(sort_patients))
        .route("/create", post(create_patient))
        .with_state(state)
        // 全局中间件
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}
