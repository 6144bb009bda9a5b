//! HTTP处理器

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use arogya_core::ArogyaError;
use arogya_model::{Classifier, UserInput};
use arogya_store::{sort_records, NewPatient, PatientStore, PatientView, SortField, SortOrder};

/// 处理器共享状态
///
/// 模型在启动时加载一次, 之后只读; 存储不在进程内缓存任何数据。
#[derive(Clone)]
pub struct AppState {
    pub model: Arc<dyn Classifier>,
    pub store: Arc<PatientStore>,
}

/// API根路径处理器
pub async fn api_root() -> impl IntoResponse {
    Json(json!({
        "message": "Insurance Premium Prediction and Patient Records API"
    }))
}

/// 健康检查处理器
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "version": state.model.version(),
        "model_loaded": true
    }))
}

/// 保费类别预测处理器
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<UserInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(input) = payload?;
    let profile = input.validate()?;

    let category = state.model.predict(&profile.features())?;
    info!("Predicted category {} for city {}", category, profile.city);

    Ok(Json(json!({ "predicted_category": category })))
}

/// 全量档案查询处理器
pub async fn view_patients(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let map = state.store.load().await?;
    let views: BTreeMap<String, PatientView> = map
        .into_iter()
        .map(|(id, patient)| (id, patient.view()))
        .collect();

    Ok(Json(views))
}

/// 单个档案查询处理器
pub async fn get_patient(
    State(state): State<AppState>,
    Path(patient_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let patient = state.store.get(&patient_id).await?;
    Ok(Json(patient.view()))
}

/// 排序查询参数
#[derive(Debug, Deserialize)]
pub struct SortParams {
    pub sort_by: String,
    #[serde(default = "default_order")]
    pub order: String,
}

fn default_order() -> String {
    "asc".to_string()
}

/// 档案排序处理器
pub async fn sort_patients(
    State(state): State<AppState>,
    params: Result<Query<SortParams>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = params?;
    let field: SortField = params.sort_by.parse()?;
    let order: SortOrder = params.order.parse()?;

    let map = state.store.load().await?;
    Ok(Json(sort_records(&map, field, order)))
}

/// 建档处理器
pub async fn create_patient(
    State(state): State<AppState>,
    payload: Result<Json<NewPatient>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(new_patient) = payload?;
    let patient_id = new_patient.id.clone();
    state.store.create(new_patient).await?;

    info!("Created patient record {}", patient_id);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "patient created successfully" })),
    ))
}

/// 统一错误出口
///
/// 把ArogyaError映射为固定的状态码和JSON响应体。客户端可见的4xx用
/// `detail`键, 5xx用`error`键; 预测与存储错误的原文直接透传,
/// 其余内部错误只记日志不外泄。
pub struct ApiError(ArogyaError);

impl From<ArogyaError> for ApiError {
    fn from(err: ArogyaError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(ArogyaError::Validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(ArogyaError::Validation(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, key, message) = match self.0 {
            ArogyaError::Validation(msg) => (StatusCode::UNPROCESSABLE_ENTITY, "detail", msg),
            ArogyaError::NotFound(msg) => (StatusCode::NOT_FOUND, "detail", msg),
            ArogyaError::AlreadyExists(msg) | ArogyaError::InvalidArgument(msg) => {
                (StatusCode::BAD_REQUEST, "detail", msg)
            }
            ArogyaError::Prediction(msg) | ArogyaError::StoreUnavailable(msg) => {
                error!("Request failed: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "error", msg)
            }
            other => {
                error!("Internal error: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "error",
                    "Internal Server Error".to_string(),
                )
            }
        };

        (status, Json(json!({ key: message }))).into_response()
    }
}
