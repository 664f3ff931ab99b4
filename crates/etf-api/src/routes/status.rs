//! 서비스 상태 endpoint.
//!
//! 서비스 이름과 버전을 확인하는 루트 엔드포인트를 제공합니다.
//! 배포 확인이나 로드밸런서의 간단한 생존 확인에 사용됩니다.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::state::AppState;

/// 서비스 식별 이름.
const SERVICE_NAME: &str = "ETF Tracker API";

/// 서비스 상태 응답 구조체.
#[derive(Debug, Serialize, Deserialize)]
pub struct ServiceStatusResponse {
    /// 서비스 이름
    pub status: String,

    /// API 버전
    pub version: String,
}

/// 서비스 상태 확인.
///
/// GET /
pub async fn service_status(State(state): State<Arc<AppState>>) -> Json<ServiceStatusResponse> {
    Json(ServiceStatusResponse {
        status: SERVICE_NAME.to_string(),
        version: state.version.clone(),
    })
}

/// 서비스 상태 라우터 생성.
pub fn status_router() -> Router<Arc<AppState>> {
    Router::new().route("/", get(service_status))
}
