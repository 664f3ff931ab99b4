//! API 라우트.
//!
//! 모든 REST API 엔드포인트를 정의하고 라우터를 구성합니다.
//!
//! # 라우트 구조
//!
//! - `/` - 서비스 상태
//! - `/api/etf/all` - 전체 ETF 목록
//! - `/api/etf/premium` - 프리미엄 ETF (괴리율 내림차순)
//! - `/api/etf/discount` - 디스카운트 ETF (괴리율 오름차순)
//! - `/api/etf/search/{query}` - ETF 검색
//! - `/api/etf/{symbol}` - 심볼 단건 조회

pub mod etf;
pub mod status;

pub use etf::{etf_router, EtfDetailResponse, EtfListResponse};
pub use status::{status_router, ServiceStatusResponse};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
///
/// 모든 서브 라우터를 조합하여 하나의 라우터로 반환합니다.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(status_router())
        .nest("/api/etf", etf_router())
}
