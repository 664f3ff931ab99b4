//! ETF 시세 프록시 REST API 서버.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - Axum 기반 REST API
//! - 업스트림 ETF 피드 프록시 (요청마다 새로 조회)
//! - 프리미엄/디스카운트 필터 엔드포인트
//!
//! # 모듈 구성
//!
//! - [`state`]: 애플리케이션 공유 상태 (AppState)
//! - [`routes`]: REST API 엔드포인트
//! - [`error`]: 응답 envelope 및 오류 변환

pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiResult, ErrorBody};
pub use routes::*;
pub use state::AppState;

#[cfg(any(test, feature = "test-utils"))]
pub use state::create_test_state;
