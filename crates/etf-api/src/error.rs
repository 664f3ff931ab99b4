//! 통합 API 에러 응답 타입.
//!
//! 모든 응답은 단일 키 envelope를 사용합니다. 성공은 `result`,
//! 실패는 `error` 키 하나로 본문을 감쌉니다.

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use etf_data::EtfDataError;

/// 오류 응답 본문.
///
/// # 예시
///
/// ```json
/// {
///   "error": "Not found"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// 사람이 읽을 수 있는 에러 메시지
    pub error: String,
}

impl ErrorBody {
    /// 기본 에러 생성.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    /// 심볼 조회 실패 응답.
    ///
    /// 상태 코드가 아니라 본문으로 부재를 표현하므로 HTTP 200과 함께
    /// 반환됩니다.
    pub fn not_found() -> Self {
        Self::new("Not found")
    }
}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ErrorBody>)>;

/// 피드 오류를 502 Bad Gateway 응답으로 변환.
///
/// 업스트림 장애(네트워크 오류, 타임아웃, 비정상 상태 코드, 깨진 CSV)는
/// 모두 동일한 형태로 정규화됩니다.
pub fn feed_error(err: EtfDataError) -> (StatusCode, Json<ErrorBody>) {
    tracing::error!(error = %err, "ETF 피드 조회 실패");
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorBody::new(format!("ETF feed unavailable: {}", err))),
    )
}
