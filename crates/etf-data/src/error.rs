//! 피드 모듈 오류 타입.

use thiserror::Error;

/// ETF 피드 관련 오류.
#[derive(Debug, Error)]
pub enum EtfDataError {
    /// 업스트림 HTTP 요청 오류 (연결 실패, 타임아웃 등)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// 업스트림이 2xx 이외의 상태 코드를 반환함
    #[error("Upstream returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    /// CSV 본문 파싱 오류
    #[error("CSV parse error: {0}")]
    CsvError(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, EtfDataError>;
