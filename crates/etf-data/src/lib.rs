//! ETF 시세 데이터 수집.
//!
//! 이 crate는 다음을 제공합니다:
//! - SaffronAI ETF 시세 피드 클라이언트 (CSV 다운로드 및 파싱)
//! - ETF 레코드 모델과 프리미엄/디스카운트 파생 계산
//! - 피드 오류 타입

pub mod error;
pub mod model;
pub mod saffron;

pub use error::{EtfDataError, Result};
pub use model::EtfRecord;
pub use saffron::SaffronEtfClient;
