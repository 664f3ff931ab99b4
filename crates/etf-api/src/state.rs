//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 모든 API 핸들러에서 공유되는 상태를 관리합니다.
//! Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.

use etf_data::SaffronEtfClient;

/// 애플리케이션 공유 상태.
///
/// 요청 간에 보존되는 데이터는 없습니다. 피드 클라이언트는 연결 풀만
/// 재사용하며, 시세는 매 요청 업스트림에서 새로 조회합니다.
#[derive(Clone)]
pub struct AppState {
    /// ETF 피드 클라이언트
    pub saffron: SaffronEtfClient,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    pub fn new() -> Self {
        Self {
            saffron: SaffronEtfClient::new(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 피드 클라이언트 교체.
    ///
    /// 테스트에서 mock 서버를 바라보는 클라이언트를 주입할 때 사용합니다.
    pub fn with_saffron(mut self, client: SaffronEtfClient) -> Self {
        self.saffron = client;
        self
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// 테스트용 AppState 생성 헬퍼.
///
/// 주어진 피드 URL을 바라보는 클라이언트로 상태를 구성합니다.
#[cfg(any(test, feature = "test-utils"))]
pub fn create_test_state(feed_url: impl Into<String>) -> AppState {
    AppState::new().with_saffron(SaffronEtfClient::with_feed_url(feed_url))
}
