//! SaffronAI ETF 시세 피드 클라이언트.
//!
//! 업스트림 피드는 헤더 행이 있는 CSV 텍스트를 반환합니다.
//! 매 호출이 전체 데이터셋을 다시 받아 파싱하며, 캐싱은 없습니다.
//!
//! 업스트림은 브라우저가 아닌 클라이언트를 거부하므로 `accept`,
//! `referer`, `user-agent` 헤더 값은 호환성 요건입니다. 임의로 바꾸면
//! 피드가 응답하지 않습니다.

use std::time::Duration;

use reqwest::header;
use serde::Deserialize;

use crate::error::{EtfDataError, Result};
use crate::model::EtfRecord;

/// 기본 ETF 시세 피드 URL.
const DEFAULT_FEED_URL: &str = "https://www.saffronai.in/api/etf-data";

/// 피드 요청에 필요한 referer 값 (원 서비스의 트래커 페이지).
const FEED_REFERER: &str = "https://www.saffronai.in/etf-tracker";

/// 피드 요청에 필요한 브라우저 user-agent.
const FEED_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// SaffronAI ETF 피드 클라이언트.
#[derive(Clone)]
pub struct SaffronEtfClient {
    client: reqwest::Client,
    feed_url: String,
}

impl SaffronEtfClient {
    /// 기본 피드 URL로 클라이언트 생성.
    pub fn new() -> Self {
        Self::with_feed_url(DEFAULT_FEED_URL)
    }

    /// 피드 URL을 지정하여 클라이언트 생성.
    ///
    /// 테스트에서 mock 서버 주소를 주입할 때 사용합니다.
    pub fn with_feed_url(feed_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(10))
                .user_agent(FEED_USER_AGENT)
                .build()
                .expect("HTTP 클라이언트 생성 실패"),
            feed_url: feed_url.into(),
        }
    }

    /// 업스트림 피드에서 전체 ETF 레코드 조회.
    ///
    /// # Errors
    /// 네트워크 오류, 타임아웃, 2xx 이외의 상태 코드, 깨진 CSV 본문은
    /// 모두 오류로 반환됩니다. 행 단위 숫자 파싱 실패는 오류가 아니며
    /// 해당 레코드의 파생 필드만 null이 됩니다.
    pub async fn fetch_etfs(&self) -> Result<Vec<EtfRecord>> {
        let response = self
            .client
            .get(&self.feed_url)
            .header(header::ACCEPT, "*/*")
            .header(header::REFERER, FEED_REFERER)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(EtfDataError::UpstreamStatus(response.status()));
        }

        let body = response.text().await?;
        let records = parse_feed(&body)?;

        tracing::info!(count = records.len(), "ETF 피드 조회 완료");
        Ok(records)
    }
}

impl Default for SaffronEtfClient {
    fn default() -> Self {
        Self::new()
    }
}

/// CSV 본문을 ETF 레코드 목록으로 파싱.
///
/// 헤더 행 기준으로 컬럼을 매핑하고, 알 수 없는 컬럼은 무시합니다.
/// 행 순서는 피드 순서 그대로 보존합니다. 시세 컬럼이 헤더에 아예
/// 없으면 파생 계산에서 0으로 취급하고, 컬럼 수가 맞지 않는 행은
/// 깨진 CSV로 보고 오류를 반환합니다.
fn parse_feed(body: &str) -> Result<Vec<EtfRecord>> {
    #[derive(Deserialize)]
    struct RawRow {
        #[serde(default)]
        symbol: String,
        #[serde(rename = "companyName", default)]
        company_name: String,
        #[serde(default)]
        assets: String,
        #[serde(rename = "lastPrice", default)]
        last_price: String,
        #[serde(default)]
        inav: String,
    }

    let mut reader = csv::Reader::from_reader(body.as_bytes());
    let headers = reader.headers()?.clone();
    let has_last_price = headers.iter().any(|h| h == "lastPrice");
    let has_inav = headers.iter().any(|h| h == "inav");

    let mut records = Vec::new();
    for row in reader.deserialize::<RawRow>() {
        let row = row?;
        records.push(EtfRecord::new(
            row.symbol,
            row.company_name,
            row.assets,
            has_last_price.then_some(row.last_price),
            has_inav.then_some(row.inav),
        ));
    }

    Ok(records)
}
