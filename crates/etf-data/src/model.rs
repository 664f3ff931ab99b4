//! ETF 시세 레코드와 프리미엄/디스카운트 계산.
//!
//! 업스트림 CSV 한 행이 레코드 하나가 되며, 파생 필드인
//! 프리미엄/디스카운트(%)는 레코드 생성 시점에 한 번 계산됩니다.
//! 행 단위 계산은 실패하지 않습니다. 숫자로 읽을 수 없는 값은
//! 파생 필드를 null로 만들 뿐입니다.

use serde::{Deserialize, Serialize};

/// ETF 시세 레코드.
///
/// 요청마다 피드에서 새로 만들어지고 응답 후 버려집니다.
/// 시세 원문(lastPrice, inav)은 CSV 문자열 그대로 보존하고,
/// 숫자 해석은 파생 필드 계산에만 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EtfRecord {
    /// 종목 티커
    pub symbol: String,
    /// 운용사명
    #[serde(rename = "companyName")]
    pub company_name: String,
    /// 자산 구분 (자유 텍스트 검색 대상)
    pub assets: String,
    /// 최종 체결가 (CSV 원문)
    #[serde(rename = "lastPrice")]
    pub last_price: String,
    /// 장중 추정 순자산가치 iNAV (CSV 원문)
    pub inav: String,
    /// iNAV 대비 프리미엄/디스카운트 (%). 계산 불가 시 null.
    pub premium_discount_pct: Option<f64>,
}

impl EtfRecord {
    /// 원시 CSV 값에서 레코드 생성.
    ///
    /// `last_price`/`inav`가 `None`이면 해당 컬럼이 피드 헤더에 없는
    /// 것으로 보고 파생 계산에서 0으로 취급합니다. 값이 있지만 숫자가
    /// 아니면(빈 문자열 포함) 파생 필드는 `None`이 됩니다.
    pub fn new(
        symbol: impl Into<String>,
        company_name: impl Into<String>,
        assets: impl Into<String>,
        last_price: Option<String>,
        inav: Option<String>,
    ) -> Self {
        let premium_discount_pct =
            derive_premium_discount(last_price.as_deref(), inav.as_deref());

        Self {
            symbol: symbol.into(),
            company_name: company_name.into(),
            assets: assets.into(),
            last_price: last_price.unwrap_or_default(),
            inav: inav.unwrap_or_default(),
            premium_discount_pct,
        }
    }

    /// 심볼 일치 여부 (대소문자 무시, 완전 일치).
    pub fn matches_symbol(&self, symbol: &str) -> bool {
        self.symbol.eq_ignore_ascii_case(symbol)
    }

    /// 검색어 포함 여부 (대소문자 무시, 부분 일치).
    ///
    /// 심볼, 운용사명, 자산 구분 중 하나라도 검색어를 포함하면 true.
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.symbol.to_lowercase().contains(&query)
            || self.company_name.to_lowercase().contains(&query)
            || self.assets.to_lowercase().contains(&query)
    }
}

/// 프리미엄/디스카운트(%) 계산.
///
/// `inav > 0`일 때만 `((lastPrice - inav) / inav) * 100`을 소수점
/// 둘째 자리로 반올림하여 반환합니다. 그 외에는 `None`.
fn derive_premium_discount(last_price: Option<&str>, inav: Option<&str>) -> Option<f64> {
    let last_price = parse_quote_field(last_price)?;
    let inav = parse_quote_field(inav)?;

    if inav > 0.0 {
        Some(round2(((last_price - inav) / inav) * 100.0))
    } else {
        None
    }
}

/// 시세 필드 문자열을 f64로 파싱.
///
/// 컬럼 자체가 없으면(None) 0으로, 값이 숫자가 아니면 None으로.
fn parse_quote_field(raw: Option<&str>) -> Option<f64> {
    match raw {
        None => Some(0.0),
        Some(text) => text.trim().parse::<f64>().ok(),
    }
}

/// 소수점 둘째 자리 반올림.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
