//! ETF 시세 endpoint.
//!
//! 업스트림 피드를 매 요청 새로 조회하고, 필터와 정렬만 적용해
//! 반환합니다. 서버에는 시세 캐시가 없습니다.
//!
//! # 엔드포인트
//!
//! - `GET /api/etf/all` - 전체 ETF 목록
//! - `GET /api/etf/premium` - 프리미엄 ETF (내림차순)
//! - `GET /api/etf/discount` - 디스카운트 ETF (오름차순)
//! - `GET /api/etf/search/{query}` - 심볼/운용사/자산군 검색
//! - `GET /api/etf/{symbol}` - 심볼 단건 조회

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use etf_data::EtfRecord;

use crate::error::{feed_error, ApiResult, ErrorBody};
use crate::state::AppState;

// ==================== 응답 타입 ====================

/// ETF 목록 응답.
///
/// `result` 단일 키 envelope로 레코드 배열을 감쌉니다.
#[derive(Debug, Serialize, Deserialize)]
pub struct EtfListResponse {
    /// 조회된 ETF 레코드 목록
    pub result: Vec<EtfRecord>,
}

/// ETF 단건 응답.
#[derive(Debug, Serialize, Deserialize)]
pub struct EtfDetailResponse {
    /// 조회된 ETF 레코드
    pub result: EtfRecord,
}

// ==================== Handler ====================

/// 전체 ETF 목록 조회.
///
/// GET /api/etf/all
///
/// 피드 순서 그대로, 필터 없이 반환합니다.
pub async fn list_all_etfs(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<EtfListResponse>> {
    let result = state.saffron.fetch_etfs().await.map_err(feed_error)?;

    Ok(Json(EtfListResponse { result }))
}

/// 심볼로 단건 조회.
///
/// GET /api/etf/{symbol}
///
/// 대소문자를 무시하고 첫 번째로 일치하는 레코드를 반환합니다.
/// 일치하는 레코드가 없으면 HTTP 200과 `{"error": "Not found"}`
/// 본문을 반환합니다.
pub async fn get_etf_by_symbol(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> ApiResult<Response> {
    let etfs = state.saffron.fetch_etfs().await.map_err(feed_error)?;

    let response = match etfs.into_iter().find(|etf| etf.matches_symbol(&symbol)) {
        Some(record) => Json(EtfDetailResponse { result: record }).into_response(),
        None => {
            debug!(symbol = %symbol, "일치하는 ETF 없음");
            Json(ErrorBody::not_found()).into_response()
        }
    };

    Ok(response)
}

/// ETF 검색.
///
/// GET /api/etf/search/{query}
///
/// 심볼, 운용사명, 자산군에 대해 대소문자 무시 부분 일치로 검색합니다.
/// 피드 순서를 보존하며, 여러 필드에 일치해도 레코드는 한 번만
/// 나타납니다.
pub async fn search_etfs(
    State(state): State<Arc<AppState>>,
    Path(query): Path<String>,
) -> ApiResult<Json<EtfListResponse>> {
    let etfs = state.saffron.fetch_etfs().await.map_err(feed_error)?;

    let result: Vec<EtfRecord> = etfs
        .into_iter()
        .filter(|etf| etf.matches_query(&query))
        .collect();

    debug!(query = %query, count = result.len(), "ETF 검색 완료");

    Ok(Json(EtfListResponse { result }))
}

/// 프리미엄 ETF 목록 조회.
///
/// GET /api/etf/premium
///
/// 괴리율이 양수인 레코드만 내림차순으로 반환합니다. 0이나 괴리율이
/// 없는 레코드는 포함하지 않습니다.
pub async fn list_premium_etfs(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<EtfListResponse>> {
    let etfs = state.saffron.fetch_etfs().await.map_err(feed_error)?;

    let mut result: Vec<EtfRecord> = etfs
        .into_iter()
        .filter(|etf| etf.premium_discount_pct.is_some_and(|pct| pct > 0.0))
        .collect();
    result.sort_by(|a, b| {
        let pa = a.premium_discount_pct.unwrap_or(0.0);
        let pb = b.premium_discount_pct.unwrap_or(0.0);
        pb.total_cmp(&pa)
    });

    Ok(Json(EtfListResponse { result }))
}

/// 디스카운트 ETF 목록 조회.
///
/// GET /api/etf/discount
///
/// 괴리율이 음수인 레코드만 오름차순으로, 즉 할인 폭이 가장 큰
/// 레코드부터 반환합니다.
pub async fn list_discount_etfs(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<EtfListResponse>> {
    let etfs = state.saffron.fetch_etfs().await.map_err(feed_error)?;

    let mut result: Vec<EtfRecord> = etfs
        .into_iter()
        .filter(|etf| etf.premium_discount_pct.is_some_and(|pct| pct < 0.0))
        .collect();
    result.sort_by(|a, b| {
        let pa = a.premium_discount_pct.unwrap_or(0.0);
        let pb = b.premium_discount_pct.unwrap_or(0.0);
        pa.total_cmp(&pb)
    });

    Ok(Json(EtfListResponse { result }))
}

// ==================== 라우터 ====================

/// ETF 라우터 생성.
///
/// `all`, `premium`, `discount`, `search`는 정적 경로이므로
/// `{symbol}` 파라미터 경로보다 항상 우선합니다.
pub fn etf_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/all", get(list_all_etfs))
        .route("/premium", get(list_premium_etfs))
        .route("/discount", get(list_discount_etfs))
        .route("/search/{query}", get(search_etfs))
        .route("/{symbol}", get(get_etf_by_symbol))
}

// ==================== 테스트 ====================

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use tower::ServiceExt;

    use crate::state::create_test_state;

    /// 테스트 피드.
    ///
    /// NIFTYBEES +5%, BANKBEES +2.5%, GOLDBEES -5%, SILVERETF -10%,
    /// PARBEES 0%, DEBTFUND는 가격이 숫자가 아니어서 괴리율 없음.
    const FEED_FIXTURE: &str = "\
symbol,companyName,assets,lastPrice,inav
NIFTYBEES,Nippon India Asset Management,Equity,105,100
GOLDBEES,Nippon India Asset Management,Gold,95,100
BANKBEES,Nippon India Asset Management,Equity,102.5,100
DEBTFUND,Broken Fund House,Debt,abc,100
PARBEES,Parity Asset Management,Equity,100,100
SILVERETF,Argent Mutual Fund,Silver,90,100
";

    /// 괴리율 동률 피드.
    ///
    /// NIFTYBEES와 JUNIORBEES는 둘 다 +5%, GOLDBEES와 SILVERBEES는
    /// 둘 다 -5%로 계산됩니다. BANKBEES는 +10%, HDFCGOLD는 -10%.
    const TIED_FEED_FIXTURE: &str = "\
symbol,companyName,assets,lastPrice,inav
NIFTYBEES,Nippon India Asset Management,Equity,105,100
GOLDBEES,Nippon India Asset Management,Gold,95,100
JUNIORBEES,Nippon India Asset Management,Equity,210,200
SILVERBEES,Nippon India Asset Management,Silver,190,200
BANKBEES,Nippon India Asset Management,Equity,110,100
HDFCGOLD,HDFC Asset Management,Gold,90,100
";

    fn test_app(feed_url: String) -> Router {
        let state = Arc::new(create_test_state(feed_url));
        Router::new()
            .nest("/api/etf", etf_router())
            .with_state(state)
    }

    async fn body_of(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    async fn test_list_all_returns_feed_in_order() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/feed")
            .with_status(200)
            .with_body(FEED_FIXTURE)
            .create_async()
            .await;
        let app = test_app(format!("{}/feed", server.url()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/etf/all")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let list: EtfListResponse = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(list.result.len(), 6);
        assert_eq!(list.result[0].symbol, "NIFTYBEES");
        assert_eq!(list.result[5].symbol, "SILVERETF");
        // 괴리율을 계산할 수 없는 레코드도 목록에는 포함됨
        assert_eq!(list.result[3].symbol, "DEBTFUND");
        assert_eq!(list.result[3].premium_discount_pct, None);
    }

    #[tokio::test]
    async fn test_get_etf_by_symbol_ignores_case() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/feed")
            .with_status(200)
            .with_body(FEED_FIXTURE)
            .create_async()
            .await;
        let app = test_app(format!("{}/feed", server.url()));

        for uri in ["/api/etf/NIFTYBEES", "/api/etf/niftybees"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::OK);

            let detail: EtfDetailResponse =
                serde_json::from_slice(&body_of(response).await).unwrap();
            assert_eq!(detail.result.symbol, "NIFTYBEES");
            assert_eq!(detail.result.premium_discount_pct, Some(5.0));
        }
    }

    #[tokio::test]
    async fn test_unknown_symbol_returns_error_body_with_200() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/feed")
            .with_status(200)
            .with_body(FEED_FIXTURE)
            .create_async()
            .await;
        let app = test_app(format!("{}/feed", server.url()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/etf/ZZZZ")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // 부재는 상태 코드가 아니라 본문으로 표현됨
        assert_eq!(response.status(), StatusCode::OK);

        let error: ErrorBody = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(error.error, "Not found");
    }

    #[tokio::test]
    async fn test_search_matches_all_text_fields() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/feed")
            .with_status(200)
            .with_body(FEED_FIXTURE)
            .create_async()
            .await;
        let app = test_app(format!("{}/feed", server.url()));

        // 운용사명 부분 일치
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/etf/search/nippon")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let list: EtfListResponse = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(list.result.len(), 3);
        assert!(list.result.iter().all(|etf| etf
            .company_name
            .to_lowercase()
            .contains("nippon")));

        // 심볼과 자산군 모두에 일치해도 레코드는 한 번만 나타남
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/etf/search/gold")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let list: EtfListResponse = serde_json::from_slice(&body_of(response).await).unwrap();
        assert_eq!(list.result.len(), 1);
        assert_eq!(list.result[0].symbol, "GOLDBEES");
    }

    #[tokio::test]
    async fn test_premium_sorted_descending_excludes_zero() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/feed")
            .with_status(200)
            .with_body(FEED_FIXTURE)
            .create_async()
            .await;
        let app = test_app(format!("{}/feed", server.url()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/etf/premium")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let list: EtfListResponse = serde_json::from_slice(&body_of(response).await).unwrap();
        let symbols: Vec<&str> = list.result.iter().map(|etf| etf.symbol.as_str()).collect();

        // 괴리율 0(PARBEES)과 계산 불가(DEBTFUND)는 제외, 내림차순 정렬
        assert_eq!(symbols, ["NIFTYBEES", "BANKBEES"]);
        assert_eq!(list.result[0].premium_discount_pct, Some(5.0));
        assert_eq!(list.result[1].premium_discount_pct, Some(2.5));
    }

    #[tokio::test]
    async fn test_discount_sorted_ascending_excludes_zero() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/feed")
            .with_status(200)
            .with_body(FEED_FIXTURE)
            .create_async()
            .await;
        let app = test_app(format!("{}/feed", server.url()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/etf/discount")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let list: EtfListResponse = serde_json::from_slice(&body_of(response).await).unwrap();
        let symbols: Vec<&str> = list.result.iter().map(|etf| etf.symbol.as_str()).collect();

        // 할인 폭이 가장 큰 레코드부터 오름차순 정렬
        assert_eq!(symbols, ["SILVERETF", "GOLDBEES"]);
        assert_eq!(list.result[0].premium_discount_pct, Some(-10.0));
        assert_eq!(list.result[1].premium_discount_pct, Some(-5.0));
    }

    #[tokio::test]
    async fn test_equal_percentages_keep_feed_order() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/feed")
            .with_status(200)
            .with_body(TIED_FEED_FIXTURE)
            .create_async()
            .await;
        let app = test_app(format!("{}/feed", server.url()));

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/etf/premium")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let list: EtfListResponse = serde_json::from_slice(&body_of(response).await).unwrap();
        let symbols: Vec<&str> = list.result.iter().map(|etf| etf.symbol.as_str()).collect();

        // +5% 동률인 NIFTYBEES와 JUNIORBEES는 피드 순서를 유지
        assert_eq!(symbols, ["BANKBEES", "NIFTYBEES", "JUNIORBEES"]);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/etf/discount")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let list: EtfListResponse = serde_json::from_slice(&body_of(response).await).unwrap();
        let symbols: Vec<&str> = list.result.iter().map(|etf| etf.symbol.as_str()).collect();

        // -5% 동률인 GOLDBEES와 SILVERBEES도 피드 순서를 유지
        assert_eq!(symbols, ["HDFCGOLD", "GOLDBEES", "SILVERBEES"]);
    }

    #[tokio::test]
    async fn test_feed_failure_returns_bad_gateway() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/feed")
            .with_status(500)
            .create_async()
            .await;
        let app = test_app(format!("{}/feed", server.url()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/etf/all")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

        let error: ErrorBody = serde_json::from_slice(&body_of(response).await).unwrap();
        assert!(error.error.contains("500"));
    }
}
