//! ETF 트래커 API 서버.
//!
//! Axum 기반 REST API 서버를 시작합니다.
//! 업스트림 ETF 피드를 프록시하는 시세 조회 엔드포인트를 제공합니다.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use etf_api::routes::create_api_router;
use etf_api::state::AppState;

/// 서버 설정 구조체.
struct ServerConfig {
    /// 바인딩할 호스트 주소
    host: String,
    /// 바인딩할 포트
    port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl ServerConfig {
    /// 환경 변수에서 설정 로드.
    fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        Self { host, port }
    }

    /// 소켓 주소 반환.
    ///
    /// # Errors
    /// `host:port` 형식이 유효하지 않으면 `AddrParseError`를 반환합니다.
    fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

/// CORS 미들웨어 구성.
///
/// 모든 origin, 메서드, 헤더를 자격 증명과 함께 허용합니다.
/// CORS 규격상 자격 증명 허용과 와일드카드 `*`는 함께 쓸 수 없으므로
/// 요청 값을 그대로 반사(mirror)하는 방식을 사용합니다.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
        // preflight 요청 캐시 시간
        .max_age(Duration::from_secs(3600))
}

/// 전체 라우터 생성.
fn create_router(state: Arc<AppState>) -> Router {
    create_api_router()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // .env 파일 로드 (있는 경우)
    let _ = dotenvy::dotenv();

    // tracing 초기화
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "etf_api=info,etf_data=info,tower_http=info".into()),
        )
        .init();

    info!("Starting ETF Tracker API server...");

    // 설정 로드
    let config = ServerConfig::from_env();
    let addr = config.socket_addr().map_err(|e| {
        error!(
            host = %config.host,
            port = config.port,
            error = %e,
            "소켓 주소 설정이 유효하지 않습니다. HOST, PORT 환경변수를 확인하세요."
        );
        e
    })?;

    // AppState 생성 (피드 클라이언트 초기화 포함)
    let state = Arc::new(AppState::new());
    info!(version = %state.version, "Application state initialized");

    // 라우터 생성
    let app = create_router(state);

    // 서버 시작
    info!(%addr, "API server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped gracefully");

    Ok(())
}

/// Graceful shutdown 시그널 대기.
///
/// Ctrl+C 또는 SIGTERM 시그널을 수신하면 서버를 정상 종료합니다.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
