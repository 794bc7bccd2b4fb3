//! # 산수 퀴즈 게임 서버 진입점
//!
//! 이 파일이 수행하는 작업:
//! 1. 환경변수(.env) 로딩
//! 2. 로깅(tracing) 초기화
//! 3. 저장소 열기 (SQLite + 마이그레이션, 또는 메모리)
//! 4. API 라우터 설정
//! 5. HTTP 서버 시작 (Ctrl+C로 정상 종료)

use anyhow::Result; // anyhow::Result: 어떤 에러 타입이든 담을 수 있는 범용 Result 타입
use mathgame::{config::Config, create_router, open_store, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt}; // 로깅 초기화 유틸리티

#[tokio::main]
async fn main() -> Result<()> {
    // ── 1단계: 환경변수 로딩 ──
    // .ok(): .env 파일이 없어도 에러 없이 넘어갑니다.
    dotenvy::dotenv().ok();

    // ── 2단계: 로깅(tracing) 초기화 ──
    // RUST_LOG가 없으면 mathgame, tower_http, axum 모듈을 debug 레벨로 설정
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mathgame=debug,tower_http=debug,axum=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // ── 3단계: 설정 로딩 ──
    let config = Config::from_env();
    tracing::info!("Starting math game server on {}:{}", config.host, config.port);

    // ── 4단계: 저장소 ──
    // 저장소 핸들은 엔진에 명시적으로 주입됩니다 (전역 연결 객체 없음)
    let store = open_store(&config).await?;
    let state = AppState::new(store);

    // ── 5단계: 라우터 ──
    let app = create_router(state, &config);

    // ── 6단계: 서버 시작 ──
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Ctrl+C(SIGINT)를 기다립니다. 신호를 받으면 진행 중인 요청을 마무리하고 종료합니다.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // 신호를 못 받으면 종료 트리거 없이 계속 서비스합니다
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
