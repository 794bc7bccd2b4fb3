//! # 산수 퀴즈 게임 백엔드
//!
//! 10라운드짜리 산수 퀴즈의 문제 생성, 세션 진행, 채점, 플레이어 통계를 담당합니다.
//!
//! `main.rs`와 통합 테스트(tests/)가 같은 라우터를 쓰도록
//! 앱 상태(`AppState`)와 라우터 조립(`create_router`)을 라이브러리 쪽에 둡니다.

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::{path::Path, sync::Arc};

use axum::{
    http::HeaderValue,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use config::Config;
use db::{GameStore, MemoryStore, SqliteStore};
use error::AppError;
use services::GameEngine;

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// Axum의 State Extractor는 내부적으로 clone하므로 `Clone`이 필수입니다.
#[derive(Clone)]
pub struct AppState {
    pub engine: GameEngine,
}

impl AppState {
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self {
            engine: GameEngine::new(store),
        }
    }
}

/// 설정에 맞는 저장소를 엽니다.
///
/// `DATABASE_URL`이 있으면 SQLite(마이그레이션 포함), 없으면 메모리 저장소입니다.
pub async fn open_store(config: &Config) -> Result<Arc<dyn GameStore>, AppError> {
    match &config.database_url {
        Some(url) => {
            let store = SqliteStore::connect(url, 5).await?;
            tracing::info!("Using SQLite store");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory store (data is lost on restart)");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

/// `/api` 아래의 게임 API 라우트
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(routes::health_check))
        .route("/games", post(routes::start_game))
        .route("/games/{session_id}", get(routes::get_game_session))
        .route("/games/{session_id}/answer", post(routes::submit_answer))
        .route("/players/{player_id}/stats", get(routes::get_player_stats))
        .route("/players/by-name/{player_name}", get(routes::get_player_by_name))
}

/// CORS 미들웨어 — 허용 출처 목록이 비어 있으면 모든 출처를 허용합니다.
fn cors_layer(config: &Config) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// 전체 앱 라우터를 조립합니다.
///
/// 프론트엔드 빌드 디렉토리가 있으면 API가 아닌 경로는 SPA로 넘깁니다.
pub fn create_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        // 안내 메시지는 "/api"와 "/api/" 둘 다에서 응답합니다
        .route("/api", get(routes::api_root))
        .route("/api/", get(routes::api_root))
        .nest("/api", api_routes());

    let frontend_dist = Path::new(&config.frontend_dist);
    let router = if frontend_dist.exists() {
        tracing::info!("Serving frontend static files from {}", config.frontend_dist);
        let serve_dir = ServeDir::new(frontend_dist)
            .not_found_service(ServeFile::new(frontend_dist.join("index.html")));
        router.fallback_service(serve_dir)
    } else {
        tracing::warn!("Frontend dist directory not found, serving API only");
        router
    };

    router
        .layer(cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
