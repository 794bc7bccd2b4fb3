//! # 헬스체크(Health Check) 핸들러
//!
//! 서버가 정상적으로 동작하는지 확인하는 엔드포인트입니다.
//!
//! ## 엔드포인트
//! - `GET /api/` → `{ "message": "Add Nivin Add! Game API is running" }`
//! - `GET /api/health` → `{ "status": "ok" }`

use axum::Json;                // JSON 응답 래퍼
use serde_json::{json, Value}; // JSON 생성 유틸리티

/// `GET /api/` — 게임 API가 떠 있는지 알려주는 안내 메시지
pub async fn api_root() -> Json<Value> {
    Json(json!({
        "message": "Add Nivin Add! Game API is running"
    }))
}

/// `GET /api/health` — 로드밸런서/컨테이너 헬스체크용
///
/// `Result`를 사용하지 않으므로 이 핸들러는 실패하지 않습니다.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok"
    }))
}
