//! # 게임 세션 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/games | `start_game` | 새 게임 시작 (라운드 1 문제 반환) |
//! | POST | /api/games/{session_id}/answer | `submit_answer` | 현재 라운드 답안 제출 |
//! | GET | /api/games/{session_id} | `get_game_session` | 세션 현재 상태 조회 |
//!
//! ## 게임 흐름
//! ```text
//! 1. POST /games { "player_name": "Alice" }       → 라운드 1 문제
//! 2. POST /games/{id}/answer { "player_answer": 7 } → 채점 결과 + 다음 문제 (next)
//! 3. ... 라운드 10(보스)까지 반복 → is_game_completed: true
//! ```
//!
//! 실제 로직은 모두 `GameEngine`에 있고, 핸들러는 요청 값을 검사한 뒤 넘기기만 합니다.

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppError, models::*, AppState};

/// 새 게임을 시작합니다.
///
/// `POST /api/games` + `{ "player_name": "Alice" }` → `GameResponse`
///
/// 처음 보는 이름이면 플레이어가 새로 만들어집니다. 빈 이름은 400.
pub async fn start_game(
    State(state): State<AppState>,
    Json(req): Json<StartGameRequest>,
) -> Result<Json<GameResponse>, AppError> {
    if req.player_name.trim().is_empty() {
        return Err(AppError::BadRequest("Player name must not be empty".to_string()));
    }

    let game = state.engine.start_game(&req.player_name).await?;
    Ok(Json(game))
}

/// 현재 라운드에 답안을 제출합니다.
///
/// `POST /api/games/{session_id}/answer` + `{ "player_answer": 12, "time_taken": 3.2 }`
///
/// - 없는 세션 → 404
/// - 이미 끝난 게임 → 400 (`invalid_state`)
/// - 음수이거나 유한하지 않은 `time_taken` → 400 (`bad_request`)
pub async fn submit_answer(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitAnswerRequest>,
) -> Result<Json<AnswerResponse>, AppError> {
    if !req.time_taken.is_finite() || req.time_taken < 0.0 {
        return Err(AppError::BadRequest(
            "time_taken must be a non-negative number".to_string(),
        ));
    }

    let response = state
        .engine
        .submit_answer(&session_id, req.player_answer, req.time_taken)
        .await?;
    Ok(Json(response))
}

/// `GET /api/games/{session_id}` — 세션의 현재 라운드, 점수, 문제를 조회합니다.
pub async fn get_game_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<GameResponse>, AppError> {
    let game = state.engine.get_session(&session_id).await?;
    Ok(Json(game))
}
