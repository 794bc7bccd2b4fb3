//! # 플레이어 API 라우트 핸들러
//!
//! - `GET /api/players/{player_id}/stats` → 누적 통계 + 평균 점수
//! - `GET /api/players/by-name/{player_name}` → 이름으로 조회 (없어도 200 + `exists: false`)

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppError, models::*, AppState};

pub async fn get_player_stats(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerStats>, AppError> {
    let stats = state.engine.get_player_stats(&player_id).await?;
    Ok(Json(stats))
}

pub async fn get_player_by_name(
    State(state): State<AppState>,
    Path(player_name): Path<String>,
) -> Result<Json<PlayerLookup>, AppError> {
    let lookup = state.engine.find_player_by_name(&player_name).await?;
    Ok(Json(lookup))
}
