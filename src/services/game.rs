//! # 게임 진행/채점 엔진
//!
//! 세션 하나를 라운드 1부터 보스 라운드 10까지 진행시키고,
//! 게임이 끝나면 플레이어 누적 통계를 갱신합니다.
//!
//! ## 상태 전이
//! ```text
//! start_game() ─→ 답변 대기(1) ─submit_answer()─→ 답변 대기(2) ─→ ... ─→ 답변 대기(10)
//!                                                                          │
//!                                                       submit_answer() ───┴─→ 완료
//! ```
//!
//! 엔진은 저장소를 `Arc<dyn GameStore>`로 주입받습니다. 모든 연산은
//! 저장소 읽기/쓰기의 짧은 연속이며, 같은 세션에 동시에 답이 들어오면
//! 마지막으로 기록된 쪽이 남습니다.

use std::sync::Arc;

use chrono::Utc;

use crate::db::GameStore;
use crate::error::AppError;
use crate::models::*;
use crate::services::generator;

/// 세션 진행과 채점을 담당하는 엔진
///
/// `Arc`만 들고 있으므로 clone 비용이 낮고, Axum State로 그대로 공유할 수 있습니다.
#[derive(Clone)]
pub struct GameEngine {
    store: Arc<dyn GameStore>,
}

/// 저장소에 기록하는 시각 형식 (UTC, 밀리초까지)
fn now_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

impl GameEngine {
    pub fn new(store: Arc<dyn GameStore>) -> Self {
        Self { store }
    }

    /// 새 게임을 시작합니다.
    ///
    /// 이름으로 플레이어를 찾고, 없으면 누적 통계 0인 플레이어를 새로 만듭니다.
    /// 그다음 라운드 1 문제가 담긴 세션을 만들어 저장합니다.
    pub async fn start_game(&self, player_name: &str) -> Result<GameResponse, AppError> {
        let now = now_timestamp();

        let player = match self.store.get_player_by_name(player_name).await? {
            Some(player) => player,
            None => {
                let player = Player::new(
                    uuid::Uuid::now_v7().to_string(),
                    player_name.to_string(),
                    now.clone(),
                );
                self.store.put_player(&player).await?;
                tracing::info!(player_id = %player.id, name = %player.name, "Created new player");
                player
            }
        };

        let question = generator::generate_question(&mut rand::rng(), 1);
        let session = GameSession::new(
            uuid::Uuid::now_v7().to_string(),
            player.id.clone(),
            question,
            now,
        );
        self.store.put_session(&session).await?;

        tracing::info!(session_id = %session.id, player_id = %player.id, "Game started");

        GameResponse::from_session(&session)
            .ok_or_else(|| AppError::Internal("New session has no rounds".to_string()))
    }

    /// 현재 라운드에 답을 제출합니다.
    ///
    /// ## 에러
    /// - `NotFound`: 없는 세션
    /// - `InvalidState`: 이미 완료된 세션
    pub async fn submit_answer(
        &self,
        session_id: &str,
        player_answer: i64,
        time_taken: f64,
    ) -> Result<AnswerResponse, AppError> {
        let mut session = self
            .store
            .get_session(session_id)
            .await?
            .ok_or(AppError::NotFound("Game session"))?;

        if session.is_completed {
            return Err(AppError::InvalidState("Game already completed".to_string()));
        }

        let is_correct = session
            .answer_current_round(player_answer, time_taken)
            .ok_or_else(|| AppError::Internal(format!("Session {} has no pending round", session.id)))?;

        let graded_round = session.current_round;
        let correct_answer = session
            .current_round_record()
            .map(|r| r.correct_answer)
            .ok_or_else(|| AppError::Internal(format!("Session {} has no rounds", session.id)))?;

        tracing::debug!(
            session_id = %session.id,
            round = graded_round,
            is_correct,
            score = session.score,
            "Round graded"
        );

        let next = if session.is_final_round() {
            session.complete(now_timestamp());
            None
        } else {
            let question = generator::generate_question(&mut rand::rng(), graded_round + 1);
            session.advance(question);
            session.current_round_record().map(NextQuestion::from)
        };

        if session.is_completed {
            self.finalize_game(&session).await?;
        } else {
            self.store.put_session(&session).await?;
        }

        Ok(AnswerResponse {
            is_correct,
            correct_answer,
            current_round: session.current_round,
            score: session.score,
            is_game_completed: session.is_completed,
            is_boss_level: is_boss_round(graded_round),
            next,
        })
    }

    /// 완료된 세션을 저장하고 최종 점수를 플레이어 누적 통계에 반영합니다.
    ///
    /// 세션과 플레이어는 `complete_game()` 한 번으로 함께 기록되므로, 저장이 실패하면
    /// 세션은 완료 전 상태로 남고 같은 답을 다시 제출할 수 있습니다.
    async fn finalize_game(&self, session: &GameSession) -> Result<(), AppError> {
        let Some(mut player) = self.store.get_player_by_id(&session.player_id).await? else {
            tracing::warn!(
                session_id = %session.id,
                player_id = %session.player_id,
                "Player missing at game completion; aggregates not updated"
            );
            return self.store.put_session(session).await;
        };

        let played_at = session.completed_at.clone().unwrap_or_else(now_timestamp);
        player.record_game(session.score, played_at);
        self.store.complete_game(session, &player).await?;

        tracing::info!(
            session_id = %session.id,
            player_id = %player.id,
            final_score = session.score,
            "Game completed"
        );
        Ok(())
    }

    /// 세션의 현재 상태를 조회합니다. 아무것도 바꾸지 않습니다.
    pub async fn get_session(&self, session_id: &str) -> Result<GameResponse, AppError> {
        let session = self
            .store
            .get_session(session_id)
            .await?
            .ok_or(AppError::NotFound("Game session"))?;

        GameResponse::from_session(&session)
            .ok_or_else(|| AppError::Internal(format!("Session {} has no rounds", session.id)))
    }

    /// 플레이어 누적 통계와 평균 점수를 조회합니다.
    pub async fn get_player_stats(&self, player_id: &str) -> Result<PlayerStats, AppError> {
        let player = self
            .store
            .get_player_by_id(player_id)
            .await?
            .ok_or(AppError::NotFound("Player"))?;

        Ok(PlayerStats::from(&player))
    }

    /// 이름으로 플레이어를 찾습니다. 없으면 `exists: false`이며 에러가 아닙니다.
    pub async fn find_player_by_name(&self, name: &str) -> Result<PlayerLookup, AppError> {
        let lookup = self
            .store
            .get_player_by_name(name)
            .await?
            .map(|player| PlayerLookup::from(&player))
            .unwrap_or_else(PlayerLookup::missing);

        Ok(lookup)
    }
}
