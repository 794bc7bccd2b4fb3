//! # 플레이어 모델 정의
//!
//! 플레이어별 누적 통계를 담는 레코드와 통계/조회 응답 타입입니다.
//! 누적 통계는 게임이 완료될 때 `Player::record_game()`으로만 갱신됩니다.

use serde::{Deserialize, Serialize};

use super::question::TOTAL_ROUNDS;

/// 보스 레벨 클리어로 인정되는 최소 점수
pub const BOSS_CLEAR_SCORE: i64 = 9;

/// 플레이어 엔티티 — DB의 `players` 테이블 한 행에 대응합니다.
///
/// `name`이 조회 키이며 대소문자를 구분합니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Player {
    /// 플레이어 고유 식별자 (UUIDv7)
    pub id: String,
    pub name: String,
    /// 완료한 게임 수
    pub games_played: i64,
    /// 완료한 게임 점수의 합
    pub total_score: i64,
    pub best_score: i64,
    /// 9점 이상으로 끝낸 게임 수
    pub boss_levels_completed: i64,
    /// 10점 만점으로 끝낸 게임 수
    pub perfect_games: i64,
    pub created_at: String,
    /// 마지막 게임 완료 시각 — 아직 완료한 게임이 없으면 None
    pub last_played_at: Option<String>,
}

impl Player {
    /// 누적 통계가 모두 0인 새 플레이어를 만듭니다.
    pub fn new(id: String, name: String, created_at: String) -> Self {
        Self {
            id,
            name,
            games_played: 0,
            total_score: 0,
            best_score: 0,
            boss_levels_completed: 0,
            perfect_games: 0,
            created_at,
            last_played_at: None,
        }
    }

    /// 완료된 게임 한 판의 최종 점수를 누적 통계에 반영합니다.
    pub fn record_game(&mut self, final_score: i64, played_at: String) {
        self.games_played += 1;
        self.total_score += final_score;
        self.best_score = self.best_score.max(final_score);
        if final_score == TOTAL_ROUNDS {
            self.perfect_games += 1;
        }
        if final_score >= BOSS_CLEAR_SCORE {
            self.boss_levels_completed += 1;
        }
        self.last_played_at = Some(played_at);
    }

    /// 평균 점수 (소수 둘째 자리 반올림). 완료한 게임이 없으면 0.0
    pub fn average_score(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let average = self.total_score as f64 / self.games_played as f64;
        (average * 100.0).round() / 100.0
    }
}

/// 플레이어 통계 응답 — `GET /api/players/{player_id}/stats`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub name: String,
    pub games_played: i64,
    pub total_score: i64,
    pub best_score: i64,
    pub boss_levels_completed: i64,
    pub perfect_games: i64,
    pub average_score: f64,
}

impl From<&Player> for PlayerStats {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            games_played: player.games_played,
            total_score: player.total_score,
            best_score: player.best_score,
            boss_levels_completed: player.boss_levels_completed,
            perfect_games: player.perfect_games,
            average_score: player.average_score(),
        }
    }
}

/// 이름으로 플레이어 조회 응답 — `GET /api/players/by-name/{player_name}`
///
/// 플레이어가 없어도 에러가 아니라 `{"exists": false}`를 돌려줍니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerLookup {
    pub exists: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub games_played: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub best_score: Option<i64>,
}

impl PlayerLookup {
    pub fn missing() -> Self {
        Self {
            exists: false,
            player_id: None,
            name: None,
            games_played: None,
            best_score: None,
        }
    }
}

impl From<&Player> for PlayerLookup {
    fn from(player: &Player) -> Self {
        Self {
            exists: true,
            player_id: Some(player.id.clone()),
            name: Some(player.name.clone()),
            games_played: Some(player.games_played),
            best_score: Some(player.best_score),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(
            "p1".to_string(),
            "Alice".to_string(),
            "2026-01-01T00:00:00.000Z".to_string(),
        )
    }

    #[test]
    fn perfect_game_counts_as_perfect_and_boss() {
        let mut p = player();
        p.record_game(10, "t".to_string());
        assert_eq!(p.perfect_games, 1);
        assert_eq!(p.boss_levels_completed, 1);
        assert_eq!(p.best_score, 10);
    }

    #[test]
    fn nine_counts_only_as_boss() {
        let mut p = player();
        p.record_game(9, "t".to_string());
        assert_eq!(p.perfect_games, 0);
        assert_eq!(p.boss_levels_completed, 1);
    }

    #[test]
    fn eight_counts_as_neither() {
        let mut p = player();
        p.record_game(8, "t".to_string());
        assert_eq!(p.perfect_games, 0);
        assert_eq!(p.boss_levels_completed, 0);
        assert_eq!(p.games_played, 1);
        assert_eq!(p.total_score, 8);
        assert_eq!(p.last_played_at.as_deref(), Some("t"));
    }

    #[test]
    fn best_score_never_decreases() {
        let mut p = player();
        p.record_game(7, "t1".to_string());
        p.record_game(3, "t2".to_string());
        assert_eq!(p.best_score, 7);
        assert_eq!(p.total_score, 10);
    }

    #[test]
    fn average_score_is_rounded_to_two_places() {
        let mut p = player();
        assert_eq!(p.average_score(), 0.0);

        p.games_played = 4;
        p.total_score = 15;
        assert_eq!(p.average_score(), 3.75);

        p.games_played = 3;
        p.total_score = 20;
        assert_eq!(p.average_score(), 6.67);
    }

    #[test]
    fn missing_lookup_serializes_exists_only() {
        let json = serde_json::to_value(PlayerLookup::missing()).unwrap();
        assert_eq!(json, serde_json::json!({ "exists": false }));
    }
}
