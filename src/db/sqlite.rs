//! # SQLite 저장소
//!
//! sqlx로 `players`, `game_sessions`, `game_rounds` 테이블을 읽고 씁니다.
//!
//! ## 테이블 관계
//! ```text
//! players 1 ── N game_sessions 1 ── N game_rounds
//! ```
//!
//! 세션은 세션 행 하나와 라운드 행 여러 개로 나뉘어 저장되며,
//! `put_session()`은 이 둘을 하나의 트랜잭션으로 기록합니다.
//! `complete_game()`은 같은 트랜잭션 안에서 플레이어 행까지 함께 기록합니다.

use async_trait::async_trait;
use sqlx::{sqlite::SqlitePoolOptions, SqliteConnection, SqlitePool};

use super::GameStore;
use crate::error::AppError;
use crate::models::{GameSession, Operation, Player, RoundRecord};

/// SQLite 연결 풀을 감싼 저장소
///
/// SqlitePool은 내부적으로 Arc를 사용하므로 clone해도 같은 풀을 가리킵니다.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

/// `game_sessions` 테이블 한 행
#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: String,
    player_id: String,
    current_round: i64,
    score: i64,
    started_at: String,
    completed_at: Option<String>,
    is_completed: bool,
}

/// `game_rounds` 테이블 한 행
#[derive(Debug, sqlx::FromRow)]
struct RoundRow {
    round_number: i64,
    question: String,
    operation: String,
    correct_answer: i64,
    /// JSON 배열 문자열 (예: "[12,9,15]")
    options: String,
    player_answer: Option<i64>,
    is_correct: Option<bool>,
    time_taken: Option<f64>,
}

impl TryFrom<RoundRow> for RoundRecord {
    type Error = AppError;

    fn try_from(row: RoundRow) -> Result<Self, Self::Error> {
        let operation = Operation::from_symbol(&row.operation).ok_or_else(|| {
            AppError::Internal(format!("Unknown operation stored: {}", row.operation))
        })?;
        Ok(Self {
            round_number: row.round_number,
            question: row.question,
            operation,
            correct_answer: row.correct_answer,
            options: serde_json::from_str(&row.options)?,
            player_answer: row.player_answer,
            is_correct: row.is_correct,
            time_taken: row.time_taken,
        })
    }
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// 데이터베이스에 연결하고 아직 적용되지 않은 마이그레이션을 실행합니다.
    ///
    /// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로 `max_connections`를 1로 주어야 합니다.
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await?;

        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self::new(pool))
    }
}

#[async_trait]
impl GameStore for SqliteStore {
    async fn get_player_by_name(&self, name: &str) -> Result<Option<Player>, AppError> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            SELECT id, name, games_played, total_score, best_score,
                   boss_levels_completed, perfect_games, created_at, last_played_at
            FROM players
            WHERE name = ?
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    async fn get_player_by_id(&self, id: &str) -> Result<Option<Player>, AppError> {
        let player = sqlx::query_as::<_, Player>(
            r#"
            SELECT id, name, games_played, total_score, best_score,
                   boss_levels_completed, perfect_games, created_at, last_played_at
            FROM players
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(player)
    }

    async fn put_player(&self, player: &Player) -> Result<(), AppError> {
        let mut conn = self.pool.acquire().await?;
        write_player(&mut *conn, player).await
    }

    async fn get_session(&self, id: &str) -> Result<Option<GameSession>, AppError> {
        let row = sqlx::query_as::<_, SessionRow>(
            r#"
            SELECT id, player_id, current_round, score, started_at, completed_at, is_completed
            FROM game_sessions
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let rounds = sqlx::query_as::<_, RoundRow>(
            r#"
            SELECT round_number, question, operation, correct_answer, options,
                   player_answer, is_correct, time_taken
            FROM game_rounds
            WHERE session_id = ?
            ORDER BY round_number ASC
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(RoundRecord::try_from)
        .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(GameSession {
            id: row.id,
            player_id: row.player_id,
            current_round: row.current_round,
            score: row.score,
            started_at: row.started_at,
            completed_at: row.completed_at,
            is_completed: row.is_completed,
            rounds,
        }))
    }

    async fn put_session(&self, session: &GameSession) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        write_session(&mut *tx, session).await?;
        tx.commit().await?;
        Ok(())
    }

    async fn complete_game(&self, session: &GameSession, player: &Player) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        write_session(&mut *tx, session).await?;
        write_player(&mut *tx, player).await?;
        // commit 전에 실패하면 tx가 drop되면서 롤백됩니다
        tx.commit().await?;
        Ok(())
    }
}

/// 플레이어 행을 upsert합니다. 풀 연결이든 트랜잭션이든 같은 SQL을 씁니다.
async fn write_player(conn: &mut SqliteConnection, player: &Player) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO players (id, name, games_played, total_score, best_score,
                             boss_levels_completed, perfect_games, created_at, last_played_at)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            name = excluded.name,
            games_played = excluded.games_played,
            total_score = excluded.total_score,
            best_score = excluded.best_score,
            boss_levels_completed = excluded.boss_levels_completed,
            perfect_games = excluded.perfect_games,
            last_played_at = excluded.last_played_at
        "#,
    )
    .bind(&player.id)
    .bind(&player.name)
    .bind(player.games_played)
    .bind(player.total_score)
    .bind(player.best_score)
    .bind(player.boss_levels_completed)
    .bind(player.perfect_games)
    .bind(&player.created_at)
    .bind(&player.last_played_at)
    .execute(&mut *conn)
    .await?;

    Ok(())
}

/// 세션 행과 라운드 행들을 upsert합니다. 호출자가 트랜잭션을 열고 닫습니다.
async fn write_session(conn: &mut SqliteConnection, session: &GameSession) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO game_sessions (id, player_id, current_round, score,
                                   started_at, completed_at, is_completed)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(id) DO UPDATE SET
            current_round = excluded.current_round,
            score = excluded.score,
            completed_at = excluded.completed_at,
            is_completed = excluded.is_completed
        "#,
    )
    .bind(&session.id)
    .bind(&session.player_id)
    .bind(session.current_round)
    .bind(session.score)
    .bind(&session.started_at)
    .bind(&session.completed_at)
    .bind(session.is_completed)
    .execute(&mut *conn)
    .await?;

    for round in &session.rounds {
        let options = serde_json::to_string(&round.options)?;
        sqlx::query(
            r#"
            INSERT INTO game_rounds (session_id, round_number, question, operation,
                                     correct_answer, options, player_answer,
                                     is_correct, time_taken)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(session_id, round_number) DO UPDATE SET
                player_answer = excluded.player_answer,
                is_correct = excluded.is_correct,
                time_taken = excluded.time_taken
            "#,
        )
        .bind(&session.id)
        .bind(round.round_number)
        .bind(&round.question)
        .bind(round.operation.symbol())
        .bind(round.correct_answer)
        .bind(options)
        .bind(round.player_answer)
        .bind(round.is_correct)
        .bind(round.time_taken)
        .execute(&mut *conn)
        .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Question;

    async fn store() -> SqliteStore {
        SqliteStore::connect("sqlite::memory:", 1).await.unwrap()
    }

    fn question() -> Question {
        Question {
            prompt: "9 ÷ 3".to_string(),
            operation: Operation::Divide,
            correct_answer: 3,
            options: vec![5, 3, 1],
        }
    }

    #[tokio::test]
    async fn player_round_trips_by_name_and_id() {
        let store = store().await;
        let player = Player::new("p1".into(), "Alice".into(), "t0".into());
        store.put_player(&player).await.unwrap();

        assert_eq!(store.get_player_by_name("Alice").await.unwrap(), Some(player.clone()));
        assert_eq!(store.get_player_by_id("p1").await.unwrap(), Some(player));
        assert_eq!(store.get_player_by_name("alice").await.unwrap(), None);
    }

    #[tokio::test]
    async fn put_player_overwrites_aggregates() {
        let store = store().await;
        let mut player = Player::new("p1".into(), "Bob".into(), "t0".into());
        store.put_player(&player).await.unwrap();

        player.record_game(9, "t1".into());
        store.put_player(&player).await.unwrap();

        let loaded = store.get_player_by_id("p1").await.unwrap().unwrap();
        assert_eq!(loaded.games_played, 1);
        assert_eq!(loaded.boss_levels_completed, 1);
        assert_eq!(loaded.last_played_at.as_deref(), Some("t1"));
    }

    #[tokio::test]
    async fn session_keeps_rounds_in_order() {
        let store = store().await;
        let player = Player::new("p1".into(), "Cara".into(), "t0".into());
        store.put_player(&player).await.unwrap();

        let mut session = GameSession::new("s1".into(), "p1".into(), question(), "t0".into());
        store.put_session(&session).await.unwrap();

        session.answer_current_round(3, 2.5);
        session.advance(question());
        store.put_session(&session).await.unwrap();

        let loaded = store.get_session("s1").await.unwrap().unwrap();
        assert_eq!(loaded, session);
        assert_eq!(loaded.rounds[0].operation, Operation::Divide);
        assert_eq!(loaded.rounds[0].options, vec![5, 3, 1]);
        assert_eq!(loaded.rounds[1].player_answer, None);
    }

    #[tokio::test]
    async fn complete_game_commits_session_and_player_together() {
        let store = store().await;
        let mut player = Player::new("p1".into(), "Dana".into(), "t0".into());
        store.put_player(&player).await.unwrap();

        let mut session = GameSession::new("s1".into(), "p1".into(), question(), "t0".into());
        store.put_session(&session).await.unwrap();

        session.answer_current_round(3, 1.0);
        session.complete("t1".into());
        player.record_game(session.score, "t1".into());
        store.complete_game(&session, &player).await.unwrap();

        let loaded = store.get_session("s1").await.unwrap().unwrap();
        assert!(loaded.is_completed);
        assert_eq!(loaded.rounds[0].player_answer, Some(3));
        let loaded = store.get_player_by_id("p1").await.unwrap().unwrap();
        assert_eq!(loaded.games_played, 1);
        assert_eq!(loaded.total_score, 1);
    }

    #[tokio::test]
    async fn failed_player_write_rolls_back_session() {
        let store = store().await;
        let player = Player::new("p1".into(), "Erin".into(), "t0".into());
        store.put_player(&player).await.unwrap();
        store
            .put_player(&Player::new("p2".into(), "Finn".into(), "t0".into()))
            .await
            .unwrap();

        let mut session = GameSession::new("s1".into(), "p1".into(), question(), "t0".into());
        store.put_session(&session).await.unwrap();

        session.answer_current_round(3, 1.0);
        session.complete("t1".into());
        // 이미 다른 플레이어가 쓰는 이름이라 UNIQUE(name) 제약에 걸립니다
        let mut clashing = player.clone();
        clashing.name = "Finn".into();
        clashing.record_game(session.score, "t1".into());

        assert!(store.complete_game(&session, &clashing).await.is_err());

        let loaded = store.get_session("s1").await.unwrap().unwrap();
        assert!(!loaded.is_completed);
        assert_eq!(loaded.completed_at, None);
        assert_eq!(loaded.rounds[0].player_answer, None);
        let loaded = store.get_player_by_id("p1").await.unwrap().unwrap();
        assert_eq!(loaded.games_played, 0);
    }

    #[tokio::test]
    async fn unknown_session_is_none() {
        let store = store().await;
        assert!(store.get_session("missing").await.unwrap().is_none());
    }
}
