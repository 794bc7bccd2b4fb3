//! # 게임 세션 모델 정의
//!
//! 한 번의 플레이(10라운드)를 추적하는 데이터 구조체들을 정의합니다.
//!
//! ## 세션 상태 흐름
//! ```text
//! 시작 → 라운드 1 답변 대기 → ... → 라운드 10(보스) 답변 대기 → 완료
//! ```
//!
//! 진행 중에는 항상 `rounds.len() == current_round`이고,
//! 답이 비어 있을 수 있는 라운드는 마지막 라운드 하나뿐입니다.
//! 완료 여부는 `is_completed` 플래그로만 표현합니다 (라운드 카운터를 11로 올리지 않음).

use serde::{Deserialize, Serialize};

use super::question::{is_boss_round, Operation, Question, TOTAL_ROUNDS};

/// 라운드 하나의 기록
///
/// 라운드가 시작될 때 생성되고, 플레이어가 답을 제출할 때 딱 한 번 갱신됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 라운드 번호 (1..=10)
    pub round_number: i64,
    /// 문제 문자열 (예: "12 - 5")
    pub question: String,
    pub operation: Operation,
    pub correct_answer: i64,
    /// 이 라운드에서 보여준 보기 (표시 순서 그대로)
    pub options: Vec<i64>,
    /// 플레이어가 고른 답 — 아직 답하지 않았으면 None
    pub player_answer: Option<i64>,
    /// 정답 여부 — 아직 답하지 않았으면 None
    pub is_correct: Option<bool>,
    /// 답하는 데 걸린 시간(초)
    pub time_taken: Option<f64>,
}

impl RoundRecord {
    /// 생성된 문제로 아직 답하지 않은 라운드 기록을 만듭니다.
    pub fn new(round_number: i64, question: Question) -> Self {
        Self {
            round_number,
            question: question.prompt,
            operation: question.operation,
            correct_answer: question.correct_answer,
            options: question.options,
            player_answer: None,
            is_correct: None,
            time_taken: None,
        }
    }

    pub fn is_answered(&self) -> bool {
        self.player_answer.is_some()
    }
}

/// 게임 세션 엔티티 — 한 플레이어의 한 판
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    /// 세션 고유 식별자 (UUIDv7)
    pub id: String,
    /// 이 세션을 플레이하는 플레이어의 ID
    pub player_id: String,
    /// 현재(또는 마지막으로 채점된) 라운드 번호 (1..=10)
    pub current_round: i64,
    /// 맞힌 라운드 수 (0..=10)
    pub score: i64,
    pub started_at: String,
    /// 완료 시각 — 진행 중이면 None
    pub completed_at: Option<String>,
    pub is_completed: bool,
    /// 라운드 기록 (라운드 번호 순서)
    pub rounds: Vec<RoundRecord>,
}

impl GameSession {
    /// 라운드 1 문제로 새 세션을 만듭니다.
    pub fn new(id: String, player_id: String, first_question: Question, started_at: String) -> Self {
        Self {
            id,
            player_id,
            current_round: 1,
            score: 0,
            started_at,
            completed_at: None,
            is_completed: false,
            rounds: vec![RoundRecord::new(1, first_question)],
        }
    }

    /// 현재 라운드 기록 (마지막 라운드, 답이 비어 있을 수 있음)
    pub fn current_round_record(&self) -> Option<&RoundRecord> {
        self.rounds.last()
    }

    /// 현재 라운드에 답을 기록하고 정답 여부를 반환합니다.
    ///
    /// 이미 완료된 세션이거나 답을 기다리는 라운드가 없으면 None을 반환하고
    /// 아무것도 바꾸지 않습니다.
    pub fn answer_current_round(&mut self, player_answer: i64, time_taken: f64) -> Option<bool> {
        if self.is_completed {
            return None;
        }
        let record = self.rounds.last_mut().filter(|r| !r.is_answered())?;

        let is_correct = player_answer == record.correct_answer;
        record.player_answer = Some(player_answer);
        record.is_correct = Some(is_correct);
        record.time_taken = Some(time_taken);

        if is_correct {
            self.score += 1;
        }
        debug_assert_eq!(self.score, self.correct_rounds());
        Some(is_correct)
    }

    /// 다음 라운드 문제를 붙이고 라운드 번호를 올립니다.
    pub fn advance(&mut self, next_question: Question) {
        let next_round = self.current_round + 1;
        self.rounds.push(RoundRecord::new(next_round, next_question));
        self.current_round = next_round;
    }

    /// 세션을 완료 상태로 바꿉니다. `current_round`는 그대로 둡니다.
    pub fn complete(&mut self, completed_at: String) {
        self.is_completed = true;
        self.completed_at = Some(completed_at);
    }

    /// 방금 채점된 라운드가 마지막 라운드인지
    pub fn is_final_round(&self) -> bool {
        self.current_round >= TOTAL_ROUNDS
    }

    pub fn is_boss_level(&self) -> bool {
        is_boss_round(self.current_round)
    }

    /// 정답으로 기록된 라운드 수 — 항상 `score`와 같아야 합니다.
    fn correct_rounds(&self) -> i64 {
        self.rounds
            .iter()
            .filter(|r| r.is_correct == Some(true))
            .count() as i64
    }
}

/// 게임 시작 요청 — `POST /api/games`의 요청 본문
#[derive(Debug, Deserialize)]
pub struct StartGameRequest {
    pub player_name: String,
}

/// 답안 제출 요청 — `POST /api/games/{session_id}/answer`의 요청 본문
#[derive(Debug, Deserialize)]
pub struct SubmitAnswerRequest {
    pub player_answer: i64,
    /// 답하는 데 걸린 시간(초). 생략하면 0.0
    #[serde(default)]
    pub time_taken: f64,
}

/// 게임 시작/세션 조회 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameResponse {
    pub session_id: String,
    pub player_id: String,
    pub current_round: i64,
    pub score: i64,
    pub total_rounds: i64,
    pub question: String,
    pub options: Vec<i64>,
    pub correct_answer: i64,
    pub is_boss_level: bool,
    pub is_completed: bool,
}

impl GameResponse {
    /// 세션의 현재 라운드를 응답 형태로 투영합니다.
    ///
    /// 라운드 기록이 하나도 없는 (손상된) 세션이면 None.
    pub fn from_session(session: &GameSession) -> Option<Self> {
        let record = session.current_round_record()?;
        Some(Self {
            session_id: session.id.clone(),
            player_id: session.player_id.clone(),
            current_round: session.current_round,
            score: session.score,
            total_rounds: TOTAL_ROUNDS,
            question: record.question.clone(),
            options: record.options.clone(),
            correct_answer: record.correct_answer,
            is_boss_level: session.is_boss_level(),
            is_completed: session.is_completed,
        })
    }
}

/// 다음 라운드 문제 — 게임이 계속될 때만 답안 응답에 포함됩니다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextQuestion {
    pub question: String,
    pub options: Vec<i64>,
    pub correct_answer: i64,
    pub is_boss_level: bool,
}

impl From<&RoundRecord> for NextQuestion {
    fn from(record: &RoundRecord) -> Self {
        Self {
            question: record.question.clone(),
            options: record.options.clone(),
            correct_answer: record.correct_answer,
            is_boss_level: is_boss_round(record.round_number),
        }
    }
}

/// 답안 제출 응답
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnswerResponse {
    pub is_correct: bool,
    /// 방금 채점한 라운드의 정답
    pub correct_answer: i64,
    /// 다음에 플레이할 라운드 (완료 시에는 10)
    pub current_round: i64,
    pub score: i64,
    pub is_game_completed: bool,
    /// 방금 채점한 라운드가 보스 라운드였는지
    pub is_boss_level: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<NextQuestion>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(answer: i64) -> Question {
        Question {
            prompt: format!("{} + 0", answer),
            operation: Operation::Add,
            correct_answer: answer,
            options: vec![answer, answer + 1, answer + 2],
        }
    }

    fn new_session() -> GameSession {
        GameSession::new(
            "s1".to_string(),
            "p1".to_string(),
            question(3),
            "2026-01-01T00:00:00.000Z".to_string(),
        )
    }

    #[test]
    fn new_session_starts_at_round_one() {
        let session = new_session();
        assert_eq!(session.current_round, 1);
        assert_eq!(session.score, 0);
        assert_eq!(session.rounds.len(), 1);
        assert!(!session.is_completed);
        assert!(!session.current_round_record().unwrap().is_answered());
    }

    #[test]
    fn answering_updates_record_and_score() {
        let mut session = new_session();
        assert_eq!(session.answer_current_round(3, 1.5), Some(true));
        assert_eq!(session.score, 1);

        let record = session.current_round_record().unwrap();
        assert_eq!(record.player_answer, Some(3));
        assert_eq!(record.is_correct, Some(true));
        assert_eq!(record.time_taken, Some(1.5));
    }

    #[test]
    fn round_cannot_be_answered_twice() {
        let mut session = new_session();
        assert_eq!(session.answer_current_round(4, 0.0), Some(false));
        assert_eq!(session.answer_current_round(3, 0.0), None);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn advance_keeps_length_equal_to_round() {
        let mut session = new_session();
        for round in 2..=TOTAL_ROUNDS {
            session.answer_current_round(0, 0.0);
            session.advance(question(round));
            assert_eq!(session.current_round, round);
            assert_eq!(session.rounds.len() as i64, round);
        }
        assert!(session.is_final_round());
        assert!(session.is_boss_level());
    }

    #[test]
    fn completed_session_rejects_answers() {
        let mut session = new_session();
        session.complete("2026-01-01T00:10:00.000Z".to_string());
        assert_eq!(session.answer_current_round(3, 0.0), None);
        assert_eq!(session.score, 0);
    }

    #[test]
    fn score_matches_correct_rounds() {
        let mut session = new_session();
        session.answer_current_round(3, 0.0);
        session.advance(question(5));
        session.answer_current_round(1, 0.0);
        session.advance(question(7));
        session.answer_current_round(7, 0.0);
        assert_eq!(session.score, 2);
        assert_eq!(session.correct_rounds(), session.score);
    }

    #[test]
    fn answer_response_omits_missing_next() {
        let response = AnswerResponse {
            is_correct: true,
            correct_answer: 4,
            current_round: 10,
            score: 10,
            is_game_completed: true,
            is_boss_level: true,
            next: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("next").is_none());
    }
}
