//! # 산수 문제 모델 정의
//!
//! 문제 생성기(`services::generator`)가 만들어내는 값 타입들입니다.
//! 한 번 생성된 `Question`은 수정되지 않습니다 (불변 값).

use serde::{Deserialize, Serialize};

/// 한 게임의 총 라운드 수
pub const TOTAL_ROUNDS: i64 = 10;

/// 보스 라운드 번호 — 마지막 라운드이며 피연산자 범위가 넓어집니다.
pub const BOSS_ROUND: i64 = TOTAL_ROUNDS;

/// 사칙연산 종류
///
/// JSON과 DB에는 화면에 보이는 기호(`+`, `-`, `×`, `÷`) 그대로 저장됩니다.
/// `#[serde(rename = "...")]`: 직렬화 시 variant 이름 대신 지정한 문자열을 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operation {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "×")]
    Multiply,
    #[serde(rename = "÷")]
    Divide,
}

impl Operation {
    /// 균등 추첨 대상이 되는 모든 연산 (순서 고정)
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// 문제 문자열에 들어가는 연산 기호
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "×",
            Operation::Divide => "÷",
        }
    }

    /// 기호 문자열을 `Operation`으로 되돌립니다. DB에서 읽을 때 사용합니다.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

/// 생성된 산수 문제 한 개
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// 화면에 표시되는 문제 (예: "7 × 8")
    pub prompt: String,
    /// 사용된 연산
    pub operation: Operation,
    /// 정답
    pub correct_answer: i64,
    /// 보기 3개 (정답 포함, 서로 다른 양의 정수). 이 순서가 곧 화면 표시 순서입니다.
    pub options: Vec<i64>,
}

/// 해당 라운드가 보스 라운드인지 여부
pub fn is_boss_round(round_number: i64) -> bool {
    round_number == BOSS_ROUND
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbol_lookup_is_reversible() {
        for op in Operation::ALL {
            assert_eq!(Operation::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operation::from_symbol("*"), None);
    }

    #[test]
    fn operation_serializes_as_symbol() {
        let json = serde_json::to_string(&Operation::Divide).unwrap();
        assert_eq!(json, "\"÷\"");
    }

    #[test]
    fn only_round_ten_is_boss() {
        assert!(is_boss_round(10));
        assert!(!is_boss_round(9));
        assert!(!is_boss_round(1));
    }
}
