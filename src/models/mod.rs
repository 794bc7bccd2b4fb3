//! # 데이터 모델 모듈
//!
//! 게임 서버에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `question`: 연산 종류와 생성된 문제
//! - `session`: 게임 세션, 라운드 기록, 게임 요청/응답
//! - `player`: 플레이어 누적 통계와 통계/조회 응답
//!
//! `pub use X::*;`로 재공개하므로 `crate::models::GameSession`처럼 짧게 접근할 수 있습니다.

pub mod player;
pub mod question;
pub mod session;

pub use player::*;
pub use question::*;
pub use session::*;
