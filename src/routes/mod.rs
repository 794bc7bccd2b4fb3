//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러 함수들을 모아둔 모듈입니다.
//! Axum에서 핸들러는 HTTP 요청을 받아 응답을 반환하는 async 함수입니다.
//!
//! 각 하위 모듈:
//! - `games`: 게임 시작, 답안 제출, 세션 조회
//! - `players`: 플레이어 통계, 이름 조회
//! - `health`: 서버 상태 확인

pub mod games;
pub mod health;
pub mod players;

pub use games::*;
pub use health::*;
pub use players::*;
