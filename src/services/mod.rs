//! # 게임 로직 서비스
//!
//! - `generator`: 라운드별 산수 문제 생성 (순수 함수)
//! - `game`: 세션 진행, 채점, 플레이어 통계 갱신 (`GameEngine`)

pub mod game;
pub mod generator;

pub use game::GameEngine;
