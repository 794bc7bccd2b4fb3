//! # 레코드 저장소 계층 (Record Store)
//!
//! 게임 엔진이 사용하는 저장소 인터페이스와 그 구현들입니다.
//! 엔진은 `GameStore` 트레이트에만 의존하므로, 실제로 무엇에 저장되는지
//! (SQLite 테이블인지, 메모리 맵인지)는 엔진의 정확성과 무관합니다.
//!
//! 각 하위 모듈:
//! - `sqlite`: sqlx + SQLite 기반 영구 저장소 (`SqliteStore`)
//! - `memory`: 프로세스 메모리 기반 저장소 (`MemoryStore`) — 테스트와 DB 없는 실행용

pub mod memory;
pub mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use async_trait::async_trait;

use crate::error::AppError;
use crate::models::{GameSession, Player};

/// 게임 엔진이 필요로 하는 최소한의 저장소 연산
///
/// `#[async_trait]`: 트레이트 안의 async fn을 `Box<dyn Future>`로 바꿔
/// `Arc<dyn GameStore>`처럼 트레이트 객체로 쓸 수 있게 합니다.
/// `Send + Sync`: 여러 요청(스레드)이 같은 저장소 핸들을 공유하기 위한 조건입니다.
#[async_trait]
pub trait GameStore: Send + Sync {
    /// 이름으로 플레이어를 찾습니다 (대소문자 구분, 정확히 일치).
    async fn get_player_by_name(&self, name: &str) -> Result<Option<Player>, AppError>;

    async fn get_player_by_id(&self, id: &str) -> Result<Option<Player>, AppError>;

    /// 플레이어를 저장합니다. 같은 ID가 있으면 덮어씁니다.
    async fn put_player(&self, player: &Player) -> Result<(), AppError>;

    async fn get_session(&self, id: &str) -> Result<Option<GameSession>, AppError>;

    /// 세션과 그 라운드 기록 전체를 저장합니다. 같은 ID가 있으면 덮어씁니다.
    async fn put_session(&self, session: &GameSession) -> Result<(), AppError>;

    /// 완료된 세션과 누적 통계가 갱신된 플레이어를 함께 저장합니다.
    ///
    /// 둘 다 기록되거나 둘 다 기록되지 않아야 합니다. 중간에 실패하면 세션은
    /// 완료 전 상태로 남으므로 같은 답을 다시 제출할 수 있습니다.
    async fn complete_game(&self, session: &GameSession, player: &Player) -> Result<(), AppError>;
}
