//! # 메모리 저장소
//!
//! 프로세스 메모리의 `HashMap`에 플레이어와 세션을 보관합니다.
//! 서버를 재시작하면 내용이 사라지므로, `DATABASE_URL` 없이 띄운 개발 서버나
//! 테스트에서 사용합니다.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::GameStore;
use crate::error::AppError;
use crate::models::{GameSession, Player};

/// `RwLock`으로 보호되는 메모리 맵 저장소
///
/// 읽기는 여러 요청이 동시에, 쓰기는 한 번에 하나씩 수행됩니다.
/// 저장/조회 시 값을 복제(clone)하므로 호출자가 들고 있는 값과 저장된 값은 서로 독립적입니다.
#[derive(Default)]
pub struct MemoryStore {
    players: RwLock<HashMap<String, Player>>,
    sessions: RwLock<HashMap<String, GameSession>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GameStore for MemoryStore {
    async fn get_player_by_name(&self, name: &str) -> Result<Option<Player>, AppError> {
        let players = self.players.read().await;
        Ok(players.values().find(|p| p.name == name).cloned())
    }

    async fn get_player_by_id(&self, id: &str) -> Result<Option<Player>, AppError> {
        Ok(self.players.read().await.get(id).cloned())
    }

    async fn put_player(&self, player: &Player) -> Result<(), AppError> {
        self.players
            .write()
            .await
            .insert(player.id.clone(), player.clone());
        Ok(())
    }

    async fn get_session(&self, id: &str) -> Result<Option<GameSession>, AppError> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn put_session(&self, session: &GameSession) -> Result<(), AppError> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn complete_game(&self, session: &GameSession, player: &Player) -> Result<(), AppError> {
        // 두 쓰기 락을 모두 잡은 뒤에 기록해야 다른 요청이 절반만 반영된 상태를 보지 못합니다
        let mut players = self.players.write().await;
        let mut sessions = self.sessions.write().await;
        players.insert(player.id.clone(), player.clone());
        sessions.insert(session.id.clone(), session.clone());
        Ok(())
    }
}
