//! # 에러 처리 모듈
//!
//! 게임 서버에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//! Rust에서는 예외(exception) 대신 `Result<T, E>` 타입으로 에러를 처리합니다.
//!
//! 에러는 두 부류로 나뉩니다:
//! - **도메인 에러**: `NotFound`(없는 세션/플레이어), `InvalidState`(이미 끝난 게임에 답안 제출).
//!   클라이언트 잘못이므로 4xx로 응답하고 서버는 계속 동작합니다.
//! - **인프라 에러**: DB, 마이그레이션, 직렬화 실패 등. 5xx로 응답하고
//!   상세 내용은 로그에만 남깁니다.

use axum::{
    http::StatusCode,                     // HTTP 상태 코드 (200, 404, 500 등)
    response::{IntoResponse, Response},   // Axum의 응답 변환 트레이트
    Json,                                 // JSON 응답 래퍼
};
use serde_json::json; // json! 매크로: JSON 객체를 간편하게 생성
use thiserror::Error; // thiserror: 커스텀 에러 타입을 쉽게 만들어주는 매크로 크레이트

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    /// &'static str에는 무엇을 못 찾았는지 적습니다 (예: "Game session")
    #[error("{0} not found")]
    NotFound(&'static str),

    /// 현재 상태에서 허용되지 않는 요청 (HTTP 400)
    /// 예: 이미 완료된 게임에 답안을 제출
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// 잘못된 요청 본문 (HTTP 400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx::Error → AppError::Database 자동 변환 (`?` 연산자에서 사용)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 마이그레이션 오류 — 서버 시작 시 스키마 적용 실패
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// 저장된 JSON(보기 목록 등)을 읽거나 쓰지 못함
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Migration, Serialization, Internal)는 실제 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found", self.to_string()),
            AppError::InvalidState(ref msg) => {
                (StatusCode::BAD_REQUEST, "invalid_state", msg.clone())
            }
            AppError::BadRequest(ref msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", msg.clone())
            }
            AppError::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
            AppError::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Migration(ref e) => {
                tracing::error!("Migration error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "database_error",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Serialization(ref e) => {
                tracing::error!("Serialization error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        // 결과: { "error": { "code": "not_found", "message": "Game session not found" } }
        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_client_statuses() {
        let not_found = AppError::NotFound("Game session").into_response();
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let invalid = AppError::InvalidState("Game already completed".to_string()).into_response();
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn internal_errors_map_to_500() {
        let internal = AppError::Internal("boom".to_string()).into_response();
        assert_eq!(internal.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn not_found_message_names_the_resource() {
        assert_eq!(AppError::NotFound("Player").to_string(), "Player not found");
    }
}
