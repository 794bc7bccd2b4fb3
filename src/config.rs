//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수에서 서버 설정값을 읽어오는 모듈입니다.
//! `.env` 파일이나 시스템 환경변수에서 값을 가져옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 데이터베이스 경로 — 없으면 메모리 저장소로 실행
//! - `HOST`: 서버 바인딩 주소
//! - `PORT`: 서버 포트 번호
//! - `FRONTEND_DIST`: 빌드된 프론트엔드 정적 파일 디렉토리
//! - `CORS_ORIGINS`: 허용할 출처 목록 (쉼표 구분, `*`이면 모두 허용)

use std::env;

/// 애플리케이션 전체 설정을 담는 구조체
///
/// 서버 시작 시 환경변수에서 한 번 읽어온 후,
/// 애플리케이션 전체에서 공유됩니다.
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite 데이터베이스 URL (예: "sqlite:data/mathgame.db?mode=rwc")
    /// None이면 재시작 시 사라지는 메모리 저장소를 사용합니다.
    pub database_url: Option<String>,
    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub host: String,
    /// 서버 포트 번호 (기본값: 8001)
    pub port: u16,
    /// 프론트엔드 빌드 디렉토리 (기본값: "../frontend/dist")
    pub frontend_dist: String,
    /// CORS 허용 출처. 비어 있으면 모든 출처 허용
    pub cors_origins: Vec<String>,
}

/// 포트 환경변수가 없거나 숫자가 아닐 때 사용하는 기본 포트
const DEFAULT_PORT: u16 = 8001;

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            host: "0.0.0.0".to_string(),
            port: DEFAULT_PORT,
            frontend_dist: "../frontend/dist".to_string(),
            cors_origins: Vec::new(),
        }
    }
}

impl Config {
    /// 환경변수에서 설정값을 읽어 Config 인스턴스를 생성합니다.
    ///
    /// 모든 항목에 기본값이 있으므로 실패하지 않습니다.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            // .ok(): Result를 Option으로 — 변수가 없으면 None
            // .filter(): 빈 문자열도 "설정 안 됨"으로 취급
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .ok()
                .and_then(|port| port.parse().ok())
                .unwrap_or(defaults.port),
            frontend_dist: env::var("FRONTEND_DIST").unwrap_or(defaults.frontend_dist),
            cors_origins: env::var("CORS_ORIGINS")
                .map(|raw| parse_origins(&raw))
                .unwrap_or_default(),
        }
    }
}

/// "https://a.com, https://b.com" → ["https://a.com", "https://b.com"]
///
/// `*`가 들어 있으면 모든 출처 허용을 뜻하는 빈 목록을 돌려줍니다.
fn parse_origins(raw: &str) -> Vec<String> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect();

    if origins.iter().any(|origin| origin == "*") {
        Vec::new()
    } else {
        origins
    }
}
