//! 애플리케이션 설정 구조체.
//!
//! 대상 URL, 저장 경로, 로그 레벨 등 런타임 설정을 정의한다.
//! JSON 파일에서 로드한 뒤 CLI 인자로 덮어쓴다.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::CoreError;

/// 최상위 애플리케이션 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 셸(웹뷰) 설정
    #[serde(default)]
    pub shell: ShellConfig,
    /// 저장 경로 설정
    #[serde(default)]
    pub storage: StorageConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

// ============================================================
// 셸 설정
// ============================================================

/// 셸 설정. 대상 페이지와 캐시 비우기 동작
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShellConfig {
    /// 렌더링 화면이 로드하는 고정 URL
    #[serde(default = "default_target_url")]
    pub target_url: String,
    /// 캐시 비우기 후 종료 대신 재실행
    #[serde(default)]
    pub relaunch_on_empty_cache: bool,
    /// 시작 시 조작 안내 출력
    #[serde(default = "default_true")]
    pub show_welcome: bool,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            target_url: default_target_url(),
            relaunch_on_empty_cache: false,
            show_welcome: true,
        }
    }
}

// ============================================================
// 저장 경로 설정
// ============================================================

/// 저장 경로 설정. `None`이면 플랫폼 기본 디렉토리를 사용한다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// User-Agent 환경설정 파일
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
    /// 웹뷰 데이터 디렉토리 (쿠키, 로컬 저장소, 캐시)
    #[serde(default)]
    pub web_data_dir: Option<PathBuf>,
}

// ============================================================
// 로깅 설정
// ============================================================

/// 로깅 설정
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// 로그 레벨 (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 기본 설정 생성
    pub fn default_config() -> Self {
        Self {
            shell: ShellConfig::default(),
            storage: StorageConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// JSON 설정 파일 로드
    pub fn from_file(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Config(format!("설정 파일 읽기 실패: {}: {}", path.display(), e))
        })?;
        let config: AppConfig = serde_json::from_str(&content).map_err(|e| {
            CoreError::Config(format!("설정 파일 파싱 실패: {}: {}", path.display(), e))
        })?;
        Ok(config)
    }

    /// 설정값 검증
    pub fn validate(&self) -> Result<(), CoreError> {
        let url = Url::parse(&self.shell.target_url).map_err(|e| {
            CoreError::Config(format!("잘못된 대상 URL: {}: {}", self.shell.target_url, e))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(CoreError::Config(format!(
                "지원하지 않는 URL 스킴: {}",
                url.scheme()
            )));
        }
        Ok(())
    }
}

// ============================================================
// 기본값 함수
// ============================================================

fn default_true() -> bool {
    true
}
fn default_target_url() -> String {
    "https://youtube.com/tv".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
