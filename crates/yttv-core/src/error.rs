//! YT-TV 핵심 에러 타입.
//!
//! 모든 어댑터 crate는 이 타입을 그대로 반환하거나 `#[from] CoreError`로 래핑한다.
//! 어떤 에러도 사용자에게 블로킹 다이얼로그로 노출되지 않는다.

use thiserror::Error;

/// 코어 레이어 에러.
#[derive(Debug, Error)]
pub enum CoreError {
    /// 영속 설정을 읽을 수 없음 (기본값으로 복구)
    #[error("설정 읽기 실패: {0}")]
    StorageRead(String),

    /// 영속 설정 저장 실패 (이번 세션은 메모리 상태로 계속)
    #[error("설정 저장 실패: {0}")]
    StorageWrite(String),

    /// 세션 데이터 일부를 지우지 못함 (치명적이지 않음)
    #[error("세션 데이터 일부 삭제 실패: 삭제 {removed}건, 실패 {}건", .failed.len())]
    StorageClearPartial {
        /// 삭제된 레코드 수
        removed: usize,
        /// 삭제하지 못한 레코드 이름
        failed: Vec<String>,
    },

    /// 빈 커스텀 User-Agent 입력
    #[error("커스텀 User-Agent가 비어 있음")]
    CustomAgentEmpty,

    /// 예약되지 않은 프로필 ID
    #[error("알 수 없는 프로필 ID: {0}")]
    UnknownProfile(i64),

    /// 렌더링 화면 로드 실패
    #[error("화면 로드 실패: {0}")]
    Surface(String),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_clear_message_counts_failures() {
        let err = CoreError::StorageClearPartial {
            removed: 3,
            failed: vec!["Cookies".to_string(), "IndexedDB".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("삭제 3건"));
        assert!(msg.contains("실패 2건"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
