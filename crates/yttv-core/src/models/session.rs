//! 브라우징 세션 리셋 모델.
//!
//! 세션 삭제 결과와 리셋 사이클 상태를 표현.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 세션 데이터 삭제 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClearOutcome {
    /// 삭제된 레코드 수
    pub removed: usize,
    /// 삭제하지 못한 레코드 이름
    pub failed: Vec<String>,
    /// 삭제 완료 시각
    pub completed_at: DateTime<Utc>,
}

impl ClearOutcome {
    /// 실패 없는 결과
    pub fn complete(removed: usize) -> Self {
        Self {
            removed,
            failed: Vec::new(),
            completed_at: Utc::now(),
        }
    }

    /// 저장소 자체가 삭제를 수행하지 못한 결과
    pub fn failure(reason: impl Into<String>) -> Self {
        Self {
            removed: 0,
            failed: vec![reason.into()],
            completed_at: Utc::now(),
        }
    }

    /// 모든 레코드를 지웠는지 여부
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 리셋 사이클 단계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResetPhase {
    /// 대기
    #[default]
    Idle,
    /// 세션 데이터 삭제 중
    Clearing,
    /// 대상 페이지 재로드 중
    Reloading,
    /// 프로세스 종료 중
    Terminating,
}

/// 리셋 요청 처리 결과
#[derive(Debug, Clone, PartialEq)]
pub enum ResetOutcome {
    /// 리셋 대기 플래그가 없어 아무것도 하지 않음
    Skipped,
    /// 삭제 후 재로드
    Reloaded(ClearOutcome),
    /// 삭제 후 종료 요청
    Terminated(ClearOutcome),
    /// 이미 종료 사이클이 진행 중이라 무시
    Dropped,
}

impl ResetOutcome {
    /// 이번 요청에서 세션 삭제가 실행됐는지 여부
    pub fn cleared(&self) -> bool {
        matches!(self, ResetOutcome::Reloaded(_) | ResetOutcome::Terminated(_))
    }
}
