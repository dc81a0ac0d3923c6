//! 영속 환경설정 포트.
//!
//! 구현: `yttv-storage` crate (JSON 파일, 인메모리)

use std::collections::BTreeMap;

use crate::error::CoreError;

/// 키-값 환경설정 묶음
pub type PreferenceMap = BTreeMap<String, serde_json::Value>;

/// 사용자별 영속 환경설정 저장소
pub trait PreferenceStore: Send + Sync {
    /// 저장된 전체 항목 읽기. 저장소가 비어 있으면 빈 맵.
    fn read(&self) -> Result<PreferenceMap, CoreError>;

    /// 항목 묶음을 한 번에 기록
    ///
    /// 구현체는 일부만 기록된 상태가 관찰되지 않도록 보장해야 한다.
    /// 전달되지 않은 기존 키는 유지된다.
    fn write(&self, entries: &PreferenceMap) -> Result<(), CoreError>;
}
