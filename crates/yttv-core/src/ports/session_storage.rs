//! 브라우징 세션 저장소 포트.
//!
//! 구현: `yttv-storage` crate (`WebDataStore`)

use async_trait::async_trait;

use crate::error::CoreError;
use crate::models::session::ClearOutcome;

/// 쿠키, 사이트 저장소, 캐시를 보관하는 세션 저장소
#[async_trait]
pub trait SessionStorage: Send + Sync {
    /// 모든 레코드 삭제 (best-effort)
    ///
    /// 일부 레코드 삭제 실패는 에러가 아니라 `ClearOutcome::failed`로 보고한다.
    async fn clear_all(&self) -> Result<ClearOutcome, CoreError>;
}
