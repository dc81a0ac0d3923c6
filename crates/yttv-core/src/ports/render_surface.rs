//! 웹 렌더링 화면 포트.
//!
//! 구현: `yttv-app` crate (`HeadlessSurface`). 플랫폼 웹뷰 자체는 범위 밖.

use async_trait::async_trait;

use crate::error::CoreError;

/// 대상 페이지를 표시하는 렌더링 화면
#[async_trait]
pub trait RenderSurface: Send + Sync {
    /// 주어진 User-Agent로 URL 로드
    async fn load(&self, url: &str, user_agent: &str) -> Result<(), CoreError>;
}
