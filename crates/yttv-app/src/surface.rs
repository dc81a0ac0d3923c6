//! 헤드리스 렌더링 화면 어댑터.
//!
//! `RenderSurface` 포트 구현. 플랫폼 웹뷰 대신 로드 요청을 기록하고 로그로 남긴다.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use tracing::info;
use yttv_core::error::CoreError;
use yttv_core::ports::render_surface::RenderSurface;

/// 로드 요청 한 건
#[derive(Debug, Clone, PartialEq)]
pub struct Navigation {
    /// 로드한 URL
    pub url: String,
    /// 적용한 User-Agent
    pub user_agent: String,
    /// 요청 시각
    pub loaded_at: DateTime<Utc>,
}

/// 헤드리스 화면
#[derive(Default)]
pub struct HeadlessSurface {
    history: Mutex<Vec<Navigation>>,
}

impl HeadlessSurface {
    /// 새 화면
    pub fn new() -> Self {
        Self::default()
    }

    /// 마지막 로드 요청
    pub fn last(&self) -> Option<Navigation> {
        self.history.lock().last().cloned()
    }

    /// 누적 로드 횟수
    pub fn load_count(&self) -> usize {
        self.history.lock().len()
    }
}

#[async_trait]
impl RenderSurface for HeadlessSurface {
    async fn load(&self, url: &str, user_agent: &str) -> Result<(), CoreError> {
        if url.is_empty() {
            return Err(CoreError::Surface("빈 URL".to_string()));
        }

        info!(url, user_agent, "페이지 로드");
        self.history.lock().push(Navigation {
            url: url.to_string(),
            user_agent: user_agent.to_string(),
            loaded_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_navigations_in_order() {
        let surface = HeadlessSurface::new();
        assert!(surface.last().is_none());

        surface.load("https://youtube.com/tv", "A/1").await.unwrap();
        surface.load("https://youtube.com/tv", "B/2").await.unwrap();

        assert_eq!(surface.load_count(), 2);
        assert_eq!(surface.last().unwrap().user_agent, "B/2");
    }

    #[tokio::test]
    async fn empty_url_rejected() {
        let surface = HeadlessSurface::new();
        assert!(matches!(
            surface.load("", "A/1").await,
            Err(CoreError::Surface(_))
        ));
        assert_eq!(surface.load_count(), 0);
    }
}
