//! 세션 리셋 컨트롤러.
//!
//! 리셋 사이클: `Idle → Clearing → Reloading | Terminating → Idle`.
//! 삭제가 끝난 뒤에만 재로드/종료 단계가 시작되며,
//! 사이클 뮤텍스로 삭제 작업이 동시에 둘 이상 실행되지 않는다.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tracing::{debug, info, warn};
use yttv_core::config_store::ConfigurationStore;
use yttv_core::error::CoreError;
use yttv_core::models::session::{ClearOutcome, ResetOutcome, ResetPhase};
use yttv_core::ports::process_control::ProcessControl;
use yttv_core::ports::render_surface::RenderSurface;
use yttv_core::ports::session_storage::SessionStorage;

/// 세션 리셋 컨트롤러
pub struct SessionResetController {
    store: Arc<ConfigurationStore>,
    storage: Arc<dyn SessionStorage>,
    surface: Arc<dyn RenderSurface>,
    process: Arc<dyn ProcessControl>,
    target_url: String,
    /// 한 번에 하나의 사이클
    cycle: Mutex<()>,
    /// 종료 사이클 시작 여부 (이후 요청은 무시)
    terminating: AtomicBool,
    phase_tx: watch::Sender<ResetPhase>,
}

impl SessionResetController {
    /// 새 컨트롤러 생성
    pub fn new(
        store: Arc<ConfigurationStore>,
        storage: Arc<dyn SessionStorage>,
        surface: Arc<dyn RenderSurface>,
        process: Arc<dyn ProcessControl>,
        target_url: impl Into<String>,
    ) -> Self {
        let (phase_tx, _) = watch::channel(ResetPhase::Idle);
        Self {
            store,
            storage,
            surface,
            process,
            target_url: target_url.into(),
            cycle: Mutex::new(()),
            terminating: AtomicBool::new(false),
            phase_tx,
        }
    }

    /// 설정 저장소 핸들
    pub fn store(&self) -> &Arc<ConfigurationStore> {
        &self.store
    }

    /// 렌더링 화면이 로드하는 URL
    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    /// 현재 사이클 단계
    pub fn phase(&self) -> ResetPhase {
        *self.phase_tx.borrow()
    }

    /// 사이클 단계 구독
    pub fn subscribe(&self) -> watch::Receiver<ResetPhase> {
        self.phase_tx.subscribe()
    }

    /// 시작 훅
    ///
    /// 이전 세션에서 남은 리셋을 먼저 처리하고, 재로드가 없었다면
    /// 현재 User-Agent로 대상 페이지를 처음 로드한다.
    pub async fn launch(&self) -> Result<ResetOutcome, CoreError> {
        let outcome = self.reset_if_pending().await?;
        if outcome == ResetOutcome::Skipped {
            let agent = self.store.current().active_user_agent;
            info!(url = %self.target_url, "대상 페이지 초기 로드");
            self.surface.load(&self.target_url, &agent).await?;
        }
        Ok(outcome)
    }

    /// 리셋 대기 플래그가 있으면 삭제 → 플래그 해제 → 재로드
    ///
    /// 플래그가 없으면 아무것도 하지 않는다. 진행 중인 사이클이 있으면
    /// 끝날 때까지 기다린 뒤 플래그를 다시 확인하므로 연속 요청은 한 번만 삭제한다.
    pub async fn reset_if_pending(&self) -> Result<ResetOutcome, CoreError> {
        if self.terminating.load(Ordering::SeqCst) {
            debug!("종료 사이클 진행 중, 리셋 요청 무시");
            return Ok(ResetOutcome::Dropped);
        }

        let _cycle = self.cycle.lock().await;

        if self.terminating.load(Ordering::SeqCst) {
            debug!("종료 사이클 진행 중, 리셋 요청 무시");
            return Ok(ResetOutcome::Dropped);
        }
        if !self.store.pending_reset() {
            debug!("리셋 대기 없음");
            return Ok(ResetOutcome::Skipped);
        }

        let cleared = self.clear().await;
        self.store.consume_reset();

        self.set_phase(ResetPhase::Reloading);
        let agent = self.store.current().active_user_agent;
        info!(url = %self.target_url, user_agent = %agent, "새 세션으로 재로드");
        let loaded = self.surface.load(&self.target_url, &agent).await;
        self.set_phase(ResetPhase::Idle);

        loaded?;
        Ok(ResetOutcome::Reloaded(cleared))
    }

    /// 무조건 삭제한 뒤 프로세스 종료
    ///
    /// 이미 종료 사이클이 시작됐다면 `Dropped`.
    pub async fn force_reset_and_terminate(&self) -> ResetOutcome {
        if self.terminating.swap(true, Ordering::SeqCst) {
            debug!("종료 사이클 중복 요청 무시");
            return ResetOutcome::Dropped;
        }

        let _cycle = self.cycle.lock().await;

        let cleared = self.clear().await;
        self.store.consume_reset();

        self.set_phase(ResetPhase::Terminating);
        info!("캐시 비우기 완료, 프로세스 종료");
        self.process.terminate();
        ResetOutcome::Terminated(cleared)
    }

    /// 세션 데이터 삭제. 실패는 기록만 하고 사이클은 계속된다.
    async fn clear(&self) -> ClearOutcome {
        self.set_phase(ResetPhase::Clearing);

        match self.storage.clear_all().await {
            Ok(outcome) => {
                if !outcome.is_complete() {
                    let partial = CoreError::StorageClearPartial {
                        removed: outcome.removed,
                        failed: outcome.failed.clone(),
                    };
                    warn!("{partial}");
                }
                outcome
            }
            Err(e) => {
                warn!("세션 데이터 삭제 실패, 계속 진행: {e}");
                ClearOutcome::failure(e.to_string())
            }
        }
    }

    fn set_phase(&self, phase: ResetPhase) {
        debug!(?phase, "리셋 단계");
        self.phase_tx.send_replace(phase);
    }
}
