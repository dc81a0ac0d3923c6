//! 라이프사이클 관리.
//!
//! 종료 신호 전파, OS 시그널 대기.

use tokio::sync::watch;
use tracing::info;

/// 종료 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// OS 시그널 (SIGINT, SIGTERM, Ctrl+C)
    Signal,
    /// 사용자 `quit` 명령
    UserQuit,
    /// 캐시 비우기 후 종료
    EmptyCache,
}

/// 라이프사이클 관리자
pub struct LifecycleManager {
    shutdown_tx: watch::Sender<Option<ShutdownReason>>,
}

impl LifecycleManager {
    /// 새 라이프사이클 관리자 생성
    pub fn new() -> Self {
        let (tx, _) = watch::channel(None);
        Self { shutdown_tx: tx }
    }

    /// 종료 수신기
    pub fn subscribe(&self) -> watch::Receiver<Option<ShutdownReason>> {
        self.shutdown_tx.subscribe()
    }

    /// 종료 신호 발송. 처음 사유만 유지한다.
    pub fn shutdown(&self, reason: ShutdownReason) {
        let first = self.shutdown_tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        });
        if first {
            info!(?reason, "종료 신호 발송");
        }
    }

    /// 종료 사유 (아직 없으면 `None`)
    pub fn reason(&self) -> Option<ShutdownReason> {
        *self.shutdown_tx.borrow()
    }

    /// OS 시그널 대기 후 종료 신호 발송
    pub async fn wait_for_signal(&self) -> std::io::Result<()> {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigint = signal(SignalKind::interrupt())?;
            let mut sigterm = signal(SignalKind::terminate())?;

            tokio::select! {
                _ = sigint.recv() => {
                    info!("SIGINT 수신");
                }
                _ = sigterm.recv() => {
                    info!("SIGTERM 수신");
                }
            }
        }

        #[cfg(not(unix))]
        {
            tokio::signal::ctrl_c().await?;
            info!("Ctrl+C 수신");
        }

        self.shutdown(ShutdownReason::Signal);
        Ok(())
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_running() {
        let lm = LifecycleManager::new();
        let rx = lm.subscribe();
        assert!(rx.borrow().is_none());
        assert_eq!(lm.reason(), None);
    }

    #[test]
    fn first_reason_wins() {
        let lm = LifecycleManager::new();
        let rx = lm.subscribe();

        lm.shutdown(ShutdownReason::EmptyCache);
        lm.shutdown(ShutdownReason::Signal);

        assert_eq!(*rx.borrow(), Some(ShutdownReason::EmptyCache));
        assert_eq!(lm.reason(), Some(ShutdownReason::EmptyCache));
    }

    #[tokio::test]
    async fn subscribers_wake_on_shutdown() {
        let lm = LifecycleManager::new();
        let mut rx = lm.subscribe();

        lm.shutdown(ShutdownReason::UserQuit);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(ShutdownReason::UserQuit));
    }

    #[tokio::test]
    async fn wait_for_resolves_on_reason_sent_before_waiting() {
        let lm = LifecycleManager::new();
        let mut rx = lm.subscribe();

        lm.shutdown(ShutdownReason::EmptyCache);
        let reason = *rx.wait_for(|reason| reason.is_some()).await.unwrap();
        assert_eq!(reason, Some(ShutdownReason::EmptyCache));
    }

    #[tokio::test]
    async fn wait_for_errors_once_manager_is_gone() {
        let lm = LifecycleManager::new();
        let mut rx = lm.subscribe();

        drop(lm);
        assert!(rx.wait_for(|reason| reason.is_some()).await.is_err());
    }
}
