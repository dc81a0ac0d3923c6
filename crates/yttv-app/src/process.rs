//! 프로세스 종료 어댑터.
//!
//! `ProcessControl` 포트 구현. 설정에 따라 새 프로세스를 띄운 뒤 종료한다.

use std::process::Command;
use std::sync::Arc;
use tracing::{error, info};
use yttv_core::ports::process_control::ProcessControl;

use crate::lifecycle::{LifecycleManager, ShutdownReason};

/// 캐시 비우기 후 프로세스 종료
pub struct ProcessExit {
    lifecycle: Arc<LifecycleManager>,
    relaunch: bool,
}

impl ProcessExit {
    /// 새 종료 어댑터
    pub fn new(lifecycle: Arc<LifecycleManager>, relaunch: bool) -> Self {
        Self {
            lifecycle,
            relaunch,
        }
    }

    /// 현재 실행 파일을 같은 인자로 다시 실행하는 명령
    pub fn relaunch_command() -> std::io::Result<Command> {
        let exe = std::env::current_exe()?;
        let mut command = Command::new(exe);
        command.args(std::env::args_os().skip(1));
        Ok(command)
    }

    fn spawn_replacement(&self) {
        match Self::relaunch_command().and_then(|mut command| command.spawn()) {
            Ok(child) => info!(pid = child.id(), "새 프로세스 실행"),
            Err(e) => error!("재실행 실패: {e}"),
        }
    }
}

impl ProcessControl for ProcessExit {
    fn terminate(&self) {
        self.lifecycle.shutdown(ShutdownReason::EmptyCache);
        if self.relaunch {
            self.spawn_replacement();
        }
        std::process::exit(0);
    }
}
