//! User-Agent 설정 저장소.
//!
//! 선택된 프로필, 적용 중인 User-Agent, 리셋 대기 플래그를
//! `PreferenceStore` 포트를 통해 로드/저장한다.
//! 모든 변경은 하나의 뮤텍스 아래에서 계산과 저장을 함께 수행한다 (단일 작성자).

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::error::CoreError;
use crate::models::configuration::Configuration;
use crate::models::user_agent::ProfileId;
use crate::ports::preferences::PreferenceStore;

/// 설정 저장소
///
/// 프로세스 수명 동안 하나만 만들어 `Arc`로 공유한다.
pub struct ConfigurationStore {
    /// 영속 백엔드
    backend: Arc<dyn PreferenceStore>,
    /// 현재 설정 (직렬화된 변경)
    state: Mutex<Configuration>,
}

impl ConfigurationStore {
    /// 백엔드에서 설정을 읽어 저장소 생성
    ///
    /// 읽기에 실패하면 기본값으로 시작한다.
    pub fn open(backend: Arc<dyn PreferenceStore>) -> Self {
        let config = Self::read_backend(backend.as_ref()).unwrap_or_else(|e| {
            warn!("설정 읽기 실패, 기본값 사용: {e}");
            Configuration::default()
        });
        info!(
            profile = %config.selected_profile_id,
            pending_reset = config.pending_reset,
            "User-Agent 설정 로드"
        );
        Self {
            backend,
            state: Mutex::new(config),
        }
    }

    /// 영속 값을 다시 읽어 현재 설정으로 반영. 실패하지 않는다.
    ///
    /// 읽기에 실패하면 메모리 상태를 그대로 유지한다.
    pub fn load(&self) -> Configuration {
        let mut state = self.state.lock();
        match Self::read_backend(self.backend.as_ref()) {
            Ok(config) => *state = config,
            Err(e) => warn!("설정 다시 읽기 실패, 메모리 상태 유지: {e}"),
        }
        state.clone()
    }

    /// 현재 설정 반환 (복제본)
    pub fn current(&self) -> Configuration {
        self.state.lock().clone()
    }

    /// 리셋 대기 여부
    pub fn pending_reset(&self) -> bool {
        self.state.lock().pending_reset
    }

    /// 프로필 선택
    ///
    /// 고정 프로필은 User-Agent를 다시 계산하고, 커스텀 프로필은
    /// 비어 있지 않은 `custom_value`가 있을 때만 교체한다.
    /// 항상 리셋 대기 플래그를 세운다. 리셋 자체는 호출자가 컨트롤러로 실행한다.
    pub fn set_profile(&self, id: ProfileId, custom_value: Option<&str>) -> Configuration {
        let config = self.mutate(|config| {
            match id.default_user_agent() {
                Some(fixed) => config.active_user_agent = fixed.to_string(),
                None => {
                    if let Some(custom) = custom_value.map(str::trim).filter(|v| !v.is_empty()) {
                        config.active_user_agent = custom.to_string();
                    }
                }
            }
            config.selected_profile_id = id;
            config.pending_reset = true;
        });
        info!(profile = %id, "User-Agent 프로필 변경");
        config
    }

    /// 설정 화면의 커스텀 User-Agent 입력 확정
    ///
    /// 빈 입력은 거부하며 상태와 리셋 플래그를 건드리지 않는다.
    pub fn commit_custom_user_agent(&self, value: &str) -> Result<Configuration, CoreError> {
        if value.trim().is_empty() {
            warn!("빈 커스텀 User-Agent 입력 거부");
            return Err(CoreError::CustomAgentEmpty);
        }
        Ok(self.set_profile(ProfileId::Custom, Some(value)))
    }

    /// 프로필은 그대로 두고 다음 로드 전 리셋만 요청
    pub fn request_reset(&self) -> Configuration {
        self.mutate(|config| config.pending_reset = true)
    }

    /// 리셋 대기 플래그를 읽고 해제
    ///
    /// 연속 두 번 호출하면 `true`, `false` 순서로 반환한다.
    pub fn consume_reset(&self) -> bool {
        let mut state = self.state.lock();
        if !state.pending_reset {
            return false;
        }
        let mut next = state.clone();
        next.pending_reset = false;
        self.persist(&next);
        *state = next;
        debug!("리셋 대기 플래그 해제");
        true
    }

    /// 잠금 아래에서 변경 → 저장 → 메모리 반영
    fn mutate<F>(&self, updater: F) -> Configuration
    where
        F: FnOnce(&mut Configuration),
    {
        let mut state = self.state.lock();
        let mut next = state.clone();
        updater(&mut next);
        self.persist(&next);
        *state = next.clone();
        next
    }

    /// 모든 필드를 한 번에 기록
    ///
    /// 실패해도 메모리 상태는 갱신되며 이번 세션은 비영속 상태로 계속된다.
    fn persist(&self, config: &Configuration) {
        if let Err(e) = self.backend.write(&config.to_entries()) {
            warn!("설정 저장 실패, 메모리 상태로 계속: {e}");
        }
    }

    fn read_backend(backend: &dyn PreferenceStore) -> Result<Configuration, CoreError> {
        backend
            .read()
            .map(|entries| Configuration::from_entries(&entries))
    }
}
