//! 프로세스 전역 User-Agent 설정 상태.
//!
//! 영속 저장소에는 원본 앱과 동일한 키 이름으로 기록된다.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::models::user_agent::{ProfileId, UserAgentProfile, XBOX_USER_AGENT};
use crate::ports::preferences::PreferenceMap;

/// 선택된 프로필 ID 키
pub const KEY_SELECTED_PROFILE: &str = "Selected User Agent ID";

/// 적용 중인 User-Agent 문자열 키
pub const KEY_USER_AGENT: &str = "User Agent";

/// 리셋 대기 플래그 키
pub const KEY_PENDING_RESET: &str = "ResetOnLaunch";

/// User-Agent 설정 상태
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// 선택된 프로필
    pub selected_profile_id: ProfileId,
    /// 렌더링 화면에 적용되는 User-Agent
    pub active_user_agent: String,
    /// 다음 콘텐츠 로드 전에 브라우징 데이터를 지워야 하는지 여부
    pub pending_reset: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            selected_profile_id: ProfileId::Xbox,
            active_user_agent: XBOX_USER_AGENT.to_string(),
            pending_reset: false,
        }
    }
}

impl Configuration {
    /// 현재 선택된 프로필
    pub fn selected_profile(&self) -> UserAgentProfile {
        UserAgentProfile {
            id: self.selected_profile_id,
            value: self.active_user_agent.clone(),
        }
    }

    /// 영속 키-값으로 변환
    pub fn to_entries(&self) -> PreferenceMap {
        let mut entries = PreferenceMap::new();
        entries.insert(
            KEY_SELECTED_PROFILE.to_string(),
            Value::from(self.selected_profile_id.raw()),
        );
        entries.insert(
            KEY_USER_AGENT.to_string(),
            Value::from(self.active_user_agent.clone()),
        );
        entries.insert(
            KEY_PENDING_RESET.to_string(),
            Value::from(self.pending_reset),
        );
        entries
    }

    /// 영속 키-값에서 복원
    ///
    /// 없는 키나 타입이 맞지 않는 값은 기본값을 사용한다.
    /// 고정 프로필(0, 1)의 User-Agent는 매번 ID에서 다시 계산하고,
    /// 커스텀 프로필만 저장된 문자열을 그대로 신뢰한다.
    pub fn from_entries(entries: &PreferenceMap) -> Self {
        let defaults = Self::default();

        let selected_profile_id = match entries.get(KEY_SELECTED_PROFILE) {
            None => defaults.selected_profile_id,
            Some(value) => match value.as_i64().map(ProfileId::try_from) {
                Some(Ok(id)) => id,
                Some(Err(e)) => {
                    warn!("저장된 프로필 ID 무시: {e}");
                    defaults.selected_profile_id
                }
                None => {
                    warn!("저장된 프로필 ID 타입 오류: {value}");
                    defaults.selected_profile_id
                }
            },
        };

        let stored_agent = match entries.get(KEY_USER_AGENT) {
            None => None,
            Some(Value::String(agent)) if !agent.trim().is_empty() => Some(agent.clone()),
            Some(other) => {
                warn!("저장된 User-Agent 무시: {other}");
                None
            }
        };

        let active_user_agent = match selected_profile_id.default_user_agent() {
            Some(fixed) => fixed.to_string(),
            None => stored_agent.unwrap_or(defaults.active_user_agent),
        };

        let pending_reset = match entries.get(KEY_PENDING_RESET) {
            None => defaults.pending_reset,
            Some(Value::Bool(flag)) => *flag,
            Some(other) => {
                warn!("저장된 리셋 플래그 타입 오류: {other}");
                defaults.pending_reset
            }
        };

        Self {
            selected_profile_id,
            active_user_agent,
            pending_reset,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user_agent::APPLE_TV_USER_AGENT;

    #[test]
    fn empty_entries_yield_defaults() {
        let config = Configuration::from_entries(&PreferenceMap::new());
        assert_eq!(config, Configuration::default());
    }

    #[test]
    fn entries_use_original_key_names() {
        let entries = Configuration::default().to_entries();
        assert_eq!(entries[KEY_SELECTED_PROFILE], Value::from(0));
        assert_eq!(entries[KEY_USER_AGENT], Value::from(XBOX_USER_AGENT));
        assert_eq!(entries[KEY_PENDING_RESET], Value::from(false));
    }

    #[test]
    fn fixed_profile_agent_rederived_on_load() {
        let mut entries = PreferenceMap::new();
        entries.insert(KEY_SELECTED_PROFILE.to_string(), Value::from(1));
        entries.insert(KEY_USER_AGENT.to_string(), Value::from("Stale/1.0"));

        let config = Configuration::from_entries(&entries);
        assert_eq!(config.selected_profile_id, ProfileId::AppleTv);
        assert_eq!(config.active_user_agent, APPLE_TV_USER_AGENT);
    }

    #[test]
    fn custom_profile_trusts_stored_agent() {
        let mut entries = PreferenceMap::new();
        entries.insert(KEY_SELECTED_PROFILE.to_string(), Value::from(-1));
        entries.insert(KEY_USER_AGENT.to_string(), Value::from("MyAgent/1.0"));
        entries.insert(KEY_PENDING_RESET.to_string(), Value::from(true));

        let config = Configuration::from_entries(&entries);
        assert_eq!(config.selected_profile_id, ProfileId::Custom);
        assert_eq!(config.active_user_agent, "MyAgent/1.0");
        assert!(config.pending_reset);
    }

    #[test]
    fn malformed_values_fall_back_per_key() {
        let mut entries = PreferenceMap::new();
        entries.insert(KEY_SELECTED_PROFILE.to_string(), Value::from(42));
        entries.insert(KEY_PENDING_RESET.to_string(), Value::from("yes"));

        let config = Configuration::from_entries(&entries);
        assert_eq!(config, Configuration::default());
    }
}
