//! User-Agent 프로필 모델.
//!
//! 프로필 ID는 영속 저장소 호환을 위해 정수(`0`, `1`, `-1`)로 직렬화된다.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CoreError;

/// 기본 프로필 A (Xbox)
pub const XBOX_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64; Xbox; Xbox One) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/89.0.4389.114 Safari/537.36 Edge/44.19041.4788";

/// 기본 프로필 B (Apple TV)
pub const APPLE_TV_USER_AGENT: &str =
    "AppleCoreMedia/1.0.0.21K69 (Apple TV; U; CPU OS 17_1 like Mac OS X; zh_tw)";

/// 선택 가능한 User-Agent 프로필 식별자
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ProfileId {
    /// `0`: Xbox 기본 프로필
    #[default]
    Xbox,
    /// `1`: Apple TV 기본 프로필
    AppleTv,
    /// `-1`: 사용자 입력 문자열
    Custom,
}

impl ProfileId {
    /// 선택기에 표시되는 순서
    pub const ALL: [ProfileId; 3] = [ProfileId::Xbox, ProfileId::AppleTv, ProfileId::Custom];

    /// 영속 저장소에 기록되는 정수값
    pub fn raw(self) -> i64 {
        match self {
            ProfileId::Xbox => 0,
            ProfileId::AppleTv => 1,
            ProfileId::Custom => -1,
        }
    }

    /// 고정 User-Agent 문자열. 커스텀 프로필은 `None`.
    pub fn default_user_agent(self) -> Option<&'static str> {
        match self {
            ProfileId::Xbox => Some(XBOX_USER_AGENT),
            ProfileId::AppleTv => Some(APPLE_TV_USER_AGENT),
            ProfileId::Custom => None,
        }
    }

    /// 설정 화면 라벨
    pub fn label(self) -> &'static str {
        match self {
            ProfileId::Xbox => "Xbox",
            ProfileId::AppleTv => "AppleTV",
            ProfileId::Custom => "Custom",
        }
    }
}

impl TryFrom<i64> for ProfileId {
    type Error = CoreError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(ProfileId::Xbox),
            1 => Ok(ProfileId::AppleTv),
            -1 => Ok(ProfileId::Custom),
            other => Err(CoreError::UnknownProfile(other)),
        }
    }
}

impl From<ProfileId> for i64 {
    fn from(id: ProfileId) -> Self {
        id.raw()
    }
}

impl fmt::Display for ProfileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.raw())
    }
}

/// User-Agent 프로필 (ID + 실제 헤더 문자열)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAgentProfile {
    /// 프로필 식별자
    pub id: ProfileId,
    /// User-Agent 헤더 값
    pub value: String,
}

impl UserAgentProfile {
    /// 고정 프로필 목록 (Xbox, Apple TV)
    pub fn builtin() -> Vec<UserAgentProfile> {
        ProfileId::ALL
            .iter()
            .filter_map(|id| {
                id.default_user_agent().map(|value| UserAgentProfile {
                    id: *id,
                    value: value.to_string(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn raw_ids_are_reserved_values() {
        assert_eq!(ProfileId::Xbox.raw(), 0);
        assert_eq!(ProfileId::AppleTv.raw(), 1);
        assert_eq!(ProfileId::Custom.raw(), -1);
    }

    #[test]
    fn unknown_raw_id_rejected() {
        assert_matches!(ProfileId::try_from(2), Err(CoreError::UnknownProfile(2)));
        assert_matches!(ProfileId::try_from(-7), Err(CoreError::UnknownProfile(-7)));
    }

    #[test]
    fn serializes_as_integer() {
        assert_eq!(serde_json::to_string(&ProfileId::Custom).unwrap(), "-1");
        let id: ProfileId = serde_json::from_str("1").unwrap();
        assert_eq!(id, ProfileId::AppleTv);
        assert!(serde_json::from_str::<ProfileId>("5").is_err());
    }

    #[test]
    fn builtin_profiles_carry_exact_strings() {
        let profiles = UserAgentProfile::builtin();
        assert_eq!(profiles.len(), 2);
        assert_eq!(profiles[0].id, ProfileId::Xbox);
        assert!(profiles[0].value.contains("Xbox One"));
        assert_eq!(profiles[1].value, APPLE_TV_USER_AGENT);
        assert_eq!(ProfileId::Custom.default_user_agent(), None);
    }
}
