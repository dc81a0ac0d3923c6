//! 입력 라우팅.
//!
//! 선택기 변경, 커스텀 입력 확정, 캐시 비우기, 흔들기 같은 UI 트리거를
//! 텍스트 명령으로 받아 설정 저장소와 리셋 컨트롤러 호출로 변환한다.

use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use yttv_core::error::CoreError;
use yttv_core::models::user_agent::{ProfileId, UserAgentProfile};
use yttv_session::SessionResetController;

use crate::surface::HeadlessSurface;

/// 사용법
pub const HELP: &str = "\
명령:
  profile <0|1|-1> [agent]   User-Agent 프로필 선택 (0=Xbox, 1=AppleTV, -1=Custom)
  custom <agent>             커스텀 User-Agent 입력 확정
  empty-cache                캐시 비우기 후 종료
  shake                      흔들기 제스처 (캐시 비우기)
  reset                      세션 데이터 삭제 후 재로드 (종료 없음)
  status                     현재 설정 표시
  profiles                   프로필 목록
  help                       도움말
  quit                       종료";

/// 명령 파싱 에러
#[derive(Debug, Error)]
pub enum CommandError {
    /// 빈 입력
    #[error("빈 명령")]
    Empty,

    /// 알 수 없는 명령
    #[error("알 수 없는 명령: {0}")]
    Unknown(String),

    /// 인자 누락
    #[error("인자 누락: {0}")]
    MissingArgument(&'static str),

    /// 숫자가 아닌 프로필 ID
    #[error("프로필 ID는 정수여야 함: {0}")]
    InvalidNumber(String),

    /// 예약되지 않은 프로필 ID
    #[error(transparent)]
    Profile(#[from] CoreError),
}

/// UI 트리거 명령
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    /// 선택기 변경
    SelectProfile {
        /// 선택한 프로필
        id: ProfileId,
        /// 커스텀 프로필일 때 함께 입력한 문자열
        custom: Option<String>,
    },
    /// 커스텀 입력 확정
    CommitCustom(String),
    /// "Empty Cache" 메뉴
    EmptyCache,
    /// 흔들기 제스처
    Shake,
    /// 프로필 유지, 삭제 후 재로드
    Reset,
    Status,
    Profiles,
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        match verb.to_ascii_lowercase().as_str() {
            "" => Err(CommandError::Empty),
            "profile" | "select" => {
                let (raw, custom) = match rest.split_once(char::is_whitespace) {
                    Some((raw, custom)) => (raw, Some(custom.trim().to_string())),
                    None => (rest, None),
                };
                if raw.is_empty() {
                    return Err(CommandError::MissingArgument("프로필 ID"));
                }
                let raw: i64 = raw
                    .parse()
                    .map_err(|_| CommandError::InvalidNumber(raw.to_string()))?;
                Ok(ShellCommand::SelectProfile {
                    id: ProfileId::try_from(raw)?,
                    custom: custom.filter(|c| !c.is_empty()),
                })
            }
            // 빈 문자열 검증은 저장소가 담당
            "custom" => Ok(ShellCommand::CommitCustom(rest.to_string())),
            "empty-cache" | "empty" => Ok(ShellCommand::EmptyCache),
            "reset" => Ok(ShellCommand::Reset),
            "shake" => Ok(ShellCommand::Shake),
            "status" => Ok(ShellCommand::Status),
            "profiles" => Ok(ShellCommand::Profiles),
            "help" | "?" => Ok(ShellCommand::Help),
            "quit" | "exit" => Ok(ShellCommand::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// 명령 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// 사용자에게 보여줄 응답
    Reply(String),
    /// 입력 루프 종료
    Quit,
}

/// 명령 → 코어 호출 라우터
pub struct InputRouter {
    controller: Arc<SessionResetController>,
    surface: Arc<HeadlessSurface>,
}

impl InputRouter {
    /// 새 라우터
    pub fn new(controller: Arc<SessionResetController>, surface: Arc<HeadlessSurface>) -> Self {
        Self {
            controller,
            surface,
        }
    }

    /// 명령 처리
    pub async fn dispatch(&self, command: ShellCommand) -> Result<Dispatch, CoreError> {
        let store = self.controller.store();

        match command {
            ShellCommand::SelectProfile { id, custom } => {
                let config = store.set_profile(id, custom.as_deref());
                self.controller.reset_if_pending().await?;
                Ok(Dispatch::Reply(format!(
                    "프로필: {}: {}",
                    config.selected_profile_id, config.active_user_agent
                )))
            }
            ShellCommand::CommitCustom(value) => {
                let config = store.commit_custom_user_agent(&value)?;
                self.controller.reset_if_pending().await?;
                Ok(Dispatch::Reply(format!(
                    "커스텀 User-Agent 적용: {}",
                    config.active_user_agent
                )))
            }
            ShellCommand::Shake => {
                info!("흔들기 감지");
                self.empty_cache().await
            }
            ShellCommand::EmptyCache => self.empty_cache().await,
            ShellCommand::Reset => {
                store.request_reset();
                let outcome = self.controller.reset_if_pending().await?;
                Ok(Dispatch::Reply(format!("세션 리셋: {outcome:?}")))
            }
            ShellCommand::Status => {
                let config = store.current();
                let mut lines = vec![
                    format!("프로필: {}", config.selected_profile_id),
                    format!("User-Agent: {}", config.active_user_agent),
                    format!("리셋 대기: {}", config.pending_reset),
                    format!("리셋 단계: {:?}", self.controller.phase()),
                ];
                if let Some(nav) = self.surface.last() {
                    lines.push(format!(
                        "마지막 로드: {} ({})",
                        nav.url,
                        nav.loaded_at.format("%H:%M:%S")
                    ));
                }
                Ok(Dispatch::Reply(lines.join("\n")))
            }
            ShellCommand::Profiles => {
                let selected = store.current().selected_profile_id;
                let mut lines: Vec<String> = UserAgentProfile::builtin()
                    .into_iter()
                    .map(|p| {
                        let mark = if p.id == selected { "*" } else { " " };
                        format!("{mark} {}: {}", p.id, p.value)
                    })
                    .collect();
                let mark = if selected == ProfileId::Custom { "*" } else { " " };
                lines.push(format!("{mark} {}", ProfileId::Custom));
                Ok(Dispatch::Reply(lines.join("\n")))
            }
            ShellCommand::Help => Ok(Dispatch::Reply(HELP.to_string())),
            ShellCommand::Quit => Ok(Dispatch::Quit),
        }
    }

    async fn empty_cache(&self) -> Result<Dispatch, CoreError> {
        let outcome = self.controller.force_reset_and_terminate().await;
        Ok(Dispatch::Reply(format!("캐시 비우기: {outcome:?}")))
    }

    /// 한 줄 입력 처리. 에러는 응답 문자열로 바꾼다.
    pub async fn handle_line(&self, line: &str) -> Dispatch {
        let command = match line.parse::<ShellCommand>() {
            Ok(command) => command,
            Err(CommandError::Empty) => return Dispatch::Reply(String::new()),
            Err(e) => {
                warn!("명령 파싱 실패: {e}");
                return Dispatch::Reply(format!("{e}\n{HELP}"));
            }
        };

        match self.dispatch(command).await {
            Ok(dispatch) => dispatch,
            Err(e) => {
                warn!("명령 처리 실패: {e}");
                Dispatch::Reply(format!("오류: {e}"))
            }
        }
    }
}
