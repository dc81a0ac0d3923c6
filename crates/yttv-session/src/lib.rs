//! # yttv-session
//!
//! 세션 리셋 컨트롤러.
//! User-Agent 변경이나 캐시 비우기 요청이 들어오면 브라우징 데이터를 지우고,
//! 렌더링 화면을 현재 User-Agent로 다시 로드하거나 프로세스를 종료한다.
//! 한 번에 하나의 삭제 작업만 실행된다.

pub mod controller;

pub use controller::SessionResetController;
