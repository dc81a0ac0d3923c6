//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 어댑터 crate와 `yttv-app`이 이 trait들을 구현하며,
//! 리셋 컨트롤러는 `Arc<dyn T>`로 와이어링된다.
//!
//! 비동기 trait은 `async_trait` 매크로로 object safety를 보장한다.

pub mod preferences;
pub mod process_control;
pub mod render_surface;
pub mod session_storage;
