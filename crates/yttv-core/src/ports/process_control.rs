//! 프로세스 제어 포트.
//!
//! 구현: `yttv-app` crate (`ProcessExit`)

/// 프로세스 종료 요청
pub trait ProcessControl: Send + Sync {
    /// 현재 프로세스를 끝낸다. 실제 구현은 반환하지 않는다.
    fn terminate(&self);
}
