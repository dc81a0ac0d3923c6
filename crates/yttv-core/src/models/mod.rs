//! YT-TV 도메인 모델.
//!
//! 모든 모델은 `serde` Serialize/Deserialize를 구현한다.

pub mod configuration;
pub mod session;
pub mod user_agent;
