//! # yttv-core
//!
//! YT-TV 도메인 모델, 포트(trait) 정의, 에러 타입.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`] - User-Agent 프로필, 설정 상태, 리셋 사이클 모델
//! - [`ports`] - Hexagonal Architecture 포트 인터페이스 (async_trait)
//! - [`error`] - 핵심 에러 타입 (thiserror)
//! - [`config`] - 애플리케이션 설정 구조체
//! - [`config_store`] - User-Agent 설정 저장소 (로드/변경/영속화)

pub mod config;
pub mod config_store;
pub mod error;
pub mod models;
pub mod ports;
