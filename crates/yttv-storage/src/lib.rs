//! # yttv-storage
//!
//! 저장소 어댑터.
//! User-Agent 설정을 JSON 파일에 원자적으로 기록하고,
//! 웹뷰 데이터 디렉토리(쿠키, 로컬 저장소, 캐시)를 레코드 단위로 비운다.
//!
//! ## 모듈
//! - `preferences`: 환경설정 저장소 (PreferenceStore 구현)
//! - `web_data`: 웹뷰 세션 데이터 (SessionStorage 구현)

pub mod preferences;
pub mod web_data;
