//! 저장 경로 결정.
//!
//! # 플랫폼별 기본 경로:
//! - macOS: `~/Library/Application Support/com.yttv.YT-TV/`
//! - Windows: `%APPDATA%\yttv\YT-TV\`
//! - Linux: `~/.config/yt-tv/` (환경설정), `~/.local/share/yt-tv/` (웹뷰 데이터)

use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use yttv_core::config::StorageConfig;

const PREFERENCES_FILE: &str = "preferences.json";
const WEB_DATA_DIR: &str = "webdata";

/// 셸이 사용하는 저장 경로
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellPaths {
    /// User-Agent 환경설정 파일
    pub preferences: PathBuf,
    /// 웹뷰 데이터 디렉토리
    pub web_data: PathBuf,
}

/// 저장 경로 결정
///
/// 우선순위: 설정 파일의 개별 경로 → `--data-dir` → 플랫폼 기본 경로 → 현재 디렉토리.
pub fn resolve_paths(storage: &StorageConfig, data_dir: Option<&Path>) -> ShellPaths {
    let base = data_dir.map(|dir| (dir.to_path_buf(), dir.to_path_buf()));
    let (config_dir, data_dir) = base
        .or_else(|| {
            ProjectDirs::from("com", "yttv", "YT-TV")
                .map(|p| (p.config_dir().to_path_buf(), p.data_dir().to_path_buf()))
        })
        .unwrap_or_else(|| (PathBuf::from("."), PathBuf::from(".")));

    ShellPaths {
        preferences: storage
            .preferences_path
            .clone()
            .unwrap_or_else(|| config_dir.join(PREFERENCES_FILE)),
        web_data: storage
            .web_data_dir
            .clone()
            .unwrap_or_else(|| data_dir.join(WEB_DATA_DIR)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_dir_overrides_platform_default() {
        let paths = resolve_paths(&StorageConfig::default(), Some(Path::new("/tmp/yttv")));
        assert_eq!(paths.preferences, PathBuf::from("/tmp/yttv/preferences.json"));
        assert_eq!(paths.web_data, PathBuf::from("/tmp/yttv/webdata"));
    }

    #[test]
    fn explicit_paths_win() {
        let storage = StorageConfig {
            preferences_path: Some(PathBuf::from("/etc/yttv/prefs.json")),
            web_data_dir: None,
        };
        let paths = resolve_paths(&storage, Some(Path::new("/tmp/yttv")));
        assert_eq!(paths.preferences, PathBuf::from("/etc/yttv/prefs.json"));
        assert_eq!(paths.web_data, PathBuf::from("/tmp/yttv/webdata"));
    }

    #[test]
    fn platform_default_uses_expected_names() {
        let paths = resolve_paths(&StorageConfig::default(), None);
        assert!(paths.preferences.ends_with(PREFERENCES_FILE));
        assert!(paths.web_data.ends_with(WEB_DATA_DIR));
    }
}
