//! 환경설정 저장소 어댑터.
//!
//! `PreferenceStore` 포트 구현. 파일 기반(JSON)과 인메모리 두 가지.

use parking_lot::Mutex;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use yttv_core::error::CoreError;
use yttv_core::ports::preferences::{PreferenceMap, PreferenceStore};

/// JSON 파일 환경설정 저장소
///
/// 임시 파일에 쓴 뒤 rename 하므로 일부만 기록된 파일은 관찰되지 않는다.
pub struct JsonPreferenceFile {
    path: PathBuf,
    /// 읽기-병합-쓰기 직렬화
    io_lock: Mutex<()>,
}

impl JsonPreferenceFile {
    /// 지정된 경로의 환경설정 파일 (없으면 첫 기록 시 생성)
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            io_lock: Mutex::new(()),
        }
    }

    /// 환경설정 파일 경로
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "preferences.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    fn read_unlocked(&self) -> Result<PreferenceMap, CoreError> {
        if !self.path.exists() {
            return Ok(PreferenceMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            CoreError::StorageRead(format!("{}: {}", self.path.display(), e))
        })?;
        let entries: PreferenceMap = serde_json::from_str(&content).map_err(|e| {
            CoreError::StorageRead(format!("파싱 실패: {}: {}", self.path.display(), e))
        })?;

        debug!("환경설정 파일 로드 완료: {}", self.path.display());
        Ok(entries)
    }
}

impl PreferenceStore for JsonPreferenceFile {
    fn read(&self) -> Result<PreferenceMap, CoreError> {
        let _guard = self.io_lock.lock();
        self.read_unlocked()
    }

    fn write(&self, entries: &PreferenceMap) -> Result<(), CoreError> {
        let _guard = self.io_lock.lock();

        // 손상된 기존 파일은 덮어쓴다
        let mut merged = self.read_unlocked().unwrap_or_else(|e| {
            warn!("기존 환경설정 무시: {e}");
            PreferenceMap::new()
        });
        merged.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    CoreError::StorageWrite(format!(
                        "디렉토리 생성 실패: {}: {}",
                        parent.display(),
                        e
                    ))
                })?;
                info!("환경설정 디렉토리 생성: {}", parent.display());
            }
        }

        let content = serde_json::to_string_pretty(&merged)
            .map_err(|e| CoreError::StorageWrite(format!("직렬화 실패: {e}")))?;

        let temp = self.temp_path();
        fs::write(&temp, content)
            .map_err(|e| CoreError::StorageWrite(format!("{}: {}", temp.display(), e)))?;
        fs::rename(&temp, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp);
            CoreError::StorageWrite(format!("{}: {}", self.path.display(), e))
        })?;

        debug!("환경설정 저장 완료: {}", self.path.display());
        Ok(())
    }
}

/// 인메모리 환경설정 저장소
///
/// 영속 경로를 쓸 수 없을 때의 대체 수단이자 테스트용.
#[derive(Default)]
pub struct MemoryPreferences {
    entries: Mutex<PreferenceMap>,
}

impl MemoryPreferences {
    /// 빈 저장소
    pub fn new() -> Self {
        Self::default()
    }

    /// 초기 항목을 가진 저장소
    pub fn with_entries(entries: PreferenceMap) -> Self {
        Self {
            entries: Mutex::new(entries),
        }
    }

    /// 현재 항목 스냅샷
    pub fn snapshot(&self) -> PreferenceMap {
        self.entries.lock().clone()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn read(&self) -> Result<PreferenceMap, CoreError> {
        Ok(self.snapshot())
    }

    fn write(&self, entries: &PreferenceMap) -> Result<(), CoreError> {
        let mut current = self.entries.lock();
        current.extend(entries.iter().map(|(k, v)| (k.clone(), v.clone())));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::Value;
    use tempfile::TempDir;

    fn entry(key: &str, value: Value) -> PreferenceMap {
        let mut map = PreferenceMap::new();
        map.insert(key.to_string(), value);
        map
    }

    #[test]
    fn missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let store = JsonPreferenceFile::new(dir.path().join("prefs.json"));
        assert!(store.read().unwrap().is_empty());
    }

    #[test]
    fn write_creates_parent_and_persists() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("prefs.json");
        let store = JsonPreferenceFile::new(path.clone());

        store.write(&entry("User Agent", Value::from("Foo"))).unwrap();
        assert!(path.exists());

        let reopened = JsonPreferenceFile::new(path);
        assert_eq!(reopened.read().unwrap()["User Agent"], Value::from("Foo"));
    }

    #[test]
    fn write_merges_unrelated_keys() {
        let dir = TempDir::new().unwrap();
        let store = JsonPreferenceFile::new(dir.path().join("prefs.json"));

        store.write(&entry("Window Width", Value::from(1280))).unwrap();
        store.write(&entry("ResetOnLaunch", Value::from(true))).unwrap();

        let entries = store.read().unwrap();
        assert_eq!(entries["Window Width"], Value::from(1280));
        assert_eq!(entries["ResetOnLaunch"], Value::from(true));
    }

    #[test]
    fn temp_file_not_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = JsonPreferenceFile::new(dir.path().join("prefs.json"));
        store.write(&entry("ResetOnLaunch", Value::from(false))).unwrap();

        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["prefs.json".to_string()]);
    }

    #[test]
    fn corrupt_file_is_read_error_and_overwritten() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("prefs.json");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonPreferenceFile::new(path);

        assert_matches!(store.read(), Err(CoreError::StorageRead(_)));

        store.write(&entry("ResetOnLaunch", Value::from(true))).unwrap();
        assert_eq!(store.read().unwrap().len(), 1);
    }

    #[test]
    fn memory_store_merges() {
        let store = MemoryPreferences::with_entries(entry("a", Value::from(1)));
        store.write(&entry("b", Value::from(2))).unwrap();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.len(), 2);
    }
}
