//! 웹뷰 세션 데이터 어댑터.
//!
//! `SessionStorage` 포트 구현. 웹뷰 데이터 디렉토리의 최상위 항목
//! (쿠키 저장소, Local Storage, 캐시, IndexedDB 등)을 레코드로 보고
//! 하나씩 삭제한다. 일부 실패는 결과에 기록하고 계속 진행한다.

use async_trait::async_trait;
use chrono::Utc;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use yttv_core::error::CoreError;
use yttv_core::models::session::ClearOutcome;
use yttv_core::ports::session_storage::SessionStorage;

/// 디렉토리 기반 웹뷰 데이터 저장소
pub struct WebDataStore {
    root: PathBuf,
    /// 동시 삭제 방지
    clear_lock: Mutex<()>,
}

impl WebDataStore {
    /// 웹뷰 데이터 디렉토리 지정
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            clear_lock: Mutex::new(()),
        }
    }

    /// 데이터 디렉토리 경로
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 현재 남아 있는 레코드 이름 (정렬)
    pub async fn records(&self) -> Result<Vec<String>, CoreError> {
        if !fs::try_exists(&self.root).await? {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(names)
    }

    async fn remove_record(path: &Path) -> std::io::Result<()> {
        let file_type = fs::symlink_metadata(path).await?.file_type();
        if file_type.is_dir() {
            fs::remove_dir_all(path).await
        } else {
            fs::remove_file(path).await
        }
    }
}

#[async_trait]
impl SessionStorage for WebDataStore {
    async fn clear_all(&self) -> Result<ClearOutcome, CoreError> {
        let _guard = self.clear_lock.lock().await;

        if !fs::try_exists(&self.root).await? {
            debug!("웹뷰 데이터 디렉토리 없음: {}", self.root.display());
            return Ok(ClearOutcome::complete(0));
        }

        let mut removed = 0;
        let mut failed = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;

        loop {
            let entry = match entries.next_entry().await {
                Ok(Some(entry)) => entry,
                Ok(None) => break,
                Err(e) => {
                    // 목록을 더 읽을 수 없으면 지금까지의 결과로 마무리
                    warn!("웹뷰 데이터 목록 읽기 실패: {}: {e}", self.root.display());
                    failed.push(self.root.display().to_string());
                    break;
                }
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            match Self::remove_record(&entry.path()).await {
                Ok(()) => {
                    debug!("세션 레코드 삭제: {name}");
                    removed += 1;
                }
                Err(e) => {
                    warn!("세션 레코드 삭제 실패: {name}: {e}");
                    failed.push(name);
                }
            }
        }

        info!(removed, failed = failed.len(), "웹뷰 데이터 삭제 완료");
        Ok(ClearOutcome {
            removed,
            failed,
            completed_at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn seed(root: &Path) {
        fs::create_dir_all(root.join("Local Storage").join("leveldb"))
            .await
            .unwrap();
        fs::write(root.join("Local Storage").join("leveldb").join("000003.log"), b"x")
            .await
            .unwrap();
        fs::create_dir_all(root.join("Cache")).await.unwrap();
        fs::write(root.join("Cookies"), b"session=abc").await.unwrap();
    }

    #[tokio::test]
    async fn clears_every_record() {
        let dir = TempDir::new().unwrap();
        let store = WebDataStore::new(dir.path().join("webdata"));
        seed(store.root()).await;

        assert_eq!(
            store.records().await.unwrap(),
            vec!["Cache", "Cookies", "Local Storage"]
        );

        let outcome = store.clear_all().await.unwrap();
        assert_eq!(outcome.removed, 3);
        assert!(outcome.is_complete());
        assert!(store.records().await.unwrap().is_empty());
        // 루트 디렉토리 자체는 유지
        assert!(store.root().exists());
    }

    #[tokio::test]
    async fn missing_root_is_empty_clear() {
        let dir = TempDir::new().unwrap();
        let store = WebDataStore::new(dir.path().join("never-created"));

        let outcome = store.clear_all().await.unwrap();
        assert_eq!(outcome.removed, 0);
        assert!(outcome.is_complete());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn undeletable_record_is_reported_and_others_removed() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = WebDataStore::new(dir.path().join("webdata"));
        let locked = store.root().join("IndexedDB");
        fs::create_dir_all(&locked).await.unwrap();
        fs::write(locked.join("000001.ldb"), b"x").await.unwrap();
        fs::write(store.root().join("Cookies"), b"session=abc").await.unwrap();

        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o555)).unwrap();
        // root는 권한 비트를 무시하므로 건너뜀
        if std::fs::write(locked.join("writable"), b"").is_ok() {
            std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let outcome = store.clear_all().await.unwrap();
        std::fs::set_permissions(&locked, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert_eq!(outcome.removed, 1);
        assert_eq!(outcome.failed, vec!["IndexedDB".to_string()]);
        assert!(!outcome.is_complete());
        assert_eq!(store.records().await.unwrap(), vec!["IndexedDB"]);
    }

    #[tokio::test]
    async fn second_clear_finds_nothing() {
        let dir = TempDir::new().unwrap();
        let store = WebDataStore::new(dir.path());
        seed(store.root()).await;

        store.clear_all().await.unwrap();
        let outcome = store.clear_all().await.unwrap();
        assert_eq!(outcome.removed, 0);
    }
}
