//! File-based Review State Store Adapter
//!
//! Stores every review state of a reviewer in one JSON document:
//!
//! ```text
//! <base_path>/<hex(reviewer_id)>.json
//! ```
//!
//! Writes go to a uniquely named sibling temp file that is renamed over the
//! document, so a crash mid-write leaves the previous document intact.
//! Floats are written with round-trip precision.
//!
//! A `put` holds `<hex(reviewer_id)>.lock`, created exclusively, across the
//! read-check-write. Any number of store instances or processes sharing the
//! directory therefore see a single compare-and-swap per reviewer. A lock
//! file older than [`STALE_LOCK_AFTER`] is taken to belong to a crashed
//! writer and removed.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant, SystemTime};
use tokio::fs;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::next_version;
use crate::domain::foundation::{CardId, ReviewerId, Timestamp};
use crate::domain::scheduling::CardReviewState;
use crate::ports::{ReviewStateStore, StateVersion, StoreError, VersionedState};

/// Give up waiting for another writer after this long.
const LOCK_WAIT_TIMEOUT: Duration = Duration::from_secs(10);
const LOCK_RETRY_DELAY: Duration = Duration::from_millis(5);
/// A lock untouched for this long is left over from a crashed writer.
pub const STALE_LOCK_AFTER: Duration = Duration::from_secs(30);

/// Exclusive hold on a reviewer document. Removes the lock file on drop.
#[derive(Debug)]
struct DocumentLock {
    path: PathBuf,
}

impl Drop for DocumentLock {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.path);
    }
}

enum LockAttempt {
    Acquired(DocumentLock),
    Held,
    Stale,
}

fn try_lock(path: &Path) -> Result<LockAttempt, StoreError> {
    match OpenOptions::new().create_new(true).write(true).open(path) {
        Ok(mut file) => {
            let _ = writeln!(file, "{}", std::process::id());
            Ok(LockAttempt::Acquired(DocumentLock {
                path: path.to_path_buf(),
            }))
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => {
            let age = std::fs::metadata(path)
                .and_then(|m| m.modified())
                .ok()
                .and_then(|modified| SystemTime::now().duration_since(modified).ok());
            match age {
                Some(age) if age >= STALE_LOCK_AFTER => Ok(LockAttempt::Stale),
                _ => Ok(LockAttempt::Held),
            }
        }
        Err(e) => Err(StoreError::unavailable(e.to_string())),
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct ReviewerDocument {
    cards: BTreeMap<CardId, VersionedState>,
}

/// File-based storage for review states
#[derive(Debug)]
pub struct FileReviewStateStore {
    base_path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileReviewStateStore {
    /// Create a new file store with a base directory
    ///
    /// # Example
    /// ```ignore
    /// let store = FileReviewStateStore::new("./data/reviews");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Hex-encoding keeps any id a safe file name.
    fn file_stem(reviewer_id: &ReviewerId) -> String {
        reviewer_id
            .as_str()
            .bytes()
            .map(|b| format!("{:02x}", b))
            .collect()
    }

    /// Document path for a reviewer.
    fn document_path(&self, reviewer_id: &ReviewerId) -> PathBuf {
        self.base_path.join(format!("{}.json", Self::file_stem(reviewer_id)))
    }

    fn lock_path(&self, reviewer_id: &ReviewerId) -> PathBuf {
        self.base_path.join(format!("{}.lock", Self::file_stem(reviewer_id)))
    }

    /// Waits for the reviewer's lock file, clearing it if stale.
    async fn lock_document(&self, reviewer_id: &ReviewerId) -> Result<DocumentLock, StoreError> {
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StoreError::unavailable(e.to_string()))?;

        let path = self.lock_path(reviewer_id);
        let started = Instant::now();
        loop {
            match try_lock(&path)? {
                LockAttempt::Acquired(lock) => return Ok(lock),
                LockAttempt::Stale => {
                    tracing::warn!(path = %path.display(), "Removing stale review state lock");
                    let _ = std::fs::remove_file(&path);
                }
                LockAttempt::Held => {
                    if started.elapsed() >= LOCK_WAIT_TIMEOUT {
                        return Err(StoreError::unavailable(format!(
                            "timed out waiting for lock {}",
                            path.display()
                        )));
                    }
                    tokio::time::sleep(LOCK_RETRY_DELAY).await;
                }
            }
        }
    }

    async fn load(&self, reviewer_id: &ReviewerId) -> Result<ReviewerDocument, StoreError> {
        let path = self.document_path(reviewer_id);
        match fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Serialization(e.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(ReviewerDocument::default()),
            Err(e) => Err(StoreError::unavailable(e.to_string())),
        }
    }

    /// Caller holds the document lock.
    async fn save(
        &self,
        reviewer_id: &ReviewerId,
        document: &ReviewerDocument,
    ) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(document)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;

        let path = self.document_path(reviewer_id);
        let tmp = self.base_path.join(format!(
            "{}.{}.tmp",
            Self::file_stem(reviewer_id),
            Uuid::new_v4().simple()
        ));
        let written = match fs::write(&tmp, json).await {
            Ok(()) => fs::rename(&tmp, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = fs::remove_file(&tmp).await;
            return Err(StoreError::unavailable(e.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ReviewStateStore for FileReviewStateStore {
    async fn get(
        &self,
        reviewer_id: &ReviewerId,
        card_id: &CardId,
    ) -> Result<Option<VersionedState>, StoreError> {
        let mut document = self.load(reviewer_id).await?;
        Ok(document.cards.remove(card_id))
    }

    async fn put(
        &self,
        state: &CardReviewState,
        expected: Option<StateVersion>,
    ) -> Result<StateVersion, StoreError> {
        let _local = self.write_lock.lock().await;
        let _lock = self.lock_document(&state.reviewer_id).await?;

        let mut document = self.load(&state.reviewer_id).await?;
        let current = document.cards.get(&state.card_id).map(|v| v.version);
        let version = next_version(current, expected)?;

        document.cards.insert(
            state.card_id.clone(),
            VersionedState {
                state: state.clone(),
                version,
            },
        );
        self.save(&state.reviewer_id, &document).await?;
        Ok(version)
    }

    async fn due_before(
        &self,
        reviewer_id: &ReviewerId,
        instant: Timestamp,
    ) -> Result<Vec<CardReviewState>, StoreError> {
        let document = self.load(reviewer_id).await?;
        Ok(document
            .cards
            .into_values()
            .map(|v| v.state)
            .filter(|s| s.is_due(instant))
            .collect())
    }

    async fn list_for_reviewer(
        &self,
        reviewer_id: &ReviewerId,
    ) -> Result<Vec<CardReviewState>, StoreError> {
        let document = self.load(reviewer_id).await?;
        Ok(document.cards.into_values().map(|v| v.state).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::scheduling::{Rating, Scheduler};
    use tempfile::TempDir;

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_717_200_000)
    }

    fn reviewed(card: &str) -> CardReviewState {
        Scheduler::with_defaults()
            .advance_or_introduce(
                None,
                &ReviewerId::new("learner/1").unwrap(),
                &CardId::new(card).unwrap(),
                Rating::Hard,
                t0(),
            )
            .unwrap()
    }

    #[test]
    fn document_path_is_hex_encoded() {
        let store = FileReviewStateStore::new("/data");
        let path = store.document_path(&ReviewerId::new("a/b").unwrap());
        assert_eq!(path, PathBuf::from("/data/612f62.json"));
    }

    #[tokio::test]
    async fn missing_document_reads_as_empty() {
        let dir = TempDir::new().unwrap();
        let store = FileReviewStateStore::new(dir.path());
        let reviewer = ReviewerId::new("nobody").unwrap();

        assert!(store.list_for_reviewer(&reviewer).await.unwrap().is_empty());
        assert!(store
            .get(&reviewer, &CardId::new("x").unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn put_persists_and_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let store = FileReviewStateStore::new(dir.path().join("nested"));
        let state = reviewed("femur");

        let version = store.put(&state, None).await.unwrap();

        let found = store.get(&state.reviewer_id, &state.card_id).await.unwrap().unwrap();
        assert_eq!(found.version, version);
        assert_eq!(found.state, state);

        let mut entries = std::fs::read_dir(dir.path().join("nested")).unwrap();
        let only = entries.next().unwrap().unwrap();
        assert!(only.file_name().to_string_lossy().ends_with(".json"));
        assert!(entries.next().is_none());
    }

    #[tokio::test]
    async fn conflicting_put_is_rejected() {
        let dir = TempDir::new().unwrap();
        let store = FileReviewStateStore::new(dir.path());
        let state = reviewed("femur");
        let v1 = store.put(&state, None).await.unwrap();
        store.put(&state, Some(v1)).await.unwrap();

        let err = store.put(&state, Some(v1)).await.unwrap_err();

        assert_eq!(
            err,
            StoreError::Conflict {
                expected: Some(v1),
                actual: Some(v1.next()),
            }
        );
    }

    fn file_names(dir: &Path) -> Vec<String> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect()
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn racing_instances_commit_exactly_once_per_version() {
        let dir = TempDir::new().unwrap();
        let a = std::sync::Arc::new(FileReviewStateStore::new(dir.path()));
        let b = std::sync::Arc::new(FileReviewStateStore::new(dir.path()));
        let state = reviewed("femur");
        let mut version = a.put(&state, None).await.unwrap();

        for _ in 0..50 {
            let (left, right) = {
                let (a, b) = (a.clone(), b.clone());
                let (sa, sb) = (state.clone(), state.clone());
                let ha = tokio::spawn(async move { a.put(&sa, Some(version)).await });
                let hb = tokio::spawn(async move { b.put(&sb, Some(version)).await });
                (ha.await.unwrap(), hb.await.unwrap())
            };

            match (&left, &right) {
                (Ok(v), Err(e)) | (Err(e), Ok(v)) => {
                    assert_eq!(*v, version.next());
                    assert!(e.is_conflict(), "{:?}", e);
                }
                other => panic!("expected one commit and one conflict, got {:?}", other),
            }
            version = version.next();
        }

        let found = b.get(&state.reviewer_id, &state.card_id).await.unwrap().unwrap();
        assert_eq!(found.version, version);
        assert_eq!(file_names(dir.path()).len(), 1);
    }

    #[tokio::test]
    async fn held_lock_blocks_until_released() {
        let dir = TempDir::new().unwrap();
        let store = std::sync::Arc::new(FileReviewStateStore::new(dir.path()));
        let state = reviewed("femur");
        let lock = store.lock_document(&state.reviewer_id).await.unwrap();

        let writer = {
            let (store, state) = (store.clone(), state.clone());
            tokio::spawn(async move { store.put(&state, None).await })
        };
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(!writer.is_finished());
        assert!(store.get(&state.reviewer_id, &state.card_id).await.unwrap().is_none());

        drop(lock);
        assert_eq!(writer.await.unwrap(), Ok(StateVersion::FIRST));
    }

    #[tokio::test]
    async fn stale_lock_is_cleared() {
        let dir = TempDir::new().unwrap();
        let store = FileReviewStateStore::new(dir.path());
        let state = reviewed("femur");
        let lock_path = store.lock_path(&state.reviewer_id);
        let file = std::fs::File::create(&lock_path).unwrap();
        file.set_modified(SystemTime::now() - STALE_LOCK_AFTER - Duration::from_secs(1))
            .unwrap();
        drop(file);

        assert_eq!(store.put(&state, None).await, Ok(StateVersion::FIRST));
        assert!(!lock_path.exists());
    }

    #[tokio::test]
    async fn corrupt_document_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let store = FileReviewStateStore::new(dir.path());
        let reviewer = ReviewerId::new("learner").unwrap();
        std::fs::write(store.document_path(&reviewer), b"{not json").unwrap();

        let err = store.list_for_reviewer(&reviewer).await.unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }
}
