//! In-Memory Study Session Repository
//!
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, ReviewerId, SessionId, Timestamp};
use crate::domain::study::StudySession;
use crate::ports::StudySessionRepository;

/// In-memory storage for study sessions
#[derive(Debug, Clone)]
pub struct InMemoryStudySessionRepository {
    sessions: Arc<RwLock<HashMap<SessionId, StudySession>>>,
    available: Arc<AtomicBool>,
}

impl InMemoryStudySessionRepository {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Simulate an outage; every call fails while false.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    fn ensure_available(&self) -> Result<(), DomainError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(DomainError::new(
                ErrorCode::StoreUnavailable,
                "Session store is offline",
            ))
        }
    }
}

impl Default for InMemoryStudySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StudySessionRepository for InMemoryStudySessionRepository {
    async fn save(&self, session: &StudySession) -> Result<(), DomainError> {
        self.ensure_available()?;
        self.sessions
            .write()
            .await
            .insert(session.session_id, session.clone());
        Ok(())
    }

    async fn update(&self, session: &StudySession) -> Result<(), DomainError> {
        self.ensure_available()?;
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&session.session_id) {
            Some(existing) => {
                *existing = session.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SessionNotFound,
                format!("Study session not found: {}", session.session_id),
            )),
        }
    }

    async fn find_by_id(&self, id: &SessionId) -> Result<Option<StudySession>, DomainError> {
        self.ensure_available()?;
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn find_started_between(
        &self,
        reviewer_id: &ReviewerId,
        from: Timestamp,
        until: Timestamp,
    ) -> Result<Vec<StudySession>, DomainError> {
        self.ensure_available()?;
        let sessions = self.sessions.read().await;
        let mut found: Vec<StudySession> = sessions
            .values()
            .filter(|s| &s.reviewer_id == reviewer_id)
            .filter(|s| s.started_at >= from && s.started_at < until)
            .cloned()
            .collect();
        found.sort_by_key(|s| s.started_at);
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_717_200_000)
    }

    fn session(reviewer: &str, started_at: Timestamp) -> StudySession {
        StudySession::start(SessionId::new(), ReviewerId::new(reviewer).unwrap(), started_at)
    }

    #[tokio::test]
    async fn save_then_find() {
        let repo = InMemoryStudySessionRepository::new();
        let s = session("a", t0());
        repo.save(&s).await.unwrap();
        assert_eq!(repo.find_by_id(&s.session_id).await.unwrap(), Some(s));
    }

    #[tokio::test]
    async fn update_of_unknown_session_fails() {
        let repo = InMemoryStudySessionRepository::new();
        let err = repo.update(&session("a", t0())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::SessionNotFound);
    }

    #[tokio::test]
    async fn started_between_is_half_open_and_per_reviewer() {
        let repo = InMemoryStudySessionRepository::new();
        let inside = session("a", t0());
        let at_end = session("a", t0().plus_days(1));
        let other = session("b", t0());
        for s in [&inside, &at_end, &other] {
            repo.save(s).await.unwrap();
        }

        let found = repo
            .find_started_between(&ReviewerId::new("a").unwrap(), t0(), t0().plus_days(1))
            .await
            .unwrap();

        assert_eq!(found, vec![inside]);
    }

    #[tokio::test]
    async fn offline_repository_fails() {
        let repo = InMemoryStudySessionRepository::new();
        repo.set_available(false);
        let err = repo.save(&session("a", t0())).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::StoreUnavailable);
        assert_eq!(repo.session_count().await, 0);
    }
}
