//! RecordReviewHandler - Command handler that counts a committed review
//! against a study session.
//!
//! Call only after the review's state write has committed.

use std::sync::Arc;

use tracing::debug;

use super::load_owned_session;
use crate::domain::foundation::{CardId, ReviewerId, SessionId};
use crate::domain::scheduling::Rating;
use crate::domain::study::{SessionError, StudySession};
use crate::ports::StudySessionRepository;

/// Command to count one review in a session.
#[derive(Debug, Clone)]
pub struct RecordReviewCommand {
    pub session_id: SessionId,
    pub reviewer_id: ReviewerId,
    pub card_id: CardId,
    pub rating: Rating,
    /// The review was the card's first exposure for this reviewer.
    pub first_exposure: bool,
}

/// Handler for counting reviews.
pub struct RecordReviewHandler {
    repository: Arc<dyn StudySessionRepository>,
}

impl RecordReviewHandler {
    pub fn new(repository: Arc<dyn StudySessionRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, cmd: RecordReviewCommand) -> Result<StudySession, SessionError> {
        let mut session =
            load_owned_session(self.repository.as_ref(), &cmd.session_id, &cmd.reviewer_id)
                .await?;

        session.record(cmd.rating, cmd.first_exposure)?;
        self.repository.update(&session).await?;

        debug!(
            session_id = %session.session_id,
            card_id = %cmd.card_id,
            rating = %cmd.rating,
            cards_reviewed = session.cards_reviewed,
            "Review counted in session"
        );
        Ok(session)
    }

    /// Fails unless the session exists, belongs to the reviewer and is open.
    pub async fn ensure_open(
        &self,
        session_id: &SessionId,
        reviewer_id: &ReviewerId,
    ) -> Result<(), SessionError> {
        let session = load_owned_session(self.repository.as_ref(), session_id, reviewer_id).await?;
        if session.is_open() {
            Ok(())
        } else {
            Err(SessionError::already_ended(*session_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryStudySessionRepository;
    use crate::domain::foundation::Timestamp;

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_717_200_000)
    }

    fn reviewer() -> ReviewerId {
        ReviewerId::new("learner").unwrap()
    }

    fn command(session_id: SessionId, rating: Rating, first_exposure: bool) -> RecordReviewCommand {
        RecordReviewCommand {
            session_id,
            reviewer_id: reviewer(),
            card_id: CardId::new("femur").unwrap(),
            rating,
            first_exposure,
        }
    }

    async fn setup() -> (Arc<InMemoryStudySessionRepository>, RecordReviewHandler, StudySession) {
        let repo = Arc::new(InMemoryStudySessionRepository::new());
        let session = StudySession::start(SessionId::new(), reviewer(), t0());
        repo.save(&session).await.unwrap();
        let handler = RecordReviewHandler::new(repo.clone());
        (repo, handler, session)
    }

    #[tokio::test]
    async fn counts_review_and_persists() {
        let (repo, handler, session) = setup().await;

        handler.handle(command(session.session_id, Rating::Good, true)).await.unwrap();
        let updated = handler
            .handle(command(session.session_id, Rating::Again, false))
            .await
            .unwrap();

        assert_eq!(updated.cards_reviewed, 2);
        assert_eq!(updated.cards_correct, 1);
        assert_eq!(updated.new_cards_introduced, 1);
        assert_eq!(repo.find_by_id(&session.session_id).await.unwrap(), Some(updated));
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let (_repo, handler, _session) = setup().await;
        let missing = SessionId::new();
        let err = handler.handle(command(missing, Rating::Good, false)).await.unwrap_err();
        assert_eq!(err, SessionError::not_found(missing));
    }

    #[tokio::test]
    async fn other_reviewers_session_is_rejected() {
        let (_repo, handler, session) = setup().await;
        let mut cmd = command(session.session_id, Rating::Good, false);
        cmd.reviewer_id = ReviewerId::new("someone-else").unwrap();

        let err = handler.handle(cmd).await.unwrap_err();

        assert!(matches!(err, SessionError::ReviewerMismatch(_)));
    }

    #[tokio::test]
    async fn ended_session_rejects_reviews() {
        let (repo, handler, mut session) = setup().await;
        session.end(t0().plus_secs(60)).unwrap();
        repo.update(&session).await.unwrap();

        assert!(handler.ensure_open(&session.session_id, &reviewer()).await.is_err());
        let err = handler
            .handle(command(session.session_id, Rating::Good, false))
            .await
            .unwrap_err();
        assert_eq!(err, SessionError::already_ended(session.session_id));
    }
}
