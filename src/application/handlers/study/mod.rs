//! Study session command and query handlers.

mod end_session;
mod get_retention;
mod get_review_stats;
mod record_review;
mod start_session;

pub use end_session::{EndSessionCommand, EndSessionHandler, EndSessionResult};
pub use get_retention::{GetRetentionHandler, GetRetentionQuery};
pub use get_review_stats::{GetReviewStatsHandler, GetReviewStatsQuery, StatsError};
pub use record_review::{RecordReviewCommand, RecordReviewHandler};
pub use start_session::{StartSessionCommand, StartSessionHandler};

use crate::domain::foundation::{ReviewerId, SessionId};
use crate::domain::study::{SessionError, StudySession};
use crate::ports::StudySessionRepository;

/// Loads a session and checks that `reviewer_id` owns it.
async fn load_owned_session(
    repository: &dyn StudySessionRepository,
    session_id: &SessionId,
    reviewer_id: &ReviewerId,
) -> Result<StudySession, SessionError> {
    let session = repository
        .find_by_id(session_id)
        .await?
        .ok_or_else(|| SessionError::not_found(*session_id))?;

    if &session.reviewer_id != reviewer_id {
        return Err(SessionError::ReviewerMismatch(*session_id));
    }
    Ok(session)
}
