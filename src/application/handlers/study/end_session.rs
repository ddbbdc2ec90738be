//! EndSessionHandler - Command handler for closing study sessions.
//!
//! Ending an already-ended session succeeds and reports a no-op so a double
//! click in the UI is harmless.

use std::sync::Arc;

use tracing::{debug, info};

use super::load_owned_session;
use crate::domain::foundation::{ReviewerId, SessionId};
use crate::domain::study::{EndOutcome, SessionError, StudySession};
use crate::ports::{Clock, StudySessionRepository};

/// Command to close a session.
#[derive(Debug, Clone)]
pub struct EndSessionCommand {
    pub session_id: SessionId,
    pub reviewer_id: ReviewerId,
}

/// Result of closing a session.
#[derive(Debug, Clone)]
pub struct EndSessionResult {
    pub session: StudySession,
    pub outcome: EndOutcome,
}

/// Handler for closing sessions.
pub struct EndSessionHandler {
    repository: Arc<dyn StudySessionRepository>,
    clock: Arc<dyn Clock>,
}

impl EndSessionHandler {
    pub fn new(repository: Arc<dyn StudySessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn handle(&self, cmd: EndSessionCommand) -> Result<EndSessionResult, SessionError> {
        let mut session =
            load_owned_session(self.repository.as_ref(), &cmd.session_id, &cmd.reviewer_id)
                .await?;

        let outcome = session.end(self.clock.now())?;
        match outcome {
            EndOutcome::Ended { duration_seconds } => {
                self.repository.update(&session).await?;
                info!(
                    session_id = %session.session_id,
                    duration_seconds,
                    cards_reviewed = session.cards_reviewed,
                    cards_correct = session.cards_correct,
                    "Study session ended"
                );
            }
            EndOutcome::AlreadyEnded { .. } => {
                debug!(session_id = %session.session_id, "Session already ended; nothing to do");
            }
        }

        Ok(EndSessionResult { session, outcome })
    }
}
