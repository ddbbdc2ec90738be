//! StartSessionHandler - Command handler for opening study sessions.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::ReviewerId;
use crate::domain::study::{SessionError, StudySession};
use crate::ports::{Clock, SessionIdGenerator, StudySessionRepository};

/// Command to open a study session.
#[derive(Debug, Clone)]
pub struct StartSessionCommand {
    pub reviewer_id: ReviewerId,
}

/// Handler for opening sessions.
pub struct StartSessionHandler {
    repository: Arc<dyn StudySessionRepository>,
    ids: Arc<dyn SessionIdGenerator>,
    clock: Arc<dyn Clock>,
}

impl StartSessionHandler {
    pub fn new(
        repository: Arc<dyn StudySessionRepository>,
        ids: Arc<dyn SessionIdGenerator>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            ids,
            clock,
        }
    }

    pub async fn handle(&self, cmd: StartSessionCommand) -> Result<StudySession, SessionError> {
        let session = StudySession::start(self.ids.next_id(), cmd.reviewer_id, self.clock.now());
        self.repository.save(&session).await?;

        info!(
            session_id = %session.session_id,
            reviewer_id = %session.reviewer_id,
            "Study session started"
        );
        Ok(session)
    }
}
