//! ReviewAppState - wires ports and configuration into handlers.

use std::sync::Arc;

use crate::adapters::{
    FileReviewStateStore, InMemoryReviewLog, InMemoryReviewStateStore,
    InMemoryStudySessionRepository, SystemClock, UuidSessionIdGenerator,
};
use crate::application::handlers::{
    BuildQueueHandler, EndSessionHandler, GetRetentionHandler, GetReviewStatsHandler,
    RecordReviewHandler, StartSessionHandler, SubmitReviewHandler,
};
use crate::config::{AppConfig, ConfigError, StorageBackend, StorageConfig, ValidationError};
use crate::domain::queue::DailyLimits;
use crate::domain::scheduling::Scheduler;
use crate::domain::study::DayBoundary;
use crate::ports::{
    CardCatalog, Clock, ReviewLog, ReviewStateStore, SessionIdGenerator, StudySessionRepository,
};

/// Shared dependencies for every review handler.
#[derive(Clone)]
pub struct ReviewAppState {
    pub store: Arc<dyn ReviewStateStore>,
    pub catalog: Arc<dyn CardCatalog>,
    pub sessions: Arc<dyn StudySessionRepository>,
    pub review_log: Arc<dyn ReviewLog>,
    pub clock: Arc<dyn Clock>,
    pub ids: Arc<dyn SessionIdGenerator>,
    pub scheduler: Scheduler,
    pub limits: DailyLimits,
    pub day_boundary: DayBoundary,
    pub conflict_retries: u32,
}

impl ReviewAppState {
    /// Builds the state with explicit ports and validated settings from `config`.
    pub fn new(
        config: &AppConfig,
        store: Arc<dyn ReviewStateStore>,
        catalog: Arc<dyn CardCatalog>,
        sessions: Arc<dyn StudySessionRepository>,
        review_log: Arc<dyn ReviewLog>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn SessionIdGenerator>,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let scheduler = Scheduler::new(config.scheduler.to_parameters())
            .map_err(|e| ConfigError::ValidationFailed(ValidationError::Scheduler(e)))?;

        Ok(Self {
            store,
            catalog,
            sessions,
            review_log,
            clock,
            ids,
            scheduler,
            limits: config.limits.to_daily_limits(),
            day_boundary: config.day_boundary.to_day_boundary()?,
            conflict_retries: config.storage.conflict_retries,
        })
    }

    /// Builds the state with the configured store, in-memory sessions and
    /// review log, the system clock and random session ids.
    pub fn from_config(config: &AppConfig, catalog: Arc<dyn CardCatalog>) -> Result<Self, ConfigError> {
        Self::new(
            config,
            review_state_store(&config.storage),
            catalog,
            Arc::new(InMemoryStudySessionRepository::new()),
            Arc::new(InMemoryReviewLog::new()),
            Arc::new(SystemClock),
            Arc::new(UuidSessionIdGenerator),
        )
    }

    pub fn submit_review_handler(&self) -> SubmitReviewHandler {
        SubmitReviewHandler::new(
            self.store.clone(),
            self.sessions.clone(),
            self.review_log.clone(),
            self.clock.clone(),
            self.scheduler.clone(),
            self.conflict_retries,
        )
    }

    pub fn build_queue_handler(&self) -> BuildQueueHandler {
        BuildQueueHandler::new(
            self.store.clone(),
            self.catalog.clone(),
            self.sessions.clone(),
            self.review_log.clone(),
            self.clock.clone(),
            self.limits,
            self.day_boundary,
        )
    }

    pub fn start_session_handler(&self) -> StartSessionHandler {
        StartSessionHandler::new(self.sessions.clone(), self.ids.clone(), self.clock.clone())
    }

    pub fn record_review_handler(&self) -> RecordReviewHandler {
        RecordReviewHandler::new(self.sessions.clone())
    }

    pub fn end_session_handler(&self) -> EndSessionHandler {
        EndSessionHandler::new(self.sessions.clone(), self.clock.clone())
    }

    pub fn get_retention_handler(&self) -> GetRetentionHandler {
        GetRetentionHandler::new(self.store.clone())
    }

    pub fn get_review_stats_handler(&self) -> GetReviewStatsHandler {
        GetReviewStatsHandler::new(
            self.store.clone(),
            self.sessions.clone(),
            self.review_log.clone(),
            self.clock.clone(),
            self.day_boundary,
        )
    }
}

/// Review state store selected by `storage.backend`.
pub fn review_state_store(config: &StorageConfig) -> Arc<dyn ReviewStateStore> {
    match config.backend {
        StorageBackend::Memory => Arc::new(InMemoryReviewStateStore::new()),
        StorageBackend::File => Arc::new(FileReviewStateStore::new(&config.data_dir)),
    }
}
