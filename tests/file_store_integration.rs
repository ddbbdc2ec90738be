//! Integration tests for the file-backed review state store.
//!
//! Covers durability across store instances, exact float persistence,
//! and the full submit path running against files on disk.

use std::sync::Arc;

use anatomy_review::adapters::{
    FileReviewStateStore, InMemoryReviewLog, InMemoryStudySessionRepository, ManualClock,
    SequentialSessionIdGenerator, StaticCardCatalog,
};
use anatomy_review::application::{
    review_state_store, GetRetentionQuery, ReviewAppState, SubmitReviewCommand,
};
use anatomy_review::config::{AppConfig, StorageBackend};
use anatomy_review::domain::foundation::{CardId, ReviewerId, Timestamp};
use anatomy_review::domain::scheduling::{Rating, Scheduler};
use anatomy_review::ports::{ReviewStateStore, StateVersion, StoreError};
use tempfile::TempDir;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn t0() -> Timestamp {
    Timestamp::from_unix_secs(1_717_200_000)
}

fn reviewer(id: &str) -> ReviewerId {
    ReviewerId::new(id).unwrap()
}

fn card(id: &str) -> CardId {
    CardId::new(id).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn state_survives_reopening_the_store() {
    let dir = TempDir::new().unwrap();
    let scheduler = Scheduler::with_defaults();

    let first = scheduler
        .advance_or_introduce(None, &reviewer("learner"), &card("femur"), Rating::Good, t0())
        .unwrap();
    let second = scheduler
        .advance(&first, Rating::Hard, t0().plus_days(2))
        .unwrap();

    {
        let store = FileReviewStateStore::new(dir.path());
        let v1 = store.put(&first, None).await.unwrap();
        store.put(&second, Some(v1)).await.unwrap();
    }

    let reopened = FileReviewStateStore::new(dir.path());
    let loaded = reopened
        .get(&reviewer("learner"), &card("femur"))
        .await
        .unwrap()
        .unwrap();

    assert_eq!(loaded.version, StateVersion::FIRST.next());
    assert_eq!(loaded.state, second);
    assert_eq!(loaded.state.stability.to_bits(), second.stability.to_bits());
    assert_eq!(loaded.state.difficulty.to_bits(), second.difficulty.to_bits());
    assert_eq!(loaded.state.elapsed_days.to_bits(), second.elapsed_days.to_bits());
}

#[tokio::test]
async fn stale_version_from_another_instance_conflicts() {
    let dir = TempDir::new().unwrap();
    let scheduler = Scheduler::with_defaults();
    let state = scheduler
        .advance_or_introduce(None, &reviewer("learner"), &card("femur"), Rating::Good, t0())
        .unwrap();

    let a = FileReviewStateStore::new(dir.path());
    let b = FileReviewStateStore::new(dir.path());
    let v1 = a.put(&state, None).await.unwrap();

    let next = scheduler.advance(&state, Rating::Good, t0().plus_days(3)).unwrap();
    a.put(&next, Some(v1)).await.unwrap();

    let err = b.put(&next, Some(v1)).await.unwrap_err();
    assert!(matches!(
        err,
        StoreError::Conflict { expected: Some(v), .. } if v == v1
    ));
}

#[tokio::test]
async fn reviewers_are_isolated_on_disk() {
    let dir = TempDir::new().unwrap();
    let store = FileReviewStateStore::new(dir.path());
    let scheduler = Scheduler::with_defaults();

    for id in ["alice", "bob/../../etc"] {
        let state = scheduler
            .advance_or_introduce(None, &reviewer(id), &card("femur"), Rating::Easy, t0())
            .unwrap();
        store.put(&state, None).await.unwrap();
    }

    let files: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.ends_with(".json") && !f.contains('/')));

    assert_eq!(store.list_for_reviewer(&reviewer("alice")).await.unwrap().len(), 1);
    assert_eq!(
        store.list_for_reviewer(&reviewer("bob/../../etc")).await.unwrap().len(),
        1
    );
}

#[tokio::test]
async fn submit_path_runs_against_configured_file_backend() {
    let dir = TempDir::new().unwrap();
    let mut config = AppConfig::default();
    config.storage.backend = StorageBackend::File;
    config.storage.data_dir = dir.path().to_path_buf();

    let state = ReviewAppState::new(
        &config,
        review_state_store(&config.storage),
        Arc::new(StaticCardCatalog::from_ids(["femur", "tibia"]).unwrap()),
        Arc::new(InMemoryStudySessionRepository::new()),
        Arc::new(InMemoryReviewLog::new()),
        Arc::new(ManualClock::new(t0())),
        Arc::new(SequentialSessionIdGenerator::new()),
    )
    .unwrap();

    for (id, rating) in [("femur", Rating::Good), ("tibia", Rating::Again)] {
        state
            .submit_review_handler()
            .handle(SubmitReviewCommand {
                reviewer_id: reviewer("learner"),
                card_id: card(id),
                rating,
                session_id: None,
            })
            .await
            .unwrap();
    }

    let report = state
        .get_retention_handler()
        .handle(GetRetentionQuery {
            reviewer_id: reviewer("learner"),
        })
        .await
        .unwrap();
    assert_eq!(report.total_reviews, 2);
    assert_eq!(report.retention_rate, Some(0.5));

    // A fresh store over the same directory sees the committed states.
    let reopened = FileReviewStateStore::new(dir.path());
    assert_eq!(
        reopened.list_for_reviewer(&reviewer("learner")).await.unwrap().len(),
        2
    );
}
