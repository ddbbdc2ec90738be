//! Read-side summaries: today's progress, lifetime retention, status counts.
//!
//! Everything here is recomputed from source rows on request; nothing is
//! cached between calls.

use serde::{Deserialize, Serialize};

use super::{DayWindow, ReviewLogEntry, StudySession};
use crate::domain::foundation::Timestamp;
use crate::domain::scheduling::{CardReviewState, ReviewStatus};

/// Work done inside one study day.
///
/// Reviews count toward the day they were made in, whether or not they
/// belonged to a session and whenever that session started.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    pub window: DayWindow,
    /// Sessions started inside the window.
    pub sessions: u32,
    pub new_cards_introduced: u32,
    pub reviews_completed: u32,
    pub cards_correct: u32,
}

impl DailyProgress {
    /// Counts the sessions started and the reviews logged inside `window`.
    pub fn from_activity<'a, 'b>(
        window: DayWindow,
        sessions: impl IntoIterator<Item = &'a StudySession>,
        reviews: impl IntoIterator<Item = &'b ReviewLogEntry>,
    ) -> Self {
        let mut progress = Self::empty(window);
        progress.sessions = sessions
            .into_iter()
            .filter(|s| window.contains(s.started_at))
            .count() as u32;

        for entry in reviews.into_iter().filter(|e| window.contains(e.reviewed_at)) {
            if entry.first_exposure {
                progress.new_cards_introduced += 1;
            } else {
                progress.reviews_completed += 1;
            }
            if entry.is_correct() {
                progress.cards_correct += 1;
            }
        }
        progress
    }

    pub fn empty(window: DayWindow) -> Self {
        Self {
            window,
            sessions: 0,
            new_cards_introduced: 0,
            reviews_completed: 0,
            cards_correct: 0,
        }
    }
}

/// Lifetime recall rate for one reviewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RetentionReport {
    pub total_reviews: u64,
    pub total_correct: u64,
    /// `total_correct / total_reviews`; `None` before the first review.
    pub retention_rate: Option<f64>,
}

impl RetentionReport {
    pub fn from_states<'a>(states: impl IntoIterator<Item = &'a CardReviewState>) -> Self {
        let (total_reviews, total_correct) = states.into_iter().fold((0u64, 0u64), |acc, s| {
            (
                acc.0 + u64::from(s.total_reviews),
                acc.1 + u64::from(s.total_correct),
            )
        });
        let retention_rate = if total_reviews == 0 {
            None
        } else {
            Some(total_correct as f64 / total_reviews as f64)
        };
        Self {
            total_reviews,
            total_correct,
            retention_rate,
        }
    }
}

/// Collection overview for a reviewer at an instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub total_cards: u32,
    pub new_cards: u32,
    pub learning_cards: u32,
    pub review_cards: u32,
    pub relearning_cards: u32,
    pub due_now: u32,
    pub retention: RetentionReport,
    pub today: DailyProgress,
}

impl ReviewStats {
    pub fn compute(states: &[CardReviewState], now: Timestamp, today: DailyProgress) -> Self {
        let mut stats = Self {
            total_cards: 0,
            new_cards: 0,
            learning_cards: 0,
            review_cards: 0,
            relearning_cards: 0,
            due_now: 0,
            retention: RetentionReport::from_states(states),
            today,
        };

        for state in states {
            stats.total_cards += 1;
            match state.status {
                ReviewStatus::New => stats.new_cards += 1,
                ReviewStatus::Learning => stats.learning_cards += 1,
                ReviewStatus::Review => stats.review_cards += 1,
                ReviewStatus::Relearning => stats.relearning_cards += 1,
            }
            if state.is_due(now) {
                stats.due_now += 1;
            }
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{CardId, ReviewerId, SessionId};
    use crate::domain::scheduling::{Rating, Scheduler};
    use crate::domain::study::DayBoundary;

    fn t0() -> Timestamp {
        Timestamp::from_unix_secs(1_717_200_000)
    }

    fn reviewer() -> ReviewerId {
        ReviewerId::new("learner").unwrap()
    }

    fn reviewed(card: &str, ratings: &[Rating]) -> CardReviewState {
        let s = Scheduler::with_defaults();
        let mut state = CardReviewState::new(reviewer(), CardId::new(card).unwrap(), t0());
        for rating in ratings {
            state = s.advance(&state, *rating, t0()).unwrap();
        }
        state
    }

    #[test]
    fn retention_is_none_without_reviews() {
        let report = RetentionReport::from_states(&Vec::<CardReviewState>::new());
        assert_eq!(report.total_reviews, 0);
        assert_eq!(report.retention_rate, None);
    }

    #[test]
    fn retention_sums_across_cards() {
        let states = vec![
            reviewed("a", &[Rating::Good, Rating::Again]),
            reviewed("b", &[Rating::Easy, Rating::Good]),
        ];
        let report = RetentionReport::from_states(&states);
        assert_eq!(report.total_reviews, 4);
        assert_eq!(report.total_correct, 3);
        assert_eq!(report.retention_rate, Some(0.75));
    }

    fn logged(card: &str, rating: Rating, at: Timestamp, first_exposure: bool) -> ReviewLogEntry {
        ReviewLogEntry {
            reviewer_id: reviewer(),
            card_id: CardId::new(card).unwrap(),
            rating,
            reviewed_at: at,
            first_exposure,
            session_id: None,
        }
    }

    #[test]
    fn daily_progress_counts_reviews_by_when_they_happened() {
        let window = DayBoundary::utc_midnight().window_containing(t0());
        let today = StudySession::start(SessionId::new(), reviewer(), window.start);
        let yesterday =
            StudySession::start(SessionId::new(), reviewer(), window.start.plus_secs(-600));
        let reviews = [
            // Made yesterday: excluded.
            logged("a", Rating::Good, window.start.plus_secs(-300), true),
            // Made after the rollover in yesterday's session: counted.
            logged("b", Rating::Good, window.start.plus_secs(60), true),
            logged("c", Rating::Again, window.start.plus_secs(120), false),
            logged("d", Rating::Hard, window.start.plus_secs(180), false),
            // Made tomorrow: excluded.
            logged("e", Rating::Good, window.end, false),
        ];

        let progress = DailyProgress::from_activity(window, [&today, &yesterday], &reviews);

        assert_eq!(progress.sessions, 1);
        assert_eq!(progress.new_cards_introduced, 1);
        assert_eq!(progress.reviews_completed, 2);
        assert_eq!(progress.cards_correct, 2);
    }

    #[test]
    fn stats_count_statuses_and_due_cards() {
        let states = vec![
            CardReviewState::new(reviewer(), CardId::new("unseen").unwrap(), t0()),
            reviewed("learning", &[Rating::Good]),
            reviewed("review", &[Rating::Easy]),
        ];
        let window = DayBoundary::utc_midnight().window_containing(t0());

        let stats = ReviewStats::compute(&states, t0().plus_days(400), DailyProgress::empty(window));

        assert_eq!(stats.total_cards, 3);
        assert_eq!(stats.new_cards, 1);
        assert_eq!(stats.learning_cards, 1);
        assert_eq!(stats.review_cards, 1);
        assert_eq!(stats.relearning_cards, 0);
        assert_eq!(stats.due_now, 2);
        assert_eq!(stats.retention.total_reviews, 2);
    }
}
