//! Interval fuzz.
//!
//! Jitter keeps cards learned together from falling due on the same day.
//! The generator is seeded from the card's identity and review count, so the
//! same inputs always produce the same schedule.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{CardReviewState, SchedulerParameters};

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Seed derived from the reviewer, the card and how often it was reviewed.
///
/// FNV-1a over fixed byte encodings, so seeds are identical on every
/// toolchain and platform. The ids are length-prefixed to keep
/// ("ab", "c") and ("a", "bc") apart.
pub fn fuzz_seed(state: &CardReviewState) -> u64 {
    let mut hash = FNV_OFFSET_BASIS;
    for field in [state.reviewer_id.as_str(), state.card_id.as_str()] {
        hash = fnv1a(hash, &(field.len() as u64).to_le_bytes());
        hash = fnv1a(hash, field.as_bytes());
    }
    fnv1a(hash, &state.total_reviews.to_le_bytes())
}

fn fnv1a(mut hash: u64, bytes: &[u8]) -> u64 {
    for byte in bytes {
        hash ^= u64::from(*byte);
        hash = hash.wrapping_mul(FNV_PRIME);
    }
    hash
}

/// Applies bounded relative jitter to `interval_days`.
///
/// Intervals below `fuzz_min_days` are returned unchanged.
pub fn fuzz_interval(params: &SchedulerParameters, interval_days: f64, seed: u64) -> f64 {
    if !params.fuzz_enabled || params.fuzz_ratio <= 0.0 || interval_days < params.fuzz_min_days {
        return interval_days;
    }
    let mut rng = StdRng::seed_from_u64(seed);
    let jitter: f64 = rng.gen_range(-params.fuzz_ratio..=params.fuzz_ratio);
    interval_days * (1.0 + jitter)
}
