//! Rating value object: the learner's self-assessment after seeing a card.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// Four-point recall grade: 1 (forgot) to 4 (effortless).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Rating {
    Again = 1,
    Hard = 2,
    Good = 3,
    Easy = 4,
}

impl Rating {
    /// All ratings in ascending order.
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    /// Creates a Rating from the UI's 1-4 button index.
    pub fn try_from_u8(value: u8) -> Result<Self, ValidationError> {
        match value {
            1 => Ok(Rating::Again),
            2 => Ok(Rating::Hard),
            3 => Ok(Rating::Good),
            4 => Ok(Rating::Easy),
            _ => Err(ValidationError::out_of_range(
                "rating",
                1.0,
                4.0,
                f64::from(value),
            )),
        }
    }

    /// Returns the numeric value.
    pub fn value(&self) -> u8 {
        *self as u8
    }

    /// Zero-based position, used to index per-rating weight tables.
    pub fn index(&self) -> usize {
        usize::from(self.value() - 1)
    }

    /// Returns true for every rating except `Again`.
    pub fn is_success(&self) -> bool {
        !matches!(self, Rating::Again)
    }

    /// Returns the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Rating::Again => "Again",
            Rating::Hard => "Hard",
            Rating::Good => "Good",
            Rating::Easy => "Easy",
        }
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn try_from_u8_accepts_button_range() {
        for (value, expected) in [
            (1, Rating::Again),
            (2, Rating::Hard),
            (3, Rating::Good),
            (4, Rating::Easy),
        ] {
            assert_eq!(Rating::try_from_u8(value).unwrap(), expected);
        }
    }

    #[test]
    fn try_from_u8_rejects_out_of_range() {
        assert!(Rating::try_from_u8(0).is_err());
        assert!(Rating::try_from_u8(5).is_err());
    }

    #[test]
    fn only_again_is_a_failure() {
        assert!(!Rating::Again.is_success());
        assert!(Rating::Hard.is_success());
        assert!(Rating::Good.is_success());
        assert!(Rating::Easy.is_success());
    }

    #[test]
    fn index_matches_position_in_all() {
        for (i, rating) in Rating::ALL.iter().enumerate() {
            assert_eq!(rating.index(), i);
        }
    }

    #[test]
    fn serializes_as_snake_case() {
        assert_eq!(serde_json::to_string(&Rating::Again).unwrap(), "\"again\"");
    }
}
