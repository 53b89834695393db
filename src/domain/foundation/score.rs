//! Score value object (1-5 feedback scale).

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Lowest rating a participant can leave.
pub const MIN_SCORE: i16 = 1;

/// Highest rating a participant can leave.
pub const MAX_SCORE: i16 = 5;

/// A swap feedback rating between 1 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Score(i16);

impl Score {
    /// Creates a Score, returning error if out of range.
    pub fn try_from_i16(value: i16) -> Result<Self, ValidationError> {
        if !(MIN_SCORE..=MAX_SCORE).contains(&value) {
            return Err(ValidationError::out_of_range(
                "rating",
                MIN_SCORE as i32,
                MAX_SCORE as i32,
                value as i32,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the numeric value.
    pub fn value(&self) -> i16 {
        self.0
    }

    /// Returns the value as stored (i16 column / JSON number).
    pub fn as_i16(&self) -> i16 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_accepts_the_whole_scale() {
        for value in MIN_SCORE..=MAX_SCORE {
            assert_eq!(Score::try_from_i16(value).unwrap().value(), value);
        }
    }

    #[test]
    fn score_rejects_out_of_range_values() {
        for value in [-1, 0, 6, 100] {
            let err = Score::try_from_i16(value).unwrap_err();
            assert!(matches!(
                err,
                ValidationError::OutOfRange { ref field, .. } if field == "rating"
            ));
        }
    }

    #[test]
    fn score_serializes_as_a_bare_number() {
        let score = Score::try_from_i16(4).unwrap();
        assert_eq!(serde_json::to_string(&score).unwrap(), "4");
        let parsed: Score = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, score);
    }

    #[test]
    fn scores_order_naturally() {
        assert!(Score::try_from_i16(2).unwrap() < Score::try_from_i16(5).unwrap());
    }
}
