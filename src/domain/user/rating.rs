//! Rating entries and scalar rating aggregation.
//!
//! Every piece of swap feedback lands as one entry in the rated user's
//! append-only ratings list. The displayed scalar rating is always
//! recomputed from the full list, never adjusted incrementally.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Identity, Score, SwapId, Timestamp};

/// One rating a user received, with provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingEntry {
    /// Who left the rating.
    pub from: Identity,
    /// The swap the rating came from. Dedup key together with `from`.
    pub swap_id: SwapId,
    /// The score given.
    pub score: Score,
    /// Free-text feedback, if any.
    pub feedback: Option<String>,
    /// When the rating was left.
    pub rated_at: Timestamp,
}

impl RatingEntry {
    pub fn new(
        from: Identity,
        swap_id: SwapId,
        score: Score,
        feedback: Option<String>,
        rated_at: Timestamp,
    ) -> Self {
        Self {
            from,
            swap_id,
            score,
            feedback,
            rated_at,
        }
    }

    /// Converts to the persisted form. New entries always write the
    /// `rating` key, never the legacy `score` key.
    pub fn to_stored(&self) -> StoredRatingEntry {
        StoredRatingEntry {
            from: self.from.as_str().to_string(),
            swap_id: Some(self.swap_id.to_string()),
            rating: Some(self.score.as_i16()),
            score: None,
            feedback: self.feedback.clone(),
            rated_at: Some(self.rated_at),
        }
    }
}

/// Persisted shape of a rating entry.
///
/// The stored arrays accumulated under several writers over time, so
/// decoding tolerates the older key spellings: `from_user_id` for
/// `from`, `score` for `rating`, `date` for `rated_at`, and entries
/// without any `swap_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRatingEntry {
    #[serde(alias = "from_user_id")]
    pub from: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub swap_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<i16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i16>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,

    #[serde(alias = "date", default, skip_serializing_if = "Option::is_none")]
    pub rated_at: Option<Timestamp>,
}

impl StoredRatingEntry {
    /// Resolves the score of a stored entry: `rating` first, the legacy
    /// `score` key second, 0 when both are missing.
    ///
    /// Entries resolving to 0 still count in the average and drag it
    /// down instead of being skipped.
    // TODO: skip unscored entries once the stored arrays are migrated
    // to the `rating` key.
    pub fn resolved_score(&self) -> i16 {
        self.rating.or(self.score).unwrap_or(0)
    }

    /// True if this entry came from the given swap and rater.
    pub fn matches_provenance(&self, swap_id: &SwapId, from: &Identity) -> bool {
        self.swap_id.as_deref() == Some(swap_id.to_string().as_str())
            && self.from == from.as_str()
    }
}

/// Scalar rating shown on a profile: mean of all entry scores rounded
/// to 2 decimals, `None` for a user with no ratings yet.
pub fn scalar_rating(entries: &[StoredRatingEntry]) -> Option<f64> {
    if entries.is_empty() {
        return None;
    }
    let total: i64 = entries.iter().map(|e| e.resolved_score() as i64).sum();
    let mean = total as f64 / entries.len() as f64;
    Some((mean * 100.0).round() / 100.0)
}
