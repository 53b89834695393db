//! SubmitFeedbackHandler - Command handler for swap feedback and ratings.
//!
//! Feedback touches two rows without a transaction: the swap's feedback
//! slot is claimed first (the single-shot guard), then the rated user's
//! entry list and scalar rating are updated. The latter two steps are
//! idempotent, so a retry after a partial failure converges.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, Identity, Score, SwapId};
use crate::domain::swap::{ParticipantRole, Swap, SwapError};
use crate::domain::user::{scalar_rating, RatingEntry};
use crate::ports::{SwapStore, UserDirectory};

/// Command to leave feedback and a 1-5 rating on an accepted swap.
#[derive(Debug, Clone)]
pub struct SubmitFeedbackCommand {
    pub swap_id: SwapId,
    pub caller: Identity,
    pub feedback: String,
    pub rating: i16,
}

/// Result of a recorded submission.
#[derive(Debug, Clone)]
pub struct SubmitFeedbackResult {
    pub swap: Swap,
    /// True when the identical submission was already stored.
    pub replayed: bool,
}

/// Handler for submitting swap feedback.
pub struct SubmitFeedbackHandler {
    swaps: Arc<dyn SwapStore>,
    directory: Arc<dyn UserDirectory>,
}

impl SubmitFeedbackHandler {
    pub fn new(swaps: Arc<dyn SwapStore>, directory: Arc<dyn UserDirectory>) -> Self {
        Self { swaps, directory }
    }

    pub async fn handle(
        &self,
        cmd: SubmitFeedbackCommand,
    ) -> Result<SubmitFeedbackResult, SwapError> {
        // 1. Validate the rating before any I/O
        let score = Score::try_from_i16(cmd.rating).map_err(DomainError::from)?;

        // 2. Load the swap
        let mut swap = self
            .swaps
            .find_by_id(&cmd.swap_id)
            .await?
            .ok_or_else(|| SwapError::not_found(cmd.swap_id))?;

        // 3. Participants only; the caller's side picks the slot
        let role = swap.authorize_participant(&cmd.caller)?;

        // 4. The identical submission replayed is absorbed, not rejected
        if is_replay(&swap, role, &cmd.feedback, score) {
            self.settle_rating(&swap, role, &cmd.caller, score).await?;
            return Ok(SubmitFeedbackResult {
                swap,
                replayed: true,
            });
        }

        // 5. Record locally; precise length, state, and slot errors
        swap.record_feedback(role, cmd.feedback.clone(), score)?;

        // 6. Claim the slot; the guard against racing double submissions
        let claimed = self
            .swaps
            .claim_feedback(&cmd.swap_id, role, &cmd.feedback, score, *swap.updated_at())
            .await?;

        // 7. Lost race: re-read to tell replay, conflict, and state change apart
        if !claimed {
            let current = self
                .swaps
                .find_by_id(&cmd.swap_id)
                .await?
                .ok_or_else(|| SwapError::not_found(cmd.swap_id))?;
            let (stored_feedback, stored_score) = current.feedback(role);
            if stored_feedback.is_some() || stored_score.is_some() {
                if is_replay(&current, role, &cmd.feedback, score) {
                    self.settle_rating(&current, role, &cmd.caller, score).await?;
                    return Ok(SubmitFeedbackResult {
                        swap: current,
                        replayed: true,
                    });
                }
                return Err(SwapError::feedback_already_submitted());
            }
            return Err(SwapError::invalid_state(format!(
                "Swap is not accepted (currently {})",
                current.status().as_str()
            )));
        }

        // 8. Append the entry to the other side and refresh their scalar
        self.settle_rating(&swap, role, &cmd.caller, score).await?;

        Ok(SubmitFeedbackResult {
            swap,
            replayed: false,
        })
    }

    /// Runs the two idempotent steps after the slot claim.
    async fn settle_rating(
        &self,
        swap: &Swap,
        role: ParticipantRole,
        caller: &Identity,
        score: Score,
    ) -> Result<(), SwapError> {
        let rated = swap.rated_party(role);
        let (feedback, _) = swap.feedback(role);
        let entry = RatingEntry::new(
            caller.clone(),
            *swap.id(),
            score,
            feedback.map(str::to_string),
            *swap.updated_at(),
        );

        let result = self.apply_rating(rated, &entry).await;
        if let Err(err) = &result {
            // The slot is already claimed; a retried submission re-runs this.
            tracing::warn!(
                swap_id = %swap.id(),
                code = %err.code,
                "rating update failed after feedback claim"
            );
        }
        result.map_err(|err| match err.code {
            ErrorCode::UserNotFound => SwapError::user_not_found(rated.clone()),
            _ => err.into(),
        })
    }

    async fn apply_rating(&self, rated: &Identity, entry: &RatingEntry) -> Result<(), DomainError> {
        self.directory.append_rating(rated, entry).await?;
        let entries = self.directory.rating_entries(rated).await?;
        self.directory
            .set_scalar_rating(rated, scalar_rating(&entries))
            .await
    }
}

/// True when the slot already holds exactly this submission.
fn is_replay(swap: &Swap, role: ParticipantRole, feedback: &str, score: Score) -> bool {
    let (stored_feedback, stored_score) = swap.feedback(role);
    stored_feedback == Some(feedback) && stored_score == Some(score)
}
