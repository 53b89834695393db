//! Swap aggregate entity.
//!
//! A swap is a request from one user (the requester) to exchange skills
//! with another (the receiver). The aggregate owns the lifecycle rules:
//! who may move the request through its states and when each side may
//! leave feedback.
//!
//! # Concurrency
//!
//! Mutations here validate and update an in-memory copy only. Persistence
//! goes through conditional store updates keyed on the expected status (or
//! an empty feedback slot), so a stale copy can never clobber a concurrent
//! decision.

use crate::domain::foundation::{
    DomainError, ErrorCode, Identity, Score, StateMachine, SwapId, Timestamp,
};

use super::SwapStatus;

/// Maximum length for the optional request message.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Maximum length for feedback text.
pub const MAX_FEEDBACK_LENGTH: usize = 2000;

/// Which side of a swap an identity is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticipantRole {
    Requester,
    Receiver,
}

impl ParticipantRole {
    /// Returns the wire form of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParticipantRole::Requester => "requester",
            ParticipantRole::Receiver => "receiver",
        }
    }
}

/// Swap aggregate - one skill exchange request between two users.
///
/// # Invariants
///
/// - `requester` and `receiver` are distinct identities
/// - status moves only along the lifecycle state machine
/// - each feedback slot is written at most once, and only while accepted
#[derive(Debug, Clone, PartialEq)]
pub struct Swap {
    /// Unique identifier for this swap request.
    id: SwapId,

    /// User who sent the request.
    requester: Identity,

    /// User the request was sent to.
    receiver: Identity,

    /// Optional message attached by the requester.
    message: Option<String>,

    /// Current lifecycle status.
    status: SwapStatus,

    /// Feedback the requester left about the receiver.
    requester_feedback: Option<String>,

    /// Score the requester gave the receiver.
    requester_rating: Option<Score>,

    /// Feedback the receiver left about the requester.
    receiver_feedback: Option<String>,

    /// Score the receiver gave the requester.
    receiver_rating: Option<Score>,

    /// When the request was created.
    created_at: Timestamp,

    /// When the request was last modified.
    updated_at: Timestamp,
}

impl Swap {
    /// Create a new pending swap request.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if requester and receiver are the same user
    ///   or the message is too long
    pub fn new(
        id: SwapId,
        requester: Identity,
        receiver: Identity,
        message: Option<String>,
    ) -> Result<Self, DomainError> {
        if requester == receiver {
            return Err(DomainError::validation(
                "receiver_id",
                "Requester and receiver must be different users",
            ));
        }
        Self::validate_message(message.as_deref())?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            requester,
            receiver,
            message,
            status: SwapStatus::Pending,
            requester_feedback: None,
            requester_rating: None,
            receiver_feedback: None,
            receiver_rating: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a swap from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: SwapId,
        requester: Identity,
        receiver: Identity,
        message: Option<String>,
        status: SwapStatus,
        requester_feedback: Option<String>,
        requester_rating: Option<Score>,
        receiver_feedback: Option<String>,
        receiver_rating: Option<Score>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            requester,
            receiver,
            message,
            status,
            requester_feedback,
            requester_rating,
            receiver_feedback,
            receiver_rating,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the swap ID.
    pub fn id(&self) -> &SwapId {
        &self.id
    }

    /// Returns the requester's identity.
    pub fn requester(&self) -> &Identity {
        &self.requester
    }

    /// Returns the receiver's identity.
    pub fn receiver(&self) -> &Identity {
        &self.receiver
    }

    /// Returns the request message, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the current status.
    pub fn status(&self) -> SwapStatus {
        self.status
    }

    /// Returns when the swap was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the swap was last modified.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    /// Returns the feedback slot for the given role.
    pub fn feedback(&self, role: ParticipantRole) -> (Option<&str>, Option<Score>) {
        match role {
            ParticipantRole::Requester => {
                (self.requester_feedback.as_deref(), self.requester_rating)
            }
            ParticipantRole::Receiver => {
                (self.receiver_feedback.as_deref(), self.receiver_rating)
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Participants
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the role of the given identity, if a participant.
    pub fn role_of(&self, identity: &Identity) -> Option<ParticipantRole> {
        if identity == &self.requester {
            Some(ParticipantRole::Requester)
        } else if identity == &self.receiver {
            Some(ParticipantRole::Receiver)
        } else {
            None
        }
    }

    /// Checks if the given identity is a participant.
    pub fn is_participant(&self, identity: &Identity) -> bool {
        self.role_of(identity).is_some()
    }

    /// Returns the identity whose ratings the given role's feedback targets.
    ///
    /// The requester rates the receiver and vice versa.
    pub fn rated_party(&self, role: ParticipantRole) -> &Identity {
        match role {
            ParticipantRole::Requester => &self.receiver,
            ParticipantRole::Receiver => &self.requester,
        }
    }

    /// Validates that the identity is a participant, returning their role.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the identity is neither requester nor receiver
    pub fn authorize_participant(
        &self,
        identity: &Identity,
    ) -> Result<ParticipantRole, DomainError> {
        self.role_of(identity).ok_or_else(|| {
            DomainError::new(
                ErrorCode::Forbidden,
                "User is not a participant in this swap",
            )
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Apply a validated status transition without any role check.
    ///
    /// Administrative moderation uses this directly; participant
    /// operations go through [`accept`](Self::accept) and friends.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if the move is not in the lifecycle table
    pub fn transition(&mut self, target: SwapStatus) -> Result<(), DomainError> {
        self.status = self.status.transition_to(target).map_err(|_| {
            DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!("Swap is not {}", expected_source(target)),
            )
        })?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    /// Accept the request. Only the receiver may accept, only while pending.
    pub fn accept(&mut self, caller: &Identity) -> Result<(), DomainError> {
        self.ensure_receiver(caller, "accept")?;
        self.transition(SwapStatus::Accepted)
    }

    /// Reject the request. Only the receiver may reject, only while pending.
    pub fn reject(&mut self, caller: &Identity) -> Result<(), DomainError> {
        self.ensure_receiver(caller, "reject")?;
        self.transition(SwapStatus::Rejected)
    }

    /// Cancel the request. Only the requester may cancel, only while pending.
    pub fn cancel(&mut self, caller: &Identity) -> Result<(), DomainError> {
        if caller != &self.requester {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "Only the requester can cancel a swap request",
            ));
        }
        self.transition(SwapStatus::Cancelled)
    }

    /// Mark the exchange as carried out. Either participant may complete,
    /// only from accepted.
    pub fn complete(&mut self, caller: &Identity) -> Result<(), DomainError> {
        self.authorize_participant(caller)?;
        self.transition(SwapStatus::Completed)
    }

    /// Record one side's feedback about their counterpart.
    ///
    /// # Errors
    ///
    /// - `ValidationFailed` if the feedback text is too long
    /// - `InvalidStateTransition` unless the swap is accepted
    /// - `FeedbackAlreadySubmitted` if this side already left feedback
    pub fn record_feedback(
        &mut self,
        role: ParticipantRole,
        feedback: String,
        score: Score,
    ) -> Result<(), DomainError> {
        if feedback.len() > MAX_FEEDBACK_LENGTH {
            return Err(DomainError::validation(
                "feedback",
                format!("Feedback must be at most {} characters", MAX_FEEDBACK_LENGTH),
            ));
        }
        if !self.status.accepts_feedback() {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                "Swap is not accepted",
            ));
        }

        let (slot_feedback, slot_rating) = match role {
            ParticipantRole::Requester => {
                (&mut self.requester_feedback, &mut self.requester_rating)
            }
            ParticipantRole::Receiver => {
                (&mut self.receiver_feedback, &mut self.receiver_rating)
            }
        };
        if slot_feedback.is_some() || slot_rating.is_some() {
            return Err(DomainError::new(
                ErrorCode::FeedbackAlreadySubmitted,
                "Feedback was already submitted for this swap",
            ));
        }

        *slot_feedback = Some(feedback);
        *slot_rating = Some(score);
        self.updated_at = Timestamp::now();
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn ensure_receiver(&self, caller: &Identity, verb: &str) -> Result<(), DomainError> {
        if caller != &self.receiver {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                format!("Only the receiver can {} a swap request", verb),
            ));
        }
        Ok(())
    }

    fn validate_message(message: Option<&str>) -> Result<(), DomainError> {
        if let Some(message) = message {
            if message.len() > MAX_MESSAGE_LENGTH {
                return Err(DomainError::validation(
                    "message",
                    format!("Message must be at most {} characters", MAX_MESSAGE_LENGTH),
                ));
            }
        }
        Ok(())
    }
}

/// The source state a transition requires, for error messages.
fn expected_source(target: SwapStatus) -> &'static str {
    match target {
        SwapStatus::Completed => "accepted",
        _ => "pending",
    }
}
