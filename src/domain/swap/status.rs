//! SwapStatus enum for the swap request lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of a swap request.
///
/// ```text
/// pending ──> accepted ──> completed
///    │            │
///    ├──> rejected┘ (rejected only from pending)
///    └──> cancelled
/// ```
///
/// `rejected`, `cancelled`, and `completed` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SwapStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
    Cancelled,
    Completed,
}

impl SwapStatus {
    /// Returns the storage form of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            SwapStatus::Pending => "pending",
            SwapStatus::Accepted => "accepted",
            SwapStatus::Rejected => "rejected",
            SwapStatus::Cancelled => "cancelled",
            SwapStatus::Completed => "completed",
        }
    }

    /// Parses the storage form back into a status.
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "pending" => Some(SwapStatus::Pending),
            "accepted" => Some(SwapStatus::Accepted),
            "rejected" => Some(SwapStatus::Rejected),
            "cancelled" => Some(SwapStatus::Cancelled),
            "completed" => Some(SwapStatus::Completed),
            _ => None,
        }
    }

    /// Returns true while the request awaits the receiver's decision.
    pub fn is_pending(&self) -> bool {
        matches!(self, SwapStatus::Pending)
    }

    /// Returns true once both sides have agreed and feedback is allowed.
    pub fn accepts_feedback(&self) -> bool {
        matches!(self, SwapStatus::Accepted)
    }
}

impl StateMachine for SwapStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SwapStatus::*;
        matches!(
            (self, target),
            (Pending, Accepted)
                | (Pending, Rejected)
                | (Pending, Cancelled)
                | (Accepted, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SwapStatus::*;
        match self {
            Pending => vec![Accepted, Rejected, Cancelled],
            Accepted => vec![Completed],
            Rejected | Cancelled | Completed => vec![],
        }
    }
}

impl fmt::Display for SwapStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
