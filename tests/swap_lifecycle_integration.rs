//! Integration tests for the swap lifecycle.
//!
//! These tests wire the real command handlers over the in-memory store
//! adapters and walk whole scenarios: request, accept, feedback from
//! both sides, completion, and the moderation surface around them.

use std::sync::Arc;

use skill_swap::adapters::memory::{
    InMemoryAdminLogStore, InMemorySwapStore, InMemoryUserDirectory,
};
use skill_swap::application::handlers::admin::{
    GetAuditLogHandler, GetAuditLogQuery, GetPlatformStatsHandler, GetPlatformStatsQuery,
    ModerateUserCommand, ModerateUserHandler, UserModeration,
};
use skill_swap::application::handlers::swap::{
    CancelSwapCommand, CancelSwapHandler, CreateSwapCommand, CreateSwapHandler,
    ListUserSwapsHandler, ListUserSwapsQuery, RespondToSwapCommand, RespondToSwapHandler,
    SubmitFeedbackCommand, SubmitFeedbackHandler, SwapDecision,
};
use skill_swap::application::handlers::user::{RegisterUserCommand, RegisterUserHandler};
use skill_swap::domain::admin::AdminError;
use skill_swap::domain::foundation::{Identity, SwapId, Timestamp};
use skill_swap::domain::swap::{SwapError, SwapStatus};
use skill_swap::domain::user::{User, UserRole};
use skill_swap::ports::{SwapStore, UserDirectory};

// =============================================================================
// Test infrastructure
// =============================================================================

struct Platform {
    swaps: Arc<InMemorySwapStore>,
    directory: Arc<InMemoryUserDirectory>,
    audit_log: Arc<InMemoryAdminLogStore>,
    register: RegisterUserHandler,
    create: CreateSwapHandler,
    respond: RespondToSwapHandler,
    cancel: CancelSwapHandler,
    feedback: SubmitFeedbackHandler,
    list: ListUserSwapsHandler,
}

impl Platform {
    fn new() -> Self {
        let swaps = Arc::new(InMemorySwapStore::new());
        let directory = Arc::new(InMemoryUserDirectory::new());
        let audit_log = Arc::new(InMemoryAdminLogStore::new());
        Self {
            register: RegisterUserHandler::new(directory.clone()),
            create: CreateSwapHandler::new(swaps.clone(), directory.clone()),
            respond: RespondToSwapHandler::new(swaps.clone()),
            cancel: CancelSwapHandler::new(swaps.clone()),
            feedback: SubmitFeedbackHandler::new(swaps.clone(), directory.clone()),
            list: ListUserSwapsHandler::new(swaps.clone(), directory.clone()),
            swaps,
            directory,
            audit_log,
        }
    }

    async fn register_user(&self, id: &str, name: &str) {
        self.register
            .handle(RegisterUserCommand {
                identity: identity(id),
                username: id.trim_start_matches("user_").to_string(),
                full_name: name.to_string(),
                email: format!("{}@example.com", id),
                location: None,
                availability: Some("weekends".to_string()),
                skills_offered: vec!["guitar".to_string()],
                skills_wanted: vec!["spanish".to_string()],
                is_public: true,
            })
            .await
            .unwrap();
    }

    async fn seed_admin(&self, id: &str) {
        let now = Timestamp::now();
        let admin = User::reconstitute(
            identity(id),
            "root".to_string(),
            "Site Admin".to_string(),
            format!("{}@example.com", id),
            None,
            None,
            vec![],
            vec![],
            false,
            false,
            None,
            true,
            UserRole::Admin,
            None,
            vec![],
            now,
            now,
        );
        self.directory.insert(&admin).await.unwrap();
    }

    async fn open_swap(&self, requester: &str, receiver: &str) -> SwapId {
        let result = self
            .create
            .handle(CreateSwapCommand {
                requester: identity(requester),
                receiver: identity(receiver),
                message: Some("Guitar lessons for Spanish?".to_string()),
            })
            .await
            .unwrap();
        *result.swap.id()
    }

    async fn accept(&self, swap_id: SwapId, caller: &str) {
        self.respond
            .handle(RespondToSwapCommand {
                swap_id,
                caller: identity(caller),
                decision: SwapDecision::Accept,
            })
            .await
            .unwrap();
    }

    async fn status_of(&self, swap_id: SwapId) -> SwapStatus {
        self.swaps
            .find_by_id(&swap_id)
            .await
            .unwrap()
            .unwrap()
            .status()
    }
}

fn identity(s: &str) -> Identity {
    Identity::new(s).unwrap()
}

// =============================================================================
// Lifecycle scenarios
// =============================================================================

#[tokio::test]
async fn request_accept_feedback_round_trip() {
    let platform = Platform::new();
    platform.register_user("user_alice", "Alice Chen").await;
    platform.register_user("user_bob", "Bob Okafor").await;

    let swap_id = platform.open_swap("user_alice", "user_bob").await;
    assert_eq!(platform.status_of(swap_id).await, SwapStatus::Pending);

    platform.accept(swap_id, "user_bob").await;
    assert_eq!(platform.status_of(swap_id).await, SwapStatus::Accepted);

    // Both sides leave feedback; each rates the other party.
    platform
        .feedback
        .handle(SubmitFeedbackCommand {
            swap_id,
            caller: identity("user_alice"),
            feedback: "Patient teacher".to_string(),
            rating: 5,
        })
        .await
        .unwrap();
    platform
        .feedback
        .handle(SubmitFeedbackCommand {
            swap_id,
            caller: identity("user_bob"),
            feedback: "Quick learner".to_string(),
            rating: 4,
        })
        .await
        .unwrap();

    let bob = platform
        .directory
        .find_by_identity(&identity("user_bob"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bob.ratings().len(), 1);
    assert_eq!(bob.rating(), Some(5.0));

    let alice = platform
        .directory
        .find_by_identity(&identity("user_alice"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(alice.rating(), Some(4.0));
}

#[tokio::test]
async fn duplicate_pending_request_is_rejected_but_reverse_direction_is_not() {
    let platform = Platform::new();
    platform.register_user("user_alice", "Alice Chen").await;
    platform.register_user("user_bob", "Bob Okafor").await;

    platform.open_swap("user_alice", "user_bob").await;

    let duplicate = platform
        .create
        .handle(CreateSwapCommand {
            requester: identity("user_alice"),
            receiver: identity("user_bob"),
            message: None,
        })
        .await;
    assert!(matches!(duplicate, Err(SwapError::DuplicateRequest)));

    // The same pair in the other direction is a different request.
    platform.open_swap("user_bob", "user_alice").await;
}

#[tokio::test]
async fn only_the_receiver_decides_and_only_once() {
    let platform = Platform::new();
    platform.register_user("user_alice", "Alice Chen").await;
    platform.register_user("user_bob", "Bob Okafor").await;
    let swap_id = platform.open_swap("user_alice", "user_bob").await;

    // The requester cannot accept their own request.
    let result = platform
        .respond
        .handle(RespondToSwapCommand {
            swap_id,
            caller: identity("user_alice"),
            decision: SwapDecision::Accept,
        })
        .await;
    assert!(matches!(result, Err(SwapError::Forbidden(_))));

    platform.accept(swap_id, "user_bob").await;

    // A second decision finds the swap no longer pending.
    let again = platform
        .respond
        .handle(RespondToSwapCommand {
            swap_id,
            caller: identity("user_bob"),
            decision: SwapDecision::Accept,
        })
        .await;
    assert!(matches!(again, Err(SwapError::InvalidState(_))));
}

#[tokio::test]
async fn cancellation_belongs_to_the_requester() {
    let platform = Platform::new();
    platform.register_user("user_alice", "Alice Chen").await;
    platform.register_user("user_bob", "Bob Okafor").await;
    let swap_id = platform.open_swap("user_alice", "user_bob").await;

    let by_receiver = platform
        .cancel
        .handle(CancelSwapCommand {
            swap_id,
            caller: identity("user_bob"),
        })
        .await;
    assert!(matches!(by_receiver, Err(SwapError::Forbidden(_))));

    platform
        .cancel
        .handle(CancelSwapCommand {
            swap_id,
            caller: identity("user_alice"),
        })
        .await
        .unwrap();
    assert_eq!(platform.status_of(swap_id).await, SwapStatus::Cancelled);

    // Cancelled is terminal; nobody can accept it anymore.
    let late = platform
        .respond
        .handle(RespondToSwapCommand {
            swap_id,
            caller: identity("user_bob"),
            decision: SwapDecision::Accept,
        })
        .await;
    assert!(matches!(late, Err(SwapError::InvalidState(_))));
}

#[tokio::test]
async fn requests_against_unknown_receivers_fail() {
    let platform = Platform::new();
    platform.register_user("user_alice", "Alice Chen").await;

    let result = platform
        .create
        .handle(CreateSwapCommand {
            requester: identity("user_alice"),
            receiver: identity("user_ghost"),
            message: None,
        })
        .await;
    assert!(matches!(result, Err(SwapError::UserNotFound(_))));
}

#[tokio::test]
async fn history_listing_joins_participant_names_newest_first() {
    let platform = Platform::new();
    platform.register_user("user_alice", "Alice Chen").await;
    platform.register_user("user_bob", "Bob Okafor").await;
    platform.register_user("user_carol", "Carol Reyes").await;

    let first = platform.open_swap("user_alice", "user_bob").await;
    let second = platform.open_swap("user_carol", "user_alice").await;

    let result = platform
        .list
        .handle(ListUserSwapsQuery {
            identity: identity("user_alice"),
        })
        .await
        .unwrap();

    assert_eq!(result.swaps.len(), 2);
    assert_eq!(result.swaps[0].swap.id(), &second);
    assert_eq!(result.swaps[1].swap.id(), &first);
    assert_eq!(
        result.swaps[0].requester_name.as_deref(),
        Some("Carol Reyes")
    );
    assert_eq!(result.swaps[1].receiver_name.as_deref(), Some("Bob Okafor"));
}

#[tokio::test]
async fn ratings_accumulate_across_swaps() {
    let platform = Platform::new();
    platform.register_user("user_alice", "Alice Chen").await;
    platform.register_user("user_bob", "Bob Okafor").await;
    platform.register_user("user_carol", "Carol Reyes").await;

    // Two different requesters trade with Bob and rate him 5 and 2.
    for (requester, rating) in [("user_alice", 5), ("user_carol", 2)] {
        let swap_id = platform.open_swap(requester, "user_bob").await;
        platform.accept(swap_id, "user_bob").await;
        platform
            .feedback
            .handle(SubmitFeedbackCommand {
                swap_id,
                caller: identity(requester),
                feedback: "Done".to_string(),
                rating,
            })
            .await
            .unwrap();
    }

    let bob = platform
        .directory
        .find_by_identity(&identity("user_bob"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(bob.ratings().len(), 2);
    assert_eq!(bob.rating(), Some(3.5));
}

// =============================================================================
// Moderation scenarios
// =============================================================================

#[tokio::test]
async fn banning_a_user_writes_an_audit_entry() {
    let platform = Platform::new();
    platform.seed_admin("user_root").await;
    platform.register_user("user_mallory", "Mallory Vane").await;

    let moderate = ModerateUserHandler::new(platform.directory.clone(), platform.audit_log.clone());
    moderate
        .handle(ModerateUserCommand {
            caller: identity("user_root"),
            target: identity("user_mallory"),
            action: UserModeration::Ban,
            reason: Some("spam".to_string()),
        })
        .await
        .unwrap();

    let mallory = platform
        .directory
        .find_by_identity(&identity("user_mallory"))
        .await
        .unwrap()
        .unwrap();
    assert!(mallory.is_banned());

    let audit = GetAuditLogHandler::new(platform.directory.clone(), platform.audit_log.clone());
    let log = audit
        .handle(GetAuditLogQuery {
            caller: identity("user_root"),
            skip: None,
            limit: None,
        })
        .await
        .unwrap();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].target_id(), "user_mallory");
    assert_eq!(log[0].reason(), Some("spam"));
}

#[tokio::test]
async fn moderation_requires_the_admin_role() {
    let platform = Platform::new();
    platform.register_user("user_alice", "Alice Chen").await;
    platform.register_user("user_bob", "Bob Okafor").await;

    let moderate = ModerateUserHandler::new(platform.directory.clone(), platform.audit_log.clone());
    let result = moderate
        .handle(ModerateUserCommand {
            caller: identity("user_alice"),
            target: identity("user_bob"),
            action: UserModeration::Ban,
            reason: None,
        })
        .await;
    assert!(matches!(result, Err(AdminError::NotAdmin)));
}

#[tokio::test]
async fn platform_stats_count_swaps_by_status() {
    let platform = Platform::new();
    platform.seed_admin("user_root").await;
    platform.register_user("user_alice", "Alice Chen").await;
    platform.register_user("user_bob", "Bob Okafor").await;
    platform.register_user("user_carol", "Carol Reyes").await;

    let accepted = platform.open_swap("user_alice", "user_bob").await;
    platform.accept(accepted, "user_bob").await;
    platform.open_swap("user_carol", "user_bob").await;

    let stats_handler =
        GetPlatformStatsHandler::new(platform.swaps.clone(), platform.directory.clone());
    let stats = stats_handler
        .handle(GetPlatformStatsQuery {
            caller: identity("user_root"),
        })
        .await
        .unwrap();

    assert_eq!(stats.total_users, 4);
    assert_eq!(stats.total_swaps, 2);
    assert_eq!(stats.pending_swaps, 1);
    assert_eq!(stats.accepted_swaps, 1);
    assert_eq!(stats.swaps_last_30_days, 2);
}
