//! Platform-wide broadcast messages.
//!
//! Broadcasts are stored, not delivered; a notification pipeline can
//! pick them up later.

use crate::domain::foundation::{BroadcastId, DomainError, Identity, Timestamp, ValidationError};

/// Maximum length for broadcast titles.
pub const MAX_TITLE_LENGTH: usize = 200;

/// Maximum length for broadcast messages.
pub const MAX_BODY_LENGTH: usize = 5000;

/// One platform-wide announcement.
#[derive(Debug, Clone, PartialEq)]
pub struct Broadcast {
    id: BroadcastId,
    title: String,
    message: String,
    /// The admin who sent it.
    sent_by: Identity,
    created_at: Timestamp,
}

impl Broadcast {
    /// Create a new broadcast stamped now.
    ///
    /// # Errors
    ///
    /// - `EmptyField` / `OutOfRange` if title or message fail validation
    pub fn new(
        id: BroadcastId,
        title: String,
        message: String,
        sent_by: Identity,
    ) -> Result<Self, DomainError> {
        if title.trim().is_empty() {
            return Err(ValidationError::empty_field("title").into());
        }
        if title.len() > MAX_TITLE_LENGTH {
            return Err(ValidationError::out_of_range(
                "title",
                1,
                MAX_TITLE_LENGTH as i32,
                title.len() as i32,
            )
            .into());
        }
        if message.trim().is_empty() {
            return Err(ValidationError::empty_field("message").into());
        }
        if message.len() > MAX_BODY_LENGTH {
            return Err(ValidationError::out_of_range(
                "message",
                1,
                MAX_BODY_LENGTH as i32,
                message.len() as i32,
            )
            .into());
        }
        Ok(Self {
            id,
            title,
            message,
            sent_by,
            created_at: Timestamp::now(),
        })
    }

    /// Reconstitute a broadcast from persistence.
    pub fn reconstitute(
        id: BroadcastId,
        title: String,
        message: String,
        sent_by: Identity,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            title,
            message,
            sent_by,
            created_at,
        }
    }

    pub fn id(&self) -> &BroadcastId {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn sent_by(&self) -> &Identity {
        &self.sent_by
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> Identity {
        Identity::new("user_admin").unwrap()
    }

    #[test]
    fn new_broadcast_keeps_title_and_sender() {
        let broadcast = Broadcast::new(
            BroadcastId::new(),
            "Maintenance window".to_string(),
            "The platform is read-only on Sunday night.".to_string(),
            admin(),
        )
        .unwrap();
        assert_eq!(broadcast.title(), "Maintenance window");
        assert_eq!(broadcast.sent_by(), &admin());
    }

    #[test]
    fn empty_title_is_rejected() {
        let result = Broadcast::new(
            BroadcastId::new(),
            "   ".to_string(),
            "body".to_string(),
            admin(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn empty_message_is_rejected() {
        let result = Broadcast::new(
            BroadcastId::new(),
            "title".to_string(),
            String::new(),
            admin(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn oversized_title_is_rejected() {
        let result = Broadcast::new(
            BroadcastId::new(),
            "t".repeat(MAX_TITLE_LENGTH + 1),
            "body".to_string(),
            admin(),
        );
        assert!(result.is_err());
    }
}
