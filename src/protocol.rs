//! Chat protocol client seam
//!
//! The gate consumes the chat protocol through the narrow [`ProtocolClient`]
//! trait; connection management, authentication, and delivery mechanics all
//! live behind it.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::Result;
use crate::button::Button;

/// Chat identifier. In private chats this doubles as the user id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChatId(pub i64);

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Message identifier within a chat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub i64);

/// Channel reference: numeric id or public handle like `@mychannel`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelRef(pub String);

impl fmt::Display for ChannelRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChannelRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Incoming message descriptor. Owned by the caller; the gate only reads it.
#[derive(Debug, Clone, Copy)]
pub struct UpdateEvent {
    /// Originating chat
    pub chat_id: ChatId,
    /// Triggering message, used as the reply target for the join prompt
    pub message_id: MessageId,
}

/// Membership record returned by a successful participant lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    /// The user the record describes
    pub user: ChatId,
    /// Channel the membership was checked against
    pub channel: ChannelRef,
    /// Raw provider payload, passed through untouched
    #[serde(default)]
    pub raw: Value,
}

/// Inline keyboard attached to an outbound message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyMarkup {
    /// Button rows, outermost vec is rows top to bottom
    pub rows: Vec<Vec<Button>>,
}

/// Outbound chat message
#[derive(Debug, Clone)]
pub struct OutboundMessage {
    /// Message body
    pub text: String,
    /// Optional inline keyboard
    pub reply_markup: Option<ReplyMarkup>,
    /// Message this one replies to
    pub reply_to: Option<MessageId>,
}

/// Client handle for the chat protocol
#[async_trait]
pub trait ProtocolClient: Send + Sync {
    /// Look up a user's membership in a channel.
    ///
    /// # Errors
    ///
    /// Rejects on non-membership, missing permissions, or network faults;
    /// the gate treats any rejection as a membership failure.
    async fn get_participant(&self, channel: &ChannelRef, user: ChatId) -> Result<Participant>;

    /// Send a message to a chat, returning the delivered message id.
    async fn send_message(&self, chat: ChatId, message: OutboundMessage) -> Result<MessageId>;

    /// Assemble reply markup from button rows.
    fn build_reply_markup(&self, rows: Vec<Vec<Button>>) -> ReplyMarkup {
        ReplyMarkup { rows }
    }
}
