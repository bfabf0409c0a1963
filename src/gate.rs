//! The subscription gate
//!
//! One [`SubscriptionGate::check`] call per incoming message event. Gating
//! that is not configured passes through (optionally rate-limited); a
//! configured channel triggers a remote participant lookup, and lookup
//! failures get the localized join prompt before the caller sees the
//! [`Error::UserNotJoined`] sentinel.
//!
//! Concurrency: a check holds no locks and shares no mutable state with
//! other checks. Concurrent checks for the same user are not deduplicated;
//! each failing check sends its own notification.

use std::sync::Arc;

use tracing::{debug, info};

use crate::button::{self, JOIN_BUTTON_SLOT};
use crate::config::GateConfig;
use crate::i18n::{Localizer, TranslateRequest};
use crate::limit::TimeLimiter;
use crate::protocol::{ChatId, OutboundMessage, Participant, ProtocolClient, UpdateEvent};
use crate::{Error, Result};

/// Catalog key for the join-prompt message body
pub const FORCE_MESSAGE_KEY: &str = "force.message";
/// Catalog key for the join-prompt button label
pub const FORCE_BUTTON_KEY: &str = "force.button";

/// One gate invocation. Constructed per incoming message, not persisted.
pub struct GateRequest<'a> {
    /// Protocol client handle
    pub client: &'a dyn ProtocolClient,
    /// Triggering message event
    pub update: &'a UpdateEvent,
    /// Also run the rate-limit check
    pub check_limit: bool,
}

/// Success value of a gate check
#[derive(Debug, Clone)]
pub enum GateOutcome {
    /// Gating is not configured; the caller may proceed
    Inactive,
    /// Membership confirmed; carries the remote participant record
    Member(Participant),
}

/// Force-subscription gate
pub struct SubscriptionGate {
    config: GateConfig,
    limiter: Arc<dyn TimeLimiter>,
    localizer: Arc<dyn Localizer>,
}

impl SubscriptionGate {
    /// Create a gate over the given collaborators.
    #[must_use]
    pub fn new(
        config: GateConfig,
        limiter: Arc<dyn TimeLimiter>,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            config,
            limiter,
            localizer,
        }
    }

    /// Run the gate for one incoming message.
    ///
    /// Returns [`GateOutcome::Inactive`] when gating is not configured and
    /// [`GateOutcome::Member`] when the participant lookup succeeds. A
    /// failed lookup sends the localized join prompt as a reply to the
    /// triggering message and returns [`Error::UserNotJoined`].
    ///
    /// # Errors
    ///
    /// - [`Error::TimeLimitExceeded`] from the limiter, re-raised verbatim;
    ///   the notification path is never entered for it
    /// - [`Error::UserNotJoined`] after the join prompt has been delivered
    /// - translation and delivery errors from the failure path propagate
    ///   as-is
    pub async fn check(&self, request: GateRequest<'_>) -> Result<GateOutcome> {
        let update = request.update;

        // Neither gating branch configured: nothing to enforce.
        if !self.config.is_active() {
            self.enforce_limit(request.check_limit, update.chat_id)
                .await?;
            return Ok(GateOutcome::Inactive);
        }

        let Some(channel) = &self.config.force_sub_channel else {
            // request_url alone has no channel to check membership against;
            // treat the gate as inactive instead of taking neither branch.
            debug!(
                chat = %update.chat_id,
                "request_url set without force_sub_channel, gate inactive"
            );
            self.enforce_limit(request.check_limit, update.chat_id)
                .await?;
            return Ok(GateOutcome::Inactive);
        };

        match request
            .client
            .get_participant(channel, update.chat_id)
            .await
        {
            Ok(participant) => {
                self.enforce_limit(request.check_limit, update.chat_id)
                    .await?;
                Ok(GateOutcome::Member(participant))
            }
            // A limiter error surfacing through the lookup must never be
            // reported as a membership failure.
            Err(err) if err.is_rate_limit() => Err(err),
            Err(err) => self.notify_and_reject(request.client, update, &err).await,
        }
    }

    async fn enforce_limit(&self, check_limit: bool, user: ChatId) -> Result<()> {
        if check_limit {
            self.limiter.check(user).await
        } else {
            Ok(())
        }
    }

    /// Failure path: localized join prompt as a reply, one log entry, then
    /// the not-joined sentinel.
    async fn notify_and_reject(
        &self,
        client: &dyn ProtocolClient,
        update: &UpdateEvent,
        cause: &Error,
    ) -> Result<GateOutcome> {
        let force_url = self
            .config
            .force_url
            .as_ref()
            .ok_or_else(|| Error::Config("force_url is required for the join prompt".to_string()))?;

        let lang_code = self.localizer.resolve_language(update.chat_id).await?;
        let translated = self
            .localizer
            .translate(TranslateRequest {
                text_key: FORCE_MESSAGE_KEY.to_string(),
                button_key: FORCE_BUTTON_KEY.to_string(),
                lang_code,
            })
            .await?;

        let join_button = button::layout(
            button::inject(&translated.button, force_url),
            JOIN_BUTTON_SLOT,
        );
        let markup = client.build_reply_markup(vec![vec![join_button]]);

        client
            .send_message(
                update.chat_id,
                OutboundMessage {
                    text: translated.text,
                    reply_markup: Some(markup),
                    reply_to: Some(update.message_id),
                },
            )
            .await?;

        // Log the underlying error, not the translated text.
        info!(chat = %update.chat_id, "gate rejected: {cause}");

        Err(Error::user_not_joined())
    }
}
