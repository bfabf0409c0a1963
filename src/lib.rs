//! Subscription Gate Library
//!
//! Force-subscription ("join our channel first") gating for chat bots:
//! before a user's action proceeds, the gate verifies channel membership and
//! optionally enforces a per-user rate limit.
//!
//! # Features
//!
//! - **Membership gating**: remote participant lookup against a configured
//!   channel, with an explicit inactive mode when gating is not configured
//! - **Rate limiting**: optional per-user quota via a pluggable limiter seam
//! - **Localized join prompts**: rejected users get a translated reply with
//!   a join button pinned to a stable layout slot
//! - **Typed failures**: rate-limit and not-joined conditions are distinct
//!   error variants, never conflated
//!
//! The chat protocol itself, translation storage, and the enclosing bot are
//! out of scope; they plug in through the [`protocol::ProtocolClient`],
//! [`i18n::Localizer`], and [`limit::TimeLimiter`] traits.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod button;
pub mod config;
pub mod error;
pub mod gate;
pub mod i18n;
pub mod limit;
pub mod protocol;

pub use config::GateConfig;
pub use error::{Error, Result};
pub use gate::{GateOutcome, GateRequest, SubscriptionGate};

use tracing_subscriber::EnvFilter;

/// Install a default tracing subscriber for the embedding application.
///
/// Honors `RUST_LOG` when set, falling back to `level`. Does nothing when a
/// global subscriber is already installed, so bots that configure their own
/// logging keep it.
pub fn setup_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_tracing_tolerates_existing_subscriber() {
        setup_tracing("debug");
        // A second call must not panic on the already-installed subscriber.
        setup_tracing("info");
    }
}
