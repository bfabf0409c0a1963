//! Per-user rate limiting
//!
//! The gate consumes the limiter through the [`TimeLimiter`] seam so the
//! enclosing bot can supply its own policy. [`GovernorLimiter`] is the
//! bundled implementation: one direct `governor` limiter per user, created
//! lazily on first check.

use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};

use crate::config::LimitConfig;
use crate::protocol::ChatId;
use crate::{Error, Result};

/// Type alias for a single user's limiter
type UserRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Rate-limit collaborator seam
#[async_trait]
pub trait TimeLimiter: Send + Sync {
    /// Check whether `user` may proceed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::TimeLimitExceeded`] when the user's quota is
    /// exhausted. The gate re-raises that verbatim, never as a membership
    /// failure.
    async fn check(&self, user: ChatId) -> Result<()>;
}

/// Keyed per-user limiter backed by `governor`
pub struct GovernorLimiter {
    quota: Option<Quota>,
    limiters: DashMap<ChatId, Arc<UserRateLimiter>>,
}

impl GovernorLimiter {
    /// Create a limiter from config. A disabled section or a zero quota
    /// yields a limiter that always allows.
    #[must_use]
    pub fn new(config: &LimitConfig) -> Self {
        let quota = if config.enabled {
            NonZeroU32::new(config.requests_per_minute).map(Quota::per_minute)
        } else {
            None
        };

        Self {
            quota,
            limiters: DashMap::new(),
        }
    }
}

#[async_trait]
impl TimeLimiter for GovernorLimiter {
    async fn check(&self, user: ChatId) -> Result<()> {
        let Some(quota) = self.quota else {
            return Ok(());
        };

        let limiter = self
            .limiters
            .entry(user)
            .or_insert_with(|| Arc::new(RateLimiter::direct(quota)))
            .clone();

        limiter
            .check()
            .map_err(|_| Error::TimeLimitExceeded { user })
    }
}
