//! Configuration management

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::protocol::ChannelRef;
use crate::{Error, Result};

/// Gate configuration
///
/// Read-only for the duration of a check. Configuration reload replaces the
/// whole struct; nothing mutates it in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Channel users must have joined before their action proceeds.
    /// Gating is inactive when unset.
    pub force_sub_channel: Option<ChannelRef>,
    /// Join-request landing URL. On its own (without `force_sub_channel`)
    /// there is no channel to check membership against, so the gate stays
    /// inactive; see [`SubscriptionGate::check`](crate::SubscriptionGate::check).
    pub request_url: Option<Url>,
    /// URL injected into the join-prompt button
    pub force_url: Option<Url>,
    /// Rate limiter configuration
    pub limit: LimitConfig,
}

/// Rate limiter configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitConfig {
    /// Enable the bundled per-user limiter
    pub enabled: bool,
    /// Allowed gate checks per user per minute (0 = unlimited)
    pub requests_per_minute: u32,
}

impl Default for LimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            requests_per_minute: 20,
        }
    }
}

impl GateConfig {
    /// Load configuration from an optional YAML file plus environment
    /// variables (`SUBGATE_` prefix, `__` as the section separator).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new();

        if let Some(p) = path {
            if !p.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            figment = figment.merge(Yaml::file(p));
        }

        figment = figment.merge(Env::prefixed("SUBGATE_").split("__"));

        let config: Self = figment
            .extract()
            .map_err(|e| Error::Config(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Whether any gating branch is configured
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.force_sub_channel.is_some() || self.request_url.is_some()
    }

    /// Reject configurations the gate cannot act on.
    pub fn validate(&self) -> Result<()> {
        if self.force_sub_channel.is_some() && self.force_url.is_none() {
            return Err(Error::Config(
                "force_sub_channel requires force_url for the join prompt".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[test]
    fn test_defaults_are_inactive() {
        let config = GateConfig::default();

        assert!(!config.is_active());
        assert!(config.force_sub_channel.is_none());
        assert!(config.limit.enabled);
        assert_eq!(config.limit.requests_per_minute, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_yaml() {
        let mut file = tempfile::NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            file,
            "force_sub_channel: \"@mychannel\"\n\
             force_url: \"https://t.me/mychannel\"\n\
             limit:\n  enabled: false\n  requests_per_minute: 5"
        )
        .unwrap();

        let config = GateConfig::load(Some(file.path())).unwrap();

        assert_eq!(
            config.force_sub_channel,
            Some(ChannelRef("@mychannel".to_string()))
        );
        assert_eq!(
            config.force_url.as_ref().map(Url::as_str),
            Some("https://t.me/mychannel")
        );
        assert!(!config.limit.enabled);
        assert_eq!(config.limit.requests_per_minute, 5);
        assert!(config.is_active());
    }

    #[test]
    fn test_env_overrides_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "gate.yaml",
                "force_sub_channel: \"@mychannel\"\n\
                 force_url: \"https://t.me/mychannel\"\n\
                 limit:\n  requests_per_minute: 5\n",
            )?;
            jail.set_env("SUBGATE_LIMIT__REQUESTS_PER_MINUTE", "9");
            jail.set_env("SUBGATE_FORCE_URL", "https://t.me/other");

            let config = GateConfig::load(Some(Path::new("gate.yaml"))).unwrap();

            // Environment wins over the file for both scalar kinds.
            assert_eq!(config.limit.requests_per_minute, 9);
            assert_eq!(
                config.force_url.as_ref().map(Url::as_str),
                Some("https://t.me/other")
            );
            // Untouched file values survive the overlay.
            assert_eq!(
                config.force_sub_channel,
                Some(ChannelRef("@mychannel".to_string()))
            );
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = GateConfig::load(Some(Path::new("/nonexistent/gate.yaml")));

        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_channel_without_force_url_rejected() {
        let config = GateConfig {
            force_sub_channel: Some(ChannelRef::from("@mychannel")),
            ..GateConfig::default()
        };

        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_request_url_only_is_active() {
        let config = GateConfig {
            request_url: Some(Url::parse("https://t.me/+abc123").unwrap()),
            ..GateConfig::default()
        };

        assert!(config.is_active());
        assert!(config.validate().is_ok());
    }
}
