//! Localization seam and in-memory catalog
//!
//! The gate asks its [`Localizer`] for a chat's language and the translated
//! join-prompt strings. [`StaticCatalog`] is the bundled implementation:
//! per-language `HashMap` tables with a fallback language, plus a runtime
//! registry of per-chat language preferences.

use std::collections::HashMap;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::button::ButtonTemplate;
use crate::protocol::ChatId;
use crate::{Error, Result};

/// Translation lookup request
#[derive(Debug, Clone)]
pub struct TranslateRequest {
    /// Catalog key for the message body
    pub text_key: String,
    /// Catalog key for the button label
    pub button_key: String,
    /// Resolved language code
    pub lang_code: String,
}

/// Resolved translation pair, flattened to plain strings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translated {
    /// Message body
    pub text: String,
    /// Button label template
    pub button: ButtonTemplate,
}

/// Localization collaborator seam
#[async_trait]
pub trait Localizer: Send + Sync {
    /// Resolve a chat's preferred language code.
    async fn resolve_language(&self, chat: ChatId) -> Result<String>;

    /// Fetch the translated message body and button label.
    async fn translate(&self, req: TranslateRequest) -> Result<Translated>;
}

/// In-memory translation catalog with a fallback language
pub struct StaticCatalog {
    tables: HashMap<String, HashMap<String, String>>,
    fallback: String,
    preferences: DashMap<ChatId, String>,
}

impl StaticCatalog {
    /// Create an empty catalog resolving every chat to `fallback`.
    #[must_use]
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            tables: HashMap::new(),
            fallback: fallback.into(),
            preferences: DashMap::new(),
        }
    }

    /// Add a language table.
    #[must_use]
    pub fn with_table(mut self, lang: impl Into<String>, entries: HashMap<String, String>) -> Self {
        self.tables.insert(lang.into(), entries);
        self
    }

    /// Register a chat's language preference.
    pub fn set_language(&self, chat: ChatId, lang: impl Into<String>) {
        self.preferences.insert(chat, lang.into());
    }

    /// Look up a key in `lang`, falling back to the fallback language table.
    fn lookup(&self, lang: &str, key: &str) -> Option<&str> {
        self.tables
            .get(lang)
            .and_then(|table| table.get(key))
            .or_else(|| {
                self.tables
                    .get(&self.fallback)
                    .and_then(|table| table.get(key))
            })
            .map(String::as_str)
    }
}

#[async_trait]
impl Localizer for StaticCatalog {
    async fn resolve_language(&self, chat: ChatId) -> Result<String> {
        Ok(self
            .preferences
            .get(&chat)
            .map_or_else(|| self.fallback.clone(), |lang| lang.value().clone()))
    }

    async fn translate(&self, req: TranslateRequest) -> Result<Translated> {
        let text = self
            .lookup(&req.lang_code, &req.text_key)
            .ok_or_else(|| Error::Translation(format!("missing key: {}", req.text_key)))?
            .to_string();
        let button = self
            .lookup(&req.lang_code, &req.button_key)
            .ok_or_else(|| Error::Translation(format!("missing key: {}", req.button_key)))?
            .to_string();

        Ok(Translated {
            text,
            button: ButtonTemplate { label: button },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> StaticCatalog {
        StaticCatalog::new("en")
            .with_table(
                "en",
                HashMap::from([
                    ("force.message".to_string(), "Join our channel first".to_string()),
                    ("force.button".to_string(), "Join".to_string()),
                ]),
            )
            .with_table(
                "fa",
                HashMap::from([(
                    "force.message".to_string(),
                    "ابتدا عضو کانال شوید".to_string(),
                )]),
            )
    }

    #[tokio::test]
    async fn test_resolve_language_uses_preference() {
        let catalog = catalog();
        catalog.set_language(ChatId(1), "fa");

        assert_eq!(catalog.resolve_language(ChatId(1)).await.unwrap(), "fa");
        assert_eq!(catalog.resolve_language(ChatId(2)).await.unwrap(), "en");
    }

    #[tokio::test]
    async fn test_translate_falls_back_per_key() {
        let catalog = catalog();

        // fa has the message but not the button; the button falls back to en
        let translated = catalog
            .translate(TranslateRequest {
                text_key: "force.message".to_string(),
                button_key: "force.button".to_string(),
                lang_code: "fa".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(translated.text, "ابتدا عضو کانال شوید");
        assert_eq!(translated.button.label, "Join");
    }

    #[tokio::test]
    async fn test_missing_key_is_translation_error() {
        let catalog = catalog();

        let result = catalog
            .translate(TranslateRequest {
                text_key: "force.missing".to_string(),
                button_key: "force.button".to_string(),
                lang_code: "en".to_string(),
            })
            .await;

        assert!(matches!(result, Err(Error::Translation(_))));
    }
}
