//! Join-prompt button construction
//!
//! Button labels come out of the translation catalog as templates without a
//! target; the gate injects the configured join URL and pins the result to a
//! reserved layout slot so other rendered buttons cannot collide with it.

use serde::{Deserialize, Serialize};
use url::Url;

/// Layout slot reserved for the join button among any other rendered buttons
pub const JOIN_BUTTON_SLOT: &str = "11";

/// Button label template as stored in the translation catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonTemplate {
    /// Translated visible label
    pub label: String,
}

/// Concrete, clickable button descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    /// Visible label
    pub label: String,
    /// Target URL
    pub url: String,
    /// Display slot, assigned by [`layout`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<String>,
}

/// Inject a concrete URL into a translated button template.
#[must_use]
pub fn inject(template: &ButtonTemplate, url: &Url) -> Button {
    Button {
        label: template.label.clone(),
        url: url.to_string(),
        slot: None,
    }
}

/// Pin a button to a display slot.
#[must_use]
pub fn layout(mut button: Button, slot: &str) -> Button {
    button.slot = Some(slot.to_string());
    button
}
