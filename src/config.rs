use crate::error::PersistenceError;
use serde::{Deserialize, Serialize};
use std::fs;

/// Settings shared by an editing or visitor session.
///
/// Every field has a default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Prefix for ids generated by `FlowEditor::add_step`.
    pub step_id_prefix: String,
    /// Text given to a freshly added step.
    pub placeholder_text: String,
    /// Label given to a freshly added option.
    pub placeholder_option_label: String,
    /// Number opened by the `whatsapp_action` sentinel, in any common notation.
    pub whatsapp_number: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            step_id_prefix: "step_".to_string(),
            placeholder_text: "New message...".to_string(),
            placeholder_option_label: "New option".to_string(),
            whatsapp_number: None,
        }
    }
}

impl EngineConfig {
    /// Load a config from a JSON file.
    pub fn from_file(path: &str) -> Result<Self, PersistenceError> {
        let content = fs::read_to_string(path).map_err(|e| PersistenceError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        serde_json::from_str(json).map_err(|e| PersistenceError::Decode(e.to_string()))
    }

    /// The `wa.me` deep link for the configured number, digits only.
    pub fn whatsapp_url(&self) -> Option<String> {
        let digits: String = self
            .whatsapp_number
            .as_deref()?
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        if digits.is_empty() {
            None
        } else {
            Some(format!("https://wa.me/{}", digits))
        }
    }
}
