//! Tool configuration
//!
//! Supplied once when the tool is constructed and never changed afterwards.
//! Read from `~/.config/inline-link/config.yaml`; every key is optional.
//!
//! ```yaml
//! shortcut: CMD+K
//! placeholder: Paste a link
//! targets: [_self, _blank]
//! defaultTarget: _blank
//! relations: ["", nofollow, noopener]
//! defaultRelation: nofollow
//! validate: true
//! ```

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

/// Link tool configuration
///
/// `targets`/`relations` left unset mean "all supported values"; defaults
/// left unset resolve silently to the global defaults (see
/// [`crate::options::ResolvedOptions`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolConfig {
    /// Keyboard shortcut advertised to the host
    #[serde(default = "default_shortcut")]
    pub shortcut: String,
    /// URL input placeholder
    #[serde(default = "default_placeholder")]
    pub placeholder: String,
    /// Allowed window targets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub targets: Option<Vec<String>>,
    /// Preselected window target
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_target: Option<String>,
    /// Allowed `rel` values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relations: Option<Vec<String>>,
    /// Preselected `rel` value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_relation: Option<String>,
    /// Whether the URL syntax check runs on submit
    #[serde(default = "default_validate")]
    pub validate: bool,
}

fn default_shortcut() -> String {
    "CMD+L".to_string()
}

fn default_placeholder() -> String {
    "Enter URL".to_string()
}

fn default_validate() -> bool {
    true
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            shortcut: default_shortcut(),
            placeholder: default_placeholder(),
            targets: None,
            default_target: None,
            relations: None,
            default_relation: None,
            validate: default_validate(),
        }
    }
}

impl ToolConfig {
    /// Load config from the user config dir, or return defaults
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::config_file() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };

        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{:#}", e);
                Self::default()
            }
        }
    }

    /// Load config from an explicit path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config at {}", path.display()))?;
        Self::from_yaml(&content)
            .with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> anyhow::Result<Self> {
        // An empty document deserializes to null; treat it as all-defaults
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn with_targets<I, S>(mut self, targets: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.targets = Some(targets.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_default_target(mut self, target: impl Into<String>) -> Self {
        self.default_target = Some(target.into());
        self
    }

    pub fn with_relations<I, S>(mut self, relations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.relations = Some(relations.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_default_relation(mut self, relation: impl Into<String>) -> Self {
        self.default_relation = Some(relation.into());
        self
    }

    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }
}
