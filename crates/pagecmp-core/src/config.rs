//! Comparison configuration.
//!
//! [`CompareConfig`] controls which subtrees the walker ignores and a few
//! reporting policies. It deserializes from TOML so the CLI can load it from
//! a file; every field has a default, so an empty file is valid.
//!
//! ```toml
//! excluded_tags = ["script", "style", "noscript"]
//! annotation_container_id = "pce-ui-container"
//! report_unnamed_images = true
//! detect_removals = true
//! ```

use crate::errors::{PageCmpError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Element id of the injected summary panel; its text must never be diffed.
pub const DEFAULT_ANNOTATION_CONTAINER_ID: &str = "pce-ui-container";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CompareConfig {
    /// Tag names whose subtrees contribute no text (matched case-insensitively).
    pub excluded_tags: Vec<String>,

    /// Element id of the annotation UI container, excluded like `excluded_tags`.
    pub annotation_container_id: String,

    /// Report an image whose `src`/`srcset` yield no filename at all.
    ///
    /// An image that is present but unparseable is itself a change signal,
    /// so this defaults to `true`.
    pub report_unnamed_images: bool,

    /// Run the removal pass (source texts and links missing from current).
    pub detect_removals: bool,
}

impl Default for CompareConfig {
    fn default() -> Self {
        Self {
            excluded_tags: vec!["script".to_string(), "style".to_string()],
            annotation_container_id: DEFAULT_ANNOTATION_CONTAINER_ID.to_string(),
            report_unnamed_images: true,
            detect_removals: true,
        }
    }
}

impl CompareConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// - `ConfigParse`: the text is not valid TOML or has unknown keys
    /// - `InvalidConfig`: see [`CompareConfig::validate`]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: CompareConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    ///
    /// # Errors
    ///
    /// - `Io`: the file cannot be read
    /// - anything [`CompareConfig::from_toml_str`] returns
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| PageCmpError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject blank tag names and a blank container id.
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the offending field.
    pub fn validate(&self) -> Result<()> {
        if let Some(pos) = self.excluded_tags.iter().position(|t| t.trim().is_empty()) {
            return Err(PageCmpError::InvalidConfig {
                reason: format!("excluded_tags[{}] is blank", pos),
            });
        }
        if self.annotation_container_id.trim().is_empty() {
            return Err(PageCmpError::InvalidConfig {
                reason: "annotation_container_id is blank".to_string(),
            });
        }
        Ok(())
    }

    /// True if `tag` names an excluded subtree.
    pub fn is_excluded_tag(&self, tag: &str) -> bool {
        self.excluded_tags
            .iter()
            .any(|t| t.trim().eq_ignore_ascii_case(tag))
    }
}
