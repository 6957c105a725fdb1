//! Behavior configuration.
//!
//! Loaded from `config.toml` in the site directory. The stock defaults are
//! the base layer; a user file only needs the keys it overrides.
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [carousel]
//! autoplay_ms = 3000        # Period between automatic slide advances
//!
//! [copy]
//! feedback_ms = 1600        # How long "Copied!" stays visible
//! copied_label = "Copied!"
//!
//! [dialog]
//! features_placeholder = "Details coming soon."
//! skills_placeholder = "Skills list coming soon."
//! summary_placeholder = "More info coming soon."
//! project_title = "Project"
//! highlight_title = "Highlight"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::types::Millis;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BehaviorConfig {
    pub carousel: CarouselConfig,
    pub copy: CopyConfig,
    pub dialog: DialogTexts,
}

impl BehaviorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.carousel.autoplay_ms == 0 {
            return Err(ConfigError::Validation(
                "carousel.autoplay_ms must be greater than zero".into(),
            ));
        }
        if self.copy.feedback_ms == 0 {
            return Err(ConfigError::Validation(
                "copy.feedback_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CarouselConfig {
    pub autoplay_ms: Millis,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self { autoplay_ms: 3000 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CopyConfig {
    pub feedback_ms: Millis,
    pub copied_label: String,
}

impl Default for CopyConfig {
    fn default() -> Self {
        Self {
            feedback_ms: 1600,
            copied_label: "Copied!".to_string(),
        }
    }
}

/// Fallback strings used when a record or card leaves something out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DialogTexts {
    pub features_placeholder: String,
    pub skills_placeholder: String,
    pub summary_placeholder: String,
    pub project_title: String,
    pub highlight_title: String,
}

impl Default for DialogTexts {
    fn default() -> Self {
        Self {
            features_placeholder: "Details coming soon.".to_string(),
            skills_placeholder: "Skills list coming soon.".to_string(),
            summary_placeholder: "More info coming soon.".to_string(),
            project_title: "Project".to_string(),
            highlight_title: "Highlight".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock defaults as a `toml::Value::Table`, the base layer for merging.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(BehaviorConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// Tables merge key by key; any other overlay value replaces the base value.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                let merged = match table.remove(&key) {
                    Some(existing) => merge_toml(existing, value),
                    None => value,
                };
                table.insert(key, merged);
            }
            toml::Value::Table(table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from `site_dir`, falling back to stock defaults when
/// the file does not exist.
pub fn load_config(site_dir: &Path) -> Result<BehaviorConfig, ConfigError> {
    let path = site_dir.join("config.toml");
    let merged = if path.exists() {
        let overlay: toml::Value = toml::from_str(&fs::read_to_string(&path)?)?;
        merge_toml(stock_defaults_value(), overlay)
    } else {
        stock_defaults_value()
    };
    let config: BehaviorConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// A fully commented stock `config.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# folio-behavior configuration
# ============================
# Every key is optional. Values shown are the defaults.

[carousel]
# Milliseconds between automatic slide advances. Manual prev/next presses
# restart the countdown.
autoplay_ms = 3000

[copy]
# How long copy chips show their confirmation, in milliseconds.
feedback_ms = 1600
copied_label = "Copied!"

[dialog]
# Shown as the single list entry when a record has no features.
features_placeholder = "Details coming soon."
# Shown instead of skill tags when a record has none.
skills_placeholder = "Skills list coming soon."
# Project summary when neither the record nor the card supplies one.
summary_placeholder = "More info coming soon."
# Titles used when neither the record nor the card supplies one.
project_title = "Project"
highlight_title = "Highlight"
"##
}
