//! Parts configuration.
//!
//! Handles loading and validating `config.toml` from the content root. The
//! configuration names the parts of the book: which top-level directories
//! count, what they are called, and in what order they are displayed.
//!
//! ## Config File
//!
//! ```toml
//! # All options are optional - defaults shown by `mdtally gen-config`
//!
//! content_root = "content"
//!
//! # One [[parts]] entry per top-level directory, in display order.
//! # Directories not listed here are skipped by the analyzer.
//! [[parts]]
//! key = "part-1-introduction"
//! title = "Part 1: Introduction"
//! subtitle = "Foundations"
//!
//! [[parts]]
//! key = "appendix"
//! title = "Appendix"
//!
//! [processing]
//! max_workers = 4    # Parallel document readers (omit for auto = CPU cores)
//! ```
//!
//! The `[[parts]]` array is the whole grouping model: its entries are the
//! closed set of recognized parts and its order is the report order. There
//! is no sorting rule beyond "as written in the file".
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
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

/// Tool configuration loaded from `config.toml`.
///
/// All fields have stock defaults; a config file need only override what it
/// wants to change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PartsConfig {
    /// Path to the content root directory.
    pub content_root: String,
    /// Recognized parts, in display order.
    pub parts: Vec<PartSpec>,
    /// Parallel document loading settings.
    pub processing: ProcessingConfig,
}

impl Default for PartsConfig {
    fn default() -> Self {
        Self {
            content_root: "content".to_string(),
            parts: stock_parts(),
            processing: ProcessingConfig::default(),
        }
    }
}

/// One configured part: a top-level directory and its display names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartSpec {
    /// Top-level directory name that documents are matched against.
    pub key: String,
    /// Display title.
    pub title: String,
    /// Short display tagline. Empty means "none".
    #[serde(default)]
    pub subtitle: String,
}

/// Parallel document loading settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel document readers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_workers: Option<usize>,
}

/// Resolve the effective worker count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_workers(processing: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    processing.max_workers.map(|n| n.min(cores)).unwrap_or(cores)
}

fn stock_parts() -> Vec<PartSpec> {
    let entries = [
        ("part-1-introduction", "Part 1: Introduction", "Foundations"),
        ("part-2-core-tools", "Part 2: Core Tools", "The Toolbox"),
        (
            "part-3-advanced-techniques",
            "Part 3: Advanced Techniques",
            "Power Use",
        ),
        ("part-4-practice", "Part 4: Practice", "Building an Agent"),
        (
            "part-5-self-driving-codebase",
            "Part 5: The Self-Driving Codebase",
            "Automation",
        ),
        ("appendix", "Appendix", "Reference"),
    ];
    entries
        .iter()
        .map(|(key, title, subtitle)| PartSpec {
            key: key.to_string(),
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        })
        .collect()
}

impl PartsConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.parts.is_empty() {
            return Err(ConfigError::Validation(
                "at least one [[parts]] entry is required".into(),
            ));
        }
        let mut seen = HashSet::new();
        for part in &self.parts {
            if part.key.is_empty() {
                return Err(ConfigError::Validation(
                    "parts.key must not be empty".into(),
                ));
            }
            if part.key.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "parts.key '{}' must be a single directory name, not a path",
                    part.key
                )));
            }
            if part.title.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "parts '{}' is missing a title",
                    part.key
                )));
            }
            if !seen.insert(part.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate parts.key '{}'",
                    part.key
                )));
            }
        }
        if self.processing.max_workers == Some(0) {
            return Err(ConfigError::Validation(
                "processing.max_workers must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Load `config.toml` from the content root, falling back to stock defaults
/// when the file does not exist.
pub fn load_config(root: &Path) -> Result<PartsConfig, ConfigError> {
    let path = root.join("config.toml");
    let config = if path.exists() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        PartsConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A documented stock `config.toml`, printed by `mdtally gen-config`.
///
/// Kept in sync with [`PartsConfig::default`]; a test parses it back and
/// compares.
pub fn stock_config_toml() -> String {
    r#"# mdtally configuration
#
# Place this file in the content root. Every option is optional; delete
# what you do not need and the stock default applies.

# Path to the content root directory.
content_root = "content"

# One [[parts]] entry per top-level directory that should be counted,
# in display order. Directories not listed here are skipped.
[[parts]]
key = "part-1-introduction"
title = "Part 1: Introduction"
subtitle = "Foundations"

[[parts]]
key = "part-2-core-tools"
title = "Part 2: Core Tools"
subtitle = "The Toolbox"

[[parts]]
key = "part-3-advanced-techniques"
title = "Part 3: Advanced Techniques"
subtitle = "Power Use"

[[parts]]
key = "part-4-practice"
title = "Part 4: Practice"
subtitle = "Building an Agent"

[[parts]]
key = "part-5-self-driving-codebase"
title = "Part 5: The Self-Driving Codebase"
subtitle = "Automation"

[[parts]]
key = "appendix"
title = "Appendix"
subtitle = "Reference"

[processing]
# Maximum parallel document readers. Omit for auto (one per CPU core).
# max_workers = 4
"#
    .to_string()
}
