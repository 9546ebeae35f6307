//! Document defaults loaded from `document.toml`.
//!
//! Everything a [`DocumentService`](crate::service::DocumentService) can be
//! told during a request can also be given up front as site-wide defaults.
//! Request code then only overrides what differs per page.
//!
//! ## Config File Location
//!
//! `document.toml` in the config directory (the current directory for the
//! CLI unless `--config` says otherwise). A missing file means stock defaults.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! public = false            # false forces robots: noindex, nofollow
//!
//! [document]
//! # title = "My Site"
//! # description = "What this site is about"
//! # author = "Jane Doe"
//! keywords = []
//! # id = "top"
//!
//! # [theme]
//! # color = "#0a0a0a"
//! # scheme = "dark light"
//! # name = "system"
//!
//! [robots]
//! # googlebot = ["index, follow"]
//!
//! [body]
//! # class = "site"
//!
//! # [[assets]]
//! # type = "stylesheet"
//! # href = "/css/site.css"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse: user values are merged over the stock defaults
//! table by table, so a file containing only
//!
//! ```toml
//! [document]
//! author = "Jane Doe"
//! ```
//!
//! keeps every other default. Unknown keys are rejected to catch typos early.

use crate::asset::Asset;
use crate::service::DocumentFields;
use crate::theme::{ColorScheme, DEFAULT_NAME, Theme};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// File name looked up in the config directory.
pub const CONFIG_FILE: &str = "document.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site-wide document defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DocumentConfig {
    /// Whether pages may be indexed. Non-public documents are forced to
    /// `noindex, nofollow`.
    pub public: bool,
    /// Title, description, author, keywords and id.
    pub document: DocumentFields,
    /// Theme meta tags. Absent means no theme tags.
    pub theme: Option<ThemeConfig>,
    /// Rules per bot. Kept as raw TOML values so a stray number or table is
    /// reported and skipped instead of rejecting the whole file.
    pub robots: BTreeMap<String, Vec<toml::Value>>,
    /// Attributes for `<body>`.
    pub body: BTreeMap<String, String>,
    /// Stylesheets, scripts and links every page gets.
    pub assets: Vec<Asset>,
}

impl DocumentConfig {
    /// Validate values serde can't check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(theme) = &self.theme {
            if theme.color.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "theme.color must not be empty".into(),
                ));
            }
        }
        if self.robots.keys().any(|bot| bot.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "robots bot names must not be empty".into(),
            ));
        }
        if self.body.keys().any(|name| name.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "body attribute names must not be empty".into(),
            ));
        }
        if let Some(asset) = self.assets.iter().find(|a| a.location().trim().is_empty()) {
            return Err(ConfigError::Validation(format!(
                "{} asset must have a non-empty location",
                asset.kind()
            )));
        }
        Ok(())
    }
}

/// `[theme]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// Primary accent color.
    pub color: String,
    /// One of the `color-scheme` values; invalid schemes fail to parse.
    #[serde(default)]
    pub scheme: ColorScheme,
    /// Theme name.
    #[serde(default = "default_theme_name")]
    pub name: String,
}

fn default_theme_name() -> String {
    DEFAULT_NAME.to_string()
}

impl ThemeConfig {
    pub fn to_theme(&self) -> Theme {
        Theme::with_scheme(&self.color, self.scheme, Some(&self.name))
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Stock defaults as a `toml::Value::Table`, the base layer user files are
/// merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(DocumentConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay (arrays included) replace base values.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read `document.toml` from `dir` as a raw TOML value.
///
/// `Ok(None)` when the file doesn't exist, `Err` when it isn't valid TOML.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto `base`, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<DocumentConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: DocumentConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `document.toml` from `dir` over the stock defaults.
pub fn load_config(dir: &Path) -> Result<DocumentConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    resolve_config(base, overlay)
}

/// Fully commented stock `document.toml`, printed by `docmeta gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# Document Metadata Configuration
# ===============================
# Site-wide defaults for every page. All settings are optional; request
# handlers can override any of them per page.
# Unknown keys will cause an error.

# Pages that are not public get `<meta name="robots" content="noindex, nofollow">`
# and an `X-Robots-Tag: noindex, nofollow` response header, whatever robots
# rules are configured below. Set to true for production sites.
public = false

# ---------------------------------------------------------------------------
# Document fields
# ---------------------------------------------------------------------------
[document]
# Fallback <title>. When unset the request host name is used.
# title = "My Site"

# <meta name="description">
# description = "What this site is about"

# <meta name="author">
# author = "Jane Doe"

# <meta name="keywords">, joined with ", "
keywords = []

# Document id, exposed to templates as a normalized key. Defaults to "top".
# id = "top"

# ---------------------------------------------------------------------------
# Theme (theme.color, theme.scheme, theme.name meta tags)
# ---------------------------------------------------------------------------
# [theme]
# color = "#0a0a0a"
# One of: normal, light, dark, "light dark", "dark light", "only light", "only dark"
# scheme = "dark light"
# name = "system"

# ---------------------------------------------------------------------------
# Robots rules, one entry per bot ("robots" for all crawlers).
# Each rule may hold several comma-separated directives.
# Ignored while `public = false`.
# ---------------------------------------------------------------------------
[robots]
# robots = ["index, follow"]
# googlebot = ["noarchive", "nosnippet"]

# ---------------------------------------------------------------------------
# <body> attributes
# ---------------------------------------------------------------------------
[body]
# class = "site"

# ---------------------------------------------------------------------------
# Assets added to every page, in order.
# ---------------------------------------------------------------------------
# [[assets]]
# type = "stylesheet"
# href = "/css/site.css"
# media = "screen"
#
# [[assets]]
# type = "script"
# src = "/js/app.js"
# defer = true
#
# [[assets]]
# type = "link"
# href = "/favicon.svg"
# attributes = { rel = "icon", type = "image/svg+xml" }
"##
}
