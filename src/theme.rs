//! Theme value: accent color, preferred color scheme and theme name.
//!
//! The scheme is the value of the `color-scheme` meta tag and is restricted to
//! the seven strings browsers understand:
//!
//! ```text
//! normal | light | dark | light dark | dark light | only light | only dark
//! ```
//!
//! Anything else is rejected when the theme is constructed, so a [`Theme`]
//! that exists is always valid.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ThemeError {
    #[error("invalid color scheme `{0}`, expected one of: {schemes}", schemes = ColorScheme::expected())]
    InvalidScheme(String),
}

/// Scheme applied when none is given.
pub const DEFAULT_SCHEME: ColorScheme = ColorScheme::DarkLight;

/// Name applied when none is given.
pub const DEFAULT_NAME: &str = "system";

/// Accepted `color-scheme` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorScheme {
    Normal,
    Light,
    Dark,
    LightDark,
    DarkLight,
    OnlyLight,
    OnlyDark,
}

impl ColorScheme {
    pub const ALL: [ColorScheme; 7] = [
        ColorScheme::Normal,
        ColorScheme::Light,
        ColorScheme::Dark,
        ColorScheme::LightDark,
        ColorScheme::DarkLight,
        ColorScheme::OnlyLight,
        ColorScheme::OnlyDark,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ColorScheme::Normal => "normal",
            ColorScheme::Light => "light",
            ColorScheme::Dark => "dark",
            ColorScheme::LightDark => "light dark",
            ColorScheme::DarkLight => "dark light",
            ColorScheme::OnlyLight => "only light",
            ColorScheme::OnlyDark => "only dark",
        }
    }

    fn expected() -> String {
        ColorScheme::ALL
            .iter()
            .map(|s| format!("`{}`", s.as_str()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        DEFAULT_SCHEME
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColorScheme {
    type Err = ThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorScheme::ALL
            .into_iter()
            .find(|scheme| scheme.as_str() == s)
            .ok_or_else(|| ThemeError::InvalidScheme(s.to_string()))
    }
}

impl TryFrom<String> for ColorScheme {
    type Error = ThemeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ColorScheme> for String {
    fn from(scheme: ColorScheme) -> Self {
        scheme.as_str().to_string()
    }
}

/// Immutable theme triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    color: String,
    scheme: ColorScheme,
    name: Option<String>,
}

impl Theme {
    /// Build a theme, validating `scheme`.
    ///
    /// `None` for `scheme` means `"dark light"`. `name` is stored as given;
    /// pass `Some(DEFAULT_NAME)` for the stock `"system"` name.
    pub fn new(
        color: impl Into<String>,
        scheme: Option<&str>,
        name: Option<&str>,
    ) -> Result<Self, ThemeError> {
        let scheme = match scheme {
            Some(s) => s.parse()?,
            None => DEFAULT_SCHEME,
        };
        Ok(Self {
            color: color.into(),
            scheme,
            name: name.map(String::from),
        })
    }

    /// Build a theme from an already parsed scheme.
    pub fn with_scheme(color: impl Into<String>, scheme: ColorScheme, name: Option<&str>) -> Self {
        Self {
            color: color.into(),
            scheme,
            name: name.map(String::from),
        }
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    pub fn scheme(&self) -> ColorScheme {
        self.scheme
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name.as_deref().unwrap_or_default())
    }
}
