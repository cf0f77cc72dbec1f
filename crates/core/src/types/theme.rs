//! Light and dark themes for the storefront shell.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Error returned when a theme name is not recognized.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown theme '{0}' (expected 'light' or 'dark')")]
pub struct ThemeParseError(pub String);

/// Status bar content style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusBarStyle {
    DarkContent,
    LightContent,
}

/// Colors the shell needs outside of component styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    /// Root container background.
    pub background: &'static str,
    /// Status bar background.
    pub status_bar: &'static str,
    /// Status bar content style.
    pub status_bar_style: StatusBarStyle,
}

/// The active color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Lowercase theme name.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Shell colors for this theme.
    #[must_use]
    pub const fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                background: "#312e38",
                status_bar: "#EBEEF8",
                status_bar_style: StatusBarStyle::DarkContent,
            },
            Self::Dark => Palette {
                background: "#312e38",
                status_bar: "#111",
                status_bar_style: StatusBarStyle::DarkContent,
            },
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

impl FromStr for Theme {
    type Err = ThemeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            _ => Err(ThemeParseError(s.to_owned())),
        }
    }
}
