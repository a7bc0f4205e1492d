//! Theme mode and color palettes
//!
//! The palette is a pure function of the mode. Both palettes are constant
//! tables; there is no system-theme following.

use serde::{Deserialize, Serialize};

/// A color as a `#RRGGBB` hex string
pub type Color = &'static str;

/// Light or dark
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    /// Light background, dark text
    #[default]
    Light,
    /// Dark background, light text
    Dark,
}

impl ThemeMode {
    /// The persisted form, `light` or `dark`
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
        }
    }

    /// The other mode
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    /// Check if this is the dark mode
    pub fn is_dark(&self) -> bool {
        matches!(self, ThemeMode::Dark)
    }
}

impl std::fmt::Display for ThemeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ThemeMode {
    type Err = String;

    /// Only the exact persisted strings are accepted
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            _ => Err(format!("Unknown theme mode: {}", s)),
        }
    }
}

/// Semantic colors used by every screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeColors {
    /// Accent for buttons and links
    pub primary: Color,
    /// Tinted background behind primary elements
    pub primary_light: Color,
    /// Pressed state of primary
    pub primary_dark: Color,
    /// Screen background
    pub background: Color,
    /// Card surface
    pub card: Color,
    /// Body text
    pub text: Color,
    /// Secondary text
    pub text_secondary: Color,
    /// Hints and placeholders
    pub text_muted: Color,
    /// Separators and outlines
    pub border: Color,
    /// Subtle fills (chips, inputs)
    pub muted: Color,
    /// Positive status
    pub success: Color,
    /// Background behind success
    pub success_light: Color,
    /// Needs attention
    pub warning: Color,
    /// Background behind warning
    pub warning_light: Color,
    /// Errors and destructive actions
    pub error: Color,
    /// Background behind error
    pub error_light: Color,
}

/// Light palette
pub const LIGHT_COLORS: ThemeColors = ThemeColors {
    primary: "#3B82F6",
    primary_light: "#EFF6FF",
    primary_dark: "#1D4ED8",
    background: "#FFFFFF",
    card: "#FFFFFF",
    text: "#1F2937",
    text_secondary: "#6B7280",
    text_muted: "#9CA3AF",
    border: "#E5E7EB",
    muted: "#F3F4F6",
    success: "#22C55E",
    success_light: "#F0FDF4",
    warning: "#F59E0B",
    warning_light: "#FFFBEB",
    error: "#EF4444",
    error_light: "#FEF2F2",
};

/// Dark palette
pub const DARK_COLORS: ThemeColors = ThemeColors {
    primary: "#60A5FA",
    primary_light: "#1E3A5F",
    primary_dark: "#93C5FD",
    background: "#111827",
    card: "#1F2937",
    text: "#F9FAFB",
    text_secondary: "#D1D5DB",
    text_muted: "#9CA3AF",
    border: "#374151",
    muted: "#1F2937",
    success: "#4ADE80",
    success_light: "#14532D",
    warning: "#FBBF24",
    warning_light: "#451A03",
    error: "#F87171",
    error_light: "#450A0A",
};

/// Palette for `mode`
pub fn palette(mode: ThemeMode) -> &'static ThemeColors {
    match mode {
        ThemeMode::Light => &LIGHT_COLORS,
        ThemeMode::Dark => &DARK_COLORS,
    }
}
