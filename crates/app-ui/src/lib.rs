//! Theming for Bandnote
//!
//! Two fixed palettes, light and dark, and a provider that remembers which
//! one the user picked.
//!
//! # Example
//!
//! ```rust
//! use app_ui::theme::{palette, ThemeMode};
//!
//! let colors = palette(ThemeMode::Dark);
//! assert_eq!(ThemeMode::Light.toggled(), ThemeMode::Dark);
//! assert!(colors.background.starts_with('#'));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod theme;
pub mod theme_provider;

pub use theme::{palette, ThemeColors, ThemeMode, DARK_COLORS, LIGHT_COLORS};
pub use theme_provider::ThemeProvider;
