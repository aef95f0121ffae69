//! `[theme]` section configuration.
//!
//! Two palettes of color tokens handed to the stylesheet engine as-is.
//!
//! # Example
//!
//! ```toml
//! [theme.primary]
//! background = "white"
//! text = "black"
//! highlight = "#666"
//!
//! [theme.secondary]
//! background = "black"
//! text = "white"
//! highlight = "#666"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath, util::is_color_token};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Background, text and highlight colors for one theme variant.
///
/// All three keys are required when the table is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub background: String,
    pub text: String,
    pub highlight: String,
}

impl Palette {
    pub fn new(
        background: impl Into<String>,
        text: impl Into<String>,
        highlight: impl Into<String>,
    ) -> Self {
        Self {
            background: background.into(),
            text: text.into(),
            highlight: highlight.into(),
        }
    }

    /// Dark text on a light background.
    pub fn light() -> Self {
        Self::new("white", "black", "#666")
    }

    /// Light text on a dark background.
    pub fn dark() -> Self {
        Self::new("black", "white", "#666")
    }

    fn entries(&self) -> [(&'static str, &str); 3] {
        [
            ("background", &self.background),
            ("text", &self.text),
            ("highlight", &self.highlight),
        ]
    }

    /// Empty colors are errors; unrecognized tokens only warn since the
    /// stylesheet engine has the final say.
    pub fn validate(&self, fields: &PaletteFields, diag: &mut ConfigDiagnostics) {
        let checks = [
            (fields.background, &self.background),
            (fields.text, &self.text),
            (fields.highlight, &self.highlight),
        ];

        for (field, value) in checks {
            if value.trim().is_empty() {
                diag.invalid(field, value, "color must not be empty");
            } else if !is_color_token(value) {
                diag.warn(
                    field,
                    format!("`{value}` does not look like a color (named, hex or function)"),
                );
            }
        }
    }
}

/// Field paths for one palette.
///
/// `Palette` sits under two keys, so its paths are spelled out per key
/// instead of generated.
#[derive(Debug, Clone, Copy)]
pub struct PaletteFields {
    pub background: FieldPath,
    pub text: FieldPath,
    pub highlight: FieldPath,
}

/// Theme section configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Default palette.
    pub primary: Palette,

    /// Alternate palette (e.g. dark mode).
    pub secondary: Palette,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            primary: Palette::light(),
            secondary: Palette::dark(),
        }
    }
}

impl ThemeConfig {
    pub const PRIMARY: PaletteFields = PaletteFields {
        background: FieldPath::new("theme.primary.background"),
        text: FieldPath::new("theme.primary.text"),
        highlight: FieldPath::new("theme.primary.highlight"),
    };

    pub const SECONDARY: PaletteFields = PaletteFields {
        background: FieldPath::new("theme.secondary.background"),
        text: FieldPath::new("theme.secondary.text"),
        highlight: FieldPath::new("theme.secondary.highlight"),
    };

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        self.primary.validate(&Self::PRIMARY, diag);
        self.secondary.validate(&Self::SECONDARY, diag);
    }

    /// Render both palettes as CSS custom properties on `:root`.
    ///
    /// ```text
    /// :root {
    ///   --color-primary-background: white;
    ///   ...
    /// }
    /// ```
    pub fn css_custom_properties(&self) -> String {
        let mut css = String::from(":root {\n");
        for (variant, palette) in [("primary", &self.primary), ("secondary", &self.secondary)] {
            for (role, value) in palette.entries() {
                // Writing to a String cannot fail
                let _ = writeln!(css, "  --color-{variant}-{role}: {value};");
            }
        }
        css.push_str("}\n");
        css
    }
}
