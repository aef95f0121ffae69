//! Configuration section definitions.
//!
//! Each module corresponds to a table in the site source:
//!
//! | Module     | TOML Section   | Purpose                              |
//! |------------|----------------|--------------------------------------|
//! | `keystone` | `[keystone]`   | Social-interaction feature toggles   |
//! | `theme`    | `[theme]`      | Primary and secondary color palettes |

pub mod keystone;
pub mod theme;

pub use keystone::{Feature, FeatureFlags};
pub use theme::{Palette, PaletteFields, ThemeConfig};
