//! Frozen, validated site configuration for a static site build.
//!
//! The site source is compiled in and loaded once per process:
//!
//! ```ignore
//! let config = site_config::load()?;
//! if config.keystone.comments {
//!     // render the comment widget
//! }
//! ```

pub mod config;
pub mod logger;

pub use config::{
    ConfigDiagnostics, ConfigError, ConfigProvider, Feature, FeatureFlags, FieldPath, Palette,
    SiteConfig, ThemeConfig, load,
};
