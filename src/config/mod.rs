//! Site configuration for the build pipeline.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── keystone   # [keystone] feature toggles
//! │   └── theme      # [theme] palettes
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! ├── provider.rs    # ConfigProvider (process-wide frozen config)
//! ├── site.toml      # Compiled-in site source
//! └── mod.rs         # SiteConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section            | Purpose                                        |
//! |--------------------|------------------------------------------------|
//! | top level          | Site name, author, url, pagination, social img |
//! | `[theme.primary]`  | Default palette                                |
//! | `[theme.secondary]`| Alternate palette                              |
//! | `[keystone]`       | Comments, bookmarks, claps, login toggles      |

pub mod provider;
pub mod section;
pub mod types;
mod util;

use util::{extract_url_path, is_email_shaped};

pub use provider::{ConfigProvider, EMBEDDED_SOURCE, load};
pub use section::{Feature, FeatureFlags, Palette, PaletteFields, ThemeConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use macros::Config;
use serde::{Deserialize, Serialize};

/// Default page size when `posts_per_page` is absent.
const DEFAULT_POSTS_PER_PAGE: i64 = 10;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration record handed to every build step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "")]
pub struct SiteConfig {
    /// Site display name.
    pub name: String,

    /// Tagline, may carry contact details.
    pub short_description: String,

    /// Base URL. Empty means "derive at render time".
    #[serde(rename = "url")]
    #[config(name = "url")]
    pub canonical_url: String,

    /// Author contact email.
    pub author_email: String,

    /// Author social handle (e.g. "@name").
    pub author_handle: String,

    /// Author display name.
    pub author_name: String,

    /// Posts per listing page.
    pub posts_per_page: i64,

    /// Site-relative path of the default social sharing image.
    pub social_image: String,

    /// Inline above-the-fold CSS at build time.
    /// Much slower builds and heavy resource use; faster page loads.
    pub critical_css: bool,

    /// Color palettes.
    pub theme: ThemeConfig,

    /// Social-interaction feature toggles.
    #[config(sub)]
    pub keystone: FeatureFlags,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            short_description: String::new(),
            canonical_url: String::new(),
            author_email: String::new(),
            author_handle: String::new(),
            author_name: String::new(),
            posts_per_page: DEFAULT_POSTS_PER_PAGE,
            social_image: String::new(),
            critical_css: false,
            theme: ThemeConfig::default(),
            keystone: FeatureFlags::default(),
        }
    }
}

impl SiteConfig {
    /// Parse configuration from TOML string, without validation.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    /// Parse and validate a source.
    ///
    /// On success the returned diagnostics hold only warnings, which the
    /// caller decides how to report.
    pub fn from_source(content: &str) -> Result<(Self, ConfigDiagnostics), ConfigError> {
        let (config, ignored) = match Self::parse_with_ignored(content) {
            Ok(parsed) => parsed,
            Err(err) => return Err(Self::check_structure(content).err().unwrap_or(err)),
        };
        let mut diag = ConfigDiagnostics::new();

        for field in ignored {
            diag.unknown(field);
        }

        config.validate(&mut diag)?;
        let diag = diag.into_result()?;
        Ok((config, diag))
    }

    /// Report a required field of the wrong type as `Fatal` instead of a
    /// plain parse error. Only consulted once typed parsing has failed.
    fn check_structure(content: &str) -> Result<(), ConfigError> {
        let table: toml::Table = toml::from_str(content)?;
        match table.get(Self::FIELDS.name.as_str()) {
            Some(value) if !value.is_str() => Err(ConfigError::Fatal {
                field: Self::FIELDS.name,
                message: format!("must be a string, found {}", value.type_str()),
            }),
            _ => Ok(()),
        }
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    // ========================================================================
    // accessors
    // ========================================================================

    /// Base URL, or `None` when unset.
    pub fn base_url(&self) -> Option<&str> {
        let url = self.canonical_url.trim();
        (!url.is_empty()).then_some(url)
    }

    /// URL path component of the base URL, for subdirectory deployments.
    ///
    /// `https://example.github.io/blog/` -> `blog`. Empty when unset.
    pub fn path_prefix(&self) -> String {
        self.base_url()
            .and_then(extract_url_path)
            .unwrap_or_default()
    }

    /// Social image as an absolute URL when a base URL is set,
    /// otherwise the site-relative path unchanged.
    pub fn social_image_url(&self) -> String {
        match self.base_url() {
            Some(base) if !self.social_image.is_empty() => format!(
                "{}/{}",
                base.trim_end_matches('/'),
                self.social_image.trim_start_matches('/')
            ),
            _ => self.social_image.clone(),
        }
    }

    /// Validated page size.
    ///
    /// Saturates at `usize::MAX` on targets where the value does not fit.
    pub fn page_size(&self) -> usize {
        if self.posts_per_page < 1 {
            return 1;
        }
        usize::try_from(self.posts_per_page).unwrap_or(usize::MAX)
    }

    /// Number of listing pages needed for `total_posts`. Always at least one.
    pub fn page_count(&self, total_posts: usize) -> usize {
        total_posts.div_ceil(self.page_size()).max(1)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the record.
    ///
    /// Structural problems return `Fatal` right away. Value problems are
    /// collected into `diag` as errors, cosmetic ones as warnings.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Fatal {
                field: Self::FIELDS.name,
                message: "is required and must not be blank".into(),
            });
        }

        if self.posts_per_page < 1 {
            diag.invalid(
                Self::FIELDS.posts_per_page,
                self.posts_per_page,
                "must be a positive integer",
            );
        }

        self.theme.validate(diag);

        if !is_email_shaped(&self.author_email) {
            diag.warn(
                Self::FIELDS.author_email,
                format!("`{}` does not look like an email address", self.author_email),
            );
        }

        self.validate_url(diag);

        if !self.social_image.is_empty() && !self.social_image.starts_with('/') {
            diag.warn(
                Self::FIELDS.social_image,
                "should be a site-relative path starting with `/`",
            );
        }

        if self.critical_css && !diag.has_errors() {
            diag.hint(
                Self::FIELDS.critical_css,
                "critical CSS inlining is on, expect slower builds",
            );
        }

        Ok(())
    }

    /// Non-empty URL must be absolute http(s) with a host.
    fn validate_url(&self, diag: &mut ConfigDiagnostics) {
        let Some(url_str) = self.base_url() else {
            return;
        };

        match url::Url::parse(url_str) {
            Ok(parsed) => {
                if !matches!(parsed.scheme(), "http" | "https") {
                    diag.warn(
                        Self::FIELDS.canonical_url,
                        format!(
                            "scheme '{}' not supported, use http or https",
                            parsed.scheme()
                        ),
                    );
                } else if parsed.host_str().is_none() {
                    diag.warn(Self::FIELDS.canonical_url, "URL must have a valid host");
                }
            }
            Err(e) => {
                diag.warn(Self::FIELDS.canonical_url, format!("invalid URL: {e}"));
            }
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse and validate a source with a valid `name` and email prepended.
/// Panics if there are unknown fields (to catch typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let source = format!("name = \"Test\"\nauthor_email = \"test@example.com\"\n{extra}");
    let (parsed, ignored) = SiteConfig::parse_with_ignored(&source).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
