//! `[keystone]` section configuration.
//!
//! Toggles for the social-interaction plugin. Each flag is independent;
//! the plugin reads them to decide which widgets to render.
//!
//! # Example
//!
//! ```toml
//! [keystone]
//! comments = true
//! bookmarks = true
//! claps = false
//! login = true
//! ```

use macros::Config;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single social-interaction feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Comments,
    Bookmarks,
    Claps,
    Login,
}

impl Feature {
    pub const ALL: [Self; 4] = [Self::Comments, Self::Bookmarks, Self::Claps, Self::Login];

    /// Key used in the `[keystone]` table.
    pub const fn key(&self) -> &'static str {
        match self {
            Self::Comments => "comments",
            Self::Bookmarks => "bookmarks",
            Self::Claps => "claps",
            Self::Login => "login",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Keystone feature toggles. Absent flags are off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Config)]
#[serde(default)]
#[config(section = "keystone")]
pub struct FeatureFlags {
    /// Show the comment widget.
    pub comments: bool,

    /// Show bookmark buttons.
    pub bookmarks: bool,

    /// Show clap counters.
    pub claps: bool,

    /// Show login prompts.
    pub login: bool,
}

impl FeatureFlags {
    pub const fn is_enabled(&self, feature: Feature) -> bool {
        match feature {
            Feature::Comments => self.comments,
            Feature::Bookmarks => self.bookmarks,
            Feature::Claps => self.claps,
            Feature::Login => self.login,
        }
    }

    pub fn set(&mut self, feature: Feature, enabled: bool) {
        let flag = match feature {
            Feature::Comments => &mut self.comments,
            Feature::Bookmarks => &mut self.bookmarks,
            Feature::Claps => &mut self.claps,
            Feature::Login => &mut self.login,
        };
        *flag = enabled;
    }

    /// Enabled features, in declaration order.
    pub fn enabled(&self) -> impl Iterator<Item = Feature> + '_ {
        Feature::ALL.into_iter().filter(|f| self.is_enabled(*f))
    }

    pub fn any(&self) -> bool {
        self.enabled().next().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_defaults_all_off() {
        let config = test_parse_config("");
        assert_eq!(config.keystone, FeatureFlags::default());
        assert!(!config.keystone.any());
    }

    #[test]
    fn test_partial_table() {
        let config = test_parse_config("[keystone]\nclaps = true");
        assert!(config.keystone.claps);
        assert!(!config.keystone.comments);
        assert!(!config.keystone.bookmarks);
        assert!(!config.keystone.login);
        assert_eq!(config.keystone.enabled().collect::<Vec<_>>(), [Feature::Claps]);
    }

    #[test]
    fn test_toggling_one_flag_leaves_others() {
        for feature in Feature::ALL {
            let mut flags = FeatureFlags {
                comments: true,
                bookmarks: false,
                claps: true,
                login: false,
            };
            let before = flags.clone();

            flags.set(feature, !flags.is_enabled(feature));

            for other in Feature::ALL.into_iter().filter(|f| *f != feature) {
                assert_eq!(
                    flags.is_enabled(other),
                    before.is_enabled(other),
                    "toggling {feature} changed {other}"
                );
            }
            assert_ne!(flags.is_enabled(feature), before.is_enabled(feature));
        }
    }

    #[test]
    fn test_toggling_comments_in_source() {
        let on = test_parse_config(
            "[keystone]\ncomments = true\nbookmarks = true\nclaps = false\nlogin = true",
        );
        let off = test_parse_config(
            "[keystone]\ncomments = false\nbookmarks = true\nclaps = false\nlogin = true",
        );

        assert!(on.keystone.comments);
        assert!(!off.keystone.comments);
        assert_eq!(on.keystone.bookmarks, off.keystone.bookmarks);
        assert_eq!(on.keystone.claps, off.keystone.claps);
        assert_eq!(on.keystone.login, off.keystone.login);
    }

    #[test]
    fn test_field_paths() {
        assert_eq!(FeatureFlags::FIELDS.login.as_str(), "keystone.login");
    }
}
