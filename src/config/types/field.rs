//! Type-safe config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// A type-safe wrapper for config field paths.
///
/// Generated by `#[derive(Config)]` as `Type::FIELDS.field`, or written out
/// by hand for sections the derive cannot describe (the two theme palettes
/// share one type but live under different keys).
///
/// ```ignore
/// diag.invalid(SiteConfig::FIELDS.posts_per_page, "0", "must be at least 1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}

impl AsRef<str> for FieldPath {
    fn as_ref(&self) -> &str {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_is_raw_path() {
        let path = FieldPath::new("theme.primary.text");
        assert_eq!(path.as_str(), "theme.primary.text");
        assert_eq!(path.as_ref(), "theme.primary.text");
    }

    #[test]
    fn test_display_quotes_path() {
        let shown = FieldPath::new("name").to_string();
        assert!(shown.contains("`name`"));
    }
}
