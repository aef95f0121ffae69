//! Configuration error types.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::io::{self, Write};
use thiserror::Error;

// ============================================================================
// ConfigError
// ============================================================================

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config source parsing error")]
    Toml(#[from] toml::de::Error),

    /// A required field is missing or structurally unusable. Aborts the build.
    #[error("{field} {message}")]
    Fatal { field: FieldPath, message: String },

    /// A typed field fails its constraint. Aborts the build.
    #[error("{field} has invalid value `{value}`: {message}")]
    InvalidValue {
        field: FieldPath,
        value: String,
        message: String,
    },

    /// Cosmetic problem; logged and the value is kept as given.
    #[error("{field} {message}")]
    ValidationWarning { field: FieldPath, message: String },

    /// Key in the source that no config field reads. Treated as a warning.
    #[error("unknown field `{path}`, ignored")]
    UnknownField { path: String },

    // NOTE: No #[from] here - we don't want source() which causes duplicate output
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

impl ConfigError {
    /// Field the error is attached to, if any.
    pub const fn field(&self) -> Option<FieldPath> {
        match self {
            Self::Fatal { field, .. }
            | Self::InvalidValue { field, .. }
            | Self::ValidationWarning { field, .. } => Some(*field),
            Self::Toml(_) | Self::UnknownField { .. } | Self::Diagnostics(_) => None,
        }
    }

    /// Dotted key the error refers to, including unknown keys.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::UnknownField { path } => Some(path.as_str()),
            other => other.field().map(|f| f.as_str()),
        }
    }

    /// Whether this error must abort the build.
    pub const fn is_fatal(&self) -> bool {
        !matches!(
            self,
            Self::ValidationWarning { .. } | Self::UnknownField { .. }
        )
    }

    /// Bare message without the field prefix.
    fn message(&self) -> String {
        match self {
            Self::Fatal { message, .. } | Self::ValidationWarning { message, .. } => {
                message.clone()
            }
            Self::InvalidValue { value, message, .. } => {
                format!("invalid value `{value}`: {message}")
            }
            Self::UnknownField { .. } => "unknown field, ignored".into(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// ConfigDiagnostics
// ============================================================================

/// Errors and warnings collected during one validation pass.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    errors: Vec<ConfigError>,
    /// Collected warnings, printed as one block after validation.
    warnings: Vec<ConfigError>,
    /// Collected hints, printed with the warnings.
    hints: Vec<(FieldPath, String)>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value that fails its constraint.
    pub fn invalid(
        &mut self,
        field: FieldPath,
        value: impl fmt::Display,
        message: impl Into<String>,
    ) {
        self.errors.push(ConfigError::InvalidValue {
            field,
            value: value.to_string(),
            message: message.into(),
        });
    }

    /// Add a warning (collected for batch display).
    pub fn warn(&mut self, field: FieldPath, message: impl Into<String>) {
        self.warnings.push(ConfigError::ValidationWarning {
            field,
            message: message.into(),
        });
    }

    /// Record a key no config field reads.
    pub fn unknown(&mut self, path: impl Into<String>) {
        self.warnings
            .push(ConfigError::UnknownField { path: path.into() });
    }

    /// Add a general hint (collected for batch display).
    pub fn hint(&mut self, field: FieldPath, message: impl Into<String>) {
        self.hints.push((field, message.into()));
    }

    /// Print collected hints and warnings to stderr.
    pub fn print_hints_and_warnings(&self) {
        self.write_hints_and_warnings(&mut io::stderr().lock()).ok();
    }

    /// Write collected hints and warnings in a grouped format.
    pub fn write_hints_and_warnings(&self, out: &mut impl Write) -> io::Result<()> {
        for (field, message) in &self.hints {
            writeln!(
                out,
                "{} [{}] {}",
                crate::logger::prefix("hint"),
                field.as_str(),
                message
            )?;
        }

        if !self.warnings.is_empty() {
            writeln!(
                out,
                "{} site config has problems, continuing with values as given:",
                crate::logger::prefix("warning")
            )?;
            for warning in &self.warnings {
                writeln!(
                    out,
                    "- {}: {}",
                    warning.path().unwrap_or_default(),
                    warning.message()
                )?;
            }
        }

        out.flush()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ConfigError] {
        &self.errors
    }

    pub fn warnings(&self) -> &[ConfigError] {
        &self.warnings
    }

    pub fn hints(&self) -> &[(FieldPath, String)] {
        &self.hints
    }

    /// Convert to Result.
    ///
    /// Without errors the diagnostics (warnings only) come back as `Ok`.
    /// A single error is returned as itself, several as `Diagnostics`.
    pub fn into_result(mut self) -> Result<Self, ConfigError> {
        match self.errors.len() {
            0 => Ok(self),
            1 => Err(self.errors.remove(0)),
            _ => Err(ConfigError::Diagnostics(self)),
        }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}\n", "config validation failed:".red().bold())?;
        for (i, err) in self.errors.iter().enumerate() {
            let field = err.path().unwrap_or_default();
            writeln!(f, "{}{}{}", "[".dimmed(), field.cyan(), "]".dimmed())?;
            write!(f, "{} {}", "→".red(), err.message())?;
            if i + 1 < self.errors.len() {
                writeln!(f, "\n")?;
            }
        }
        if self.errors.len() > 1 {
            write!(
                f,
                "\n\n{} {} {}",
                "found".dimmed(),
                self.errors.len().to_string().red().bold(),
                "errors".dimmed()
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE_SIZE: FieldPath = FieldPath::new("posts_per_page");
    const EMAIL: FieldPath = FieldPath::new("author_email");

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidValue {
            field: PAGE_SIZE,
            value: "0".into(),
            message: "must be at least 1".into(),
        };
        let display = format!("{err}");
        assert!(display.contains("posts_per_page"));
        assert!(display.contains("`0`"));
        assert!(display.contains("must be at least 1"));

        let fatal = ConfigError::Fatal {
            field: FieldPath::new("name"),
            message: "is required".into(),
        };
        assert!(format!("{fatal}").contains("is required"));
    }

    #[test]
    fn test_only_warnings_is_ok() {
        let mut diag = ConfigDiagnostics::new();
        diag.warn(EMAIL, "does not look like an email address");

        let diag = diag.into_result().unwrap();
        assert!(diag.has_warnings());
        assert!(!diag.has_errors());
        assert!(!diag.warnings()[0].is_fatal());
        assert_eq!(diag.warnings()[0].field(), Some(EMAIL));
    }

    #[test]
    fn test_single_error_returned_as_itself() {
        let mut diag = ConfigDiagnostics::new();
        diag.invalid(PAGE_SIZE, -3, "must be at least 1");
        diag.warn(EMAIL, "ignored");

        match diag.into_result() {
            Err(ConfigError::InvalidValue { field, value, .. }) => {
                assert_eq!(field, PAGE_SIZE);
                assert_eq!(value, "-3");
            }
            other => panic!("expected InvalidValue, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_field_owns_its_path() {
        let mut diag = ConfigDiagnostics::new();
        diag.unknown(String::from("keystone.likes"));

        let warning = &diag.warnings()[0];
        assert!(!warning.is_fatal());
        assert_eq!(warning.field(), None);
        assert_eq!(warning.path(), Some("keystone.likes"));
        assert!(warning.to_string().contains("keystone.likes"));
    }

    #[test]
    fn test_write_hints_and_warnings() {
        let mut diag = ConfigDiagnostics::new();
        diag.hint(FieldPath::new("critical_css"), "expect slower builds");
        diag.warn(EMAIL, "does not look like an email address");
        diag.unknown("postsPerPage");

        let mut out = Vec::new();
        diag.write_hints_and_warnings(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        let lines: Vec<_> = out.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("[hint]"));
        assert!(lines[0].ends_with("[critical_css] expect slower builds"));
        assert!(lines[1].contains("[warning]"));
        assert_eq!(lines[2], "- author_email: does not look like an email address");
        assert_eq!(lines[3], "- postsPerPage: unknown field, ignored");
    }

    #[test]
    fn test_write_nothing_when_clean() {
        let mut out = Vec::new();
        ConfigDiagnostics::new()
            .write_hints_and_warnings(&mut out)
            .unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_multiple_errors_are_grouped() {
        let mut diag = ConfigDiagnostics::new();
        diag.invalid(PAGE_SIZE, 0, "must be at least 1");
        diag.invalid(FieldPath::new("theme.primary.text"), "", "must not be empty");

        let err = diag.into_result().unwrap_err();
        let ConfigError::Diagnostics(inner) = &err else {
            panic!("expected Diagnostics, got {err:?}");
        };
        assert_eq!(inner.len(), 2);

        let display = format!("{err}");
        assert!(display.contains("posts_per_page"));
        assert!(display.contains("theme.primary.text"));
        assert!(display.contains("errors"));
    }
}
