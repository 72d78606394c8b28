//! Decoding of problem matcher configuration text.
//!
//! A configuration is the JSON object a user types into the playground:
//!
//! ```json
//! {
//!   "owner": "eslint-compact",
//!   "pattern": [
//!     { "regexp": "^(.+):(\\d+):(\\d+) (.*)$", "file": 1, "line": 2, "column": 3, "message": 4 }
//!   ]
//! }
//! ```
//!
//! [`parse`] only checks that the text has this *shape*. Whether the capture
//! group indexes exist, or whether `loop` sits on a sensible rule, is decided
//! later by the [`engine`](crate::engine) because it needs the compiled regex.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A decoded problem matcher: an owner name plus an ordered list of rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Identifies the matcher (e.g. `"eslint-compact"`).
    pub owner: String,
    /// Default severity for diagnostics whose rules capture none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    /// Rules applied to consecutive lines of output.
    pub pattern: Vec<PatternRule>,
    /// Keys this playground does not interpret, kept so re-encoding is lossless.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// One regular expression and the mapping from its capture groups to
/// diagnostic fields.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatternRule {
    pub regexp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<usize>,
    #[serde(rename = "loop", default, skip_serializing_if = "Option::is_none")]
    pub looping: Option<bool>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// The diagnostic fields a rule can capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    File,
    Line,
    Column,
    Severity,
    Message,
    Code,
}

impl Field {
    /// All fields, in the order they appear in a diagnostic record.
    pub const ALL: [Field; 6] = [
        Field::File,
        Field::Line,
        Field::Column,
        Field::Severity,
        Field::Message,
        Field::Code,
    ];

    /// The configuration key for this field.
    pub fn key(self) -> &'static str {
        match self {
            Field::File => "file",
            Field::Line => "line",
            Field::Column => "column",
            Field::Severity => "severity",
            Field::Message => "message",
            Field::Code => "code",
        }
    }

    /// Whether captured text must be an unsigned integer.
    pub fn is_numeric(self) -> bool {
        matches!(self, Field::Line | Field::Column)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl PatternRule {
    /// Create a rule with the given regexp and no field mappings.
    pub fn new(regexp: impl Into<String>) -> Self {
        Self {
            regexp: regexp.into(),
            ..Self::default()
        }
    }

    /// Map `field` to capture group `group`.
    pub fn with(mut self, field: Field, group: usize) -> Self {
        *self.slot_mut(field) = Some(group);
        self
    }

    /// Mark this rule as looping over further matching lines.
    pub fn looping(mut self) -> Self {
        self.looping = Some(true);
        self
    }

    /// Capture group mapped to `field`, if any.
    pub fn group(&self, field: Field) -> Option<usize> {
        match field {
            Field::File => self.file,
            Field::Line => self.line,
            Field::Column => self.column,
            Field::Severity => self.severity,
            Field::Message => self.message,
            Field::Code => self.code,
        }
    }

    /// Iterate over the `(field, group)` mappings this rule declares.
    pub fn mappings(&self) -> impl Iterator<Item = (Field, usize)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(|field| self.group(field).map(|group| (field, group)))
    }

    /// Whether `loop` is set to `true`.
    pub fn loops(&self) -> bool {
        self.looping.unwrap_or(false)
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<usize> {
        match field {
            Field::File => &mut self.file,
            Field::Line => &mut self.line,
            Field::Column => &mut self.column,
            Field::Severity => &mut self.severity,
            Field::Message => &mut self.message,
            Field::Code => &mut self.code,
        }
    }
}

impl MatcherConfig {
    /// Create a configuration with the given owner and rules.
    pub fn new(owner: impl Into<String>, pattern: Vec<PatternRule>) -> Self {
        Self {
            owner: owner.into(),
            severity: None,
            pattern,
            extra: BTreeMap::new(),
        }
    }

    /// Encode as JSON text with two-space indentation.
    pub fn to_pretty_json(&self) -> String {
        // Serializing plain strings, integers and JSON values cannot fail.
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

/// Broad category of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigErrorKind {
    /// The text is not syntactically valid JSON.
    Syntax,
    /// The text is valid JSON but not a matcher object.
    Shape,
    /// The text ended before the JSON value was complete.
    Eof,
}

/// Why configuration text could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ConfigError {
    kind: ConfigErrorKind,
    message: String,
    line: usize,
    column: usize,
}

impl ConfigError {
    pub fn kind(&self) -> ConfigErrorKind {
        self.kind
    }

    /// Human-readable description, including position when known.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// 1-based line of the failure, or 0 when not positional.
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the failure, or 0 when not positional.
    pub fn column(&self) -> usize {
        self.column
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        use serde_json::error::Category;
        let kind = match err.classify() {
            Category::Data => ConfigErrorKind::Shape,
            Category::Eof => ConfigErrorKind::Eof,
            Category::Syntax | Category::Io => ConfigErrorKind::Syntax,
        };
        Self {
            kind,
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

/// Decode configuration text into a [`MatcherConfig`].
///
/// Never panics; every failure comes back as a [`ConfigError`].
pub fn parse(text: &str) -> Result<MatcherConfig, ConfigError> {
    Ok(serde_json::from_str(text)?)
}
