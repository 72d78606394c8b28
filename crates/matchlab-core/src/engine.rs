//! The problem matcher engine: applies a [`MatcherConfig`] to tool output.
//!
//! # Matching model
//!
//! Output is scanned line by line. A matcher with a single rule emits one
//! [`Diagnostic`] for every line the rule matches.
//!
//! A matcher with several rules describes a *sequence*: consecutive lines must
//! match rule 0, rule 1, ... in order. Fields captured along the way
//! accumulate, and a diagnostic is emitted once the last rule matches. When
//! the last rule has `loop: true`, every further consecutive line it matches
//! emits another diagnostic that reuses the fields captured by the earlier
//! rules (typically `file`). Any line that breaks the sequence resets it and
//! is retried against rule 0.
//!
//! ```text
//! test.js                                   <- rule 0 captures file
//!   1:0   error  Missing "use strict"  strict     <- rule 1 (loop) emits
//!   5:10  error  'addOne' is unused    no-unused  <- rule 1 (loop) emits
//! ```
//!
//! # Errors
//!
//! Everything that can go wrong is reported as an [`EngineError`]: regexes
//! that fail to compile, capture group indexes the regex does not have, and a
//! `loop` flag on a rule that is not last. Output never causes an error: a
//! line whose `line`/`column` capture is not a number simply does not match.
//! The `regex` crate matches in linear time, so a scan is
//! bounded by the size of the output; compile cost is bounded by
//! [`EngineOptions::regex_size_limit`].

use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::debug;

use crate::config::{Field, MatcherConfig, PatternRule};

/// One extracted problem report. Every field is optional; only the fields a
/// matcher maps are filled in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl Diagnostic {
    /// Copy every field set in `other` over this one.
    fn merge(&mut self, other: &Diagnostic) {
        fn take<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                slot.clone_from(value);
            }
        }
        take(&mut self.file, &other.file);
        take(&mut self.line, &other.line);
        take(&mut self.column, &other.column);
        take(&mut self.severity, &other.severity);
        take(&mut self.message, &other.message);
        take(&mut self.code, &other.code);
    }
}

/// Tuning knobs for the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Upper bound, in bytes, on the compiled size of each rule's regex.
    pub regex_size_limit: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            regex_size_limit: 1 << 20,
        }
    }
}

/// Failures raised while compiling a matcher.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("matcher has no patterns")]
    NoPatterns,
    #[error("pattern {index}: invalid regexp: {reason}")]
    InvalidRegex { index: usize, reason: String },
    #[error(
        "pattern {index}: capture group {group} for `{field}` does not exist \
         (regexp has {available} capture groups)"
    )]
    GroupOutOfRange {
        index: usize,
        field: Field,
        group: usize,
        available: usize,
    },
    #[error("pattern {index}: `loop` is only allowed on the last pattern")]
    MisplacedLoop { index: usize },
}

struct CompiledRule {
    regex: Regex,
    mappings: Vec<(Field, usize)>,
    looping: bool,
}

impl CompiledRule {
    fn compile(index: usize, rule: &PatternRule, options: &EngineOptions) -> Result<Self, EngineError> {
        let regex = RegexBuilder::new(&rule.regexp)
            .size_limit(options.regex_size_limit)
            .build()
            .map_err(|err| EngineError::InvalidRegex {
                index,
                reason: err.to_string(),
            })?;

        // captures_len counts the implicit whole-match group 0.
        let available = regex.captures_len() - 1;
        let mappings: Vec<_> = rule.mappings().collect();
        for &(field, group) in &mappings {
            if group == 0 || group > available {
                return Err(EngineError::GroupOutOfRange {
                    index,
                    field,
                    group,
                    available,
                });
            }
        }

        Ok(Self {
            regex,
            mappings,
            looping: rule.loops(),
        })
    }

    /// Extract mapped fields from `line`, or `None` if the rule does not match.
    ///
    /// A `line` or `column` capture that is not a `u64` (non-ASCII digits,
    /// overflow, stray text) counts as a non-match for that line only.
    fn extract(&self, line: &str, line_number: usize) -> Option<Diagnostic> {
        let caps = self.regex.captures(line)?;
        let mut diag = Diagnostic::default();
        for &(field, group) in &self.mappings {
            // Optional groups that did not participate leave the field unset.
            let Some(text) = caps.get(group).map(|m| m.as_str()) else {
                continue;
            };
            if field.is_numeric() {
                if text.is_empty() {
                    continue;
                }
                let Ok(value) = text.parse::<u64>() else {
                    debug!(line_number, %field, value = text, "numeric capture did not parse");
                    return None;
                };
                if field == Field::Line {
                    diag.line = Some(value);
                } else {
                    diag.column = Some(value);
                }
                continue;
            }
            let text = Some(text.to_owned());
            match field {
                Field::File => diag.file = text,
                Field::Severity => diag.severity = text,
                Field::Message => diag.message = text,
                Field::Code => diag.code = text,
                Field::Line | Field::Column => {}
            }
        }
        Some(diag)
    }
}

/// A matcher whose rules have been compiled and validated.
pub struct CompiledMatcher {
    rules: Vec<CompiledRule>,
    default_severity: Option<String>,
}

impl CompiledMatcher {
    /// Compile every rule and check capture indexes and `loop` placement.
    pub fn compile(config: &MatcherConfig, options: &EngineOptions) -> Result<Self, EngineError> {
        if config.pattern.is_empty() {
            return Err(EngineError::NoPatterns);
        }
        let last = config.pattern.len() - 1;
        let rules = config
            .pattern
            .iter()
            .enumerate()
            .map(|(index, rule)| {
                if rule.loops() && index != last {
                    return Err(EngineError::MisplacedLoop { index });
                }
                CompiledRule::compile(index, rule, options)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            rules,
            default_severity: config.severity.clone(),
        })
    }

    /// Scan `output` and return diagnostics in order of appearance.
    pub fn scan(&self, output: &str) -> Vec<Diagnostic> {
        let last = self.rules.len() - 1;
        let mut found = Vec::new();
        // Index of the rule the next line must match; 0 means "not in a sequence".
        let mut next = 0;
        let mut carried = Diagnostic::default();

        for (i, raw) in output.split('\n').enumerate() {
            let line = raw.strip_suffix('\r').unwrap_or(raw);
            let line_number = i + 1;

            if next > 0 {
                let rule = &self.rules[next];
                if let Some(fields) = rule.extract(line, line_number) {
                    if next == last {
                        let mut diag = carried.clone();
                        diag.merge(&fields);
                        found.push(self.finish(diag));
                        if !rule.looping {
                            next = 0;
                            carried = Diagnostic::default();
                        }
                    } else {
                        carried.merge(&fields);
                        next += 1;
                    }
                    continue;
                }
                next = 0;
                carried = Diagnostic::default();
            }

            if let Some(fields) = self.rules[0].extract(line, line_number) {
                if last == 0 {
                    found.push(self.finish(fields));
                } else {
                    carried = fields;
                    next = 1;
                }
            }
        }

        found
    }

    fn finish(&self, mut diag: Diagnostic) -> Diagnostic {
        if diag.severity.is_none() {
            diag.severity.clone_from(&self.default_severity);
        }
        diag
    }
}

/// Compile `config` and scan `output` in one step.
pub fn run(
    config: &MatcherConfig,
    output: &str,
    options: &EngineOptions,
) -> Result<Vec<Diagnostic>, EngineError> {
    Ok(CompiledMatcher::compile(config, options)?.scan(output))
}
