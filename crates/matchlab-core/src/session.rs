//! The edit/validate/recompute state machine.
//!
//! A [`Session`] owns the two texts a user edits (tool output and matcher
//! configuration), the last configuration that decoded successfully, and the
//! outcome of the last match attempt. It has exactly three entry points:
//!
//! * [`edit_output`](Session::edit_output)
//! * [`edit_configuration`](Session::edit_configuration)
//! * [`load_example`](Session::load_example)
//!
//! Each runs to completion and leaves the session consistent: the match
//! outcome always reflects the freshest output text combined with the freshest
//! configuration that decoded. A configuration edit that fails to decode sets
//! [`config_error`](Session::config_error) and changes nothing else, so a
//! half-typed keystroke never discards the last working matcher.

use tracing::{debug, warn};

use crate::config::{self, ConfigError, MatcherConfig};
use crate::engine::{Diagnostic, EngineOptions};
use crate::invoke::{invoke, MatchError};
use crate::presets;

/// Errors returned by session entry points. None of them affect the session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no example named `{0}`")]
    InvalidExampleName(String),
}

/// Observational label for the combination of session fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing entered yet.
    Empty,
    /// Text entered, but no configuration has decoded yet.
    Editing,
    /// The current configuration produced a match result.
    Valid,
    /// The latest configuration text failed to decode.
    ConfigInvalid,
    /// The engine rejected the current configuration.
    MatchFailed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum Outcome {
    #[default]
    None,
    Matched(Vec<Diagnostic>),
    Failed(MatchError),
}

/// Single source of truth for one playground session.
#[derive(Debug, Clone, Default)]
pub struct Session {
    output: String,
    config_text: String,
    config: Option<MatcherConfig>,
    config_error: Option<ConfigError>,
    outcome: Outcome,
    options: EngineOptions,
}

impl Session {
    /// An empty session with default engine options.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty session with the given engine options.
    pub fn with_options(options: EngineOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    /// Replace the output text and recompute.
    pub fn edit_output(&mut self, text: impl Into<String>) {
        self.output = text.into();
        self.recompute();
    }

    /// Replace the configuration text, decode it, and recompute on success.
    ///
    /// On decode failure only the configuration error is updated; the last
    /// decoded configuration and its match outcome stay observable.
    pub fn edit_configuration(&mut self, text: impl Into<String>) {
        self.config_text = text.into();
        self.apply_config_text();
    }

    /// Replace both texts with the named preset, then decode and recompute.
    ///
    /// An unknown name returns [`SessionError::InvalidExampleName`] and leaves
    /// the session untouched.
    pub fn load_example(&mut self, name: &str) -> Result<(), SessionError> {
        let preset = presets::find(name).ok_or_else(|| {
            warn!(name, "unknown example requested");
            SessionError::InvalidExampleName(name.to_owned())
        })?;
        debug!(name, "loading example");
        self.output = preset.output.to_owned();
        self.config_text = preset.config.to_owned();
        self.apply_config_text();
        Ok(())
    }

    fn apply_config_text(&mut self) {
        match config::parse(&self.config_text) {
            Ok(config) => {
                self.config = Some(config);
                self.config_error = None;
                self.recompute();
            }
            Err(err) => {
                debug!(error = %err, "configuration text did not decode");
                self.config_error = Some(err);
            }
        }
    }

    fn recompute(&mut self) {
        let Some(config) = &self.config else {
            self.outcome = Outcome::None;
            return;
        };
        self.outcome = match invoke(config, &self.output, &self.options) {
            Ok(diagnostics) => {
                debug!(
                    owner = %config.owner,
                    count = diagnostics.len(),
                    "recomputed matches"
                );
                Outcome::Matched(diagnostics)
            }
            Err(err) => {
                warn!(error = %err, "match failed");
                Outcome::Failed(err)
            }
        };
    }

    pub fn output(&self) -> &str {
        &self.output
    }

    pub fn config_text(&self) -> &str {
        &self.config_text
    }

    /// The last configuration that decoded successfully.
    pub fn config(&self) -> Option<&MatcherConfig> {
        self.config.as_ref()
    }

    pub fn config_error(&self) -> Option<&ConfigError> {
        self.config_error.as_ref()
    }

    /// Diagnostics from the last successful match, if the last attempt succeeded.
    pub fn matches(&self) -> Option<&[Diagnostic]> {
        match &self.outcome {
            Outcome::Matched(diagnostics) => Some(diagnostics),
            _ => None,
        }
    }

    /// Engine failure from the last match attempt, if it failed.
    pub fn match_error(&self) -> Option<&MatchError> {
        match &self.outcome {
            Outcome::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// Label the current combination of fields.
    pub fn state(&self) -> SessionState {
        if self.config_error.is_some() {
            SessionState::ConfigInvalid
        } else if self.match_error().is_some() {
            SessionState::MatchFailed
        } else if self.matches().is_some() {
            SessionState::Valid
        } else if self.output.is_empty() && self.config_text.is_empty() {
            SessionState::Empty
        } else {
            SessionState::Editing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &str = r#"{"owner":"simple","pattern":[{"regexp":"^(\\S+):(\\d+)$","file":1,"line":2}]}"#;

    fn valid_session() -> Session {
        let mut session = Session::new();
        session.edit_output("a.rs:3");
        session.edit_configuration(SIMPLE);
        session
    }

    #[test]
    fn starts_empty() {
        let session = Session::new();
        assert_eq!(session.state(), SessionState::Empty);
        assert_eq!(session.output(), "");
        assert_eq!(session.config_text(), "");
        assert!(session.config().is_none());
        assert!(session.config_error().is_none());
        assert!(session.matches().is_none());
        assert!(session.match_error().is_none());
    }

    #[test]
    fn output_edit_without_config_does_not_match() {
        let mut session = Session::new();
        session.edit_output("a.rs:3");
        assert_eq!(session.state(), SessionState::Editing);
        assert!(session.matches().is_none());
        assert!(session.match_error().is_none());
    }

    #[test]
    fn valid_config_recomputes() {
        let session = valid_session();
        assert_eq!(session.state(), SessionState::Valid);
        let matches = session.matches().unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].file.as_deref(), Some("a.rs"));
        assert_eq!(matches[0].line, Some(3));
    }

    #[test]
    fn output_edit_uses_current_config() {
        let mut session = valid_session();
        session.edit_output("b.rs:9\nc.rs:10");
        let matches = session.matches().unwrap();
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[1].file.as_deref(), Some("c.rs"));
    }

    #[test]
    fn repeated_output_edit_is_idempotent() {
        let mut session = valid_session();
        session.edit_output("z.rs:1");
        let first = session.matches().map(<[Diagnostic]>::to_vec);
        session.edit_output("z.rs:1");
        assert_eq!(session.matches().map(<[Diagnostic]>::to_vec), first);
        assert!(session.match_error().is_none());
    }

    #[test]
    fn invalid_config_keeps_last_valid_state() {
        let mut session = valid_session();
        let before_config = session.config().cloned();
        let before_matches = session.matches().map(<[Diagnostic]>::to_vec);

        session.edit_configuration(r#"{"owner":"simple","pattern":[{"regexp":"#);

        assert_eq!(session.state(), SessionState::ConfigInvalid);
        assert!(session.config_error().is_some());
        assert_eq!(session.config().cloned(), before_config);
        assert_eq!(session.matches().map(<[Diagnostic]>::to_vec), before_matches);
        assert_eq!(
            session.config_text(),
            r#"{"owner":"simple","pattern":[{"regexp":"#
        );
    }

    #[test]
    fn output_edit_while_config_invalid_uses_last_valid_config() {
        let mut session = valid_session();
        session.edit_configuration("{");
        session.edit_output("q.rs:42");
        assert!(session.config_error().is_some());
        assert_eq!(session.matches().unwrap()[0].line, Some(42));
    }

    #[test]
    fn valid_config_after_invalid_clears_error() {
        let mut session = valid_session();
        session.edit_configuration("{");
        session.edit_configuration(
            r#"{"owner":"other","pattern":[{"regexp":"^(\\S+):","file":1}]}"#,
        );
        assert!(session.config_error().is_none());
        assert_eq!(session.config().unwrap().owner, "other");
        assert_eq!(session.matches().unwrap()[0].line, None);
        assert_eq!(session.state(), SessionState::Valid);
    }

    #[test]
    fn engine_failure_replaces_matches_with_error() {
        let mut session = valid_session();
        session.edit_configuration(r#"{"owner":"bad","pattern":[{"regexp":"(.*)","file":5}]}"#);
        assert_eq!(session.state(), SessionState::MatchFailed);
        assert!(session.matches().is_none());
        assert!(session.match_error().is_some());
        assert!(session.config_error().is_none());
    }

    #[test]
    fn fixing_config_after_match_failure_recovers() {
        let mut session = valid_session();
        session.edit_configuration(r#"{"owner":"bad","pattern":[{"regexp":"(","file":1}]}"#);
        assert!(session.match_error().is_some());
        session.edit_configuration(SIMPLE);
        assert!(session.match_error().is_none());
        assert_eq!(session.matches().unwrap().len(), 1);
    }

    #[test]
    fn load_example_overwrites_both_texts() {
        let mut session = valid_session();
        session.edit_configuration("not json");
        session.load_example("eslint-compact").unwrap();
        let preset = presets::find("eslint-compact").unwrap();
        assert_eq!(session.output(), preset.output);
        assert_eq!(session.config_text(), preset.config);
        assert!(session.config_error().is_none());
        assert_eq!(session.state(), SessionState::Valid);
    }

    #[test]
    fn unknown_example_leaves_session_untouched() {
        let mut session = valid_session();
        let err = session.load_example("nope").unwrap_err();
        assert_eq!(err, SessionError::InvalidExampleName("nope".into()));
        assert_eq!(session.output(), "a.rs:3");
        assert_eq!(session.config_text(), SIMPLE);
        assert_eq!(session.matches().unwrap().len(), 1);
    }

    #[test]
    fn engine_options_are_applied() {
        let mut session = Session::with_options(EngineOptions {
            regex_size_limit: 32,
        });
        session.edit_output("x");
        session.edit_configuration(r#"{"owner":"big","pattern":[{"regexp":"\\w{500}"}]}"#);
        assert_eq!(session.state(), SessionState::MatchFailed);
    }
}
