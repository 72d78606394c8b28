//! Core of **matchlab**, a playground for problem matcher configurations.
//!
//! A problem matcher is a JSON object describing how to pull structured
//! diagnostics (file, line, column, severity, message, code) out of raw tool
//! output with one or more regular expressions. `matchlab-core` holds
//! everything except the terminal UI:
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Decode configuration text into a [`MatcherConfig`] |
//! | [`engine`] | Apply a matcher to output text, producing [`Diagnostic`]s |
//! | [`invoke`] | Call the engine, converting failures into a [`MatchError`] |
//! | [`presets`] | Built-in example configuration/output pairs |
//! | [`session`] | The [`Session`] state machine tying it all together |
//!
//! # Example
//!
//! ```
//! use matchlab_core::Session;
//!
//! let mut session = Session::new();
//! session.load_example("eslint-compact").unwrap();
//!
//! let diagnostics = session.matches().unwrap();
//! assert_eq!(diagnostics[0].file.as_deref(), Some("badFile.js"));
//! assert_eq!(diagnostics[0].line, Some(50));
//!
//! // A broken edit keeps the last good result visible.
//! session.edit_configuration("{not valid json");
//! assert!(session.config_error().is_some());
//! assert!(session.matches().is_some());
//! ```

pub mod config;
pub mod engine;
pub mod invoke;
pub mod presets;
pub mod session;

pub use config::{parse, ConfigError, ConfigErrorKind, Field, MatcherConfig, PatternRule};
pub use engine::{CompiledMatcher, Diagnostic, EngineError, EngineOptions};
pub use invoke::{invoke, MatchError};
pub use presets::{list_examples, Preset, PRESETS};
pub use session::{Session, SessionError, SessionState};
