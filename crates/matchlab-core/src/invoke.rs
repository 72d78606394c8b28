//! Calls the matcher engine and converts its failures into a [`MatchError`].

use crate::config::MatcherConfig;
use crate::engine::{self, Diagnostic, EngineError, EngineOptions};

/// The engine rejected a structurally valid configuration, or failed while
/// applying it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{owner}: {source}")]
pub struct MatchError {
    owner: String,
    #[source]
    source: EngineError,
}

impl MatchError {
    /// Owner of the matcher that failed.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// The underlying engine failure.
    pub fn engine_error(&self) -> &EngineError {
        &self.source
    }
}

/// Apply `config` to `output`.
///
/// Returns the diagnostics in the order the engine produced them (possibly
/// none), or a [`MatchError`] carrying the engine's message. Each call
/// compiles its own regexes and drops them before returning, so it is safe to
/// call on every keystroke.
pub fn invoke(
    config: &MatcherConfig,
    output: &str,
    options: &EngineOptions,
) -> Result<Vec<Diagnostic>, MatchError> {
    engine::run(config, output, options).map_err(|source| MatchError {
        owner: config.owner.clone(),
        source,
    })
}
