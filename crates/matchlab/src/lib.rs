//! **matchlab** -- a terminal playground for problem matcher configurations.
//!
//! Paste some tool output, write a matcher, and watch the extracted
//! diagnostics update on every keystroke. The domain logic lives in
//! [`matchlab_core`]; this crate is the terminal front end, built on a small
//! Elm-style runtime:
//!
//! | Type | Purpose |
//! |------|---------|
//! | [`Model`] | Top-level application trait (init / update / view / on_event) |
//! | [`Component`] | Sub-model that renders into a [`ratatui::layout::Rect`] |
//! | [`Command`] | Follow-up message or quit request returned from `update` |
//! | [`Program`] | Wires a [`Model`] to the terminal and drives the event loop |
//! | [`TestProgram`](testing::TestProgram) | Headless harness for unit-testing a [`Model`] |
//! | [`Playground`] | The playground itself |
//!
//! ```ignore
//! #[tokio::main]
//! async fn main() -> Result<(), matchlab::ProgramError> {
//!     let flags = matchlab::AppFlags {
//!         example: Some("eslint-stylish".into()),
//!         ..Default::default()
//!     };
//!     matchlab::run::<matchlab::Playground>(flags).await?;
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod command;
pub mod component;
pub mod event;
pub mod logging;
pub mod model;
pub mod runtime;
pub mod testing;
pub mod widgets;

pub use app::{AppFlags, Msg, Pane, Playground};
pub use command::Command;
pub use component::Component;
pub use event::TerminalEvent;
pub use model::Model;
pub use runtime::{Program, ProgramError, ProgramOptions};

pub use matchlab_core;

/// Run a model with default options.
pub async fn run<M: Model>(flags: M::Flags) -> Result<M, ProgramError> {
    Program::<M>::new(flags)?.run().await
}

/// Run with custom options.
pub async fn run_with<M: Model>(
    flags: M::Flags,
    options: ProgramOptions,
) -> Result<M, ProgramError> {
    Program::<M>::with_options(flags, options)?.run().await
}
