//! Widgets used by the playground.
//!
//! - [`text_area`]: multi-line editor for the output and configuration panes
//! - [`results`]: scrollable outcome pane (banner, alert, JSON)
//! - [`chrome`]: border helpers reflecting focus and validity

pub mod chrome;
pub mod results;
pub mod text_area;

pub use results::ResultsPanel;
pub use text_area::TextArea;
