use crate::command::Command;
use crate::event::TerminalEvent;
use ratatui::Frame;

/// The top-level application trait, following the [Elm Architecture].
///
/// The runtime drives an **init -> update -> view** cycle:
///
/// 1. [`init`](Model::init) creates the initial state and may return a
///    [`Command`] (e.g. "load this preset").
/// 2. [`view`](Model::view) renders the current state.
/// 3. Terminal input is translated into messages by
///    [`on_event`](Model::on_event).
/// 4. [`update`](Model::update) processes each message to completion before
///    the next one is taken, so state is never mutated concurrently.
///
/// [Elm Architecture]: https://guide.elm-lang.org/architecture/
pub trait Model: Sized {
    /// Every event that can affect the application state.
    type Message;

    /// Start-up data passed to [`Model::init`].
    type Flags;

    /// Create the initial model state and an optional startup command.
    fn init(flags: Self::Flags) -> (Self, Command<Self::Message>);

    /// Process a message, mutate state, and return a follow-up command.
    fn update(&mut self, msg: Self::Message) -> Command<Self::Message>;

    /// Render the current state. Must not mutate anything.
    fn view(&self, frame: &mut Frame);

    /// Map a terminal event to a message, or `None` to ignore it.
    ///
    /// Called with the current state so routing can depend on focus.
    fn on_event(&self, event: TerminalEvent) -> Option<Self::Message>;
}
