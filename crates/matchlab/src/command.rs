/// A follow-up returned from [`Model::update`](crate::Model::update) or
/// [`Model::init`](crate::Model::init).
///
/// The playground does all of its work synchronously inside `update`, so a
/// command is only ever "send this message next", "quit", or a batch of those.
///
/// ```rust,ignore
/// // Load a preset as soon as the program starts:
/// let cmd = Command::message(Msg::LoadExample("eslint-compact".into()));
/// ```
pub struct Command<Msg> {
    pub(crate) inner: CommandInner<Msg>,
}

pub(crate) enum CommandInner<Msg> {
    None,
    Message(Msg),
    Quit,
    Batch(Vec<Command<Msg>>),
}

impl<Msg> Command<Msg> {
    /// No-op command.
    pub fn none() -> Self {
        Command {
            inner: CommandInner::None,
        }
    }

    /// Deliver `msg` to `update` on the next turn of the event loop.
    pub fn message(msg: Msg) -> Self {
        Command {
            inner: CommandInner::Message(msg),
        }
    }

    /// Quit the program.
    pub fn quit() -> Self {
        Command {
            inner: CommandInner::Quit,
        }
    }

    /// Combine several commands; they are executed in order.
    pub fn batch(cmds: impl IntoIterator<Item = Command<Msg>>) -> Self {
        let mut cmds: Vec<_> = cmds.into_iter().filter(|c| !c.is_none()).collect();
        match cmds.len() {
            0 => Command::none(),
            1 => cmds.pop().unwrap_or_else(Command::none),
            _ => Command {
                inner: CommandInner::Batch(cmds),
            },
        }
    }

    /// Transform the message type (for component composition).
    pub fn map<NewMsg>(self, f: impl Fn(Msg) -> NewMsg) -> Command<NewMsg> {
        self.map_with(&f)
    }

    fn map_with<NewMsg>(self, f: &dyn Fn(Msg) -> NewMsg) -> Command<NewMsg> {
        let inner = match self.inner {
            CommandInner::None => CommandInner::None,
            CommandInner::Message(msg) => CommandInner::Message(f(msg)),
            CommandInner::Quit => CommandInner::Quit,
            CommandInner::Batch(cmds) => {
                CommandInner::Batch(cmds.into_iter().map(|cmd| cmd.map_with(f)).collect())
            }
        };
        Command { inner }
    }

    /// Flatten into the messages this command would deliver, in order, plus
    /// whether it requests a quit.
    pub(crate) fn into_parts(self) -> (Vec<Msg>, bool) {
        let mut messages = Vec::new();
        let mut quit = false;
        self.collect(&mut messages, &mut quit);
        (messages, quit)
    }

    fn collect(self, messages: &mut Vec<Msg>, quit: &mut bool) {
        match self.inner {
            CommandInner::None => {}
            CommandInner::Message(msg) => messages.push(msg),
            CommandInner::Quit => *quit = true,
            CommandInner::Batch(cmds) => {
                for cmd in cmds {
                    cmd.collect(messages, quit);
                }
            }
        }
    }

    // --- Inspection methods (useful for testing) ---

    /// Returns `true` if this is a no-op command.
    pub fn is_none(&self) -> bool {
        matches!(self.inner, CommandInner::None)
    }

    /// Returns `true` if this command is a quit request.
    pub fn is_quit(&self) -> bool {
        matches!(self.inner, CommandInner::Quit)
    }

    /// If this command is a single message, return it.
    pub fn into_message(self) -> Option<Msg> {
        match self.inner {
            CommandInner::Message(msg) => Some(msg),
            _ => None,
        }
    }
}
