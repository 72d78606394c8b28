use std::collections::VecDeque;

use crate::command::Command;
use crate::event::TerminalEvent;
use crate::model::Model;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::Terminal;

/// A headless harness that drives a [`Model`] without a real terminal.
///
/// Messages are processed exactly like the [`Program`](crate::Program) event
/// loop does: each `update` runs to completion and the messages its command
/// produces are processed right after, in order.
///
/// ```rust,ignore
/// use matchlab::testing::TestProgram;
///
/// let mut prog = TestProgram::<Playground>::new(AppFlags::default());
/// prog.send(Msg::LoadExample("eslint-compact".into()));
/// assert!(prog.model().session().matches().is_some());
/// assert!(prog.render_string(100, 30).contains("badFile.js"));
/// ```
pub struct TestProgram<M: Model> {
    model: M,
    pending: VecDeque<M::Message>,
    quit_requested: bool,
}

impl<M: Model> TestProgram<M> {
    /// Call [`Model::init`] and process the messages its command produces.
    pub fn new(flags: M::Flags) -> Self {
        let (model, init_cmd) = M::init(flags);
        let mut program = Self {
            model,
            pending: VecDeque::new(),
            quit_requested: false,
        };
        program.enqueue(init_cmd);
        program.drain();
        program
    }

    /// Send a message and process everything it triggers.
    pub fn send(&mut self, msg: M::Message) {
        self.pending.push_back(msg);
        self.drain();
    }

    /// Feed a terminal event through [`Model::on_event`], as the runtime would.
    pub fn send_event(&mut self, event: TerminalEvent) {
        if let Some(msg) = self.model.on_event(event) {
            self.send(msg);
        }
    }

    /// Whether any processed command asked the program to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Get a shared reference to the model for assertions.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Render the model to a ratatui [`Buffer`] of the given dimensions.
    pub fn render(&self, width: u16, height: u16) -> Buffer {
        let backend = ratatui::backend::TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| {
                self.model.view(frame);
            })
            .unwrap();
        terminal.backend().buffer().clone()
    }

    /// Render the model and return the visible content as a plain string,
    /// one buffer row per line.
    pub fn render_string(&self, width: u16, height: u16) -> String {
        let buf = self.render(width, height);
        let area = Rect::new(0, 0, width, height);
        let mut output = String::new();
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                output.push_str(buf[(x, y)].symbol());
            }
            if y < area.bottom() - 1 {
                output.push('\n');
            }
        }
        output
    }

    fn enqueue(&mut self, cmd: Command<M::Message>) {
        let (messages, quit) = cmd.into_parts();
        self.pending.extend(messages);
        self.quit_requested |= quit;
    }

    fn drain(&mut self) {
        while let Some(msg) = self.pending.pop_front() {
            let cmd = self.model.update(msg);
            self.enqueue(cmd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    // A minimal model that records the order messages arrive in.
    struct Recorder {
        steps: Vec<String>,
    }

    #[derive(Debug)]
    enum RecMsg {
        Start,
        Step(String),
        Quit,
    }

    impl Model for Recorder {
        type Message = RecMsg;
        type Flags = bool;

        fn init(start: bool) -> (Self, Command<RecMsg>) {
            let cmd = if start {
                Command::message(RecMsg::Start)
            } else {
                Command::none()
            };
            (Recorder { steps: vec![] }, cmd)
        }

        fn update(&mut self, msg: RecMsg) -> Command<RecMsg> {
            match msg {
                RecMsg::Start => {
                    self.steps.push("started".into());
                    Command::batch([
                        Command::message(RecMsg::Step("a".into())),
                        Command::message(RecMsg::Step("b".into())),
                    ])
                }
                RecMsg::Step(s) => {
                    self.steps.push(s);
                    Command::none()
                }
                RecMsg::Quit => Command::quit(),
            }
        }

        fn view(&self, frame: &mut ratatui::Frame) {
            frame.render_widget(Paragraph::new(self.steps.join(", ")), frame.area());
        }

        fn on_event(&self, event: TerminalEvent) -> Option<RecMsg> {
            match event {
                TerminalEvent::Paste(text) => Some(RecMsg::Step(text)),
                _ => None,
            }
        }
    }

    #[test]
    fn init_command_is_processed() {
        let prog = TestProgram::<Recorder>::new(true);
        assert_eq!(prog.model().steps, vec!["started", "a", "b"]);
    }

    #[test]
    fn send_processes_follow_up_messages_in_order() {
        let mut prog = TestProgram::<Recorder>::new(false);
        prog.send(RecMsg::Start);
        prog.send(RecMsg::Step("c".into()));
        assert_eq!(prog.model().steps, vec!["started", "a", "b", "c"]);
    }

    #[test]
    fn send_event_routes_through_on_event() {
        let mut prog = TestProgram::<Recorder>::new(false);
        prog.send_event(TerminalEvent::Paste("pasted".into()));
        prog.send_event(TerminalEvent::Resize(10, 10));
        assert_eq!(prog.model().steps, vec!["pasted"]);
    }

    #[test]
    fn quit_is_recorded() {
        let mut prog = TestProgram::<Recorder>::new(false);
        assert!(!prog.quit_requested());
        prog.send(RecMsg::Quit);
        assert!(prog.quit_requested());
    }

    #[test]
    fn render_string_shows_view() {
        let prog = TestProgram::<Recorder>::new(true);
        assert!(prog.render_string(40, 1).contains("started, a, b"));
    }
}
