use std::collections::VecDeque;
use std::io::{self, stdout, Stdout};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste, EventStream},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle,
    },
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::command::Command;
use crate::event::TerminalEvent;
use crate::logging;
use crate::model::Model;

/// Errors that can occur while initializing or running a [`Program`].
#[derive(Debug, thiserror::Error)]
pub enum ProgramError {
    /// An I/O error from terminal setup, rendering, teardown, or the log file.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// The log subscriber could not be installed.
    #[error("failed to install logger: {0}")]
    Logging(String),
}

/// Configuration options for a [`Program`].
///
/// Override only what you need with struct update syntax:
///
/// ```rust,ignore
/// let opts = ProgramOptions {
///     log_file: Some("matchlab.log".into()),
///     ..ProgramOptions::default()
/// };
/// ```
pub struct ProgramOptions {
    /// Target frames per second (default: 30, clamped to 1..=120).
    pub fps: u32,
    /// Render in the alternate screen (default: true).
    pub alt_screen: bool,
    /// Enable bracketed paste so pasted logs arrive as one event (default: true).
    pub bracketed_paste: bool,
    /// Terminal title.
    pub title: Option<String>,
    /// Restore the terminal before a panic message is printed (default: true).
    pub catch_panics: bool,
    /// Quit on SIGINT delivered outside raw mode (default: true).
    pub handle_signals: bool,
    /// Append `tracing` output to this file.
    pub log_file: Option<std::path::PathBuf>,
}

impl Default for ProgramOptions {
    fn default() -> Self {
        Self {
            fps: 30,
            alt_screen: true,
            bracketed_paste: true,
            title: Some("matchlab".into()),
            catch_panics: true,
            handle_signals: true,
            log_file: None,
        }
    }
}

/// Wires a [`Model`] to the terminal and drives it until it quits.
///
/// Messages are processed strictly one at a time: each `update` runs to
/// completion, and any messages its [`Command`] produces are queued behind
/// it. Rendering happens on the frame tick, only when something changed.
pub struct Program<M: Model> {
    model: M,
    terminal: Terminal<CrosstermBackend<Stdout>>,
    options: ProgramOptions,
    queue: VecDeque<M::Message>,
    needs_redraw: bool,
    should_quit: bool,
}

impl<M: Model> Program<M> {
    /// Create a program with default options.
    pub fn new(flags: M::Flags) -> Result<Self, ProgramError> {
        Self::with_options(flags, ProgramOptions::default())
    }

    /// Create a program with custom options.
    ///
    /// Installs the file logger (if configured) before the model is
    /// initialized so `init` can already log.
    pub fn with_options(flags: M::Flags, options: ProgramOptions) -> Result<Self, ProgramError> {
        if let Some(path) = &options.log_file {
            logging::log_to_file(path)?;
        }

        let (model, init_cmd) = M::init(flags);
        let terminal = init_terminal(&options)?;

        let mut program = Self {
            model,
            terminal,
            options,
            queue: VecDeque::new(),
            needs_redraw: true,
            should_quit: false,
        };
        info!("program initialized");
        program.execute(init_cmd);
        Ok(program)
    }

    /// Run until the model quits. Returns the final model.
    pub async fn run(mut self) -> Result<M, ProgramError> {
        let result = self.event_loop().await;
        info!("shutting down");
        restore_terminal(&self.options)?;
        result?;
        Ok(self.model)
    }

    async fn event_loop(&mut self) -> Result<(), ProgramError> {
        self.drain_queue();
        self.render()?;

        let fps = self.options.fps.clamp(1, 120);
        let mut frame_interval =
            tokio::time::interval(Duration::from_secs_f64(1.0 / fps as f64));
        frame_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let handle_signals = self.options.handle_signals;
        let mut events = EventStream::new();

        while !self.should_quit {
            tokio::select! {
                biased;

                _ = tokio::signal::ctrl_c(), if handle_signals => {
                    debug!("received ctrl+c signal");
                    return Ok(());
                }

                event = events.next() => match event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(err)) => return Err(err.into()),
                    None => return Ok(()),
                },

                _ = frame_interval.tick() => {
                    if self.needs_redraw {
                        self.render()?;
                        self.needs_redraw = false;
                    }
                }
            }
        }
        Ok(())
    }

    fn handle_event(&mut self, event: crossterm::event::Event) {
        let Some(event) = TerminalEvent::from_crossterm(event) else {
            return;
        };
        if matches!(event, TerminalEvent::Resize(..)) {
            self.needs_redraw = true;
        }
        if let Some(msg) = self.model.on_event(event) {
            self.queue.push_back(msg);
            self.drain_queue();
        }
    }

    /// Run `update` for every queued message, including the ones each update
    /// enqueues, before returning to the event loop.
    fn drain_queue(&mut self) {
        while let Some(msg) = self.queue.pop_front() {
            let cmd = self.model.update(msg);
            self.execute(cmd);
            self.needs_redraw = true;
            if self.should_quit {
                self.queue.clear();
                break;
            }
        }
    }

    fn execute(&mut self, cmd: Command<M::Message>) {
        let (messages, quit) = cmd.into_parts();
        self.queue.extend(messages);
        if quit {
            self.should_quit = true;
        }
    }

    fn render(&mut self) -> Result<(), ProgramError> {
        self.terminal.draw(|frame| self.model.view(frame))?;
        Ok(())
    }
}

fn init_terminal(options: &ProgramOptions) -> Result<Terminal<CrosstermBackend<Stdout>>, ProgramError> {
    // Install the panic hook once so repeated programs don't stack hooks.
    if options.catch_panics {
        use std::sync::Once;
        static HOOK_INSTALLED: Once = Once::new();
        let alt_screen = options.alt_screen;
        HOOK_INSTALLED.call_once(|| {
            let original_hook = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let _ = restore_terminal_minimal(alt_screen);
                original_hook(info);
            }));
        });
    }

    enable_raw_mode()?;
    let mut writer = stdout();
    if options.alt_screen {
        execute!(writer, EnterAlternateScreen)?;
    }
    if options.bracketed_paste {
        execute!(writer, EnableBracketedPaste)?;
    }
    if let Some(title) = &options.title {
        execute!(writer, SetTitle(title))?;
    }
    execute!(writer, cursor::Hide)?;

    Ok(Terminal::new(CrosstermBackend::new(writer))?)
}

fn restore_terminal(options: &ProgramOptions) -> Result<(), ProgramError> {
    restore_terminal_minimal(options.alt_screen)?;
    Ok(())
}

fn restore_terminal_minimal(alt_screen: bool) -> Result<(), io::Error> {
    // Best effort: keep restoring even if a step fails.
    let raw = disable_raw_mode();
    let mut writer = stdout();
    execute!(writer, DisableBracketedPaste).ok();
    execute!(writer, cursor::Show).ok();
    if alt_screen {
        execute!(writer, LeaveAlternateScreen).ok();
    }
    raw
}
