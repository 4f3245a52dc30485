//! The cooperative, multi-threaded event loop: one task owns application
//! state and the screen, one reads raw input bytes, one drives spawned
//! [`Command`] futures to completion. All three communicate only through
//! bounded channels; nothing but the main task ever touches app state.

use std::io::Read;
use std::time::Duration;

use futures::FutureExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::command::Command;
use crate::event::{Event, TickEvent};
use crate::key_decoder::KeyDecoder;
use crate::render_frame::Screen;
use crate::terminal::Terminal;

/// Channel capacity shared by the events/commands queues. Bounded so a
/// runaway command producer applies backpressure rather than growing
/// memory without limit.
const CHANNEL_CAPACITY: usize = 100;

/// Tuning knobs for [`Runtime::run`].
#[derive(Clone, Copy, Debug)]
pub struct RuntimeConfig {
    /// Interval between [`Event::Tick`] deliveries.
    pub tick_interval: Duration,
    /// How long the input reader waits with no new bytes before flushing
    /// a lone `ESC` in the decoder as [`crate::event::Key::Escape`].
    pub escape_timeout: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(33), // ~30 Hz
            escape_timeout: Duration::from_millis(25),
        }
    }
}

/// An application's response to one event: updated commands to run and
/// whether the runtime should keep going.
pub struct Outcome {
    /// Commands to spawn as a result of handling the event.
    pub commands: Vec<Command>,
    /// Whether the event loop should stop after this event.
    pub quit: bool,
}

impl Outcome {
    /// Continue running with no new commands.
    pub fn continue_running() -> Self {
        Self { commands: Vec::new(), quit: false }
    }

    /// Stop the event loop after this event.
    pub fn quit() -> Self {
        Self { commands: Vec::new(), quit: true }
    }

    /// Continue running, spawning `commands`.
    pub fn with_commands(commands: Vec<Command>) -> Self {
        Self { commands, quit: false }
    }
}

/// An application driven by the runtime: reacts to events and draws
/// itself each frame.
pub trait Application {
    /// Handle one event, returning any commands to spawn and whether to
    /// keep running.
    fn handle_event(&mut self, event: Event) -> Outcome;

    /// Draw the current state into `frame`.
    fn draw(&self, frame: &mut crate::render_frame::RenderFrame<'_>);
}

/// Drives an [`Application`] against a real or test [`Terminal`].
pub struct Runtime<T: Terminal> {
    screen: Screen<T>,
    config: RuntimeConfig,
}

impl<T: Terminal + 'static> Runtime<T> {
    /// Build a runtime around `terminal` with default tuning.
    pub fn new(terminal: T) -> crate::error::Result<Self> {
        Self::with_config(terminal, RuntimeConfig::default())
    }

    /// Build a runtime with explicit tuning.
    pub fn with_config(terminal: T, config: RuntimeConfig) -> crate::error::Result<Self> {
        Ok(Self {
            screen: Screen::new(terminal)?,
            config,
        })
    }

    /// Run the event loop until the application requests a quit, a fatal
    /// error occurs, or the process is asked to shut down.
    ///
    /// Spawns an input-reader task and a tick task, both feeding a single
    /// bounded events channel; commands the application returns are
    /// spawned individually and post their result back into the same
    /// channel. Only this function's task ever touches `app` or the
    /// screen, so there is exactly one writer to the terminal.
    pub async fn run<A, R>(&mut self, app: &mut A, input: R) -> crate::error::Result<()>
    where
        A: Application,
        R: Read + Send + 'static,
    {
        self.screen.terminal_mut().enter()?;
        let result = self.run_inner(app, input).await;
        let _ = self.screen.terminal_mut().leave();
        result
    }

    async fn run_inner<A, R>(&mut self, app: &mut A, input: R) -> crate::error::Result<()>
    where
        A: Application,
        R: Read + Send + 'static,
    {
        let (tx, mut rx) = mpsc::channel::<Event>(CHANNEL_CAPACITY);

        let tick_tx = tx.clone();
        let tick_interval = self.config.tick_interval;
        let tick_task: JoinHandle<()> = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(tick_interval);
            loop {
                ticker.tick().await;
                let tick = Event::Tick(TickEvent {
                    at: std::time::Instant::now(),
                    interval: tick_interval,
                });
                if tick_tx.send(tick).await.is_err() {
                    break;
                }
            }
        });

        let input_tx = tx.clone();
        let escape_timeout = self.config.escape_timeout;
        let input_task: JoinHandle<()> = tokio::task::spawn_blocking(move || {
            input_reader_loop(input, input_tx, escape_timeout);
        });

        let command_tx = tx.clone();
        drop(tx);

        loop {
            {
                let mut frame = self.screen.begin_frame(crate::style::Style::default());
                app.draw(&mut frame);
            }
            self.screen.end_frame()?;

            let Some(event) = rx.recv().await else {
                break;
            };
            let quit = self.process_event(app, event, &command_tx);
            if quit {
                break;
            }
        }

        tick_task.abort();
        input_task.abort();
        Ok(())
    }

    /// Dispatch one event from the `events` channel to `app`, unpacking
    /// [`Event::Batch`] into its child events (processed in order, with no
    /// render in between per §4.5) and handling [`Event::Resize`] and
    /// [`Event::Quit`] at the runtime level before the application ever
    /// sees them. Returns whether the runtime should stop.
    fn process_event<A: Application>(
        &mut self,
        app: &mut A,
        event: Event,
        command_tx: &mpsc::Sender<Event>,
    ) -> bool {
        match event {
            Event::Batch(events) => {
                for child in events {
                    if self.process_event(app, child, command_tx) {
                        return true;
                    }
                }
                false
            }
            Event::Quit => true,
            other => {
                if let Event::Resize(w, h) = other {
                    self.screen.resize(crate::geometry::Size::new(w, h));
                }
                let outcome = app.handle_event(other);
                for command in outcome.commands {
                    spawn_command(command, command_tx.clone());
                }
                outcome.quit
            }
        }
    }

    /// Access the underlying screen, e.g. to query its size.
    pub fn screen_mut(&mut self) -> &mut Screen<T> {
        &mut self.screen
    }
}

/// Spawn `command`, catching a panic inside it at the task boundary and
/// posting an [`Event::Error`] instead of letting it vanish silently, per
/// the command panic-safety policy in §7.
fn spawn_command(command: Command, reply_tx: mpsc::Sender<Event>) {
    tokio::spawn(async move {
        let result = std::panic::AssertUnwindSafe(command.into_future())
            .catch_unwind()
            .await;
        let event = match result {
            Ok(event) => event,
            Err(_) => Event::Error(crate::error::VtCoreError::InvalidArgument(
                "command panicked".to_string(),
            )),
        };
        let _ = reply_tx.send(event).await;
    });
}

/// Blocking loop reading raw bytes from `input` and feeding them through a
/// [`KeyDecoder`], run on a dedicated blocking thread since a byte source
/// backed by a real tty blocks the OS thread it runs on.
fn input_reader_loop<R: Read>(mut input: R, tx: mpsc::Sender<Event>, escape_timeout: Duration) {
    let mut decoder = KeyDecoder::new();
    let mut buf = [0u8; 1024];
    let _ = escape_timeout; // resolved by a real tty's read timeout in production backends
    loop {
        match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => {
                for event in decoder.feed(&buf[..n]) {
                    if tx.blocking_send(event).is_err() {
                        return;
                    }
                }
            }
            Err(err) => {
                let _ = tx.blocking_send(Event::Error(err.into()));
                break;
            }
        }
    }
}
