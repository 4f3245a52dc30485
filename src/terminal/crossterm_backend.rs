//! A [`Terminal`] backed by a real tty via `crossterm`.

use std::io::{self, Stdout, Write};

use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};

use super::{ColorSupport, Terminal, TerminalCapabilities};
use crate::error::Result;
use crate::geometry::Size;

/// A [`Terminal`] implementation writing to the process's stdout.
pub struct CrosstermTerminal {
    out: Stdout,
    capabilities: TerminalCapabilities,
    entered: bool,
}

impl CrosstermTerminal {
    /// Construct a backend targeting stdout, detecting capabilities from
    /// the environment.
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            capabilities: detect_capabilities(),
            entered: false,
        }
    }
}

impl Default for CrosstermTerminal {
    fn default() -> Self {
        Self::new()
    }
}

impl Terminal for CrosstermTerminal {
    fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(self.out, EnterAlternateScreen, crossterm::cursor::Hide)?;
        if self.capabilities.bracketed_paste {
            execute!(self.out, crossterm::event::EnableBracketedPaste)?;
        }
        if self.capabilities.mouse {
            execute!(self.out, crossterm::event::EnableMouseCapture)?;
        }
        if self.capabilities.focus_events {
            execute!(self.out, crossterm::event::EnableFocusChange)?;
        }
        self.entered = true;
        tracing::info!("terminal entered raw mode and alternate screen");
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        if !self.entered {
            return Ok(());
        }
        if self.capabilities.mouse {
            let _ = execute!(self.out, crossterm::event::DisableMouseCapture);
        }
        if self.capabilities.bracketed_paste {
            let _ = execute!(self.out, crossterm::event::DisableBracketedPaste);
        }
        if self.capabilities.focus_events {
            let _ = execute!(self.out, crossterm::event::DisableFocusChange);
        }
        let _ = execute!(self.out, crossterm::cursor::Show, LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        self.entered = false;
        tracing::info!("terminal restored to cooked mode");
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.out.write_all(bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }

    fn size(&self) -> Result<Size> {
        let (width, height) = terminal::size()?;
        Ok(Size::new(width, height))
    }

    fn capabilities(&self) -> TerminalCapabilities {
        self.capabilities
    }
}

impl Drop for CrosstermTerminal {
    fn drop(&mut self) {
        if self.entered {
            if let Err(err) = self.leave() {
                tracing::warn!(%err, "failed to restore terminal state on drop");
            }
        }
    }
}

/// Inspect environment variables for color-depth and terminal-family hints.
fn detect_capabilities() -> TerminalCapabilities {
    TerminalCapabilities {
        color_support: detect_color_support(),
        ..TerminalCapabilities::default()
    }
}

fn detect_color_support() -> ColorSupport {
    if std::env::var("NO_COLOR").is_ok() {
        return ColorSupport::NoColor;
    }
    if let Ok(colorterm) = std::env::var("COLORTERM") {
        if colorterm.contains("truecolor") || colorterm.contains("24bit") {
            return ColorSupport::TrueColor;
        }
    }
    match std::env::var("TERM") {
        Ok(term) if term.contains("256color") => ColorSupport::Ansi256,
        Ok(term) if term == "dumb" => ColorSupport::NoColor,
        Ok(_) => ColorSupport::Ansi16,
        Err(_) => ColorSupport::Ansi16,
    }
}
