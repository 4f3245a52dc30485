//! Terminal backend abstraction: raw-mode/alt-screen/mouse-capture
//! plumbing and the capability set a backend exposes.

mod capabilities;
mod crossterm_backend;
mod test_backend;

pub use capabilities::{ColorSupport, TerminalCapabilities};
pub use crossterm_backend::CrosstermTerminal;
pub use test_backend::TestBackend;

use crate::error::Result;
use crate::geometry::Size;

/// Low-level terminal I/O: raw-mode lifecycle, output, and size queries.
///
/// Implementations own the underlying tty (or an in-memory stand-in for
/// tests) and are responsible for restoring normal terminal state on drop
/// even if the process is unwinding from a panic.
pub trait Terminal: Send {
    /// Enter raw mode and the alternate screen, hide the cursor, and enable
    /// whatever input reporting modes the capability set calls for
    /// (bracketed paste, mouse, focus events).
    fn enter(&mut self) -> Result<()>;

    /// Leave the alternate screen and restore cooked mode and the cursor.
    /// Must be safe to call more than once and safe to call even if
    /// `enter` was never called.
    fn leave(&mut self) -> Result<()>;

    /// Write raw bytes (already-composed escape sequences) to the
    /// terminal's output stream.
    fn write(&mut self, bytes: &[u8]) -> Result<()>;

    /// Flush buffered output.
    fn flush(&mut self) -> Result<()>;

    /// Current terminal size in cells.
    fn size(&self) -> Result<Size>;

    /// The capabilities detected (or assumed) for this backend.
    fn capabilities(&self) -> TerminalCapabilities;
}
