//! An in-memory [`Terminal`] for deterministic tests.

use super::{Terminal, TerminalCapabilities};
use crate::error::Result;
use crate::geometry::Size;

/// Records everything written to it instead of touching a real tty.
/// Size is fixed at construction and can be changed with
/// [`TestBackend::set_size`] to simulate a resize.
pub struct TestBackend {
    size: Size,
    capabilities: TerminalCapabilities,
    written: Vec<u8>,
    entered: bool,
}

impl TestBackend {
    /// Create a backend of the given size with default capabilities.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            capabilities: TerminalCapabilities::default(),
            written: Vec::new(),
            entered: false,
        }
    }

    /// Create a backend with explicit capabilities, e.g. to exercise the
    /// color-downgrade path.
    pub fn with_capabilities(size: Size, capabilities: TerminalCapabilities) -> Self {
        Self {
            size,
            capabilities,
            written: Vec::new(),
            entered: false,
        }
    }

    /// Every byte written since construction (or the last [`Self::take_written`]).
    pub fn written(&self) -> &[u8] {
        &self.written
    }

    /// Take and clear the accumulated written bytes.
    pub fn take_written(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.written)
    }

    /// Simulate a terminal resize.
    pub fn set_size(&mut self, size: Size) {
        self.size = size;
    }

    /// Whether `enter` has been called without a matching `leave`.
    pub fn is_entered(&self) -> bool {
        self.entered
    }
}

impl Terminal for TestBackend {
    fn enter(&mut self) -> Result<()> {
        self.entered = true;
        Ok(())
    }

    fn leave(&mut self) -> Result<()> {
        self.entered = false;
        Ok(())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<()> {
        self.written.extend_from_slice(bytes);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn size(&self) -> Result<Size> {
        Ok(self.size)
    }

    fn capabilities(&self) -> TerminalCapabilities {
        self.capabilities
    }
}
