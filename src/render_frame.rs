//! The double-buffered screen: a front buffer (last flushed contents) and
//! a back buffer (being drawn for the frame in progress), diffed and
//! flushed through a [`crate::renderer::Renderer`].

use crate::buffer::CellBuffer;
use crate::error::Result;
use crate::geometry::{Rect, Size};
use crate::renderer::Renderer;
use crate::style::Style;
use crate::terminal::Terminal;

/// Owns the front/back cell buffers and the terminal they render to.
pub struct Screen<T: Terminal> {
    front: CellBuffer,
    back: CellBuffer,
    terminal: T,
    renderer: Renderer,
}

impl<T: Terminal> Screen<T> {
    /// Create a screen sized to the terminal's current dimensions.
    pub fn new(terminal: T) -> Result<Self> {
        let size = terminal.size()?;
        let capabilities = terminal.capabilities();
        Ok(Self {
            front: CellBuffer::new(size),
            back: CellBuffer::new(size),
            terminal,
            renderer: Renderer::new(capabilities),
        })
    }

    /// Current screen size.
    pub fn size(&self) -> Size {
        self.back.size()
    }

    /// Resize both buffers, preserving overlapping content. The next
    /// [`Self::end_frame`] will see the whole screen as dirty since the
    /// front buffer's shape no longer matches.
    pub fn resize(&mut self, size: Size) {
        self.front.resize(size);
        self.back.resize(size);
    }

    /// Begin a frame: clears the back buffer to `style` and returns a
    /// [`RenderFrame`] clipped to the full screen for the application to
    /// draw into.
    pub fn begin_frame(&mut self, style: Style) -> RenderFrame<'_> {
        self.back.fill(style);
        let bounds = Rect::new(0, 0, self.back.size().width, self.back.size().height);
        RenderFrame {
            buffer: &mut self.back,
            bounds,
        }
    }

    /// Diff the back buffer against the front buffer, flush only the
    /// changed spans to the terminal, and promote the back buffer to be
    /// the new front buffer.
    pub fn end_frame(&mut self) -> Result<()> {
        let spans = self.back.diff(&self.front);
        if !spans.is_empty() {
            self.renderer
                .flush(&mut self.terminal, &self.back, &spans)?;
        }
        std::mem::swap(&mut self.front, &mut self.back);
        Ok(())
    }

    /// Access the underlying terminal, e.g. to call [`Terminal::enter`]
    /// before the first frame.
    pub fn terminal_mut(&mut self) -> &mut T {
        &mut self.terminal
    }
}

/// A writable view onto a region of the back buffer, in absolute screen
/// coordinates. All coordinates passed to drawing methods are relative to
/// this frame's `bounds` and are clipped to them.
pub struct RenderFrame<'a> {
    buffer: &'a mut CellBuffer,
    bounds: Rect,
}

impl<'a> RenderFrame<'a> {
    /// The region of the screen this frame is allowed to draw into, in
    /// absolute screen coordinates.
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Borrow a sub-frame clipped to `rect`, interpreted relative to this
    /// frame's own bounds and intersected with them. Widgets receive a
    /// sub-frame bounded to their own layout rect so they cannot draw
    /// outside it.
    pub fn sub_frame(&mut self, rect: Rect) -> RenderFrame<'_> {
        let absolute = Rect::new(
            self.bounds.position.x.saturating_add(rect.position.x),
            self.bounds.position.y.saturating_add(rect.position.y),
            rect.size.width,
            rect.size.height,
        );
        let clipped = absolute.intersection(self.bounds).unwrap_or(Rect::new(
            absolute.position.x,
            absolute.position.y,
            0,
            0,
        ));
        RenderFrame {
            buffer: self.buffer,
            bounds: clipped,
        }
    }

    /// Set a single cell at `(x, y)` relative to this frame's bounds.
    pub fn set_cell(&mut self, x: u16, y: u16, rune: char, style: Style) {
        if x >= self.bounds.size.width || y >= self.bounds.size.height {
            return;
        }
        let abs_x = self.bounds.position.x + x;
        let abs_y = self.bounds.position.y + y;
        self.buffer
            .print(abs_x, abs_y, &rune.to_string(), style);
    }

    /// Print `text` starting at `(x, y)` relative to this frame's bounds,
    /// clipped at the frame's right edge.
    pub fn print_styled(&mut self, x: u16, y: u16, text: &str, style: Style) {
        if y >= self.bounds.size.height || x >= self.bounds.size.width {
            return;
        }
        let abs_x = self.bounds.position.x + x;
        let abs_y = self.bounds.position.y + y;
        let max_width = (self.bounds.size.width - x) as usize;
        let clipped: String = clip_to_width(text, max_width);
        self.buffer.print(abs_x, abs_y, &clipped, style);
    }

    /// Fill the entire frame with blank cells of `style`.
    pub fn fill_styled(&mut self, style: Style) {
        for y in 0..self.bounds.size.height {
            let abs_y = self.bounds.position.y + y;
            let blank = " ".repeat(self.bounds.size.width as usize);
            self.buffer.print(self.bounds.position.x, abs_y, &blank, style.clone());
        }
    }

    /// Print `text` as an OSC-8 hyperlink pointing at `url`, starting at
    /// `(x, y)` relative to this frame's bounds.
    pub fn print_hyperlink(&mut self, x: u16, y: u16, text: &str, url: &str, style: Style) {
        self.print_styled(x, y, text, style.with_url(Some(url.to_string())));
    }
}

fn clip_to_width(text: &str, max_width: usize) -> String {
    use unicode_width::UnicodeWidthChar;
    let mut out = String::new();
    let mut used = 0usize;
    for ch in text.chars() {
        let w = UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max_width {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
