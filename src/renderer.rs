//! Converts dirty cell spans into a minimal stream of ANSI/VT escape
//! sequences and writes them to a [`Terminal`].

use std::fmt::Write as _;

use crate::buffer::{CellBuffer, DirtySpan};
use crate::color::Color;
use crate::error::Result;
use crate::style::Style;
use crate::terminal::{ColorSupport, Terminal, TerminalCapabilities};

/// Builds and writes the ANSI byte stream for a set of dirty spans.
///
/// Holds the style last emitted, across calls to [`Renderer::flush`], so a
/// style shared by adjacent flushed runs does not re-emit a redundant SGR
/// sequence even across frames.
pub struct Renderer {
    capabilities: TerminalCapabilities,
    last_style: Option<Style>,
}

impl Renderer {
    /// Create a renderer targeting the given capability set.
    pub fn new(capabilities: TerminalCapabilities) -> Self {
        Self {
            capabilities,
            last_style: None,
        }
    }

    /// Emit the escape sequences needed to update `buffer`'s dirty `spans`
    /// on the terminal, then flush the output stream.
    pub fn flush<T: Terminal>(
        &mut self,
        terminal: &mut T,
        buffer: &CellBuffer,
        spans: &[DirtySpan],
    ) -> Result<()> {
        let mut out = String::new();
        if self.capabilities.synchronized_output {
            out.push_str("\x1b[?2026h");
        }
        out.push_str("\x1b[?25l"); // hide cursor while painting

        for span in spans {
            write!(out, "\x1b[{};{}H", span.row + 1, span.start + 1).ok();
            let mut col = span.start;
            while col < span.end {
                let cell = buffer.get(col, span.row);
                let Some(cell) = cell else { break };
                if cell.is_continuation() {
                    col += 1;
                    continue;
                }
                self.emit_sgr(&mut out, cell.style());
                if let Some(url) = cell.style().url() {
                    write!(out, "\x1b]8;;{url}\x1b\\").ok();
                }
                out.push(cell.rune().unwrap_or(' '));
                if cell.style().url().is_some() {
                    out.push_str("\x1b]8;;\x1b\\");
                }
                col += 1;
            }
        }

        if !spans.is_empty() {
            out.push_str("\x1b[0m"); // reset so the terminal isn't left in the last cell's SGR state
            self.last_style = None;
        }

        out.push_str("\x1b[?25h"); // restore cursor visibility
        if self.capabilities.synchronized_output {
            out.push_str("\x1b[?2026l");
        }

        terminal.write(out.as_bytes())?;
        terminal.flush()
    }

    /// Emit an SGR sequence transitioning from the last-emitted style to
    /// `style`, or nothing if they're equivalent after color downgrading.
    fn emit_sgr(&mut self, out: &mut String, style: &Style) {
        if self.last_style.as_ref() == Some(style) {
            return;
        }
        let mut codes: Vec<String> = vec!["0".to_string()];
        let fg = downgrade(style.fg_color(), self.capabilities.color_support);
        let bg = downgrade(style.bg_color(), self.capabilities.color_support);
        push_color_codes(&mut codes, fg, false);
        push_color_codes(&mut codes, bg, true);
        if style.bold() {
            codes.push("1".to_string());
        }
        if style.dim() {
            codes.push("2".to_string());
        }
        if style.italic() {
            codes.push("3".to_string());
        }
        if style.underline() {
            codes.push("4".to_string());
        }
        if style.blink() {
            codes.push("5".to_string());
        }
        if style.reverse() {
            codes.push("7".to_string());
        }
        if style.strike() {
            codes.push("9".to_string());
        }
        write!(out, "\x1b[{}m", codes.join(";")).ok();
        self.last_style = Some(style.clone());
    }
}

fn push_color_codes(codes: &mut Vec<String>, color: Color, background: bool) {
    match color {
        Color::Default => {}
        Color::Indexed(i) => {
            let base = if i < 8 {
                if background { 40 } else { 30 }
            } else if background {
                100
            } else {
                90
            };
            let offset = if i < 8 { i } else { i - 8 };
            codes.push((base + offset as u32).to_string());
        }
        Color::Indexed256(i) => {
            codes.push(if background { "48" } else { "38" }.to_string());
            codes.push("5".to_string());
            codes.push(i.to_string());
        }
        Color::Rgb { r, g, b } => {
            codes.push(if background { "48" } else { "38" }.to_string());
            codes.push("2".to_string());
            codes.push(r.to_string());
            codes.push(g.to_string());
            codes.push(b.to_string());
        }
    }
}

/// Downgrade `color` to the nearest representable value under `support`.
/// Never mutates a stored [`Style`]; downgrading happens only at
/// SGR-emission time.
fn downgrade(color: Color, support: ColorSupport) -> Color {
    match (color, support) {
        (Color::Default, _) => Color::Default,
        (c, ColorSupport::TrueColor) => c,
        (Color::Rgb { r, g, b }, ColorSupport::Ansi256) => Color::Indexed256(rgb_to_256(r, g, b)),
        (Color::Indexed256(i), ColorSupport::Ansi256) => Color::Indexed256(i),
        (c, ColorSupport::Ansi256) => c,
        (Color::Rgb { r, g, b }, ColorSupport::Ansi16) => Color::Indexed(rgb_to_16(r, g, b)),
        (Color::Indexed256(i), ColorSupport::Ansi16) => Color::Indexed(index256_to_16(i)),
        (c @ Color::Indexed(_), ColorSupport::Ansi16) => c,
        (_, ColorSupport::NoColor) => Color::Default,
    }
}

/// Map an RGB triple to the nearest of the 256-palette's 6x6x6 color cube
/// (indices 16-231), by Euclidean distance in each channel's 6-step space.
fn rgb_to_256(r: u8, g: u8, b: u8) -> u8 {
    let to_cube = |c: u8| -> u8 {
        let steps = [0u16, 95, 135, 175, 215, 255];
        steps
            .iter()
            .enumerate()
            .min_by_key(|(_, &v)| (v as i32 - c as i32).abs())
            .map(|(i, _)| i as u8)
            .unwrap_or(0)
    };
    let (cr, cg, cb) = (to_cube(r), to_cube(g), to_cube(b));
    16 + 36 * cr + 6 * cg + cb
}

/// Map an RGB triple to the nearest of the 16 standard ANSI colors by
/// Euclidean distance against the conventional xterm palette.
fn rgb_to_16(r: u8, g: u8, b: u8) -> u8 {
    const PALETTE: [(u8, u8, u8); 16] = [
        (0, 0, 0),
        (205, 0, 0),
        (0, 205, 0),
        (205, 205, 0),
        (0, 0, 238),
        (205, 0, 205),
        (0, 205, 205),
        (229, 229, 229),
        (127, 127, 127),
        (255, 0, 0),
        (0, 255, 0),
        (255, 255, 0),
        (92, 92, 255),
        (255, 0, 255),
        (0, 255, 255),
        (255, 255, 255),
    ];
    nearest(r, g, b, &PALETTE)
}

fn index256_to_16(i: u8) -> u8 {
    if i < 16 {
        return i;
    }
    // Approximate the 256-palette entry's RGB and redo the 16-color match;
    // exact enough for a downgrade path that only runs on low-fidelity
    // terminals.
    if i >= 232 {
        let level = (i - 232) * 10 + 8;
        return rgb_to_16(level, level, level);
    }
    let idx = i - 16;
    let cube = [0u8, 95, 135, 175, 215, 255];
    let r = cube[(idx / 36) as usize];
    let g = cube[((idx / 6) % 6) as usize];
    let b = cube[(idx % 6) as usize];
    rgb_to_16(r, g, b)
}

fn nearest(r: u8, g: u8, b: u8, palette: &[(u8, u8, u8); 16]) -> u8 {
    palette
        .iter()
        .enumerate()
        .min_by_key(|(_, &(pr, pg, pb))| {
            let dr = r as i32 - pr as i32;
            let dg = g as i32 - pg as i32;
            let db = b as i32 - pb as i32;
            dr * dr + dg * dg + db * db
        })
        .map(|(i, _)| i as u8)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::DirtySpan;
    use crate::color::NamedColor;
    use crate::geometry::Size;
    use crate::terminal::TestBackend;

    #[test]
    fn downgrade_truecolor_passthrough() {
        let c = Color::rgb(10, 20, 30);
        assert_eq!(downgrade(c, ColorSupport::TrueColor), c);
    }

    #[test]
    fn downgrade_no_color_clears() {
        let c = Color::rgb(10, 20, 30);
        assert_eq!(downgrade(c, ColorSupport::NoColor), Color::Default);
    }

    #[test]
    fn downgrade_rgb_to_256_picks_cube_entry() {
        let c = downgrade(Color::rgb(255, 0, 0), ColorSupport::Ansi256);
        assert!(matches!(c, Color::Indexed256(_)));
    }

    #[test]
    fn flush_emits_cursor_positioning_and_text() {
        let mut renderer = Renderer::new(TerminalCapabilities::default());
        let mut backend = TestBackend::new(Size::new(5, 1));
        let mut buf = CellBuffer::new(Size::new(5, 1));
        buf.print(0, 0, "hi", Style::new().with_fg(NamedColor::Red.into()));
        let spans = vec![DirtySpan { row: 0, start: 0, end: 2 }];
        renderer.flush(&mut backend, &buf, &spans).unwrap();
        let written = String::from_utf8(backend.take_written().to_vec()).unwrap();
        assert!(written.contains("\x1b[1;1H"));
        assert!(written.contains("\x1b[31m") || written.contains(";31"));
        assert!(written.contains('h'));
        assert!(written.contains('i'));
    }

    #[test]
    fn flush_skips_redundant_sgr_for_same_style() {
        let mut renderer = Renderer::new(TerminalCapabilities::default());
        let mut backend = TestBackend::new(Size::new(5, 1));
        let mut buf = CellBuffer::new(Size::new(5, 1));
        let style = Style::new().with_bold(true);
        buf.print(0, 0, "ab", style);
        let spans = vec![DirtySpan { row: 0, start: 0, end: 2 }];
        renderer.flush(&mut backend, &buf, &spans).unwrap();
        let written = String::from_utf8(backend.take_written().to_vec()).unwrap();
        assert_eq!(written.matches("\x1b[0;1m").count(), 1);
    }

    #[test]
    fn flush_wraps_synchronized_output() {
        let mut renderer = Renderer::new(TerminalCapabilities::default());
        let mut backend = TestBackend::new(Size::new(5, 1));
        let mut buf = CellBuffer::new(Size::new(5, 1));
        buf.print(0, 0, "x", Style::default());
        let spans = vec![DirtySpan { row: 0, start: 0, end: 1 }];
        renderer.flush(&mut backend, &buf, &spans).unwrap();
        let written = String::from_utf8(backend.take_written().to_vec()).unwrap();
        assert!(written.starts_with("\x1b[?2026h"));
        assert!(written.ends_with("\x1b[?2026l"));
    }
}
