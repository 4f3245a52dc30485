//! Detected or assumed terminal feature support.

/// The level of color a terminal is assumed to support. Used at
/// SGR-emission time to downgrade a [`crate::color::Color`] to the nearest
/// representable value; never mutates stored styles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ColorSupport {
    /// No color; all styling collapses to attributes only.
    NoColor,
    /// The 16 standard ANSI colors.
    Ansi16,
    /// The 256-color xterm palette.
    Ansi256,
    /// 24-bit true color.
    #[default]
    TrueColor,
}

/// Feature flags describing what a terminal backend supports, detected
/// from environment variables and terminfo-adjacent heuristics (or set
/// directly for a test backend).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TerminalCapabilities {
    /// Highest color fidelity to target when emitting SGR sequences.
    pub color_support: ColorSupport,
    /// Whether bracketed paste mode can be enabled.
    pub bracketed_paste: bool,
    /// Whether mouse reporting (SGR-extended) can be enabled.
    pub mouse: bool,
    /// Whether focus in/out reporting can be enabled.
    pub focus_events: bool,
    /// Whether OSC-8 hyperlinks are supported.
    pub hyperlinks: bool,
    /// Whether the synchronized-output mode (`CSI ? 2026 h/l`) is
    /// supported, allowing an entire frame to be applied atomically.
    pub synchronized_output: bool,
}

impl Default for TerminalCapabilities {
    fn default() -> Self {
        Self {
            color_support: ColorSupport::default(),
            bracketed_paste: true,
            mouse: true,
            focus_events: true,
            hyperlinks: true,
            synchronized_output: true,
        }
    }
}

impl TerminalCapabilities {
    /// A conservative capability set appropriate for an unrecognized
    /// terminal: 16 colors, no optional reporting modes.
    pub const fn minimal() -> Self {
        Self {
            color_support: ColorSupport::Ansi16,
            bracketed_paste: false,
            mouse: false,
            focus_events: false,
            hyperlinks: false,
            synchronized_output: false,
        }
    }
}
