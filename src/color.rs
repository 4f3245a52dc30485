//! Terminal color model: default, 16-indexed, 256-indexed, and 24-bit RGB.

/// A terminal color.
///
/// `Default` defers to the terminal's current fg/bg rather than naming a
/// specific color; it is the "no override" value styles compose against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Color {
    /// Use the terminal's current foreground/background.
    #[default]
    Default,
    /// One of the 16 standard ANSI colors (0-15).
    Indexed(u8),
    /// One of the 256 xterm-indexed colors (0-255).
    Indexed256(u8),
    /// A 24-bit RGB color.
    Rgb {
        /// Red channel.
        r: u8,
        /// Green channel.
        g: u8,
        /// Blue channel.
        b: u8,
    },
}

impl Color {
    /// Construct an RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Rgb { r, g, b }
    }

    /// Parse a `#rgb` or `#rrggbb` hex string (the `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let s = s.strip_prefix('#').unwrap_or(s);
        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16).ok()?;
                let g = u8::from_str_radix(&s[1..2], 16).ok()?;
                let b = u8::from_str_radix(&s[2..3], 16).ok()?;
                Some(Self::rgb(r * 17, g * 17, b * 17))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16).ok()?;
                let g = u8::from_str_radix(&s[2..4], 16).ok()?;
                let b = u8::from_str_radix(&s[4..6], 16).ok()?;
                Some(Self::rgb(r, g, b))
            }
            _ => None,
        }
    }

    /// Whether this is the sentinel "no override" value.
    pub const fn is_default(self) -> bool {
        matches!(self, Self::Default)
    }
}

/// Named 16-color palette indices, for readability at call sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum NamedColor {
    /// Black (0).
    Black = 0,
    /// Red (1).
    Red = 1,
    /// Green (2).
    Green = 2,
    /// Yellow (3).
    Yellow = 3,
    /// Blue (4).
    Blue = 4,
    /// Magenta (5).
    Magenta = 5,
    /// Cyan (6).
    Cyan = 6,
    /// White (7).
    White = 7,
    /// Bright black / gray (8).
    BrightBlack = 8,
    /// Bright red (9).
    BrightRed = 9,
    /// Bright green (10).
    BrightGreen = 10,
    /// Bright yellow (11).
    BrightYellow = 11,
    /// Bright blue (12).
    BrightBlue = 12,
    /// Bright magenta (13).
    BrightMagenta = 13,
    /// Bright cyan (14).
    BrightCyan = 14,
    /// Bright white (15).
    BrightWhite = 15,
}

impl From<NamedColor> for Color {
    fn from(n: NamedColor) -> Self {
        Color::Indexed(n as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_default() {
        assert!(Color::Default.is_default());
        assert!(!Color::Indexed(1).is_default());
    }

    #[test]
    fn hex_6_digit() {
        assert_eq!(Color::from_hex("#ff0000"), Some(Color::rgb(255, 0, 0)));
        assert_eq!(Color::from_hex("00ff00"), Some(Color::rgb(0, 255, 0)));
    }

    #[test]
    fn hex_3_digit() {
        assert_eq!(Color::from_hex("#f00"), Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn hex_invalid() {
        assert_eq!(Color::from_hex("#ggg"), None);
        assert_eq!(Color::from_hex("#12345"), None);
    }

    #[test]
    fn named_color_conversion() {
        let c: Color = NamedColor::Red.into();
        assert_eq!(c, Color::Indexed(1));
        let c: Color = NamedColor::BrightWhite.into();
        assert_eq!(c, Color::Indexed(15));
    }

    #[test]
    fn structural_equality() {
        assert_eq!(Color::rgb(1, 2, 3), Color::rgb(1, 2, 3));
        assert_ne!(Color::rgb(1, 2, 3), Color::rgb(1, 2, 4));
        assert_ne!(Color::Indexed(1), Color::Indexed256(1));
    }
}
