//! Cell style: colors, attribute bitset, and optional OSC-8 hyperlink.

use crate::color::Color;

/// Text attribute bit flags.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
struct Attrs(u8);

impl Attrs {
    const BOLD: u8 = 1 << 0;
    const DIM: u8 = 1 << 1;
    const ITALIC: u8 = 1 << 2;
    const UNDERLINE: u8 = 1 << 3;
    const BLINK: u8 = 1 << 4;
    const REVERSE: u8 = 1 << 5;
    const STRIKE: u8 = 1 << 6;

    const fn get(self, bit: u8) -> bool {
        self.0 & bit != 0
    }

    fn set(&mut self, bit: u8, value: bool) {
        if value {
            self.0 |= bit;
        } else {
            self.0 &= !bit;
        }
    }
}

/// An immutable, copy-cheap cell style: colors, attributes, and an optional
/// OSC-8 hyperlink URL.
///
/// Two styles are equal iff every field is equal. The "empty" style is all
/// [`Color::Default`], no attributes set, and no URL.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Style {
    fg: Color,
    bg: Color,
    attrs: Attrs,
    url: Option<String>,
}

impl Style {
    /// The empty style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Foreground color.
    pub const fn fg_color(&self) -> Color {
        self.fg
    }

    /// Background color.
    pub const fn bg_color(&self) -> Color {
        self.bg
    }

    /// Hyperlink URL, if any.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Whether this is the empty style.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Derive a style with the given foreground.
    #[must_use]
    pub fn with_fg(mut self, color: Color) -> Self {
        self.fg = color;
        self
    }

    /// Derive a style with the given background.
    #[must_use]
    pub fn with_bg(mut self, color: Color) -> Self {
        self.bg = color;
        self
    }

    /// Derive a style with bold set/cleared.
    #[must_use]
    pub fn with_bold(mut self, value: bool) -> Self {
        self.attrs.set(Attrs::BOLD, value);
        self
    }

    /// Derive a style with dim set/cleared.
    #[must_use]
    pub fn with_dim(mut self, value: bool) -> Self {
        self.attrs.set(Attrs::DIM, value);
        self
    }

    /// Derive a style with italic set/cleared.
    #[must_use]
    pub fn with_italic(mut self, value: bool) -> Self {
        self.attrs.set(Attrs::ITALIC, value);
        self
    }

    /// Derive a style with underline set/cleared.
    #[must_use]
    pub fn with_underline(mut self, value: bool) -> Self {
        self.attrs.set(Attrs::UNDERLINE, value);
        self
    }

    /// Derive a style with blink set/cleared.
    #[must_use]
    pub fn with_blink(mut self, value: bool) -> Self {
        self.attrs.set(Attrs::BLINK, value);
        self
    }

    /// Derive a style with reverse-video set/cleared.
    #[must_use]
    pub fn with_reverse(mut self, value: bool) -> Self {
        self.attrs.set(Attrs::REVERSE, value);
        self
    }

    /// Derive a style with strikethrough set/cleared.
    #[must_use]
    pub fn with_strike(mut self, value: bool) -> Self {
        self.attrs.set(Attrs::STRIKE, value);
        self
    }

    /// Derive a style with the given hyperlink URL (or `None` to clear it).
    #[must_use]
    pub fn with_url(mut self, url: impl Into<Option<String>>) -> Self {
        self.url = url.into();
        self
    }

    /// Whether bold is set.
    pub const fn bold(&self) -> bool {
        self.attrs.get(Attrs::BOLD)
    }

    /// Whether dim is set.
    pub const fn dim(&self) -> bool {
        self.attrs.get(Attrs::DIM)
    }

    /// Whether italic is set.
    pub const fn italic(&self) -> bool {
        self.attrs.get(Attrs::ITALIC)
    }

    /// Whether underline is set.
    pub const fn underline(&self) -> bool {
        self.attrs.get(Attrs::UNDERLINE)
    }

    /// Whether blink is set.
    pub const fn blink(&self) -> bool {
        self.attrs.get(Attrs::BLINK)
    }

    /// Whether reverse-video is set.
    pub const fn reverse(&self) -> bool {
        self.attrs.get(Attrs::REVERSE)
    }

    /// Whether strikethrough is set.
    pub const fn strike(&self) -> bool {
        self.attrs.get(Attrs::STRIKE)
    }

    /// Compose `self` as the base and `overlay` as a fallback: per field,
    /// `self`'s value wins unless it is the "unset" value (`Color::Default`,
    /// attribute bit clear, no URL), in which case `overlay`'s value is used.
    ///
    /// This is left-biased per §4.1: the base is authoritative unless it
    /// explicitly opted out by being default.
    #[must_use]
    pub fn compose(&self, overlay: &Self) -> Self {
        Self {
            fg: if self.fg.is_default() { overlay.fg } else { self.fg },
            bg: if self.bg.is_default() { overlay.bg } else { self.bg },
            attrs: Attrs(self.attrs.0 | (overlay.attrs.0 & !self.attrs.0 & overlay_mask(self))),
            url: self.url.clone().or_else(|| overlay.url.clone()),
        }
    }
}

/// Attribute bits in `base` that are unset and therefore open to being
/// filled in by the overlay. Since attribute bits have no separate
/// "explicitly false" state, an unset bit in the base always falls through
/// to the overlay's bit for that attribute — this mask is simply all bits,
/// kept as a named helper so `compose`'s bit algebra reads as intentional.
const fn overlay_mask(_base: &Style) -> u8 {
    0xFF
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::NamedColor;

    #[test]
    fn builder_pattern() {
        let s = Style::new().with_bold(true).with_fg(Color::Indexed(1));
        assert!(s.bold());
        assert_eq!(s.fg_color(), Color::Indexed(1));
    }

    #[test]
    fn default_is_empty() {
        assert!(Style::default().is_empty());
    }

    #[test]
    fn non_empty_style() {
        let s = Style::new().with_bold(true);
        assert!(!s.is_empty());
    }

    #[test]
    fn compose_base_wins_when_set() {
        let base = Style::new().with_fg(NamedColor::Red.into());
        let overlay = Style::new().with_fg(NamedColor::Blue.into());
        let composed = base.compose(&overlay);
        assert_eq!(composed.fg_color(), NamedColor::Red.into());
    }

    #[test]
    fn compose_falls_through_when_base_default() {
        let base = Style::new();
        let overlay = Style::new().with_fg(NamedColor::Blue.into());
        let composed = base.compose(&overlay);
        assert_eq!(composed.fg_color(), NamedColor::Blue.into());
    }

    #[test]
    fn compose_attrs_fill_from_overlay() {
        let base = Style::new().with_bold(true);
        let overlay = Style::new().with_italic(true);
        let composed = base.compose(&overlay);
        assert!(composed.bold());
        assert!(composed.italic());
    }

    #[test]
    fn compose_url_base_wins() {
        let base = Style::new().with_url(Some("https://a".to_string()));
        let overlay = Style::new().with_url(Some("https://b".to_string()));
        assert_eq!(base.compose(&overlay).url(), Some("https://a"));
    }

    #[test]
    fn all_attribute_accessors() {
        let s = Style::new()
            .with_bold(true)
            .with_dim(true)
            .with_italic(true)
            .with_underline(true)
            .with_blink(true)
            .with_reverse(true)
            .with_strike(true);
        assert!(s.bold() && s.dim() && s.italic() && s.underline());
        assert!(s.blink() && s.reverse() && s.strike());
    }

    #[test]
    fn structural_equality() {
        let a = Style::new().with_bold(true);
        let b = Style::new().with_bold(true);
        assert_eq!(a, b);
        let c = Style::new().with_bold(false);
        assert_ne!(a, c);
    }
}
