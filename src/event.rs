//! Input, timer, and lifecycle events delivered to applications.

use std::time::{Duration, Instant};

/// A decoded keyboard key.
///
/// `Char` carries the decoded Unicode scalar value; control keys that have
/// no printable representation get their own variant. This set intersects
/// the common key space every terminal emulator agrees on; anything else
/// decodes to [`Key::Unknown`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Key {
    /// A printable character, already case- and shift-resolved by the
    /// terminal (e.g. Shift+A arrives as `Char('A')`, not `Char('a')` with
    /// the shift modifier set).
    Char(char),
    /// Enter / Return.
    Enter,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Delete (forward delete).
    Delete,
    /// Escape.
    Escape,
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Home.
    Home,
    /// End.
    End,
    /// Page Up.
    PageUp,
    /// Page Down.
    PageDown,
    /// Insert.
    Insert,
    /// A function key, `F(1)` through `F(12)`.
    F(u8),
    /// A sequence the decoder could not classify.
    Unknown,
}

/// Modifier keys held during an input event, as a bitset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self(0);
    /// Shift.
    pub const SHIFT: Self = Self(1 << 0);
    /// Control.
    pub const CTRL: Self = Self(1 << 1);
    /// Alt / Meta / Option.
    pub const ALT: Self = Self(1 << 2);

    /// Whether `other`'s bits are all set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Union of two modifier sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether no modifiers are set.
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// A decoded keyboard event.
///
/// When `paste` is `Some`, this event represents an entire bracketed-paste
/// block delivered as one indivisible unit: `key` is [`Key::Unknown`] and
/// `modifiers` is empty in that case, since a paste carries no single key
/// identity of its own.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyEvent {
    /// The decoded key, meaningless when `paste` is `Some`.
    pub key: Key,
    /// Modifiers held, meaningless when `paste` is `Some`.
    pub modifiers: Modifiers,
    /// The full bracketed-paste content, if this event is a paste.
    pub paste: Option<String>,
}

impl KeyEvent {
    /// A plain key event with no modifiers.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
            paste: None,
        }
    }

    /// A key event with the given modifiers.
    pub const fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers,
            paste: None,
        }
    }

    /// A bracketed-paste event carrying `content` verbatim.
    pub fn paste(content: String) -> Self {
        Self {
            key: Key::Unknown,
            modifiers: Modifiers::NONE,
            paste: Some(content),
        }
    }

    /// Whether this event is a bracketed paste.
    pub const fn is_paste(&self) -> bool {
        self.paste.is_some()
    }
}

/// The kind of mouse action reported.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseEventKind {
    /// A button was pressed.
    Press(MouseButton),
    /// A button was released.
    Release(MouseButton),
    /// The pointer moved while a button was held.
    Drag(MouseButton),
    /// The pointer moved with no button held.
    Move,
    /// The wheel scrolled up.
    ScrollUp,
    /// The wheel scrolled down.
    ScrollDown,
}

/// Which mouse button an event concerns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left button.
    Left,
    /// Right button.
    Right,
    /// Middle button.
    Middle,
}

/// A decoded mouse event, in cell coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MouseEvent {
    /// What happened.
    pub kind: MouseEventKind,
    /// Column.
    pub x: u16,
    /// Row.
    pub y: u16,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
}

/// A periodic tick from the runtime's internal clock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickEvent {
    /// Monotonic instant the tick fired.
    pub at: Instant,
    /// Nominal interval between ticks.
    pub interval: Duration,
}

/// Top-level event delivered through the event loop.
///
/// `#[non_exhaustive]` since the widget and command layers will add their
/// own custom event payloads over time without this being a breaking change.
#[derive(Debug)]
#[non_exhaustive]
pub enum Event {
    /// A keyboard event, possibly a paste.
    Key(KeyEvent),
    /// A mouse event.
    Mouse(MouseEvent),
    /// The terminal was resized to `(width, height)` cells.
    Resize(u16, u16),
    /// A runtime timer tick.
    Tick(TickEvent),
    /// Several events coalesced into one delivery, preserving order.
    Batch(Vec<Event>),
    /// An error occurred in a background task (input reader or command);
    /// the event loop keeps running and surfaces it for the application to
    /// log or display.
    Error(crate::error::VtCoreError),
    /// The application requested shutdown; the event loop will stop after
    /// this event is delivered.
    Quit,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modifiers_union_and_contains() {
        let m = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(m.contains(Modifiers::CTRL));
        assert!(m.contains(Modifiers::SHIFT));
        assert!(!m.contains(Modifiers::ALT));
    }

    #[test]
    fn modifiers_none_is_empty() {
        assert!(Modifiers::NONE.is_empty());
        assert!(!Modifiers::CTRL.is_empty());
    }

    #[test]
    fn key_event_paste_clears_key_and_modifiers() {
        let ev = KeyEvent::paste("hello".to_string());
        assert!(ev.is_paste());
        assert_eq!(ev.key, Key::Unknown);
        assert!(ev.modifiers.is_empty());
        assert_eq!(ev.paste.as_deref(), Some("hello"));
    }

    #[test]
    fn key_event_plain_is_not_paste() {
        let ev = KeyEvent::new(Key::Enter);
        assert!(!ev.is_paste());
    }

    #[test]
    fn key_event_with_modifiers() {
        let ev = KeyEvent::with_modifiers(Key::Char('a'), Modifiers::CTRL);
        assert_eq!(ev.key, Key::Char('a'));
        assert!(ev.modifiers.contains(Modifiers::CTRL));
    }

    #[test]
    fn batch_preserves_order() {
        let batch = Event::Batch(vec![
            Event::Key(KeyEvent::new(Key::Enter)),
            Event::Resize(80, 24),
        ]);
        if let Event::Batch(events) = batch {
            assert_eq!(events.len(), 2);
            assert!(matches!(events[0], Event::Key(_)));
            assert!(matches!(events[1], Event::Resize(80, 24)));
        } else {
            panic!("expected batch");
        }
    }
}
