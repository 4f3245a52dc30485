//! Streaming decoder converting a raw terminal input byte stream into
//! [`Event`]s.
//!
//! The decoder is fed arbitrary byte chunks (as read from a tty) via
//! [`KeyDecoder::feed`] and returns whatever complete events it could
//! extract, holding back any incomplete trailing sequence for the next
//! call. [`KeyDecoder::flush`] should be called after a short quiescence
//! timeout to resolve a lone `ESC` byte into [`Key::Escape`] rather than
//! leaving it buffered forever waiting for a CSI/SS3 continuation that
//! will never come.

use crate::event::{Event, Key, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind};

const ESC: u8 = 0x1b;
const PASTE_START: &[u8] = b"[200~";
const PASTE_END: &[u8] = b"[201~";

/// Outcome of attempting to decode one event from the front of the buffer.
enum Step {
    /// Consumed `len` bytes and produced `event`.
    Decoded { len: usize, event: Event },
    /// The buffer holds a recognizable but truncated sequence; wait for
    /// more bytes before deciding anything.
    NeedMore,
}

/// A streaming byte-to-event decoder for terminal input.
#[derive(Default)]
pub struct KeyDecoder {
    buf: Vec<u8>,
    /// Bytes accumulated since a bracketed-paste start marker, not yet
    /// terminated by the end marker.
    pasting: Option<Vec<u8>>,
}

impl KeyDecoder {
    /// Create an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes read from the terminal, returning every event that
    /// could be fully decoded from the accumulated buffer.
    pub fn feed(&mut self, data: &[u8]) -> Vec<Event> {
        self.buf.extend_from_slice(data);
        let mut events = Vec::new();
        loop {
            if self.buf.is_empty() {
                break;
            }
            if self.pasting.is_some() {
                match self.advance_paste() {
                    Some(event) => {
                        events.push(event);
                        continue;
                    }
                    None => break,
                }
            }
            if self.buf[0] == ESC && self.buf.len() > 1 {
                let tail = &self.buf[1..];
                if tail.len() >= PASTE_START.len() {
                    if tail.starts_with(PASTE_START) {
                        self.buf.drain(..1 + PASTE_START.len());
                        self.pasting = Some(Vec::new());
                        continue;
                    }
                } else if PASTE_START.starts_with(tail) {
                    // Could still grow into a paste-start marker.
                    break;
                }
            }
            match decode_one(&self.buf) {
                Step::Decoded { len, event } => {
                    self.buf.drain(..len);
                    events.push(event);
                }
                Step::NeedMore => break,
            }
        }
        events
    }

    /// Consume from `self.buf` into the in-progress paste body. Returns the
    /// completed paste [`Event`] once the end marker is found, or `None` if
    /// more bytes are still needed (in which case any unambiguous prefix of
    /// the buffer has already been moved into the paste body, leaving only
    /// a possible partial end-marker behind).
    fn advance_paste(&mut self) -> Option<Event> {
        let marker = [&[ESC][..], PASTE_END].concat();
        if let Some(pos) = find_subslice(&self.buf, &marker) {
            let body = self.buf.drain(..pos).collect::<Vec<_>>();
            self.buf.drain(..marker.len());
            let mut content = self.pasting.take().unwrap_or_default();
            content.extend_from_slice(&body);
            let text = String::from_utf8_lossy(&content).into_owned();
            Some(Event::Key(KeyEvent::paste(text)))
        } else {
            let keep_tail = marker.len().saturating_sub(1).min(self.buf.len());
            let take = self.buf.len() - keep_tail;
            if take > 0 {
                let mut drained = self.buf.drain(..take).collect::<Vec<_>>();
                self.pasting.get_or_insert_with(Vec::new).append(&mut drained);
            }
            None
        }
    }

    /// Resolve a buffered lone `ESC` (no continuation arrived in time) into
    /// [`Key::Escape`], and drop any incomplete trailing garbage. Call this
    /// after a short read-timeout with no further bytes pending.
    pub fn flush(&mut self) -> Vec<Event> {
        if self.buf == [ESC] {
            self.buf.clear();
            return vec![Event::Key(KeyEvent::new(Key::Escape))];
        }
        if !self.buf.is_empty() {
            self.buf.clear();
        }
        Vec::new()
    }
}

fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn decode_one(buf: &[u8]) -> Step {
    match buf[0] {
        ESC => decode_escape(buf),
        0x00..=0x1f | 0x7f => decode_control(buf),
        _ => decode_utf8(buf),
    }
}

fn decode_control(buf: &[u8]) -> Step {
    let byte = buf[0];
    let (key, modifiers) = match byte {
        0x09 => (Key::Tab, Modifiers::NONE),
        0x0d | 0x0a => (Key::Enter, Modifiers::NONE),
        0x08 | 0x7f => (Key::Backspace, Modifiers::NONE),
        1..=26 => (Key::Char((b'a' + byte - 1) as char), Modifiers::CTRL),
        _ => (Key::Unknown, Modifiers::NONE),
    };
    Step::Decoded {
        len: 1,
        event: Event::Key(KeyEvent::with_modifiers(key, modifiers)),
    }
}

fn decode_utf8(buf: &[u8]) -> Step {
    let first = buf[0];
    let expected_len = if first & 0x80 == 0 {
        1
    } else if first & 0xe0 == 0xc0 {
        2
    } else if first & 0xf0 == 0xe0 {
        3
    } else if first & 0xf8 == 0xf0 {
        4
    } else {
        1
    };
    if buf.len() < expected_len {
        return Step::NeedMore;
    }
    match std::str::from_utf8(&buf[..expected_len]) {
        Ok(s) => {
            let ch = s.chars().next().unwrap_or('\u{FFFD}');
            Step::Decoded {
                len: expected_len,
                event: Event::Key(KeyEvent::new(Key::Char(ch))),
            }
        }
        Err(_) => Step::Decoded {
            len: 1,
            event: Event::Key(KeyEvent::new(Key::Unknown)),
        },
    }
}

fn decode_escape(buf: &[u8]) -> Step {
    if buf.len() == 1 {
        return Step::NeedMore;
    }
    match buf[1] {
        b'[' => decode_csi(buf),
        b'O' => decode_ss3(buf),
        _ => decode_alt(buf),
    }
}

/// `ESC` followed by a non-`[`/`O` byte: Alt held while typing whatever
/// that byte (or UTF-8 sequence) decodes to on its own.
fn decode_alt(buf: &[u8]) -> Step {
    match decode_one(&buf[1..]) {
        Step::Decoded { len, event } => {
            let event = match event {
                Event::Key(mut ev) => {
                    ev.modifiers = ev.modifiers | Modifiers::ALT;
                    Event::Key(ev)
                }
                other => other,
            };
            Step::Decoded { len: len + 1, event }
        }
        Step::NeedMore => Step::NeedMore,
    }
}

/// `ESC O` (SS3): application-mode arrows and F1-F4.
fn decode_ss3(buf: &[u8]) -> Step {
    if buf.len() < 3 {
        return Step::NeedMore;
    }
    let key = match buf[2] {
        b'A' => Key::Up,
        b'B' => Key::Down,
        b'C' => Key::Right,
        b'D' => Key::Left,
        b'H' => Key::Home,
        b'F' => Key::End,
        b'P' => Key::F(1),
        b'Q' => Key::F(2),
        b'R' => Key::F(3),
        b'S' => Key::F(4),
        _ => Key::Unknown,
    };
    Step::Decoded {
        len: 3,
        event: Event::Key(KeyEvent::new(key)),
    }
}

/// `ESC [` (CSI): cursor keys, editing keys, SGR mouse, bracketed-paste
/// markers (handled upstream), all with an optional `;<modifier>` suffix.
fn decode_csi(buf: &[u8]) -> Step {
    // SGR mouse: ESC [ < params M|m
    if buf.len() >= 3 && buf[2] == b'<' {
        return decode_sgr_mouse(buf);
    }
    // Find the final byte: first byte in 0x40..=0x7e after the initial ESC [.
    let mut i = 2;
    while i < buf.len() && !(0x40..=0x7e).contains(&buf[i]) {
        i += 1;
    }
    if i >= buf.len() {
        return Step::NeedMore;
    }
    let final_byte = buf[i];
    let params = &buf[2..i];
    let len = i + 1;

    if final_byte == b'~' {
        return decode_tilde_key(params, len);
    }

    let (key, modifiers) = match final_byte {
        b'A' => (Key::Up, Modifiers::NONE),
        b'B' => (Key::Down, Modifiers::NONE),
        b'C' => (Key::Right, Modifiers::NONE),
        b'D' => (Key::Left, Modifiers::NONE),
        b'H' => (Key::Home, Modifiers::NONE),
        b'F' => (Key::End, Modifiers::NONE),
        b'Z' => (Key::Tab, Modifiers::SHIFT),
        _ => (Key::Unknown, Modifiers::NONE),
    };
    let modifiers = modifiers.union(parse_csi_modifier(params));
    Step::Decoded {
        len,
        event: Event::Key(KeyEvent::with_modifiers(key, modifiers)),
    }
}

/// `ESC [ <nums> ~`: editing keys (Insert, Delete, Home, End, PageUp/Down),
/// with an optional `;<modifier>` numeric parameter.
fn decode_tilde_key(params: &[u8], len: usize) -> Step {
    let text = std::str::from_utf8(params).unwrap_or("");
    let mut parts = text.split(';');
    let code: u32 = parts.next().unwrap_or("").parse().unwrap_or(0);
    let modifiers = parts
        .next()
        .and_then(|m| m.parse::<u32>().ok())
        .map(modifier_from_param)
        .unwrap_or(Modifiers::NONE);
    let key = match code {
        1 | 7 => Key::Home,
        2 => Key::Insert,
        3 => Key::Delete,
        4 | 8 => Key::End,
        5 => Key::PageUp,
        6 => Key::PageDown,
        11..=15 => Key::F(code as u8 - 10),
        17..=21 => Key::F(code as u8 - 11),
        23 | 24 => Key::F(code as u8 - 12),
        _ => Key::Unknown,
    };
    Step::Decoded {
        len,
        event: Event::Key(KeyEvent::with_modifiers(key, modifiers)),
    }
}

/// Parses the `;<modifier>` suffix used by arrow/Home/End CSI sequences
/// (e.g. `ESC [ 1 ; 5 C` = Ctrl+Right).
fn parse_csi_modifier(params: &[u8]) -> Modifiers {
    let text = std::str::from_utf8(params).unwrap_or("");
    let mut parts = text.split(';');
    let _leading = parts.next();
    parts
        .next()
        .and_then(|m| m.parse::<u32>().ok())
        .map(modifier_from_param)
        .unwrap_or(Modifiers::NONE)
}

/// xterm modifier parameter encoding: `value - 1` is a bitmask where bit 0
/// is Shift, bit 1 is Alt, bit 2 is Ctrl.
fn modifier_from_param(value: u32) -> Modifiers {
    let bits = value.saturating_sub(1);
    let mut modifiers = Modifiers::NONE;
    if bits & 0b001 != 0 {
        modifiers = modifiers.union(Modifiers::SHIFT);
    }
    if bits & 0b010 != 0 {
        modifiers = modifiers.union(Modifiers::ALT);
    }
    if bits & 0b100 != 0 {
        modifiers = modifiers.union(Modifiers::CTRL);
    }
    modifiers
}

/// `ESC [ < btn ; x ; y M|m`: SGR-extended mouse reporting.
fn decode_sgr_mouse(buf: &[u8]) -> Step {
    let mut i = 3;
    while i < buf.len() && buf[i] != b'M' && buf[i] != b'm' {
        i += 1;
    }
    if i >= buf.len() {
        return Step::NeedMore;
    }
    let final_byte = buf[i];
    let text = std::str::from_utf8(&buf[3..i]).unwrap_or("");
    let len = i + 1;
    let mut parts = text.split(';');
    let code: u32 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(0);
    let x: u16 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(1);
    let y: u16 = parts.next().and_then(|p| p.parse().ok()).unwrap_or(1);
    let x = x.saturating_sub(1);
    let y = y.saturating_sub(1);

    let modifiers = modifier_from_param(((code >> 2) & 0b111) + 1);
    let button_bits = code & 0b11;
    let is_motion = code & 0x20 != 0;
    let is_scroll = code & 0x40 != 0;

    let button = match button_bits {
        0 => MouseButton::Left,
        1 => MouseButton::Middle,
        _ => MouseButton::Right,
    };
    let kind = if is_scroll {
        if button_bits == 0 {
            MouseEventKind::ScrollUp
        } else {
            MouseEventKind::ScrollDown
        }
    } else if is_motion {
        if button_bits == 3 {
            MouseEventKind::Move
        } else {
            MouseEventKind::Drag(button)
        }
    } else if final_byte == b'M' {
        MouseEventKind::Press(button)
    } else {
        MouseEventKind::Release(button)
    };

    Step::Decoded {
        len,
        event: Event::Mouse(MouseEvent { kind, x, y, modifiers }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only_key(events: Vec<Event>) -> KeyEvent {
        match events.into_iter().next().expect("expected an event") {
            Event::Key(k) => k,
            other => panic!("expected Key event, got {other:?}"),
        }
    }

    #[test]
    fn decodes_plain_ascii() {
        let mut dec = KeyDecoder::new();
        let events = dec.feed(b"a");
        assert_eq!(only_key(events).key, Key::Char('a'));
    }

    #[test]
    fn decodes_multibyte_utf8() {
        let mut dec = KeyDecoder::new();
        let events = dec.feed("\u{4e2d}".as_bytes());
        assert_eq!(only_key(events).key, Key::Char('\u{4e2d}'));
    }

    #[test]
    fn split_utf8_across_feeds() {
        let mut dec = KeyDecoder::new();
        let bytes = "\u{4e2d}".as_bytes();
        assert!(dec.feed(&bytes[..1]).is_empty());
        let events = dec.feed(&bytes[1..]);
        assert_eq!(only_key(events).key, Key::Char('\u{4e2d}'));
    }

    #[test]
    fn ctrl_letter_bit() {
        let mut dec = KeyDecoder::new();
        let events = dec.feed(&[1]); // Ctrl-A
        let ev = only_key(events);
        assert_eq!(ev.key, Key::Char('a'));
        assert!(ev.modifiers.contains(Modifiers::CTRL));
    }

    #[test]
    fn tab_and_enter() {
        let mut dec = KeyDecoder::new();
        assert_eq!(only_key(dec.feed(&[0x09])).key, Key::Tab);
        assert_eq!(only_key(dec.feed(&[0x0d])).key, Key::Enter);
    }

    #[test]
    fn csi_arrow_keys() {
        let mut dec = KeyDecoder::new();
        assert_eq!(only_key(dec.feed(b"\x1b[A")).key, Key::Up);
        assert_eq!(only_key(dec.feed(b"\x1b[B")).key, Key::Down);
        assert_eq!(only_key(dec.feed(b"\x1b[C")).key, Key::Right);
        assert_eq!(only_key(dec.feed(b"\x1b[D")).key, Key::Left);
    }

    #[test]
    fn ss3_arrow_and_function_keys() {
        let mut dec = KeyDecoder::new();
        assert_eq!(only_key(dec.feed(b"\x1bOA")).key, Key::Up);
        assert_eq!(only_key(dec.feed(b"\x1bOP")).key, Key::F(1));
    }

    #[test]
    fn csi_modifier_on_arrow() {
        let mut dec = KeyDecoder::new();
        let ev = only_key(dec.feed(b"\x1b[1;5C"));
        assert_eq!(ev.key, Key::Right);
        assert!(ev.modifiers.contains(Modifiers::CTRL));
    }

    #[test]
    fn tilde_editing_keys() {
        let mut dec = KeyDecoder::new();
        assert_eq!(only_key(dec.feed(b"\x1b[3~")).key, Key::Delete);
        assert_eq!(only_key(dec.feed(b"\x1b[5~")).key, Key::PageUp);
        assert_eq!(only_key(dec.feed(b"\x1b[6~")).key, Key::PageDown);
    }

    #[test]
    fn alt_prefix_sets_alt_modifier() {
        let mut dec = KeyDecoder::new();
        let ev = only_key(dec.feed(b"\x1ba"));
        assert_eq!(ev.key, Key::Char('a'));
        assert!(ev.modifiers.contains(Modifiers::ALT));
    }

    #[test]
    fn lone_escape_needs_flush() {
        let mut dec = KeyDecoder::new();
        assert!(dec.feed(&[ESC]).is_empty());
        let events = dec.flush();
        assert_eq!(only_key(events).key, Key::Escape);
    }

    #[test]
    fn sgr_mouse_press() {
        let mut dec = KeyDecoder::new();
        let events = dec.feed(b"\x1b[<0;10;20M");
        match events.into_iter().next().unwrap() {
            Event::Mouse(m) => {
                assert_eq!(m.kind, MouseEventKind::Press(MouseButton::Left));
                assert_eq!(m.x, 9);
                assert_eq!(m.y, 19);
            }
            other => panic!("expected Mouse event, got {other:?}"),
        }
    }

    #[test]
    fn sgr_mouse_scroll() {
        let mut dec = KeyDecoder::new();
        let events = dec.feed(b"\x1b[<64;5;5M");
        match events.into_iter().next().unwrap() {
            Event::Mouse(m) => assert_eq!(m.kind, MouseEventKind::ScrollUp),
            other => panic!("expected Mouse event, got {other:?}"),
        }
    }

    #[test]
    fn bracketed_paste_roundtrip() {
        let mut dec = KeyDecoder::new();
        let mut data = Vec::new();
        data.extend_from_slice(b"\x1b[200~");
        data.extend_from_slice(b"pasted text");
        data.extend_from_slice(b"\x1b[201~");
        let events = dec.feed(&data);
        let ev = only_key(events);
        assert!(ev.is_paste());
        assert_eq!(ev.paste.as_deref(), Some("pasted text"));
    }

    #[test]
    fn bracketed_paste_split_across_feeds() {
        let mut dec = KeyDecoder::new();
        assert!(dec.feed(b"\x1b[200~part").is_empty());
        let events = dec.feed(b"ial\x1b[201~");
        let ev = only_key(events);
        assert_eq!(ev.paste.as_deref(), Some("partial"));
    }

    #[test]
    fn sequence_of_plain_chars() {
        let mut dec = KeyDecoder::new();
        let events = dec.feed(b"ab");
        assert_eq!(events.len(), 2);
    }
}
