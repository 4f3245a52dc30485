//! vtcore: the rendering and event substrate for terminal user interfaces.
//!
//! This crate provides the cell-addressable double-buffered screen, the
//! ANSI/VT key decoder, the multi-threaded event loop, and the
//! measure/arrange layout protocol that a terminal UI toolkit is built on.
//! It does not ship concrete widgets (progress bars, text inputs, tables);
//! it ships the substrate those widgets are built against.
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Application Layer                        │
//! │      (Widget tree, out of scope: owns its own state)         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ Event in, Vec<Command> + draw() out
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Runtime (Application trait)                │
//! │  input task → KeyDecoder → events channel ← tick task       │
//! │  commands channel → spawned futures → events channel        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │             Screen (front/back CellBuffer pair)              │
//! │  begin_frame → RenderFrame (clipped sub-frames) → end_frame  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │         Renderer (line diff, SGR coalescing, downgrade)      │
//! │  CellBuffer diff → minimal ANSI byte stream → Terminal       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │           Terminal backend (crossterm, or in-memory)         │
//! │  raw mode, alt screen, cursor, mouse, bracketed paste         │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Layout (measure/arrange via [`layout::LayoutEngine`]) and focus/mouse
//! routing ([`focus::FocusManager`], [`mouse::MouseRouter`]) sit alongside
//! this pipeline: the [`widget::Widget`] trait is what a concrete widget
//! library implements against all of the above.
//!
//! ## Key Types
//!
//! - [`style::Style`] / [`color::Color`]: immutable, copy-cheap cell styling.
//! - [`cell::Cell`] / [`buffer::CellBuffer`]: the addressable screen grid.
//! - [`render_frame::Screen`] / [`render_frame::RenderFrame`]: the
//!   double-buffered paint surface widgets draw into each frame.
//! - [`key_decoder::KeyDecoder`]: raw bytes to structured [`event::Event`]s.
//! - [`runtime::Runtime`] / [`runtime::Application`]: the event loop.
//! - [`layout::LayoutEngine`]: Taffy-backed measure/arrange.
//! - [`widget::Widget`]: the trait every widget implements.

pub mod buffer;
pub mod cell;
pub mod color;
pub mod command;
pub mod error;
pub mod event;
pub mod focus;
pub mod geometry;
pub mod key_decoder;
pub mod layout;
pub mod mouse;
pub mod render_frame;
pub mod renderer;
pub mod runtime;
pub mod style;
pub mod terminal;
pub mod widget;

pub use buffer::{CellBuffer, DirtySpan};
pub use cell::Cell;
pub use color::{Color, NamedColor};
pub use command::Command;
pub use error::{Result, VtCoreError};
pub use event::{
    Event, Key, KeyEvent, Modifiers, MouseButton, MouseEvent, MouseEventKind, TickEvent,
};
pub use focus::{FocusManager, WidgetId};
pub use geometry::{Position, Rect, Size};
pub use key_decoder::KeyDecoder;
pub use layout::{Container, Edges, LayoutEngine, LayoutError, LayoutRect, flex, grid, hbox, vbox};
pub use mouse::{MouseRouter, RoutedMouseEvent};
pub use render_frame::{RenderFrame, Screen};
pub use renderer::Renderer;
pub use runtime::{Application, Outcome, Runtime, RuntimeConfig};
pub use style::Style;
pub use terminal::{ColorSupport, CrosstermTerminal, Terminal, TerminalCapabilities, TestBackend};
pub use widget::{EventResult, SizeConstraints, Widget};
