//! Mouse routing: pointer capture, click-count synthesis, and
//! enter/leave hover tracking on top of the raw decoded mouse stream.

use std::time::{Duration, Instant};

use crate::event::{MouseButton, MouseEvent, MouseEventKind};
use crate::focus::WidgetId;

/// Maximum gap between two presses of the same button, at the same
/// position (within [`DRAG_THRESHOLD`] cells), to count as one more click
/// in a click/double-click/triple-click sequence.
const MULTI_CLICK_WINDOW: Duration = Duration::from_millis(400);

/// Maximum pointer movement, in cells, between clicks still counted as
/// the same position for multi-click purposes, and below which a
/// press-then-move is not yet promoted to a drag.
const DRAG_THRESHOLD: u16 = 1;

/// A synthesized routing event layered on top of raw mouse reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoutedMouseEvent {
    /// The pointer entered `widget`'s bounds.
    Enter(WidgetId),
    /// The pointer left `widget`'s bounds.
    Leave(WidgetId),
    /// A button was pressed and released over the same widget with no
    /// intervening drag, `count` times in quick succession (1 = single
    /// click, 2 = double, 3 = triple; caps at 3).
    Click {
        /// The widget clicked on.
        widget: WidgetId,
        /// Which button.
        button: MouseButton,
        /// How many clicks in this burst.
        count: u8,
    },
    /// The pointer moved beyond the drag threshold while a button was
    /// held, starting a drag captured by `widget`.
    DragStart(WidgetId),
    /// The pointer moved while a drag is in progress.
    Drag(WidgetId),
    /// The button was released, ending a drag.
    DragEnd(WidgetId),
    /// A drag in progress was aborted by Escape or loss of capture, rather
    /// than ended by a button release.
    DragCancel(WidgetId),
    /// A raw event with no widget-level synthesis (e.g. scroll), passed
    /// through with the widget it landed on, if any.
    Passthrough(Option<WidgetId>, MouseEvent),
}

/// Tracks pointer state across a stream of raw [`MouseEvent`]s to
/// synthesize hover and click-count semantics.
#[derive(Default)]
pub struct MouseRouter {
    hovered: Option<WidgetId>,
    captured: Option<WidgetId>,
    dragging: bool,
    press_pos: Option<(u16, u16)>,
    last_click: Option<(Instant, u16, u16, MouseButton, u8)>,
}

impl MouseRouter {
    /// Create a router with no pointer history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Route one raw event. `hit_test` maps screen coordinates to the
    /// topmost widget at that point, if any.
    pub fn route(
        &mut self,
        event: MouseEvent,
        now: Instant,
        hit_test: impl Fn(u16, u16) -> Option<WidgetId>,
    ) -> Vec<RoutedMouseEvent> {
        let mut out = Vec::new();
        let target = self.captured.or_else(|| hit_test(event.x, event.y));

        self.sync_hover(target, &mut out);

        match event.kind {
            MouseEventKind::Press(_) => {
                self.captured = target;
                self.press_pos = Some((event.x, event.y));
                self.dragging = false;
            }
            MouseEventKind::Drag(_) | MouseEventKind::Move if self.captured.is_some() => {
                let moved_enough = self
                    .press_pos
                    .map(|(px, py)| {
                        event.x.abs_diff(px) > DRAG_THRESHOLD || event.y.abs_diff(py) > DRAG_THRESHOLD
                    })
                    .unwrap_or(false);
                if moved_enough {
                    if let Some(widget) = self.captured {
                        if !self.dragging {
                            self.dragging = true;
                            out.push(RoutedMouseEvent::DragStart(widget));
                        } else {
                            out.push(RoutedMouseEvent::Drag(widget));
                        }
                    }
                }
            }
            MouseEventKind::Release(button) => {
                if let Some(widget) = self.captured.take() {
                    if self.dragging {
                        out.push(RoutedMouseEvent::DragEnd(widget));
                    } else if self.press_pos == Some((event.x, event.y)) {
                        let count = self.next_click_count(now, event.x, event.y, button);
                        out.push(RoutedMouseEvent::Click { widget, button, count });
                    }
                }
                self.dragging = false;
                self.press_pos = None;
            }
            _ => {
                out.push(RoutedMouseEvent::Passthrough(target, event));
            }
        }

        out
    }

    fn sync_hover(&mut self, target: Option<WidgetId>, out: &mut Vec<RoutedMouseEvent>) {
        if target == self.hovered {
            return;
        }
        if let Some(prev) = self.hovered {
            out.push(RoutedMouseEvent::Leave(prev));
        }
        if let Some(next) = target {
            out.push(RoutedMouseEvent::Enter(next));
        }
        self.hovered = target;
    }

    /// Abort an in-progress press or drag without a matching button release
    /// (Escape, or the capturing widget leaving the tree). Returns a
    /// [`RoutedMouseEvent::DragCancel`] if a drag was underway, so callers
    /// can unwind any drag-start state the widget set up; a bare press with
    /// no drag yet is released silently.
    pub fn cancel(&mut self) -> Option<RoutedMouseEvent> {
        let widget = self.captured.take()?;
        let was_dragging = self.dragging;
        self.dragging = false;
        self.press_pos = None;
        was_dragging.then_some(RoutedMouseEvent::DragCancel(widget))
    }

    fn next_click_count(&mut self, now: Instant, x: u16, y: u16, button: MouseButton) -> u8 {
        let count = match self.last_click {
            Some((last_time, lx, ly, last_button, last_count))
                if now.duration_since(last_time) <= MULTI_CLICK_WINDOW
                    && last_button == button
                    && x.abs_diff(lx) <= DRAG_THRESHOLD
                    && y.abs_diff(ly) <= DRAG_THRESHOLD =>
            {
                (last_count + 1).min(3)
            }
            _ => 1,
        };
        self.last_click = Some((now, x, y, button, count));
        count
    }
}
