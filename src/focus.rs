//! Widget identity and keyboard-focus tracking.

use std::sync::atomic::{AtomicU64, Ordering};

/// A stable identity for a widget, surviving reparenting across layout
/// passes. Allocated from a process-global counter; never reused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Allocate a fresh, never-before-issued id.
    pub fn next() -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(1);
        Self(COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

/// Tracks which widgets can receive focus and which one currently holds
/// it, supporting ordered Tab/Shift-Tab navigation with wraparound.
///
/// The registry is rebuilt lazily each render pass: [`FocusManager::sync`]
/// replaces the focus order with whatever the current frame's widget tree
/// reports as focusable, preserving the current focus holder if it is
/// still present and dropping it (falling back to the first focusable
/// widget, if any) otherwise.
#[derive(Default)]
pub struct FocusManager {
    order: Vec<WidgetId>,
    current: Option<WidgetId>,
}

impl FocusManager {
    /// Create an empty focus manager with nothing focused.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the registered focus order for the frame about to render,
    /// in widget-tree traversal order. Keeps the current focus holder if
    /// it's still in `order`; otherwise focuses the first entry, if any.
    pub fn sync(&mut self, order: Vec<WidgetId>) {
        let keep_current = self
            .current
            .is_some_and(|id| order.contains(&id));
        self.order = order;
        if !keep_current {
            self.current = self.order.first().copied();
        }
    }

    /// The currently focused widget, if any.
    pub fn current(&self) -> Option<WidgetId> {
        self.current
    }

    /// Explicitly focus `id`, if it is registered as focusable.
    pub fn focus(&mut self, id: WidgetId) {
        if self.order.contains(&id) {
            self.current = Some(id);
        }
    }

    /// Clear focus entirely.
    pub fn blur(&mut self) {
        self.current = None;
    }

    /// Move focus to the next widget in traversal order, wrapping around
    /// to the first after the last.
    pub fn focus_next(&mut self) {
        self.step(1);
    }

    /// Move focus to the previous widget in traversal order, wrapping
    /// around to the last before the first.
    pub fn focus_prev(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, delta: i64) {
        if self.order.is_empty() {
            self.current = None;
            return;
        }
        let len = self.order.len() as i64;
        let pos = self
            .current
            .and_then(|id| self.order.iter().position(|&o| o == id))
            .map(|p| p as i64)
            .unwrap_or(-1);
        let next = (pos + delta).rem_euclid(len);
        self.current = Some(self.order[next as usize]);
    }
}
