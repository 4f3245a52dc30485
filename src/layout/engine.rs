//! Taffy-based layout engine.
//!
//! Wraps a [`taffy::TaffyTree`] to compute Flexbox and Grid layouts,
//! mapping [`WidgetId`] to Taffy nodes and producing integer-cell
//! [`LayoutRect`] results for terminal rendering.

use std::collections::HashMap;

use taffy::prelude::*;

use crate::focus::WidgetId;
use crate::geometry::Rect;

/// A layout rectangle in terminal cell coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutRect {
    /// X position (column).
    pub x: u16,
    /// Y position (row).
    pub y: u16,
    /// Width in columns.
    pub width: u16,
    /// Height in rows.
    pub height: u16,
}

impl LayoutRect {
    /// Create a new layout rectangle.
    pub const fn new(x: u16, y: u16, width: u16, height: u16) -> Self {
        Self { x, y, width, height }
    }

    /// Convert to a [`Rect`].
    pub const fn to_rect(self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Errors from layout operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The widget was not found in the layout tree.
    WidgetNotFound(WidgetId),
    /// An error occurred inside Taffy.
    TaffyError(String),
    /// No root node has been set.
    NoRoot,
}

impl std::fmt::Display for LayoutError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WidgetNotFound(id) => write!(f, "widget not found: {id:?}"),
            Self::TaffyError(e) => write!(f, "taffy error: {e}"),
            Self::NoRoot => write!(f, "no root node set"),
        }
    }
}

impl std::error::Error for LayoutError {}

/// Layout engine backed by Taffy.
///
/// Manages a tree of layout nodes associated with widget ids, computes
/// Flexbox and Grid layout, and returns integer-cell results.
pub struct LayoutEngine {
    taffy: TaffyTree<()>,
    widget_to_node: HashMap<WidgetId, NodeId>,
    node_to_widget: HashMap<NodeId, WidgetId>,
    root: Option<NodeId>,
}

impl LayoutEngine {
    /// Create a new empty layout engine.
    pub fn new() -> Self {
        Self {
            taffy: TaffyTree::new(),
            widget_to_node: HashMap::new(),
            node_to_widget: HashMap::new(),
            root: None,
        }
    }

    /// Add a leaf node with the given style.
    pub fn add_node(&mut self, widget_id: WidgetId, style: Style) -> Result<(), LayoutError> {
        let node = self
            .taffy
            .new_leaf(style)
            .map_err(|e| LayoutError::TaffyError(format!("{e}")))?;
        self.widget_to_node.insert(widget_id, node);
        self.node_to_widget.insert(node, widget_id);
        Ok(())
    }

    /// Add a node whose children are already-registered widgets.
    pub fn add_node_with_children(
        &mut self,
        widget_id: WidgetId,
        style: Style,
        children: &[WidgetId],
    ) -> Result<(), LayoutError> {
        let child_nodes = self.resolve_nodes(children)?;
        let node = self
            .taffy
            .new_with_children(style, &child_nodes)
            .map_err(|e| LayoutError::TaffyError(format!("{e}")))?;
        self.widget_to_node.insert(widget_id, node);
        self.node_to_widget.insert(node, widget_id);
        Ok(())
    }

    /// Set the root node for layout computation.
    pub fn set_root(&mut self, widget_id: WidgetId) -> Result<(), LayoutError> {
        let node = self.resolve_node(widget_id)?;
        self.root = Some(node);
        Ok(())
    }

    /// Update the style of an existing node.
    pub fn update_style(&mut self, widget_id: WidgetId, style: Style) -> Result<(), LayoutError> {
        let node = self.resolve_node(widget_id)?;
        self.taffy
            .set_style(node, style)
            .map_err(|e| LayoutError::TaffyError(format!("{e}")))?;
        Ok(())
    }

    /// Replace the children list for an existing node.
    pub fn set_children(
        &mut self,
        widget_id: WidgetId,
        children: &[WidgetId],
    ) -> Result<(), LayoutError> {
        let node = self.resolve_node(widget_id)?;
        let child_nodes = self.resolve_nodes(children)?;
        self.taffy
            .set_children(node, &child_nodes)
            .map_err(|e| LayoutError::TaffyError(format!("{e}")))?;
        Ok(())
    }

    /// Remove a node from the layout tree.
    pub fn remove_node(&mut self, widget_id: WidgetId) -> Result<(), LayoutError> {
        let node = self
            .widget_to_node
            .remove(&widget_id)
            .ok_or(LayoutError::WidgetNotFound(widget_id))?;
        self.node_to_widget.remove(&node);
        self.taffy
            .remove(node)
            .map_err(|e| LayoutError::TaffyError(format!("{e}")))?;
        if self.root == Some(node) {
            self.root = None;
        }
        Ok(())
    }

    /// Compute layout against the given available space.
    pub fn compute(&mut self, available_width: u16, available_height: u16) -> Result<(), LayoutError> {
        let root = self.root.ok_or(LayoutError::NoRoot)?;
        let available = taffy::Size {
            width: AvailableSpace::Definite(f32::from(available_width)),
            height: AvailableSpace::Definite(f32::from(available_height)),
        };
        self.taffy
            .compute_layout(root, available)
            .map_err(|e| LayoutError::TaffyError(format!("{e}")))?;
        Ok(())
    }

    /// Get the computed layout for a widget as a [`LayoutRect`].
    pub fn layout(&self, widget_id: WidgetId) -> Result<LayoutRect, LayoutError> {
        let node = self.resolve_node(widget_id)?;
        let layout = self
            .taffy
            .layout(node)
            .map_err(|e| LayoutError::TaffyError(format!("{e}")))?;
        Ok(LayoutRect {
            x: round_position(layout.location.x),
            y: round_position(layout.location.y),
            width: round_size(layout.size.width),
            height: round_size(layout.size.height),
        })
    }

    /// Get the computed layout for a widget as a [`Rect`].
    pub fn layout_rect(&self, widget_id: WidgetId) -> Result<Rect, LayoutError> {
        self.layout(widget_id).map(LayoutRect::to_rect)
    }

    /// Whether a widget has a layout node.
    pub fn has_node(&self, widget_id: WidgetId) -> bool {
        self.widget_to_node.contains_key(&widget_id)
    }

    /// The number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.widget_to_node.len()
    }

    fn resolve_node(&self, widget_id: WidgetId) -> Result<NodeId, LayoutError> {
        self.widget_to_node
            .get(&widget_id)
            .copied()
            .ok_or(LayoutError::WidgetNotFound(widget_id))
    }

    fn resolve_nodes(&self, ids: &[WidgetId]) -> Result<Vec<NodeId>, LayoutError> {
        ids.iter().map(|id| self.resolve_node(*id)).collect()
    }
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Round a position value: floor to integer cells, clamped to `u16`.
pub fn round_position(value: f32) -> u16 {
    if value < 0.0 {
        0
    } else if value > f32::from(u16::MAX) {
        u16::MAX
    } else {
        value.floor() as u16
    }
}

/// Round a size value: round to the nearest integer cell, clamped to `u16`.
pub fn round_size(value: f32) -> u16 {
    if value < 0.0 {
        0
    } else if value > f32::from(u16::MAX) {
        u16::MAX
    } else {
        value.round() as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taffy::prelude::Style;

    #[test]
    fn empty_engine() {
        let engine = LayoutEngine::new();
        assert_eq!(engine.node_count(), 0);
    }

    #[test]
    fn add_leaf_and_compute() {
        let mut engine = LayoutEngine::new();
        let root = WidgetId::next();
        let child = WidgetId::next();
        engine.add_node(child, Style::default()).unwrap();
        engine
            .add_node_with_children(root, Style::default(), &[child])
            .unwrap();
        engine.set_root(root).unwrap();
        engine.compute(80, 24).unwrap();
        let rect = engine.layout(root).unwrap();
        assert_eq!(rect.width, 80);
        assert_eq!(rect.height, 24);
    }

    #[test]
    fn unknown_widget_errors() {
        let engine = LayoutEngine::new();
        let missing = WidgetId::next();
        assert_eq!(engine.layout(missing), Err(LayoutError::WidgetNotFound(missing)));
    }

    #[test]
    fn remove_node_clears_root() {
        let mut engine = LayoutEngine::new();
        let root = WidgetId::next();
        engine.add_node(root, Style::default()).unwrap();
        engine.set_root(root).unwrap();
        engine.remove_node(root).unwrap();
        assert!(matches!(engine.compute(10, 10), Err(LayoutError::NoRoot)));
    }

    #[test]
    fn round_position_clamps_negative() {
        assert_eq!(round_position(-5.0), 0);
    }

    #[test]
    fn round_size_rounds_nearest() {
        assert_eq!(round_size(4.6), 5);
        assert_eq!(round_size(4.4), 4);
    }
}
