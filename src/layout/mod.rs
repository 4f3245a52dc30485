//! Declarative layout: Flexbox/Grid convenience constructors on top of
//! [`LayoutEngine`], and the container wrapper widgets compose inside.

mod engine;

pub use engine::{LayoutEngine, LayoutError, LayoutRect, round_position, round_size};

use taffy::prelude::*;

/// Build a vertical stack: children laid out top-to-bottom, each sized by
/// its own flex factors.
pub fn vbox(gap: f32) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Column,
        gap: taffy::Size {
            width: LengthPercentage::Length(0.0),
            height: LengthPercentage::Length(gap),
        },
        ..Default::default()
    }
}

/// Build a horizontal stack: children laid out left-to-right.
pub fn hbox(gap: f32) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Row,
        gap: taffy::Size {
            width: LengthPercentage::Length(gap),
            height: LengthPercentage::Length(0.0),
        },
        ..Default::default()
    }
}

/// Build a general flex container along `direction`, with the given main-
/// and cross-axis alignment.
pub fn flex(direction: FlexDirection, justify: JustifyContent, align: AlignItems) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: direction,
        justify_content: Some(justify),
        align_items: Some(align),
        ..Default::default()
    }
}

/// Build a grid container with the given fixed track templates.
pub fn grid(columns: Vec<TrackSizingFunction>, rows: Vec<TrackSizingFunction>) -> Style {
    Style {
        display: Display::Grid,
        grid_template_columns: columns,
        grid_template_rows: rows,
        ..Default::default()
    }
}

/// Padding/border/visibility wrapper applied uniformly around a widget's
/// content area before handing space to its layout node.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Container {
    /// Cells of padding on each edge.
    pub padding: Edges,
    /// Cells of border thickness on each edge (0 = no border drawn).
    pub border: Edges,
    /// Whether this container (and its subtree) participates in layout
    /// and drawing at all.
    pub visible: bool,
}

/// Per-edge thickness in cells.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Edges {
    /// Top edge.
    pub top: u16,
    /// Right edge.
    pub right: u16,
    /// Bottom edge.
    pub bottom: u16,
    /// Left edge.
    pub left: u16,
}

impl Edges {
    /// The same thickness on all four edges.
    pub const fn all(value: u16) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }
}

impl Default for Container {
    fn default() -> Self {
        Self {
            padding: Edges::default(),
            border: Edges::default(),
            visible: true,
        }
    }
}

impl Container {
    /// Derive the taffy [`Style`] padding fields from this container's
    /// padding and border edges (border occupies layout space the same
    /// way padding does, from the content box's perspective). Re-derived
    /// from the container's own fields every call rather than cached, so
    /// a layout pass that leaves bounds unchanged still reflects the
    /// current padding/border if either was edited since the last pass.
    pub fn content_insets(&self) -> Edges {
        Edges {
            top: self.padding.top + self.border.top,
            right: self.padding.right + self.border.right,
            bottom: self.padding.bottom + self.border.bottom,
            left: self.padding.left + self.border.left,
        }
    }

    /// Shrink `size` by this container's total insets on each axis,
    /// floored at zero.
    pub fn inner_size(&self, size: crate::geometry::Size) -> crate::geometry::Size {
        let insets = self.content_insets();
        crate::geometry::Size::new(
            size.width.saturating_sub(insets.left + insets.right),
            size.height.saturating_sub(insets.top + insets.bottom),
        )
    }
}
