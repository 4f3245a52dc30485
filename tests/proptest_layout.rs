//! Property-based tests for `LayoutEngine`: layout of an arbitrary-sized
//! flex row must always fit within the space it was given.

use proptest::prelude::*;
use taffy::prelude::*;
use vtcore::{LayoutEngine, WidgetId};

proptest! {
    #[test]
    fn flex_children_never_exceed_available_width(
        child_count in 1usize..16,
        available_width in 10u16..400,
        available_height in 10u16..200,
    ) {
        let mut engine = LayoutEngine::new();
        let mut children = Vec::new();
        for _ in 0..child_count {
            let id = WidgetId::next();
            engine
                .add_node(id, Style { flex_grow: 1.0, ..Default::default() })
                .unwrap();
            children.push(id);
        }
        let root = WidgetId::next();
        engine
            .add_node_with_children(
                root,
                Style {
                    display: Display::Flex,
                    flex_direction: FlexDirection::Row,
                    size: taffy::Size {
                        width: Dimension::Length(available_width as f32),
                        height: Dimension::Length(available_height as f32),
                    },
                    ..Default::default()
                },
                &children,
            )
            .unwrap();
        engine.set_root(root).unwrap();
        engine
            .compute(available_width, available_height)
            .unwrap();

        let mut total_width = 0u32;
        for child in &children {
            let rect = engine.layout(*child).unwrap();
            total_width += rect.width as u32;
            prop_assert!(rect.height <= available_height);
        }
        prop_assert!(total_width <= available_width as u32);
    }

    #[test]
    fn layout_is_idempotent_across_repeated_computes(
        available_width in 10u16..200,
        available_height in 10u16..100,
    ) {
        let mut engine = LayoutEngine::new();
        let root = WidgetId::next();
        engine
            .add_node(
                root,
                Style {
                    size: taffy::Size {
                        width: Dimension::Percent(1.0),
                        height: Dimension::Percent(1.0),
                    },
                    ..Default::default()
                },
            )
            .unwrap();
        engine.set_root(root).unwrap();
        engine.compute(available_width, available_height).unwrap();
        let first = engine.layout(root).unwrap();
        engine.compute(available_width, available_height).unwrap();
        let second = engine.layout(root).unwrap();
        prop_assert_eq!(first, second);
    }
}
