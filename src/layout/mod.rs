mod central;
pub mod text;
mod tree;
pub(crate) mod types;
pub use text::{size_node, wrap_topic};
pub use types::*;

use crate::config::{LayoutConfig, MindmapConfig, Strategy};
use crate::error::Result;
use crate::ir::TopicNode;
use crate::text_metrics::{FontMeasure, TextMeasure};
use crate::theme::Theme;

/// Size of the render surface a layout is computed for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

impl SurfaceSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Lays out `tree` measuring text with the theme's font.
pub fn compute_layout(
    tree: &TopicNode,
    theme: &Theme,
    config: &LayoutConfig,
    surface: SurfaceSize,
) -> Result<Layout> {
    let measure = FontMeasure::from_theme(theme, config.fast_text_metrics);
    compute_layout_with(tree, config, theme.font_size, surface, &measure)
}

/// Lays out `tree` with a caller-supplied text measurement.
///
/// Every call builds a new arena; the input tree is only read.
pub fn compute_layout_with(
    tree: &TopicNode,
    config: &LayoutConfig,
    font_size: f32,
    surface: SurfaceSize,
    measure: &dyn TextMeasure,
) -> Result<Layout> {
    tree.validate()?;

    let mut nodes = build_arena(tree, config, font_size, measure);

    match config.strategy {
        Strategy::Tree => tree::layout_tree(&mut nodes, surface.width, &config.mindmap),
        Strategy::Central => central::layout_central(
            &mut nodes,
            (surface.width, surface.height),
            &config.mindmap,
            config.seed,
        ),
    }

    let connectors = build_connectors(&nodes, config.strategy, &config.mindmap);
    log::debug!(
        "{} layout: {} nodes, depth {}, {} connectors",
        config.strategy,
        nodes.len(),
        tree.depth(),
        connectors.len()
    );

    Ok(Layout {
        strategy: config.strategy,
        palette: config.palette,
        width: surface.width,
        height: surface.height,
        nodes,
        connectors,
    })
}

/// Flattens `tree` into a pre-order arena: every parent precedes its
/// children and siblings keep their input order.
fn build_arena(
    tree: &TopicNode,
    config: &LayoutConfig,
    font_size: f32,
    measure: &dyn TextMeasure,
) -> Vec<PositionedNode> {
    let mut nodes = Vec::with_capacity(tree.node_count());
    let mut stack: Vec<(&TopicNode, Option<NodeId>, usize)> = vec![(tree, None, 0)];
    while let Some((topic, parent, depth)) = stack.pop() {
        let id = NodeId(nodes.len());
        let block = size_node(&topic.topic, &config.mindmap, font_size, measure);
        nodes.push(PositionedNode {
            id,
            parent,
            children: Vec::with_capacity(topic.children.len()),
            depth,
            topic: topic.topic.clone(),
            lines: block.lines,
            x: 0.0,
            y: 0.0,
            width: block.width,
            height: block.height,
            color_index: depth % config.palette.len(),
        });
        if let Some(parent) = parent {
            nodes[parent.index()].children.push(id);
        }
        stack.extend(
            topic
                .children
                .iter()
                .rev()
                .map(|child| (child, Some(id), depth + 1)),
        );
    }
    nodes
}

fn build_connectors(
    nodes: &[PositionedNode],
    strategy: Strategy,
    config: &MindmapConfig,
) -> Vec<Connector> {
    let mut connectors = Vec::with_capacity(nodes.len().saturating_sub(1));
    for child in nodes {
        let Some(parent_id) = child.parent else {
            continue;
        };
        let parent = &nodes[parent_id.index()];
        let start = (parent.x, parent.y);
        let end = (child.x, child.y);
        let (style, points) = match strategy {
            Strategy::Tree => (
                ConnectorStyle::Curve,
                vec![
                    start,
                    (parent.x, parent.y + config.connector_curve),
                    (child.x, child.y - config.connector_curve),
                    end,
                ],
            ),
            Strategy::Central => (ConnectorStyle::Straight, vec![start, end]),
        };
        connectors.push(Connector {
            from: parent_id,
            to: child.id,
            style,
            points,
        });
    }
    connectors
}
