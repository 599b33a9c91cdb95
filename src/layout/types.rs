use serde::Serialize;

use crate::config::Strategy;
use crate::theme::Palette;

/// Index of a node in a [`Layout`] arena. Ids are assigned in pre-order, so
/// the root is always `NodeId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(pub usize);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextBlock {
    pub lines: Vec<String>,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionedNode {
    pub id: NodeId,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub depth: usize,
    pub topic: String,
    pub lines: Vec<String>,
    /// Center of the node box in surface coordinates.
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color_index: usize,
}

impl PositionedNode {
    pub fn left(&self) -> f32 {
        self.x - self.width / 2.0
    }

    pub fn right(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn top(&self) -> f32 {
        self.y - self.height / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectorStyle {
    /// Cubic curve; `points` holds start, two controls and end.
    Curve,
    /// Straight segment; `points` holds start and end.
    Straight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub from: NodeId,
    pub to: NodeId,
    pub style: ConnectorStyle,
    pub points: Vec<(f32, f32)>,
}

/// Result of one layout pass: a freshly built arena of positioned nodes plus
/// the parent-to-child connectors between them.
#[derive(Debug, Clone)]
pub struct Layout {
    pub strategy: Strategy,
    pub palette: Palette,
    /// Size of the surface the layout was computed for.
    pub width: f32,
    pub height: f32,
    pub nodes: Vec<PositionedNode>,
    pub connectors: Vec<Connector>,
}

impl Layout {
    pub fn root(&self) -> &PositionedNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    pub fn node(&self, id: NodeId) -> Option<&PositionedNode> {
        self.nodes.get(id.index())
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &PositionedNode> + '_ {
        self.node(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
            .iter()
            .map(move |child| &self.nodes[child.index()])
    }

    /// Every node of the subtree rooted at `id`, in pre-order.
    pub fn subtree(&self, id: NodeId) -> Vec<&PositionedNode> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            let Some(node) = self.node(current) else {
                continue;
            };
            out.push(node);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }
}
