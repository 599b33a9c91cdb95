use crate::config::MindmapConfig;

use super::{NodeId, PositionedNode};

/// A laid-out subtree: its horizontal span and where its root sits relative
/// to the parent's x. Descendants are stored relative to their own parents,
/// so moving the root moves the whole subtree.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Subtree {
    root: NodeId,
    width: f32,
    offset: f32,
}

impl Subtree {
    fn new(root: NodeId, width: f32) -> Subtree {
        Subtree {
            root,
            width,
            offset: 0.0,
        }
    }

    /// The same subtree moved horizontally by `dx`.
    fn shifted(self, dx: f32) -> Subtree {
        Subtree {
            offset: self.offset + dx,
            ..self
        }
    }
}

/// Vertical center of every node. The arena is in pre-order, so a parent's
/// row is always known before its children are reached.
fn row_offsets(nodes: &[PositionedNode], top: f32, config: &MindmapConfig) -> Vec<f32> {
    let mut rows = vec![top; nodes.len()];
    for node in nodes {
        let child_y = rows[node.id.index()] + node.height * config.level_offset_ratio + config.level_gap;
        for child in &node.children {
            rows[child.index()] = child_y;
        }
    }
    rows
}

/// Packs every child subtree under its parent and returns the root subtree
/// plus each node's x offset from its parent.
///
/// Nodes are visited in reverse arena order, so all child subtrees are
/// complete before their parent packs them.
fn pack_subtrees(nodes: &[PositionedNode], config: &MindmapConfig) -> (Option<Subtree>, Vec<f32>) {
    let mut finished: Vec<Option<Subtree>> = vec![None; nodes.len()];
    let mut offsets = vec![0.0; nodes.len()];

    for node in nodes.iter().rev() {
        let children: Vec<Subtree> = node
            .children
            .iter()
            .filter_map(|child| finished[child.index()].take())
            .collect();
        if children.is_empty() {
            finished[node.id.index()] = Some(Subtree::new(node.id, node.width));
            continue;
        }

        let gaps = config.sibling_gap * (children.len() as f32 - 1.0);
        let total_width = children.iter().map(|child| child.width).sum::<f32>() + gaps;
        let mut cursor = -total_width / 2.0;
        for child in children {
            let placed = child.shifted(cursor + child.width / 2.0);
            offsets[placed.root.index()] = placed.offset;
            cursor += child.width + config.sibling_gap;
        }
        finished[node.id.index()] = Some(Subtree::new(node.id, node.width.max(total_width)));
    }

    (finished.into_iter().next().flatten(), offsets)
}

/// Top-down layout: root at `(surface_width / 2, top_padding)`, every parent
/// centered over the packed spans of its child subtrees.
pub(super) fn layout_tree(nodes: &mut [PositionedNode], surface_width: f32, config: &MindmapConfig) {
    let rows = row_offsets(nodes, config.top_padding, config);
    let (Some(root), offsets) = pack_subtrees(nodes, config) else {
        return;
    };
    let root = root.shifted(surface_width / 2.0);
    // Pre-order: a parent's x is final before any child reads it.
    for idx in 0..nodes.len() {
        nodes[idx].x = match nodes[idx].parent {
            Some(parent) => nodes[parent.index()].x + offsets[idx],
            None => root.offset,
        };
        nodes[idx].y = rows[idx];
    }
}
