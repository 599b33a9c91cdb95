use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::MindmapConfig;

use super::{NodeId, PositionedNode};

/// Angular offsets of `count` children around `angle`. Several children share
/// the configured span in equal slots; a single child continues straight out.
pub(super) fn child_angles(angle: f32, count: usize, span: f32) -> Vec<f32> {
    if count <= 1 {
        return vec![angle; count];
    }
    let step = span / count as f32;
    (0..count)
        .map(|i| angle - span / 2.0 + step * (i as f32 + 0.5))
        .collect()
}

/// Radial layout: root at the surface center, each generation on a ring
/// further out.
pub(super) fn layout_central(
    nodes: &mut [PositionedNode],
    surface: (f32, f32),
    config: &MindmapConfig,
    seed: Option<u64>,
) {
    if nodes.is_empty() {
        return;
    }
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let center = (surface.0 / 2.0, surface.1 / 2.0);
    let jitter = config.angle_jitter.abs();

    // (node, incoming angle, radius)
    let mut stack = vec![(NodeId::ROOT, 0.0_f32, 0.0_f32)];
    while let Some((id, angle, radius)) = stack.pop() {
        let node = &mut nodes[id.index()];
        node.x = center.0 + radius * angle.cos();
        node.y = center.1 + radius * angle.sin();

        let child_radius = radius + config.ring_increment(node.depth);
        let children = node.children.clone();
        let angles = child_angles(angle, children.len(), config.angle_span);
        let mut placed: Vec<(NodeId, f32, f32)> = children
            .into_iter()
            .zip(angles)
            .map(|(child, base)| {
                let offset = if jitter > 0.0 {
                    rng.gen_range(-jitter..=jitter)
                } else {
                    0.0
                };
                (child, base + offset, child_radius)
            })
            .collect();
        // Pop in child order so jitter draws stay in pre-order.
        placed.reverse();
        stack.extend(placed);
    }
}
