use std::f32::consts::PI;

use mindmap_rs_renderer::layout::wrap_topic;
use mindmap_rs_renderer::{
    Layout, LayoutConfig, MindmapConfig, NodeId, Strategy, SurfaceSize, TopicNode,
    compute_layout_with, parse_topic_tree,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const EPS: f32 = 1e-3;

fn per_char(text: &str) -> f32 {
    text.chars().count() as f32 * 8.0
}

fn layout(tree: &TopicNode, strategy: Strategy, surface: SurfaceSize, seed: Option<u64>) -> Layout {
    let config = LayoutConfig {
        strategy,
        seed,
        ..LayoutConfig::default()
    };
    compute_layout_with(tree, &config, 14.0, surface, &per_char).expect("layout failed")
}

fn no_jitter_layout(tree: &TopicNode, surface: SurfaceSize) -> Layout {
    let config = LayoutConfig {
        strategy: Strategy::Central,
        mindmap: MindmapConfig {
            angle_jitter: 0.0,
            ..MindmapConfig::default()
        },
        ..LayoutConfig::default()
    };
    compute_layout_with(tree, &config, 14.0, surface, &per_char).expect("layout failed")
}

/// Deterministic pseudo-random tree so the property checks cover uneven
/// branching and long topics without a fixture per shape.
fn generated_tree(seed: u64, max_depth: usize) -> TopicNode {
    const WORDS: [&str; 8] = [
        "cell", "membrane", "energy", "photosynthesis", "respiration", "water", "chlorophyll", "a",
    ];
    fn build(rng: &mut StdRng, depth: usize, max_depth: usize) -> TopicNode {
        let word_count = rng.gen_range(1..=6);
        let topic = (0..word_count)
            .map(|_| WORDS[rng.gen_range(0..WORDS.len())])
            .collect::<Vec<_>>()
            .join(" ");
        let child_count = if depth >= max_depth { 0 } else { rng.gen_range(0..4) };
        let children = (0..child_count)
            .map(|_| build(rng, depth + 1, max_depth))
            .collect();
        TopicNode::with_children(topic, children)
    }
    build(&mut StdRng::seed_from_u64(seed), 0, max_depth)
}

fn two_child_tree() -> TopicNode {
    TopicNode::with_children("A", vec![TopicNode::leaf("B"), TopicNode::leaf("C")])
}

#[test]
fn wrap_rejoins_and_respects_budget() {
    for seed in 1..40 {
        let tree = generated_tree(seed, 3);
        let mut stack = vec![&tree];
        while let Some(node) = stack.pop() {
            let lines = wrap_topic(&node.topic, 120.0, &per_char);
            assert!(!lines.is_empty());
            let normalized = node.topic.split_whitespace().collect::<Vec<_>>().join(" ");
            assert_eq!(lines.join(" "), normalized);
            for line in &lines {
                assert!(
                    per_char(line) <= 120.0 || !line.contains(' '),
                    "line {line:?} exceeds budget"
                );
            }
            stack.extend(node.children.iter());
        }
    }
}

#[test]
fn tree_scenario_two_children() {
    let layout = layout(&two_child_tree(), Strategy::Tree, SurfaceSize::new(300.0, 400.0), None);
    let root = layout.root();
    let b = &layout.nodes[1];
    let c = &layout.nodes[2];
    assert_eq!(root.x, 150.0);
    assert_eq!(b.topic, "B");
    assert_eq!(c.topic, "C");
    assert!(b.x < root.x && root.x < c.x);
    let level_offset = root.height * 0.7 + MindmapConfig::default().level_gap;
    assert_eq!(b.y, c.y);
    assert!((b.y - (root.y + level_offset)).abs() < EPS);
}

#[test]
fn tree_sibling_subtrees_never_overlap() {
    for seed in 1..40 {
        let tree = generated_tree(seed, 4);
        let layout = layout(&tree, Strategy::Tree, SurfaceSize::new(1200.0, 800.0), None);
        for parent in &layout.nodes {
            let subtrees: Vec<Vec<_>> = parent
                .children
                .iter()
                .map(|child| layout.subtree(*child))
                .collect();
            for (i, left) in subtrees.iter().enumerate() {
                for right in &subtrees[i + 1..] {
                    for a in left {
                        for b in right.iter().filter(|b| b.depth == a.depth) {
                            assert!(
                                a.right() <= b.left() + EPS,
                                "seed {seed}: {:?} overlaps {:?}",
                                a.topic,
                                b.topic
                            );
                        }
                    }
                }
            }
        }
    }
}

#[test]
fn tree_parent_is_centered_over_descendants() {
    for seed in 1..40 {
        let tree = generated_tree(seed, 4);
        let layout = layout(&tree, Strategy::Tree, SurfaceSize::new(1000.0, 800.0), None);
        for node in &layout.nodes {
            let subtree = layout.subtree(node.id);
            let left = subtree.iter().map(|n| n.left()).fold(f32::MAX, f32::min);
            let right = subtree.iter().map(|n| n.right()).fold(f32::MIN, f32::max);
            assert!(
                (node.x - (left + right) / 2.0).abs() < EPS,
                "seed {seed}: {:?} at {} not centered in [{left}, {right}]",
                node.topic,
                node.x
            );
        }
    }
}

#[test]
fn tree_layout_is_deterministic() {
    let tree = generated_tree(7, 4);
    let surface = SurfaceSize::new(900.0, 600.0);
    let first = layout(&tree, Strategy::Tree, surface, None);
    let second = layout(&tree, Strategy::Tree, surface, None);
    assert_eq!(first.nodes.len(), second.nodes.len());
    for (a, b) in first.nodes.iter().zip(&second.nodes) {
        assert_eq!(a.x.to_bits(), b.x.to_bits());
        assert_eq!(a.y.to_bits(), b.y.to_bits());
        assert_eq!(a.width.to_bits(), b.width.to_bits());
        assert_eq!(a.height.to_bits(), b.height.to_bits());
    }
}

#[test]
fn central_radius_grows_by_ring_increment() {
    let config = MindmapConfig::default();
    let surface = SurfaceSize::new(1000.0, 800.0);
    let (cx, cy) = (500.0, 400.0);
    for seed in 1..20 {
        let tree = generated_tree(seed, 4);
        let layout = layout(&tree, Strategy::Central, surface, Some(seed));
        let radius = |id: NodeId| {
            let node = layout.node(id).unwrap();
            (node.x - cx).hypot(node.y - cy)
        };
        assert!(radius(NodeId::ROOT) < EPS);
        for node in &layout.nodes {
            let Some(parent) = node.parent else {
                continue;
            };
            let parent_depth = layout.node(parent).unwrap().depth;
            let expected = radius(parent) + config.ring_increment(parent_depth);
            assert!(
                (radius(node.id) - expected).abs() < 0.05,
                "seed {seed}: radius {} expected {expected}",
                radius(node.id)
            );
        }
    }
}

#[test]
fn central_scenario_five_children() {
    let tree = TopicNode::with_children(
        "Root",
        (1..=5).map(|i| TopicNode::leaf(format!("Child {i}"))).collect(),
    );
    let layout = no_jitter_layout(&tree, SurfaceSize::new(800.0, 600.0));
    let span = MindmapConfig::default().angle_span;
    let step = span / 5.0;
    let mut angles = Vec::new();
    for (i, child) in layout.children(NodeId::ROOT).enumerate() {
        let angle = (child.y - 300.0).atan2(child.x - 400.0);
        let expected = -span / 2.0 + step * (i as f32 + 0.5);
        assert!((angle - expected).abs() < EPS, "child {i}: {angle} vs {expected}");
        let radius = (child.x - 400.0).hypot(child.y - 300.0);
        assert!((radius - 130.0).abs() < EPS);
        angles.push(angle);
    }
    assert_eq!(angles.len(), 5);
    for pair in angles.windows(2) {
        assert!(pair[1] - pair[0] > step - EPS);
    }
    assert!(angles[4] - angles[0] < span);
    assert!(span <= 1.5 * PI + EPS);
}

#[test]
fn deep_chain_lays_out_with_both_strategies() {
    let depth = 20_000;
    let mut tree = TopicNode::leaf("leaf");
    for level in (0..depth).rev() {
        tree = TopicNode::with_children(format!("step {level}"), vec![tree]);
    }
    let surface = SurfaceSize::new(800.0, 600.0);

    let tree_layout = layout(&tree, Strategy::Tree, surface, None);
    assert_eq!(tree_layout.nodes.len(), depth + 1);
    assert_eq!(tree_layout.connectors.len(), depth);
    assert_eq!(tree_layout.nodes[depth].depth, depth);
    assert!(tree_layout.nodes.iter().all(|node| node.x == 400.0));
    assert!(tree_layout.nodes.windows(2).all(|pair| pair[0].y < pair[1].y));

    let central = layout(&tree, Strategy::Central, surface, Some(1));
    assert_eq!(central.nodes.len(), depth + 1);
}

#[test]
fn central_seed_reproduces_jitter() {
    let tree = generated_tree(11, 3);
    let surface = SurfaceSize::new(800.0, 800.0);
    let a = layout(&tree, Strategy::Central, surface, Some(99));
    let b = layout(&tree, Strategy::Central, surface, Some(99));
    for (left, right) in a.nodes.iter().zip(&b.nodes) {
        assert_eq!(left.x.to_bits(), right.x.to_bits());
        assert_eq!(left.y.to_bits(), right.y.to_bits());
    }
}

#[test]
fn central_single_child_continues_outward() {
    let tree = TopicNode::with_children(
        "Root",
        vec![TopicNode::with_children("Only", vec![TopicNode::leaf("Deeper")])],
    );
    let layout = no_jitter_layout(&tree, SurfaceSize::new(600.0, 600.0));
    let only = &layout.nodes[1];
    let deeper = &layout.nodes[2];
    assert!((only.x - (300.0 + 130.0)).abs() < EPS);
    assert!((only.y - 300.0).abs() < EPS);
    assert!((deeper.x - (300.0 + 130.0 + 150.0)).abs() < EPS);
    assert!((deeper.y - 300.0).abs() < EPS);
}

#[test]
fn single_node_placement() {
    let tree = TopicNode::leaf("Solo");
    let surface = SurfaceSize::new(640.0, 480.0);

    let tree_layout = layout(&tree, Strategy::Tree, surface, None);
    assert_eq!(tree_layout.root().x, 320.0);
    assert_eq!(tree_layout.root().y, MindmapConfig::default().top_padding);
    assert!(tree_layout.connectors.is_empty());

    let central_layout = layout(&tree, Strategy::Central, surface, None);
    assert_eq!(central_layout.root().x, 320.0);
    assert_eq!(central_layout.root().y, 240.0);
    assert!(central_layout.connectors.is_empty());
}

#[test]
fn overlong_word_is_one_line() {
    let tree = TopicNode::leaf("Electroencephalographically");
    let layout = layout(&tree, Strategy::Tree, SurfaceSize::new(300.0, 200.0), None);
    let root = layout.root();
    assert_eq!(root.lines, vec!["Electroencephalographically"]);
    let config = MindmapConfig::default();
    let one_line = (14.0 * config.line_height + config.node_padding).max(config.min_node_height);
    assert_eq!(root.height, one_line);
}

#[test]
fn parsed_response_lays_out() {
    let response = r#"```json
{"topic": "الخلية", "children": [
    {"topic": "النواة", "children": [{"topic": "الحمض النووي"}]},
    {"topic": "الغشاء الخلوي", "children": null}
]}
```"#;
    let tree = parse_topic_tree(response).unwrap();
    let layout = layout(&tree, Strategy::Tree, SurfaceSize::new(800.0, 500.0), None);
    assert_eq!(layout.nodes.len(), 4);
    assert_eq!(layout.connectors.len(), 3);
    assert_eq!(layout.root().x, 400.0);
}

#[cfg(feature = "png")]
#[test]
fn render_and_export_png() {
    use mindmap_rs_renderer::{RenderOptions, Surface, Theme, export_png, render};

    let tree = generated_tree(5, 3);
    let config = LayoutConfig {
        fast_text_metrics: true,
        ..LayoutConfig::default()
    };
    let layout =
        compute_layout_with(&tree, &config, 14.0, SurfaceSize::new(800.0, 500.0), &per_char).unwrap();
    let mut surface = Surface::new(800.0, 500.0).unwrap();
    render(&layout, &mut surface, &Theme::light(), &config, &RenderOptions::default()).unwrap();
    let png = export_png(&surface).unwrap();
    assert!(png.starts_with(b"\x89PNG"));
}
