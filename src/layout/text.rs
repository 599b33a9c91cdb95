use crate::config::MindmapConfig;
use crate::text_metrics::TextMeasure;

use super::TextBlock;

/// Greedy word wrap. A word joins the current line only while the joined line
/// stays strictly narrower than `budget`; words are never split, so a single
/// overlong word ends up alone on its own line.
pub fn wrap_topic(topic: &str, budget: f32, measure: &dyn TextMeasure) -> Vec<String> {
    let mut words = topic.split_whitespace();
    let Some(first) = words.next() else {
        return vec![String::new()];
    };

    let mut lines = Vec::new();
    let mut current = first.to_string();
    for word in words {
        let candidate = format!("{current} {word}");
        if measure.text_width(&candidate) < budget {
            current = candidate;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
        }
    }
    lines.push(current);
    lines
}

/// Wraps a topic and derives its box. Width is uniform across nodes; height
/// grows with the number of wrapped lines.
pub fn size_node(
    topic: &str,
    config: &MindmapConfig,
    font_size: f32,
    measure: &dyn TextMeasure,
) -> TextBlock {
    let lines = wrap_topic(topic, config.wrap_width, measure);
    let height = node_height(lines.len(), config, font_size);
    TextBlock {
        lines,
        width: config.node_width,
        height,
    }
}

pub(super) fn node_height(line_count: usize, config: &MindmapConfig, font_size: f32) -> f32 {
    let text_height = line_count as f32 * font_size * config.line_height + config.node_padding;
    text_height.max(config.min_node_height)
}
