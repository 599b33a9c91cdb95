use crate::error::{Error, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// One topic of a mind map as produced by the upstream generator.
///
/// Children are owned, so a `TopicNode` value is always a finite tree with a
/// single root; shared or cyclic structures cannot be expressed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicNode {
    pub topic: String,
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub children: Vec<TopicNode>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<TopicNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TopicNode>>::deserialize(deserializer)?.unwrap_or_default())
}

impl TopicNode {
    pub fn leaf(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(topic: impl Into<String>, children: Vec<TopicNode>) -> Self {
        Self {
            topic: topic.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn node_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(&node.children);
        }
        count
    }

    /// Number of levels below this node; a leaf has depth 0.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(self, 0)];
        while let Some((node, level)) = stack.pop() {
            deepest = deepest.max(level);
            stack.extend(node.children.iter().map(|child| (child, level + 1)));
        }
        deepest
    }

    /// Checks that every topic carries displayable text. The error names the
    /// offending node by its child indices, e.g. `root/0/1`.
    pub fn validate(&self) -> Result<()> {
        // Child indices from the root down to the node being visited.
        let mut trail: Vec<usize> = Vec::new();
        let mut stack = vec![(self, 0usize, 0)];
        while let Some((node, level, idx)) = stack.pop() {
            trail.truncate(level.saturating_sub(1));
            if level > 0 {
                trail.push(idx);
            }
            if node.topic.trim().is_empty() {
                let path = trail.iter().fold("root".to_string(), |mut path, idx| {
                    path.push_str(&format!("/{idx}"));
                    path
                });
                return Err(Error::InvalidTree {
                    path,
                    reason: "topic is empty".to_string(),
                });
            }
            stack.extend(
                node.children
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(idx, child)| (child, level + 1, idx)),
            );
        }
        Ok(())
    }
}

// Unlinks descendants one level at a time so dropping a long chain does not
// recurse once per level.
impl Drop for TopicNode {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
