use crate::error::{Error, Result};
use crate::ir::TopicNode;
use once_cell::sync::Lazy;
use regex::Regex;

static FENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^(```|~~~)[A-Za-z0-9_-]*\s*\n(?P<body>.*?)\n?\s*(```|~~~)$").unwrap());

/// Parses the generator's response text into a validated topic tree.
///
/// Accepts plain JSON, JSON wrapped in a Markdown code fence, and JSON5
/// (trailing commas, single quotes). An object with a string `error` field is
/// the generator's failure envelope and becomes [`Error::Upstream`].
pub fn parse_topic_tree(input: &str) -> Result<TopicNode> {
    let body = strip_code_fence(input.trim());
    if body.is_empty() {
        return Err(Error::Parse("empty response".to_string()));
    }

    let value = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value,
        Err(json_err) => json5::from_str::<serde_json::Value>(body)
            .map_err(|_| Error::Parse(json_err.to_string()))?,
    };

    if let Some(message) = value.get("error").and_then(|v| v.as_str()) {
        return Err(Error::Upstream(message.to_string()));
    }

    let tree: TopicNode =
        serde_json::from_value(value).map_err(|err| Error::Parse(err.to_string()))?;
    tree.validate()?;
    Ok(tree)
}

fn strip_code_fence(input: &str) -> &str {
    FENCE_RE
        .captures(input)
        .and_then(|caps| caps.name("body"))
        .map(|body| body.as_str().trim())
        .unwrap_or(input)
}
