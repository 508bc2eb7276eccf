use crate::adapter::Confidence;
use serde_json::Value;

/// Node graph shape plus at least one n8n-namespaced node type.
pub const ECOSYSTEM_SCORE: f64 = 0.9;
/// Node graph shape without ecosystem markers.
pub const SHAPE_SCORE: f64 = 0.7;
/// Any other JSON object, so this adapter still wins when nothing else claims it.
pub const FALLBACK_SCORE: f64 = 0.1;

const TYPE_PREFIXES: [&str; 2] = ["n8n-nodes-base.", "@n8n/"];
const TYPE_INFIX: &str = "n8n-nodes-";

pub(super) fn score(raw: &str) -> Confidence {
    if !raw.trim_start().starts_with('{') {
        return Confidence::NONE;
    }
    let Ok(document) = serde_json::from_str::<Value>(raw) else {
        return Confidence::NONE;
    };

    let nodes = document.get("nodes").and_then(Value::as_array);
    let has_connections = document.get("connections").is_some_and(Value::is_object);
    match nodes {
        Some(nodes) if has_connections => {
            if nodes.iter().any(has_ecosystem_type) {
                Confidence::new(ECOSYSTEM_SCORE)
            } else {
                Confidence::new(SHAPE_SCORE)
            }
        }
        _ => Confidence::new(FALLBACK_SCORE),
    }
}

fn has_ecosystem_type(node: &Value) -> bool {
    node.get("type").and_then(Value::as_str).is_some_and(|t| {
        TYPE_PREFIXES.iter().any(|p| t.starts_with(p)) || t.contains(TYPE_INFIX)
    })
}
