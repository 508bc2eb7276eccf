use crate::schema::{Position, Properties};
use serde::{Deserialize, Serialize, Serializer};

/// One entry of a parallel connection group: `{ "node": ..., "type": ..., "index": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct N8nConnection {
    /// Display name of the target node.
    pub node: String,
    /// Target connection category. Falls back to the outgoing category when absent.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Target input index; the canonical model does not track it.
    #[serde(default, skip_deserializing)]
    pub index: u32,
}

/// The fields the adapter owns on an exported node record.
#[derive(Debug, Serialize)]
pub struct N8nNodeRecord<'a> {
    pub id: &'a str,
    pub name: &'a str,
    #[serde(rename = "type")]
    pub node_type: &'a str,
    #[serde(serialize_with = "serialize_position")]
    pub position: Position,
    pub parameters: &'a Properties,
}

/// Writes a position as `[x, y]`, keeping whole coordinates integral.
fn serialize_position<S: Serializer>(position: &Position, serializer: S) -> Result<S::Ok, S::Error> {
    [coordinate(position.x), coordinate(position.y)].serialize(serializer)
}

fn coordinate(value: f64) -> serde_json::Value {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
        serde_json::Value::from(value as i64)
    } else {
        serde_json::Value::from(value)
    }
}
