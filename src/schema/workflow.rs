use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Opaque key-value tree carried through the canonical model without interpretation.
pub type Properties = Map<String, Value>;

/// The canonical, format-neutral definition of a workflow graph.
///
/// Every adapter produces this structure from its native format and, when it supports
/// export, consumes it again. The caller owns the value once `parse` returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workflow {
    pub id: String,
    pub name: String,
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    /// Adapter-specific data, including the parsed source document under `originalData`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Properties>,
}

/// A single unit of work in the graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    /// Namespaced kind from the source ecosystem, e.g. `n8n-nodes-base.set`.
    #[serde(rename = "type")]
    pub node_type: String,
    pub label: String,
    pub ports: Vec<Port>,
    #[serde(default)]
    pub position: Position,
    /// Source parameters, passed through unmodified.
    #[serde(default)]
    pub config: Properties,
    /// The full source fragment this node was read from.
    #[serde(default)]
    pub raw: Value,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

impl Node {
    pub fn port(&self, name: &str, direction: PortDirection) -> Option<&Port> {
        self.ports
            .iter()
            .find(|p| p.name == name && p.direction == direction)
    }

    pub fn inputs(&self) -> impl Iterator<Item = &Port> {
        self.ports
            .iter()
            .filter(|p| p.direction == PortDirection::In)
    }

    pub fn outputs(&self) -> impl Iterator<Item = &Port> {
        self.ports
            .iter()
            .filter(|p| p.direction == PortDirection::Out)
    }
}

/// 2D canvas coordinate. Defaults to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortDirection {
    In,
    Out,
}

impl PortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            PortDirection::In => "in",
            PortDirection::Out => "out",
        }
    }

    /// The infix that separates node id and category inside a port id.
    fn delimiter(&self) -> &'static str {
        match self {
            PortDirection::In => "-in-",
            PortDirection::Out => "-out-",
        }
    }
}

impl fmt::Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, directional connection point on a node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Port {
    pub id: String,
    /// The connection category, e.g. `main` or `ai_languageModel`.
    pub name: String,
    pub direction: PortDirection,
}

impl Port {
    pub fn new(node_id: &str, name: &str, direction: PortDirection) -> Self {
        Self {
            id: port_id(node_id, name, direction),
            name: name.to_string(),
            direction,
        }
    }
}

/// Builds the deterministic `{nodeId}-{direction}-{category}` port id.
pub fn port_id(node_id: &str, category: &str, direction: PortDirection) -> String {
    format!("{}-{}-{}", node_id, direction, category)
}

/// Recovers the connection category from a port id.
///
/// The node id prefix is stripped when it matches; otherwise the id is split on the last
/// direction delimiter. Returns `None` for ids that carry no category.
pub fn port_category<'a>(
    port_id: &'a str,
    node_id: &str,
    direction: PortDirection,
) -> Option<&'a str> {
    let category = port_id
        .strip_prefix(node_id)
        .and_then(|rest| rest.strip_prefix(direction.delimiter()))
        .or_else(|| {
            port_id
                .rsplit_once(direction.delimiter())
                .map(|(_, category)| category)
        })?;
    (!category.is_empty()).then_some(category)
}

/// Directed connection between two ports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub from: Endpoint,
    pub to: Endpoint,
}

/// One side of an edge: the node and, when known, the exact port.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Endpoint {
    pub node_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub port_id: Option<String>,
}

impl Endpoint {
    pub fn new(node_id: impl Into<String>, port_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            port_id: Some(port_id.into()),
        }
    }

    /// The category of this endpoint's port, if it can be recovered.
    pub fn category(&self, direction: PortDirection) -> Option<&str> {
        self.port_id
            .as_deref()
            .and_then(|id| port_category(id, &self.node_id, direction))
    }
}
