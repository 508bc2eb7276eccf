use super::wire::N8nConnection;
use super::{N8nAdapter, SOURCE_TAG, UnresolvedConnectionPolicy};
use crate::error::AdapterError;
use crate::schema::{
    Edge, Endpoint, Node, PortDirection, Position, Properties, Workflow, port_id,
};
use ahash::{AHashMap, AHashSet};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, trace, warn};
use uuid::Uuid;

const DEFAULT_WORKFLOW_NAME: &str = "Imported n8n Workflow";
const DEFAULT_NODE_TYPE: &str = "unknown";
const DEFAULT_NODE_LABEL: &str = "Unnamed Node";

/// A successfully read document plus the non-fatal findings collected along the way.
pub(super) struct ParsedDocument {
    pub workflow: Workflow,
    pub warnings: Vec<String>,
}

pub(super) fn parse_document(adapter: &N8nAdapter, raw: &str) -> Result<ParsedDocument, AdapterError> {
    let document: Value = serde_json::from_str(raw)?;
    let source_nodes = document
        .get("nodes")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            AdapterError::Structure("Invalid n8n format: missing or invalid nodes array".to_string())
        })?;

    let mut warnings = Vec::new();
    let mut ids = NodeIdAllocator::default();
    let nodes: Vec<Node> = source_nodes
        .iter()
        .enumerate()
        .map(|(index, source)| read_node(adapter, index, source, &mut ids, &mut warnings))
        .collect();

    let edges = match document.get("connections") {
        Some(Value::Object(connections)) => {
            read_connections(adapter, connections, &nodes, &mut warnings)
        }
        None | Some(Value::Null) => Vec::new(),
        Some(_) => {
            report_dropped(
                adapter,
                &mut warnings,
                "Connections are not an object and were dropped".to_string(),
            );
            Vec::new()
        }
    };

    let id = non_empty_identifier(document.get("id"))
        .unwrap_or_else(|| format!("workflow-{}", Uuid::new_v4()));
    let name = document
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_WORKFLOW_NAME)
        .to_string();

    debug!(
        workflow = %id,
        nodes = nodes.len(),
        edges = edges.len(),
        warnings = warnings.len(),
        "parsed n8n workflow"
    );

    let mut metadata = Properties::new();
    metadata.insert("source".to_string(), Value::from(SOURCE_TAG));
    metadata.insert("originalData".to_string(), document);

    Ok(ParsedDocument {
        workflow: Workflow {
            id,
            name,
            nodes,
            edges,
            metadata: Some(metadata),
        },
        warnings,
    })
}

fn read_node(
    adapter: &N8nAdapter,
    index: usize,
    source: &Value,
    ids: &mut NodeIdAllocator,
    warnings: &mut Vec<String>,
) -> Node {
    let mut node_warnings = Vec::new();
    let source_id = non_empty_identifier(source.get("id"));
    let source_name = source
        .get("name")
        .and_then(Value::as_str)
        .filter(|name| !name.is_empty());

    let preferred_id = match (&source_id, source_name) {
        (Some(id), _) => id.clone(),
        (None, Some(name)) => name.to_string(),
        (None, None) => {
            node_warnings.push(format!(
                "Node at index {} has neither id nor name, using a generated id",
                index
            ));
            format!("node-{}", index)
        }
    };
    let id = ids.allocate(&preferred_id);
    if id != preferred_id {
        let message = format!(
            "Duplicate node id '{}' renamed to '{}'",
            preferred_id, id
        );
        warn!("{}", message);
        warnings.push(message.clone());
        node_warnings.push(message);
    }

    let node_type = source
        .get("type")
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_NODE_TYPE)
        .to_string();
    let label = source_name
        .map(str::to_string)
        .or(source_id)
        .unwrap_or_else(|| DEFAULT_NODE_LABEL.to_string());

    Node {
        ports: adapter.port_rules.synthesize(&id, &node_type),
        id,
        node_type,
        label,
        position: read_position(source.get("position")),
        config: source
            .get("parameters")
            .and_then(Value::as_object)
            .cloned()
            .unwrap_or_default(),
        raw: source.clone(),
        warnings: node_warnings,
    }
}

/// `[x, y]` with numeric coordinates; anything else falls back to the origin.
fn read_position(value: Option<&Value>) -> Position {
    let coordinates = value
        .and_then(Value::as_array)
        .filter(|pair| pair.len() >= 2)
        .and_then(|pair| Some((pair[0].as_f64()?, pair[1].as_f64()?)));
    match coordinates {
        Some((x, y)) => Position::new(x, y),
        None => Position::default(),
    }
}

/// Accepts string or numeric identifiers; empty strings count as absent.
fn non_empty_identifier(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Walks `source name -> category -> [[descriptor, ...], ...]` and emits one edge per
/// descriptor whose endpoints both resolve. Everything else is handed to [`report_dropped`].
fn read_connections(
    adapter: &N8nAdapter,
    connections: &Properties,
    nodes: &[Node],
    warnings: &mut Vec<String>,
) -> Vec<Edge> {
    let lookup = NodeLookup::new(nodes);
    let mut edges = Vec::new();

    for (source_name, categories) in connections {
        let Some(categories) = categories.as_object() else {
            report_dropped(
                adapter,
                warnings,
                format!("Connections of '{}' are not an object and were dropped", source_name),
            );
            continue;
        };
        for (category, groups) in categories {
            let category = category.as_str();
            let Some(groups) = groups.as_array() else {
                report_dropped(
                    adapter,
                    warnings,
                    format!(
                        "Connections of '{}' ({}) are not a list of groups and were dropped",
                        source_name, category
                    ),
                );
                continue;
            };
            for (group_index, group) in groups.iter().enumerate() {
                let Some(group) = group.as_array() else {
                    report_dropped(
                        adapter,
                        warnings,
                        format!(
                            "Connection group {} of '{}' ({}) is not a list and was dropped",
                            group_index, source_name, category
                        ),
                    );
                    continue;
                };
                for entry in group {
                    let descriptor = match N8nConnection::deserialize(entry) {
                        Ok(descriptor) => descriptor,
                        Err(err) => {
                            report_dropped(
                                adapter,
                                warnings,
                                format!(
                                    "Connection from '{}' ({}) is malformed and was dropped: {}",
                                    source_name, category, err
                                ),
                            );
                            continue;
                        }
                    };
                    let target_category = descriptor
                        .category
                        .as_deref()
                        .filter(|c| !c.is_empty())
                        .unwrap_or(category);

                    match (lookup.resolve(source_name), lookup.resolve(&descriptor.node)) {
                        (Some(source), Some(target)) => edges.push(Edge {
                            id: format!("edge-{}", edges.len()),
                            from: Endpoint::new(
                                &source.id,
                                port_id(&source.id, category, PortDirection::Out),
                            ),
                            to: Endpoint::new(
                                &target.id,
                                port_id(&target.id, target_category, PortDirection::In),
                            ),
                        }),
                        _ => report_dropped(
                            adapter,
                            warnings,
                            format!(
                                "Connection '{}' -> '{}' ({}) references an unknown node and was dropped",
                                source_name, descriptor.node, category
                            ),
                        ),
                    }
                }
            }
        }
    }
    edges
}

/// Records a connection entry that produced no edge. Only the `Warn` policy surfaces it.
fn report_dropped(adapter: &N8nAdapter, warnings: &mut Vec<String>, message: String) {
    match adapter.unresolved_connections {
        UnresolvedConnectionPolicy::Drop => trace!("{}", message),
        UnresolvedConnectionPolicy::Warn => {
            warn!("{}", message);
            warnings.push(message);
        }
    }
}

/// Resolves connection names to nodes: display name first, then node id.
/// The first node carrying a given name wins.
struct NodeLookup<'a> {
    by_label: AHashMap<&'a str, &'a Node>,
    by_id: AHashMap<&'a str, &'a Node>,
}

impl<'a> NodeLookup<'a> {
    fn new(nodes: &'a [Node]) -> Self {
        let mut by_label = AHashMap::with_capacity(nodes.len());
        let mut by_id = AHashMap::with_capacity(nodes.len());
        for node in nodes {
            by_label.entry(node.label.as_str()).or_insert(node);
            by_id.entry(node.id.as_str()).or_insert(node);
        }
        Self { by_label, by_id }
    }

    fn resolve(&self, name: &str) -> Option<&'a Node> {
        self.by_label
            .get(name)
            .or_else(|| self.by_id.get(name))
            .copied()
    }
}

/// Hands out node ids, suffixing `-2`, `-3`, ... on collisions.
#[derive(Default)]
struct NodeIdAllocator {
    used: AHashSet<String>,
}

impl NodeIdAllocator {
    fn allocate(&mut self, preferred: &str) -> String {
        let mut candidate = preferred.to_string();
        let mut suffix = 2;
        while self.used.contains(&candidate) {
            candidate = format!("{}-{}", preferred, suffix);
            suffix += 1;
        }
        self.used.insert(candidate.clone());
        candidate
    }
}
