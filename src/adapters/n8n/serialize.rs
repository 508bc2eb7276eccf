use super::N8nAdapter;
use super::ports::MAIN_CATEGORY;
use super::wire::{N8nConnection, N8nNodeRecord};
use crate::error::SerializeError;
use crate::schema::{Node, PortDirection, Properties, Workflow};
use ahash::{AHashMap, AHashSet};
use indexmap::IndexMap;
use itertools::Itertools;
use serde_json::Value;
use tracing::{debug, trace, warn};

/// `source name -> category -> targets`; written out as one parallel group per category.
type ConnectionMap<'a> = IndexMap<&'a str, IndexMap<&'a str, Vec<N8nConnection>>>;

pub(super) fn serialize_workflow(
    adapter: &N8nAdapter,
    workflow: &Workflow,
) -> Result<String, SerializeError> {
    if let Some(node) = workflow.nodes.iter().find(|n| !n.position.is_finite()) {
        return Err(SerializeError::InvalidPosition {
            node_id: node.id.clone(),
        });
    }

    let names = export_names(workflow);
    let nodes = workflow
        .nodes
        .iter()
        .zip_eq(&names)
        .map(|(node, name)| write_node(adapter, node, name))
        .collect::<Result<Vec<_>, _>>()?;
    let connections = write_connections(workflow, &names);

    let mut document = match source_document(workflow) {
        Some(original) if adapter.preserve_source_fields => original.clone(),
        _ => Properties::new(),
    };
    if document.contains_key("id") {
        document.insert("id".to_string(), Value::from(workflow.id.as_str()));
    }
    document.insert("name".to_string(), Value::from(workflow.name.as_str()));
    document.insert("nodes".to_string(), Value::Array(nodes));
    document.insert("connections".to_string(), serde_json::to_value(connections)?);

    debug!(
        workflow = %workflow.id,
        nodes = workflow.nodes.len(),
        edges = workflow.edges.len(),
        "serialized n8n workflow"
    );
    Ok(serde_json::to_string_pretty(&Value::Object(document))?)
}

/// One display name per node, in node order.
///
/// Connections are keyed by name, so clashing labels are made distinct: the first node keeps
/// its label and later ones get ` 2`, ` 3`, ... appended, skipping names already in use.
fn export_names(workflow: &Workflow) -> Vec<String> {
    let taken: AHashSet<&str> = workflow.nodes.iter().map(|n| n.label.as_str()).collect();
    let mut kept: AHashSet<&str> = AHashSet::with_capacity(workflow.nodes.len());
    let mut renamed: AHashSet<String> = AHashSet::new();
    let mut names = Vec::with_capacity(workflow.nodes.len());

    for node in &workflow.nodes {
        if kept.insert(node.label.as_str()) {
            names.push(node.label.clone());
            continue;
        }
        let mut suffix = 2;
        let mut candidate = format!("{} {}", node.label, suffix);
        while taken.contains(candidate.as_str()) || renamed.contains(&candidate) {
            suffix += 1;
            candidate = format!("{} {}", node.label, suffix);
        }
        warn!(
            node = %node.id,
            label = %node.label,
            name = %candidate,
            "renaming node with a duplicate label"
        );
        renamed.insert(candidate.clone());
        names.push(candidate);
    }
    names
}

fn write_node(adapter: &N8nAdapter, node: &Node, name: &str) -> Result<Value, SerializeError> {
    let record = serde_json::to_value(N8nNodeRecord {
        id: &node.id,
        name,
        node_type: &node.node_type,
        position: node.position,
        parameters: &node.config,
    })?;

    match (record, &node.raw) {
        (Value::Object(fields), Value::Object(raw)) if adapter.preserve_source_fields => {
            // overwrite in place so the source key order survives
            let mut merged = raw.clone();
            merged.extend(fields);
            Ok(Value::Object(merged))
        }
        (record, _) => Ok(record),
    }
}

fn write_connections<'a>(
    workflow: &'a Workflow,
    names: &'a [String],
) -> IndexMap<&'a str, IndexMap<&'a str, [Vec<N8nConnection>; 1]>> {
    // the first node wins when ids repeat, matching the parser's lookup
    let mut by_id: AHashMap<&str, &str> = AHashMap::with_capacity(names.len());
    for (node, name) in workflow.nodes.iter().zip_eq(names) {
        by_id.entry(node.id.as_str()).or_insert(name.as_str());
    }

    let mut connections = ConnectionMap::new();
    for edge in &workflow.edges {
        let (Some(source), Some(target)) = (
            by_id.get(edge.from.node_id.as_str()),
            by_id.get(edge.to.node_id.as_str()),
        ) else {
            trace!(edge = %edge.id, "skipping edge with unknown endpoint");
            continue;
        };

        let category = edge.from.category(PortDirection::Out).unwrap_or(MAIN_CATEGORY);
        let target_category = edge.to.category(PortDirection::In).unwrap_or(category);

        connections
            .entry(*source)
            .or_default()
            .entry(category)
            .or_default()
            .push(N8nConnection {
                node: target.to_string(),
                category: Some(target_category.to_string()),
                index: 0,
            });
    }

    connections
        .into_iter()
        .map(|(source, categories)| {
            let categories = categories
                .into_iter()
                .map(|(category, targets)| (category, [targets]))
                .collect();
            (source, categories)
        })
        .collect()
}

fn source_document(workflow: &Workflow) -> Option<&Properties> {
    workflow
        .metadata
        .as_ref()?
        .get("originalData")?
        .as_object()
}
