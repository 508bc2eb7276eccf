//! Common test fixtures: n8n documents and small helpers.
use honyaku::prelude::*;
use serde_json::json;

/// Trigger -> Set, the smallest connected n8n workflow.
#[allow(dead_code)]
pub const SIMPLE_WORKFLOW_JSON: &str = r#"{"nodes":[{"id":"1","name":"Start","type":"n8n-nodes-base.manualTrigger"},{"id":"2","name":"Say","type":"n8n-nodes-base.set"}],"connections":{"Start":{"main":[[{"node":"Say","type":"main","index":0}]]}}}"#;

/// A chat agent wired to a language model, the shape n8n's AI starter template exports.
#[allow(dead_code)]
pub fn agent_workflow() -> serde_json::Value {
    json!({
        "name": "AI Agent",
        "id": "wf-agent",
        "active": false,
        "settings": { "executionOrder": "v1" },
        "nodes": [
            {
                "id": "a1",
                "name": "When chat message received",
                "type": "@n8n/n8n-nodes-langchain.chatTrigger",
                "typeVersion": 1.1,
                "position": [0, 0],
                "parameters": { "options": {} }
            },
            {
                "id": "a2",
                "name": "AI Agent",
                "type": "@n8n/n8n-nodes-langchain.agent",
                "typeVersion": 1.7,
                "position": [220, 0],
                "parameters": { "options": { "systemMessage": "Be brief" } }
            },
            {
                "id": "a3",
                "name": "OpenAI Chat Model",
                "type": "@n8n/n8n-nodes-langchain.lmChatOpenAi",
                "typeVersion": 1,
                "position": [200, 220],
                "parameters": { "model": "gpt-4o-mini" },
                "credentials": { "openAiApi": { "id": "c1", "name": "OpenAI" } }
            },
            {
                "id": "a4",
                "name": "Reply",
                "type": "n8n-nodes-base.set",
                "position": [480, 0.5]
            }
        ],
        "connections": {
            "When chat message received": {
                "main": [[{ "node": "AI Agent", "type": "main", "index": 0 }]]
            },
            "OpenAI Chat Model": {
                "ai_languageModel": [[{ "node": "AI Agent", "type": "ai_languageModel", "index": 0 }]]
            },
            "AI Agent": {
                "main": [
                    [{ "node": "Reply", "type": "main", "index": 0 }],
                    [{ "node": "Ghost", "type": "main", "index": 0 }]
                ]
            }
        }
    })
}

/// Parses `raw` with a default n8n adapter, panicking on failure.
#[allow(dead_code)]
pub fn parse_ok(raw: &str) -> Workflow {
    match N8nAdapter::default().parse(raw) {
        ParseResult::Parsed { workflow, .. } => workflow,
        ParseResult::Failed { errors, .. } => panic!("expected a workflow, got {:?}", errors),
    }
}

/// `(source node, source category, target node, target category)` for every edge, sorted.
#[allow(dead_code)]
pub fn connectivity(workflow: &Workflow) -> Vec<(String, String, String, String)> {
    let mut tuples: Vec<_> = workflow
        .edges
        .iter()
        .map(|e| {
            (
                e.from.node_id.clone(),
                e.from.category(PortDirection::Out).unwrap_or("main").to_string(),
                e.to.node_id.clone(),
                e.to.category(PortDirection::In).unwrap_or("main").to_string(),
            )
        })
        .collect();
    tuples.sort();
    tuples
}

/// An adapter with a fixed score, for registry ordering tests.
#[allow(dead_code)]
pub struct FixedScoreAdapter {
    pub id: &'static str,
    pub score: f64,
}

impl WorkflowAdapter for FixedScoreAdapter {
    fn id(&self) -> &str {
        self.id
    }

    fn detect(&self, _raw: &str) -> Confidence {
        Confidence::new(self.score)
    }

    fn parse(&self, _raw: &str) -> ParseResult {
        ParseResult::failure(ParseError::new(format!("{} cannot parse", self.id)))
    }
}

/// Builds one expected `connectivity` entry.
#[allow(dead_code)]
pub fn link(
    source: &str,
    source_category: &str,
    target: &str,
    target_category: &str,
) -> (String, String, String, String) {
    (
        source.to_string(),
        source_category.to_string(),
        target.to_string(),
        target_category.to_string(),
    )
}
