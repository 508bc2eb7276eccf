//! Reference adapter for n8n's JSON workflow export format.
//!
//! The wire format is a top-level object with `name`, an optional `id`, a `nodes` array of
//! `{ id?, name?, type, position?: [x, y], parameters? }` records, and a `connections`
//! object keyed by source node display name, then by connection category, holding an array
//! of parallel groups, each an array of `{ node, type?, index }` descriptors.
//!
//! ```rust
//! use honyaku::prelude::*;
//!
//! let raw = r#"{
//!   "nodes": [
//!     { "id": "1", "name": "Start", "type": "n8n-nodes-base.manualTrigger" },
//!     { "id": "2", "name": "Say", "type": "n8n-nodes-base.set" }
//!   ],
//!   "connections": { "Start": { "main": [[{ "node": "Say", "type": "main", "index": 0 }]] } }
//! }"#;
//!
//! let adapter = N8nAdapter::default();
//! let workflow = adapter.parse(raw).into_result().unwrap();
//! assert_eq!(workflow.edges[0].from.port_id.as_deref(), Some("1-out-main"));
//!
//! let exported = adapter.serialize(&workflow).unwrap();
//! assert!(adapter.parse(&exported).is_parsed());
//! ```
mod detect;
mod parse;
pub mod ports;
mod serialize;
pub mod wire;

pub use detect::{ECOSYSTEM_SCORE, FALLBACK_SCORE, SHAPE_SCORE};
pub use ports::{PortEffect, PortRule, PortRuleTable, TypeMatcher};

use crate::adapter::{Confidence, WorkflowAdapter};
use crate::error::SerializeError;
use crate::schema::{ParseResult, Workflow};

pub const ADAPTER_ID: &str = "n8n-json";
/// Value stored under `metadata.source` on parsed workflows.
pub const SOURCE_TAG: &str = "n8n";

const PARSE_CONTEXT: &str = "Failed to parse n8n workflow";

/// What to do with a connection entry that cannot become an edge: an unknown source or
/// target node, or an entry that does not have the expected shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedConnectionPolicy {
    /// Drop it silently.
    #[default]
    Drop,
    /// Drop it and add an entry to the parse result's warnings.
    Warn,
}

/// Stateless translator between n8n JSON and the canonical workflow.
#[derive(Debug, Clone)]
pub struct N8nAdapter {
    port_rules: PortRuleTable,
    unresolved_connections: UnresolvedConnectionPolicy,
    preserve_source_fields: bool,
}

impl Default for N8nAdapter {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl N8nAdapter {
    pub fn builder() -> N8nAdapterBuilder {
        N8nAdapterBuilder::new()
    }

    pub fn port_rules(&self) -> &PortRuleTable {
        &self.port_rules
    }
}

pub struct N8nAdapterBuilder {
    port_rules: PortRuleTable,
    unresolved_connections: UnresolvedConnectionPolicy,
    preserve_source_fields: bool,
}

impl Default for N8nAdapterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl N8nAdapterBuilder {
    pub fn new() -> Self {
        Self {
            port_rules: PortRuleTable::n8n(),
            unresolved_connections: UnresolvedConnectionPolicy::default(),
            preserve_source_fields: true,
        }
    }

    pub fn unresolved_connections(mut self, policy: UnresolvedConnectionPolicy) -> Self {
        self.unresolved_connections = policy;
        self
    }

    /// Appends a rule after the built-in n8n rules.
    pub fn with_port_rule(mut self, rule: PortRule) -> Self {
        self.port_rules.push(rule);
        self
    }

    /// Replaces the whole rule table.
    pub fn with_port_rules(mut self, rules: PortRuleTable) -> Self {
        self.port_rules = rules;
        self
    }

    /// When set (the default), exported records start from the retained source fragments so
    /// fields the canonical model does not know about survive.
    pub fn preserve_source_fields(mut self, preserve: bool) -> Self {
        self.preserve_source_fields = preserve;
        self
    }

    pub fn build(self) -> N8nAdapter {
        N8nAdapter {
            port_rules: self.port_rules,
            unresolved_connections: self.unresolved_connections,
            preserve_source_fields: self.preserve_source_fields,
        }
    }
}

impl WorkflowAdapter for N8nAdapter {
    fn id(&self) -> &str {
        ADAPTER_ID
    }

    fn name(&self) -> &str {
        "n8n JSON"
    }

    fn detect(&self, raw: &str) -> Confidence {
        detect::score(raw)
    }

    fn parse(&self, raw: &str) -> ParseResult {
        match parse::parse_document(self, raw) {
            Ok(parsed) => ParseResult::parsed(parsed.workflow).with_warnings(parsed.warnings),
            Err(err) => ParseResult::failure(err.into_parse_error(PARSE_CONTEXT)),
        }
    }

    fn can_serialize(&self) -> bool {
        true
    }

    fn serialize(&self, workflow: &Workflow) -> Result<String, SerializeError> {
        serialize::serialize_workflow(self, workflow)
    }
}
