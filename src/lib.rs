//! # Honyaku - Workflow Format Adapters
//!
//! **Honyaku** translates workflow definitions exported by third-party automation platforms
//! into one canonical directed graph, and writes that graph back out after it has been
//! edited. Each platform format is handled by a stateless adapter; a registry picks the
//! right adapter for an unknown payload by confidence score.
//!
//! ## Core Workflow
//!
//! 1.  **Register Adapters**: Build an `AdapterRegistry` at startup, usually with
//!     `AdapterRegistry::with_default_adapters()`, and add your own `WorkflowAdapter`s.
//! 2.  **Detect**: `detect_format` asks every adapter for a score and returns the best one.
//! 3.  **Parse**: `WorkflowAdapter::parse` returns a `ParseResult` holding either a canonical
//!     `Workflow` or a list of `ParseError`s. Parsing never panics.
//! 4.  **Edit**: Move nodes, add or remove edges on the `Workflow`.
//! 5.  **Serialize**: `WorkflowAdapter::serialize` writes the graph back in the native format.
//!
//! ## Quick Start
//!
//! ```rust
//! use honyaku::prelude::*;
//!
//! let registry = AdapterRegistry::with_default_adapters();
//!
//! let raw = r#"{
//!   "name": "Greeting",
//!   "nodes": [
//!     { "id": "1", "name": "Start", "type": "n8n-nodes-base.manualTrigger", "position": [0, 0] },
//!     { "id": "2", "name": "Say", "type": "n8n-nodes-base.set", "position": [200, 0] }
//!   ],
//!   "connections": { "Start": { "main": [[{ "node": "Say", "type": "main", "index": 0 }]] } }
//! }"#;
//!
//! let adapter = registry.detect_format(raw).expect("n8n payload");
//! assert_eq!(adapter.id(), "n8n-json");
//!
//! let mut workflow = match adapter.parse(raw) {
//!     ParseResult::Parsed { workflow, .. } => workflow,
//!     ParseResult::Failed { errors, .. } => panic!("import failed: {:?}", errors),
//! };
//!
//! workflow.move_node("2", Position::new(400.0, 120.0));
//! let exported = adapter.serialize(&workflow).expect("export");
//! assert!(exported.contains("\"Say\""));
//! ```

pub mod adapter;
pub mod adapters;
pub mod error;
pub mod prelude;
pub mod registry;
pub mod schema;
