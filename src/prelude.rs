//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the honyaku crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use honyaku::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let raw = std::fs::read_to_string("path/to/workflow.json")?;
//! let registry = AdapterRegistry::with_default_adapters();
//!
//! match registry.import(&raw) {
//!     ParseResult::Parsed { workflow, warnings } => {
//!         println!("{} nodes, {} warnings", workflow.nodes.len(), warnings.len())
//!     }
//!     ParseResult::Failed { errors, .. } => {
//!         for error in errors {
//!             eprintln!("{}", error);
//!         }
//!     }
//! }
//! # Ok(())
//! # }
//! ```

// Adapter contract and registry
pub use crate::adapter::{Confidence, WorkflowAdapter};
pub use crate::registry::{AdapterRegistry, SharedRegistry};

// Built-in adapters
pub use crate::adapters::{
    LegacyXmlAdapter, MakeYamlAdapter, N8nAdapter, UnresolvedConnectionPolicy,
};

// Canonical schema
pub use crate::schema::{
    Edge, Endpoint, Node, ParseError, ParseResult, Port, PortDirection, Position, Workflow,
};

// Error types
pub use crate::error::{ImportError, SerializeError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
