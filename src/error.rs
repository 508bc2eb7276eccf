use crate::schema::ParseError;
use thiserror::Error;

/// Errors raised while exporting a canonical workflow back into a source format.
///
/// Export is an explicit user action, so these are returned to the caller instead of
/// being folded into a result value the way parse failures are.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SerializeError {
    #[error("Failed to serialize workflow: adapter '{adapter}' does not support export")]
    Unsupported { adapter: String },

    #[error("Failed to serialize workflow: no adapter registered under id '{adapter}'")]
    UnknownAdapter { adapter: String },

    #[error("Failed to serialize workflow: node '{node_id}' has a non-finite position")]
    InvalidPosition { node_id: String },

    #[error("Failed to serialize workflow: {0}")]
    Json(String),
}

impl From<serde_json::Error> for SerializeError {
    fn from(err: serde_json::Error) -> Self {
        SerializeError::Json(err.to_string())
    }
}

/// Failures an adapter hits while reading its native format.
///
/// These never leave `WorkflowAdapter::parse`; they are turned into a [`ParseError`]
/// at the adapter boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdapterError {
    #[error("{message}")]
    InvalidJson {
        message: String,
        line: usize,
        column: usize,
    },

    #[error("{0}")]
    Structure(String),
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        AdapterError::InvalidJson {
            message: err.to_string(),
            line: err.line(),
            column: err.column(),
        }
    }
}

impl AdapterError {
    /// Converts the failure into the caller-facing error record, prefixing `context`.
    pub fn into_parse_error(self, context: &str) -> ParseError {
        match self {
            AdapterError::InvalidJson {
                message,
                line,
                column,
            } => {
                let error = ParseError::new(format!("{}: {}", context, message));
                // serde_json reports line 0 for errors that are not tied to a position
                if line == 0 {
                    error
                } else {
                    error.at(line, column)
                }
            }
            AdapterError::Structure(message) => ParseError::new(message),
        }
    }
}

/// Errors from registry-level convenience operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ImportError {
    #[error("No registered adapter recognises this input")]
    NoMatchingFormat,

    #[error("No adapter registered under id '{0}'")]
    UnknownAdapter(String),
}

impl From<ImportError> for ParseError {
    fn from(err: ImportError) -> Self {
        ParseError::new(err.to_string())
    }
}
