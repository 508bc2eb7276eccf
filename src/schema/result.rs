use super::workflow::Workflow;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A caller-facing parse failure with an optional source location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseError {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl ParseError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            line: None,
            column: None,
        }
    }

    pub fn at(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.line, self.column) {
            (Some(line), Some(column)) => {
                write!(f, "{} (line {}, column {})", self.message, line, column)
            }
            (Some(line), None) => write!(f, "{} (line {})", self.message, line),
            _ => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// The outcome of `WorkflowAdapter::parse`.
///
/// Exactly one of "workflow present" or "errors present" holds. `Failed` always carries at
/// least one error when built through [`ParseResult::failure`] or [`ParseResult::failures`].
///
/// Serializes as `{ "workflow": ... }` or `{ "errors": [...] }`, each with an optional
/// `warnings` list. Deserializing a failure with an empty `errors` list is rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, try_from = "UncheckedParseResult")]
pub enum ParseResult {
    Parsed {
        workflow: Workflow,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
    },
    Failed {
        errors: Vec<ParseError>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        warnings: Vec<String>,
    },
}

/// Wire shape of [`ParseResult`] before the non-empty `errors` check.
#[derive(Deserialize)]
#[serde(untagged)]
enum UncheckedParseResult {
    Parsed {
        workflow: Workflow,
        #[serde(default)]
        warnings: Vec<String>,
    },
    Failed {
        errors: Vec<ParseError>,
        #[serde(default)]
        warnings: Vec<String>,
    },
}

impl TryFrom<UncheckedParseResult> for ParseResult {
    type Error = &'static str;

    fn try_from(unchecked: UncheckedParseResult) -> Result<Self, Self::Error> {
        match unchecked {
            UncheckedParseResult::Parsed { workflow, warnings } => {
                Ok(ParseResult::Parsed { workflow, warnings })
            }
            UncheckedParseResult::Failed { errors, .. } if errors.is_empty() => {
                Err("a failed parse result must carry at least one error")
            }
            UncheckedParseResult::Failed { errors, warnings } => {
                Ok(ParseResult::Failed { errors, warnings })
            }
        }
    }
}

impl ParseResult {
    pub fn parsed(workflow: Workflow) -> Self {
        ParseResult::Parsed {
            workflow,
            warnings: Vec::new(),
        }
    }

    pub fn failure(error: impl Into<ParseError>) -> Self {
        ParseResult::Failed {
            errors: vec![error.into()],
            warnings: Vec::new(),
        }
    }

    /// Builds a failure from a first error and any number of further ones.
    pub fn failures(first: ParseError, rest: impl IntoIterator<Item = ParseError>) -> Self {
        let mut errors = vec![first];
        errors.extend(rest);
        ParseResult::Failed {
            errors,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, extra: impl IntoIterator<Item = String>) -> Self {
        match &mut self {
            ParseResult::Parsed { warnings, .. } | ParseResult::Failed { warnings, .. } => {
                warnings.extend(extra)
            }
        }
        self
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self, ParseResult::Parsed { .. })
    }

    pub fn workflow(&self) -> Option<&Workflow> {
        match self {
            ParseResult::Parsed { workflow, .. } => Some(workflow),
            ParseResult::Failed { .. } => None,
        }
    }

    pub fn errors(&self) -> &[ParseError] {
        match self {
            ParseResult::Parsed { .. } => &[],
            ParseResult::Failed { errors, .. } => errors,
        }
    }

    pub fn warnings(&self) -> &[String] {
        match self {
            ParseResult::Parsed { warnings, .. } | ParseResult::Failed { warnings, .. } => {
                warnings
            }
        }
    }

    /// Splits the result into the workflow or its errors, dropping warnings.
    pub fn into_result(self) -> Result<Workflow, Vec<ParseError>> {
        match self {
            ParseResult::Parsed { workflow, .. } => Ok(workflow),
            ParseResult::Failed { errors, .. } => Err(errors),
        }
    }
}
