use crate::error::SerializeError;
use crate::schema::{ParseResult, Workflow};
use std::fmt;

/// How strongly an adapter believes a payload is in its format, in `[0, 1]`.
///
/// Zero means "not detected". Boolean detectors convert through `From<bool>`, which maps
/// to exactly 0 or 1.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Confidence(f64);

impl Confidence {
    pub const NONE: Confidence = Confidence(0.0);
    pub const CERTAIN: Confidence = Confidence(1.0);

    /// Clamps `score` into `[0, 1]`. NaN counts as not detected.
    pub fn new(score: f64) -> Self {
        if score.is_nan() {
            Self::NONE
        } else {
            Confidence(score.clamp(0.0, 1.0))
        }
    }

    pub fn value(&self) -> f64 {
        self.0
    }

    pub fn is_detected(&self) -> bool {
        self.0 > 0.0
    }
}

impl From<bool> for Confidence {
    fn from(detected: bool) -> Self {
        if detected {
            Self::CERTAIN
        } else {
            Self::NONE
        }
    }
}

impl From<f64> for Confidence {
    fn from(score: f64) -> Self {
        Confidence::new(score)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// The contract every format plugin implements.
///
/// Adapters are stateless translators between one native representation and the canonical
/// [`Workflow`]. `detect` and `parse` are total: they never panic on any input and report
/// failure through their return values. `serialize` is an optional capability; adapters
/// that cannot export keep the default, which returns [`SerializeError::Unsupported`].
///
/// # Example
///
/// ```rust
/// use honyaku::prelude::*;
///
/// struct CsvAdapter;
///
/// impl WorkflowAdapter for CsvAdapter {
///     fn id(&self) -> &str {
///         "csv"
///     }
///
///     fn detect(&self, raw: &str) -> Confidence {
///         raw.lines().next().is_some_and(|l| l.contains(',')).into()
///     }
///
///     fn parse(&self, _raw: &str) -> ParseResult {
///         ParseResult::failure(ParseError::new("CSV import is not supported"))
///     }
/// }
///
/// let mut registry = AdapterRegistry::new();
/// registry.register(CsvAdapter);
/// assert!(registry.detect_format("a,b\n1,2").is_some());
/// ```
pub trait WorkflowAdapter: Send + Sync {
    /// Stable identifier, e.g. `n8n-json`.
    fn id(&self) -> &str;

    /// Human-readable format name. Defaults to the id.
    fn name(&self) -> &str {
        self.id()
    }

    /// Scores how likely `raw` is in this adapter's format. Must not panic.
    fn detect(&self, raw: &str) -> Confidence;

    /// Translates `raw` into the canonical model. Must not panic.
    fn parse(&self, raw: &str) -> ParseResult;

    fn can_serialize(&self) -> bool {
        false
    }

    /// Writes `workflow` back into this adapter's format.
    fn serialize(&self, workflow: &Workflow) -> Result<String, SerializeError> {
        let _ = workflow;
        Err(SerializeError::Unsupported {
            adapter: self.id().to_string(),
        })
    }
}

impl fmt::Debug for dyn WorkflowAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowAdapter")
            .field("id", &self.id())
            .field("can_serialize", &self.can_serialize())
            .finish()
    }
}
