use crate::adapter::{Confidence, WorkflowAdapter};
use crate::schema::{ParseError, ParseResult};

/// Placeholder for Make (Integromat) scenarios exported as YAML.
///
/// Registered so the format shows up in listings; it never claims an input.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeYamlAdapter;

impl WorkflowAdapter for MakeYamlAdapter {
    fn id(&self) -> &str {
        "make-yaml"
    }

    fn name(&self) -> &str {
        "Make YAML"
    }

    fn detect(&self, _raw: &str) -> Confidence {
        Confidence::NONE
    }

    fn parse(&self, _raw: &str) -> ParseResult {
        ParseResult::failure(ParseError::new("Make YAML import is not implemented"))
    }
}
