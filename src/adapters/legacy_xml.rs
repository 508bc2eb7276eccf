use crate::adapter::{Confidence, WorkflowAdapter};
use crate::schema::{ParseError, ParseResult};

/// Placeholder for legacy XML workflow exports. Never claims an input.
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyXmlAdapter;

impl WorkflowAdapter for LegacyXmlAdapter {
    fn id(&self) -> &str {
        "legacy-xml"
    }

    fn name(&self) -> &str {
        "Legacy XML"
    }

    fn detect(&self, _raw: &str) -> Confidence {
        false.into()
    }

    fn parse(&self, _raw: &str) -> ParseResult {
        ParseResult::failure(ParseError::new("Legacy XML import is not implemented"))
    }
}
