//! Built-in format adapters.
mod legacy_xml;
mod make_yaml;
pub mod n8n;

pub use legacy_xml::LegacyXmlAdapter;
pub use make_yaml::MakeYamlAdapter;
pub use n8n::{N8nAdapter, N8nAdapterBuilder, UnresolvedConnectionPolicy};
