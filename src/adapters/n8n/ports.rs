//! Port synthesis from node type strings.
//!
//! n8n documents describe connectivity structurally, so ports are inferred. Every node
//! starts with a `main` input and a `main` output; rules then remove or add ports based
//! on substrings of the lower-cased node type. Rules run in table order and each rule's
//! effects apply in sequence, so later rules can undo earlier ones.
use crate::schema::{Port, PortDirection};

/// Matches a node type by lower-case substring.
///
/// A type matches when it contains every `all_of` needle and, if `any_of` is non-empty,
/// at least one `any_of` needle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMatcher {
    all_of: Vec<String>,
    any_of: Vec<String>,
}

impl TypeMatcher {
    pub fn all_of(needles: &[&str]) -> Self {
        Self {
            all_of: lowered(needles),
            any_of: Vec::new(),
        }
    }

    pub fn any_of(needles: &[&str]) -> Self {
        Self {
            all_of: Vec::new(),
            any_of: lowered(needles),
        }
    }

    pub fn and_any_of(mut self, needles: &[&str]) -> Self {
        self.any_of.extend(lowered(needles));
        self
    }

    /// `node_type` must already be lower-cased.
    fn matches(&self, node_type: &str) -> bool {
        self.all_of.iter().all(|n| node_type.contains(n.as_str()))
            && (self.any_of.is_empty() || self.any_of.iter().any(|n| node_type.contains(n.as_str())))
    }
}

fn lowered(needles: &[&str]) -> Vec<String> {
    needles.iter().map(|n| n.to_lowercase()).collect()
}

/// What a matching rule does to a node's port list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortEffect {
    /// Appends a port unless one with the same name and direction already exists.
    Add {
        name: String,
        direction: PortDirection,
    },
    /// Removes the port with this name and direction, if present.
    Remove {
        name: String,
        direction: PortDirection,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortRule {
    matcher: TypeMatcher,
    effects: Vec<PortEffect>,
}

impl PortRule {
    pub fn new(matcher: TypeMatcher) -> Self {
        Self {
            matcher,
            effects: Vec::new(),
        }
    }

    pub fn add_input(self, name: &str) -> Self {
        self.effect(PortEffect::Add {
            name: name.to_string(),
            direction: PortDirection::In,
        })
    }

    pub fn add_output(self, name: &str) -> Self {
        self.effect(PortEffect::Add {
            name: name.to_string(),
            direction: PortDirection::Out,
        })
    }

    pub fn remove_input(self, name: &str) -> Self {
        self.effect(PortEffect::Remove {
            name: name.to_string(),
            direction: PortDirection::In,
        })
    }

    pub fn remove_output(self, name: &str) -> Self {
        self.effect(PortEffect::Remove {
            name: name.to_string(),
            direction: PortDirection::Out,
        })
    }

    pub fn effect(mut self, effect: PortEffect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Ordered list of port rules.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PortRuleTable {
    rules: Vec<PortRule>,
}

pub const MAIN_CATEGORY: &str = "main";
pub const LANGUAGE_MODEL_CATEGORY: &str = "ai_languageModel";

impl PortRuleTable {
    /// An empty table: every node gets exactly `main` in and `main` out.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The rules for n8n's node namespace.
    pub fn n8n() -> Self {
        Self::empty()
            // triggers originate executions and take no data input
            .with_rule(
                PortRule::new(TypeMatcher::any_of(&["trigger", "start"]))
                    .remove_input(MAIN_CATEGORY),
            )
            .with_rule(
                PortRule::new(TypeMatcher::all_of(&["langchain"]).and_any_of(&["lm", "model"]))
                    .add_output(LANGUAGE_MODEL_CATEGORY),
            )
            .with_rule(
                PortRule::new(TypeMatcher::all_of(&["langchain", "agent"]))
                    .add_input(LANGUAGE_MODEL_CATEGORY),
            )
    }

    pub fn with_rule(mut self, rule: PortRule) -> Self {
        self.push(rule);
        self
    }

    pub fn push(&mut self, rule: PortRule) {
        self.rules.push(rule);
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Builds the port list for a node of `node_type`.
    pub fn synthesize(&self, node_id: &str, node_type: &str) -> Vec<Port> {
        let mut ports = vec![
            Port::new(node_id, MAIN_CATEGORY, PortDirection::In),
            Port::new(node_id, MAIN_CATEGORY, PortDirection::Out),
        ];

        let node_type = node_type.to_lowercase();
        let effects = self
            .rules
            .iter()
            .filter(|rule| rule.matcher.matches(&node_type))
            .flat_map(|rule| rule.effects.iter());

        for effect in effects {
            match effect {
                PortEffect::Add { name, direction } => {
                    if !ports
                        .iter()
                        .any(|p| &p.name == name && p.direction == *direction)
                    {
                        ports.push(Port::new(node_id, name, *direction));
                    }
                }
                PortEffect::Remove { name, direction } => {
                    ports.retain(|p| !(&p.name == name && p.direction == *direction));
                }
            }
        }
        ports
    }
}
