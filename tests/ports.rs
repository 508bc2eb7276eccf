//! Tests for type-driven port synthesis.
use honyaku::adapters::n8n::{PortRule, PortRuleTable, TypeMatcher};
use honyaku::prelude::*;
use serde_json::json;

fn port_ids(ports: &[Port]) -> Vec<&str> {
    ports.iter().map(|p| p.id.as_str()).collect()
}

#[test]
fn test_plain_node_gets_main_in_and_out() {
    let ports = PortRuleTable::n8n().synthesize("7", "n8n-nodes-base.httpRequest");
    assert_eq!(port_ids(&ports), ["7-in-main", "7-out-main"]);
    assert_eq!(ports[0].direction, PortDirection::In);
    assert_eq!(ports[0].name, "main");
}

#[test]
fn test_trigger_and_start_nodes_have_no_input() {
    let table = PortRuleTable::n8n();
    for node_type in [
        "n8n-nodes-base.manualTrigger",
        "n8n-nodes-base.scheduleTrigger",
        "n8n-nodes-base.webhookTrigger",
        "n8n-nodes-base.start",
        "@n8n/n8n-nodes-langchain.chatTrigger",
    ] {
        let ports = table.synthesize("t", node_type);
        assert_eq!(port_ids(&ports), ["t-out-main"], "type {}", node_type);
    }
}

#[test]
fn test_language_model_capability_ports() {
    let table = PortRuleTable::n8n();

    let model = table.synthesize("m", "@n8n/n8n-nodes-langchain.lmChatOpenAi");
    assert_eq!(port_ids(&model), ["m-in-main", "m-out-main", "m-out-ai_languageModel"]);

    let embeddings = table.synthesize("e", "@n8n/n8n-nodes-langchain.embeddingsModel");
    assert!(port_ids(&embeddings).contains(&"e-out-ai_languageModel"));

    let agent = table.synthesize("a", "@n8n/n8n-nodes-langchain.agent");
    assert_eq!(port_ids(&agent), ["a-in-main", "a-out-main", "a-in-ai_languageModel"]);

    // outside the langchain namespace "model" means nothing
    let plain = table.synthesize("p", "n8n-nodes-base.modelSync");
    assert_eq!(port_ids(&plain), ["p-in-main", "p-out-main"]);
}

#[test]
fn test_empty_table_never_changes_defaults() {
    let table = PortRuleTable::empty();
    assert!(table.is_empty());
    let ports = table.synthesize("x", "n8n-nodes-base.manualTrigger");
    assert_eq!(port_ids(&ports), ["x-in-main", "x-out-main"]);
}

#[test]
fn test_rules_apply_in_order_without_duplicates() {
    let table = PortRuleTable::empty()
        .with_rule(PortRule::new(TypeMatcher::any_of(&["vector"])).add_output("ai_vectorStore"))
        .with_rule(
            PortRule::new(TypeMatcher::all_of(&["vector", "store"]))
                .add_output("ai_vectorStore")
                .add_input("ai_embedding"),
        )
        .with_rule(PortRule::new(TypeMatcher::any_of(&["inMemory"])).remove_output("main"));

    let ports = table.synthesize("v", "@n8n/n8n-nodes-langchain.vectorStoreInMemory");
    assert_eq!(
        port_ids(&ports),
        ["v-in-main", "v-out-ai_vectorStore", "v-in-ai_embedding"]
    );
    assert_eq!(table.len(), 3);
}

#[test]
fn test_builder_rules_reach_parsed_nodes() {
    let adapter = N8nAdapter::builder()
        .with_port_rule(
            PortRule::new(TypeMatcher::all_of(&["langchain", "memory"])).add_output("ai_memory"),
        )
        .build();
    assert_eq!(adapter.port_rules().len(), PortRuleTable::n8n().len() + 1);

    let raw = json!({
        "nodes": [
            { "id": "mem", "name": "Memory", "type": "@n8n/n8n-nodes-langchain.memoryBufferWindow" }
        ],
        "connections": {}
    })
    .to_string();
    let workflow = adapter.parse(&raw).into_result().unwrap();

    assert!(workflow.nodes[0].port("ai_memory", PortDirection::Out).is_some());
}

#[test]
fn test_replacing_the_rule_table() {
    let adapter = N8nAdapter::builder()
        .with_port_rules(PortRuleTable::empty())
        .build();
    let raw = r#"{"nodes":[{"id":"1","type":"n8n-nodes-base.manualTrigger"}],"connections":{}}"#;
    let workflow = adapter.parse(raw).into_result().unwrap();

    assert_eq!(workflow.nodes[0].inputs().count(), 1);
}
