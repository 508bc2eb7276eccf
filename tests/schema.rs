//! Tests for the canonical model, its JSON shape and editing helpers.
mod common;
use common::*;
use honyaku::prelude::*;
use honyaku::schema::{port_category, port_id};
use serde_json::json;

#[test]
fn test_workflow_serializes_to_plain_tree() {
    let workflow = parse_ok(SIMPLE_WORKFLOW_JSON);
    let value = serde_json::to_value(&workflow).unwrap();

    assert_eq!(value["nodes"][1]["type"], "n8n-nodes-base.set");
    assert_eq!(value["nodes"][1]["ports"][0], json!({ "id": "2-in-main", "name": "main", "direction": "in" }));
    assert_eq!(value["nodes"][1]["position"], json!({ "x": 0.0, "y": 0.0 }));
    assert_eq!(value["edges"][0]["from"], json!({ "nodeId": "1", "portId": "1-out-main" }));
    assert!(value["metadata"]["originalData"].is_object());
    assert!(value["nodes"][0].get("warnings").is_none());

    let back: Workflow = serde_json::from_value(value).unwrap();
    assert_eq!(back, workflow);
}

#[test]
fn test_parse_result_wire_shape() {
    let parsed = ParseResult::parsed(parse_ok(SIMPLE_WORKFLOW_JSON));
    let value = serde_json::to_value(&parsed).unwrap();
    assert!(value.get("workflow").is_some());
    assert!(value.get("errors").is_none());
    assert!(value.get("warnings").is_none());

    let failed = ParseResult::failure(ParseError::new("broken").at(3, 7))
        .with_warnings(vec!["careful".to_string()]);
    let value = serde_json::to_value(&failed).unwrap();
    assert_eq!(
        value,
        json!({ "errors": [{ "message": "broken", "line": 3, "column": 7 }], "warnings": ["careful"] })
    );

    let back: ParseResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, failed);
}

#[test]
fn test_failed_parse_result_needs_an_error() {
    let empty = serde_json::from_value::<ParseResult>(json!({ "errors": [] }));
    assert!(empty.is_err());

    let empty = serde_json::from_value::<ParseResult>(json!({ "errors": [], "warnings": ["w"] }));
    assert!(empty.is_err());

    let back: ParseResult =
        serde_json::from_value(json!({ "errors": [{ "message": "broken" }] })).unwrap();
    assert_eq!(back, ParseResult::failure(ParseError::new("broken")));
}

#[test]
fn test_parse_result_exactly_one_side() {
    let failed = ParseResult::failures(ParseError::new("a"), vec![ParseError::new("b")]);
    assert!(!failed.is_parsed());
    assert!(failed.workflow().is_none());
    assert_eq!(failed.errors().len(), 2);

    let parsed = ParseResult::parsed(parse_ok(SIMPLE_WORKFLOW_JSON));
    assert!(parsed.errors().is_empty());
    assert!(parsed.into_result().is_ok());
}

#[test]
fn test_parse_error_display() {
    assert_eq!(ParseError::new("bad").to_string(), "bad");
    assert_eq!(ParseError::new("bad").at(2, 5).to_string(), "bad (line 2, column 5)");
}

#[test]
fn test_port_ids_round_trip() {
    let id = port_id("node-1", "ai_languageModel", PortDirection::Out);
    assert_eq!(id, "node-1-out-ai_languageModel");
    assert_eq!(
        port_category(&id, "node-1", PortDirection::Out),
        Some("ai_languageModel")
    );
    assert_eq!(port_category(&id, "node-1", PortDirection::In), None);
    assert_eq!(Port::new("n", "main", PortDirection::In).id, "n-in-main");
}

#[test]
fn test_edit_helpers() {
    let mut workflow = parse_ok(SIMPLE_WORKFLOW_JSON);

    assert!(!workflow.move_node("missing", Position::new(1.0, 1.0)));
    assert!(workflow.move_node("1", Position::new(-40.0, 12.5)));
    assert_eq!(workflow.node("1").unwrap().position, Position::new(-40.0, 12.5));

    assert!(workflow.connect("1", None, "missing", None).is_none());
    let id = workflow.connect("2", Some("main"), "1", None).unwrap();
    assert_eq!(id, "edge-1");
    let edge = workflow.edge(&id).unwrap();
    assert_eq!(edge.from, Endpoint::new("2", "2-out-main"));
    assert_eq!(edge.to, Endpoint::new("1", "1-in-main"));

    assert!(workflow.disconnect("edge-0").is_some());
    assert!(workflow.disconnect("edge-0").is_none());
    assert_eq!(workflow.connect("1", None, "2", None).unwrap(), "edge-2");
}

#[test]
fn test_error_display() {
    let err = SerializeError::Unsupported {
        adapter: "make-yaml".to_string(),
    };
    assert!(err.to_string().contains("make-yaml"));

    let err = ImportError::UnknownAdapter("csv".to_string());
    assert_eq!(err.to_string(), "No adapter registered under id 'csv'");
    let parse_error: ParseError = err.into();
    assert!(parse_error.line.is_none());
}
