//! Golden tests for the serialized report shape
//!
//! Downstream tools consume the JSON form of a report, so its key names
//! and value shapes are checked here independently of the Rust types.

use prdtree::{process_str, ProcessingReport};
use serde_json::Value;

fn report_json(text: &str) -> Value {
    serde_json::to_value(process_str(text)).unwrap()
}

fn keys(value: &Value) -> Vec<&str> {
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort();
    keys
}

#[test]
fn test_report_has_required_top_level_keys() {
    let json = report_json("# A\nX");

    assert_eq!(
        keys(&json),
        vec![
            "documentId",
            "entityStats",
            "levelDistribution",
            "processingMetadata",
            "sections",
            "taskTree",
            "totalTasks",
        ]
    );
}

#[test]
fn test_task_node_shape() {
    let json = report_json("# A\nThe user logs in.\n## B");
    let node = &json["taskTree"][0];

    assert_eq!(
        keys(node),
        vec![
            "content",
            "dependencies",
            "entities",
            "id",
            "level",
            "metadata",
            "status",
            "subTasks",
            "title",
        ]
    );
    assert_eq!(keys(&node["entities"]), vec!["actors", "features", "systems"]);
    assert_eq!(
        keys(&node["metadata"]),
        vec!["createdAt", "priority", "riskLevel", "updatedAt"]
    );

    assert_eq!(node["status"], "pending");
    assert_eq!(node["metadata"]["priority"], "medium");
    assert_eq!(node["metadata"]["riskLevel"], "low");
    assert_eq!(node["dependencies"], serde_json::json!([]));
    assert_eq!(node["entities"]["actors"], serde_json::json!(["user"]));
    assert!(node["subTasks"][0]["subTasks"].as_array().unwrap().is_empty());
}

#[test]
fn test_ids_are_strings_scoped_to_document() {
    let json = report_json("# A\n# B");
    let document = json["documentId"].as_str().unwrap();

    assert!(document.starts_with("d-"));
    assert_eq!(document.len(), 9);
    assert_eq!(json["taskTree"][0]["id"], format!("{}.1", document));
    assert_eq!(json["taskTree"][1]["id"], format!("{}.2", document));
    assert_eq!(json["sections"][1]["id"], json["taskTree"][1]["id"]);
}

#[test]
fn test_statistics_shape() {
    let json = report_json("# A\nadmin and user\n## B\nuser");

    assert_eq!(
        keys(&json["entityStats"]),
        vec![
            "totalActors",
            "totalFeatures",
            "totalSystems",
            "uniqueActors",
            "uniqueFeatures",
            "uniqueSystems",
        ]
    );
    assert_eq!(json["entityStats"]["totalActors"], 3);
    assert_eq!(json["entityStats"]["uniqueActors"], serde_json::json!(["admin", "user"]));
    assert_eq!(json["levelDistribution"], serde_json::json!({"1": 1, "2": 1}));

    let meta = &json["processingMetadata"];
    assert_eq!(
        keys(meta),
        vec!["endTime", "inputSize", "processingDuration", "startTime"]
    );
    assert!(meta["startTime"].is_string());
    assert!(meta["processingDuration"].is_i64());
    assert_eq!(meta["inputSize"], 28);
}

#[test]
fn test_empty_report_shape() {
    let json = report_json("");

    assert_eq!(json["sections"], serde_json::json!([]));
    assert_eq!(json["taskTree"], serde_json::json!([]));
    assert_eq!(json["totalTasks"], 0);
    assert_eq!(json["levelDistribution"], serde_json::json!({}));
    assert_eq!(json["entityStats"]["uniqueSystems"], serde_json::json!([]));
    assert_eq!(json["processingMetadata"]["inputSize"], 0);
}

#[test]
fn test_report_survives_json_round_trip() {
    let report = process_str("# A\nThe api.\n## B\n### C\n# D");
    let text = serde_json::to_string(&report).unwrap();
    let parsed: ProcessingReport = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed, report);
}
