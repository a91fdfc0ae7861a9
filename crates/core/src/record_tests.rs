// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use serde_json::json;

#[test]
fn deserializes_canonical_record_shape() {
    let text = r#"{
        "command": "core2_decon",
        "inputs": [
            {"path": "/ngom/abc/img.dv", "imageID": 42, "datasetID": 7, "channel": 1}
        ],
        "par.alpha": 1000,
        "par.lamf": 0.5
    }"#;
    let record: JobRecord = serde_json::from_str(text).unwrap();

    assert_eq!(record.command.first(), Some("core2_decon"));
    assert_eq!(record.inputs.len(), 1);
    assert_eq!(record.inputs[0].path, PathBuf::from("/ngom/abc/img.dv"));
    assert_eq!(record.inputs[0].image_id, json!(42));
    assert_eq!(record.inputs[0].dataset_id, json!(7));
    assert_eq!(record.inputs[0].params.get("channel"), Some(&json!(1)));
    assert_eq!(record.par("alpha"), Some(&json!(1000)));
    assert_eq!(record.par("lamf"), Some(&json!(0.5)));
    assert_eq!(record.par("niter"), None);
}

#[test]
fn command_list_runs_only_the_head() {
    let record: JobRecord =
        serde_json::from_str(r#"{"command": ["first", "second", "third"]}"#).unwrap();
    assert_eq!(record.command.first(), Some("first"));
    assert_eq!(record.command.ignored(), 2);
}

#[test]
fn single_command_has_no_ignored_entries() {
    let command = CommandField::from("core2_decon");
    assert_eq!(command.first(), Some("core2_decon"));
    assert_eq!(command.ignored(), 0);
}

#[test]
fn empty_command_list_has_no_runnable_command() {
    let record: JobRecord = serde_json::from_str(r#"{"command": []}"#).unwrap();
    assert_eq!(record.command.first(), None);
}

#[test]
fn missing_identifiers_default_to_null() {
    let record: JobRecord =
        serde_json::from_str(r#"{"command": "c", "inputs": [{"path": "a/b.dv"}]}"#).unwrap();
    assert_eq!(record.inputs[0].image_id, serde_json::Value::Null);
    assert_eq!(record.inputs[0].dataset_id, serde_json::Value::Null);
}

#[test]
fn missing_inputs_default_to_empty() {
    let record: JobRecord = serde_json::from_str(r#"{"command": "c"}"#).unwrap();
    assert!(record.inputs.is_empty());
}

#[test]
fn result_serializes_with_wire_field_names() {
    let result = JobResult {
        results: vec!["out.dv".to_string()],
        input_id: json!(1),
        dataset_id: json!(2),
    };
    assert_eq!(
        serde_json::to_string(&result).unwrap(),
        r#"{"results":["out.dv"],"inputID":1,"datasetID":2}"#
    );
}

#[test]
fn record_round_trips_through_json() {
    let record = JobRecord {
        command: CommandField::from("c"),
        inputs: vec![JobInput {
            path: PathBuf::from("/r/f/in.dv"),
            image_id: json!("img-9"),
            dataset_id: json!(3),
            params: BTreeMap::new(),
        }],
        params: BTreeMap::from([("par.niter".to_string(), json!(20))]),
    };
    let text = serde_json::to_string(&record).unwrap();
    let back: JobRecord = serde_json::from_str(&text).unwrap();
    assert_eq!(back, record);
}
