//! End-to-end runs over front-end trees, through the public API only.

use bindweed::settings::Config;
use bindweed::{Analyzer, ErrorType, MODULE_BODY_NAME, WarningKind};
use std::fs;
use std::io::Write;

fn run(tree_json: &str) -> bindweed::AnalysisReport {
    let config = Config::default();
    let analyzer = Analyzer::new(&config);
    let program = analyzer
        .source_to_tree(tree_json)
        .expect("tree should deserialize");
    analyzer.tree_to_report(&program)
}

#[test]
fn analyzes_a_tree_read_from_disk() {
    let tree = r#"{
        "body": [
            {"kind": "assign", "line": 1,
             "target": {"kind": "path", "name": "a"},
             "value": {"kind": "list", "elements": [{"kind": "constant"}, {"kind": "constant"}]}},
            {"kind": "assign", "line": 2,
             "target": {"kind": "path", "name": "b"},
             "value": {"kind": "name", "name": "a"}},
            {"kind": "assign", "line": 3,
             "target": {"kind": "path", "name": "a", "depth": 1},
             "value": {"kind": "constant"}}
        ]
    }"#;

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(tree.as_bytes()).expect("write tree");

    let config = Config::new(file.path().to_path_buf());
    let analyzer = Analyzer::new(&config);
    let source = fs::read_to_string(file.path()).expect("read back");
    let program = analyzer.source_to_tree(&source).expect("valid tree");
    let report = analyzer.tree_to_report(&program);

    let shared: Vec<&WarningKind> = report
        .warnings
        .iter()
        .map(|w| &w.warning_kind)
        .filter(|k| matches!(k, WarningKind::SharedMemory { .. }))
        .collect();
    assert_eq!(shared.len(), 1);
    match shared[0] {
        WarningKind::SharedMemory { first, second } => {
            assert_eq!(first, "a");
            assert_eq!(second, "b");
        }
        _ => unreachable!(),
    }
}

#[test]
fn malformed_json_is_fatal_before_analysis() {
    let config = Config::default();
    let analyzer = Analyzer::new(&config);

    let result = analyzer.source_to_tree("{\"body\": [{\"kind\": \"nonsense\"}]}");
    let error = result.expect_err("unknown node kinds must be rejected");
    assert_eq!(error.error_type, ErrorType::Frontend);
}

#[test]
fn deep_copy_scenario_stays_silent() {
    let tree = r#"{
        "body": [
            {"kind": "assign", "line": 1,
             "target": {"kind": "path", "name": "a"},
             "value": {"kind": "list", "elements": [{"kind": "constant"}, {"kind": "constant"}]}},
            {"kind": "assign", "line": 2,
             "target": {"kind": "path", "name": "b"},
             "value": {"kind": "call", "callee": "copy.deepcopy",
                       "args": [{"kind": "name", "name": "a"}]}}
        ]
    }"#;

    let report = run(tree);
    assert!(report.warnings.is_empty(), "{:?}", report.warnings);
    assert!(report.errors.is_empty());
}

#[test]
fn function_bodies_and_module_scope_are_reported_separately() {
    let tree = r#"{
        "body": [
            {"kind": "function_def", "name": "setup", "line": 1,
             "params": [
                {"name": "size", "default": {"kind": "constant"}},
                {"name": "grid", "default": {"kind": "list", "elements": [{"kind": "list", "elements": []}]}}
             ],
             "body": [
                {"kind": "assign", "line": 2,
                 "target": {"kind": "path", "name": "view"},
                 "value": {"kind": "call", "callee": "copy.copy",
                           "args": [{"kind": "name", "name": "grid"}]}}
             ]},
            {"kind": "assign", "line": 5,
             "target": {"kind": "path", "name": "shared"},
             "value": {"kind": "list", "elements": []}}
        ]
    }"#;

    let report = run(tree);

    let names: Vec<&str> = report.bodies.iter().map(|b| b.name.as_str()).collect();
    assert_eq!(names, vec!["setup", MODULE_BODY_NAME]);

    let setup = &report.bodies[0];
    let binding = |name: &str| {
        setup
            .bindings
            .iter()
            .find(|b| b.name == name)
            .unwrap_or_else(|| panic!("'{name}' missing from setup dump"))
    };
    assert_eq!(binding("size").chain, "value");
    assert!(binding("grid").chain.contains(" -> "));
    assert!(binding("view").chain.contains(" -> "));

    // The shallow copy shares grid's element level
    let grid_tail = binding("grid").chain.split(" -> ").last().unwrap().to_string();
    let view_tail = binding("view").chain.split(" -> ").last().unwrap().to_string();
    assert_eq!(grid_tail, view_tail);
}

#[test]
fn copy_of_a_scalar_parameter_is_reported_and_scoped() {
    let tree = r#"{
        "body": [
            {"kind": "function_def", "name": "f", "line": 1,
             "params": [{"name": "n", "default": {"kind": "constant"}}],
             "body": [
                {"kind": "assign", "line": 2,
                 "target": {"kind": "path", "name": "m"},
                 "value": {"kind": "call", "callee": "copy.copy",
                           "args": [{"kind": "name", "name": "n"}]}}
             ]}
        ]
    }"#;

    let report = run(tree);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].error_type, ErrorType::CopySourceNotContainer);
    // Recoverable: the function still dumps its environment
    assert!(report.bodies.iter().any(|b| b.name == "f"));
}

#[test]
fn json_report_shape_is_stable() {
    let tree = r#"{
        "body": [
            {"kind": "assign", "line": 1,
             "target": {"kind": "path", "name": "a"},
             "value": {"kind": "list", "elements": []}},
            {"kind": "assign", "line": 2,
             "target": {"kind": "path", "name": "b"},
             "value": {"kind": "name", "name": "a"}}
        ]
    }"#;

    let report = run(tree);
    let value = serde_json::to_value(&report).expect("report serializes");

    assert!(value["bodies"].is_array());
    assert!(value["warnings"].is_array());
    assert!(value["errors"].is_array());

    let warning = &value["warnings"][0];
    assert_eq!(warning["line"], 2);
    assert_eq!(warning["warning_kind"]["kind"], "shared_memory");
    assert_eq!(warning["warning_kind"]["first"], "a");
    assert_eq!(warning["warning_kind"]["second"], "b");
}

#[test]
fn augmented_assignment_roundtrips_through_json() {
    let tree = r#"{
        "body": [
            {"kind": "assign", "line": 1,
             "target": {"kind": "path", "name": "a"},
             "value": {"kind": "list", "elements": [{"kind": "constant"}]}},
            {"kind": "assign", "line": 2,
             "target": {"kind": "path", "name": "b"},
             "value": {"kind": "list", "elements": [{"kind": "constant"}]}},
            {"kind": "aug_assign", "line": 3,
             "target": {"kind": "path", "name": "a"},
             "value": {"kind": "name", "name": "b"}}
        ]
    }"#;

    let report = run(tree);
    let shared = report
        .warnings
        .iter()
        .any(|w| matches!(&w.warning_kind, WarningKind::SharedMemory { .. }));
    assert!(shared, "augmented aliasing must be flagged: {:?}", report.warnings);
}
