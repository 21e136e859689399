/// Tree walking and package report tests.
use jtree_core::report::{package_report, ReportOptions, ReportRow};
use jtree_core::{parse, walk};

const FLARE: &str = r#"{
    "name": "flare",
    "children": [
        {"name": "analytics", "children": [
            {"name": "cluster", "children": [
                {"name": "Agglomerative", "size": 3938},
                {"name": "Community", "size": "3812"}
            ]},
            {"name": "Graph", "size": 1042.5}
        ]},
        {"name": "Merge", "size": 8},
        {"name": "Broken", "size": true},
        {"name": "util", "children": [
            {"name": "Arrays", "size": 8258}
        ]}
    ]
}"#;

fn row(package: &str, name: &str, value: &str) -> ReportRow {
    ReportRow {
        package: package.to_string(),
        name: name.to_string(),
        value: value.to_string(),
    }
}

// ============================================================================
// 1. visit
// ============================================================================

#[test]
fn visit_is_pre_order_with_names_and_depths() {
    let tree = parse(r#"{"a":[1,{"b":null}],"c":"x"}"#).unwrap();
    let mut seen = Vec::new();
    walk::visit(tree.root(), |name, value, depth| {
        seen.push(format!("{}:{}:{}", name.unwrap_or("-"), value.type_name(), depth));
        true
    });
    assert_eq!(
        seen,
        vec![
            "-:object:0",
            "a:array:1",
            "-:number:2",
            "-:object:2",
            "b:null:3",
            "c:string:1",
        ]
    );
}

#[test]
fn returning_false_prunes_children() {
    let tree = parse(r#"{"skip":{"deep":1},"keep":{"deep":2}}"#).unwrap();
    let mut numbers = Vec::new();
    walk::visit(tree.root(), |name, value, _| {
        if let Some(n) = value.as_number() {
            numbers.push(n);
        }
        name != Some("skip")
    });
    assert_eq!(numbers, vec![2.0]);
}

// ============================================================================
// 2. get_values
// ============================================================================

#[test]
fn get_values_descends_arrays_of_objects() {
    let tree = parse(
        r#"{"groups":[
            {"members":[{"name":"ann"},{"name":"bob"}]},
            {"members":[{"name":"cy"},{"id":4}]},
            "not an object",
            {"other":[]}
        ]}"#,
    )
    .unwrap();
    let root = tree.root().expect_object();
    let names: Vec<String> = walk::get_values(root, "groups/members/name").unwrap();
    assert_eq!(names, vec!["ann", "bob", "cy"]);
}

#[test]
fn get_values_is_typed() {
    let tree = parse(r#"{"flag":true,"n":3}"#).unwrap();
    let root = tree.root().expect_object();
    assert_eq!(walk::get_values::<bool>(root, "flag"), Some(vec![true]));
    assert_eq!(walk::get_values::<f64>(root, "n"), Some(vec![3.0]));
    assert_eq!(walk::get_values::<String>(root, "n"), None);
}

#[test]
fn get_values_needs_an_array_for_inner_components() {
    let tree = parse(r#"{"a":{"b":1}}"#).unwrap();
    let root = tree.root().expect_object();
    assert_eq!(walk::get_values::<f64>(root, "a/b"), None);
}

// ============================================================================
// 3. Package report
// ============================================================================

#[test]
fn report_groups_rows_by_sorted_package() {
    let tree = parse(FLARE).unwrap();
    let rows = package_report(tree.root(), &ReportOptions::default());
    assert_eq!(
        rows,
        vec![
            row("analytics", "Graph", "1042.5"),
            row("cluster", "Agglomerative", "3938"),
            row("cluster", "Community", "3812"),
            row("flare", "Merge", "8"),
            row("util", "Arrays", "8258"),
        ]
    );
}

#[test]
fn hierarchical_report_prefixes_ancestor_packages() {
    let tree = parse(FLARE).unwrap();
    let options = ReportOptions {
        hierarchical: true,
        ..ReportOptions::default()
    };
    let names: Vec<String> = package_report(tree.root(), &options)
        .into_iter()
        .map(|r| format!("{}/{}", r.package, r.name))
        .collect();
    assert_eq!(
        names,
        vec![
            "flare/Merge",
            "flare/analytics/Graph",
            "flare/analytics/cluster/Agglomerative",
            "flare/analytics/cluster/Community",
            "flare/util/Arrays",
        ]
    );
}

#[test]
fn rows_outside_any_package_have_empty_package() {
    let tree = parse(r#"[{"name":"loose","size":1}]"#).unwrap();
    let rows = package_report(tree.root(), &ReportOptions::default());
    assert_eq!(rows, vec![row("", "loose", "1")]);
}

#[test]
fn report_field_names_are_configurable() {
    let tree = parse(r#"{"id":"pkg","kids":[{"id":"a","bytes":1},{"id":"b","bytes":2}]}"#).unwrap();
    let options = ReportOptions {
        children: "kids".to_string(),
        key: "id".to_string(),
        value: "bytes".to_string(),
        hierarchical: false,
    };
    let rows = package_report(tree.root(), &options);
    assert_eq!(rows, vec![row("pkg", "a", "1"), row("pkg", "b", "2")]);
}
