/// Path matcher tests: every step kind, fan-out, index injection, failure
/// propagation and the behavior under quiet/debug configuration.
use jtree_core::{
    match_values, parse, Config, Document, ErrorKind, JtreeError, Matched, Path, Tree, ValueType,
};

fn doc() -> Tree {
    parse(
        r#"{
        "title": "catalog",
        "count": 3,
        "items": [
            {"id": 1, "name": "apple", "tags": ["red", "fruit"]},
            {"id": 2, "name": "brick", "tags": []},
            {"id": 3, "name": "cloud", "tags": ["white"]},
            {"id": 4, "name": "drum"},
            {"id": 5, "name": "eel", "tags": ["fish"]}
        ],
        "meta": {"a": 1, "b": 2}
    }"#,
    )
    .unwrap()
}

fn texts(results: &[Matched<'_>]) -> Vec<String> {
    results.iter().map(|m| m.to_string()).collect()
}

fn run(tree: &Tree, expr: &str) -> Vec<String> {
    texts(&match_values(tree.root(), expr).unwrap())
}

// ============================================================================
// 1. Field lookup
// ============================================================================

#[test]
fn single_field() {
    let tree = doc();
    assert_eq!(run(&tree, "title"), vec![r#""catalog""#]);
}

#[test]
fn nested_fields() {
    let tree = doc();
    assert_eq!(run(&tree, "meta/b"), vec!["2"]);
}

#[test]
fn results_alias_tree_values() {
    let tree = doc();
    let results = match_values(tree.root(), "meta").unwrap();
    let meta = tree.root().expect_object().get("meta").unwrap();
    assert_eq!(results, vec![Matched::Value(meta)]);
}

#[test]
fn missing_field_fails_whole_match() {
    let tree = doc();
    let err = match_values(tree.root(), "missing/field").unwrap_err();
    assert_eq!(err, JtreeError::MissingField("missing".to_string()));
    assert_eq!(err.kind(), ErrorKind::Match);
}

#[test]
fn field_on_non_object_fails() {
    let tree = doc();
    let err = match_values(tree.root(), "title/length").unwrap_err();
    assert_eq!(err, JtreeError::NotAnObject { type_name: "string" });
}

#[test]
fn empty_expression_matches_nothing() {
    let tree = doc();
    assert!(match_values(tree.root(), "").unwrap().is_empty());
}

// ============================================================================
// 2. Introspection
// ============================================================================

#[test]
fn keys_in_insertion_order() {
    let tree = doc();
    assert_eq!(run(&tree, "meta/?"), vec![r#"["a","b"]"#]);
    assert_eq!(run(&tree, "meta/?keys"), vec![r#"["a","b"]"#]);
}

#[test]
fn values_alias_members() {
    let tree = doc();
    let results = match_values(tree.root(), "meta/?values").unwrap();
    assert_eq!(texts(&results), vec!["[1,2]"]);

    let meta = tree.root().expect_object().get("meta").unwrap().expect_object();
    let elements = results[0].elements().unwrap();
    assert_eq!(elements[0], Matched::Value(meta.get("a").unwrap()));
}

#[test]
fn type_names() {
    let tree = doc();
    assert_eq!(run(&tree, "?type"), vec![r#""object""#]);
    assert_eq!(run(&tree, "items/?type"), vec![r#""array""#]);
    assert_eq!(run(&tree, "count/?type"), vec![r#""number""#]);
}

#[test]
fn keys_on_array_fails() {
    let tree = doc();
    assert!(match_values(tree.root(), "items/?keys").is_err());
}

#[test]
fn unknown_query_is_invalid_expression() {
    let tree = doc();
    let err = match_values(tree.root(), "meta/?length").unwrap_err();
    assert!(matches!(err, JtreeError::InvalidExpression { .. }));
}

#[test]
fn keys_result_can_be_ranged() {
    let tree = doc();
    assert_eq!(run(&tree, "meta/?keys/[1]"), vec![r#""b""#]);
}

// ============================================================================
// 3. Bracket ranges
// ============================================================================

#[test]
fn all_elements() {
    let tree = doc();
    assert_eq!(run(&tree, "items/[]/id"), vec!["1", "2", "3", "4", "5"]);
}

#[test]
fn single_index() {
    let tree = doc();
    assert_eq!(run(&tree, "items/[2]/name"), vec![r#""cloud""#]);
}

#[test]
fn index_past_end_selects_nothing() {
    let tree = doc();
    assert!(match_values(tree.root(), "items/[9]").unwrap().is_empty());
    assert!(match_values(tree.root(), "items/[-1]").unwrap().is_empty());
}

#[test]
fn inclusive_span() {
    let tree = doc();
    assert_eq!(run(&tree, "items/[1,3]/id"), vec!["2", "3", "4"]);
}

#[test]
fn span_is_clamped_to_length() {
    let tree = parse("[10,20,30,40,50]").unwrap();
    let results = match_values(tree.root(), "[0,100]").unwrap();
    assert_eq!(texts(&results), vec!["10", "20", "30", "40", "50"]);
}

#[test]
fn reversed_span_is_empty() {
    let tree = parse("[1,2,3]").unwrap();
    assert!(match_values(tree.root(), "[2,1]").unwrap().is_empty());
}

#[test]
fn colon_separator_is_invalid() {
    let tree = parse("[1,2,3]").unwrap();
    let err = match_values(tree.root(), "[0:1]").unwrap_err();
    assert_eq!(err, JtreeError::InvalidIndex("0:1".to_string()));
}

#[test]
fn size_short_circuits() {
    let tree = parse("[1,2,3]").unwrap();
    let results = match_values(tree.root(), "[?size]/anything/else").unwrap();
    assert_eq!(results, vec![Matched::Number(3.0)]);
}

#[test]
fn bracket_on_object_fails() {
    let tree = doc();
    let err = match_values(tree.root(), "meta/[]").unwrap_err();
    assert_eq!(err, JtreeError::NotAnArray { type_name: "object" });
}

#[test]
fn failing_element_is_skipped() {
    let tree = doc();
    // item 4 has no tags; its branch is dropped, the others survive
    assert_eq!(
        run(&tree, "items/[]/tags/[?size]"),
        vec!["2", "0", "1", "1"]
    );
}

#[test]
fn nested_ranges() {
    let tree = parse("[[1,2],[3,4],[5]]").unwrap();
    assert_eq!(run(&tree, "[]/[0]"), vec!["1", "3", "5"]);
}

// ============================================================================
// 4. Brace groups
// ============================================================================

#[test]
fn group_yields_one_array() {
    let tree = parse(r#"{"a":1,"b":2}"#).unwrap();
    let results = match_values(tree.root(), "{a,b}").unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].value_type(), ValueType::Array);
    assert_eq!(results[0].to_string(), "[1,2]");
}

#[test]
fn group_per_element() {
    let tree = doc();
    assert_eq!(
        run(&tree, "items/[0,1]/{id,name}"),
        vec![r#"[1,"apple"]"#, r#"[2,"brick"]"#]
    );
}

#[test]
fn group_branches_take_the_rest_of_the_path() {
    let tree = parse(r#"{"x":{"v":1},"y":{"v":2}}"#).unwrap();
    assert_eq!(run(&tree, "{x,y}/v"), vec!["[1,2]"]);
}

#[test]
fn group_members_may_be_paths() {
    let tree = doc();
    assert_eq!(
        run(&tree, "{title,meta/a,items/[?size]}"),
        vec![r#"["catalog",1,5]"#]
    );
}

#[test]
fn group_drops_failing_branches() {
    let tree = doc();
    assert_eq!(run(&tree, "{title,nope}"), vec![r#"["catalog"]"#]);
}

#[test]
fn group_branch_fan_out_is_flattened_in_order() {
    let tree = doc();
    assert_eq!(
        run(&tree, "{items/[0,1]/id,count}"),
        vec!["[1,2,3]"]
    );
}

#[test]
fn empty_group_member_is_invalid() {
    let tree = doc();
    assert!(match_values(tree.root(), "{a,}").is_err());
}

// ============================================================================
// 5. Index injection
// ============================================================================

#[test]
fn index_at_top_level_is_zero() {
    let tree = doc();
    assert_eq!(run(&tree, "#"), vec!["0"]);
    assert_eq!(run(&tree, "#10"), vec!["10"]);
}

#[test]
fn index_follows_enclosing_range() {
    let tree = doc();
    assert_eq!(run(&tree, "items/[1,3]/#"), vec!["1", "2", "3"]);
    assert_eq!(run(&tree, "items/[1,3]/#100"), vec!["101", "102", "103"]);
}

#[test]
fn index_inside_group() {
    let tree = doc();
    assert_eq!(
        run(&tree, "items/[]/{#1,name}"),
        vec![
            r#"[1,"apple"]"#,
            r#"[2,"brick"]"#,
            r#"[3,"cloud"]"#,
            r#"[4,"drum"]"#,
            r#"[5,"eel"]"#,
        ]
    );
}

#[test]
fn index_must_be_last() {
    let tree = doc();
    assert!(match_values(tree.root(), "#/title").is_err());
}

#[test]
fn index_in_group_must_end_the_expression() {
    let tree = doc();
    assert!(match_values(tree.root(), "{#,meta}/a").is_err());
    assert!(match_values(tree.root(), "items/[]/{#,tags}/[0]").is_err());
    assert!(match_values(tree.root(), "{{#,title},meta}/a").is_err());
    assert!(Path::parse("{meta,#}/a").is_err());
}

// ============================================================================
// 6. Configuration
// ============================================================================

#[test]
fn quiet_and_debug_do_not_change_results() {
    let tree = doc();
    for (quiet, debug) in [(true, false), (false, true), (true, true)] {
        let doc = Document::new(Config {
            quiet,
            debug,
            ..Config::default()
        });
        let results = doc.match_values(tree.root(), "items/[0,1]/name").unwrap();
        assert_eq!(texts(&results), vec![r#""apple""#, r#""brick""#]);
        assert!(doc.match_values(tree.root(), "missing").is_err());
    }
}

#[test]
fn short_printing_of_results() {
    let tree = doc();
    let doc = Document::new(Config {
        print_short: true,
        ..Config::default()
    });
    let results = doc.match_values(tree.root(), "items/[]/name").unwrap();
    let printed: Vec<String> = results.iter().map(|m| doc.print_matched(m)).collect();
    assert_eq!(printed, vec!["apple", "brick", "cloud", "drum", "eel"]);
}

#[test]
fn matching_does_not_mutate_the_tree() {
    let tree = doc();
    let before = tree.node_count();
    match_values(tree.root(), "meta/?values").unwrap();
    match_values(tree.root(), "items/[]/{id,#}").unwrap();
    assert_eq!(tree.node_count(), before);
}
