//! Hierarchy flattening for `value...children[...keys]` expressions.
//!
//! Walks a self-similar structure such as
//!
//! ```json
//! {"name":"root","children":[{"name":"a","size":3},{"name":"b","children":[...]}]}
//! ```
//!
//! depth-first, collecting the value field of every node on the way down, and
//! emits one string per leaf (a node without the children field):
//! `root/a`, or `root/a\t3` when `size` is configured as a composite key.
//! Numbers are rendered canonically and any other value type as `??`.

use crate::error::{JtreeError, Result};
use crate::matcher::{Matched, Matcher};
use crate::path::Hierarchy;
use crate::printer::format_number;
use crate::value::{Value, ValueType};

const PLACEHOLDER: &str = "??";

pub(crate) fn flatten<'a>(
    matcher: &Matcher<'_>,
    current: &Matched<'a>,
    spec: &Hierarchy,
    out: &mut Vec<Matched<'a>>,
) -> Result<()> {
    let value = current.as_value().ok_or_else(|| {
        matcher.fail(JtreeError::NotAnObject {
            type_name: current.type_name(),
        })
    })?;
    visit(matcher, value, 0, spec, Vec::new(), out)
}

/// `trail` is owned per call so siblings never see each other's values.
fn visit<'a>(
    matcher: &Matcher<'_>,
    value: Value<'a>,
    index: usize,
    spec: &Hierarchy,
    mut trail: Vec<Value<'a>>,
    out: &mut Vec<Matched<'a>>,
) -> Result<()> {
    let obj = value.as_object().ok_or_else(|| {
        matcher.fail(JtreeError::NotAnObject {
            type_name: value.type_name(),
        })
    })?;
    matcher.trace(format_args!(
        "hierarchy node {index} at depth {}",
        trail.len()
    ));

    if let Some(v) = obj.get(&spec.value_field) {
        trail.push(v);
    }

    let Some(children) = obj.get(&spec.children_field) else {
        let keys: Vec<Value<'a>> = spec.keys.iter().filter_map(|k| obj.get(k)).collect();
        out.push(Matched::String(leaf_key(&trail, &keys)));
        return Ok(());
    };

    let children = children.as_array().ok_or_else(|| {
        matcher.fail(JtreeError::NotAnArray {
            type_name: children.type_name(),
        })
    })?;
    for (i, child) in children.iter().enumerate() {
        let mut found = Vec::new();
        if visit(matcher, child, i, spec, trail.clone(), &mut found).is_ok() {
            out.extend(found);
        }
    }
    Ok(())
}

/// `v1/v2/.../vN`, followed by a tab and `k1,k2,...` when any key was found.
fn leaf_key(trail: &[Value<'_>], keys: &[Value<'_>]) -> String {
    let path = trail
        .iter()
        .map(|v| scalar_text(*v))
        .collect::<Vec<_>>()
        .join("/");
    if keys.is_empty() {
        return path;
    }
    let keys = keys
        .iter()
        .map(|v| scalar_text(*v))
        .collect::<Vec<_>>()
        .join(",");
    format!("{path}\t{keys}")
}

fn scalar_text(value: Value<'_>) -> String {
    match value.value_type() {
        ValueType::String => value.expect_str().to_string(),
        ValueType::Number => format_number(value.as_number().unwrap_or(0.0)),
        _ => PLACEHOLDER.to_string(),
    }
}
