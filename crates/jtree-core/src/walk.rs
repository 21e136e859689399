//! Generic tree walking and typed value collection.

use crate::value::{ObjectRef, Value};

/// Pre-order walk of `value` and everything below it.
///
/// `f` receives the member name (`None` for the root and for array elements),
/// the value and its depth (root is 0). Returning `false` skips the value's
/// children.
///
/// ```
/// use jtree_core::{parse, walk};
///
/// let tree = parse(r#"{"a":{"b":1},"c":[true]}"#).unwrap();
/// let mut seen = Vec::new();
/// walk::visit(tree.root(), |name, value, depth| {
///     seen.push((name.map(str::to_string), value.type_name(), depth));
///     true
/// });
/// assert_eq!(seen.len(), 5);
/// assert_eq!(seen[2], (Some("b".to_string()), "number", 2));
/// ```
pub fn visit<'a, F>(value: Value<'a>, mut f: F)
where
    F: FnMut(Option<&'a str>, Value<'a>, usize) -> bool,
{
    visit_node(None, value, 0, &mut f);
}

fn visit_node<'a, F>(name: Option<&'a str>, value: Value<'a>, depth: usize, f: &mut F)
where
    F: FnMut(Option<&'a str>, Value<'a>, usize) -> bool,
{
    if !f(name, value, depth) {
        return;
    }
    if let Some(obj) = value.as_object() {
        for (member, child) in obj.iter() {
            visit_node(Some(member), child, depth + 1, f);
        }
    } else if let Some(arr) = value.as_array() {
        for child in arr.iter() {
            visit_node(None, child, depth + 1, f);
        }
    }
}

/// A scalar payload that [`get_values`] can collect.
pub trait Scalar: Sized {
    /// `None` when `value` is not of this scalar's variant.
    fn extract(value: Value<'_>) -> Option<Self>;
}

impl Scalar for String {
    fn extract(value: Value<'_>) -> Option<Self> {
        value.as_str().map(str::to_string)
    }
}

impl Scalar for f64 {
    fn extract(value: Value<'_>) -> Option<Self> {
        value.as_number()
    }
}

impl Scalar for bool {
    fn extract(value: Value<'_>) -> Option<Self> {
        value.as_bool()
    }
}

/// Collect typed scalars along `path`.
///
/// Every component but the last names an array of objects to descend into;
/// elements that are not objects, and objects where the rest of the path does
/// not resolve, are skipped. The last component names the scalar itself.
/// Returns `None` when the first component does not resolve on `object`.
///
/// ```
/// use jtree_core::{parse, walk};
///
/// let tree = parse(r#"{"items":[{"id":1},{"id":2},{"x":0},3]}"#).unwrap();
/// let root = tree.root().expect_object();
/// let ids: Vec<f64> = walk::get_values(root, "items/id").unwrap();
/// assert_eq!(ids, vec![1.0, 2.0]);
/// assert!(walk::get_values::<f64>(root, "missing/id").is_none());
/// ```
pub fn get_values<T: Scalar>(object: ObjectRef<'_>, path: &str) -> Option<Vec<T>> {
    let mut out = Vec::new();
    collect(object, path, &mut out).then_some(out)
}

fn collect<T: Scalar>(object: ObjectRef<'_>, path: &str, out: &mut Vec<T>) -> bool {
    match path.split_once('/') {
        Some((head, rest)) => {
            let Some(nodes) = object.get(head).and_then(|v| v.as_array()) else {
                return false;
            };
            for node in nodes.iter().filter_map(|v| v.as_object()) {
                collect(node, rest, out);
            }
            true
        }
        None => {
            match object.get(path).and_then(T::extract) {
                Some(v) => {
                    out.push(v);
                    true
                }
                None => false,
            }
        }
    }
}
