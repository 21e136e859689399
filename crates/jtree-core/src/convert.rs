//! Conversion between [`Tree`] and `serde_json::Value`.
//!
//! Relies on serde_json's `preserve_order` feature so object members keep
//! their insertion order in both directions.

use crate::error::{JtreeError, Result};
use crate::value::{NodeId, Tree, Value, ValueType};
use serde_json::{Map, Number};

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl Tree {
    /// Build a tree from a serde_json value. The root must be an object or array.
    ///
    /// ```
    /// use serde_json::json;
    /// use jtree_core::Tree;
    ///
    /// let tree = Tree::from_json(&json!({"a": [1, 2]})).unwrap();
    /// assert_eq!(tree.root().to_json(), json!({"a": [1, 2]}));
    /// ```
    pub fn from_json(json: &serde_json::Value) -> Result<Tree> {
        let mut tree = match json {
            serde_json::Value::Object(_) => Tree::object(),
            serde_json::Value::Array(_) => Tree::array(),
            other => return Err(JtreeError::UnsupportedRoot(json_type_name(other))),
        };
        let root = tree.root_id();
        fill(&mut tree, root, json);
        Ok(tree)
    }
}

/// Add the members or elements of `json` to the container `id`.
fn fill(tree: &mut Tree, id: NodeId, json: &serde_json::Value) {
    match json {
        serde_json::Value::Object(map) => {
            for (name, member) in map {
                let child = create(tree, member);
                tree.set_named_value(id, name.as_str(), child);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                let child = create(tree, item);
                tree.add_value(id, child);
            }
        }
        _ => {}
    }
}

fn create(tree: &mut Tree, json: &serde_json::Value) -> NodeId {
    match json {
        serde_json::Value::Null => tree.create_null(),
        serde_json::Value::Bool(b) => tree.create_bool(*b),
        serde_json::Value::Number(n) => tree.create_number(n.as_f64().unwrap_or(0.0)),
        serde_json::Value::String(s) => tree.create_string(s.as_str()),
        serde_json::Value::Object(_) => {
            let id = tree.create_object();
            fill(tree, id, json);
            id
        }
        serde_json::Value::Array(_) => {
            let id = tree.create_array();
            fill(tree, id, json);
            id
        }
    }
}

fn json_type_name(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(true) => "true",
        serde_json::Value::Bool(false) => "false",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Object(_) => "object",
        serde_json::Value::Array(_) => "array",
    }
}

impl Value<'_> {
    /// Convert this subtree to a serde_json value. Integral numbers within the
    /// exactly representable range become JSON integers; NaN and infinities
    /// become `null`.
    pub fn to_json(self) -> serde_json::Value {
        match self.value_type() {
            ValueType::String => serde_json::Value::String(self.expect_str().to_string()),
            ValueType::Number => number_to_json(self.as_number().unwrap_or(0.0)),
            ValueType::True => serde_json::Value::Bool(true),
            ValueType::False => serde_json::Value::Bool(false),
            ValueType::Null => serde_json::Value::Null,
            ValueType::Object => {
                let mut map = Map::new();
                for (name, member) in self.expect_object().iter() {
                    map.insert(name.to_string(), member.to_json());
                }
                serde_json::Value::Object(map)
            }
            ValueType::Array => {
                serde_json::Value::Array(self.expect_array().iter().map(Value::to_json).collect())
            }
        }
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return serde_json::Value::Number(Number::from(n as i64));
    }
    Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}
