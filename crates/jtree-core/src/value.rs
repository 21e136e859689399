//! Value model: an arena-backed JSON tree with parent back-references.
//!
//! Every node lives in a [`Tree`] and is addressed by a [`NodeId`]. The tree
//! exclusively owns its nodes, so dropping the tree drops every value at once.
//! Containers only ever grow at the end; nothing is detached or re-parented.
//!
//! Reading goes through [`Value`], a copyable borrowed view of one node, and the
//! container views [`ObjectRef`] and [`ArrayRef`]. Callers branch on
//! [`Value::value_type`] or the `as_*` accessors; the `expect_*` accessors are
//! checked casts for code that has already established the variant and panic on
//! mismatch.
//!
//! ```
//! use jtree_core::{Tree, ValueType};
//!
//! let mut tree = Tree::object();
//! let root = tree.root_id();
//! let name = tree.create_string("Alice");
//! tree.set_named_value(root, "name", name);
//!
//! let obj = tree.root().expect_object();
//! assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! assert_eq!(obj.get("name").unwrap().parent().unwrap().value_type(), ValueType::Object);
//! ```

use indexmap::IndexMap;
use std::fmt;

/// Handle of a node inside a [`Tree`]. Only meaningful for the tree that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its tree's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

const ROOT: NodeId = NodeId(0);

/// The seven variants a value can take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Number,
    True,
    False,
    Null,
    Object,
    Array,
}

impl ValueType {
    /// Human-readable name, as reported by `?type`.
    pub fn name(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Number => "number",
            ValueType::True => "true",
            ValueType::False => "false",
            ValueType::Null => "null",
            ValueType::Object => "object",
            ValueType::Array => "array",
        }
    }

    pub fn is_composite(self) -> bool {
        matches!(self, ValueType::Object | ValueType::Array)
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone)]
enum Payload {
    String(String),
    Number(f64),
    True,
    False,
    Null,
    /// Members in first-insertion order, indexed by name.
    Object(IndexMap<String, NodeId>),
    Array(Vec<NodeId>),
}

impl Payload {
    fn value_type(&self) -> ValueType {
        match self {
            Payload::String(_) => ValueType::String,
            Payload::Number(_) => ValueType::Number,
            Payload::True => ValueType::True,
            Payload::False => ValueType::False,
            Payload::Null => ValueType::Null,
            Payload::Object(_) => ValueType::Object,
            Payload::Array(_) => ValueType::Array,
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    payload: Payload,
}

/// Owner of a JSON value tree. The root is always an object or an array.
#[derive(Debug, Clone)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// A tree whose root is an empty object.
    pub fn object() -> Self {
        let mut tree = Tree::empty();
        tree.create_object();
        tree
    }

    /// A tree whose root is an empty array.
    pub fn array() -> Self {
        let mut tree = Tree::empty();
        tree.create_array();
        tree
    }

    /// Arena with no root yet. The first node created becomes the root.
    pub(crate) fn empty() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn root_id(&self) -> NodeId {
        ROOT
    }

    pub fn root(&self) -> Value<'_> {
        self.value(ROOT)
    }

    /// View of the node `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this tree.
    pub fn value(&self, id: NodeId) -> Value<'_> {
        assert!(id.0 < self.nodes.len(), "node {} is not part of this tree", id.0);
        Value { tree: self, id }
    }

    /// Number of nodes in the arena, including values replaced by re-insertion.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn push(&mut self, payload: Payload) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: None,
            payload,
        });
        id
    }

    pub fn create_string(&mut self, s: impl Into<String>) -> NodeId {
        self.push(Payload::String(s.into()))
    }

    pub fn create_number(&mut self, n: f64) -> NodeId {
        self.push(Payload::Number(n))
    }

    pub fn create_true(&mut self) -> NodeId {
        self.push(Payload::True)
    }

    pub fn create_false(&mut self) -> NodeId {
        self.push(Payload::False)
    }

    pub fn create_bool(&mut self, b: bool) -> NodeId {
        if b {
            self.create_true()
        } else {
            self.create_false()
        }
    }

    pub fn create_null(&mut self) -> NodeId {
        self.push(Payload::Null)
    }

    pub fn create_object(&mut self) -> NodeId {
        self.push(Payload::Object(IndexMap::new()))
    }

    pub fn create_array(&mut self) -> NodeId {
        self.push(Payload::Array(Vec::new()))
    }

    /// Insert `value` into `object` under `name`.
    ///
    /// A name that is already present keeps its first-insertion position and has
    /// its value replaced. The replaced node stays in the arena, unreachable.
    ///
    /// # Panics
    ///
    /// Panics if `object` is not an object, if `value` already has a parent, or
    /// if attaching `value` would create a cycle.
    pub fn set_named_value(&mut self, object: NodeId, name: impl Into<String>, value: NodeId) {
        self.attach(object, value);
        match &mut self.nodes[object.0].payload {
            Payload::Object(members) => {
                members.insert(name.into(), value);
            }
            other => panic!("expected object, found {}", other.value_type()),
        }
    }

    /// Append `value` to `array`.
    ///
    /// # Panics
    ///
    /// Panics if `array` is not an array, if `value` already has a parent, or
    /// if attaching `value` would create a cycle.
    pub fn add_value(&mut self, array: NodeId, value: NodeId) {
        self.attach(array, value);
        match &mut self.nodes[array.0].payload {
            Payload::Array(items) => items.push(value),
            other => panic!("expected array, found {}", other.value_type()),
        }
    }

    /// Record `container` as the parent of `child`. A parent is set exactly once.
    fn attach(&mut self, container: NodeId, child: NodeId) {
        assert!(
            self.nodes[child.0].parent.is_none() && child != ROOT,
            "node {} is already attached",
            child.0
        );
        let mut cursor = Some(container);
        while let Some(id) = cursor {
            assert!(id != child, "attaching node {} would create a cycle", child.0);
            cursor = self.nodes[id.0].parent;
        }
        self.nodes[child.0].parent = Some(container);
    }
}

/// Borrowed view of one node in a [`Tree`].
#[derive(Clone, Copy)]
pub struct Value<'a> {
    tree: &'a Tree,
    id: NodeId,
}

impl<'a> Value<'a> {
    pub fn id(self) -> NodeId {
        self.id
    }

    pub fn tree(self) -> &'a Tree {
        self.tree
    }

    fn node(self) -> &'a Node {
        &self.tree.nodes[self.id.0]
    }

    fn at(self, id: NodeId) -> Value<'a> {
        Value {
            tree: self.tree,
            id,
        }
    }

    pub fn value_type(self) -> ValueType {
        self.node().payload.value_type()
    }

    pub fn type_name(self) -> &'static str {
        self.value_type().name()
    }

    pub fn is_string(self) -> bool {
        self.value_type() == ValueType::String
    }

    pub fn is_number(self) -> bool {
        self.value_type() == ValueType::Number
    }

    pub fn is_true(self) -> bool {
        self.value_type() == ValueType::True
    }

    pub fn is_false(self) -> bool {
        self.value_type() == ValueType::False
    }

    pub fn is_null(self) -> bool {
        self.value_type() == ValueType::Null
    }

    pub fn is_object(self) -> bool {
        self.value_type() == ValueType::Object
    }

    pub fn is_array(self) -> bool {
        self.value_type() == ValueType::Array
    }

    pub fn is_composite(self) -> bool {
        self.value_type().is_composite()
    }

    /// The enclosing object or array, `None` for the root and for detached nodes.
    pub fn parent(self) -> Option<Value<'a>> {
        self.node().parent.map(|id| self.at(id))
    }

    pub fn as_str(self) -> Option<&'a str> {
        match &self.node().payload {
            Payload::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(self) -> Option<f64> {
        match self.node().payload {
            Payload::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_bool(self) -> Option<bool> {
        match self.node().payload {
            Payload::True => Some(true),
            Payload::False => Some(false),
            _ => None,
        }
    }

    pub fn as_object(self) -> Option<ObjectRef<'a>> {
        match &self.node().payload {
            Payload::Object(members) => Some(ObjectRef {
                value: self,
                members,
            }),
            _ => None,
        }
    }

    pub fn as_array(self) -> Option<ArrayRef<'a>> {
        match &self.node().payload {
            Payload::Array(items) => Some(ArrayRef { value: self, items }),
            _ => None,
        }
    }

    /// Checked cast to an object.
    ///
    /// # Panics
    ///
    /// Panics if the value is not an object.
    pub fn expect_object(self) -> ObjectRef<'a> {
        match self.as_object() {
            Some(obj) => obj,
            None => panic!("expected object, found {}", self.type_name()),
        }
    }

    /// Checked cast to an array.
    ///
    /// # Panics
    ///
    /// Panics if the value is not an array.
    pub fn expect_array(self) -> ArrayRef<'a> {
        match self.as_array() {
            Some(arr) => arr,
            None => panic!("expected array, found {}", self.type_name()),
        }
    }

    /// Checked cast to a string payload.
    ///
    /// # Panics
    ///
    /// Panics if the value is not a string.
    pub fn expect_str(self) -> &'a str {
        match self.as_str() {
            Some(s) => s,
            None => panic!("expected string, found {}", self.type_name()),
        }
    }

    /// Numeric view of the value: numbers as-is, strings when their whole text
    /// parses as a float, everything else `None`.
    pub fn to_real(self) -> Option<f64> {
        match &self.node().payload {
            Payload::Number(n) => Some(*n),
            Payload::String(s) => string_to_real(s),
            _ => None,
        }
    }

    /// Member count for objects and arrays, zero for scalars.
    pub fn num_values(self) -> usize {
        match &self.node().payload {
            Payload::Object(members) => members.len(),
            Payload::Array(items) => items.len(),
            _ => 0,
        }
    }

    /// Name at position `i`; array positions have an empty name.
    pub fn index_key(self, i: usize) -> Option<&'a str> {
        match &self.node().payload {
            Payload::Object(members) => members.get_index(i).map(|(name, _)| name.as_str()),
            Payload::Array(items) if i < items.len() => Some(""),
            _ => None,
        }
    }

    /// Value at position `i` of an object or array.
    pub fn index_value(self, i: usize) -> Option<Value<'a>> {
        match &self.node().payload {
            Payload::Object(members) => members.get_index(i).map(|(_, id)| self.at(*id)),
            Payload::Array(items) => items.get(i).map(|id| self.at(*id)),
            _ => None,
        }
    }

    /// Structural equality: same variants, equal payloads, same member order.
    pub fn deep_eq(self, other: Value<'_>) -> bool {
        match (&self.node().payload, &other.node().payload) {
            (Payload::String(a), Payload::String(b)) => a == b,
            (Payload::Number(a), Payload::Number(b)) => a == b,
            (Payload::True, Payload::True)
            | (Payload::False, Payload::False)
            | (Payload::Null, Payload::Null) => true,
            (Payload::Object(a), Payload::Object(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b.iter()).all(|((ka, va), (kb, vb))| {
                        ka == kb && self.at(*va).deep_eq(other.at(*vb))
                    })
            }
            (Payload::Array(a), Payload::Array(b)) => {
                a.len() == b.len()
                    && a
                        .iter()
                        .zip(b.iter())
                        .all(|(va, vb)| self.at(*va).deep_eq(other.at(*vb)))
            }
            _ => false,
        }
    }
}

impl fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("id", &self.id.0)
            .field("type", &self.value_type())
            .finish()
    }
}

/// Identity comparison: two views are equal when they address the same node of
/// the same tree. Use [`Value::deep_eq`] for structural comparison.
impl PartialEq for Value<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

/// View of an object's members.
#[derive(Clone, Copy)]
pub struct ObjectRef<'a> {
    value: Value<'a>,
    members: &'a IndexMap<String, NodeId>,
}

impl<'a> ObjectRef<'a> {
    pub fn as_value(self) -> Value<'a> {
        self.value
    }

    pub fn len(self) -> usize {
        self.members.len()
    }

    pub fn is_empty(self) -> bool {
        self.members.is_empty()
    }

    pub fn has_name(self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    pub fn get(self, name: &str) -> Option<Value<'a>> {
        self.members.get(name).map(|id| self.value.at(*id))
    }

    /// Member `name` if it exists and has variant `ty`.
    pub fn get_typed(self, name: &str, ty: ValueType) -> Option<Value<'a>> {
        self.get(name).filter(|v| v.value_type() == ty)
    }

    /// Member names in insertion order.
    pub fn names(self) -> impl Iterator<Item = &'a str> {
        self.members.keys().map(String::as_str)
    }

    /// Member values in insertion order.
    pub fn values(self) -> impl Iterator<Item = Value<'a>> {
        let value = self.value;
        self.members.values().map(move |id| value.at(*id))
    }

    pub fn iter(self) -> impl Iterator<Item = (&'a str, Value<'a>)> {
        let value = self.value;
        self.members
            .iter()
            .map(move |(name, id)| (name.as_str(), value.at(*id)))
    }

    pub fn index_key(self, i: usize) -> Option<&'a str> {
        self.members.get_index(i).map(|(name, _)| name.as_str())
    }

    pub fn index_value(self, i: usize) -> Option<Value<'a>> {
        self.members.get_index(i).map(|(_, id)| self.value.at(*id))
    }
}

/// View of an array's elements.
#[derive(Clone, Copy)]
pub struct ArrayRef<'a> {
    value: Value<'a>,
    items: &'a [NodeId],
}

impl<'a> ArrayRef<'a> {
    pub fn as_value(self) -> Value<'a> {
        self.value
    }

    pub fn len(self) -> usize {
        self.items.len()
    }

    pub fn is_empty(self) -> bool {
        self.items.is_empty()
    }

    pub fn get(self, i: usize) -> Option<Value<'a>> {
        self.items.get(i).map(|id| self.value.at(*id))
    }

    /// Element `i` if it exists and has variant `ty`.
    pub fn at_typed(self, i: usize, ty: ValueType) -> Option<Value<'a>> {
        self.get(i).filter(|v| v.value_type() == ty)
    }

    pub fn iter(self) -> impl Iterator<Item = Value<'a>> {
        let value = self.value;
        self.items.iter().map(move |id| value.at(*id))
    }
}

/// Whole-string float coercion used by `to_real` and the real print mode.
pub(crate) fn string_to_real(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
}
