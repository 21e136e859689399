//! Path expression lexer: turns a match string into typed steps.
//!
//! # Syntax
//!
//! Steps are separated by `/` and applied left to right:
//!
//! - `name`: member `name` of an object
//! - `?` or `?keys`: array of an object's member names
//! - `?values`: array of an object's member values
//! - `?type`: type name of the current value
//! - `[]`: every array element; `[n]`: element `n`; `[a,b]`: elements `a`
//!   through `b` inclusive, clamped to the array length; `[?size]`: the array
//!   length (any steps after it are ignored)
//! - `{p1,p2,...}`: apply each sub-path (followed by the rest of the
//!   expression) to the current value and gather every result into one array
//! - `#` or `#base`: `base` plus the index of the enclosing array element
//! - `value...children`: flatten a self-similar hierarchy into one string per
//!   leaf (see [`Hierarchy`]); `value...children...k1,k2` adds composite keys
//!
//! Braces and brackets nest, so `/` and `,` inside them do not split the outer
//! expression. For example `items/[0,2]/{name,tags/[?size]}` gathers the name
//! and the tag count of the first three items.
//!
//! Range bounds are separated by `,`; `[1:3]` is rejected as an invalid index.

use crate::error::{JtreeError, Result};
use std::fmt;
use std::str::FromStr;

const HIERARCHY_MARKER: &str = "...";

/// A lexed path expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    steps: Vec<Step>,
}

/// One step of a path expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Named member lookup on an object.
    Field(String),
    /// `?keys`, `?values` or `?type`.
    Introspect(Introspection),
    /// Bracketed array selection.
    Range(Range),
    /// Brace group; each branch is itself a path.
    Group(Vec<Path>),
    /// `#base`: emits `base + current index`. Always the last step.
    Index(i64),
    /// `value...children[...keys]`. Always the last step.
    Hierarchy(Hierarchy),
}

/// Object introspection queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Introspection {
    Keys,
    Values,
    Type,
}

/// Contents of a bracket step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Range {
    /// `[?size]`
    Size,
    /// `[a,b]`, inclusive.
    Span { start: i64, end: i64 },
    /// `[n]`
    At(i64),
    /// `[]`
    All,
}

/// Field names driving hierarchy flattening.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    /// Member read from every node on the way down (left of `...`).
    pub value_field: String,
    /// Member holding the array of child nodes (right of `...`).
    pub children_field: String,
    /// Optional composite-key members read from each leaf.
    pub keys: Vec<String>,
}

impl Hierarchy {
    pub fn new(value_field: impl Into<String>, children_field: impl Into<String>) -> Self {
        Self {
            value_field: value_field.into(),
            children_field: children_field.into(),
            keys: Vec::new(),
        }
    }

    pub fn with_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keys = keys.into_iter().map(Into::into).collect();
        self
    }
}

impl Path {
    /// Lex `expr` into steps. An empty expression yields an empty path.
    pub fn parse(expr: &str) -> Result<Path> {
        Lexer { expr }.path(expr)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// True when the last step swallows whatever follows it: `#`, a
    /// hierarchy, or a group with such a branch.
    fn ends_open(&self) -> bool {
        match self.steps.last() {
            Some(Step::Index(_) | Step::Hierarchy(_)) => true,
            Some(Step::Group(branches)) => branches.iter().any(Path::ends_open),
            _ => false,
        }
    }
}

impl FromStr for Path {
    type Err = JtreeError;

    fn from_str(s: &str) -> Result<Self> {
        Path::parse(s)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Field(name) => f.write_str(name),
            Step::Introspect(Introspection::Keys) => f.write_str("?keys"),
            Step::Introspect(Introspection::Values) => f.write_str("?values"),
            Step::Introspect(Introspection::Type) => f.write_str("?type"),
            Step::Range(Range::Size) => f.write_str("[?size]"),
            Step::Range(Range::Span { start, end }) => write!(f, "[{start},{end}]"),
            Step::Range(Range::At(n)) => write!(f, "[{n}]"),
            Step::Range(Range::All) => f.write_str("[]"),
            Step::Group(branches) => write!(f, "{{{} branches}}", branches.len()),
            Step::Index(base) => write!(f, "#{base}"),
            Step::Hierarchy(h) => write!(f, "{}...{}", h.value_field, h.children_field),
        }
    }
}

/// Holds the full expression for error messages while sub-expressions are lexed.
struct Lexer<'e> {
    expr: &'e str,
}

impl Lexer<'_> {
    fn error(&self, message: impl Into<String>) -> JtreeError {
        JtreeError::expression(self.expr, message)
    }

    fn path(&self, text: &str) -> Result<Path> {
        if text.is_empty() {
            return Ok(Path { steps: Vec::new() });
        }

        let mut steps = Vec::new();
        match find_top_level(text, HIERARCHY_MARKER) {
            Some(marker) => {
                let prefix = &text[..marker];
                let suffix = &text[marker + HIERARCHY_MARKER.len()..];
                let (navigation, value_field) = match rfind_top_level(prefix, b'/') {
                    Some(slash) => (&prefix[..slash], &prefix[slash + 1..]),
                    None => ("", prefix),
                };
                if !navigation.is_empty() {
                    steps.extend(self.steps(navigation)?);
                }
                steps.push(Step::Hierarchy(self.hierarchy(value_field, suffix)?));
            }
            None => steps.extend(self.steps(text)?),
        }

        self.validate(&steps)?;
        Ok(Path { steps })
    }

    fn steps(&self, text: &str) -> Result<Vec<Step>> {
        self.split(text, b'/')?
            .into_iter()
            .map(|segment| self.step(segment))
            .collect()
    }

    fn step(&self, segment: &str) -> Result<Step> {
        if segment.is_empty() {
            return Err(self.error("empty step"));
        }
        if let Some(inner) = segment.strip_prefix('[') {
            let inner = inner
                .strip_suffix(']')
                .ok_or_else(|| self.error(format!("unclosed bracket in '{segment}'")))?;
            return Ok(Step::Range(parse_range(inner)?));
        }
        if let Some(inner) = segment.strip_prefix('{') {
            let inner = inner
                .strip_suffix('}')
                .ok_or_else(|| self.error(format!("unclosed brace in '{segment}'")))?;
            let branches = self
                .split(inner, b',')?
                .into_iter()
                .map(|branch| {
                    if branch.is_empty() {
                        Err(self.error("empty group member"))
                    } else {
                        self.path(branch)
                    }
                })
                .collect::<Result<Vec<Path>>>()?;
            return Ok(Step::Group(branches));
        }
        if let Some(base) = segment.strip_prefix('#') {
            if base.is_empty() {
                return Ok(Step::Index(0));
            }
            return base
                .trim()
                .parse::<i64>()
                .map(Step::Index)
                .map_err(|_| self.error(format!("invalid index base '{base}'")));
        }
        if segment.starts_with('?') {
            return match segment {
                "?" | "?keys" => Ok(Step::Introspect(Introspection::Keys)),
                "?values" => Ok(Step::Introspect(Introspection::Values)),
                "?type" => Ok(Step::Introspect(Introspection::Type)),
                other => Err(self.error(format!("unknown query '{other}'"))),
            };
        }
        Ok(Step::Field(segment.to_string()))
    }

    fn hierarchy(&self, value_field: &str, suffix: &str) -> Result<Hierarchy> {
        let (children_field, keys) = match suffix.find(HIERARCHY_MARKER) {
            Some(p) => (&suffix[..p], &suffix[p + HIERARCHY_MARKER.len()..]),
            None => (suffix, ""),
        };
        if children_field.is_empty() {
            return Err(self.error("hierarchy needs a children field after '...'"));
        }
        let keys = keys
            .split(',')
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect();
        Ok(Hierarchy {
            value_field: value_field.to_string(),
            children_field: children_field.to_string(),
            keys,
        })
    }

    /// `#` and hierarchy steps consume the rest of the expression, so they must
    /// come last, including after a group whose branches they end.
    fn validate(&self, steps: &[Step]) -> Result<()> {
        for (i, step) in steps.iter().enumerate() {
            let is_last = i + 1 == steps.len();
            match step {
                Step::Index(_) if !is_last => {
                    return Err(self.error("'#' must be the last step"));
                }
                Step::Group(branches)
                    if !is_last && branches.iter().any(Path::ends_open) =>
                {
                    return Err(self.error(
                        "a group member ending in '#' or a hierarchy cannot be followed by more steps",
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Split on `sep` outside braces and brackets.
    fn split<'t>(&self, text: &'t str, sep: u8) -> Result<Vec<&'t str>> {
        let mut parts = Vec::new();
        let mut depth: usize = 0;
        let mut start = 0;
        for (i, b) in text.bytes().enumerate() {
            match b {
                b'{' | b'[' => depth += 1,
                b'}' | b']' => {
                    depth = depth
                        .checked_sub(1)
                        .ok_or_else(|| self.error(format!("unbalanced '{}'", b as char)))?;
                }
                _ if b == sep && depth == 0 => {
                    parts.push(&text[start..i]);
                    start = i + 1;
                }
                _ => {}
            }
        }
        if depth != 0 {
            return Err(self.error("unclosed brace or bracket"));
        }
        parts.push(&text[start..]);
        Ok(parts)
    }
}

fn parse_range(inner: &str) -> Result<Range> {
    let invalid = || JtreeError::InvalidIndex(inner.to_string());
    if inner == "?size" {
        return Ok(Range::Size);
    }
    if inner.is_empty() {
        return Ok(Range::All);
    }
    if let Some((lhs, rhs)) = inner.split_once(',') {
        let start = lhs.trim().parse::<i64>().map_err(|_| invalid())?;
        let end = rhs.trim().parse::<i64>().map_err(|_| invalid())?;
        return Ok(Range::Span { start, end });
    }
    inner.trim().parse::<i64>().map(Range::At).map_err(|_| invalid())
}

/// Byte offset of the first `needle` outside braces and brackets.
fn find_top_level(text: &str, needle: &str) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut depth: usize = 0;
    for i in 0..bytes.len() {
        match bytes[i] {
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ if depth == 0 && bytes[i..].starts_with(needle.as_bytes()) => return Some(i),
            _ => {}
        }
    }
    None
}

/// Byte offset of the last `sep` outside braces and brackets.
fn rfind_top_level(text: &str, sep: u8) -> Option<usize> {
    let mut depth: usize = 0;
    let mut found = None;
    for (i, b) in text.bytes().enumerate() {
        match b {
            b'{' | b'[' => depth += 1,
            b'}' | b']' => depth = depth.saturating_sub(1),
            _ if b == sep && depth == 0 => found = Some(i),
            _ => {}
        }
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_separators_stay_inside_groups() {
        let path = Path::parse("a/{b/c,d}/[0,2]").unwrap();
        assert_eq!(path.steps().len(), 3);
        match &path.steps()[1] {
            Step::Group(branches) => {
                assert_eq!(branches.len(), 2);
                assert_eq!(branches[0].steps().len(), 2);
            }
            other => panic!("expected group, got {other:?}"),
        }
        assert_eq!(path.steps()[2], Step::Range(Range::Span { start: 0, end: 2 }));
    }

    #[test]
    fn hierarchy_after_navigation() {
        let path = Path::parse("data/name...children...id,size").unwrap();
        assert_eq!(path.steps()[0], Step::Field("data".into()));
        assert_eq!(
            path.steps()[1],
            Step::Hierarchy(Hierarchy::new("name", "children").with_keys(["id", "size"]))
        );
    }

    #[test]
    fn colon_range_is_invalid_index() {
        assert_eq!(
            Path::parse("[1:3]"),
            Err(JtreeError::InvalidIndex("1:3".into()))
        );
    }

    #[test]
    fn index_token_must_be_last() {
        assert!(Path::parse("#/a").is_err());
        assert_eq!(Path::parse("#5").unwrap().steps(), &[Step::Index(5)]);
    }

    #[test]
    fn unbalanced_group_is_rejected() {
        assert!(Path::parse("{a,b").is_err());
        assert!(Path::parse("a]/b").is_err());
        assert!(Path::parse("a//b").is_err());
    }
}
