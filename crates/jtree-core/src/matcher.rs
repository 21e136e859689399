//! Path matcher: evaluates a [`Path`] against a value tree.
//!
//! Matching never mutates the tree. Results borrow tree values where they can
//! ([`Matched::Value`]) and synthesize new values for introspection, sizes,
//! indices, brace groups and hierarchy keys.
//!
//! # Failure policy
//!
//! A structural mismatch on the main path (a field lookup on a non-object, a
//! missing member, a bracket step on a non-array) fails the whole call and no
//! partial results are returned. Inside a fan-out (each element of a bracket
//! step, each branch of a brace group, each child of a hierarchy), a failing
//! sub-match only drops that element's results.
//!
//! Failures are reported at `warn` level unless [`Config::quiet`] is set; with
//! [`Config::debug`] every step is traced at `debug` level.

use crate::config::Config;
use crate::error::{JtreeError, Result};
use crate::hierarchy;
use crate::path::{Introspection, Path, Range, Step};
use crate::printer::Printer;
use crate::value::{Value, ValueType};
use std::fmt;
use tracing::{debug, warn};

/// One result of a match.
#[derive(Debug, Clone, PartialEq)]
pub enum Matched<'a> {
    /// A value inside the matched tree.
    Value(Value<'a>),
    /// A number produced by `[?size]` or `#`.
    Number(f64),
    /// A string produced by `?type`, `?keys` or hierarchy flattening.
    String(String),
    /// An array produced by `?keys`, `?values` or a brace group.
    Array(Vec<Matched<'a>>),
}

impl<'a> Matched<'a> {
    pub fn value_type(&self) -> ValueType {
        match self {
            Matched::Value(v) => v.value_type(),
            Matched::Number(_) => ValueType::Number,
            Matched::String(_) => ValueType::String,
            Matched::Array(_) => ValueType::Array,
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.value_type().name()
    }

    pub fn as_value(&self) -> Option<Value<'a>> {
        match self {
            Matched::Value(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Matched::Value(v) => v.as_str(),
            Matched::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Matched::Value(v) => v.as_number(),
            Matched::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Elements of an array result, tree-backed or synthesized.
    pub fn elements(&self) -> Option<Vec<Matched<'a>>> {
        match self {
            Matched::Value(v) => v
                .as_array()
                .map(|arr| arr.iter().map(Matched::Value).collect()),
            Matched::Array(items) => Some(items.clone()),
            _ => None,
        }
    }
}

impl fmt::Display for Matched<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&Printer::new(&Config::default()).print_matched(self))
    }
}

/// Match `expr` against `value` with the default configuration.
///
/// ```
/// use jtree_core::{parse, match_values};
///
/// let tree = parse(r#"{"a":1,"b":2}"#).unwrap();
/// let results = match_values(tree.root(), "{a,b}").unwrap();
/// assert_eq!(results.len(), 1);
/// assert_eq!(results[0].to_string(), "[1,2]");
/// ```
pub fn match_values<'a>(value: Value<'a>, expr: &str) -> Result<Vec<Matched<'a>>> {
    Matcher::new(&Config::default()).match_values(value, expr)
}

/// Evaluates path expressions under a [`Config`].
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'c> {
    config: &'c Config,
}

impl<'c> Matcher<'c> {
    pub fn new(config: &'c Config) -> Self {
        Self { config }
    }

    /// Lex `expr` and match it against `value`.
    pub fn match_values<'a>(&self, value: Value<'a>, expr: &str) -> Result<Vec<Matched<'a>>> {
        let path = Path::parse(expr).map_err(|err| self.fail(err))?;
        self.match_path(value, &path)
    }

    /// Match an already lexed path against `value`. An empty path matches nothing.
    pub fn match_path<'a>(&self, value: Value<'a>, path: &Path) -> Result<Vec<Matched<'a>>> {
        let mut out = Vec::new();
        if path.is_empty() {
            return Ok(out);
        }
        let steps: Vec<&Step> = path.steps().iter().collect();
        self.eval(Matched::Value(value), 0, &steps, &mut out)?;
        Ok(out)
    }

    /// Report a failure unless quiet, then hand it back for propagation.
    pub(crate) fn fail(&self, err: JtreeError) -> JtreeError {
        if !self.config.quiet {
            warn!("{err}");
        }
        err
    }

    pub(crate) fn trace(&self, message: fmt::Arguments<'_>) {
        if self.config.debug {
            debug!("{message}");
        }
    }

    fn eval<'a>(
        &self,
        current: Matched<'a>,
        index: usize,
        steps: &[&Step],
        out: &mut Vec<Matched<'a>>,
    ) -> Result<()> {
        let Some((step, rest)) = steps.split_first() else {
            out.push(current);
            return Ok(());
        };
        self.trace(format_args!("match step '{step}' at index {index}"));

        match **step {
            Step::Field(ref name) => {
                let next = self.lookup(&current, name)?;
                self.eval(next, index, rest, out)
            }
            Step::Introspect(kind) => {
                let next = self.introspect(&current, kind)?;
                self.eval(next, index, rest, out)
            }
            Step::Range(range) => self.eval_range(&current, range, rest, out),
            Step::Group(ref branches) => self.eval_group(&current, index, branches, rest, out),
            Step::Index(base) => {
                out.push(Matched::Number(base as f64 + index as f64));
                Ok(())
            }
            Step::Hierarchy(ref spec) => hierarchy::flatten(self, &current, spec, out),
        }
    }

    /// Evaluate `steps` into a scratch list; a failure discards only that list.
    fn eval_isolated<'a>(
        &self,
        current: Matched<'a>,
        index: usize,
        steps: &[&Step],
        out: &mut Vec<Matched<'a>>,
    ) {
        let mut found = Vec::new();
        if self.eval(current, index, steps, &mut found).is_ok() {
            out.extend(found);
        }
    }

    fn lookup<'a>(&self, current: &Matched<'a>, name: &str) -> Result<Matched<'a>> {
        let obj = object_of(current).ok_or_else(|| {
            self.fail(JtreeError::NotAnObject {
                type_name: current.type_name(),
            })
        })?;
        obj.get(name)
            .map(Matched::Value)
            .ok_or_else(|| self.fail(JtreeError::MissingField(name.to_string())))
    }

    fn introspect<'a>(&self, current: &Matched<'a>, kind: Introspection) -> Result<Matched<'a>> {
        if kind == Introspection::Type {
            return Ok(Matched::String(current.type_name().to_string()));
        }
        let obj = object_of(current).ok_or_else(|| {
            self.fail(JtreeError::NotAnObject {
                type_name: current.type_name(),
            })
        })?;
        let items = match kind {
            Introspection::Keys => obj
                .names()
                .map(|name| Matched::String(name.to_string()))
                .collect(),
            _ => obj.values().map(Matched::Value).collect(),
        };
        Ok(Matched::Array(items))
    }

    fn eval_range<'a>(
        &self,
        current: &Matched<'a>,
        range: Range,
        rest: &[&Step],
        out: &mut Vec<Matched<'a>>,
    ) -> Result<()> {
        let elements = current.elements().ok_or_else(|| {
            self.fail(JtreeError::NotAnArray {
                type_name: current.type_name(),
            })
        })?;
        let len = elements.len();

        let selected = match range {
            Range::Size => {
                out.push(Matched::Number(len as f64));
                return Ok(());
            }
            Range::All => 0..len,
            Range::At(n) => match usize::try_from(n) {
                Ok(i) if i < len => i..i + 1,
                _ => 0..0,
            },
            Range::Span { start, end } => {
                let start = usize::try_from(start.max(0)).unwrap_or(0);
                let end = usize::try_from(end.saturating_add(1).max(0))
                    .unwrap_or(0)
                    .min(len);
                start.min(end)..end
            }
        };

        for (i, element) in elements.into_iter().enumerate() {
            if !selected.contains(&i) {
                continue;
            }
            if rest.is_empty() {
                out.push(element);
            } else {
                self.eval_isolated(element, i, rest, out);
            }
        }
        Ok(())
    }

    fn eval_group<'a>(
        &self,
        current: &Matched<'a>,
        index: usize,
        branches: &[Path],
        rest: &[&Step],
        out: &mut Vec<Matched<'a>>,
    ) -> Result<()> {
        let mut gathered = Vec::new();
        for branch in branches {
            let steps: Vec<&Step> = branch.steps().iter().chain(rest.iter().copied()).collect();
            self.eval_isolated(current.clone(), index, &steps, &mut gathered);
        }
        out.push(Matched::Array(gathered));
        Ok(())
    }
}

fn object_of<'a>(current: &Matched<'a>) -> Option<crate::value::ObjectRef<'a>> {
    current.as_value().and_then(|v| v.as_object())
}
