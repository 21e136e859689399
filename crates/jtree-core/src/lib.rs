//! # jtree-core
//!
//! JSON document tree with a compact path-matching query language.
//!
//! Text is parsed into an arena-backed [`Tree`] of typed values with parent
//! back-references. The tree can be printed in several modes (standard, flat,
//! CSV, HTML, short, real-coerced) or queried with path expressions that
//! select, reshape and aggregate values.
//!
//! ## Quick start
//!
//! ```rust
//! use jtree_core::{parse, match_values};
//!
//! let tree = parse(r#"{"items":[{"id":1,"tag":"a"},{"id":2,"tag":"b"}]}"#).unwrap();
//!
//! let ids: Vec<String> = match_values(tree.root(), "items/[]/id")
//!     .unwrap()
//!     .iter()
//!     .map(|m| m.to_string())
//!     .collect();
//! assert_eq!(ids, ["1", "2"]);
//!
//! let sizes = match_values(tree.root(), "items/[?size]").unwrap();
//! assert_eq!(sizes[0].as_number(), Some(2.0));
//! ```
//!
//! ## Path expressions
//!
//! | Step        | Meaning                                                     |
//! |-------------|-------------------------------------------------------------|
//! | `name`      | member of an object                                         |
//! | `?`/`?keys` | array of an object's member names                           |
//! | `?values`   | array of an object's member values                          |
//! | `?type`     | type name of the current value                              |
//! | `[]`        | every array element                                         |
//! | `[n]`       | element `n`                                                 |
//! | `[a,b]`     | elements `a..=b`, clamped to the array length               |
//! | `[?size]`   | array length; the rest of the path is ignored               |
//! | `{a,b}`     | one array gathering the results of `a/...` and `b/...`      |
//! | `#`/`#base` | index of the enclosing bracket element, plus `base`         |
//! | `v...c`     | flatten a `c`-children hierarchy into `v1/v2/...` per leaf  |
//! | `v...c...k` | as above, appending `\tk` values found on each leaf         |
//!
//! ## Modules
//!
//! - [`value`]: `Tree`, `Value` views and the value model
//! - [`parser`]: JSON text → `Tree`
//! - [`printer`]: `Value` → text, in the modes selected by [`Config`]
//! - [`path`]: path expression lexer and step AST
//! - [`matcher`]: path evaluation
//! - [`document`]: driver holding one [`Config`]
//! - [`walk`]: pre-order visiting and typed value collection
//! - [`report`]: package/name/value report over hierarchical data
//! - [`convert`]: `serde_json::Value` interop
//! - [`error`]: error types for parse and match failures

pub mod config;
pub mod convert;
pub mod document;
pub mod error;
mod hierarchy;
pub mod matcher;
pub mod parser;
pub mod path;
pub mod printer;
pub mod report;
pub mod value;
pub mod walk;

pub use config::Config;
pub use document::Document;
pub use error::{ErrorKind, JtreeError, Result};
pub use matcher::{match_values, Matched, Matcher};
pub use parser::{parse, parse_with};
pub use path::{Hierarchy, Introspection, Path, Range, Step};
pub use printer::{format_number, print, Printer};
pub use report::{package_report, ReportOptions, ReportRow};
pub use value::{ArrayRef, NodeId, ObjectRef, Tree, Value, ValueType};
