//! Package report: name/value rows grouped by the package node they sit under.
//!
//! A "package" is an object carrying the children field and a string key
//! field. Objects carrying both the key field (a string) and the value field
//! (a string or number) are rows; each row belongs to its nearest enclosing
//! package, found through parent back-references. Given
//!
//! ```json
//! {"name":"flare","children":[
//!   {"name":"analytics","children":[{"name":"Agg","size":721}]},
//!   {"name":"Merge","size":8}]}
//! ```
//!
//! the rows are `(analytics, Agg, 721)` and `(flare, Merge, 8)`. With
//! [`ReportOptions::hierarchical`] the first package becomes `flare/analytics`.

use crate::printer::format_number;
use crate::value::{ObjectRef, Value};
use crate::walk;
use std::collections::BTreeMap;

/// Field names and naming mode for [`package_report`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub children: String,
    pub key: String,
    pub value: String,
    /// Prefix package names with every ancestor package key, joined by `/`.
    pub hierarchical: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            children: "children".to_string(),
            key: "name".to_string(),
            value: "size".to_string(),
            hierarchical: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportRow {
    /// Empty when the row has no enclosing package.
    pub package: String,
    pub name: String,
    pub value: String,
}

/// Build the report for the tree rooted at `root`. Rows come out grouped by
/// package in sorted package order, each group in visit order.
///
/// Objects that are neither packages nor rows are not descended into.
pub fn package_report(root: Value<'_>, options: &ReportOptions) -> Vec<ReportRow> {
    let mut grouped: BTreeMap<String, Vec<(String, String)>> = BTreeMap::new();

    walk::visit(root, |_, value, _| {
        let Some(obj) = value.as_object() else {
            return true;
        };
        if obj.has_name(&options.children) {
            return true;
        }
        if let Some((name, text)) = row_of(obj, options) {
            grouped
                .entry(package_of(value, options))
                .or_default()
                .push((name, text));
        }
        false
    });

    grouped
        .into_iter()
        .flat_map(|(package, rows)| {
            rows.into_iter().map(move |(name, value)| ReportRow {
                package: package.clone(),
                name,
                value,
            })
        })
        .collect()
}

fn row_of(obj: ObjectRef<'_>, options: &ReportOptions) -> Option<(String, String)> {
    let name = obj.get(&options.key)?.as_str()?;
    let value = obj.get(&options.value)?;
    let text = match (value.as_number(), value.as_str()) {
        (Some(n), _) => format_number(n),
        (_, Some(s)) => s.to_string(),
        _ => return None,
    };
    Some((name.to_string(), text))
}

/// Key of the nearest enclosing package, or of every enclosing package
/// outermost first when hierarchical.
fn package_of(row: Value<'_>, options: &ReportOptions) -> String {
    let mut parts = Vec::new();
    let mut ancestor = row.parent();
    while let Some(value) = ancestor {
        if let Some(key) = package_key(value, options) {
            parts.push(key);
            if !options.hierarchical {
                break;
            }
        }
        ancestor = value.parent();
    }
    parts.reverse();
    parts.join("/")
}

fn package_key<'a>(value: Value<'a>, options: &ReportOptions) -> Option<&'a str> {
    let obj = value.as_object()?;
    if !obj.has_name(&options.children) {
        return None;
    }
    obj.get(&options.key)?.as_str()
}
