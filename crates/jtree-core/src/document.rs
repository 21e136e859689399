//! Document driver: one [`Config`] shared by parse, print and match calls.

use crate::config::Config;
use crate::error::Result;
use crate::matcher::{Matched, Matcher};
use crate::parser::parse_with;
use crate::path::Path;
use crate::printer::Printer;
use crate::value::{Tree, Value};
use tracing::warn;

/// Holds the configuration a caller sets up once before parsing, printing and
/// matching.
///
/// ```
/// use jtree_core::{Config, Document};
///
/// let doc = Document::new(Config {
///     print_flat: true,
///     ..Config::default()
/// });
/// let tree = doc.parse(r#"{"a":[1,2]}"#).unwrap();
/// assert_eq!(doc.print(tree.root()), r#""a":1 2"#);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Document {
    config: Config,
}

impl Document {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// Parse `text` into a tree, logging the failure unless quiet.
    pub fn parse(&self, text: &str) -> Result<Tree> {
        parse_with(text, &self.config).inspect_err(|err| {
            if !self.config.quiet {
                warn!("{err}");
            }
        })
    }

    pub fn print(&self, value: Value<'_>) -> String {
        self.printer().print(value)
    }

    pub fn print_matched(&self, matched: &Matched<'_>) -> String {
        self.printer().print_matched(matched)
    }

    pub fn match_values<'a>(&self, value: Value<'a>, expr: &str) -> Result<Vec<Matched<'a>>> {
        self.matcher().match_values(value, expr)
    }

    pub fn match_path<'a>(&self, value: Value<'a>, path: &Path) -> Result<Vec<Matched<'a>>> {
        self.matcher().match_path(value, path)
    }

    pub fn printer(&self) -> Printer<'_> {
        Printer::new(&self.config)
    }

    pub fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.config)
    }
}
