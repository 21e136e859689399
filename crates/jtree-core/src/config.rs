//! Driver configuration shared by the parser, printer and matcher.

use serde::{Deserialize, Serialize};

/// Default limit on object/array nesting accepted by the parser.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Toggles that shape parsing, printing and matching.
///
/// All flags default to `false`. A `Config` is plain data: build one, hand it to
/// a [`crate::Document`], and it stays fixed for the lifetime of that driver.
///
/// ```
/// use jtree_core::Config;
///
/// let config = Config { print_flat: true, quiet: true, ..Config::default() };
/// assert!(!config.strict);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reject trailing text after the root value and print `true`/`false`/`null`
    /// as bare literals.
    pub strict: bool,
    /// Accept `'single quoted'` strings and keys.
    pub allow_single_quote: bool,
    /// Trace every parse construct and match step at debug level.
    pub debug: bool,
    /// Suppress failure diagnostics.
    pub quiet: bool,
    /// Drop brackets and commas, separating siblings with a single space.
    pub print_flat: bool,
    /// Drop brackets and object keys, separate siblings with commas and CSV-quote strings.
    pub print_csv: bool,
    /// HTML-escape all emitted key and string text.
    pub print_html: bool,
    /// Print bare scalar payloads (no quotes around strings).
    pub print_short: bool,
    /// Print strings that look like numbers as numbers.
    pub string_to_real: bool,
    /// Maximum object/array nesting depth accepted by the parser.
    pub max_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strict: false,
            allow_single_quote: false,
            debug: false,
            quiet: false,
            print_flat: false,
            print_csv: false,
            print_html: false,
            print_short: false,
            string_to_real: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
