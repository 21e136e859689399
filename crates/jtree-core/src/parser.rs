//! Recursive-descent parser that converts JSON text into a [`Tree`].
//!
//! The parser keeps a single byte cursor into the input and never backtracks:
//! `skip_space → read_value → {read_string | read_number | read_object |
//! read_array | keyword}`. Parsing is all-or-nothing; on failure the partially
//! built tree is dropped and only the error surfaces.
//!
//! # Grammar restrictions
//!
//! - The root must be an object or an array; bare scalars are rejected.
//! - Trailing commas are rejected (`[1,]`, `{"a":1,}`).
//! - `\uXXXX` escapes are consumed and produce no output.
//! - With [`Config::allow_single_quote`], strings may be delimited by `'`.
//! - With [`Config::strict`], only whitespace may follow the root value.

use crate::config::Config;
use crate::error::{JtreeError, Result};
use crate::value::{NodeId, Tree};
use tracing::debug;

/// Parse `text` with the default configuration.
///
/// ```
/// let tree = jtree_core::parse(r#"{"name":"Alice","scores":[95,87]}"#).unwrap();
/// let root = tree.root().expect_object();
/// assert_eq!(root.get("scores").unwrap().num_values(), 2);
/// ```
pub fn parse(text: &str) -> Result<Tree> {
    parse_with(text, &Config::default())
}

/// Parse `text` using the given configuration.
pub fn parse_with(text: &str, config: &Config) -> Result<Tree> {
    let mut parser = Parser::new(text, config);
    parser.parse_document()?;
    Ok(parser.tree)
}

struct Parser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    depth: usize,
    config: &'a Config,
    tree: Tree,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str, config: &'a Config) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            depth: 0,
            config,
            tree: Tree::empty(),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn skip_space(&mut self) {
        while let Some(b) = self.peek() {
            if b.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn fail(&self, message: impl Into<String>) -> JtreeError {
        let err = JtreeError::parse(self.pos, message);
        if self.config.debug {
            debug!(position = self.pos, "{err}");
        }
        err
    }

    /// Top-level entry: the first non-space character must open an object or array.
    fn parse_document(&mut self) -> Result<()> {
        self.skip_space();
        match self.peek() {
            Some(b'{') => {
                self.read_object()?;
            }
            Some(b'[') => {
                self.read_array()?;
            }
            Some(_) => return Err(self.fail("document root must be an object or array")),
            None => return Err(self.fail("empty document")),
        }
        if self.config.strict {
            self.skip_space();
            if self.pos < self.bytes.len() {
                return Err(self.fail("unexpected text after document root"));
            }
        }
        Ok(())
    }

    /// Dispatch on the current character to the matching reader.
    fn read_value(&mut self) -> Result<NodeId> {
        match self.peek() {
            Some(b'"') => {
                let s = self.read_string()?;
                Ok(self.tree.create_string(s))
            }
            Some(b'\'') if self.config.allow_single_quote => {
                let s = self.read_string()?;
                Ok(self.tree.create_string(s))
            }
            Some(b'-') | Some(b'0'..=b'9') => {
                let n = self.read_number()?;
                Ok(self.tree.create_number(n))
            }
            Some(b'{') => self.read_object(),
            Some(b'[') => self.read_array(),
            Some(_) if self.eat_keyword("true") => Ok(self.tree.create_true()),
            Some(_) if self.eat_keyword("false") => Ok(self.tree.create_false()),
            Some(_) if self.eat_keyword("null") => Ok(self.tree.create_null()),
            Some(_) => Err(self.fail("unexpected character")),
            None => Err(self.fail("unexpected end of input")),
        }
    }

    /// Match an exact keyword at the cursor and advance past it.
    fn eat_keyword(&mut self, keyword: &str) -> bool {
        if self.bytes[self.pos..].starts_with(keyword.as_bytes()) {
            self.pos += keyword.len();
            true
        } else {
            false
        }
    }

    /// Read a quoted string, resolving escapes. The cursor must be on the
    /// opening quote; on success it is left just past the closing quote.
    fn read_string(&mut self) -> Result<String> {
        let quote = match self.peek() {
            Some(q @ b'"') => q,
            Some(q @ b'\'') if self.config.allow_single_quote => q,
            _ => return Err(self.fail("expected string")),
        };
        self.pos += 1;

        let mut out = String::new();
        let mut run_start = self.pos;
        while let Some(b) = self.peek() {
            if b == quote {
                out.push_str(&self.text[run_start..self.pos]);
                self.pos += 1;
                return Ok(out);
            }
            if b != b'\\' {
                self.pos += 1;
                continue;
            }
            out.push_str(&self.text[run_start..self.pos]);
            self.pos += 1;
            let Some(escaped) = self.text[self.pos..].chars().next() else {
                break;
            };
            self.pos += escaped.len_utf8();
            match escaped {
                'b' => out.push('\u{8}'),
                'f' => out.push('\u{c}'),
                'n' => out.push('\n'),
                'r' => out.push('\r'),
                't' => out.push('\t'),
                'u' => self.skip_unicode_escape(),
                // `\\`, `\"`, `\/` and unknown escapes yield the character itself.
                other => out.push(other),
            }
            run_start = self.pos;
        }
        Err(self.fail("unterminated string"))
    }

    /// `\uXXXX` is not decoded: the hex digits are consumed and dropped.
    fn skip_unicode_escape(&mut self) {
        let mut digits = 0;
        while digits < 4 && matches!(self.peek(), Some(b) if b.is_ascii_hexdigit()) {
            self.pos += 1;
            digits += 1;
        }
    }

    /// Read a number: `-? (0 | [1-9][0-9]*) (. [0-9]*)? ([eE] [+-]? [0-9]*)?`.
    fn read_number(&mut self) -> Result<f64> {
        let start = self.pos;
        if self.peek() == Some(b'-') {
            self.pos += 1;
        }
        match self.peek() {
            Some(b'0') => self.pos += 1,
            Some(b'1'..=b'9') => self.skip_digits(),
            _ => return Err(self.fail("expected digit")),
        }
        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.skip_digits();
        }
        let mantissa_end = self.pos;
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            self.pos += 1;
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.pos += 1;
            }
            self.skip_digits();
        }

        let token = &self.text[start..self.pos];
        match token.parse::<f64>() {
            Ok(n) => Ok(n),
            Err(_) => {
                // A dangling exponent such as `1e` converts its mantissa only.
                if self.config.debug {
                    debug!(token, "number conversion incomplete");
                }
                Ok(self.text[start..mantissa_end]
                    .parse::<f64>()
                    .unwrap_or(0.0))
            }
        }
    }

    fn skip_digits(&mut self) {
        while matches!(self.peek(), Some(b) if b.is_ascii_digit()) {
            self.pos += 1;
        }
    }

    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > self.config.max_depth {
            return Err(self.fail(format!(
                "nesting deeper than {} levels",
                self.config.max_depth
            )));
        }
        Ok(())
    }

    /// Read `{ "key" : value , ... }`. An empty object `{}` is accepted.
    fn read_object(&mut self) -> Result<NodeId> {
        if self.peek() != Some(b'{') {
            return Err(self.fail("expected '{'"));
        }
        self.enter()?;
        self.pos += 1;
        let obj = self.tree.create_object();

        self.skip_space();
        if self.peek() == Some(b'}') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(obj);
        }

        loop {
            self.skip_space();
            let name = self.read_string()?;
            self.skip_space();
            if self.peek() != Some(b':') {
                return Err(self.fail("expected ':' after object key"));
            }
            self.pos += 1;
            self.skip_space();
            let value = self.read_value()?;
            self.tree.set_named_value(obj, name, value);
            self.skip_space();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b'}') => {
                    self.pos += 1;
                    self.depth -= 1;
                    return Ok(obj);
                }
                _ => return Err(self.fail("expected ',' or '}' in object")),
            }
        }
    }

    /// Read `[ value , ... ]`. An empty array `[]` is accepted.
    fn read_array(&mut self) -> Result<NodeId> {
        if self.peek() != Some(b'[') {
            return Err(self.fail("expected '['"));
        }
        self.enter()?;
        self.pos += 1;
        let array = self.tree.create_array();

        self.skip_space();
        if self.peek() == Some(b']') {
            self.pos += 1;
            self.depth -= 1;
            return Ok(array);
        }

        loop {
            self.skip_space();
            let value = self.read_value()?;
            self.tree.add_value(array, value);
            self.skip_space();
            match self.peek() {
                Some(b',') => self.pos += 1,
                Some(b']') => {
                    self.pos += 1;
                    self.depth -= 1;
                    return Ok(array);
                }
                _ => return Err(self.fail("expected ',' or ']' in array")),
            }
        }
    }
}
