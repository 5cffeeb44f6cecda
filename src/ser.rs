//! Text emission.
//!
//! This module provides the [`Serializer`] that renders the intermediate tree
//! into the line-oriented text format.
//!
//! ## Grammar
//!
//! ```text
//! scalar   <name> : <literal>\n
//! text     <name> : "<escaped value>"\n
//! array    <name> : [\n <element>* ]\n
//! complex  <name> : {\n <member>* }\n
//! ```
//!
//! - Booleans are `true`/`false`, integers plain decimal digits.
//! - Floats are fixed-point with [`FLOAT_PRECISION`] fractional digits, never
//!   scientific notation.
//! - Text and enumeration values are double-quoted; `"`, `\` and control
//!   characters are backslash-escaped.
//! - Array elements are named by their zero-based index.
//! - Members of a complex node are emitted in bucket order.
//!
//! Nesting is carried by the structural tokens alone. Indentation is
//! cosmetic and off by default.
//!
//! ## Direct Serializer Usage
//!
//! ```rust
//! use membertext::{ComplexNode, EncoderOptions, Node, Scalar, Serializer};
//!
//! let mut members = ComplexNode::new();
//! members.push(Node::scalar("ratio", Scalar::Float(3.5)));
//! members.push(Node::scalar("active", Scalar::Boolean(true)));
//!
//! let mut serializer = Serializer::new(EncoderOptions::new());
//! serializer.serialize_members(&members);
//! assert_eq!(serializer.into_inner(), "active : true\nratio : 3.500000\n");
//! ```

use crate::bucket::ComplexNode;
use crate::value::{Node, Scalar};
use crate::EncoderOptions;

/// Number of fractional digits written for floats.
pub const FLOAT_PRECISION: usize = 6;

/// The text emitter.
///
/// Emission cannot fail: every fallible step happens while the tree is built.
pub struct Serializer {
    output: String,
    options: EncoderOptions,
    indent_level: usize,
}

impl Serializer {
    pub fn new(options: EncoderOptions) -> Self {
        Serializer {
            output: String::with_capacity(256),
            options,
            indent_level: 0,
        }
    }

    pub fn into_inner(self) -> String {
        self.output
    }

    /// Writes the members of a record without a surrounding header.
    ///
    /// This is how the root record is emitted.
    pub fn serialize_members(&mut self, members: &ComplexNode) {
        for node in members.iter() {
            self.serialize_node(node);
        }
    }

    /// Writes one node and, recursively, its children.
    pub fn serialize_node(&mut self, node: &Node) {
        match node {
            Node::Scalar { name, value } => {
                self.write_key(name);
                self.write_scalar(value);
                self.output.push('\n');
            }
            Node::Array { name, elements } => {
                self.write_key(name);
                self.output.push_str("[\n");
                self.indent_level += 1;
                for element in elements {
                    self.serialize_node(element);
                }
                self.indent_level -= 1;
                self.write_indent();
                self.output.push_str("]\n");
            }
            Node::Complex { name, members } => {
                self.write_key(name);
                self.output.push_str("{\n");
                self.indent_level += 1;
                self.serialize_members(members);
                self.indent_level -= 1;
                self.write_indent();
                self.output.push_str("}\n");
            }
        }
    }

    fn write_indent(&mut self) {
        if self.options.indent > 0 {
            self.output
                .push_str(&" ".repeat(self.indent_level * self.options.indent));
        }
    }

    /// Names that are not plain words (map keys under container expansion)
    /// are quoted and escaped like text, so a key never spans lines.
    fn write_key(&mut self, name: &str) {
        self.write_indent();
        if is_plain_name(name) {
            self.output.push_str(name);
        } else {
            self.write_string(name);
        }
        self.output.push_str(" : ");
    }

    fn write_scalar(&mut self, value: &Scalar) {
        match value {
            Scalar::Boolean(b) => self.output.push_str(if *b { "true" } else { "false" }),
            Scalar::Integer(i) => self.output.push_str(&i.to_string()),
            Scalar::Float(f) => self
                .output
                .push_str(&format!("{:.*}", FLOAT_PRECISION, f)),
            Scalar::Text(s) | Scalar::Enumeration(s) => self.write_string(s),
        }
    }

    #[inline]
    fn write_string(&mut self, s: &str) {
        self.output.push('"');
        for ch in s.chars() {
            match ch {
                '"' => self.output.push_str("\\\""),
                '\\' => self.output.push_str("\\\\"),
                '\n' => self.output.push_str("\\n"),
                '\r' => self.output.push_str("\\r"),
                '\t' => self.output.push_str("\\t"),
                '\u{0008}' => self.output.push_str("\\b"), // backspace
                '\u{000C}' => self.output.push_str("\\f"), // form feed
                '\0' => self.output.push_str("\\0"),
                _ => self.output.push(ch),
            }
        }
        self.output.push('"');
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|ch| ch.is_alphanumeric() || matches!(ch, '_' | '-' | '.'))
}
