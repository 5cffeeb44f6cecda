//! # membertext
//!
//! A reflection-free encoder that turns structured records into a
//! deterministic, human-readable, line-oriented text format.
//!
//! ## How it works
//!
//! Encoding happens in three stages:
//!
//! 1. **Schema extraction**: a record type reports its ordered member
//!    descriptors (name, kind, inclusion) through the [`Record`] trait.
//! 2. **Walking**: a live instance is resolved against its schema into an
//!    intermediate tree of [`Node`]s. Any error aborts here, before output.
//! 3. **Emission**: the tree is rendered depth-first, with the members of
//!    every record grouped in the fixed bucket order
//!    `Boolean, Integer, Float, Text, Array, Complex`.
//!
//! ## Quick Start
//!
//! ```rust
//! use membertext::{record, to_string};
//!
//! record! {
//!     struct Entry {
//!         label: String,
//!         ratio: f64,
//!         id: i64,
//!         active: bool,
//!     }
//! }
//!
//! let entry = Entry {
//!     label: "demo".to_string(),
//!     ratio: 3.5,
//!     id: 50004,
//!     active: true,
//! };
//!
//! assert_eq!(
//!     to_string(&entry).unwrap(),
//!     "active : true\nid : 50004\nratio : 3.500000\nlabel : \"demo\"\n"
//! );
//! ```
//!
//! ### Nested records, arrays and markers
//!
//! ```rust
//! use membertext::{enumeration, record, to_string};
//!
//! enumeration! {
//!     enum FileKind {
//!         Text,
//!         Image,
//!     }
//! }
//!
//! record! {
//!     struct Address {
//!         city: String,
//!     }
//! }
//!
//! record! {
//!     struct Contact {
//!         @[rename("FOO")] id: u32,
//!         @[ignore] cache: String,
//!         kind: FileKind,
//!         tags: Vec<String>,
//!         addr: Address,
//!     }
//! }
//!
//! let contact = Contact {
//!     id: 7,
//!     cache: "never emitted".to_string(),
//!     kind: FileKind::Image,
//!     tags: vec![],
//!     addr: Address { city: "X".to_string() },
//! };
//!
//! assert_eq!(
//!     to_string(&contact).unwrap(),
//!     "FOO : 7\nkind : \"Image\"\ntags : [\n]\naddr : {\ncity : \"X\"\n}\n"
//! );
//! ```
//!
//! ## Format
//!
//! See the [`ser`] module for the grammar. Decoding is not supported:
//! [`deserialize`] always fails with [`Error::Unimplemented`].
//!
//! ## Logging
//!
//! The crate logs through the [`log`] facade and never installs a logger.
//! Skipped members are reported at `trace`, per-call summaries at `debug`,
//! and suspicious schemas (such as two members emitted under one name) at
//! `warn`.
//!
//! ## Examples
//!
//! See the `demos/` directory:
//!
//! - **`simple.rs`** - Encoding a flat record
//! - **`devices.rs`** - A device / storage / directory / file hierarchy
//! - **`custom_options.rs`** - Indentation, version gating and containers
//!
//! Run any example with: `cargo run --example <name>`

pub mod bucket;
pub mod codec;
pub mod de;
pub mod encode;
pub mod error;
pub mod macros;
pub mod options;
pub mod schema;
pub mod ser;
pub mod value;
pub mod walk;

pub use bucket::{Bucket, ComplexNode};
pub use de::deserialize;
pub use encode::{Encode, MemberRef, Record, TypeClass, View};
pub use error::{Error, Result};
pub use options::{ContainerPolicy, EncoderOptions};
pub use schema::{
    Access, Container, Exclusion, Kind, MemberDescriptor, MemberDraft, Schema, SchemaBuilder,
    VersionRange,
};
pub use ser::Serializer;
pub use value::{Integer, Node, Scalar};
pub use walk::Walker;

use log::debug;
use std::io;

/// Encode a record to UTF-8 bytes.
///
/// # Examples
///
/// ```rust
/// use membertext::{record, serialize};
///
/// record! {
///     struct Point { x: i32, y: i32 }
/// }
///
/// let bytes = serialize(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(bytes, b"x : 1\ny : 2\n");
/// ```
///
/// # Errors
///
/// Returns `NullReference`, `MemberAccess` or `TypeUnsupported` if any member
/// of the object graph cannot be encoded. No output is produced in that case.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize<T: Record>(value: &T) -> Result<Vec<u8>> {
    serialize_with_options(value, EncoderOptions::default())
}

/// Encode a record to UTF-8 bytes with custom options.
///
/// # Errors
///
/// Returns an error if any member of the object graph cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn serialize_with_options<T: Record>(value: &T, options: EncoderOptions) -> Result<Vec<u8>> {
    let text = to_string_with_options(value, options)?;
    Ok(codec::text_to_bytes(&text))
}

/// Encode a record to a string.
///
/// # Errors
///
/// Returns an error if any member of the object graph cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T: Record>(value: &T) -> Result<String> {
    to_string_with_options(value, EncoderOptions::default())
}

/// Encode a record to a string indented by two spaces per nesting level.
///
/// Indentation is cosmetic: stripping leading whitespace from every line
/// yields the output of [`to_string`].
///
/// # Examples
///
/// ```rust
/// use membertext::{record, to_string_pretty};
///
/// record! {
///     struct Line { points: Vec<i32> }
/// }
///
/// let text = to_string_pretty(&Line { points: vec![4] }).unwrap();
/// assert_eq!(text, "points : [\n  0 : 4\n]\n");
/// ```
///
/// # Errors
///
/// Returns an error if any member of the object graph cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty<T: Record>(value: &T) -> Result<String> {
    to_string_with_options(value, EncoderOptions::pretty())
}

/// Encode a record to a string with custom options.
///
/// # Examples
///
/// ```rust
/// use membertext::{record, to_string_with_options, EncoderOptions};
///
/// record! {
///     struct Config {
///         @[version_range(1, 1)] legacy: bool,
///         port: u16,
///     }
/// }
///
/// let config = Config { legacy: true, port: 80 };
/// let options = EncoderOptions::new().with_version(2);
/// assert_eq!(to_string_with_options(&config, options).unwrap(), "port : 80\n");
/// ```
///
/// # Errors
///
/// Returns an error if any member of the object graph cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T: Record>(value: &T, options: EncoderOptions) -> Result<String> {
    let tree = to_tree_with_options(value, &options)?;
    let mut serializer = Serializer::new(options);
    serializer.serialize_members(&tree);
    let output = serializer.into_inner();
    debug!(
        "encoded `{}` ({} members) into {} bytes",
        value.record_name(),
        tree.len(),
        output.len()
    );
    Ok(output)
}

/// Encode a record into a writer.
///
/// The writer only receives data once the whole record has been encoded.
///
/// # Examples
///
/// ```rust
/// use membertext::{record, to_writer};
///
/// record! {
///     struct Point { x: i32 }
/// }
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Point { x: 1 }).unwrap();
/// assert_eq!(buffer, b"x : 1\n");
/// ```
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: Record,
{
    to_writer_with_options(writer, value, EncoderOptions::default())
}

/// Encode a record into a writer with custom options.
///
/// # Errors
///
/// Returns an error if encoding fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: EncoderOptions) -> Result<()>
where
    W: io::Write,
    T: Record,
{
    let text = to_string_with_options(value, options)?;
    writer
        .write_all(text.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}

/// Build the intermediate tree of a record without emitting it.
///
/// # Examples
///
/// ```rust
/// use membertext::{record, to_tree, Scalar};
///
/// record! {
///     struct Point { x: i32, label: String }
/// }
///
/// let tree = to_tree(&Point { x: 1, label: "p".into() }).unwrap();
/// assert_eq!(tree.get("x").and_then(|n| n.as_scalar()), Some(&Scalar::from(1)));
/// ```
///
/// # Errors
///
/// Returns an error if any member of the object graph cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_tree<T: Record>(value: &T) -> Result<ComplexNode> {
    to_tree_with_options(value, &EncoderOptions::default())
}

/// Build the intermediate tree of a record with custom options.
///
/// # Errors
///
/// Returns an error if any member of the object graph cannot be encoded.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_tree_with_options<T: Record>(value: &T, options: &EncoderOptions) -> Result<ComplexNode> {
    let schema = schema::extract::<T>();
    Walker::new(options).walk(value, &schema)
}

/// Extract the member descriptors of a record type.
///
/// # Examples
///
/// ```rust
/// use membertext::{record, schema_of, Kind};
///
/// record! {
///     struct Point {
///         @[rename("X")] x: i32,
///         @[ignore] y: i32,
///     }
/// }
///
/// let schema = schema_of::<Point>();
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.included().count(), 1);
/// assert_eq!(schema.get("x").unwrap().kind, Kind::Integer);
/// ```
#[must_use]
pub fn schema_of<T: Record>() -> Schema {
    schema::extract::<T>()
}
