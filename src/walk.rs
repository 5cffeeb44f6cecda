//! The value walker: resolves a live record against its schema into the
//! intermediate tree.
//!
//! For every emitted descriptor the walker resolves the member's current
//! value and dispatches on its kind: scalars become leaves, arrays recurse
//! element by element (each element named by its zero-based index), and
//! nested records recurse through their own schema.
//!
//! The walker fails the whole call on the first error. It never produces
//! text itself, so a failure deep inside the graph cannot leak partial output.

use crate::bucket::ComplexNode;
use crate::encode::{Encode, Record, View};
use crate::options::{ContainerPolicy, EncoderOptions};
use crate::schema::{Exclusion, MemberDescriptor, Schema};
use crate::value::{Node, Scalar};
use crate::{Error, Result};
use log::trace;

/// Walks records into [`ComplexNode`]s.
///
/// # Examples
///
/// ```rust
/// use membertext::{record, schema_of, EncoderOptions, Walker};
///
/// record! {
///     struct Point {
///         x: i32,
///         y: i32,
///     }
/// }
///
/// let options = EncoderOptions::new();
/// let point = Point { x: 1, y: 2 };
/// let tree = Walker::new(&options).walk(&point, &schema_of::<Point>()).unwrap();
/// assert_eq!(tree.len(), 2);
/// ```
pub struct Walker<'o> {
    options: &'o EncoderOptions,
    path: Vec<String>,
}

impl<'o> Walker<'o> {
    pub fn new(options: &'o EncoderOptions) -> Self {
        Walker {
            options,
            path: Vec::new(),
        }
    }

    /// Resolves every emitted member of `record` described by `schema`.
    ///
    /// # Errors
    ///
    /// Returns `NullReference` for absent values, `MemberAccess` for members
    /// the record cannot resolve or that resolve to the wrong kind, and
    /// `TypeUnsupported` for generic containers that cannot be skipped.
    pub fn walk(&mut self, record: &dyn Record, schema: &Schema) -> Result<ComplexNode> {
        let mut members = ComplexNode::new();
        for descriptor in schema.members() {
            if !self.is_emitted(schema, descriptor) {
                continue;
            }
            self.path.push(descriptor.emitted_name.clone());
            let node = self.resolve(record, &descriptor.base_path, descriptor)?;
            self.path.pop();
            members.push(node);
        }
        Ok(members)
    }

    fn is_emitted(&self, schema: &Schema, descriptor: &MemberDescriptor) -> bool {
        if let Some(reason) = descriptor.exclusion {
            let expanded = reason == Exclusion::GenericContainer
                && self.options.containers == ContainerPolicy::Expand;
            if !expanded {
                trace!(
                    "skipping `{}.{}`: {:?}",
                    schema.type_name(),
                    descriptor.source_name,
                    reason
                );
                return false;
            }
        }

        if let (Some(target), Some(range)) = (self.options.version, descriptor.version) {
            if !range.contains(target) {
                trace!(
                    "skipping `{}.{}`: versions {}..={} exclude {}",
                    schema.type_name(),
                    descriptor.source_name,
                    range.min,
                    range.max,
                    target
                );
                return false;
            }
        }

        true
    }

    fn resolve(
        &mut self,
        record: &dyn Record,
        base_path: &[String],
        descriptor: &MemberDescriptor,
    ) -> Result<Node> {
        match base_path.split_first() {
            None => {
                let value = record.member(&descriptor.source_name).ok_or_else(|| {
                    Error::member_access(
                        &self.path(),
                        record.record_name(),
                        format!("no member named `{}`", descriptor.source_name),
                    )
                })?;
                self.member(descriptor, &*value)
            }
            Some((base, rest)) => {
                let value = record.member(base).ok_or_else(|| {
                    Error::member_access(
                        &self.path(),
                        record.record_name(),
                        format!("no base member named `{}`", base),
                    )
                })?;
                match value.view()? {
                    View::Record { record: inner, .. } => self.resolve(inner, rest, descriptor),
                    View::Null => Err(Error::null_reference(&self.path())),
                    _ => Err(Error::member_access(
                        &self.path(),
                        record.record_name(),
                        format!("base member `{}` is not a record", base),
                    )),
                }
            }
        }
    }

    fn member(&mut self, descriptor: &MemberDescriptor, value: &dyn Encode) -> Result<Node> {
        let view = value.view()?;
        match view.kind() {
            None => return Err(Error::null_reference(&self.path())),
            Some(kind) if kind != descriptor.kind => {
                return Err(Error::member_access(
                    &self.path(),
                    value.type_name(),
                    format!("declared as {} but resolved to {}", descriptor.kind, kind),
                ));
            }
            Some(_) => {}
        }
        self.node(descriptor.emitted_name.clone(), view, value.type_name())
    }

    fn node(&mut self, name: String, view: View<'_>, type_name: &str) -> Result<Node> {
        match view {
            View::Boolean(b) => Ok(Node::scalar(name, Scalar::Boolean(b))),
            View::Integer(i) => Ok(Node::scalar(name, Scalar::Integer(i))),
            View::Float(f) => Ok(Node::scalar(name, Scalar::Float(f))),
            View::Text(s) => Ok(Node::scalar(name, Scalar::Text(s.into_owned()))),
            View::Enumeration(symbol) => {
                Ok(Node::scalar(name, Scalar::Enumeration(symbol.to_string())))
            }
            View::Array(elements) => self.array(name, elements),
            View::Sequence(elements) => {
                self.check_container(type_name)?;
                self.array(name, elements)
            }
            View::Mapping(entries) => {
                self.check_container(type_name)?;
                let mut members = ComplexNode::new();
                for (key, value) in entries {
                    members.push(self.element(key, value)?);
                }
                Ok(Node::Complex { name, members })
            }
            View::Record { record, schema } => {
                let members = self.walk(record, &schema())?;
                Ok(Node::Complex { name, members })
            }
            View::Null => Err(Error::null_reference(&self.path())),
        }
    }

    fn array(&mut self, name: String, elements: Vec<&dyn Encode>) -> Result<Node> {
        let mut nodes = Vec::with_capacity(elements.len());
        for (index, element) in elements.into_iter().enumerate() {
            nodes.push(self.element(index.to_string(), element)?);
        }
        Ok(Node::Array {
            name,
            elements: nodes,
        })
    }

    fn element(&mut self, name: String, value: &dyn Encode) -> Result<Node> {
        self.path.push(name.clone());
        let node = self.node(name, value.view()?, value.type_name())?;
        self.path.pop();
        Ok(node)
    }

    fn check_container(&self, type_name: &str) -> Result<()> {
        match self.options.containers {
            ContainerPolicy::Expand => Ok(()),
            ContainerPolicy::Skip => Err(Error::type_unsupported(&self.path(), type_name)),
        }
    }

    fn path(&self) -> String {
        self.path.join(".")
    }
}
