//! Configuration options for record encoding.
//!
//! This module provides types to customize the encoder:
//!
//! - [`EncoderOptions`]: Main configuration struct
//! - [`ContainerPolicy`]: What to do with generic container members
//!
//! None of the options change the grammar's structural tokens or the bucket
//! order; they only add cosmetic indentation or widen/narrow the set of
//! members that are emitted.
//!
//! ## Examples
//!
//! ```rust
//! use membertext::{ContainerPolicy, EncoderOptions};
//!
//! // Two-space indentation per nesting level
//! let options = EncoderOptions::pretty();
//! assert_eq!(options.indent, 2);
//!
//! // Only emit members whose version range admits version 3
//! let options = EncoderOptions::new().with_version(3);
//!
//! // Render maps and sets instead of skipping them
//! let options = EncoderOptions::new().with_containers(ContainerPolicy::Expand);
//! ```

/// Handling of members and elements whose type is a generic container
/// (`HashMap`, `BTreeMap`, `IndexMap`, `HashSet`, `BTreeSet`, `IndexSet`,
/// `VecDeque`, `LinkedList`).
///
/// # Examples
///
/// ```rust
/// use membertext::ContainerPolicy;
///
/// assert_eq!(ContainerPolicy::default(), ContainerPolicy::Skip);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ContainerPolicy {
    /// Container members are excluded from the schema; a container reached as
    /// an array element is a `TypeUnsupported` error.
    #[default]
    Skip,
    /// Sequence-like containers render as arrays, map-like containers as
    /// complex nodes keyed by the stringified key.
    Expand,
}

/// Configuration options for record encoding.
///
/// # Examples
///
/// ```rust
/// use membertext::{ContainerPolicy, EncoderOptions};
///
/// let options = EncoderOptions::new()
///     .with_indent(4)
///     .with_version(2)
///     .with_containers(ContainerPolicy::Expand);
/// assert_eq!(options.indent, 4);
/// assert_eq!(options.version, Some(2));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncoderOptions {
    /// Spaces per nesting level. Zero keeps the canonical, unindented form.
    pub indent: usize,
    /// Target version for version-gated emission. `None` emits every member
    /// regardless of its version range.
    pub version: Option<i32>,
    pub containers: ContainerPolicy,
}

impl EncoderOptions {
    /// Creates default options (no indentation, no version gate, containers skipped).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use membertext::EncoderOptions;
    ///
    /// let options = EncoderOptions::new();
    /// assert_eq!(options.indent, 0);
    /// assert!(options.version.is_none());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented output (2 spaces per level).
    #[must_use]
    pub fn pretty() -> Self {
        EncoderOptions {
            indent: 2,
            ..Default::default()
        }
    }

    /// Sets the indentation size (number of spaces per level).
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Only emit members whose version range contains `version`.
    ///
    /// Members without a version range are always emitted.
    #[must_use]
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = Some(version);
        self
    }

    /// Sets the policy for generic container members.
    #[must_use]
    pub fn with_containers(mut self, containers: ContainerPolicy) -> Self {
        self.containers = containers;
        self
    }
}
