//! Intermediate representation built by the walker.
//!
//! A call to [`to_tree`](crate::to_tree) produces a [`ComplexNode`] for the
//! root record whose members are [`Node`]s:
//!
//! - [`Node::Scalar`]: a named leaf carrying a [`Scalar`]
//! - [`Node::Array`]: a named, ordered list of children named `0`, `1`, ...
//! - [`Node::Complex`]: a named nested record, its members grouped by bucket
//!
//! The tree is transient: it is built and dropped within a single encode
//! call, and exposed only so callers can inspect what would be emitted.
//!
//! ## Examples
//!
//! ```rust
//! use membertext::{Node, Scalar};
//!
//! let node = Node::scalar("id", Scalar::from(42));
//! assert_eq!(node.name(), "id");
//! assert_eq!(node.as_scalar(), Some(&Scalar::from(42)));
//! ```

use crate::bucket::{Bucket, ComplexNode};
use num_bigint::BigInt;
use std::fmt;

/// A node of the intermediate tree.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Scalar { name: String, value: Scalar },
    Array { name: String, elements: Vec<Node> },
    Complex { name: String, members: ComplexNode },
}

impl Node {
    /// Creates a scalar leaf.
    #[must_use]
    pub fn scalar(name: impl Into<String>, value: Scalar) -> Self {
        Node::Scalar {
            name: name.into(),
            value,
        }
    }

    /// Returns the name this node is emitted under.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Node::Scalar { name, .. } | Node::Array { name, .. } | Node::Complex { name, .. } => {
                name
            }
        }
    }

    /// Returns the bucket this node is grouped into inside its parent.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use membertext::{Bucket, Node, Scalar};
    ///
    /// let label = Node::scalar("label", Scalar::Text("demo".to_string()));
    /// let kind = Node::scalar("kind", Scalar::Enumeration("Image".to_string()));
    /// assert_eq!(label.bucket(), Bucket::Text);
    /// assert_eq!(kind.bucket(), Bucket::Text);
    /// ```
    #[must_use]
    pub fn bucket(&self) -> Bucket {
        match self {
            Node::Scalar { value, .. } => value.bucket(),
            Node::Array { .. } => Bucket::Array,
            Node::Complex { .. } => Bucket::Complex,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Node::Scalar { value, .. } => Some(value),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_elements(&self) -> Option<&[Node]> {
        match self {
            Node::Array { elements, .. } => Some(elements),
            _ => None,
        }
    }

    #[inline]
    #[must_use]
    pub fn as_members(&self) -> Option<&ComplexNode> {
        match self {
            Node::Complex { members, .. } => Some(members),
            _ => None,
        }
    }
}

/// A leaf value.
///
/// Enumerations carry the symbolic name of the constant; they share the text
/// bucket and the quoted text rendering.
#[derive(Clone, Debug, PartialEq)]
pub enum Scalar {
    Boolean(bool),
    Integer(Integer),
    Float(f64),
    Text(String),
    Enumeration(String),
}

impl Scalar {
    #[must_use]
    pub const fn bucket(&self) -> Bucket {
        match self {
            Scalar::Boolean(_) => Bucket::Boolean,
            Scalar::Integer(_) => Bucket::Integer,
            Scalar::Float(_) => Bucket::Float,
            Scalar::Text(_) | Scalar::Enumeration(_) => Bucket::Text,
        }
    }

    /// Returns the text of a text or enumeration leaf.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) | Scalar::Enumeration(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Boolean(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(Integer::from(value))
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(Integer::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::Text(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::Text(value)
    }
}

/// An integer of any width.
///
/// Every primitive integer fits in `Fixed`; only `u128` values above
/// `i128::MAX` and [`BigInt`]s fall back to `Big`.
///
/// # Examples
///
/// ```rust
/// use membertext::Integer;
///
/// assert_eq!(Integer::from(-7i8).to_string(), "-7");
/// assert_eq!(Integer::from(u128::MAX).to_string(), u128::MAX.to_string());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Integer {
    Fixed(i128),
    Big(BigInt),
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Integer::Fixed(i) => write!(f, "{}", i),
            Integer::Big(b) => write!(f, "{}", b),
        }
    }
}

macro_rules! integer_from {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Integer {
                fn from(value: $ty) -> Self {
                    Integer::Fixed(value as i128)
                }
            }
        )*
    };
}

integer_from!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, usize);

impl From<u128> for Integer {
    fn from(value: u128) -> Self {
        i128::try_from(value)
            .map(Integer::Fixed)
            .unwrap_or_else(|_| Integer::Big(BigInt::from(value)))
    }
}

impl From<BigInt> for Integer {
    fn from(value: BigInt) -> Self {
        Integer::Big(value)
    }
}
