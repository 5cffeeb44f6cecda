//! Bucketed member lists for complex nodes.
//!
//! A [`ComplexNode`] keeps its members in six ordered lists, one per
//! [`Bucket`]. Iteration always walks the buckets in the fixed order
//! `Boolean, Integer, Float, Text, Array, Complex`, so the emitted order of a
//! record never depends on the order its members were declared in. Inside a
//! bucket, members keep the order they were pushed in.
//!
//! ## Examples
//!
//! ```rust
//! use membertext::{ComplexNode, Node, Scalar};
//!
//! let mut members = ComplexNode::new();
//! members.push(Node::scalar("label", Scalar::from("demo")));
//! members.push(Node::scalar("active", Scalar::from(true)));
//!
//! let names: Vec<_> = members.iter().map(|n| n.name()).collect();
//! assert_eq!(names, vec!["active", "label"]);
//! ```

use crate::value::Node;

pub const BUCKET_COUNT: usize = 6;

/// Emission group of a member inside a complex node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Bucket {
    Boolean,
    Integer,
    Float,
    /// Text and enumeration leaves.
    Text,
    Array,
    Complex,
}

impl Bucket {
    /// All buckets, in emission order.
    pub const ALL: [Bucket; BUCKET_COUNT] = [
        Bucket::Boolean,
        Bucket::Integer,
        Bucket::Float,
        Bucket::Text,
        Bucket::Array,
        Bucket::Complex,
    ];

    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }
}

/// The members of a record, grouped by bucket.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ComplexNode {
    buckets: [Vec<Node>; BUCKET_COUNT],
}

impl ComplexNode {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a member to the end of its bucket.
    pub fn push(&mut self, node: Node) {
        self.buckets[node.bucket().index()].push(node);
    }

    /// Returns the members of one bucket, in insertion order.
    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &[Node] {
        &self.buckets[bucket.index()]
    }

    /// Returns the first member emitted under `name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use membertext::{ComplexNode, Node, Scalar};
    ///
    /// let mut members = ComplexNode::new();
    /// members.push(Node::scalar("id", Scalar::from(7)));
    /// assert!(members.get("id").is_some());
    /// assert!(members.get("name").is_none());
    /// ```
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Node> {
        self.iter().find(|node| node.name() == name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buckets.iter().all(Vec::is_empty)
    }

    /// Iterates over all members in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.buckets.iter().flatten()
    }
}

impl Extend<Node> for ComplexNode {
    fn extend<T: IntoIterator<Item = Node>>(&mut self, iter: T) {
        for node in iter {
            self.push(node);
        }
    }
}

impl FromIterator<Node> for ComplexNode {
    fn from_iter<T: IntoIterator<Item = Node>>(iter: T) -> Self {
        let mut members = ComplexNode::new();
        members.extend(iter);
        members
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Scalar;

    fn names(members: &ComplexNode) -> Vec<&str> {
        members.iter().map(Node::name).collect()
    }

    #[test]
    fn test_bucket_order_ignores_push_order() {
        let members: ComplexNode = vec![
            Node::Complex {
                name: "addr".to_string(),
                members: ComplexNode::new(),
            },
            Node::Array {
                name: "tags".to_string(),
                elements: Vec::new(),
            },
            Node::scalar("kind", Scalar::Enumeration("Text".to_string())),
            Node::scalar("label", Scalar::from("demo")),
            Node::scalar("ratio", Scalar::from(3.5)),
            Node::scalar("id", Scalar::from(50004)),
            Node::scalar("active", Scalar::from(true)),
        ]
        .into_iter()
        .collect();

        assert_eq!(
            names(&members),
            vec!["active", "id", "ratio", "kind", "label", "tags", "addr"]
        );
        assert_eq!(members.len(), 7);
        assert_eq!(members.bucket(Bucket::Text).len(), 2);
    }

    #[test]
    fn test_bucket_indices_follow_all() {
        for (i, bucket) in Bucket::ALL.iter().enumerate() {
            assert_eq!(bucket.index(), i);
        }
    }

    #[test]
    fn test_empty() {
        let members = ComplexNode::new();
        assert!(members.is_empty());
        assert_eq!(members.iter().count(), 0);
    }
}
