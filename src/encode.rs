//! The capabilities the encoder needs from values and records.
//!
//! - [`Encode`]: implemented by every value that can appear in a record. It
//!   reports a type-level [`TypeClass`] used by the schema extractor and a
//!   per-instance [`View`] used by the walker.
//! - [`Record`]: implemented by structured records. It reports the record's
//!   ordered member descriptors and resolves member values by source name.
//!
//! Implementations for primitives, strings, arrays, the standard containers,
//! `indexmap`, `chrono` dates and `num-bigint` integers live here. Records are
//! usually declared with [`record!`](crate::record), enumerations with
//! [`enumeration!`](crate::enumeration).
//!
//! Containers only have to enumerate their elements (or key/value pairs) in a
//! stable order. Hash-based containers are sorted while being viewed so that
//! encoding the same value twice always yields the same bytes.

use crate::schema::{Container, Kind, Schema};
use crate::value::Integer;
use crate::Result;
use chrono::{DateTime, NaiveDate, TimeZone};
use indexmap::{IndexMap, IndexSet};
use num_bigint::BigInt;
use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, LinkedList, VecDeque};
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;
use std::sync::Arc;

/// Type-level classification of an encodable type.
///
/// `Sequence` and `Mapping` mark generic containers; the extractor excludes
/// members of those types unless container expansion is enabled.
#[derive(Clone, Copy)]
pub enum TypeClass {
    Boolean,
    Integer,
    Float,
    Text,
    Enumeration,
    Array,
    /// A nested record, with the function that extracts its schema.
    Record(fn() -> Schema),
    Sequence,
    Mapping,
}

impl TypeClass {
    /// Returns the member kind this class is encoded as.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            TypeClass::Boolean => Kind::Boolean,
            TypeClass::Integer => Kind::Integer,
            TypeClass::Float => Kind::Float,
            TypeClass::Text => Kind::Text,
            TypeClass::Enumeration => Kind::Enumeration,
            TypeClass::Array | TypeClass::Sequence => Kind::Array,
            TypeClass::Record(_) | TypeClass::Mapping => Kind::Complex,
        }
    }

    /// Returns the container shape of generic container classes.
    #[must_use]
    pub const fn container(&self) -> Option<Container> {
        match self {
            TypeClass::Sequence => Some(Container::Sequence),
            TypeClass::Mapping => Some(Container::Mapping),
            _ => None,
        }
    }
}

impl fmt::Debug for TypeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeClass::Boolean => f.write_str("Boolean"),
            TypeClass::Integer => f.write_str("Integer"),
            TypeClass::Float => f.write_str("Float"),
            TypeClass::Text => f.write_str("Text"),
            TypeClass::Enumeration => f.write_str("Enumeration"),
            TypeClass::Array => f.write_str("Array"),
            TypeClass::Record(_) => f.write_str("Record"),
            TypeClass::Sequence => f.write_str("Sequence"),
            TypeClass::Mapping => f.write_str("Mapping"),
        }
    }
}

/// The current value of an encodable instance, as seen by the walker.
pub enum View<'a> {
    Boolean(bool),
    Integer(Integer),
    Float(f64),
    Text(Cow<'a, str>),
    /// Symbolic name of an enumeration constant.
    Enumeration(&'static str),
    Array(Vec<&'a dyn Encode>),
    Sequence(Vec<&'a dyn Encode>),
    Mapping(Vec<(String, &'a dyn Encode)>),
    Record {
        record: &'a dyn Record,
        schema: fn() -> Schema,
    },
    /// An absent value.
    Null,
}

impl<'a> View<'a> {
    /// Returns the kind this view is encoded as, or `None` for [`View::Null`].
    #[must_use]
    pub const fn kind(&self) -> Option<Kind> {
        match self {
            View::Boolean(_) => Some(Kind::Boolean),
            View::Integer(_) => Some(Kind::Integer),
            View::Float(_) => Some(Kind::Float),
            View::Text(_) => Some(Kind::Text),
            View::Enumeration(_) => Some(Kind::Enumeration),
            View::Array(_) | View::Sequence(_) => Some(Kind::Array),
            View::Mapping(_) | View::Record { .. } => Some(Kind::Complex),
            View::Null => None,
        }
    }
}

/// A value that can appear as a record member or array element.
///
/// # Examples
///
/// ```rust
/// use membertext::{Encode, Kind, View};
///
/// assert_eq!(<u16 as Encode>::class().kind(), Kind::Integer);
/// assert_eq!(<Vec<bool> as Encode>::class().kind(), Kind::Array);
///
/// let value: Option<String> = None;
/// assert!(matches!(value.view().unwrap(), View::Null));
/// ```
pub trait Encode {
    /// Classifies the type without looking at an instance.
    fn class() -> TypeClass
    where
        Self: Sized;

    /// Resolves the current value.
    fn view(&self) -> Result<View<'_>>;

    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A structured record with named members.
///
/// Implementations report an ordered schema and resolve members by their
/// source name. Manual implementations also need an [`Encode`] impl, which
/// [`impl_encode_record!`](crate::impl_encode_record) provides.
///
/// # Examples
///
/// ```rust
/// use membertext::{impl_encode_record, to_string, MemberRef, Record, Schema, SchemaBuilder};
///
/// struct Disk {
///     blocks: u64,
///     block_size: u64,
/// }
///
/// impl Disk {
///     fn capacity(&self) -> u64 {
///         self.blocks * self.block_size
///     }
/// }
///
/// impl Record for Disk {
///     fn schema() -> Schema {
///         let mut builder = SchemaBuilder::new("Disk");
///         builder.field::<u64>("blocks");
///         builder.field::<u64>("block_size").rename("BLOCK_SIZE");
///         // Read-only properties are never encoded.
///         builder.property::<u64>("capacity");
///         builder.build()
///     }
///
///     fn member(&self, source_name: &str) -> Option<MemberRef<'_>> {
///         match source_name {
///             "blocks" => Some(MemberRef::from(&self.blocks)),
///             "block_size" => Some(MemberRef::from(&self.block_size)),
///             "capacity" => Some(MemberRef::owned(self.capacity())),
///             _ => None,
///         }
///     }
/// }
///
/// impl_encode_record!(Disk);
///
/// let disk = Disk { blocks: 8, block_size: 512 };
/// assert_eq!(to_string(&disk).unwrap(), "blocks : 8\nBLOCK_SIZE : 512\n");
/// ```
pub trait Record {
    /// Extracts the ordered member descriptors of the record type.
    fn schema() -> Schema
    where
        Self: Sized;

    /// Resolves the member declared under `source_name`.
    fn member(&self, source_name: &str) -> Option<MemberRef<'_>>;

    fn record_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// A resolved member value, either borrowed from the record or computed.
pub enum MemberRef<'a> {
    Borrowed(&'a dyn Encode),
    Owned(Box<dyn Encode + 'a>),
}

impl<'a> MemberRef<'a> {
    /// Wraps a computed value, such as the result of a property getter.
    pub fn owned<T: Encode + 'a>(value: T) -> Self {
        MemberRef::Owned(Box::new(value))
    }
}

impl<'a> Deref for MemberRef<'a> {
    type Target = dyn Encode + 'a;

    fn deref(&self) -> &Self::Target {
        match self {
            MemberRef::Borrowed(value) => *value,
            MemberRef::Owned(value) => value.as_ref(),
        }
    }
}

impl<'a, T: Encode> From<&'a T> for MemberRef<'a> {
    fn from(value: &'a T) -> Self {
        MemberRef::Borrowed(value)
    }
}

impl Encode for bool {
    fn class() -> TypeClass {
        TypeClass::Boolean
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Boolean(*self))
    }
}

macro_rules! encode_integer {
    ($($ty:ty),*) => {
        $(
            impl Encode for $ty {
                fn class() -> TypeClass {
                    TypeClass::Integer
                }

                fn view(&self) -> Result<View<'_>> {
                    Ok(View::Integer(Integer::from(*self)))
                }
            }
        )*
    };
}

encode_integer!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl Encode for BigInt {
    fn class() -> TypeClass {
        TypeClass::Integer
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Integer(Integer::Big(self.clone())))
    }
}

impl Encode for f32 {
    fn class() -> TypeClass {
        TypeClass::Float
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Float(f64::from(*self)))
    }
}

impl Encode for f64 {
    fn class() -> TypeClass {
        TypeClass::Float
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Float(*self))
    }
}

impl Encode for char {
    fn class() -> TypeClass {
        TypeClass::Text
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Text(Cow::Owned(self.to_string())))
    }
}

impl Encode for String {
    fn class() -> TypeClass {
        TypeClass::Text
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Text(Cow::Borrowed(self)))
    }
}

impl<'s> Encode for &'s str {
    fn class() -> TypeClass {
        TypeClass::Text
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Text(Cow::Borrowed(self)))
    }
}

impl<'s> Encode for Cow<'s, str> {
    fn class() -> TypeClass {
        TypeClass::Text
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Text(Cow::Borrowed(&**self)))
    }
}

impl<Tz: TimeZone> Encode for DateTime<Tz>
where
    Tz::Offset: fmt::Display,
{
    fn class() -> TypeClass {
        TypeClass::Text
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Text(Cow::Owned(self.to_rfc3339())))
    }
}

impl Encode for NaiveDate {
    fn class() -> TypeClass {
        TypeClass::Text
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Text(Cow::Owned(self.format("%Y-%m-%d").to_string())))
    }
}

impl<T: Encode> Encode for Option<T> {
    fn class() -> TypeClass {
        T::class()
    }

    fn view(&self) -> Result<View<'_>> {
        match self {
            Some(value) => value.view(),
            None => Ok(View::Null),
        }
    }
}

macro_rules! encode_pointer {
    ($($ptr:ident),*) => {
        $(
            impl<T: Encode> Encode for $ptr<T> {
                fn class() -> TypeClass {
                    T::class()
                }

                fn view(&self) -> Result<View<'_>> {
                    (**self).view()
                }
            }
        )*
    };
}

encode_pointer!(Box, Rc, Arc);

fn elements<'a, T: Encode + 'a>(items: impl Iterator<Item = &'a T>) -> Vec<&'a dyn Encode> {
    items.map(|item| item as &dyn Encode).collect()
}

impl<T: Encode> Encode for Vec<T> {
    fn class() -> TypeClass {
        TypeClass::Array
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Array(elements(self.iter())))
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn class() -> TypeClass {
        TypeClass::Array
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Array(elements(self.iter())))
    }
}

impl<'s, T: Encode> Encode for &'s [T] {
    fn class() -> TypeClass {
        TypeClass::Array
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Array(elements(self.iter())))
    }
}

impl<T: Encode> Encode for VecDeque<T> {
    fn class() -> TypeClass {
        TypeClass::Sequence
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Sequence(elements(self.iter())))
    }
}

impl<T: Encode> Encode for LinkedList<T> {
    fn class() -> TypeClass {
        TypeClass::Sequence
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Sequence(elements(self.iter())))
    }
}

impl<T: Encode + Ord, S> Encode for HashSet<T, S> {
    fn class() -> TypeClass {
        TypeClass::Sequence
    }

    fn view(&self) -> Result<View<'_>> {
        let mut items: Vec<&T> = self.iter().collect();
        items.sort();
        Ok(View::Sequence(elements(items.into_iter())))
    }
}

impl<T: Encode> Encode for BTreeSet<T> {
    fn class() -> TypeClass {
        TypeClass::Sequence
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Sequence(elements(self.iter())))
    }
}

impl<T: Encode, S> Encode for IndexSet<T, S> {
    fn class() -> TypeClass {
        TypeClass::Sequence
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Sequence(elements(self.iter())))
    }
}

fn entries<'a, K, V>(pairs: impl Iterator<Item = (&'a K, &'a V)>) -> Vec<(String, &'a dyn Encode)>
where
    K: fmt::Display + 'a,
    V: Encode + 'a,
{
    pairs
        .map(|(key, value)| (key.to_string(), value as &dyn Encode))
        .collect()
}

/// Entries are ordered by rendered key, then by key for keys that render alike.
impl<K: fmt::Display + Ord, V: Encode, S> Encode for HashMap<K, V, S> {
    fn class() -> TypeClass {
        TypeClass::Mapping
    }

    fn view(&self) -> Result<View<'_>> {
        let mut pairs: Vec<(&K, &V)> = self.iter().collect();
        pairs.sort_by_cached_key(|&(key, _)| (key.to_string(), key));
        Ok(View::Mapping(entries(pairs.into_iter())))
    }
}

impl<K: fmt::Display, V: Encode> Encode for BTreeMap<K, V> {
    fn class() -> TypeClass {
        TypeClass::Mapping
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Mapping(entries(self.iter())))
    }
}

impl<K: fmt::Display, V: Encode, S> Encode for IndexMap<K, V, S> {
    fn class() -> TypeClass {
        TypeClass::Mapping
    }

    fn view(&self) -> Result<View<'_>> {
        Ok(View::Mapping(entries(self.iter())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(view: View<'_>) -> Vec<String> {
        let items = match view {
            View::Array(items) | View::Sequence(items) => items,
            _ => panic!("Expected a sequence view"),
        };
        items
            .into_iter()
            .map(|item| match item.view().unwrap() {
                View::Text(s) => s.into_owned(),
                View::Integer(i) => i.to_string(),
                _ => panic!("Expected text or integer"),
            })
            .collect()
    }

    #[test]
    fn test_classes() {
        assert_eq!(<bool as Encode>::class().kind(), Kind::Boolean);
        assert_eq!(<i128 as Encode>::class().kind(), Kind::Integer);
        assert_eq!(<f32 as Encode>::class().kind(), Kind::Float);
        assert_eq!(<char as Encode>::class().kind(), Kind::Text);
        assert_eq!(<Option<Box<String>> as Encode>::class().kind(), Kind::Text);
        assert_eq!(<[u8; 4] as Encode>::class().kind(), Kind::Array);
        assert!(<Vec<u8> as Encode>::class().container().is_none());
        assert_eq!(
            <HashMap<String, i32> as Encode>::class().container(),
            Some(Container::Mapping)
        );
        assert_eq!(
            <VecDeque<i32> as Encode>::class().container(),
            Some(Container::Sequence)
        );
    }

    #[test]
    fn test_hash_containers_view_sorted() {
        let set: HashSet<i32> = [30, 10, 20].into_iter().collect();
        assert_eq!(texts(set.view().unwrap()), vec!["10", "20", "30"]);

        let map: HashMap<&str, i32> = [("b", 2), ("a", 1)].into_iter().collect();
        match map.view().unwrap() {
            View::Mapping(pairs) => {
                let keys: Vec<_> = pairs.iter().map(|(k, _)| k.as_str()).collect();
                assert_eq!(keys, vec!["a", "b"]);
            }
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_hash_map_keys_that_render_alike_keep_key_order() {
        #[derive(PartialEq, Eq, PartialOrd, Ord, Hash)]
        struct Slot(u8, u8);

        impl fmt::Display for Slot {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        let map: HashMap<Slot, i32> = (0..16u8).rev().map(|n| (Slot(n % 2, n), i32::from(n))).collect();
        match map.view().unwrap() {
            View::Mapping(pairs) => {
                let values: Vec<_> = pairs
                    .iter()
                    .map(|(_, value)| match value.view().unwrap() {
                        View::Integer(n) => n.to_string(),
                        _ => panic!("Expected integer"),
                    })
                    .collect();
                let expected: Vec<_> = (0..16)
                    .filter(|n| n % 2 == 0)
                    .chain((0..16).filter(|n| n % 2 == 1))
                    .map(|n: i32| n.to_string())
                    .collect();
                assert_eq!(values, expected);
            }
            _ => panic!("Expected mapping"),
        }
    }

    #[test]
    fn test_index_containers_keep_insertion_order() {
        let mut set = IndexSet::new();
        set.insert("z".to_string());
        set.insert("a".to_string());
        assert_eq!(texts(set.view().unwrap()), vec!["z", "a"]);
    }

    #[test]
    fn test_member_ref_deref() {
        let borrowed = 5u8;
        let by_ref = MemberRef::from(&borrowed);
        let owned = MemberRef::owned(String::from("computed"));
        assert_eq!(by_ref.view().unwrap().kind(), Some(Kind::Integer));
        assert_eq!(owned.view().unwrap().kind(), Some(Kind::Text));
        assert!(owned.type_name().contains("String"));
    }

    #[test]
    fn test_dates_are_text() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        match date.view().unwrap() {
            View::Text(s) => assert_eq!(s, "2024-03-09"),
            _ => panic!("Expected text"),
        }
    }
}
