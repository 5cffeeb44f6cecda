//! Schema extraction: member descriptors for record types.
//!
//! A [`Schema`] is the ordered list of [`MemberDescriptor`]s of a record type.
//! Records build it once per call through a [`SchemaBuilder`], declaring each
//! member with its Rust type and the markers that apply to it:
//!
//! - `rename(name)`: emit the member under `name` instead of its source name
//! - `ignore()`: never emit the member
//! - `version(v)` / `version_range(min, max)`: attach version metadata
//! - `writable()`: mark a property as having a setter
//! - `inherit()`: splice the members of a base record in place
//!
//! Members are never removed from the schema; the reason a member is not
//! emitted is recorded in [`MemberDescriptor::exclusion`] instead, so the
//! schema can be inspected (and serialized with serde) as a whole.
//!
//! ## Examples
//!
//! ```rust
//! use membertext::{Exclusion, Kind, SchemaBuilder};
//! use std::collections::HashMap;
//!
//! let mut builder = SchemaBuilder::new("File");
//! builder.field::<i32>("id").rename("ID_DOIDO");
//! builder.field::<i32>("scratch").ignore();
//! builder.field::<HashMap<String, i32>>("index");
//! builder.field::<Vec<String>>("tags").version_range(1, 3);
//! let schema = builder.build();
//!
//! let id = schema.get("id").unwrap();
//! assert_eq!(id.emitted_name, "ID_DOIDO");
//! assert_eq!(id.kind, Kind::Integer);
//! assert_eq!(schema.get("scratch").unwrap().exclusion, Some(Exclusion::Ignored));
//! assert_eq!(schema.get("index").unwrap().exclusion, Some(Exclusion::GenericContainer));
//! assert_eq!(schema.included().count(), 2);
//! ```

use crate::bucket::Bucket;
use crate::encode::{Encode, Record, TypeClass};
use log::{trace, warn};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Classification of a member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Kind {
    Boolean,
    Integer,
    Float,
    Text,
    Enumeration,
    Array,
    Complex,
}

impl Kind {
    /// Returns the bucket members of this kind are emitted in.
    #[must_use]
    pub const fn bucket(self) -> Bucket {
        match self {
            Kind::Boolean => Bucket::Boolean,
            Kind::Integer => Bucket::Integer,
            Kind::Float => Bucket::Float,
            Kind::Text | Kind::Enumeration => Bucket::Text,
            Kind::Array => Bucket::Array,
            Kind::Complex => Bucket::Complex,
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Kind::Boolean => "boolean",
            Kind::Integer => "integer",
            Kind::Float => "float",
            Kind::Text => "text",
            Kind::Enumeration => "enumeration",
            Kind::Array => "array",
            Kind::Complex => "complex",
        };
        f.write_str(name)
    }
}

/// Shape of a generic container member.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Container {
    Sequence,
    Mapping,
}

/// Inclusive range of versions a member belongs to.
///
/// # Examples
///
/// ```rust
/// use membertext::VersionRange;
///
/// let range = VersionRange::new(2, 4);
/// assert!(range.contains(2) && range.contains(4));
/// assert!(!range.contains(5));
/// assert_eq!(VersionRange::exact(3), VersionRange::new(3, 3));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct VersionRange {
    pub min: i32,
    pub max: i32,
}

impl VersionRange {
    #[must_use]
    pub const fn new(min: i32, max: i32) -> Self {
        VersionRange { min, max }
    }

    #[must_use]
    pub const fn exact(version: i32) -> Self {
        VersionRange {
            min: version,
            max: version,
        }
    }

    #[must_use]
    pub const fn contains(&self, version: i32) -> bool {
        self.min <= version && version <= self.max
    }

    /// The versions both ranges contain. Disjoint ranges give an empty
    /// range, one that contains no version.
    #[must_use]
    pub fn intersect(&self, other: &VersionRange) -> VersionRange {
        VersionRange {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }
}

/// How a member is read from its record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Access {
    Field,
    /// A computed member; only properties with a setter are encoded.
    Property { writable: bool },
}

/// Why a member is not emitted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Exclusion {
    Ignored,
    ReadOnly,
    GenericContainer,
}

/// Metadata for one member of a record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MemberDescriptor {
    pub source_name: String,
    pub emitted_name: String,
    pub kind: Kind,
    pub access: Access,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<VersionRange>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclusion: Option<Exclusion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub container: Option<Container>,
    /// Base members this member is inherited through, outermost first.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub base_path: Vec<String>,
}

impl MemberDescriptor {
    #[inline]
    #[must_use]
    pub fn included(&self) -> bool {
        self.exclusion.is_none()
    }

    #[inline]
    #[must_use]
    pub fn is_inherited(&self) -> bool {
        !self.base_path.is_empty()
    }
}

/// The ordered member descriptors of a record type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Schema {
    type_name: &'static str,
    members: Vec<MemberDescriptor>,
}

impl Schema {
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Returns every descriptor, including excluded ones, in declaration order.
    #[must_use]
    pub fn members(&self) -> &[MemberDescriptor] {
        &self.members
    }

    /// Iterates over the descriptors that are emitted by default.
    pub fn included(&self) -> impl Iterator<Item = &MemberDescriptor> + '_ {
        self.members.iter().filter(|member| member.included())
    }

    /// Returns the first descriptor declared under `source_name`.
    #[must_use]
    pub fn get(&self, source_name: &str) -> Option<&MemberDescriptor> {
        self.members
            .iter()
            .find(|member| member.source_name == source_name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// Extracts the schema of a record type.
///
/// Descriptors are derived fresh on every call.
#[must_use]
pub fn extract<T: Record>() -> Schema {
    let schema = T::schema();
    trace!(
        "extracted {} members ({} included) from `{}`",
        schema.len(),
        schema.included().count(),
        schema.type_name()
    );
    schema
}

/// A member being declared on a [`SchemaBuilder`].
#[derive(Debug)]
pub struct MemberDraft {
    source_name: String,
    class: TypeClass,
    access: Access,
    rename: Option<String>,
    version: Option<VersionRange>,
    ignored: bool,
    inherit: bool,
}

impl MemberDraft {
    /// Emits the member under `name`.
    pub fn rename(&mut self, name: impl Into<String>) -> &mut Self {
        self.rename = Some(name.into());
        self
    }

    pub fn ignore(&mut self) -> &mut Self {
        self.ignored = true;
        self
    }

    /// Attaches a single-version range.
    pub fn version(&mut self, version: i32) -> &mut Self {
        self.version = Some(VersionRange::exact(version));
        self
    }

    pub fn version_range(&mut self, min: i32, max: i32) -> &mut Self {
        self.version = Some(VersionRange::new(min, max));
        self
    }

    /// Marks a property as having a setter. Fields are always written, so
    /// this has no effect on them.
    pub fn writable(&mut self) -> &mut Self {
        match &mut self.access {
            Access::Property { writable } => *writable = true,
            Access::Field => warn!(
                "`{}` is a field; only properties can be marked writable",
                self.source_name
            ),
        }
        self
    }

    /// Splices the members of the base record this member holds into the
    /// enclosing schema, in place of the member itself.
    pub fn inherit(&mut self) -> &mut Self {
        self.inherit = true;
        self
    }

    fn exclusion(&self) -> Option<Exclusion> {
        if self.ignored {
            Some(Exclusion::Ignored)
        } else if self.access == (Access::Property { writable: false }) {
            Some(Exclusion::ReadOnly)
        } else if self.class.container().is_some() {
            Some(Exclusion::GenericContainer)
        } else {
            None
        }
    }

    fn into_descriptor(self) -> MemberDescriptor {
        MemberDescriptor {
            exclusion: self.exclusion(),
            emitted_name: self.rename.unwrap_or_else(|| self.source_name.clone()),
            kind: self.class.kind(),
            container: self.class.container(),
            source_name: self.source_name,
            access: self.access,
            version: self.version,
            base_path: Vec::new(),
        }
    }
}

/// Builds a [`Schema`] member by member.
#[derive(Debug)]
pub struct SchemaBuilder {
    type_name: &'static str,
    drafts: Vec<MemberDraft>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn new(type_name: &'static str) -> Self {
        SchemaBuilder {
            type_name,
            drafts: Vec::new(),
        }
    }

    /// Declares a data member of type `F`.
    pub fn field<F: Encode>(&mut self, source_name: &str) -> &mut MemberDraft {
        self.push(source_name, F::class(), Access::Field)
    }

    /// Declares a computed member of type `F`. Properties are read-only, and
    /// therefore excluded, unless marked [`writable`](MemberDraft::writable).
    pub fn property<F: Encode>(&mut self, source_name: &str) -> &mut MemberDraft {
        self.push(
            source_name,
            F::class(),
            Access::Property { writable: false },
        )
    }

    fn push(&mut self, source_name: &str, class: TypeClass, access: Access) -> &mut MemberDraft {
        let index = self.drafts.len();
        self.drafts.push(MemberDraft {
            source_name: source_name.to_string(),
            class,
            access,
            rename: None,
            version: None,
            ignored: false,
            inherit: false,
        });
        &mut self.drafts[index]
    }

    pub fn build(self) -> Schema {
        let mut members = Vec::with_capacity(self.drafts.len());

        for draft in self.drafts {
            if draft.inherit && draft.exclusion().is_none() {
                if let TypeClass::Record(base) = draft.class {
                    for mut member in base().members {
                        member.base_path.insert(0, draft.source_name.clone());
                        if let Some(range) = draft.version {
                            member.version = Some(match member.version {
                                Some(own) => own.intersect(&range),
                                None => range,
                            });
                        }
                        members.push(member);
                    }
                    continue;
                }
                warn!(
                    "`{}.{}` is marked inherit but is not a record; encoding it as a plain member",
                    self.type_name, draft.source_name
                );
            }
            members.push(draft.into_descriptor());
        }

        warn_duplicates(self.type_name, &members);

        Schema {
            type_name: self.type_name,
            members,
        }
    }
}

fn warn_duplicates(type_name: &str, members: &[MemberDescriptor]) {
    let mut seen = HashSet::new();
    for member in members.iter().filter(|m| m.included()) {
        if !seen.insert(member.emitted_name.as_str()) {
            warn!(
                "`{}` emits more than one member named `{}`",
                type_name, member.emitted_name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::MemberRef;
    use std::collections::{BTreeMap, HashSet as StdHashSet};

    struct Base {
        id: i32,
        secret: String,
    }

    impl Record for Base {
        fn schema() -> Schema {
            let mut builder = SchemaBuilder::new("Base");
            builder.field::<i32>("id").rename("ID");
            builder.field::<String>("secret").ignore();
            builder.build()
        }

        fn member(&self, source_name: &str) -> Option<MemberRef<'_>> {
            match source_name {
                "id" => Some(MemberRef::from(&self.id)),
                "secret" => Some(MemberRef::from(&self.secret)),
                _ => None,
            }
        }
    }

    crate::impl_encode_record!(Base);

    fn emitted(schema: &Schema) -> Vec<&str> {
        schema.included().map(|m| m.emitted_name.as_str()).collect()
    }

    #[test]
    fn test_classification() {
        let mut builder = SchemaBuilder::new("Sample");
        builder.field::<bool>("flag");
        builder.field::<u64>("count");
        builder.field::<f32>("ratio");
        builder.field::<String>("label");
        builder.field::<[i32; 3]>("triple");
        builder.field::<Base>("base");
        builder.field::<Option<Base>>("maybe");
        let schema = builder.build();

        let kinds: Vec<_> = schema.members().iter().map(|m| m.kind).collect();
        assert_eq!(
            kinds,
            vec![
                Kind::Boolean,
                Kind::Integer,
                Kind::Float,
                Kind::Text,
                Kind::Array,
                Kind::Complex,
                Kind::Complex,
            ]
        );
        assert!(schema.members().iter().all(MemberDescriptor::included));
    }

    #[test]
    fn test_exclusions() {
        let mut builder = SchemaBuilder::new("Sample");
        builder.field::<i32>("ignored").ignore();
        builder.property::<i32>("read_only");
        builder.property::<i32>("read_write").writable();
        builder.field::<BTreeMap<String, i32>>("map");
        builder.field::<StdHashSet<i32>>("set");
        builder.property::<i32>("both").ignore().writable();
        let schema = builder.build();

        let exclusions: Vec<_> = schema.members().iter().map(|m| m.exclusion).collect();
        assert_eq!(
            exclusions,
            vec![
                Some(Exclusion::Ignored),
                Some(Exclusion::ReadOnly),
                None,
                Some(Exclusion::GenericContainer),
                Some(Exclusion::GenericContainer),
                Some(Exclusion::Ignored),
            ]
        );
        assert_eq!(schema.get("map").unwrap().container, Some(Container::Mapping));
        assert_eq!(schema.get("set").unwrap().container, Some(Container::Sequence));
        assert_eq!(emitted(&schema), vec!["read_write"]);
    }

    #[test]
    fn test_rename_and_version_metadata() {
        let mut builder = SchemaBuilder::new("Sample");
        builder.field::<i32>("id").rename("FOO").version(2);
        builder.field::<i32>("name").version_range(1, 5);
        let schema = builder.build();

        let id = schema.get("id").unwrap();
        assert_eq!(id.source_name, "id");
        assert_eq!(id.emitted_name, "FOO");
        assert_eq!(id.version, Some(VersionRange::exact(2)));
        assert_eq!(schema.get("name").unwrap().emitted_name, "name");
        assert_eq!(
            schema.get("name").unwrap().version,
            Some(VersionRange::new(1, 5))
        );
    }

    #[test]
    fn test_inherit_splices_base_members() {
        let mut builder = SchemaBuilder::new("Derived");
        builder.field::<bool>("active");
        builder.field::<Base>("base").inherit();
        builder.field::<String>("label");
        let schema = builder.build();

        let names: Vec<_> = schema.members().iter().map(|m| m.source_name.as_str()).collect();
        assert_eq!(names, vec!["active", "id", "secret", "label"]);

        let id = schema.get("id").unwrap();
        assert!(id.is_inherited());
        assert_eq!(id.base_path, vec!["base".to_string()]);
        assert_eq!(id.emitted_name, "ID");
        assert_eq!(schema.get("secret").unwrap().exclusion, Some(Exclusion::Ignored));
        assert_eq!(emitted(&schema), vec!["active", "ID", "label"]);
    }

    #[test]
    fn test_inherit_on_non_record_is_plain_member() {
        let mut builder = SchemaBuilder::new("Sample");
        builder.field::<i32>("count").inherit();
        let schema = builder.build();

        assert_eq!(schema.len(), 1);
        assert!(!schema.get("count").unwrap().is_inherited());
    }

    #[test]
    fn test_inherit_carries_version_onto_base_members() {
        let mut builder = SchemaBuilder::new("Derived");
        builder.field::<Base>("base").inherit().version(2);
        builder.field::<String>("label");
        let schema = builder.build();

        assert_eq!(schema.get("id").unwrap().version, Some(VersionRange::exact(2)));
        assert_eq!(schema.get("secret").unwrap().version, Some(VersionRange::exact(2)));
        assert_eq!(schema.get("label").unwrap().version, None);
    }

    #[test]
    fn test_inherit_intersects_nested_versions() {
        struct Middle;

        impl Record for Middle {
            fn schema() -> Schema {
                let mut builder = SchemaBuilder::new("Middle");
                builder.field::<Base>("base").inherit().version_range(1, 4);
                builder.field::<i32>("count").version_range(3, 9);
                builder.build()
            }

            fn member(&self, _source_name: &str) -> Option<MemberRef<'_>> {
                None
            }
        }

        crate::impl_encode_record!(Middle);

        let mut builder = SchemaBuilder::new("Outer");
        builder.field::<Middle>("middle").inherit().version_range(2, 6);
        let schema = builder.build();

        let id = schema.get("id").unwrap();
        assert_eq!(id.base_path, vec!["middle".to_string(), "base".to_string()]);
        assert_eq!(id.version, Some(VersionRange::new(2, 4)));
        assert_eq!(schema.get("count").unwrap().version, Some(VersionRange::new(3, 6)));
    }

    #[test]
    fn test_disjoint_ranges_intersect_to_empty() {
        let empty = VersionRange::new(1, 2).intersect(&VersionRange::new(5, 6));
        assert!((0..10).all(|version| !empty.contains(version)));
    }

    #[test]
    fn test_read_only_property_is_not_spliced() {
        let mut builder = SchemaBuilder::new("Derived");
        builder.property::<Base>("base").inherit();
        builder.field::<Base>("ignored_base").inherit().ignore();
        let schema = builder.build();

        assert_eq!(schema.len(), 2);
        assert_eq!(schema.get("base").unwrap().exclusion, Some(Exclusion::ReadOnly));
        assert_eq!(schema.get("ignored_base").unwrap().exclusion, Some(Exclusion::Ignored));
        assert!(schema.get("id").is_none());
    }

    #[test]
    fn test_writable_on_field_keeps_field_access() {
        let mut builder = SchemaBuilder::new("Sample");
        builder.field::<i32>("count").writable();
        let schema = builder.build();

        let count = schema.get("count").unwrap();
        assert_eq!(count.access, Access::Field);
        assert!(count.included());
    }

    #[test]
    fn test_extract_uses_record_schema() {
        let schema = extract::<Base>();
        assert_eq!(schema.type_name(), "Base");
        assert_eq!(schema.len(), 2);
        assert!(!schema.is_empty());
    }
}
