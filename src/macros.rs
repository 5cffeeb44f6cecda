/// Declares a struct and implements [`Record`](crate::Record) and
/// [`Encode`](crate::Encode) for it.
///
/// Fields may be preceded by a marker list, `@[marker, ...]`, whose entries
/// map onto [`MemberDraft`](crate::MemberDraft):
///
/// - `rename("NAME")`
/// - `ignore`
/// - `version(v)` / `version_range(min, max)`
/// - `inherit` (the field's type must itself be a record)
///
/// Computed members go in an optional `properties` block, as
/// `name: Type => getter`. Properties are only encoded when marked
/// `@[writable]`.
///
/// # Examples
///
/// ```rust
/// use membertext::{record, to_string};
///
/// record! {
///     #[derive(Debug, Clone)]
///     pub struct File {
///         @[rename("ID_DOIDO")] pub id: i32,
///         pub name: String,
///         @[ignore] pub scratch: String,
///     }
///     properties {
///         extension: String => extension,
///     }
/// }
///
/// impl File {
///     fn extension(&self) -> String {
///         self.name.rsplit('.').next().unwrap_or_default().to_string()
///     }
/// }
///
/// let file = File { id: 3, name: "a.txt".into(), scratch: String::new() };
/// assert_eq!(to_string(&file).unwrap(), "ID_DOIDO : 3\nname : \"a.txt\"\n");
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $(@[ $($marker:ident $( ( $($arg:expr),* ) )?),* $(,)? ])?
                $fvis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
        $(
            properties {
                $(
                    $(@[ $($pmarker:ident $( ( $($parg:expr),* ) )?),* $(,)? ])?
                    $prop:ident : $pty:ty => $getter:ident
                ),* $(,)?
            }
        )?
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn schema() -> $crate::Schema {
                #[allow(unused_mut)]
                let mut builder = $crate::SchemaBuilder::new(stringify!($name));
                $(
                    let _draft = builder.field::<$ty>(stringify!($field));
                    $($( _draft.$marker($($($arg),*)?); )*)?
                )*
                $($(
                    let _draft = builder.property::<$pty>(stringify!($prop));
                    $($( _draft.$pmarker($($($parg),*)?); )*)?
                )*)?
                builder.build()
            }

            #[allow(unused_variables)]
            fn member(&self, source_name: &str) -> Option<$crate::MemberRef<'_>> {
                $(
                    if source_name == stringify!($field) {
                        return Some($crate::MemberRef::from(&self.$field));
                    }
                )*
                $($(
                    if source_name == stringify!($prop) {
                        return Some($crate::MemberRef::owned(self.$getter()));
                    }
                )*)?
                None
            }
        }

        $crate::impl_encode_record!($name);
    };
}

/// Declares a fieldless enum and implements [`Encode`](crate::Encode) for it.
///
/// Values encode as the quoted name of their variant.
///
/// # Examples
///
/// ```rust
/// use membertext::{enumeration, record, to_string};
///
/// enumeration! {
///     #[derive(Debug, Clone, Copy, PartialEq)]
///     pub enum FileKind {
///         Text,
///         Image = 4,
///     }
/// }
///
/// record! {
///     struct Entry {
///         kind: FileKind,
///     }
/// }
///
/// let entry = Entry { kind: FileKind::Image };
/// assert_eq!(to_string(&entry).unwrap(), "kind : \"Image\"\n");
/// ```
#[macro_export]
macro_rules! enumeration {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$vmeta:meta])*
                $variant:ident $(= $disc:expr)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis enum $name {
            $(
                $(#[$vmeta])*
                $variant $(= $disc)?,
            )*
        }

        impl $crate::Encode for $name {
            fn class() -> $crate::TypeClass {
                $crate::TypeClass::Enumeration
            }

            fn view(&self) -> $crate::Result<$crate::View<'_>> {
                let symbol = match *self {
                    $( $name::$variant => stringify!($variant), )*
                };
                Ok($crate::View::Enumeration(symbol))
            }
        }
    };
}

/// Implements [`Encode`](crate::Encode) for a type that implements
/// [`Record`](crate::Record) by hand.
#[macro_export]
macro_rules! impl_encode_record {
    ($ty:ty) => {
        impl $crate::Encode for $ty {
            fn class() -> $crate::TypeClass {
                $crate::TypeClass::Record(<$ty as $crate::Record>::schema)
            }

            fn view(&self) -> $crate::Result<$crate::View<'_>> {
                Ok($crate::View::Record {
                    record: self,
                    schema: <$ty as $crate::Record>::schema,
                })
            }
        }
    };
}
