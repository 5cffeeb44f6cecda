//! Error types for record encoding.
//!
//! Every failure aborts the whole call: the encoder builds the complete
//! intermediate tree before it writes a single byte, so an error deep inside a
//! nested record never leaves half-written output behind.
//!
//! ## Error Categories
//!
//! - **Unsupported types**: a generic container reached where it cannot be skipped
//! - **Member access**: a descriptor the record cannot resolve, or a value whose
//!   kind disagrees with its descriptor
//! - **Null references**: an absent (`None`) value anywhere in the graph
//! - **Unimplemented operations**: decoding, which always fails closed
//! - **I/O and UTF-8**: writer sinks and the byte codec
//!
//! Member paths in messages are dotted, with array elements named by index
//! (`devices.1.values.0`).
//!
//! ## Examples
//!
//! ```rust
//! use membertext::Error;
//!
//! let err = Error::null_reference("device.storage");
//! assert!(err.to_string().contains("device.storage"));
//! ```

use thiserror::Error;

/// Represents all possible errors that can occur while encoding a record.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A generic container was reached where it cannot be excluded
    #[error("Unsupported type `{type_name}` at `{path}`: generic containers cannot be encoded here")]
    TypeUnsupported { path: String, type_name: String },

    /// A member could not be resolved or produced a value of the wrong kind
    #[error("Cannot access member `{path}` of `{record}`: {reason}")]
    MemberAccess {
        path: String,
        record: String,
        reason: String,
    },

    /// An absent value was found in the object graph
    #[error("Null reference encountered at `{path}`")]
    NullReference { path: String },

    /// The requested operation is declared but not implemented
    #[error("Unimplemented operation: {0}")]
    Unimplemented(String),

    /// IO error while writing encoded output
    #[error("IO error: {0}")]
    Io(String),

    /// Byte sequence is not valid UTF-8
    #[error("Invalid UTF-8 after {valid_up_to} bytes")]
    InvalidUtf8 { valid_up_to: usize },
}

impl Error {
    /// Creates an unsupported type error for a generic container found at `path`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use membertext::Error;
    ///
    /// let err = Error::type_unsupported("tags.0", "HashSet<String>");
    /// assert!(err.to_string().contains("HashSet<String>"));
    /// ```
    pub fn type_unsupported(path: &str, type_name: &str) -> Self {
        Error::TypeUnsupported {
            path: display_path(path),
            type_name: type_name.to_string(),
        }
    }

    /// Creates a member access error.
    pub fn member_access<T: std::fmt::Display>(path: &str, record: &str, reason: T) -> Self {
        Error::MemberAccess {
            path: display_path(path),
            record: record.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a null reference error for the member at `path`.
    pub fn null_reference(path: &str) -> Self {
        Error::NullReference {
            path: display_path(path),
        }
    }

    /// Creates an unimplemented operation error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use membertext::Error;
    ///
    /// let err = Error::unimplemented("deserialize");
    /// assert_eq!(err.to_string(), "Unimplemented operation: deserialize");
    /// ```
    pub fn unimplemented(operation: &str) -> Self {
        Error::Unimplemented(operation.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Returns the dotted member path the error refers to, if any.
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        match self {
            Error::TypeUnsupported { path, .. }
            | Error::MemberAccess { path, .. }
            | Error::NullReference { path } => Some(path),
            _ => None,
        }
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::InvalidUtf8 {
            valid_up_to: err.utf8_error().valid_up_to(),
        }
    }
}

impl From<std::str::Utf8Error> for Error {
    fn from(err: std::str::Utf8Error) -> Self {
        Error::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}

fn display_path(path: &str) -> String {
    if path.is_empty() {
        "<root>".to_string()
    } else {
        path.to_string()
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_path_names_root() {
        let err = Error::null_reference("");
        assert_eq!(err.path(), Some("<root>"));
        assert_eq!(err.to_string(), "Null reference encountered at `<root>`");
    }

    #[test]
    fn test_member_access_message() {
        let err = Error::member_access("addr.city", "Address", "no member named `city`");
        assert_eq!(
            err.to_string(),
            "Cannot access member `addr.city` of `Address`: no member named `city`"
        );
    }

    #[test]
    fn test_utf8_conversion() {
        let err: Error = String::from_utf8(vec![b'o', b'k', 0xff]).unwrap_err().into();
        assert_eq!(err, Error::InvalidUtf8 { valid_up_to: 2 });
        assert_eq!(err.path(), None);
    }
}
