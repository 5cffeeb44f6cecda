//! Decoding.
//!
//! The text format is write-only. [`deserialize`] is part of the public
//! surface so callers can depend on it, but it always fails closed with
//! [`Error::Unimplemented`] and never returns a partially built record.
//!
//! ```rust
//! use membertext::{deserialize, record, Error};
//!
//! record! {
//!     struct Point {
//!         x: i32,
//!     }
//! }
//!
//! let err = deserialize::<Point>(b"x : 1\n").err().unwrap();
//! assert_eq!(err, Error::unimplemented("deserialize"));
//! ```

use crate::encode::Record;
use crate::{Error, Result};
use log::debug;

/// Decodes a record from encoded bytes.
///
/// # Errors
///
/// Always returns [`Error::Unimplemented`].
pub fn deserialize<T: Record>(bytes: &[u8]) -> Result<T> {
    debug!(
        "refusing to decode {} bytes into `{}`",
        bytes.len(),
        std::any::type_name::<T>()
    );
    Err(Error::unimplemented("deserialize"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record;

    record! {
        #[derive(Debug)]
        struct Point {
            x: i32,
            y: i32,
        }
    }

    #[test]
    fn test_deserialize_fails_closed() {
        let bytes = crate::serialize(&Point { x: 1, y: 2 }).unwrap();
        assert_eq!(
            deserialize::<Point>(&bytes).unwrap_err(),
            Error::unimplemented("deserialize")
        );
        assert!(deserialize::<Point>(&[]).is_err());
    }
}
