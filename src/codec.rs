//! The text/byte boundary.
//!
//! Encoded output is UTF-8 text. These helpers convert between that text and
//! raw bytes without any normalization, so `bytes_to_text(&text_to_bytes(s))`
//! always yields `s` again.
//!
//! ```rust
//! use membertext::codec::{bytes_to_text, text_to_bytes};
//!
//! let bytes = text_to_bytes("label : \"caf\u{e9}\"\n");
//! assert_eq!(bytes_to_text(&bytes).unwrap(), "label : \"caf\u{e9}\"\n");
//! assert!(bytes_to_text(&[0xff, 0xfe]).is_err());
//! ```

use crate::Result;

#[inline]
#[must_use]
pub fn text_to_bytes(text: &str) -> Vec<u8> {
    text.as_bytes().to_vec()
}

/// Decodes UTF-8 bytes into text.
///
/// # Errors
///
/// Returns `InvalidUtf8` with the length of the longest valid prefix.
pub fn bytes_to_text(bytes: &[u8]) -> Result<String> {
    Ok(std::str::from_utf8(bytes)?.to_string())
}
