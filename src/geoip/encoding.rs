//! Country names and info strings are stored as ISO-8859-1.

use std::borrow::Cow;

/// Transcodes ISO-8859-1 bytes to UTF-8.
///
/// Every Latin-1 byte maps to exactly one code point, so this never fails and
/// borrows the input unchanged when it is plain ASCII.
pub fn latin1_to_utf8(bytes: &[u8]) -> Cow<'_, str> {
    encoding_rs::mem::decode_latin1(bytes)
}
