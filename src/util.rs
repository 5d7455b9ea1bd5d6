//! Byte-level helpers.

use std::borrow::Cow;

/// Decode saved-page bytes as UTF-8, dropping a leading BOM.
///
/// Returns `None` when the bytes are not valid UTF-8. Browsers save pages
/// in UTF-8, so anything else means the wrong file was picked up.
pub fn decode_utf8(bytes: &[u8]) -> Option<Cow<'_, str>> {
    let (text, malformed) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    (!malformed).then_some(text)
}
