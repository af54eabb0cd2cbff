//! Text decoding helpers.

use std::borrow::Cow;

/// Decode bytes to a string, handling the encodings e-book exports show up in.
///
/// 1. UTF-8 (a BOM is stripped)
/// 2. the hint encoding, if one is given and UTF-8 is malformed
/// 3. Windows-1252, the usual encoding of old converter output
///
/// Returns `Cow::Borrowed` when the input is valid UTF-8 without a BOM.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}
