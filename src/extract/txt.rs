//! Plain-text file decoding.

/// Decode uploaded text bytes.
///
/// UTF-8 first; anything else is read as ISO-8859-1, where every byte is the
/// code point of the same value. Surrounding whitespace is stripped.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.trim().to_string(),
        Err(_) => {
            let decoded: String = bytes.iter().copied().map(char::from).collect();
            decoded.trim().to_string()
        }
    }
}
