// Byte-to-text decoding for delimited exports with unknown encoding.
use encoding_rs::{UTF_8, WINDOWS_1252};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Windows1252,
}

/// Decodes `bytes`, preferring UTF-8 and falling back to windows-1252, the
/// Western legacy encoding spreadsheet programs write on Windows.
///
/// windows-1252 maps every byte (a superset of ISO-8859-1 for printable text),
/// so the fallback never fails and no further decoder is needed.
pub fn decode_text(bytes: &[u8]) -> (Cow<'_, str>, TextEncoding) {
    let (utf8, utf8_errors) = UTF_8.decode_with_bom_removal(bytes);
    if !utf8_errors {
        return (utf8, TextEncoding::Utf8);
    }

    tracing::debug!("Input is not valid UTF-8, decoding as windows-1252");
    let (text, _) = WINDOWS_1252.decode_without_bom_handling(bytes);
    (text, TextEncoding::Windows1252)
}
