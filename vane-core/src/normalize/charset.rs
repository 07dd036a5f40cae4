use encoding_rs::Encoding;

use super::NormalizeError;

/// Decode `bytes` using the WHATWG charset `label` (`utf-8`, `gbk`, `gb18030`, ...).
///
/// Malformed sequences become U+FFFD; only an unrecognized label is an error.
///
/// # Errors
/// Returns [`NormalizeError::UnknownCharset`] when `label` names no known encoding.
pub fn decode_payload(bytes: &[u8], label: &str) -> Result<String, NormalizeError> {
    let encoding = Encoding::for_label(label.trim().as_bytes())
        .ok_or_else(|| NormalizeError::UnknownCharset(label.to_string()))?;
    let (text, _had_errors) = encoding.decode_without_bom_handling(bytes);
    Ok(text.into_owned())
}
