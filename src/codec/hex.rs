//! Conversion between raw bytes and the space-separated hex text shown in the console.

use crate::error::{Error, Result};

/// Render bytes as two-digit uppercase hex joined by `separator`.
pub fn bytes_to_hex_with(bytes: &[u8], separator: &str) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(separator)
}

/// Render bytes as `"F0 7E 7F"`.
pub fn bytes_to_hex(bytes: &[u8]) -> String {
    bytes_to_hex_with(bytes, " ")
}

/// Parse whitespace-separated hex tokens into bytes.
///
/// Every separator character delimits a token, so doubled separators produce an
/// empty token and fail. The empty string parses to an empty message.
pub fn hex_to_bytes(text: &str) -> Result<Vec<u8>> {
    if text.is_empty() {
        return Ok(Vec::new());
    }
    text.split(char::is_whitespace).map(parse_token).collect()
}

fn parse_token(token: &str) -> Result<u8> {
    // from_str_radix alone would accept a leading '+'
    if token.is_empty() || !token.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(Error::malformed(token));
    }
    u8::from_str_radix(token, 16).map_err(|_| Error::malformed(token))
}

/// Clamp a `start..end` range to `len`, the way a tolerant slice does.
pub(crate) fn clamp_range(len: usize, start: usize, end: usize) -> std::ops::Range<usize> {
    let end = end.min(len);
    start.min(end)..end
}

/// Hex of `bytes[start..end]`; out-of-range bounds truncate instead of failing.
pub fn extract_hex_slice(bytes: &[u8], start: usize, end: usize) -> String {
    bytes_to_hex(&bytes[clamp_range(bytes.len(), start, end)])
}

/// Hex of `length` bytes starting at `start`, truncated at the end of `bytes`.
pub fn extract_hex_data(bytes: &[u8], start: usize, length: usize) -> String {
    extract_hex_slice(bytes, start, start.saturating_add(length))
}

/// Decimal, dot-joined rendering of `length` bytes from `start` (`1.0.3.2`).
pub fn bytes_to_version(bytes: &[u8], start: usize, length: usize) -> String {
    bytes[clamp_range(bytes.len(), start, start.saturating_add(length))]
        .iter()
        .map(|b| b.to_string())
        .collect::<Vec<_>>()
        .join(".")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bytes_to_hex() {
        assert_eq!(bytes_to_hex(&[0xF0, 0x7E, 0x0A, 0xF7]), "F0 7E 0A F7");
        assert_eq!(bytes_to_hex(&[]), "");
        assert_eq!(bytes_to_hex_with(&[0x01, 0xAB], ""), "01AB");
        assert_eq!(bytes_to_hex_with(&[0x01, 0xAB], ":"), "01:AB");
    }

    #[test]
    fn test_hex_to_bytes() {
        assert_eq!(hex_to_bytes("90 3C 7f").unwrap(), vec![0x90, 0x3C, 0x7F]);
        assert_eq!(hex_to_bytes("0").unwrap(), vec![0]);
        assert_eq!(hex_to_bytes("").unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_hex_to_bytes_accepts_tabs() {
        assert_eq!(hex_to_bytes("F0\t7E").unwrap(), vec![0xF0, 0x7E]);
    }

    #[test]
    fn test_hex_to_bytes_rejects_bad_digit() {
        match hex_to_bytes("9G 00") {
            Err(Error::MalformedHex { token }) => assert_eq!(token, "9G"),
            other => panic!("expected MalformedHex, got {:?}", other),
        }
    }

    #[test]
    fn test_hex_to_bytes_rejects_out_of_range_and_signs() {
        assert!(matches!(hex_to_bytes("100"), Err(Error::MalformedHex { .. })));
        assert!(matches!(hex_to_bytes("-1"), Err(Error::MalformedHex { .. })));
        assert!(matches!(hex_to_bytes("+7F"), Err(Error::MalformedHex { .. })));
    }

    #[test]
    fn test_hex_to_bytes_rejects_empty_tokens() {
        assert!(matches!(hex_to_bytes("90  3C"), Err(Error::MalformedHex { .. })));
        assert!(matches!(hex_to_bytes("90 "), Err(Error::MalformedHex { .. })));
    }

    #[test]
    fn test_hex_round_trip() {
        let all: Vec<u8> = (0..=255).collect();
        assert_eq!(hex_to_bytes(&bytes_to_hex(&all)).unwrap(), all);
        assert_eq!(hex_to_bytes(&bytes_to_hex(&[])).unwrap(), Vec::<u8>::new());
    }

    #[test]
    fn test_extract_hex_is_tolerant() {
        let data = [0xF0, 0x7E, 0x00, 0x06, 0x02];
        assert_eq!(extract_hex_slice(&data, 3, 5), "06 02");
        assert_eq!(extract_hex_slice(&data, 4, 9), "02");
        assert_eq!(extract_hex_slice(&data, 7, 9), "");
        assert_eq!(extract_hex_slice(&data, 3, 1), "");
        assert_eq!(extract_hex_data(&data, 1, 2), "7E 00");
        assert_eq!(extract_hex_data(&data, 4, usize::MAX), "02");
    }

    #[test]
    fn test_bytes_to_version() {
        assert_eq!(bytes_to_version(&[9, 1, 0, 3, 2], 1, 4), "1.0.3.2");
        assert_eq!(bytes_to_version(&[0, 0, 0, 0x31], 0, 4), "0.0.0.49");
        assert_eq!(bytes_to_version(&[1, 2], 0, 4), "1.2");
        assert_eq!(bytes_to_version(&[1, 2], 5, 4), "");
    }
}
