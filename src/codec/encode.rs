//! Turning console input into bytes to transmit.

use super::hex::{bytes_to_hex, hex_to_bytes};
use super::kind::is_sysex_message;
use crate::error::Result;

/// Universal Device Inquiry addressed to all devices (device ID `7F`).
pub const SYSEX_IDENTITY_REQUEST: [u8; 6] = [0xF0, 0x7E, 0x7F, 0x06, 0x01, 0xF7];

const CC_ALL_SOUND_OFF: u8 = 120;
const CC_ALL_NOTES_OFF: u8 = 123;

/// A message as the user supplied it.
#[derive(Debug, Clone, Copy)]
pub enum Outgoing<'a> {
    /// Whitespace-separated hex, e.g. `"90 3C 7F"`.
    Text(&'a str),
    /// Bytes passed through as-is.
    Bytes(&'a [u8]),
}

/// Bytes ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoded {
    pub bytes: Vec<u8>,
    /// Starts with a SysEx framing byte. Callers decide whether that needs confirming.
    pub is_sysex: bool,
}

impl Encoded {
    pub fn hex(&self) -> String {
        bytes_to_hex(&self.bytes)
    }
}

/// Encode a message. Only the text form can fail, with `MalformedHex`.
pub fn encode(message: Outgoing<'_>) -> Result<Encoded> {
    let bytes = match message {
        Outgoing::Text(text) => hex_to_bytes(text)?,
        Outgoing::Bytes(bytes) => bytes.to_vec(),
    };
    let is_sysex = bytes.first().copied().is_some_and(is_sysex_message);
    Ok(Encoded { bytes, is_sysex })
}

pub fn note_on(channel: u8, note: u8, velocity: u8) -> [u8; 3] {
    [0x90 | (channel & 0x0F), note, velocity]
}

pub fn note_off(channel: u8, note: u8) -> [u8; 3] {
    [0x80 | (channel & 0x0F), note, 0]
}

/// All Notes Off and All Sound Off on every channel.
pub fn all_notes_off() -> Vec<[u8; 3]> {
    (0..16u8)
        .flat_map(|channel| {
            [
                [0xB0 | channel, CC_ALL_NOTES_OFF, 0],
                [0xB0 | channel, CC_ALL_SOUND_OFF, 0],
            ]
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_encode_text() {
        let encoded = encode(Outgoing::Text("90 3C 7F")).unwrap();
        assert_eq!(encoded.bytes, vec![0x90, 0x3C, 0x7F]);
        assert!(!encoded.is_sysex);
        assert_eq!(encoded.hex(), "90 3C 7F");
    }

    #[test]
    fn test_encode_text_malformed() {
        assert!(matches!(
            encode(Outgoing::Text("F0 ZZ F7")),
            Err(Error::MalformedHex { .. })
        ));
    }

    #[test]
    fn test_encode_bytes_passes_through() {
        let encoded = encode(Outgoing::Bytes(&[0x3C, 0xFF, 0x00])).unwrap();
        assert_eq!(encoded.bytes, vec![0x3C, 0xFF, 0x00]);
        assert!(!encoded.is_sysex);
    }

    #[test]
    fn test_identity_request_is_sysex() {
        let encoded = encode(Outgoing::Bytes(&SYSEX_IDENTITY_REQUEST)).unwrap();
        assert!(encoded.is_sysex);
        assert_eq!(encoded.hex(), "F0 7E 7F 06 01 F7");
        assert!(encode(Outgoing::Text("F7")).unwrap().is_sysex);
    }

    #[test]
    fn test_encode_empty() {
        let encoded = encode(Outgoing::Text("")).unwrap();
        assert!(encoded.bytes.is_empty());
        assert!(!encoded.is_sysex);
    }

    #[test]
    fn test_note_helpers() {
        assert_eq!(note_on(0, 62, 127), [0x90, 62, 127]);
        assert_eq!(note_off(3, 62), [0x83, 62, 0]);
    }

    #[test]
    fn test_all_notes_off() {
        let messages = all_notes_off();
        assert_eq!(messages.len(), 32);
        assert_eq!(messages[0], [0xB0, 123, 0]);
        assert_eq!(messages[1], [0xB0, 120, 0]);
        assert_eq!(messages[31], [0xBF, 120, 0]);
    }
}
