//! Universal Device Inquiry replies (`F0 7E <device> 06 02 …`).

use super::hex::{bytes_to_hex, bytes_to_version, clamp_range, extract_hex_data};
use super::manufacturer::{detect_device, manufacturer_name, DeviceDescriptor};
use std::fmt;

/// Raw index of the first manufacturer ID byte.
const MANUFACTURER_OFFSET: usize = 5;

/// Where family, model and version sit in the raw reply.
#[derive(Debug, Clone, Copy)]
struct Layout {
    family: usize,
    model: usize,
    version: usize,
}

const VERSION_LEN: usize = 4;

// Offsets into the full raw message.
// The 1-byte layout reads family across the sub-IDs (`06 02`), which is what
// the device rules are keyed on.
const STANDARD_LAYOUT: Layout = Layout {
    family: 3,
    model: 5,
    version: 7,
};
const EXTENDED_LAYOUT: Layout = Layout {
    family: 8,
    model: 10,
    version: 12,
};

/// Manufacturer ID bytes as they appeared in the reply.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ManufacturerId(Vec<u8>);

impl ManufacturerId {
    /// Three-byte IDs start with `00`.
    pub fn is_extended(&self) -> bool {
        self.0.first() == Some(&0x00)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn hex(&self) -> String {
        bytes_to_hex(&self.0)
    }
}

impl fmt::Display for ManufacturerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.hex())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityReply {
    pub manufacturer: ManufacturerId,
    /// Hex, e.g. `"04 00"`.
    pub family: String,
    /// Hex, e.g. `"01 01"`.
    pub model: String,
    /// Dot-joined decimal, e.g. `"1.0.3.2"`.
    pub version: String,
}

/// `F0 7E <any device id> 06 02`.
pub fn is_identity_reply(raw: &[u8]) -> bool {
    matches!(raw, [0xF0, 0x7E, _, 0x06, 0x02, ..])
}

impl IdentityReply {
    /// Parse an identity reply, or `None` if `raw` is not one.
    ///
    /// Fields past the end of a short reply come back empty rather than failing.
    pub fn parse(raw: &[u8]) -> Option<Self> {
        if !is_identity_reply(raw) {
            return None;
        }
        Some(Self::parse_unchecked(raw))
    }

    /// Parse without checking the reply header.
    pub fn parse_unchecked(raw: &[u8]) -> Self {
        let extended = raw.get(MANUFACTURER_OFFSET) == Some(&0x00);
        let (id_len, layout) = if extended {
            (3, EXTENDED_LAYOUT)
        } else {
            (1, STANDARD_LAYOUT)
        };
        let id_range = clamp_range(raw.len(), MANUFACTURER_OFFSET, MANUFACTURER_OFFSET + id_len);

        IdentityReply {
            manufacturer: ManufacturerId(raw[id_range].to_vec()),
            family: extract_hex_data(raw, layout.family, 2),
            model: extract_hex_data(raw, layout.model, 2),
            version: bytes_to_version(raw, layout.version, VERSION_LEN),
        }
    }

    /// Registered manufacturer name, falling back to the hex ID.
    pub fn manufacturer_name(&self) -> String {
        manufacturer_name(&self.manufacturer.hex())
            .map(str::to_string)
            .unwrap_or_else(|| self.manufacturer.hex())
    }

    pub fn device(&self) -> Option<DeviceDescriptor> {
        detect_device(self)
    }
}

impl fmt::Display for IdentityReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Identity Reply - Manufacturer: {} ({}), Family: {}, Model: {}, Version: {}",
            self.manufacturer_name(),
            self.manufacturer,
            self.family,
            self.model,
            self.version
        )
    }
}
