//! Manufacturer ID registry and known-device rules.

use super::identity::IdentityReply;
use std::fmt;

pub const ARTURIA: &str = "00 20 6B";
pub const WALDORF_ELECTRONICS_GMBH: &str = "3E";

/// Keyed by the hex form of the ID bytes.
static MANUFACTURERS: &[(&str, &str)] = &[
    ("01", "Sequential Circuits"),
    ("04", "Moog"),
    ("06", "Lexicon"),
    ("07", "Kurzweil"),
    ("0F", "Ensoniq"),
    ("10", "Oberheim"),
    ("18", "E-mu"),
    (WALDORF_ELECTRONICS_GMBH, "Waldorf Electronics GmbH"),
    ("40", "Kawai"),
    ("41", "Roland"),
    ("42", "Korg"),
    ("43", "Yamaha"),
    ("44", "Casio"),
    ("47", "Akai"),
    ("7D", "Development/Non-commercial"),
    ("00 00 0E", "Alesis"),
    ("00 01 05", "M-Audio"),
    ("00 20 29", "Focusrite/Novation"),
    ("00 20 32", "Behringer GmbH"),
    ("00 20 33", "Access Music Electronics GmbH"),
    ("00 20 3C", "Elektron ESI AB"),
    (ARTURIA, "Arturia"),
    ("00 21 09", "Native Instruments"),
];

/// Display name of a manufacturer ID given as hex (`"41"`, `"00 20 6B"`).
pub fn manufacturer_name(id_hex: &str) -> Option<&'static str> {
    MANUFACTURERS
        .iter()
        .find(|(id, _)| *id == id_hex)
        .map(|(_, name)| *name)
}

/// A device recognised from its identity reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub manufacturer: String,
    pub name: String,
    pub version: Option<String>,
}

impl fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.manufacturer, self.name)?;
        if let Some(version) = &self.version {
            write!(f, " (firmware {})", version)?;
        }
        Ok(())
    }
}

struct DeviceRule {
    manufacturer_id: &'static str,
    family: &'static str,
    model: &'static str,
    manufacturer: &'static str,
    name: &'static str,
    report_version: bool,
}

static DEVICES: &[DeviceRule] = &[
    DeviceRule {
        manufacturer_id: ARTURIA,
        family: "04 00",
        model: "01 01",
        manufacturer: "Arturia",
        name: "MiniBrute SE",
        report_version: true,
    },
    // Blofeld puts its version string (ASCII "1.24") where the version bytes
    // should be, so it is not reported.
    DeviceRule {
        manufacturer_id: WALDORF_ELECTRONICS_GMBH,
        family: "06 02",
        model: "3E 13",
        manufacturer: "Waldorf",
        name: "Blofeld",
        report_version: false,
    },
];

/// Match an identity reply against the known-device table.
pub fn detect_device(reply: &IdentityReply) -> Option<DeviceDescriptor> {
    let id = reply.manufacturer.hex();
    DEVICES
        .iter()
        .find(|rule| rule.manufacturer_id == id && rule.family == reply.family && rule.model == reply.model)
        .map(|rule| DeviceDescriptor {
            manufacturer: rule.manufacturer.to_string(),
            name: rule.name.to_string(),
            version: rule.report_version.then(|| reply.version.clone()),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply(raw: &[u8]) -> IdentityReply {
        IdentityReply::parse(raw).unwrap()
    }

    #[test]
    fn test_manufacturer_name() {
        assert_eq!(manufacturer_name("41"), Some("Roland"));
        assert_eq!(manufacturer_name("00 20 6B"), Some("Arturia"));
        assert_eq!(manufacturer_name("3E"), Some("Waldorf Electronics GmbH"));
        assert_eq!(manufacturer_name("00 7F 7F"), None);
    }

    #[test]
    fn test_detect_blofeld_without_version() {
        let device = detect_device(&reply(&[
            0xF0, 0x7E, 0x00, 0x06, 0x02, 0x3E, 0x13, 0x00, 0x00, 0x00, 0x31, 0x2E, 0x32, 0x34, 0xF7,
        ]))
        .unwrap();
        assert_eq!(device.manufacturer, "Waldorf");
        assert_eq!(device.name, "Blofeld");
        assert_eq!(device.version, None);
        assert_eq!(device.to_string(), "Waldorf Blofeld");
    }

    #[test]
    fn test_detect_minibrute() {
        let device = detect_device(&reply(&[
            0xF0, 0x7E, 0x01, 0x06, 0x02, 0x00, 0x20, 0x6B, 0x04, 0x00, 0x01, 0x01, 0x01, 0x00, 0x03, 0x02, 0xF7,
        ]))
        .unwrap();
        assert_eq!(device.to_string(), "Arturia MiniBrute SE (firmware 1.0.3.2)");
    }

    #[test]
    fn test_known_manufacturer_other_model_is_not_a_device() {
        let other = reply(&[
            0xF0, 0x7E, 0x00, 0x06, 0x02, 0x00, 0x20, 0x6B, 0x04, 0x00, 0x02, 0x05, 0x01, 0x00, 0x00, 0x00, 0xF7,
        ]);
        assert_eq!(other.manufacturer_name(), "Arturia");
        assert_eq!(detect_device(&other), None);
    }
}
