//! Best-effort decoding of raw messages into [`MidiMessage`] records.
//!
//! Decoding never fails. Truncated messages decode to the variant their status
//! byte names, with the missing data fields set to `None`, so a console can
//! show whatever arrived on the wire.

use super::hex::{bytes_to_hex, clamp_range};
use super::kind::{channel_of, MessageKind, SystemKind};
use super::note::{controller_name, note_name};
use std::fmt;

/// Centre of the 14-bit pitch wheel range.
pub const PITCH_WHEEL_CENTER: i32 = 8192;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MidiMessage {
    NoteOff {
        channel: u8,
        note: Option<u8>,
        velocity: Option<u8>,
    },
    NoteOn {
        channel: u8,
        note: Option<u8>,
        velocity: Option<u8>,
    },
    Aftertouch {
        channel: u8,
        note: Option<u8>,
        pressure: Option<u8>,
    },
    Controller {
        channel: u8,
        controller: Option<u8>,
        value: Option<u8>,
    },
    ProgramChange {
        channel: u8,
        program: Option<u8>,
    },
    ChannelPressure {
        channel: u8,
        pressure: Option<u8>,
    },
    /// `value` is the signed offset from centre, -8192..=8191 for 7-bit
    /// data bytes. Bytes with the high bit set are combined unmasked.
    PitchWheel {
        channel: u8,
        value: Option<i32>,
    },
    /// `payload` is everything between the manufacturer byte and the final byte.
    SystemExclusive {
        manufacturer: Option<u8>,
        payload: Vec<u8>,
    },
    SystemCommon {
        kind: SystemKind,
        payload: Vec<u8>,
    },
    /// Unrecognised status; `raw` is the full message.
    Unknown {
        raw: Vec<u8>,
    },
}

/// Decode a raw message. See the module docs for the handling of short input.
pub fn decode(raw: &[u8]) -> MidiMessage {
    let Some((&status, data)) = raw.split_first() else {
        return MidiMessage::Unknown { raw: Vec::new() };
    };
    let channel = channel_of(status);
    let d0 = data.first().copied();
    let d1 = data.get(1).copied();

    match MessageKind::from_status(status) {
        MessageKind::NoteOff => MidiMessage::NoteOff {
            channel,
            note: d0,
            velocity: d1,
        },
        MessageKind::NoteOn => MidiMessage::NoteOn {
            channel,
            note: d0,
            velocity: d1,
        },
        MessageKind::Aftertouch => MidiMessage::Aftertouch {
            channel,
            note: d0,
            pressure: d1,
        },
        MessageKind::Controller => MidiMessage::Controller {
            channel,
            controller: d0,
            value: d1,
        },
        MessageKind::ProgramChange => MidiMessage::ProgramChange {
            channel,
            program: d0,
        },
        MessageKind::ChannelPressure => MidiMessage::ChannelPressure {
            channel,
            pressure: d0,
        },
        MessageKind::PitchWheel => MidiMessage::PitchWheel {
            channel,
            value: d0.zip(d1).map(|(lsb, msb)| pitch_wheel_value(lsb, msb)),
        },
        MessageKind::SystemExclusive => MidiMessage::SystemExclusive {
            manufacturer: d0,
            payload: data[clamp_range(data.len(), 1, data.len().saturating_sub(1))].to_vec(),
        },
        MessageKind::System(kind) => MidiMessage::SystemCommon {
            kind,
            payload: data.to_vec(),
        },
        MessageKind::Unknown => MidiMessage::Unknown { raw: raw.to_vec() },
    }
}

/// Combine LSB and MSB into a signed offset from [`PITCH_WHEEL_CENTER`].
pub fn pitch_wheel_value(lsb: u8, msb: u8) -> i32 {
    (i32::from(msb) << 7) + i32::from(lsb) - PITCH_WHEEL_CENTER
}

impl MidiMessage {
    pub fn kind(&self) -> MessageKind {
        match self {
            MidiMessage::NoteOff { .. } => MessageKind::NoteOff,
            MidiMessage::NoteOn { .. } => MessageKind::NoteOn,
            MidiMessage::Aftertouch { .. } => MessageKind::Aftertouch,
            MidiMessage::Controller { .. } => MessageKind::Controller,
            MidiMessage::ProgramChange { .. } => MessageKind::ProgramChange,
            MidiMessage::ChannelPressure { .. } => MessageKind::ChannelPressure,
            MidiMessage::PitchWheel { .. } => MessageKind::PitchWheel,
            MidiMessage::SystemExclusive { .. } => MessageKind::SystemExclusive,
            MidiMessage::SystemCommon { kind, .. } => MessageKind::System(*kind),
            MidiMessage::Unknown { .. } => MessageKind::Unknown,
        }
    }

    /// 1-indexed channel, `None` for system and unknown messages.
    pub fn channel(&self) -> Option<u8> {
        match self {
            MidiMessage::NoteOff { channel, .. }
            | MidiMessage::NoteOn { channel, .. }
            | MidiMessage::Aftertouch { channel, .. }
            | MidiMessage::Controller { channel, .. }
            | MidiMessage::ProgramChange { channel, .. }
            | MidiMessage::ChannelPressure { channel, .. }
            | MidiMessage::PitchWheel { channel, .. } => Some(*channel),
            _ => None,
        }
    }

    pub fn note_name(&self) -> Option<String> {
        match self {
            MidiMessage::NoteOff { note, .. }
            | MidiMessage::NoteOn { note, .. }
            | MidiMessage::Aftertouch { note, .. } => note.map(note_name),
            _ => None,
        }
    }

    /// Controller name, or `"Controller {n}"` for numbers without one.
    pub fn controller_type(&self) -> Option<String> {
        match self {
            MidiMessage::Controller {
                controller: Some(n),
                ..
            } => Some(controller_name(*n).into_owned()),
            _ => None,
        }
    }
}

impl fmt::Display for MidiMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type: {}", self.kind())?;
        if let Some(channel) = self.channel() {
            write!(f, ", Channel: {}", channel)?;
        }
        match self {
            MidiMessage::NoteOff { note, velocity, .. } | MidiMessage::NoteOn { note, velocity, .. } => {
                write_note(f, *note)?;
                write_field(f, "Velocity", *velocity)
            }
            MidiMessage::Aftertouch { note, pressure, .. } => {
                write_note(f, *note)?;
                write_field(f, "Pressure", *pressure)
            }
            MidiMessage::Controller { value, .. } => {
                write_field(f, "Controller", self.controller_type())?;
                write_field(f, "Value", *value)
            }
            MidiMessage::ProgramChange { program, .. } => write_field(f, "Program", *program),
            MidiMessage::ChannelPressure { pressure, .. } => write_field(f, "Pressure", *pressure),
            MidiMessage::PitchWheel { value, .. } => write_field(f, "Value", *value),
            MidiMessage::SystemExclusive { manufacturer, payload } => {
                write_field(f, "Manufacturer", manufacturer.map(|m| format!("{:02X}", m)))?;
                write!(f, ", Data: {}", bytes_to_hex(payload))
            }
            MidiMessage::SystemCommon { payload, .. } if payload.is_empty() => Ok(()),
            MidiMessage::SystemCommon { payload, .. } => write!(f, ", Data: {}", bytes_to_hex(payload)),
            MidiMessage::Unknown { raw } => write!(f, ", Data: {}", bytes_to_hex(raw)),
        }
    }
}

fn write_note(f: &mut fmt::Formatter<'_>, note: Option<u8>) -> fmt::Result {
    match note {
        Some(n) => write!(f, ", Note: {} ({})", note_name(n), n),
        None => Ok(()),
    }
}

fn write_field<T: fmt::Display>(f: &mut fmt::Formatter<'_>, label: &str, value: Option<T>) -> fmt::Result {
    match value {
        Some(v) => write!(f, ", {}: {}", label, v),
        None => Ok(()),
    }
}
