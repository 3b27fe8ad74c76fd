//! Message kind classification from the status byte.

use std::fmt;

/// System Common and Realtime messages (status `0xF1`..=`0xFF`, minus the gaps).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemKind {
    MtcQuarterFrame,
    SongPositionPointer,
    SongSelect,
    TuneRequest,
    Clock,
    Tick,
    Start,
    Continue,
    Stop,
    ActiveSense,
    Reset,
}

impl SystemKind {
    pub fn from_status(status: u8) -> Option<Self> {
        match status {
            0xF1 => Some(SystemKind::MtcQuarterFrame),
            0xF2 => Some(SystemKind::SongPositionPointer),
            0xF3 => Some(SystemKind::SongSelect),
            0xF6 => Some(SystemKind::TuneRequest),
            0xF8 => Some(SystemKind::Clock),
            0xF9 => Some(SystemKind::Tick),
            0xFA => Some(SystemKind::Start),
            0xFB => Some(SystemKind::Continue),
            0xFC => Some(SystemKind::Stop),
            0xFE => Some(SystemKind::ActiveSense),
            0xFF => Some(SystemKind::Reset),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SystemKind::MtcQuarterFrame => "MTC Quarter Frame",
            SystemKind::SongPositionPointer => "Song Position Pointer",
            SystemKind::SongSelect => "Song Select",
            SystemKind::TuneRequest => "Tune Request",
            SystemKind::Clock => "MIDI Clock",
            SystemKind::Tick => "MIDI Tick",
            SystemKind::Start => "MIDI Start",
            SystemKind::Continue => "MIDI Continue",
            SystemKind::Stop => "MIDI Stop",
            SystemKind::ActiveSense => "Active Sense",
            SystemKind::Reset => "Reset",
        }
    }
}

/// What a raw message is, as far as its status byte tells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    NoteOff,
    NoteOn,
    Aftertouch,
    Controller,
    ProgramChange,
    ChannelPressure,
    PitchWheel,
    SystemExclusive,
    System(SystemKind),
    Unknown,
}

impl MessageKind {
    /// Classify a status byte. Channel voice kinds come from the high nibble,
    /// `0xF_` kinds from the whole byte.
    pub fn from_status(status: u8) -> Self {
        match status >> 4 {
            0x8 => MessageKind::NoteOff,
            0x9 => MessageKind::NoteOn,
            0xA => MessageKind::Aftertouch,
            0xB => MessageKind::Controller,
            0xC => MessageKind::ProgramChange,
            0xD => MessageKind::ChannelPressure,
            0xE => MessageKind::PitchWheel,
            0xF if status == 0xF0 => MessageKind::SystemExclusive,
            0xF => SystemKind::from_status(status)
                .map(MessageKind::System)
                .unwrap_or(MessageKind::Unknown),
            _ => MessageKind::Unknown,
        }
    }

    /// True for the seven kinds that carry a channel in the low nibble.
    pub fn is_channel_voice(self) -> bool {
        !matches!(
            self,
            MessageKind::SystemExclusive | MessageKind::System(_) | MessageKind::Unknown
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            MessageKind::NoteOff => "Note Off",
            MessageKind::NoteOn => "Note On",
            MessageKind::Aftertouch => "Aftertouch",
            MessageKind::Controller => "Controller",
            MessageKind::ProgramChange => "Program Change",
            MessageKind::ChannelPressure => "Channel Pressure",
            MessageKind::PitchWheel => "Pitch Wheel",
            MessageKind::SystemExclusive => "System Exclusive",
            MessageKind::System(kind) => kind.name(),
            MessageKind::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Classify a raw message by its first byte. An empty message is `Unknown`.
pub fn classify(raw: &[u8]) -> MessageKind {
    raw.first()
        .map(|&status| MessageKind::from_status(status))
        .unwrap_or(MessageKind::Unknown)
}

/// 1-indexed channel of a status byte (`(status & 0xF) + 1`).
pub fn channel_of(status: u8) -> u8 {
    (status & 0x0F) + 1
}

/// SysEx framing check on a status byte: start (`F0`) or end/continuation (`F7`).
pub fn is_sysex_message(status: u8) -> bool {
    status == 0xF0 || status == 0xF7
}
