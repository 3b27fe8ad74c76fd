//! Inbound message handling for the input connection callback.

use midi_console::{bytes_to_hex, decode, is_sysex_message, DeviceDescriptor, IdentityReply};
use std::sync::atomic::Ordering;

use super::log_view::{log, LogKind};

/// What the console should show and remember for one inbound message.
#[derive(Debug, Default, PartialEq)]
pub struct Incoming {
    pub lines: Vec<(LogKind, String)>,
    pub device: Option<DeviceDescriptor>,
    /// Raw bytes worth keeping for `save`.
    pub sysex: Option<Vec<u8>>,
}

/// Decode `raw` into log lines. Active Sense yields nothing when ignored.
pub fn describe(raw: &[u8], ignore_active_sense: bool, show_raw: bool) -> Incoming {
    let mut incoming = Incoming::default();
    let Some(&status) = raw.first() else {
        return incoming;
    };
    if ignore_active_sense && status == 0xFE {
        return incoming;
    }

    let sysex = is_sysex_message(status);
    let kind = if sysex { LogKind::Sysex } else { LogKind::Midi };
    let mut line = decode(raw).to_string();
    if show_raw {
        line.push_str(&format!(" [{}]", bytes_to_hex(raw)));
    }
    incoming.lines.push((kind, line));

    if sysex {
        incoming.sysex = Some(raw.to_vec());
    }

    if let Some(reply) = IdentityReply::parse(raw) {
        if let Some(device) = reply.device() {
            incoming.lines.push((LogKind::Debug, format!("{} {} detected", device.manufacturer, device.name)));
            incoming.device = Some(device);
        }
        incoming.lines.push((LogKind::Success, reply.to_string()));
    }

    incoming
}

/// Input callback body: print, and update the console's device and SysEx slots.
pub fn handle_incoming(stamp: u64, raw: &[u8]) {
    let config = crate::get_config();
    let incoming = describe(
        raw,
        config.console.ignore_active_sense,
        crate::SHOW_RAW.load(Ordering::Relaxed),
    );
    tracing::trace!(stamp, len = raw.len(), "MIDI input");

    for (kind, line) in &incoming.lines {
        log(*kind, line);
    }
    if let Some(device) = incoming.device {
        *crate::lock_slot(&crate::DETECTED_DEVICE) = Some(device);
    }
    if let Some(sysex) = incoming.sysex {
        *crate::lock_slot(&crate::LAST_SYSEX) = Some(sysex);
    }
}
