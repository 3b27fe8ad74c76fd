//! Polls the port lists and reports devices being plugged in or removed.

use midi_console::Result;
use midir::{MidiIO, MidiInput, MidiOutput};
use std::sync::atomic::Ordering;
use std::thread;
use std::time::Duration;

use crate::general::log_view::{log, LogKind};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[derive(Debug, Default, PartialEq)]
pub struct PortChanges {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

pub fn diff_ports(before: &[String], after: &[String]) -> PortChanges {
    PortChanges {
        added: after.iter().filter(|name| !before.contains(*name)).cloned().collect(),
        removed: before.iter().filter(|name| !after.contains(*name)).cloned().collect(),
    }
}

/// Log lines for one direction (`"input"` or `"output"`), and whether the
/// port the console has open was among the removed ones.
pub fn describe_changes(direction: &str, changes: &PortChanges, selected: &str) -> (Vec<(LogKind, String)>, bool) {
    let mut lines = Vec::new();
    let mut selected_lost = false;
    for name in &changes.removed {
        lines.push((LogKind::Warning, format!("MIDI {} device disconnected: {}", direction, name)));
        selected_lost |= name == selected;
    }
    for name in &changes.added {
        lines.push((LogKind::Success, format!("MIDI {} device connected: {}", direction, name)));
    }
    (lines, selected_lost)
}

fn port_names<T: MidiIO>(client: &T) -> Vec<String> {
    client
        .ports()
        .iter()
        .filter_map(|port| client.port_name(port).ok())
        .collect()
}

fn open_clients() -> Result<(MidiInput, MidiOutput)> {
    let midi_in = MidiInput::new("midi-console watcher")?;
    let midi_out = MidiOutput::new("midi-console watcher")?;
    Ok((midi_in, midi_out))
}

/// Spawn the watcher. A removed input or output that the console has open
/// clears the detected device; reconnecting to it needs a restart.
pub fn spawn_port_watcher(in_port_name: String, out_port_name: String) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let (midi_in, midi_out) = match open_clients() {
            Ok(clients) => clients,
            Err(err) => {
                tracing::warn!("Port watcher disabled: {}", err);
                return;
            }
        };
        let mut inputs = port_names(&midi_in);
        let mut outputs = port_names(&midi_out);
        tracing::debug!(inputs = inputs.len(), outputs = outputs.len(), "Watching MIDI ports");

        while !crate::EXIT_FLAG.load(Ordering::SeqCst) {
            thread::sleep(POLL_INTERVAL);

            let now_inputs = port_names(&midi_in);
            let now_outputs = port_names(&midi_out);
            let (mut lines, input_lost) = describe_changes("input", &diff_ports(&inputs, &now_inputs), &in_port_name);
            let (out_lines, output_lost) =
                describe_changes("output", &diff_ports(&outputs, &now_outputs), &out_port_name);
            lines.extend(out_lines);

            for (kind, line) in &lines {
                log(*kind, line);
            }
            if input_lost || output_lost {
                *crate::lock_slot(&crate::DETECTED_DEVICE) = None;
                log(LogKind::Info, "Detected device data cleared");
            }
            inputs = now_inputs;
            outputs = now_outputs;
        }
    })
}
