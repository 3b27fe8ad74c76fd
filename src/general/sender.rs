use std::sync::mpsc::Receiver;
use std::thread;

use super::log_view::{log, LogKind};

/// Spawn the thread that owns `conn_out` and transmits every message received
/// on `rx`. The thread exits once all senders are dropped.
pub fn spawn_sender(mut conn_out: midir::MidiOutputConnection, rx: Receiver<Vec<u8>>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        for msg in rx {
            if msg.is_empty() {
                continue;
            }
            if let Err(err) = conn_out.send(&msg) {
                tracing::error!("Error sending MIDI message: {}", err);
                log(LogKind::Error, &format!("Error sending MIDI message: {}", err));
            }
        }
        tracing::debug!("Sender thread stopped");
    })
}
