//! Scripted phrase playback through the sender channel.

use midi_console::codec::encode::{all_notes_off, note_off, note_on};
use midi_console::note_name;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use super::log_view::{log, LogKind};

// D E F G E C D
const LICK_NOTES: [u8; 7] = [62, 64, 65, 67, 64, 60, 62];
const LICK_BEATS: [f64; 7] = [0.5, 0.5, 0.5, 0.5, 1.0, 0.5, 1.0];

/// Note off goes out this long before the note's slot ends.
const NOTE_OFF_LEAD: Duration = Duration::from_millis(10);
const ALL_NOTES_OFF_DELAY: Duration = Duration::from_millis(100);

static PLAYING: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduledMessage {
    /// Offset from the start of playback.
    pub at: Duration,
    pub bytes: Vec<u8>,
}

/// The phrase as timed messages, ordered by offset, ending with All Notes Off.
pub fn lick_schedule(tempo: u32, velocity: u8) -> Vec<ScheduledMessage> {
    let quarter = Duration::from_secs_f64(60.0 / tempo.max(1) as f64);
    let mut schedule = Vec::with_capacity(LICK_NOTES.len() * 2 + 32);
    let mut at = Duration::ZERO;

    for (&note, &beats) in LICK_NOTES.iter().zip(LICK_BEATS.iter()) {
        let length = quarter.mul_f64(beats);
        schedule.push(ScheduledMessage {
            at,
            bytes: note_on(0, note, velocity).to_vec(),
        });
        schedule.push(ScheduledMessage {
            at: (at + length).saturating_sub(NOTE_OFF_LEAD).max(at),
            bytes: note_off(0, note).to_vec(),
        });
        at += length;
    }

    let end = at + ALL_NOTES_OFF_DELAY;
    schedule.extend(all_notes_off().into_iter().map(|bytes| ScheduledMessage {
        at: end,
        bytes: bytes.to_vec(),
    }));
    schedule
}

/// Play the phrase on a background thread. Returns `None` if one is already playing.
pub fn spawn_player(tx: Sender<Vec<u8>>, tempo: u32, velocity: u8) -> Option<thread::JoinHandle<()>> {
    if PLAYING.swap(true, Ordering::SeqCst) {
        return None;
    }
    let schedule = lick_schedule(tempo, velocity);
    tracing::debug!("Playing {} scheduled messages at {} BPM", schedule.len(), tempo);

    Some(thread::spawn(move || {
        if play(schedule, &tx) {
            log(LogKind::Info, "Sent All Notes Off on all channels");
        }
        PLAYING.store(false, Ordering::SeqCst);
    }))
}

/// Send each message at its offset. Returns `false` if playback stopped early.
fn play(schedule: Vec<ScheduledMessage>, tx: &Sender<Vec<u8>>) -> bool {
    let start = Instant::now();
    for message in schedule {
        if crate::EXIT_FLAG.load(Ordering::SeqCst) {
            return false;
        }
        if let Some(wait) = message.at.checked_sub(start.elapsed()) {
            thread::sleep(wait);
        }
        describe_note(&message.bytes);
        if tx.send(message.bytes).is_err() {
            tracing::warn!("Sender thread gone, stopping playback");
            return false;
        }
    }
    true
}

fn describe_note(bytes: &[u8]) {
    match bytes {
        [status, note, _] if status & 0xF0 == 0x90 => {
            log(LogKind::Debug, &format!("Note On: {} ({})", note, note_name(*note)))
        }
        [status, note, _] if status & 0xF0 == 0x80 => {
            log(LogKind::Debug, &format!("Note Off: {} ({})", note, note_name(*note)))
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_timing_at_120_bpm() {
        let schedule = lick_schedule(120, 100);
        assert_eq!(schedule.len(), 7 * 2 + 32);

        assert_eq!(schedule[0], ScheduledMessage { at: Duration::ZERO, bytes: vec![0x90, 62, 100] });
        assert_eq!(
            schedule[1],
            ScheduledMessage {
                at: Duration::from_millis(240),
                bytes: vec![0x80, 62, 0]
            }
        );
        assert_eq!(schedule[2].at, Duration::from_millis(250));
        // fifth note is a quarter note
        assert_eq!(schedule[8].at, Duration::from_millis(1000));
        assert_eq!(schedule[9].at, Duration::from_millis(1490));

        let last = schedule.last().unwrap();
        assert_eq!(last.at, Duration::from_millis(2350));
        assert_eq!(last.bytes, vec![0xBF, 120, 0]);
    }

    #[test]
    fn test_schedule_is_ordered() {
        let schedule = lick_schedule(140, 127);
        assert!(schedule.windows(2).all(|w| w[0].at <= w[1].at));
        let notes: Vec<u8> = schedule
            .iter()
            .filter(|m| m.bytes[0] == 0x90)
            .map(|m| m.bytes[1])
            .collect();
        assert_eq!(notes, LICK_NOTES.to_vec());
    }

    #[test]
    fn test_play_sends_schedule_bytes_unchanged() {
        let schedule = vec![
            ScheduledMessage { at: Duration::ZERO, bytes: vec![0x90, 62, 100] },
            ScheduledMessage { at: Duration::from_millis(5), bytes: vec![0x80, 62, 0] },
            ScheduledMessage { at: Duration::from_millis(5), bytes: vec![0xB0, 123, 0] },
        ];
        let (tx, rx) = std::sync::mpsc::channel();
        assert!(play(schedule.clone(), &tx));
        drop(tx);
        let sent: Vec<Vec<u8>> = rx.iter().collect();
        assert_eq!(sent, schedule.into_iter().map(|m| m.bytes).collect::<Vec<_>>());
    }

    #[test]
    fn test_play_stops_when_sender_is_gone() {
        let (tx, rx) = std::sync::mpsc::channel();
        drop(rx);
        let schedule = vec![ScheduledMessage { at: Duration::ZERO, bytes: vec![0x90, 60, 1] }];
        assert!(!play(schedule, &tx));
    }

    #[test]
    fn test_zero_tempo_does_not_panic() {
        assert_eq!(lick_schedule(0, 127).len(), 46);
    }
}
