//! Random inbound traffic for trying the console without a device attached.

use rand::Rng;
use std::ops::RangeInclusive;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use super::monitor::handle_incoming;

const DELAY_MS: RangeInclusive<u64> = 500..=2500;
const SYSEX_DATA_LEN: RangeInclusive<usize> = 5..=24;
const TICK: Duration = Duration::from_millis(50);

static RUNNING: AtomicBool = AtomicBool::new(false);
// Bumped on every start and stop so a stopped generator never resumes.
static GENERATION: AtomicU64 = AtomicU64::new(0);

/// One random frame: a 3-byte message on a random status nibble and channel,
/// or a SysEx frame with 5 to 24 data bytes.
pub fn dummy_message<R: Rng>(rng: &mut R) -> Vec<u8> {
    if rng.gen_bool(0.5) {
        let status: u8 = rng.gen_range(0x8..=0xF);
        let channel: u8 = rng.gen_range(0..16);
        vec![(status << 4) | channel, rng.gen_range(0..128), rng.gen_range(0..128)]
    } else {
        let len = rng.gen_range(SYSEX_DATA_LEN);
        let mut message = Vec::with_capacity(len + 2);
        message.push(0xF0);
        message.extend((0..len).map(|_| rng.gen_range(0..128u8)));
        message.push(0xF7);
        message
    }
}

/// Start feeding random messages through the inbound path. Returns `false`
/// if the generator is already running.
pub fn start() -> bool {
    if RUNNING.swap(true, Ordering::SeqCst) {
        return false;
    }
    let generation = GENERATION.fetch_add(1, Ordering::SeqCst) + 1;
    tracing::debug!(generation, "Dummy data started");

    thread::spawn(move || {
        let mut rng = rand::thread_rng();
        while current(generation) {
            handle_incoming(0, &dummy_message(&mut rng));
            let delay = Duration::from_millis(rng.gen_range(DELAY_MS));
            let until = Instant::now() + delay;
            while current(generation) && Instant::now() < until {
                thread::sleep(TICK);
            }
        }
    });
    true
}

/// Returns `false` if the generator was not running.
pub fn stop() -> bool {
    if !RUNNING.swap(false, Ordering::SeqCst) {
        return false;
    }
    GENERATION.fetch_add(1, Ordering::SeqCst);
    true
}

fn current(generation: u64) -> bool {
    GENERATION.load(Ordering::SeqCst) == generation && !crate::EXIT_FLAG.load(Ordering::SeqCst)
}
