use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::channel;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use std::thread;
use std::time::Duration;

use midi_console::config::DEFAULT_CONFIG_PATH;
use midi_console::{Config, DeviceDescriptor, Result};
use midir::{Ignore, MidiInput, MidiOutput};
use tracing_subscriber::EnvFilter;

mod general {
    pub mod dummy;
    pub mod log_view;
    pub mod monitor;
    pub mod player;
    pub mod sender;
    pub mod stdin_handler;
}
mod io {
    pub mod input;
    pub mod output;
    pub mod syx;
    pub mod watcher;
}

use general::log_view::{log, parse_kinds, print_connections_active, set_filter_kinds, LogKind, SHOW_TIMESTAMPS};

pub static EXIT_FLAG: AtomicBool = AtomicBool::new(false);
pub static SAFE_MODE: AtomicBool = AtomicBool::new(true);
pub static SHOW_RAW: AtomicBool = AtomicBool::new(false);

/// Last device recognised from an identity reply.
pub static DETECTED_DEVICE: Mutex<Option<DeviceDescriptor>> = Mutex::new(None);
pub static LAST_SYSEX: Mutex<Option<Vec<u8>>> = Mutex::new(None);

/// Lock a console slot, taking the value over from a thread that panicked
/// while holding it.
pub fn lock_slot<T>(slot: &Mutex<T>) -> MutexGuard<'_, T> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

static CONFIG: OnceLock<Config> = OnceLock::new();

pub fn get_config() -> &'static Config {
    CONFIG.get_or_init(Config::default)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    match run() {
        Ok(_) => (),
        Err(err) => {
            tracing::error!("{}", err);
            log(LogKind::Error, &format!("Error: {}", err));
        }
    }
}

fn run() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load(&config_path)?;
    let config = CONFIG.get_or_init(|| config);
    SAFE_MODE.store(config.console.safe_mode, Ordering::SeqCst);
    SHOW_RAW.store(config.console.show_raw, Ordering::SeqCst);
    SHOW_TIMESTAMPS.store(config.console.show_timestamps, Ordering::SeqCst);
    match parse_kinds(config.console.filter.iter().map(String::as_str)) {
        Ok(kinds) => set_filter_kinds(kinds),
        Err(label) => tracing::warn!("Ignoring console.filter, unknown log kind '{}'", label),
    }

    let mut midi_in = MidiInput::new("midi-console input")?;
    midi_in.ignore(Ignore::None);
    let midi_out = MidiOutput::new("midi-console output")?;

    let in_ports = midi_in.ports();
    let in_idx = io::input::choose_input_port(&midi_in, &config.midi.input_port)?;
    let in_port = &in_ports[in_idx];
    let in_port_name = midi_in.port_name(in_port)?;

    let out_ports = midi_out.ports();
    let out_idx = io::output::choose_output_port(&midi_out, &config.midi.output_port, &in_port_name)?;
    let out_port = &out_ports[out_idx];
    let out_port_name = midi_out.port_name(out_port)?;

    let conn_out = midi_out.connect(out_port, "midi-console-output")?;
    let (tx, rx) = channel::<Vec<u8>>();
    let sender_handle = general::sender::spawn_sender(conn_out, rx);

    let conn_in = midi_in.connect(
        in_port,
        "midi-console-input",
        move |stamp, message, _| general::monitor::handle_incoming(stamp, message),
        (),
    )?;
    tracing::info!("Input '{}' open, output '{}' open", in_port_name, out_port_name);
    print_connections_active(&in_port_name, &out_port_name);

    let watcher_handle = config
        .console
        .watch_ports
        .then(|| io::watcher::spawn_port_watcher(in_port_name.clone(), out_port_name.clone()));
    let stdin_handle = general::stdin_handler::spawn_stdin_handler(tx);

    while !EXIT_FLAG.load(Ordering::SeqCst) {
        thread::sleep(Duration::from_millis(100));
    }

    println!("Closing connections and exiting...");
    drop(conn_in);
    let _ = stdin_handle.join();
    if let Some(handle) = watcher_handle {
        let _ = handle.join();
    }
    // Last sender clone is gone once the stdin handler and any player have finished.
    let _ = sender_handle.join();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_lock_slot_recovers_poisoned_mutex() {
        let slot = Arc::new(Mutex::new(Some(vec![0xF0, 0xF7])));
        let poisoner = Arc::clone(&slot);
        let _ = thread::spawn(move || {
            let _guard = poisoner.lock().unwrap();
            panic!("poison the slot");
        })
        .join();
        assert!(slot.is_poisoned());

        *lock_slot(&slot) = Some(vec![0xF0, 0x41, 0xF7]);
        assert_eq!(lock_slot(&slot).clone(), Some(vec![0xF0, 0x41, 0xF7]));
    }
}
