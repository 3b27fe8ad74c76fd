use midi_console::{bytes_to_hex, encode, Error, Outgoing, Result, SYSEX_IDENTITY_REQUEST};
use std::io::{stdin, stdout, BufRead, Write};
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::mpsc::Sender;
use std::thread;

use super::dummy;
use super::log_view::{log, log_unfiltered, parse_kinds, set_filter_kinds, set_search, LogKind, SHOW_TIMESTAMPS};
use super::player::spawn_player;
use crate::io::syx::{load_syx, save_syx};

#[derive(Debug, PartialEq)]
pub enum Command {
    Exit,
    Help,
    /// `send` with no argument sends the last loaded file.
    Send(Option<String>),
    Identity,
    Panic,
    Lick,
    Load(PathBuf),
    Save(PathBuf),
    SafeMode(bool),
    ShowRaw(bool),
    Timestamps(bool),
    /// Empty shows every kind.
    Filter(Vec<LogKind>),
    /// Empty clears the search.
    Search(String),
    Dummy(bool),
    Device,
    Unrecognized(String),
}

fn parse_switch(arg: &str) -> Option<bool> {
    match arg.to_ascii_lowercase().as_str() {
        "on" | "enable" | "1" => Some(true),
        "off" | "disable" | "0" => Some(false),
        _ => None,
    }
}

pub fn parse_command(line: &str) -> Command {
    let cmd = line.trim();
    let (word, rest) = match cmd.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (cmd, ""),
    };
    match word.to_ascii_lowercase().as_str() {
        "" | "exit" | "quit" | "q" => Command::Exit,
        "help" | "h" => Command::Help,
        "send" | "s" if rest.is_empty() => Command::Send(None),
        "send" | "s" => Command::Send(Some(rest.to_string())),
        "identity" | "id" => Command::Identity,
        "panic" => Command::Panic,
        "lick" => Command::Lick,
        "load" if !rest.is_empty() => Command::Load(PathBuf::from(rest)),
        "save" if !rest.is_empty() => Command::Save(PathBuf::from(rest)),
        "safe" => parse_switch(rest)
            .map(Command::SafeMode)
            .unwrap_or_else(|| Command::Unrecognized(cmd.to_string())),
        "raw" => parse_switch(rest)
            .map(Command::ShowRaw)
            .unwrap_or_else(|| Command::Unrecognized(cmd.to_string())),
        "time" => parse_switch(rest)
            .map(Command::Timestamps)
            .unwrap_or_else(|| Command::Unrecognized(cmd.to_string())),
        "filter" => parse_kinds(rest.split_whitespace())
            .map(Command::Filter)
            .unwrap_or_else(|_| Command::Unrecognized(cmd.to_string())),
        "search" => Command::Search(rest.to_string()),
        "dummy" => parse_switch(rest)
            .map(Command::Dummy)
            .unwrap_or_else(|| Command::Unrecognized(cmd.to_string())),
        "device" => Command::Device,
        _ => Command::Unrecognized(cmd.to_string()),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  send <hex>       - Send hex bytes, e.g. 'send 90 3C 7F'");
    println!("  send             - Send the last loaded .syx file");
    println!("  identity/id      - Send a Universal Device Inquiry");
    println!("  panic            - All Notes Off on all channels");
    println!("  lick             - Play a short phrase on channel 1");
    println!("  load <path>      - Load a .syx file for sending");
    println!("  save <path>      - Save the last received SysEx message");
    println!("  safe on/off      - Confirm before sending SysEx");
    println!("  raw on/off       - Show raw hex next to decoded messages");
    println!("  time on/off      - Show timestamps (UTC)");
    println!("  filter <kinds>   - Only show these kinds, e.g. 'filter midi sysex'");
    println!("  filter           - Show all kinds");
    println!("  search <text>    - Only show lines containing text, 'search' alone clears");
    println!("  dummy on/off     - Generate random incoming messages");
    println!("  device           - Show the detected device");
    println!("  help/h           - Show this help");
    println!("  exit/quit/q      - Exit program");
}

/// Yes only for an explicit `y`/`yes`.
fn confirm(lines: &mut impl Iterator<Item = std::io::Result<String>>) -> bool {
    print!("Safe Mode is enabled, are you sure you want to send the SysEx message? [y/N] ");
    let _ = stdout().flush();
    match lines.next() {
        Some(Ok(answer)) => matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        _ => false,
    }
}

fn send(
    tx: &Sender<Vec<u8>>,
    message: Outgoing<'_>,
    lines: &mut impl Iterator<Item = std::io::Result<String>>,
) -> Result<()> {
    let encoded = encode(message)?;
    if encoded.bytes.is_empty() {
        log(LogKind::Warning, "Nothing to send");
        return Ok(());
    }
    if encoded.is_sysex && crate::SAFE_MODE.load(Ordering::SeqCst) {
        log(LogKind::Warning, "Safe mode enabled, confirming intent to send message");
        if !confirm(lines) {
            log(LogKind::Warning, "Message sending cancelled");
            return Ok(());
        }
    }
    log(LogKind::Debug, &format!("Sending: {}", encoded.hex()));
    tx.send(encoded.bytes)
        .map_err(|_| Error::MidiSend("sender thread stopped".to_string()))
}

/// Spawn a thread that reads console commands from stdin. Empty line or
/// 'exit' sets the global `EXIT_FLAG`.
pub fn spawn_stdin_handler(tx: Sender<Vec<u8>>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let stdin = stdin();
        let mut lines = stdin.lock().lines();
        let mut loaded: Option<Vec<u8>> = None;

        while let Some(Ok(line)) = lines.next() {
            let result = match parse_command(&line) {
                Command::Exit => break,
                Command::Help => {
                    print_help();
                    Ok(())
                }
                Command::Send(Some(text)) => send(&tx, Outgoing::Text(&text), &mut lines),
                Command::Send(None) => match loaded.as_deref() {
                    Some(bytes) => send(&tx, Outgoing::Bytes(bytes), &mut lines),
                    None => {
                        log(LogKind::Warning, "No message loaded, use 'send <hex>' or 'load <path>'");
                        Ok(())
                    }
                },
                Command::Identity => send(&tx, Outgoing::Bytes(&SYSEX_IDENTITY_REQUEST), &mut lines).map(|_| {
                    log(LogKind::Info, "Sent Identity Request");
                }),
                Command::Panic => {
                    let result = midi_console::codec::encode::all_notes_off()
                        .iter()
                        .try_for_each(|msg| send(&tx, Outgoing::Bytes(msg), &mut lines));
                    if result.is_ok() {
                        log(LogKind::Info, "Sent All Notes Off on all channels");
                    }
                    result
                }
                Command::Lick => {
                    let config = crate::get_config();
                    if spawn_player(tx.clone(), config.player.tempo, config.player.velocity).is_none() {
                        log(LogKind::Warning, "Already playing");
                    }
                    Ok(())
                }
                Command::Load(path) => load_syx(&path).map(|bytes| {
                    log(LogKind::Info, &format!("Loaded file: {}", path.display()));
                    log(LogKind::Comment, &bytes_to_hex(&bytes));
                    loaded = Some(bytes);
                }),
                Command::Save(path) => {
                    let last = crate::lock_slot(&crate::LAST_SYSEX).clone();
                    match last {
                        Some(bytes) => save_syx(&path, &bytes).map(|_| {
                            log(LogKind::Info, &format!("Message saved as {}", path.display()));
                        }),
                        None => {
                            log(LogKind::Warning, "No SysEx message received yet");
                            Ok(())
                        }
                    }
                }
                Command::SafeMode(on) => {
                    crate::SAFE_MODE.store(on, Ordering::SeqCst);
                    log(LogKind::Info, if on { "Safe mode enabled" } else { "Safe mode disabled" });
                    Ok(())
                }
                Command::ShowRaw(on) => {
                    crate::SHOW_RAW.store(on, Ordering::SeqCst);
                    log(LogKind::Info, if on { "Raw bytes shown" } else { "Raw bytes hidden" });
                    Ok(())
                }
                Command::Timestamps(on) => {
                    SHOW_TIMESTAMPS.store(on, Ordering::SeqCst);
                    log(LogKind::Info, if on { "Timestamps shown" } else { "Timestamps hidden" });
                    Ok(())
                }
                Command::Filter(kinds) => {
                    let message = if kinds.is_empty() {
                        "Filter cleared, showing all kinds".to_string()
                    } else {
                        let labels: Vec<_> = kinds.iter().map(|k| k.label()).collect();
                        format!("Showing only: {}", labels.join(", "))
                    };
                    set_filter_kinds(kinds);
                    log_unfiltered(LogKind::Info, &message);
                    Ok(())
                }
                Command::Search(text) => {
                    set_search(&text);
                    if text.is_empty() {
                        log_unfiltered(LogKind::Info, "Search cleared");
                    } else {
                        log_unfiltered(LogKind::Info, &format!("Showing lines containing '{}'", text));
                    }
                    Ok(())
                }
                Command::Dummy(true) => {
                    if dummy::start() {
                        log(LogKind::Info, "Dummy data started");
                    } else {
                        log(LogKind::Warning, "Dummy data already running");
                    }
                    Ok(())
                }
                Command::Dummy(false) => {
                    if dummy::stop() {
                        log(LogKind::Info, "Dummy data stopped");
                    } else {
                        log(LogKind::Warning, "Dummy data is not running");
                    }
                    Ok(())
                }
                Command::Device => {
                    match crate::lock_slot(&crate::DETECTED_DEVICE).clone() {
                        Some(device) => log(LogKind::Info, &format!("Detected device: {}", device)),
                        None => log(LogKind::Info, "No device detected, try 'identity'"),
                    }
                    Ok(())
                }
                Command::Unrecognized(cmd) => {
                    log(
                        LogKind::Warning,
                        &format!("Unrecognized command: '{}'. Type 'help' for available commands.", cmd),
                    );
                    Ok(())
                }
            };

            if let Err(err) = result {
                log(LogKind::Error, &err.to_string());
            }
        }

        crate::EXIT_FLAG.store(true, Ordering::SeqCst);
    })
}
