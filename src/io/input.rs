use midi_console::{Error, Result};
use std::io::{stdin, stdout, Write};

/// Select a MIDI input port. First tries a port whose name contains
/// `input_port_name_substr` (when non-empty). If nothing matches and there are
/// several ports, prompts the user to choose one.
pub fn choose_input_port(midi_in: &midir::MidiInput, input_port_name_substr: &str) -> Result<usize> {
    let ports = midi_in.ports();
    if ports.is_empty() {
        return Err(Error::NoPort("input"));
    }

    if !input_port_name_substr.is_empty() {
        for (i, p) in ports.iter().enumerate() {
            if let Ok(name) = midi_in.port_name(p) {
                if name.contains(input_port_name_substr) {
                    tracing::info!("Choosing input port matching '{}': {}", input_port_name_substr, name);
                    return Ok(i);
                }
            }
        }
        tracing::warn!("No input port matches '{}'", input_port_name_substr);
    }

    if ports.len() == 1 {
        tracing::info!("Choosing the only available input port: {}", midi_in.port_name(&ports[0])?);
        return Ok(0);
    }

    println!("\nAvailable input ports:");
    for (i, p) in ports.iter().enumerate() {
        println!("{}: {}", i, midi_in.port_name(p)?);
    }

    print!("Please select input port: ");
    stdout().flush()?;
    let mut choice = String::new();
    stdin().read_line(&mut choice)?;
    match choice.trim().parse::<usize>() {
        Ok(idx) if idx < ports.len() => Ok(idx),
        _ => Err(Error::InvalidSelection("input")),
    }
}
