use midi_console::{Error, Result};
use std::io::{stdin, stdout, Write};

/// Select a MIDI output port. Prefers a port whose name contains
/// `output_port_name_substr` and is not identical to `in_port_name`. Falls back
/// to the only port, then to an interactive prompt.
pub fn choose_output_port(midi_out: &midir::MidiOutput, output_port_name_substr: &str, in_port_name: &str) -> Result<usize> {
    let ports = midi_out.ports();
    if ports.is_empty() {
        return Err(Error::NoPort("output"));
    }

    if !output_port_name_substr.is_empty() {
        for (i, p) in ports.iter().enumerate() {
            if let Ok(name) = midi_out.port_name(p) {
                if name.contains(output_port_name_substr) && name != in_port_name {
                    tracing::info!("Choosing output port matching '{}': {}", output_port_name_substr, name);
                    return Ok(i);
                }
            }
        }
        tracing::warn!("No output port matches '{}'", output_port_name_substr);
    }

    if ports.len() == 1 {
        tracing::info!("Choosing the only available output port: {}", midi_out.port_name(&ports[0])?);
        return Ok(0);
    }

    println!("\nAvailable output ports:");
    for (i, p) in ports.iter().enumerate() {
        println!("{}: {}", i, midi_out.port_name(p)?);
    }

    print!("Please select output port: ");
    stdout().flush()?;
    let mut choice = String::new();
    stdin().read_line(&mut choice)?;
    match choice.trim().parse::<usize>() {
        Ok(idx) if idx < ports.len() => Ok(idx),
        _ => Err(Error::InvalidSelection("output")),
    }
}
