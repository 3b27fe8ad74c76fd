//! Error types for the MIDI console.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A text token could not be read as a byte `00`..`FF`.
    #[error("malformed hex token '{token}'")]
    MalformedHex { token: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("MIDI device error: {0}")]
    MidiDevice(String),

    #[error("MIDI port error: {0}")]
    MidiPort(String),

    #[error("MIDI send error: {0}")]
    MidiSend(String),

    #[error("no {0} port found")]
    NoPort(&'static str),

    #[error("invalid {0} port selected")]
    InvalidSelection(&'static str),
}

impl Error {
    pub(crate) fn malformed(token: &str) -> Self {
        Error::MalformedHex {
            token: token.to_string(),
        }
    }
}

impl From<midir::InitError> for Error {
    fn from(e: midir::InitError) -> Self {
        Error::MidiDevice(e.to_string())
    }
}

impl From<midir::PortInfoError> for Error {
    fn from(e: midir::PortInfoError) -> Self {
        Error::MidiPort(e.to_string())
    }
}

impl From<midir::ConnectError<midir::MidiInput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiInput>) -> Self {
        Error::MidiPort(e.to_string())
    }
}

impl From<midir::ConnectError<midir::MidiOutput>> for Error {
    fn from(e: midir::ConnectError<midir::MidiOutput>) -> Self {
        Error::MidiPort(e.to_string())
    }
}

impl From<midir::SendError> for Error {
    fn from(e: midir::SendError) -> Self {
        Error::MidiSend(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_hex_message_names_token() {
        let err = Error::malformed("9G");
        assert_eq!(err.to_string(), "malformed hex token '9G'");
    }

    #[test]
    fn test_no_port_message() {
        assert_eq!(Error::NoPort("input").to_string(), "no input port found");
    }
}
