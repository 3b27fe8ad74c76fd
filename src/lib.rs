//! MIDI console core.
//!
//! Decodes raw MIDI/SysEx byte streams into [`MidiMessage`] records, recognises
//! Universal Device Inquiry replies, and encodes hex text or byte arrays back
//! into sendable messages. Everything in [`codec`] is pure and stateless; the
//! console binary owns the transport and any UI state.

pub mod codec;
pub mod config;
pub mod error;

pub use codec::encode::{encode, Encoded, Outgoing, SYSEX_IDENTITY_REQUEST};
pub use codec::hex::{bytes_to_hex, hex_to_bytes};
pub use codec::identity::{is_identity_reply, IdentityReply, ManufacturerId};
pub use codec::kind::{classify, is_sysex_message, MessageKind, SystemKind};
pub use codec::manufacturer::{detect_device, manufacturer_name, DeviceDescriptor};
pub use codec::message::{decode, MidiMessage};
pub use codec::note::{controller_name, note_name};
pub use config::Config;
pub use error::{Error, Result};
