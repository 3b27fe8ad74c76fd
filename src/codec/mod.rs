//! Byte-level MIDI codec: classification, decoding, identity replies and encoding.

pub mod encode;
pub mod hex;
pub mod identity;
pub mod kind;
pub mod manufacturer;
pub mod message;
pub mod note;
