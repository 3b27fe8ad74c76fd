//! Raw `.syx` files: the message bytes, nothing else.

use midi_console::Result;
use std::fs;
use std::path::Path;

pub fn load_syx(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path)?;
    tracing::debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(bytes)
}

pub fn save_syx(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes)?;
    tracing::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use midi_console::Error;

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("message.syx");
        let message = [0xF0, 0x7E, 0x7F, 0x06, 0x01, 0xF7];
        save_syx(&path, &message).unwrap();
        assert_eq!(load_syx(&path).unwrap(), message.to_vec());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(load_syx(&dir.path().join("nope.syx")), Err(Error::Io(_))));
    }
}
