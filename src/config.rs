//! Console configuration, read from a JSON file at startup.

use crate::error::Result;
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "midi-console.json";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub midi: MidiConfig,
    pub console: ConsoleConfig,
    pub player: PlayerConfig,
}

/// Port name substrings. Empty matches nothing, so selection falls back to
/// the only port or a prompt.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MidiConfig {
    pub input_port: String,
    pub output_port: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Ask before sending SysEx.
    pub safe_mode: bool,
    pub ignore_active_sense: bool,
    /// Append the raw hex to each decoded line.
    pub show_raw: bool,
    /// Prefix each line with the UTC time of day.
    pub show_timestamps: bool,
    /// Log kind labels to show, e.g. `["midi", "sysex"]`. Empty shows all.
    pub filter: Vec<String>,
    /// Poll the port lists and report devices coming and going.
    pub watch_ports: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            safe_mode: true,
            ignore_active_sense: true,
            show_raw: false,
            show_timestamps: true,
            filter: Vec::new(),
            watch_ports: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Beats per minute.
    pub tempo: u32,
    pub velocity: u8,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            tempo: 140,
            velocity: 127,
        }
    }
}

impl Config {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load `path`, or defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.console.safe_mode);
        assert!(config.console.ignore_active_sense);
        assert!(!config.console.show_raw);
        assert!(config.console.show_timestamps);
        assert!(config.console.filter.is_empty());
        assert!(config.console.watch_ports);
        assert_eq!(config.player.tempo, 140);
        assert_eq!(config.player.velocity, 127);
        assert!(config.midi.input_port.is_empty());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = Config::from_json(r#"{ "midi": { "input_port": "MiniBrute" }, "console": { "safe_mode": false } }"#)
            .unwrap();
        assert_eq!(config.midi.input_port, "MiniBrute");
        assert_eq!(config.midi.output_port, "");
        assert!(!config.console.safe_mode);
        assert!(config.console.ignore_active_sense);
        assert_eq!(config.player.tempo, 140);
    }

    #[test]
    fn test_console_filter_and_timestamps() {
        let config = Config::from_json(
            r#"{ "console": { "filter": ["midi", "sysex"], "show_timestamps": false, "watch_ports": false } }"#,
        )
        .unwrap();
        assert_eq!(config.console.filter, vec!["midi".to_string(), "sysex".to_string()]);
        assert!(!config.console.show_timestamps);
        assert!(!config.console.watch_ports);
        assert!(config.console.safe_mode);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(Config::from_json("{ midi: "), Err(Error::Config(_))));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("missing.json")).unwrap();
        assert!(config.console.safe_mode);
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "player": {{ "tempo": 90 }} }}"#).unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.player.tempo, 90);
        assert_eq!(config.player.velocity, 127);
    }
}
