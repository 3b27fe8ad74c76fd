//! Note and controller names.

use std::borrow::Cow;

const NOTE_NAMES: [&str; 12] = ["C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B"];

/// MIDI note number to name with octave, middle C = `C4`, note 0 = `C-1`.
pub fn note_name(note: u8) -> String {
    let note_index = (note % 12) as usize;
    let octave = (note / 12) as i32 - 1;

    format!("{}{}", NOTE_NAMES[note_index], octave)
}

const CONTROLLER_NAMES: [(u8, &str); 12] = [
    (0, "Bank Select"),
    (1, "Modulation Wheel"),
    (2, "Breath Controller"),
    (4, "Foot Pedal"),
    (5, "Portamento Time"),
    (6, "Data Entry"),
    (7, "Volume"),
    (8, "Balance"),
    (10, "Pan Position"),
    (11, "Expression"),
    (12, "Effect Control 1"),
    (13, "Effect Control 2"),
];

/// Name of a controller number, `"Controller {n}"` when it has none.
pub fn controller_name(number: u8) -> Cow<'static, str> {
    CONTROLLER_NAMES
        .iter()
        .find(|(n, _)| *n == number)
        .map(|(_, name)| Cow::Borrowed(*name))
        .unwrap_or_else(|| Cow::Owned(format!("Controller {}", number)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_name() {
        assert_eq!(note_name(60), "C4");
        assert_eq!(note_name(0), "C-1");
        assert_eq!(note_name(69), "A4");
        assert_eq!(note_name(61), "C#4");
        assert_eq!(note_name(127), "G9");
    }

    #[test]
    fn test_controller_name() {
        assert_eq!(controller_name(7), "Volume");
        assert_eq!(controller_name(10), "Pan Position");
        assert_eq!(controller_name(3), "Controller 3");
        assert_eq!(controller_name(99), "Controller 99");
    }
}
