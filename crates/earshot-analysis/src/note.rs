//! Equal-tempered note mapping (A4 = 440 Hz).
//!
//! Maps a frequency to the nearest twelve-tone equal-tempered pitch and
//! reports how far off it is in cents.

use earshot_core::{cents, semitones};
use std::fmt;

/// Reference pitch for A4 in Hz.
pub const A4_HZ: f32 = 440.0;

/// Pitch class names starting at C, sharps only.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Semitone offsets are clamped to this many octaves either side of A4 so
/// that absurd inputs still map to a note.
const MAX_SEMITONES: f32 = 12.0 * 50.0;

/// Nearest equal-tempered note for a frequency.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteMapping {
    /// Pitch class, e.g. `"C#"`.
    pub pitch_class: &'static str,
    /// Scientific octave number (A4 is in octave 4).
    pub octave: i32,
    /// Signed distance from A4 in semitones.
    pub semitones_from_a4: i32,
    /// Equal-tempered frequency of the note, in Hz.
    pub theoretical_hz: f32,
    /// Deviation of the analyzed frequency from `theoretical_hz`, in cents.
    pub cents: f32,
}

impl NoteMapping {
    /// Note name with octave, e.g. `"A4"` or `"C#5"`.
    pub fn name(&self) -> String {
        format!("{}{}", self.pitch_class, self.octave)
    }
}

impl fmt::Display for NoteMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.pitch_class, self.octave)
    }
}

/// Equal-tempered frequency `semitones_from_a4` semitones away from A4.
pub fn note_frequency(semitones_from_a4: i32) -> f32 {
    A4_HZ * 2f32.powf(semitones_from_a4 as f32 / 12.0)
}

/// Map `freq_hz` to the nearest equal-tempered note.
///
/// Total over all inputs: zero, negative and non-finite frequencies map to
/// A4, and extreme frequencies saturate 50 octaves from A4. The `cents` field
/// is only meaningful for positive finite input.
///
/// # Example
/// ```rust
/// use earshot_analysis::nearest_note;
///
/// let note = nearest_note(261.63);
/// assert_eq!(note.name(), "C4");
/// assert!(note.cents.abs() < 0.1);
/// ```
pub fn nearest_note(freq_hz: f32) -> NoteMapping {
    let offset = if freq_hz.is_finite() && freq_hz > 0.0 {
        semitones(freq_hz, A4_HZ).round()
    } else {
        0.0
    };
    let semis = offset.clamp(-MAX_SEMITONES, MAX_SEMITONES) as i32;

    // Distance from C0-relative A (index 9 within the octave)
    let from_c = 9 + semis;
    let pitch_class = NOTE_NAMES[from_c.rem_euclid(12) as usize];
    let octave = 4 + from_c.div_euclid(12);

    let theoretical_hz = note_frequency(semis);

    NoteMapping {
        pitch_class,
        octave,
        semitones_from_a4: semis,
        theoretical_hz,
        cents: cents(freq_hz, theoretical_hz),
    }
}
