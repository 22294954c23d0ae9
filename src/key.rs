//! key.rs
//!
//! Running key-signature state used to spell note names.
//!
//! MIDI only stores pitches as numbers 0–127, so whether pitch class 1 reads as
//! "C♯" or "D♭" is a presentation choice. We follow the most recent key
//! signature meta event: major keys spell with sharps, minor keys with flats.
//! The state starts out as C major and lasts until the next key signature or
//! the end of the file.

/// Pitch class names preferring sharps, used while in a major key.
const MAJOR_NAMES: [&str; 12] = [
    "C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B",
];

/// Pitch class names preferring flats, used while in a minor key.
const MINOR_NAMES: [&str; 12] = [
    "C", "D♭", "D", "E♭", "E", "F", "G♭", "G", "A♭", "A", "B♭", "B",
];

/// A position on the circle of fifths.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeySignature {
    /// Pitch class of the tonic, 0 = C.
    pub tonic: u8,
    /// Number of sharps or flats, 0..=7.
    pub accidentals: u8,
    pub is_major: bool,
    pub is_flat: bool,
}

impl Default for KeySignature {
    fn default() -> Self {
        Self { tonic: 0, accidentals: 0, is_major: true, is_flat: false }
    }
}

impl KeySignature {
    /// Update from a key signature meta event.
    ///
    /// `sharps` is the signed accidental count as stored in the file
    /// (negative for flats). Each step around the circle of fifths moves the
    /// tonic up seven semitones, starting from C for major keys and A for
    /// minor keys. Values outside -7..=7 are not rejected.
    pub fn apply(&mut self, sharps: i8, is_major: bool) {
        let start: i32 = if is_major { 0 } else { 9 };
        self.tonic = (start + 7 * i32::from(sharps)).rem_euclid(12) as u8;
        self.accidentals = sharps.unsigned_abs();
        self.is_major = is_major;
        self.is_flat = sharps < 0;
    }

    fn names(&self) -> &'static [&'static str; 12] {
        if self.is_major { &MAJOR_NAMES } else { &MINOR_NAMES }
    }

    /// Spell a raw MIDI pitch, e.g. 61 -> "C♯5" in a major key.
    pub fn note_name(&self, raw: u8) -> String {
        format!("{}{}", self.names()[usize::from(raw % 12)], raw / 12)
    }

    pub fn tonic_name(&self) -> &'static str {
        self.names()[usize::from(self.tonic % 12)]
    }

    /// "A♭Minor (7 flats)"
    pub fn describe(&self) -> String {
        let mode = if self.is_major { "Major" } else { "Minor" };
        // major keys are counted in sharps, minor keys in flats
        let accidental = match (!self.is_major, self.accidentals == 1) {
            (true, true) => "flat",
            (true, false) => "flats",
            (false, true) => "sharp",
            (false, false) => "sharps",
        };
        format!("{}{} ({} {})", self.tonic_name(), mode, self.accidentals, accidental)
    }
}
