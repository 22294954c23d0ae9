//! instruments.rs
//!
//! General MIDI names for program changes.
//!
//! Channel 10 (index 9) is reserved for percussion in General MIDI: a program
//! number there selects a drum sound from the percussion key map instead of a
//! melodic instrument, so the two get separate tables.

use std::borrow::Cow;

/// The zero-based channel General MIDI reserves for percussion.
pub const PERCUSSION_CHANNEL: u8 = 9;

/// First key covered by the percussion table.
const PERCUSSION_FIRST: u8 = 0x22;

/// General MIDI level 1 program names, indexed by program number.
const INSTRUMENTS: [&str; 128] = [
    // Piano
    "Acoustic grand piano",
    "Bright acoustic piano",
    "Electric grand piano",
    "Honky tonk piano",
    "Electric piano 1",
    "Electric piano 2",
    "Harpsicord",
    "Clavinet",
    // Chromatic percussion
    "Celesta",
    "Glockenspiel",
    "Music box",
    "Vibraphone",
    "Marimba",
    "Xylophone",
    "Tubular bell",
    "Dulcimer",
    // Organ
    "Hammond / drawbar organ",
    "Percussive organ",
    "Rock organ",
    "Church organ",
    "Reed organ",
    "Accordion",
    "Harmonica",
    "Tango accordion",
    // Guitar
    "Nylon string acoustic guitar",
    "Steel string acoustic guitar",
    "Jazz electric guitar",
    "Clean electric guitar",
    "Muted electric guitar",
    "Overdriven guitar",
    "Distortion guitar",
    "Guitar harmonics",
    // Bass
    "Acoustic bass",
    "Fingered electric bass",
    "Picked electric bass",
    "Fretless bass",
    "Slap bass 1",
    "Slap bass 2",
    "Synth bass 1",
    "Synth bass 2",
    // Strings
    "Violin",
    "Viola",
    "Cello",
    "Contrabass",
    "Tremolo strings",
    "Pizzicato strings",
    "Orchestral strings / harp",
    "Timpani",
    // Ensemble
    "String ensemble 1",
    "String ensemble 2 / slow strings",
    "Synth strings 1",
    "Synth strings 2",
    "Choir aahs",
    "Voice oohs",
    "Synth choir / voice",
    "Orchestra hit",
    // Brass
    "Trumpet",
    "Trombone",
    "Tuba",
    "Muted trumpet",
    "French horn",
    "Brass ensemble",
    "Synth brass 1",
    "Synth brass 2",
    // Reed
    "Soprano sax",
    "Alto sax",
    "Tenor sax",
    "Baritone sax",
    "Oboe",
    "English horn",
    "Bassoon",
    "Clarinet",
    // Pipe
    "Piccolo",
    "Flute",
    "Recorder",
    "Pan flute",
    "Bottle blow / blown bottle",
    "Shakuhachi",
    "Whistle",
    "Ocarina",
    // Synth lead
    "Synth square wave",
    "Synth saw wave",
    "Synth calliope",
    "Synth chiff",
    "Synth charang",
    "Synth voice",
    "Synth fifths saw",
    "Synth brass and lead",
    // Synth pad
    "Fantasia / new age",
    "Warm pad",
    "Polysynth",
    "Space vox / choir",
    "Bowed glass",
    "Metal pad",
    "Halo pad",
    "Sweep pad",
    // Synth effects
    "Ice rain",
    "Soundtrack",
    "Crystal",
    "Atmosphere",
    "Brightness",
    "Goblins",
    "Echo drops / echoes",
    "Sci fi",
    // Ethnic
    "Sitar",
    "Banjo",
    "Shamisen",
    "Koto",
    "Kalimba",
    "Bag pipe",
    "Fiddle",
    "Shanai",
    // Percussive
    "Tinkle bell",
    "Agogo",
    "Steel drums",
    "Woodblock",
    "Taiko drum",
    "Melodic tom",
    "Synth drum",
    "Reverse cymbal",
    // Sound effects
    "Guitar fret noise",
    "Breath noise",
    "Seashore",
    "Bird tweet",
    "Telephone ring",
    "Helicopter",
    "Applause",
    "Gunshot",
];

/// General MIDI percussion key map for channel 10, starting at key 0x22.
const PERCUSSION: [&str; 47] = [
    "Acoustic bass drum",
    "Bass drum 1",
    "Side stick",
    "Acoustic snare",
    "Hand clap",
    "Electric snare",
    "Low floor tom",
    "Closed hihat",
    "High floor tom",
    "Pedal hihat",
    "Low tom",
    "Open hihat",
    "Low-mid tom",
    "High-mid tom",
    "Crash cymbal 1",
    "High tom",
    "Ride cymbal 1",
    "Chinese cymbal",
    "Ride bell",
    "Tambourine",
    "Splash cymbal",
    "Cowbell",
    "Crash cymbal 2",
    "Vibraslap",
    "Ride cymbal 2",
    "High bongo",
    "Low bongo",
    "Mute high conga",
    "Open high conga",
    "Low conga",
    "High timbale",
    "Low timbale",
    "High agogo",
    "Low agogo",
    "Cabasa",
    "Maracas",
    "Short whistle",
    "Long whistle",
    "Short guiro",
    "Long guiro",
    "Claves",
    "High wood block",
    "Low wood block",
    "Mute cuica",
    "Open cuica",
    "Mute triangle",
    "Open triangle",
];

/// Name the instrument a program change selects on `channel`.
///
/// Melodic channels always resolve, the table covers every 7-bit program.
/// Percussion keys outside 0x22..=0x50 get a synthesized label.
pub fn instrument_name(channel: u8, program: u8) -> Cow<'static, str> {
    let program7 = program & 0x7F;
    if channel == PERCUSSION_CHANNEL {
        return match percussion_name(program7) {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("Unknown percussion instrument {program}")),
        };
    }
    Cow::Borrowed(INSTRUMENTS[usize::from(program7)])
}

fn percussion_name(key: u8) -> Option<&'static str> {
    let idx = key.checked_sub(PERCUSSION_FIRST)?;
    PERCUSSION.get(usize::from(idx)).copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn melodic_programs() {
        assert_eq!(instrument_name(0, 0x00), "Acoustic grand piano");
        assert_eq!(instrument_name(0, 0x41), "Alto sax");
        assert_eq!(instrument_name(15, 0x7F), "Gunshot");
        assert_eq!(instrument_name(3, 0x28), "Violin");
        // high bit is ignored
        assert_eq!(instrument_name(0, 0xC1), "Alto sax");
    }

    #[test]
    fn every_melodic_program_has_a_name() {
        for program in 0..=127u8 {
            assert!(!instrument_name(0, program).is_empty(), "program {program}");
        }
    }

    #[test]
    fn percussion_keys() {
        assert_eq!(instrument_name(9, 0x22), "Acoustic bass drum");
        assert_eq!(instrument_name(9, 0x2D), "Open hihat");
        assert_eq!(instrument_name(9, 0x50), "Open triangle");
        assert_eq!(PERCUSSION.len(), usize::from(0x50 - PERCUSSION_FIRST) + 1);
    }

    #[test]
    fn unknown_percussion() {
        assert_eq!(instrument_name(9, 0x21), "Unknown percussion instrument 33");
        assert_eq!(instrument_name(9, 0x51), "Unknown percussion instrument 81");
        assert_eq!(instrument_name(9, 0), "Unknown percussion instrument 0");
    }

    #[test]
    fn only_channel_nine_is_percussion() {
        assert_eq!(instrument_name(8, 0x22), "Picked electric bass");
        assert_eq!(instrument_name(10, 0x22), "Picked electric bass");
    }
}
