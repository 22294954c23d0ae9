//! format.rs
//!
//! Turns decoded `Message`s into the one-line descriptions the read command prints.
//!
//! Formatting is pure apart from the key signature: note names depend on the
//! most recent key signature event, so a `Formatter` carries that state and
//! must be created fresh for every file.

use crate::dynamics::volume_label;
use crate::instruments::instrument_name;
use crate::key::KeySignature;
use crate::midi::Message;

/// Offset between the raw 14-bit pitch bend value and its centered form.
const BEND_CENTER: i32 = 0x2000;

/// Per-file formatting context.
#[derive(Debug, Default)]
pub struct Formatter {
    key: KeySignature,
}

impl Formatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Describe one message, newline included.
    ///
    /// Key signature messages also update the key used for later notes.
    pub fn line(&mut self, message: &Message<'_>) -> String {
        use Message::*;
        match message {
            NoteOn { channel, key, vel } => self.note("NoteOn", *channel, *key, *vel),
            NoteOff { channel, key, vel } => self.note("NoteOff", *channel, *key, *vel),
            ControlChange { channel, controller, value } => {
                format!("ControlChange channel {channel} controller {controller} value {value}\n")
            }
            PolyAftertouch { channel, key, pressure } => format!(
                "PolyAfterTouch channel {channel} note {} pressure {pressure}\n",
                self.key.note_name(*key)
            ),
            ChannelAftertouch { channel, pressure } => {
                format!("AfterTouch channel {channel} pressure {pressure}\n")
            }
            PitchBend { channel, bend } => {
                let (relative, absolute) = pitch_bend(*bend);
                format!("PitchBend channel {channel} relative {relative} absolute {absolute}\n")
            }
            ProgramChange { channel, program } => format!(
                "ProgramChange channel {channel} instrument {:?}\n",
                instrument_name(*channel, *program)
            ),
            SysEx(data) => format!("SysEx bytes {}\n", byte_list(data)),

            Copyright(t) => text_line("MetaCopyright", t),
            CuePoint(t) => text_line("MetaCuepoint", t),
            DeviceName(t) => text_line("MetaDevice", t),
            InstrumentName(t) => text_line("MetaInstrument", t),
            Lyric(t) => text_line("MetaLyric", t),
            Marker(t) => text_line("MetaMarker", t),
            ProgramName(t) => text_line("MetaProgramName", t),
            Text(t) => text_line("MetaText", t),
            TrackName(t) => text_line("MetaTrackName", t),

            Message::KeySignature { sharps, is_major } => {
                self.key.apply(*sharps, *is_major);
                format!("MetaKeySig {}\n", self.key.describe())
            }
            TimeSignature { numerator, denominator_exp, clocks_per_click, thirty_seconds_per_quarter } => format!(
                "MetaTimeSig numerator {numerator} denominator {} clocksPerClick {clocks_per_click} \
                 demiSemiQuaverPerQuarter {thirty_seconds_per_quarter}\n",
                denominator(*denominator_exp)
            ),
            Tempo(us) => format!("MetaTempo bpm {:.6}\n", bpm(*us)),
            SmpteOffset { hour, minute, second, frame, subframe } => {
                format!("MetaSMPTEOffset {hour:02}:{minute:02}:{second:02} frame {frame:02}.{subframe:02}\n")
            }
            SequencerData(data) => format!("MetaSeqData bytes {}\n", byte_list(data)),
            SequenceNumber(n) => format!("MetaSeqNumber sequence number {n}\n"),
            Port(port) => format!("MetaPort port {port}\n"),
            ChannelPrefix(channel) => format!("MetaChannel channel {channel}\n"),

            Unrecognized { tag, bytes } => format!("Unrecognized message: {tag:?} {}\n", byte_list(bytes)),
        }
    }

    fn note(&self, label: &str, channel: u8, key: u8, vel: u8) -> String {
        format!(
            "{label} channel {channel} note {:?} volume {}\n",
            self.key.note_name(key),
            volume_label(vel)
        )
    }
}

/// Split a raw 14-bit bend into (relative to center, absolute).
pub fn pitch_bend(raw: u16) -> (i32, u16) {
    (i32::from(raw) - BEND_CENTER, raw)
}

/// Beats per minute for a tempo given in microseconds per quarter note.
pub fn bpm(us_per_quarter: u32) -> f64 {
    60_000_000.0 / f64::from(us_per_quarter)
}

/// Time signature denominators are stored as the exponent of a power of two.
fn denominator(exp: u8) -> u64 {
    1u64.checked_shl(u32::from(exp)).unwrap_or(0)
}

fn text_line(label: &str, text: &[u8]) -> String {
    format!("{label} text {}\n", quote(text))
}

/// Double-quote a text payload. Bytes that aren't valid UTF-8 are kept as
/// `\xNN` escapes rather than replaced.
fn quote(text: &[u8]) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for chunk in text.utf8_chunks() {
        for c in chunk.valid().chars() {
            match c {
                '\'' => out.push(c),
                _ => out.extend(c.escape_debug()),
            }
        }
        for b in chunk.invalid() {
            out.push_str(&format!("\\x{b:02x}"));
        }
    }
    out.push('"');
    out
}

/// "[240 1 2]"
pub fn byte_list(bytes: &[u8]) -> String {
    let items: Vec<String> = bytes.iter().map(u8::to_string).collect();
    format!("[{}]", items.join(" "))
}
