//! midi.rs
//!
//! This module normalizes the events `midly` parses out of a Standard MIDI File (SMF)
//! into our own `Message` enum, one variant per kind of event we know how to describe.
//!
//! ### Quick primer on SMF events
//! - Channel messages ("Note On", "Control Change", "Pitch Bend", ...) are the performance
//!   data. Each one targets a channel 0–15.
//! - Meta messages only exist in files: text, tempo, key and time signatures, markers.
//! - System exclusive messages carry manufacturer-specific byte blobs.
//!
//! Anything we don't describe on its own (end of track, escapes, undefined meta types)
//! becomes `Message::Unrecognized`, keeping a tag and the raw bytes so it can still be
//! printed. Decoding never fails.

use midly::{MetaMessage, MidiMessage, TrackEventKind};

/// A decoded track event.
///
/// Text payloads and byte blobs borrow from the file buffer `midly` parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Message<'a> {
    NoteOn { channel: u8, key: u8, vel: u8 },
    NoteOff { channel: u8, key: u8, vel: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
    /// Per-note aftertouch pressure
    PolyAftertouch { channel: u8, key: u8, pressure: u8 },
    /// Channel-wide aftertouch pressure
    ChannelAftertouch { channel: u8, pressure: u8 },
    /// Raw 14-bit bend value, 0x2000 is centered
    PitchBend { channel: u8, bend: u16 },
    ProgramChange { channel: u8, program: u8 },
    /// Payload between F0 and the terminating F7
    SysEx(&'a [u8]),

    Copyright(&'a [u8]),
    CuePoint(&'a [u8]),
    DeviceName(&'a [u8]),
    InstrumentName(&'a [u8]),
    Lyric(&'a [u8]),
    Marker(&'a [u8]),
    ProgramName(&'a [u8]),
    Text(&'a [u8]),
    TrackName(&'a [u8]),

    /// Signed accidental count (negative = flats) and mode
    KeySignature { sharps: i8, is_major: bool },
    /// The denominator is stored as a power of two
    TimeSignature { numerator: u8, denominator_exp: u8, clocks_per_click: u8, thirty_seconds_per_quarter: u8 },
    /// Microseconds per quarter note
    Tempo(u32),
    SmpteOffset { hour: u8, minute: u8, second: u8, frame: u8, subframe: u8 },
    SequencerData(&'a [u8]),
    SequenceNumber(u16),
    Port(u8),
    ChannelPrefix(u8),

    Unrecognized { tag: &'static str, bytes: Vec<u8> },
}

impl<'a> Message<'a> {
    /// Normalize one `midly` event.
    pub fn decode(kind: &TrackEventKind<'a>) -> Self {
        match *kind {
            TrackEventKind::Midi { channel, message } => decode_channel(channel.as_int(), message),
            TrackEventKind::SysEx(data) => {
                Message::SysEx(data.strip_suffix(&[0xF7]).unwrap_or(data))
            }
            TrackEventKind::Escape(data) => {
                let mut bytes = vec![0xF7];
                push_vlq(&mut bytes, data.len() as u32);
                bytes.extend_from_slice(data);
                Message::Unrecognized { tag: "SysExEscape", bytes }
            }
            TrackEventKind::Meta(meta) => decode_meta(meta),
        }
    }
}

fn decode_channel<'a>(channel: u8, message: MidiMessage) -> Message<'a> {
    use MidiMessage::*;
    match message {
        NoteOn { key, vel } => Message::NoteOn { channel, key: key.as_int(), vel: vel.as_int() },
        NoteOff { key, vel } => Message::NoteOff { channel, key: key.as_int(), vel: vel.as_int() },
        Controller { controller, value } => Message::ControlChange {
            channel,
            controller: controller.as_int(),
            value: value.as_int(),
        },
        Aftertouch { key, vel } => Message::PolyAftertouch { channel, key: key.as_int(), pressure: vel.as_int() },
        ChannelAftertouch { vel } => Message::ChannelAftertouch { channel, pressure: vel.as_int() },
        PitchBend { bend } => Message::PitchBend { channel, bend: bend.0.as_int() },
        ProgramChange { program } => Message::ProgramChange { channel, program: program.as_int() },
    }
}

fn decode_meta(meta: MetaMessage<'_>) -> Message<'_> {
    match meta {
        MetaMessage::Copyright(t) => Message::Copyright(t),
        MetaMessage::CuePoint(t) => Message::CuePoint(t),
        MetaMessage::DeviceName(t) => Message::DeviceName(t),
        MetaMessage::InstrumentName(t) => Message::InstrumentName(t),
        MetaMessage::Lyric(t) => Message::Lyric(t),
        MetaMessage::Marker(t) => Message::Marker(t),
        MetaMessage::ProgramName(t) => Message::ProgramName(t),
        MetaMessage::Text(t) => Message::Text(t),
        MetaMessage::TrackName(t) => Message::TrackName(t),
        // midly reports the minor flag, we track the major one
        MetaMessage::KeySignature(sharps, minor) => Message::KeySignature { sharps, is_major: !minor },
        MetaMessage::TimeSignature(numerator, denominator_exp, clocks_per_click, thirty_seconds_per_quarter) => {
            Message::TimeSignature { numerator, denominator_exp, clocks_per_click, thirty_seconds_per_quarter }
        }
        MetaMessage::Tempo(us) => Message::Tempo(us.as_int()),
        MetaMessage::SmpteOffset(t) => Message::SmpteOffset {
            hour: t.hour(),
            minute: t.minute(),
            second: t.second(),
            frame: t.frame(),
            subframe: t.subframe(),
        },
        MetaMessage::SequencerSpecific(data) => Message::SequencerData(data),
        MetaMessage::TrackNumber(Some(n)) => Message::SequenceNumber(n),
        MetaMessage::TrackNumber(None) => Message::Unrecognized {
            tag: "MetaSeqNumber",
            bytes: meta_bytes(0x00, &[]),
        },
        MetaMessage::MidiPort(port) => Message::Port(port.as_int()),
        MetaMessage::MidiChannel(channel) => Message::ChannelPrefix(channel.as_int()),
        MetaMessage::EndOfTrack => Message::Unrecognized {
            tag: "MetaEndOfTrack",
            bytes: meta_bytes(0x2F, &[]),
        },
        MetaMessage::Unknown(ty, data) => Message::Unrecognized {
            tag: "MetaUndefined",
            bytes: meta_bytes(ty, data),
        },
    }
}

/// Re-encode a meta event the way it appears in the file: FF, type, length, data.
fn meta_bytes(ty: u8, data: &[u8]) -> Vec<u8> {
    let mut bytes = vec![0xFF, ty];
    push_vlq(&mut bytes, data.len() as u32);
    bytes.extend_from_slice(data);
    bytes
}

/// Append `n` as an SMF variable-length quantity (big-endian base 128).
fn push_vlq(out: &mut Vec<u8>, n: u32) {
    let mut groups = [0u8; 5];
    let mut len = 0;
    let mut rest = n;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 { break; }
    }
    for i in (0..len).rev() {
        let more = if i > 0 { 0x80 } else { 0 };
        out.push(groups[i] | more);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use midly::num::{u14, u24, u4, u7};

    fn midi(channel: u8, message: MidiMessage) -> TrackEventKind<'static> {
        TrackEventKind::Midi { channel: u4::from(channel), message }
    }

    #[test]
    fn decodes_channel_messages() {
        let on = midi(3, MidiMessage::NoteOn { key: u7::from(60), vel: u7::from(100) });
        assert_eq!(Message::decode(&on), Message::NoteOn { channel: 3, key: 60, vel: 100 });

        let touch = midi(1, MidiMessage::Aftertouch { key: u7::from(61), vel: u7::from(9) });
        assert_eq!(Message::decode(&touch), Message::PolyAftertouch { channel: 1, key: 61, pressure: 9 });

        let bend = midi(0, MidiMessage::PitchBend { bend: midly::PitchBend(u14::from(0x00FF)) });
        assert_eq!(Message::decode(&bend), Message::PitchBend { channel: 0, bend: 255 });
    }

    #[test]
    fn sysex_drops_terminator() {
        let data = [0x7E, 0x7F, 0x09, 0x01, 0xF7];
        assert_eq!(Message::decode(&TrackEventKind::SysEx(&data)), Message::SysEx(&data[..4]));

        let open = [0x43, 0x10];
        assert_eq!(Message::decode(&TrackEventKind::SysEx(&open)), Message::SysEx(&open));
    }

    #[test]
    fn key_signature_flag_is_inverted() {
        let kind = TrackEventKind::Meta(MetaMessage::KeySignature(-3, true));
        assert_eq!(Message::decode(&kind), Message::KeySignature { sharps: -3, is_major: false });
    }

    #[test]
    fn tempo_and_sequence_number() {
        let tempo = TrackEventKind::Meta(MetaMessage::Tempo(u24::from(500_000)));
        assert_eq!(Message::decode(&tempo), Message::Tempo(500_000));

        let seq = TrackEventKind::Meta(MetaMessage::TrackNumber(Some(7)));
        assert_eq!(Message::decode(&seq), Message::SequenceNumber(7));
    }

    #[test]
    fn leftovers_are_unrecognized() {
        let eot = TrackEventKind::Meta(MetaMessage::EndOfTrack);
        assert_eq!(
            Message::decode(&eot),
            Message::Unrecognized { tag: "MetaEndOfTrack", bytes: vec![0xFF, 0x2F, 0x00] }
        );

        let unknown = TrackEventKind::Meta(MetaMessage::Unknown(0x60, &[1, 2]));
        assert_eq!(
            Message::decode(&unknown),
            Message::Unrecognized { tag: "MetaUndefined", bytes: vec![0xFF, 0x60, 0x02, 1, 2] }
        );

        let escape = TrackEventKind::Escape(&[0xF3, 0x01]);
        assert_eq!(
            Message::decode(&escape),
            Message::Unrecognized { tag: "SysExEscape", bytes: vec![0xF7, 0x02, 0xF3, 0x01] }
        );
    }

    #[test]
    fn vlq_encoding() {
        let mut out = Vec::new();
        push_vlq(&mut out, 0);
        push_vlq(&mut out, 0x7F);
        push_vlq(&mut out, 0x80);
        push_vlq(&mut out, 0x3FFF);
        assert_eq!(out, vec![0x00, 0x7F, 0x81, 0x00, 0xFF, 0x7F]);
    }
}
