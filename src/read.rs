//! read.rs
//!
//! The read command: transcribe each SMF named on the command line.
//!
//! Files are handled one at a time in the order given. A file that can't be
//! read or parsed gets a single error line and the rest still run.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use midly::{Fps, MetaMessage, Smf, Timing, Track, TrackEventKind};

use crate::format::Formatter;
use crate::midi::Message;

#[derive(thiserror::Error, Debug)]
pub enum ReadError {
    #[error("An error occurred while reading {path:?}: {source}.")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("An error occurred while reading {path:?}: {source}.")]
    Parse {
        path: PathBuf,
        #[source]
        source: midly::Error,
    },
}

/// How a run of the read command went.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Every file was transcribed.
    Success,
    /// No files were named.
    NothingToDo,
    /// At least one file could not be read.
    Failed,
}

/// Transcribe `paths` to `out`, reporting per-file failures to `err`.
///
/// Only failures to write to `out` or `err` end the run early.
pub fn exec<P, O, E>(paths: &[P], out: &mut O, err: &mut E) -> io::Result<Outcome>
where
    P: AsRef<Path>,
    O: Write,
    E: Write,
{
    if paths.is_empty() {
        log::debug!("read: no files named");
        writeln!(err, "Nothing to do: no MIDI files were specified.")?;
        return Ok(Outcome::NothingToDo);
    }

    let mut outcome = Outcome::Success;
    for path in paths {
        let path = path.as_ref();
        log::info!("reading {}", path.display());
        let bytes = match fs::read(path) {
            Ok(b) => b,
            Err(source) => {
                report(err, ReadError::Io { path: path.to_path_buf(), source })?;
                outcome = Outcome::Failed;
                continue;
            }
        };
        let smf = match Smf::parse(&bytes) {
            Ok(s) => s,
            Err(source) => {
                report(err, ReadError::Parse { path: path.to_path_buf(), source })?;
                outcome = Outcome::Failed;
                continue;
            }
        };

        writeln!(out, "File: {path:?}")?;
        transcribe(out, &smf)?;
        writeln!(out, "EOF {path:?}")?;
    }
    Ok(outcome)
}

fn report<E: Write>(err: &mut E, e: ReadError) -> io::Result<()> {
    log::debug!("{e:?}");
    writeln!(err, "{e}")
}

/// Write the header line and every track of a parsed file.
///
/// Key signature state starts over at C major for each file.
pub fn transcribe<W: Write>(out: &mut W, smf: &Smf<'_>) -> io::Result<()> {
    log::debug!("format {:?}, {} tracks", smf.header.format, smf.tracks.len());
    writeln!(out, "{}", time_format(smf.header.timing))?;
    writeln!(out, "{} tracks", smf.tracks.len())?;

    let mut formatter = Formatter::new();
    for (i, track) in smf.tracks.iter().enumerate() {
        if is_empty(track) {
            writeln!(out, "Track {i} is empty")?;
            continue;
        }
        writeln!(out, "Track {i}:")?;
        for (k, event) in track.iter().enumerate() {
            let line = formatter.line(&Message::decode(&event.kind));
            write!(out, "{k}: delta {} {line}", event.delta.as_int())?;
        }
    }
    Ok(())
}

fn time_format(timing: Timing) -> String {
    match timing {
        Timing::Metrical(ticks) => format!("Quarter note: {} ticks", ticks.as_int()),
        // 29.97 fps is drop-frame 30
        Timing::Timecode(Fps::Fps29, subframes) => format!("Time: SMPTE30DropFrame {subframes} subframes"),
        Timing::Timecode(fps, subframes) => format!("Time: SMPTE{} {subframes} subframes", fps.as_int()),
    }
}

/// A track holding nothing but its end-of-track marker has no content.
fn is_empty(track: &Track<'_>) -> bool {
    track
        .iter()
        .all(|ev| matches!(ev.kind, TrackEventKind::Meta(MetaMessage::EndOfTrack)))
}
