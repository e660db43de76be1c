//! SMF parsing into delta-timed event streams.
//!
//! Uses the `midly` crate and keeps events borrowing the input bytes; meta
//! payloads travel through the core untouched and are written back out by
//! the writer.

use crate::error::{Error, Result};
use midisplit_core::{DeltaEvent, EventKind};
use midly::{MetaMessage, MidiMessage, Smf, Timing, TrackEventKind};
use tracing::debug;

/// A parsed MIDI file, reduced to what voice separation needs: one
/// delta-timed stream per track (notes and meta events only) plus the
/// header resolution, which is passed through to the output unchanged.
#[derive(Debug, Clone)]
pub struct ParsedSmf<'a> {
    /// Ticks per quarter note from the header.
    pub ticks_per_beat: u16,

    /// One event stream per input track, in file order. Channel-voice
    /// messages other than notes, and sysex data, are not carried.
    pub streams: Vec<Vec<DeltaEvent<MetaMessage<'a>>>>,
}

impl<'a> ParsedSmf<'a> {
    /// Parse an SMF from bytes.
    ///
    /// Only metrical (tick-per-beat) timing is supported. Note messages
    /// from every channel of a track land in the same stream, matching
    /// the per-track note pairing of extraction.
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let smf = Smf::parse(data)?;

        let ticks_per_beat = match smf.header.timing {
            Timing::Metrical(tpb) => tpb.as_int(),
            Timing::Timecode(_, _) => return Err(Error::UnsupportedTiming),
        };

        let streams: Vec<_> = smf.tracks.iter().map(|track| convert_track(track)).collect();

        debug!(
            tracks = streams.len(),
            ticks_per_beat,
            "parsed MIDI file"
        );

        Ok(Self {
            ticks_per_beat,
            streams,
        })
    }
}

fn convert_track<'a>(track: &[midly::TrackEvent<'a>]) -> Vec<DeltaEvent<MetaMessage<'a>>> {
    let mut events = Vec::new();
    // Deltas of skipped events must still advance the clock, so they are
    // carried over to the next emitted event.
    let mut pending_delta: u64 = 0;

    for event in track {
        pending_delta += event.delta.as_int() as u64;
        let kind = match &event.kind {
            TrackEventKind::Midi { message, .. } => match message {
                MidiMessage::NoteOn { key, vel } => EventKind::NoteOn {
                    key: key.as_int(),
                    velocity: vel.as_int(),
                },
                MidiMessage::NoteOff { key, .. } => EventKind::NoteOff { key: key.as_int() },
                _ => continue,
            },
            // The writer emits its own end-of-track markers; carrying the
            // input ones would terminate the merged meta track early.
            TrackEventKind::Meta(MetaMessage::EndOfTrack) => continue,
            TrackEventKind::Meta(meta) => EventKind::Control(meta.clone()),
            TrackEventKind::SysEx(_) | TrackEventKind::Escape(_) => continue,
        };
        events.push(DeltaEvent {
            delta: pending_delta,
            kind,
        });
        pending_delta = 0;
    }

    events
}
