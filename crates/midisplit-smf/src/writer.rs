//! SMF output: one track per voice plus a merged meta track.

use crate::error::{Error, Result};
use midisplit_core::{ControlEvent, DeltaEncoder, NoteInterval, Tick};
use midly::num::{u15, u28, u4};
use midly::{
    Arena, Format, Header, MetaMessage, MidiMessage, Smf, Timing, TrackEvent, TrackEventKind,
};
use std::path::Path;
use tracing::debug;

/// Serialize allocated voices and merged meta events as a format-1 SMF.
///
/// The meta track (when any meta events survived extraction) comes first,
/// then one track per non-empty voice named `VoiceN`. Channels are handed
/// out sequentially, skipping the percussion channel and wrapping mod 16;
/// the core never assigns channels itself.
pub fn write_split(
    ticks_per_beat: u16,
    voices: &[Vec<NoteInterval>],
    controls: &[ControlEvent<MetaMessage<'_>>],
) -> Result<Vec<u8>> {
    let arena = Arena::new();

    let timing = u15::try_from(ticks_per_beat)
        .ok_or(Error::InvalidTicksPerBeat(ticks_per_beat))?;
    let mut smf = Smf::new(Header::new(Format::Parallel, Timing::Metrical(timing)));

    if !controls.is_empty() {
        smf.tracks.push(meta_track(controls)?);
    }

    let mut channels = ChannelAssigner::new();
    for (index, voice) in voices.iter().enumerate() {
        if voice.is_empty() {
            continue;
        }
        let name = arena.add(format!("Voice{index}").as_bytes());
        smf.tracks.push(voice_track(voice, name, channels.next())?);
    }

    debug!(tracks = smf.tracks.len(), "writing split MIDI file");

    let mut bytes = Vec::new();
    smf.write_std(&mut bytes)?;
    Ok(bytes)
}

/// [`write_split`] straight to a file.
pub fn save_split(
    path: impl AsRef<Path>,
    ticks_per_beat: u16,
    voices: &[Vec<NoteInterval>],
    controls: &[ControlEvent<MetaMessage<'_>>],
) -> Result<()> {
    let bytes = write_split(ticks_per_beat, voices, controls)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

fn meta_track<'a>(controls: &[ControlEvent<MetaMessage<'a>>]) -> Result<Vec<TrackEvent<'a>>> {
    let mut track = vec![TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(b"Meta Track")),
    }];

    let mut encoder = DeltaEncoder::new();
    for control in controls {
        let delta = encoder.advance(control.time)?;
        track.push(TrackEvent {
            delta: encode_delta(delta)?,
            kind: TrackEventKind::Meta(control.payload.clone()),
        });
    }

    track.push(end_of_track());
    Ok(track)
}

fn voice_track<'a>(
    voice: &[NoteInterval],
    name: &'a [u8],
    channel: u4,
) -> Result<Vec<TrackEvent<'a>>> {
    let mut track = vec![TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(name)),
    }];

    // The voice is non-overlapping and start-sorted, so emitting each
    // interval's begin/end pair in order is already chronological.
    let mut encoder = DeltaEncoder::new();
    for note in voice {
        let delta_on = encoder.advance(note.start)?;
        track.push(TrackEvent {
            delta: encode_delta(delta_on)?,
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn {
                    key: note.key.into(),
                    vel: note.velocity.into(),
                },
            },
        });
        let delta_off = encoder.advance(note.end)?;
        track.push(TrackEvent {
            delta: encode_delta(delta_off)?,
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff {
                    key: note.key.into(),
                    vel: 0.into(),
                },
            },
        });
    }

    track.push(end_of_track());
    Ok(track)
}

fn end_of_track() -> TrackEvent<'static> {
    TrackEvent {
        delta: 0.into(),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    }
}

fn encode_delta(delta: Tick) -> Result<u28> {
    u32::try_from(delta)
        .ok()
        .and_then(u28::try_from)
        .ok_or(Error::DeltaOverflow(delta))
}

/// Sequential channel numbers, skipping channel 9 (general-MIDI
/// percussion) on every wrap.
struct ChannelAssigner {
    counter: u8,
}

impl ChannelAssigner {
    fn new() -> Self {
        Self { counter: 0 }
    }

    fn next(&mut self) -> u4 {
        loop {
            let channel = self.counter % 16;
            self.counter = self.counter.wrapping_add(1);
            if channel != 9 {
                return channel.into();
            }
        }
    }
}
