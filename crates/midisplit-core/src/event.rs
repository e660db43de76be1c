//! Event and interval types shared across the core.

use serde::{Deserialize, Serialize};

/// Absolute time in ticks since the start of the piece.
pub type Tick = u64;

/// A note's occupied time span, from onset to release.
///
/// `start <= end` always holds for extracted notes; zero-length intervals
/// are tolerated as a degenerate case. Intervals are immutable once
/// extracted - allocation only moves them into voice buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInterval {
    /// Onset tick.
    pub start: Tick,
    /// Release tick.
    pub end: Tick,
    /// MIDI key number (0-127).
    pub key: u8,
    /// Onset velocity (1-127; taken from the begin event).
    pub velocity: u8,
    /// Index of the input stream the note came from.
    pub source_track: usize,
}

/// A non-note event with an absolute timestamp.
///
/// The payload is opaque to the core; only `time` matters for merge
/// ordering. The SMF layer instantiates `P` with `midly::MetaMessage`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlEvent<P> {
    pub time: Tick,
    pub payload: P,
    pub source_track: usize,
}

/// What a single delta-timed stream event carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind<P> {
    /// Note begin. Velocity 0 is accepted as an end marker, matching the
    /// MIDI convention.
    NoteOn { key: u8, velocity: u8 },
    /// Note end.
    NoteOff { key: u8 },
    /// Anything that is not a note; passed through to the control merger.
    Control(P),
}

/// One element of a delta-timed input stream. `delta` is the offset in
/// ticks from the previous event in the same stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeltaEvent<P> {
    pub delta: Tick,
    pub kind: EventKind<P>,
}
