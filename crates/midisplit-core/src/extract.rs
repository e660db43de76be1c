//! Extraction of absolute-time note intervals from delta-timed streams.

use crate::event::{ControlEvent, DeltaEvent, EventKind, NoteInterval, Tick};
use std::collections::HashMap;
use tracing::debug;

/// Result of running [`extract`] over a set of input streams.
#[derive(Debug, Clone)]
pub struct Extraction<P> {
    /// All closed notes across all streams, sorted by `start` ascending
    /// (stable - ties keep their input order).
    pub notes: Vec<NoteInterval>,
    /// Control events per source stream, in stream order, with absolute
    /// times. Feed these to [`crate::merge_control`].
    pub controls: Vec<Vec<ControlEvent<P>>>,
}

/// Convert delta-timed event streams into absolute-time note intervals and
/// control events.
///
/// Each stream keeps its own running time accumulator. A `NoteOn` with
/// velocity > 0 opens a pending note for its key; a `NoteOff`, or a
/// `NoteOn` with velocity 0, closes it and emits an interval with the
/// begin event's velocity. Edge cases are policy, not errors:
///
/// - a begin for an already-open key overwrites the pending entry
///   (last begin wins; the earlier onset is lost),
/// - an end with no matching open key is ignored,
/// - notes still open when their stream ends are discarded.
pub fn extract<P>(streams: Vec<Vec<DeltaEvent<P>>>) -> Extraction<P> {
    let mut notes = Vec::new();
    let mut controls = Vec::with_capacity(streams.len());

    for (source_track, stream) in streams.into_iter().enumerate() {
        let mut stream_controls = Vec::new();
        // Pending open notes for this stream only, keyed by note number.
        let mut open: HashMap<u8, (Tick, u8)> = HashMap::new();
        let mut now: Tick = 0;

        for event in stream {
            now += event.delta;
            match event.kind {
                EventKind::NoteOn { key, velocity } if velocity > 0 => {
                    open.insert(key, (now, velocity));
                }
                EventKind::NoteOn { key, .. } | EventKind::NoteOff { key } => {
                    if let Some((start, velocity)) = open.remove(&key) {
                        notes.push(NoteInterval {
                            start,
                            end: now,
                            key,
                            velocity,
                            source_track,
                        });
                    }
                }
                EventKind::Control(payload) => {
                    stream_controls.push(ControlEvent {
                        time: now,
                        payload,
                        source_track,
                    });
                }
            }
        }

        if !open.is_empty() {
            debug!(
                source_track,
                unterminated = open.len(),
                "discarding notes left open at end of stream"
            );
        }
        controls.push(stream_controls);
    }

    // Stable by construction of sort_by_key, so ties keep input order.
    notes.sort_by_key(|n| n.start);

    debug!(
        notes = notes.len(),
        streams = controls.len(),
        "extracted note intervals"
    );

    Extraction { notes, controls }
}
