//! Conversion between absolute and delta time.

use crate::error::{Error, Result};
use crate::event::Tick;

/// Running cursor for delta-encoding a chronologically ordered sequence of
/// absolute timestamps. The first delta equals the first absolute time;
/// every later delta is the gap to the previous timestamp.
#[derive(Debug, Default)]
pub struct DeltaEncoder {
    cursor: Tick,
}

impl DeltaEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance to `time`, returning the delta from the previous position.
    pub fn advance(&mut self, time: Tick) -> Result<Tick> {
        let delta = time
            .checked_sub(self.cursor)
            .ok_or(Error::NonMonotonicTime {
                prev: self.cursor,
                next: time,
            })?;
        self.cursor = time;
        Ok(delta)
    }
}

/// Delta-encode a sorted slice of absolute times.
pub fn encode_deltas(times: &[Tick]) -> Result<Vec<Tick>> {
    let mut encoder = DeltaEncoder::new();
    times.iter().map(|&time| encoder.advance(time)).collect()
}

/// Inverse of [`encode_deltas`]: accumulate deltas back into absolute times.
pub fn decode_deltas(deltas: &[Tick]) -> Vec<Tick> {
    deltas
        .iter()
        .scan(0, |now, &delta| {
            *now += delta;
            Some(*now)
        })
        .collect()
}
