//! Run summary reported back to the caller.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a split run did: input analysis, the voice count actually used,
/// and where every note ended up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitReport {
    /// Closed notes found in each input track, by track index.
    pub notes_per_track: Vec<usize>,
    /// Total notes across all tracks.
    pub total_notes: usize,
    /// Maximum number of simultaneously active notes in the input.
    pub peak_concurrency: usize,
    /// Voice limit the caller asked for.
    pub requested_voices: usize,
    /// Voice count actually allocated (after auto-tuning, if enabled).
    pub effective_voices: usize,
    /// Notes placed in each voice, by voice index.
    pub voice_note_counts: Vec<usize>,
    /// Notes dropped (only non-zero under the drop-excess strategy).
    pub dropped_notes: usize,
    /// Meta events preserved in the merged control track.
    pub control_events: usize,
}

impl fmt::Display for SplitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (track, count) in self.notes_per_track.iter().enumerate() {
            writeln!(f, "Track {track}: {count} notes")?;
        }
        writeln!(f, "Total notes: {}", self.total_notes)?;
        writeln!(
            f,
            "Maximum simultaneous notes: {}",
            self.peak_concurrency
        )?;
        writeln!(
            f,
            "Voices used: {} (requested {})",
            self.effective_voices, self.requested_voices
        )?;
        for (voice, count) in self.voice_note_counts.iter().enumerate() {
            if *count > 0 {
                writeln!(f, "Voice {voice}: {count} notes")?;
            }
        }
        if self.dropped_notes > 0 {
            writeln!(f, "Dropped notes: {}", self.dropped_notes)?;
        }
        write!(f, "Meta events preserved: {}", self.control_events)
    }
}
