//! Greedy voice allocation.
//!
//! Partitions a start-sorted list of note intervals into a fixed number of
//! voice buckets such that no bucket ever holds two overlapping notes.
//! Notes are committed one at a time in input order with no backtracking,
//! so the allocator could also consume a start-ascending stream.

use crate::error::{Error, Result};
use crate::event::NoteInterval;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Rule for choosing among eligible voices, and for what happens when no
/// voice is eligible.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// First eligible voice by index; fails when none is eligible.
    FirstFit,
    /// Eligible voice holding the fewest notes, ties to the lowest index;
    /// fails when none is eligible.
    Balanced,
    /// First eligible voice by index; silently drops the note when none is
    /// eligible. Never fails.
    DropExcess,
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "first_fit" => Ok(Strategy::FirstFit),
            "balanced" => Ok(Strategy::Balanced),
            "drop_excess" => Ok(Strategy::DropExcess),
            other => Err(format!(
                "unknown strategy '{other}' (expected first_fit, balanced or drop_excess)"
            )),
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Strategy::FirstFit => "first_fit",
            Strategy::Balanced => "balanced",
            Strategy::DropExcess => "drop_excess",
        };
        f.write_str(name)
    }
}

/// Output of [`allocate`]: the voice buckets (some possibly empty) and the
/// notes dropped by [`Strategy::DropExcess`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Allocation {
    pub voices: Vec<Vec<NoteInterval>>,
    pub dropped: Vec<NoteInterval>,
}

/// A note fits a voice when the voice is empty or starts no earlier than
/// the voice's last note ends. Sharing the boundary tick is allowed.
fn eligible(voice: &[NoteInterval], note: &NoteInterval) -> bool {
    voice.last().map_or(true, |last| note.start >= last.end)
}

/// First eligible voice by index.
fn first_fit(voices: &[Vec<NoteInterval>], note: &NoteInterval) -> Option<usize> {
    voices.iter().position(|voice| eligible(voice, note))
}

/// Least-loaded eligible voice; `min_by_key` keeps the first minimum, which
/// gives the lowest-index tie-break.
fn least_loaded(voices: &[Vec<NoteInterval>], note: &NoteInterval) -> Option<usize> {
    voices
        .iter()
        .enumerate()
        .filter(|(_, voice)| eligible(voice, note))
        .min_by_key(|(_, voice)| voice.len())
        .map(|(index, _)| index)
}

/// Assign each note to one of `voice_count` voices under `strategy`.
///
/// `notes` must be sorted by `start` ascending (ties in original order),
/// as produced by [`crate::extract`]. For [`Strategy::FirstFit`] and
/// [`Strategy::Balanced`] the error is raised immediately mid-scan;
/// placements made before the failure are abandoned, not rolled back.
pub fn allocate(
    notes: Vec<NoteInterval>,
    voice_count: usize,
    strategy: Strategy,
) -> Result<Allocation> {
    if voice_count == 0 {
        return Err(Error::InvalidVoiceCount(0));
    }

    let mut voices: Vec<Vec<NoteInterval>> = vec![Vec::new(); voice_count];
    let mut dropped = Vec::new();

    for note in notes {
        let slot = match strategy {
            Strategy::FirstFit | Strategy::DropExcess => first_fit(&voices, &note),
            Strategy::Balanced => least_loaded(&voices, &note),
        };
        match slot {
            Some(index) => voices[index].push(note),
            None if strategy == Strategy::DropExcess => dropped.push(note),
            None => {
                return Err(Error::CapacityExceeded {
                    max_voices: voice_count,
                    note,
                })
            }
        }
    }

    debug!(
        voice_count,
        %strategy,
        placed = voices.iter().map(Vec::len).sum::<usize>(),
        dropped = dropped.len(),
        "allocation complete"
    );

    Ok(Allocation { voices, dropped })
}
