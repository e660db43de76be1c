//! The split pipeline facade.
//!
//! Runs the whole chain over an in-memory SMF: parse, extract, analyze,
//! allocate, merge, encode. Each stage completes before the next begins;
//! nothing is shared between runs.

use crate::builder::SplitterBuilder;
use crate::report::SplitReport;
use crate::Result;
use midisplit_core::{allocate, extract, merge_control, peak_concurrency, Strategy};
use midisplit_smf::{write_split, ParsedSmf};
use std::path::Path;
use tracing::{debug, info};

/// A configured splitter. Build one via [`Splitter::builder`].
#[derive(Debug, Clone)]
pub struct Splitter {
    max_voices: usize,
    strategy: Strategy,
    auto_tune: bool,
}

/// Result of [`Splitter::split`]: the serialized output file and the run
/// summary.
#[derive(Debug, Clone)]
pub struct SplitOutput {
    pub bytes: Vec<u8>,
    pub report: SplitReport,
}

impl Splitter {
    pub(crate) fn new(max_voices: usize, strategy: Strategy, auto_tune: bool) -> Self {
        Self {
            max_voices,
            strategy,
            auto_tune,
        }
    }

    pub fn builder() -> SplitterBuilder {
        SplitterBuilder::new()
    }

    /// Split an SMF given as bytes, returning the output file bytes and a
    /// report.
    ///
    /// Fails with [`midisplit_core::Error::CapacityExceeded`] (wrapped)
    /// when the first-fit or balanced strategy runs out of voices.
    pub fn split(&self, data: &[u8]) -> Result<SplitOutput> {
        let parsed = ParsedSmf::parse(data)?;
        let track_count = parsed.streams.len();
        let ticks_per_beat = parsed.ticks_per_beat;

        let extraction = extract(parsed.streams);
        let mut notes_per_track = vec![0usize; track_count];
        for note in &extraction.notes {
            notes_per_track[note.source_track] += 1;
        }
        let total_notes = extraction.notes.len();

        let peak = peak_concurrency(&extraction.notes);
        let effective_voices = if self.auto_tune && peak > 0 {
            peak.min(self.max_voices)
        } else {
            self.max_voices
        };
        info!(
            total_notes,
            peak,
            requested = self.max_voices,
            effective = effective_voices,
            strategy = %self.strategy,
            "allocating voices"
        );

        let allocation = allocate(extraction.notes, effective_voices, self.strategy)?;
        let controls = merge_control(extraction.controls);
        debug!(
            dropped = allocation.dropped.len(),
            control_events = controls.len(),
            "encoding output"
        );

        let bytes = write_split(ticks_per_beat, &allocation.voices, &controls)?;

        let report = SplitReport {
            notes_per_track,
            total_notes,
            peak_concurrency: peak,
            requested_voices: self.max_voices,
            effective_voices,
            voice_note_counts: allocation.voices.iter().map(Vec::len).collect(),
            dropped_notes: allocation.dropped.len(),
            control_events: controls.len(),
        };

        Ok(SplitOutput { bytes, report })
    }

    /// Read `input`, split it, and write the result to `output`.
    pub fn split_file(
        &self,
        input: impl AsRef<Path>,
        output: impl AsRef<Path>,
    ) -> Result<SplitReport> {
        let data = std::fs::read(input)?;
        let out = self.split(&data)?;
        std::fs::write(output, &out.bytes)?;
        Ok(out.report)
    }
}
