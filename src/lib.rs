//! # midisplit - polyphonic MIDI to monophonic voice tracks
//!
//! Umbrella crate coordinating the two subsystems:
//! - **midisplit-core** - format-agnostic voice separation (extraction,
//!   peak-concurrency analysis, greedy allocation, control merging, delta
//!   encoding)
//! - **midisplit-smf** - Standard MIDI File marshaling via `midly`
//!
//! ## Quick start
//!
//! ```ignore
//! use midisplit::prelude::*;
//!
//! let splitter = Splitter::builder()
//!     .max_voices(8)
//!     .strategy(Strategy::Balanced)
//!     .build()?;
//!
//! let report = splitter.split_file("song.mid", "song_flattened.mid")?;
//! println!("{report}");
//! ```

/// Re-export of midisplit-core for direct access
pub use midisplit_core as core;

/// Re-export of midisplit-smf for direct access
pub use midisplit_smf as smf;

pub use midisplit_core::{
    allocate, decode_deltas, encode_deltas, extract, merge_control, peak_concurrency, Allocation,
    ControlEvent, DeltaEncoder, DeltaEvent, EventKind, Extraction, NoteInterval, Strategy, Tick,
};

pub use midisplit_smf::{save_split, write_split, ParsedSmf};

mod error;
pub use error::{Error, Result};

mod builder;
mod report;
mod splitter;

pub use builder::SplitterBuilder;
pub use report::SplitReport;
pub use splitter::{SplitOutput, Splitter};

/// Convenience prelude for common imports
pub mod prelude {
    pub use crate::{SplitReport, Splitter, SplitterBuilder, Strategy};
}
